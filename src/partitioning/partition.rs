use std::iter::StepBy;
use std::ops::Range;

/// The set of vector indices owned by a single worker for the whole run.
///
/// A partition is the strided set `{offset, offset + stride, offset + 2 * stride, ...}`
/// clipped to `[0, len)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Partition {
    worker_id: usize,
    stride: usize,
    len: usize,
}

impl Partition {
    /// Creates a new `Partition`.
    ///
    /// # Arguments
    /// * `worker_id` - The owning worker, also the first index of the partition.
    /// * `stride` - The distance between consecutive owned indices, the total amount of workers.
    /// * `len` - The length of the partitioned vector.
    ///
    /// # Returns
    /// A new `Partition` instance.
    pub(super) fn new(worker_id: usize, stride: usize, len: usize) -> Self {
        Self {
            worker_id,
            stride,
            len,
        }
    }

    /// Returns the id of the worker owning this partition.
    pub fn worker_id(&self) -> usize {
        self.worker_id
    }

    /// Returns the distance between two consecutive owned indices.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the length of the vector this partition was cut from.
    pub fn vector_len(&self) -> usize {
        self.len
    }

    /// Iterates over the owned indices in ascending order.
    pub fn indices(&self) -> StepBy<Range<usize>> {
        let start = self.worker_id.min(self.len);
        (start..self.len).step_by(self.stride)
    }

    /// Returns the amount of owned indices.
    pub fn len(&self) -> usize {
        if self.worker_id >= self.len {
            return 0;
        }

        (self.len - self.worker_id).div_ceil(self.stride)
    }

    /// Whether this partition owns no index at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `idx` belongs to this partition.
    pub fn contains(&self, idx: usize) -> bool {
        idx < self.len && idx >= self.worker_id && (idx - self.worker_id) % self.stride == 0
    }
}
