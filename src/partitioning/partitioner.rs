use super::{Partition, PartitionErr, Result};

/// Splits the indices of a vector among a fixed amount of workers.
///
/// Worker `k` owns `{k, k + n, k + 2n, ...}`, so the partitions of all the
/// workers are pairwise disjoint and their union is exactly `[0, len)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partitioner {
    len: usize,
    workers: usize,
}

impl Partitioner {
    /// Creates a new `Partitioner`.
    ///
    /// # Arguments
    /// * `len` - The length of the vector to partition.
    /// * `workers` - The amount of workers to partition among.
    ///
    /// # Returns
    /// A new `Partitioner` or a `PartitionErr` if either value is zero.
    pub fn new(len: usize, workers: usize) -> Result<Self> {
        if len == 0 {
            return Err(PartitionErr::EmptyVector);
        }

        if workers == 0 {
            return Err(PartitionErr::NoWorkers);
        }

        Ok(Self { len, workers })
    }

    /// Returns the length of the partitioned vector.
    pub fn vector_len(&self) -> usize {
        self.len
    }

    /// Returns the amount of workers.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Returns the partition owned by `worker_id`.
    ///
    /// # Returns
    /// The partition or an `UnknownWorker` error if `worker_id` isn't lower than the amount of workers.
    pub fn partition(&self, worker_id: usize) -> Result<Partition> {
        if worker_id >= self.workers {
            return Err(PartitionErr::UnknownWorker {
                worker_id,
                workers: self.workers,
            });
        }

        Ok(Partition::new(worker_id, self.workers, self.len))
    }

    /// Returns every partition ordered by worker id.
    pub fn partitions(&self) -> Vec<Partition> {
        (0..self.workers)
            .map(|worker_id| Partition::new(worker_id, self.workers, self.len))
            .collect()
    }
}
