use std::sync::atomic::{AtomicU64, Ordering};

/// A vector of `f64` cells that many threads can read and write at once without locks.
///
/// Each cell holds the bit pattern of its value. Accesses are relaxed: every index is
/// expected to have a single writer, and readers on other threads observe the final
/// values only after joining that writer.
#[derive(Debug)]
pub struct SharedVector {
    cells: Box<[AtomicU64]>,
}

impl SharedVector {
    /// Wraps already allocated cells.
    pub(super) fn from_cells(cells: Vec<AtomicU64>) -> Self {
        Self {
            cells: cells.into_boxed_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the value at `idx`, or `None` if out of bounds.
    pub fn get(&self, idx: usize) -> Option<f64> {
        self.cells
            .get(idx)
            .map(|cell| f64::from_bits(cell.load(Ordering::Relaxed)))
    }

    /// Reads the value at `idx`.
    ///
    /// # Panics
    /// If `idx` is out of bounds.
    pub(crate) fn load(&self, idx: usize) -> f64 {
        f64::from_bits(self.cells[idx].load(Ordering::Relaxed))
    }

    /// Overwrites the value at `idx`.
    ///
    /// # Panics
    /// If `idx` is out of bounds.
    pub(crate) fn store(&self, idx: usize, value: f64) {
        self.cells[idx].store(value.to_bits(), Ordering::Relaxed);
    }

    /// Copies every value into a plain vector.
    pub fn to_vec(&self) -> Vec<f64> {
        self.cells
            .iter()
            .map(|cell| f64::from_bits(cell.load(Ordering::Relaxed)))
            .collect()
    }
}
