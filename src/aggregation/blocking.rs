use std::collections::TryReserveError;

use parking_lot::Mutex;

use super::{AggregationErr, Aggregator, Result, try_cells};

/// An aggregator that serializes the contributions to each cell with its own lock.
///
/// Contributions to different iterations never contend with each other.
#[derive(Debug)]
pub struct BlockingAggregator {
    cells: Box<[Mutex<f64>]>,
}

impl BlockingAggregator {
    /// Creates a new `BlockingAggregator` with every cell set to zero.
    ///
    /// # Arguments
    /// * `iterations` - The amount of cells.
    ///
    /// # Returns
    /// A new `BlockingAggregator` or a `TryReserveError` if the cells can't be allocated.
    pub fn new(iterations: usize) -> std::result::Result<Self, TryReserveError> {
        let cells = try_cells(iterations, || Mutex::new(0.))?;
        Ok(Self { cells })
    }
}

impl Aggregator for BlockingAggregator {
    fn len(&self) -> usize {
        self.cells.len()
    }

    fn contribute(&self, iteration: usize, delta: f64) -> Result<()> {
        let cell = self.cells.get(iteration).ok_or(AggregationErr {
            iteration,
            cells: self.cells.len(),
        })?;

        *cell.lock() += delta;
        Ok(())
    }

    fn snapshot(&self) -> Vec<f64> {
        self.cells.iter().map(|cell| *cell.lock()).collect()
    }
}
