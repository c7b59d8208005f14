use std::{
    collections::TryReserveError,
    sync::atomic::{AtomicU64, Ordering},
};

use super::{AggregationErr, Aggregator, Result, try_cells};

/// An aggregator that accumulates into each cell without locks.
///
/// Every cell stores the bit pattern of an `f64` and is updated through a
/// compare-and-swap loop, a contribution is retried until it lands on the value
/// it was computed from.
#[derive(Debug)]
pub struct AtomicAggregator {
    cells: Box<[AtomicU64]>,
}

impl AtomicAggregator {
    /// Creates a new `AtomicAggregator` with every cell set to zero.
    ///
    /// # Arguments
    /// * `iterations` - The amount of cells.
    ///
    /// # Returns
    /// A new `AtomicAggregator` or a `TryReserveError` if the cells can't be allocated.
    pub fn new(iterations: usize) -> std::result::Result<Self, TryReserveError> {
        let zero = 0f64.to_bits();
        let cells = try_cells(iterations, || AtomicU64::new(zero))?;
        Ok(Self { cells })
    }
}

impl Aggregator for AtomicAggregator {
    fn len(&self) -> usize {
        self.cells.len()
    }

    fn contribute(&self, iteration: usize, delta: f64) -> Result<()> {
        let cell = self.cells.get(iteration).ok_or(AggregationErr {
            iteration,
            cells: self.cells.len(),
        })?;

        let mut current = cell.load(Ordering::Relaxed);
        loop {
            let next = (f64::from_bits(current) + delta).to_bits();

            match cell.compare_exchange_weak(current, next, Ordering::AcqRel, Ordering::Relaxed) {
                Ok(_) => return Ok(()),
                Err(actual) => current = actual,
            }
        }
    }

    fn snapshot(&self) -> Vec<f64> {
        self.cells
            .iter()
            .map(|cell| f64::from_bits(cell.load(Ordering::Acquire)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use super::*;

    #[test]
    fn test_starts_zeroed() {
        let aggregator = AtomicAggregator::new(4).unwrap();
        assert_eq!(aggregator.snapshot(), [0.; 4]);
    }

    #[test]
    fn test_out_of_range_iteration() {
        let aggregator = AtomicAggregator::new(0).unwrap();

        assert!(aggregator.is_empty());
        assert!(aggregator.contribute(0, 1.).is_err());
    }

    #[test]
    fn test_unallocatable_cells() {
        assert!(AtomicAggregator::new(usize::MAX).is_err());
    }

    #[test]
    fn test_concurrent_contributors_lose_no_update() {
        const THREADS: usize = 16;
        const CONTRIBUTIONS: usize = 2_000;
        const CELLS: usize = 3;

        let aggregator = Arc::new(AtomicAggregator::new(CELLS).unwrap());

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let aggregator = Arc::clone(&aggregator);
                thread::spawn(move || {
                    for i in 0..CONTRIBUTIONS {
                        aggregator.contribute(i % CELLS, 0.5).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let total: f64 = aggregator.snapshot().iter().sum();
        assert_eq!(total, (THREADS * CONTRIBUTIONS) as f64 * 0.5);
    }
}
