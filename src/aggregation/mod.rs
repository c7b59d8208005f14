mod aggregator;
mod atomic;
mod blocking;
mod error;

use std::collections::TryReserveError;

pub use aggregator::Aggregator;
pub use atomic::AtomicAggregator;
pub use blocking::BlockingAggregator;
pub use error::{AggregationErr, Result};

/// Builds `len` cells with `init`, reserving their storage without aborting on failure.
fn try_cells<T>(
    len: usize,
    init: impl Fn() -> T,
) -> std::result::Result<Box<[T]>, TryReserveError> {
    let mut cells = Vec::new();
    cells.try_reserve_exact(len)?;
    cells.extend((0..len).map(|_| init()));
    Ok(cells.into_boxed_slice())
}
