pub mod aggregation;
pub mod error;
pub mod execution;
pub mod initialization;
pub mod partitioning;
pub mod service;
pub mod specs;
pub mod storage;

use log::info;

pub use error::{Result, SaxpyErr};
pub use service::{Coordinator, CoordinatorState, SaxpyReport};
pub use specs::{AggregatorSpec, SaxpySpec};
pub use storage::VectorStore;

/// Runs a whole iterative SAXPY with seeded vectors.
///
/// # Errors
/// Returns a `SaxpyErr` if the spec is invalid, the vectors can't be allocated or any
/// worker fails.
pub fn run(spec: SaxpySpec) -> Result<SaxpyReport> {
    info!("starting run");
    let mut coordinator = Coordinator::new(spec)?;
    coordinator.initialize()?;
    coordinator.start()?;
    coordinator.join()?;
    coordinator.finish()
}
