mod builder;
mod coordinator;
mod report;

pub use builder::AggregatorBuilder;
pub use coordinator::{Coordinator, CoordinatorState};
pub use report::SaxpyReport;
