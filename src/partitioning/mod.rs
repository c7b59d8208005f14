mod error;
mod partition;
mod partitioner;

pub use error::{PartitionErr, Result};
pub use partition::Partition;
pub use partitioner::Partitioner;
