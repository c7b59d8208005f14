use std::{error::Error, fmt};

/// The specific result type for the partitioning module.
pub type Result<T> = std::result::Result<T, PartitionErr>;

/// Error returned when a partitioning can't be built or a worker id is unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartitionErr {
    EmptyVector,
    NoWorkers,
    UnknownWorker { worker_id: usize, workers: usize },
}

impl fmt::Display for PartitionErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyVector => f.write_str("can't partition an empty vector"),
            Self::NoWorkers => f.write_str("can't partition among zero workers"),
            Self::UnknownWorker { worker_id, workers } => {
                write!(f, "worker {worker_id} out of range, there are {workers} workers")
            }
        }
    }
}

impl Error for PartitionErr {}
