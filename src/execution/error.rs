use std::{error::Error, fmt};

use crate::aggregation::AggregationErr;

/// The execution module's result type.
pub type Result<T> = std::result::Result<T, WorkerErr>;

/// Worker runtime failures.
#[derive(Debug)]
pub enum WorkerErr {
    PartitionMismatch {
        worker_id: usize,
        partition_len: usize,
        store_len: usize,
    },
    MissingCells {
        iterations: usize,
        cells: usize,
    },
    Aggregation(AggregationErr),
    Cancelled {
        round: usize,
    },
}

impl fmt::Display for WorkerErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerErr::PartitionMismatch {
                worker_id,
                partition_len,
                store_len,
            } => write!(
                f,
                "partition of worker {worker_id} was cut from a vector of {partition_len} values, the store holds {store_len}"
            ),
            WorkerErr::MissingCells { iterations, cells } => write!(
                f,
                "{iterations} iterations requested but the aggregator only has {cells} cells"
            ),
            WorkerErr::Aggregation(e) => write!(f, "{e}"),
            WorkerErr::Cancelled { round } => write!(f, "cancelled before round {round}"),
        }
    }
}

impl Error for WorkerErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WorkerErr::Aggregation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<AggregationErr> for WorkerErr {
    fn from(value: AggregationErr) -> Self {
        Self::Aggregation(value)
    }
}
