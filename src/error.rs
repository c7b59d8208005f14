use std::{collections::TryReserveError, error::Error, fmt, io};

use crate::{
    aggregation::AggregationErr, execution::WorkerErr, partitioning::PartitionErr,
    service::CoordinatorState, storage::StoreErr,
};

/// The crate's result type.
pub type Result<T> = std::result::Result<T, SaxpyErr>;

/// All errors that can occur during a SAXPY run.
#[derive(Debug)]
pub enum SaxpyErr {
    /// Invalid configuration, caught before any worker starts.
    InvalidConfig(String),
    /// The vectors of the requested size couldn't be allocated.
    Allocation { len: usize, source: TryReserveError },
    /// The thread of a worker couldn't be spawned.
    WorkerStart { worker_id: usize, source: io::Error },
    /// A contribution couldn't be applied to its iteration cell.
    Aggregation {
        worker_id: usize,
        source: AggregationErr,
    },
    /// A worker failed after the pool started.
    Worker { worker_id: usize, source: WorkerErr },
    /// A worker thread panicked.
    WorkerPanicked { worker_id: usize },
    /// The run was cancelled through its token.
    Cancelled,
    /// An operation was called in the wrong lifecycle state.
    InvalidState {
        op: &'static str,
        state: CoordinatorState,
    },
}

impl SaxpyErr {
    /// Maps the failure of a running worker into the run's error.
    pub(crate) fn from_worker(worker_id: usize, err: WorkerErr) -> Self {
        match err {
            WorkerErr::Aggregation(source) => Self::Aggregation { worker_id, source },
            WorkerErr::Cancelled { .. } => Self::Cancelled,
            source => Self::Worker { worker_id, source },
        }
    }
}

impl fmt::Display for SaxpyErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::Allocation { len, source } => {
                write!(f, "can't allocate {len} values: {source}")
            }
            Self::WorkerStart { worker_id, source } => {
                write!(f, "failed to start worker {worker_id}: {source}")
            }
            Self::Aggregation { worker_id, source } => {
                write!(f, "worker {worker_id} lost a contribution: {source}")
            }
            Self::Worker { worker_id, source } => write!(f, "worker {worker_id} error: {source}"),
            Self::WorkerPanicked { worker_id } => write!(f, "worker {worker_id} panicked"),
            Self::Cancelled => f.write_str("run cancelled"),
            Self::InvalidState { op, state } => {
                write!(f, "can't {op} while the coordinator is {state}")
            }
        }
    }
}

impl Error for SaxpyErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Allocation { source, .. } => Some(source),
            Self::WorkerStart { source, .. } => Some(source),
            Self::Aggregation { source, .. } => Some(source),
            Self::Worker { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<StoreErr> for SaxpyErr {
    fn from(value: StoreErr) -> Self {
        match value {
            StoreErr::Allocation { len, source } => Self::Allocation { len, source },
            other => Self::InvalidConfig(other.to_string()),
        }
    }
}

impl From<PartitionErr> for SaxpyErr {
    fn from(value: PartitionErr) -> Self {
        Self::InvalidConfig(value.to_string())
    }
}
