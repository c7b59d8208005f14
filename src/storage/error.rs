use std::{collections::TryReserveError, error::Error, fmt};

use crate::initialization::RandErr;

/// The specific result type for the storage module.
pub type Result<T> = std::result::Result<T, StoreErr>;

/// Failures while materializing a `VectorStore`.
#[derive(Debug)]
pub enum StoreErr {
    Empty,
    LengthMismatch {
        x: usize,
        y: usize,
    },
    Allocation {
        len: usize,
        source: TryReserveError,
    },
    Exhausted {
        vector: &'static str,
        got: usize,
        expected: usize,
    },
    Rand(RandErr),
}

impl fmt::Display for StoreErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("vectors must hold at least one value"),
            Self::LengthMismatch { x, y } => {
                write!(f, "vector length mismatch: x has {x} values, y has {y}")
            }
            Self::Allocation { len, source } => {
                write!(f, "can't allocate a vector of {len} values: {source}")
            }
            Self::Exhausted {
                vector,
                got,
                expected,
            } => write!(
                f,
                "generator for {vector} exhausted: got {got} values, expected {expected}"
            ),
            Self::Rand(e) => write!(f, "invalid distribution: {e}"),
        }
    }
}

impl Error for StoreErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Allocation { source, .. } => Some(source),
            Self::Rand(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RandErr> for StoreErr {
    fn from(value: RandErr) -> Self {
        Self::Rand(value)
    }
}
