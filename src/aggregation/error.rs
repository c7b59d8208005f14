use std::{
    error::Error,
    fmt::{self, Display},
};

/// The specific result type for the aggregation module.
pub type Result<T> = std::result::Result<T, AggregationErr>;

/// Error returned by an `Aggregator` whenever a contribution can't be applied.
///
/// A contribution that can't be applied would leave its cell permanently wrong,
/// so callers must treat this error as fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationErr {
    pub iteration: usize,
    pub cells: usize,
}

impl Display for AggregationErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { iteration, cells } = self;
        write!(
            f,
            "aggregation error: iteration {iteration} has no cell, there are {cells} cells"
        )
    }
}

impl Error for AggregationErr {}
