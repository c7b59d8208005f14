use super::Result;

/// Combines the partial sums of every worker into one shared cell per iteration.
///
/// Implementations must be safe for any amount of concurrent callers on the same
/// cell and must never lose an update.
pub trait Aggregator: Send + Sync {
    /// Returns the amount of cells, one per iteration.
    fn len(&self) -> usize;

    /// Whether the aggregator holds no cell.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Atomically adds `delta` to the cell of `iteration`.
    ///
    /// # Arguments
    /// * `iteration` - The index of the cell.
    /// * `delta` - The value to add to the cell.
    ///
    /// # Returns
    /// An `AggregationErr` if `iteration` has no cell.
    fn contribute(&self, iteration: usize, delta: f64) -> Result<()>;

    /// Copies the current value of every cell.
    fn snapshot(&self) -> Vec<f64>;
}
