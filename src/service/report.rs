use std::time::Duration;

use crate::execution::WorkerStats;

/// The outcome of a finished run.
#[derive(Debug, Clone)]
pub struct SaxpyReport {
    /// The final state of the updated vector.
    pub y: Vec<f64>,
    /// The average of the updated vector after each iteration.
    pub averages: Vec<f64>,
    /// Wall-clock time of the parallel phase, initialization excluded.
    pub elapsed: Duration,
    /// Per worker stats, ordered by worker id.
    pub workers: Vec<WorkerStats>,
}

impl SaxpyReport {
    /// Returns the parallel phase duration in milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_nanos() as f64 / 1e6
    }

    /// Returns the last `n` values of `y`, fewer if it's shorter.
    pub fn y_tail(&self, n: usize) -> &[f64] {
        tail(&self.y, n)
    }

    /// Returns the last `n` averages, fewer if there are less iterations.
    pub fn averages_tail(&self, n: usize) -> &[f64] {
        tail(&self.averages, n)
    }
}

fn tail(values: &[f64], n: usize) -> &[f64] {
    &values[values.len().saturating_sub(n)..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tails() {
        let report = SaxpyReport {
            y: vec![1., 2., 3., 4.],
            averages: vec![5.],
            elapsed: Duration::from_micros(1500),
            workers: Vec::new(),
        };

        assert_eq!(report.y_tail(3), [2., 3., 4.]);
        assert_eq!(report.averages_tail(3), [5.]);
        assert_eq!(report.elapsed_ms(), 1.5);
    }
}
