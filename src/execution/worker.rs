use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use log::{debug, trace, warn};

use super::{CancelToken, Result, WorkerErr};
use crate::{aggregation::Aggregator, partitioning::Partition, storage::VectorStore};

/// What a worker did during a run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WorkerStats {
    pub worker_id: usize,
    pub indices: usize,
    pub rounds: usize,
    pub compute_time: Duration,
}

/// A long-lived unit of execution bound to a single partition.
///
/// It runs every round of the computation by itself, updating the indices of its
/// partition and posting one partial average per round into the aggregator.
pub struct Worker {
    partition: Partition,
    store: Arc<VectorStore>,
    aggregator: Arc<dyn Aggregator>,
    iterations: usize,
    cancel: CancelToken,
}

impl Worker {
    /// Creates a new `Worker`.
    ///
    /// # Arguments
    /// * `partition` - The indices this worker owns for the whole run.
    /// * `store` - The vectors shared by every worker.
    /// * `aggregator` - Where the partial averages of each round are posted.
    /// * `iterations` - The amount of rounds to run.
    /// * `cancel` - The run's cancellation token.
    ///
    /// # Returns
    /// A new `Worker`, or a `WorkerErr` if the partition doesn't fit the store or the
    /// aggregator can't hold every round.
    pub fn new(
        partition: Partition,
        store: Arc<VectorStore>,
        aggregator: Arc<dyn Aggregator>,
        iterations: usize,
        cancel: CancelToken,
    ) -> Result<Self> {
        if partition.vector_len() != store.len() {
            return Err(WorkerErr::PartitionMismatch {
                worker_id: partition.worker_id(),
                partition_len: partition.vector_len(),
                store_len: store.len(),
            });
        }

        if aggregator.len() < iterations {
            return Err(WorkerErr::MissingCells {
                iterations,
                cells: aggregator.len(),
            });
        }

        Ok(Self {
            partition,
            store,
            aggregator,
            iterations,
            cancel,
        })
    }

    pub fn worker_id(&self) -> usize {
        self.partition.worker_id()
    }

    /// Runs every round in order.
    ///
    /// # Returns
    /// The worker's stats, or the first error hit. A tripped cancellation token is reported
    /// as `WorkerErr::Cancelled`.
    pub fn run(self) -> Result<WorkerStats> {
        let worker_id = self.worker_id();
        let len = self.store.len() as f64;
        let mut compute_time = Duration::ZERO;

        debug!(worker_id = worker_id, indices = self.partition.len(); "worker started");

        for round in 0..self.iterations {
            if self.cancel.is_cancelled() {
                warn!(worker_id = worker_id, round = round; "worker cancelled");
                return Err(WorkerErr::Cancelled { round });
            }

            let start = Instant::now();
            let partial = self.sweep();
            compute_time += start.elapsed();

            self.aggregator.contribute(round, partial / len)?;
            trace!(worker_id = worker_id, round = round, partial = partial; "posted partial sum");
        }

        debug!(worker_id = worker_id, rounds = self.iterations; "worker finished");

        Ok(WorkerStats {
            worker_id,
            indices: self.partition.len(),
            rounds: self.iterations,
            compute_time,
        })
    }

    /// Updates every owned index once, in ascending order.
    ///
    /// # Returns
    /// The sum of the updated values.
    fn sweep(&self) -> f64 {
        self.partition
            .indices()
            .map(|idx| self.store.axpy(idx))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{aggregation::BlockingAggregator, partitioning::Partitioner};

    fn store(x: Vec<f64>, y: Vec<f64>, a: f64) -> Arc<VectorStore> {
        Arc::new(VectorStore::new(x, y, a).unwrap())
    }

    #[test]
    fn test_single_worker_updates_everything() {
        const ITERATIONS: usize = 3;

        let store = store(vec![1., 2.], vec![0., 0.], 1.);
        let aggregator = Arc::new(BlockingAggregator::new(ITERATIONS).unwrap());
        let partition = Partitioner::new(2, 1).unwrap().partition(0).unwrap();

        let worker = Worker::new(
            partition,
            Arc::clone(&store),
            aggregator.clone(),
            ITERATIONS,
            CancelToken::new(),
        )
        .unwrap();

        let stats = worker.run().unwrap();
        assert_eq!(stats.rounds, ITERATIONS);
        assert_eq!(stats.indices, 2);

        assert_eq!(store.y().to_vec(), [3., 6.]);
        assert_eq!(aggregator.snapshot(), [1.5, 3., 4.5]);
    }

    #[test]
    fn test_worker_only_touches_its_partition() {
        let store = store(vec![1.; 5], vec![0.; 5], 1.);
        let aggregator = Arc::new(BlockingAggregator::new(1).unwrap());
        let partition = Partitioner::new(5, 2).unwrap().partition(1).unwrap();

        Worker::new(partition, Arc::clone(&store), aggregator.clone(), 1, CancelToken::new())
            .unwrap()
            .run()
            .unwrap();

        assert_eq!(store.y().to_vec(), [0., 1., 0., 1., 0.]);
        assert_eq!(aggregator.snapshot(), [2. / 5.]);
    }

    #[test]
    fn test_empty_partition_contributes_zero() {
        let store = store(vec![1.], vec![1.], 1.);
        let aggregator = Arc::new(BlockingAggregator::new(2).unwrap());
        let partition = Partitioner::new(1, 5).unwrap().partition(3).unwrap();

        let stats = Worker::new(partition, store, aggregator.clone(), 2, CancelToken::new())
            .unwrap()
            .run()
            .unwrap();

        assert_eq!(stats.indices, 0);
        assert_eq!(stats.rounds, 2);
        assert_eq!(aggregator.snapshot(), [0., 0.]);
    }

    #[test]
    fn test_rejects_foreign_partition() {
        let store = store(vec![1.; 3], vec![1.; 3], 1.);
        let aggregator = Arc::new(BlockingAggregator::new(1).unwrap());
        let partition = Partitioner::new(4, 2).unwrap().partition(0).unwrap();

        let res = Worker::new(partition, store, aggregator, 1, CancelToken::new());
        assert!(matches!(
            res,
            Err(WorkerErr::PartitionMismatch {
                partition_len: 4,
                store_len: 3,
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_missing_cells() {
        let store = store(vec![1.], vec![1.], 1.);
        let aggregator = Arc::new(BlockingAggregator::new(1).unwrap());
        let partition = Partitioner::new(1, 1).unwrap().partition(0).unwrap();

        let res = Worker::new(partition, store, aggregator, 2, CancelToken::new());
        assert!(matches!(
            res,
            Err(WorkerErr::MissingCells {
                iterations: 2,
                cells: 1
            })
        ));
    }

    #[test]
    fn test_cancelled_worker_stops() {
        let store = store(vec![1.], vec![0.], 1.);
        let aggregator = Arc::new(BlockingAggregator::new(4).unwrap());
        let partition = Partitioner::new(1, 1).unwrap().partition(0).unwrap();
        let cancel = CancelToken::new();
        cancel.cancel();

        let res = Worker::new(partition, Arc::clone(&store), aggregator, 4, cancel)
            .unwrap()
            .run();

        assert!(matches!(res, Err(WorkerErr::Cancelled { round: 0 })));
        assert_eq!(store.y().to_vec(), [0.]);
    }
}
