use std::{
    fmt, mem,
    sync::Arc,
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use log::{info, warn};

use super::{AggregatorBuilder, SaxpyReport};
use crate::{
    aggregation::Aggregator,
    error::{Result, SaxpyErr},
    execution::{self, CancelToken, Worker, WorkerStats},
    partitioning::Partitioner,
    specs::SaxpySpec,
    storage::VectorStore,
};

type WorkerHandle = JoinHandle<execution::Result<WorkerStats>>;

/// The lifecycle of a `Coordinator`.
///
/// A successful run walks `Created → Initialized → Running → Joined → Done` without
/// skipping any state. A run that fails after its store was built ends in `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorState {
    Created,
    Initialized,
    Running,
    Joined,
    Done,
    Failed,
}

impl fmt::Display for CoordinatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Created => "created",
            Self::Initialized => "initialized",
            Self::Running => "running",
            Self::Joined => "joined",
            Self::Done => "done",
            Self::Failed => "failed",
        };

        f.write_str(name)
    }
}

/// Drives a whole run: owns the vectors, starts the worker pool once and joins it
/// after the last iteration.
pub struct Coordinator {
    spec: SaxpySpec,
    state: CoordinatorState,
    aggregator: Arc<dyn Aggregator>,
    cancel: CancelToken,
    store: Option<Arc<VectorStore>>,
    handles: Vec<(usize, WorkerHandle)>,
    stats: Vec<WorkerStats>,
    started: Option<Instant>,
    elapsed: Duration,
}

impl Coordinator {
    /// Creates a new `Coordinator` with the aggregator named by the spec.
    ///
    /// # Arguments
    /// * `spec` - The specification of the run.
    ///
    /// # Returns
    /// A `Created` coordinator, an `InvalidConfig` error if the spec is invalid or an
    /// `Allocation` error if the per-iteration averages can't be allocated.
    pub fn new(spec: SaxpySpec) -> Result<Self> {
        spec.validate()?;
        let aggregator = AggregatorBuilder::new().build(spec.aggregator, spec.iterations)?;
        Self::assemble(spec, aggregator)
    }

    /// Creates a new `Coordinator` posting every round into `aggregator`.
    ///
    /// # Arguments
    /// * `spec` - The specification of the run, its `aggregator` field is ignored.
    /// * `aggregator` - Where the partial averages are accumulated.
    ///
    /// # Returns
    /// A `Created` coordinator, or an `InvalidConfig` error if the spec is invalid or the
    /// aggregator can't hold every iteration.
    pub fn with_aggregator(spec: SaxpySpec, aggregator: Arc<dyn Aggregator>) -> Result<Self> {
        spec.validate()?;
        Self::assemble(spec, aggregator)
    }

    fn assemble(spec: SaxpySpec, aggregator: Arc<dyn Aggregator>) -> Result<Self> {
        if aggregator.len() < spec.iterations {
            return Err(SaxpyErr::InvalidConfig(format!(
                "aggregator holds {} cells, {} iterations requested",
                aggregator.len(),
                spec.iterations
            )));
        }

        Ok(Self {
            spec,
            state: CoordinatorState::Created,
            aggregator,
            cancel: CancelToken::new(),
            store: None,
            handles: Vec::new(),
            stats: Vec::new(),
            started: None,
            elapsed: Duration::ZERO,
        })
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> CoordinatorState {
        self.state
    }

    /// Returns the specification of the run.
    pub fn spec(&self) -> &SaxpySpec {
        &self.spec
    }

    /// Returns a token that cancels the run from any thread.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Builds the seeded vectors of the run.
    ///
    /// # Errors
    /// An `Allocation` error if the vectors can't be allocated.
    pub fn initialize(&mut self) -> Result<()> {
        self.expect_state("initialize", CoordinatorState::Created)?;

        let store = VectorStore::seeded(self.spec.size, self.spec.seed)?;
        self.install(store);
        Ok(())
    }

    /// Uses caller provided vectors for the run.
    ///
    /// # Errors
    /// An `InvalidConfig` error if the store's length isn't the spec's size.
    pub fn initialize_with(&mut self, store: VectorStore) -> Result<()> {
        self.expect_state("initialize", CoordinatorState::Created)?;

        if store.len() != self.spec.size {
            return Err(SaxpyErr::InvalidConfig(format!(
                "store holds {} values, spec size is {}",
                store.len(),
                self.spec.size
            )));
        }

        self.install(store);
        Ok(())
    }

    fn install(&mut self, store: VectorStore) {
        self.store = Some(Arc::new(store));
        self.state = CoordinatorState::Initialized;

        let SaxpySpec {
            size,
            seed,
            workers,
            iterations,
            ..
        } = self.spec;
        info!(
            size = size, seed = seed, workers = workers, iterations = iterations;
            "coordinator initialized"
        );
    }

    /// Partitions the vectors and starts every worker, once for the whole run.
    ///
    /// # Errors
    /// A `WorkerStart` error if a thread can't be spawned, the workers already started
    /// are cancelled and joined before returning.
    pub fn start(&mut self) -> Result<()> {
        self.expect_state("start", CoordinatorState::Initialized)?;
        let Some(store) = self.store.clone() else {
            return Err(self.invalid_state("start"));
        };

        let partitioner = Partitioner::new(store.len(), self.spec.workers)?;
        let workers = build_workers(
            &partitioner,
            &store,
            &self.aggregator,
            self.spec.iterations,
            &self.cancel,
        )?;

        self.started = Some(Instant::now());

        for worker in workers {
            let worker_id = worker.worker_id();
            let cancel = self.cancel.clone();

            let spawned = thread::Builder::new()
                .name(format!("saxpy-worker-{worker_id}"))
                .spawn(move || {
                    let _guard = CancelOnPanic(cancel.clone());
                    let res = worker.run();
                    if res.is_err() {
                        cancel.cancel();
                    }
                    res
                });

            match spawned {
                Ok(handle) => self.handles.push((worker_id, handle)),
                Err(source) => {
                    warn!(worker_id = worker_id; "failed to spawn worker, cancelling the run");
                    self.cancel.cancel();
                    let _ = self.join_all();
                    self.state = CoordinatorState::Failed;
                    return Err(SaxpyErr::WorkerStart { worker_id, source });
                }
            }
        }

        self.state = CoordinatorState::Running;
        info!(workers = self.handles.len(); "worker pool started");
        Ok(())
    }

    /// Blocks until every worker has finished every round.
    ///
    /// # Errors
    /// The first worker failure, in which case every other worker was cancelled and
    /// joined as well.
    pub fn join(&mut self) -> Result<()> {
        self.expect_state("join", CoordinatorState::Running)?;

        let res = self.join_all();
        self.elapsed = self.started.map(|t| t.elapsed()).unwrap_or_default();

        match res {
            Ok(stats) => {
                self.stats = stats;
                self.state = CoordinatorState::Joined;
                info!(elapsed_ms = self.elapsed.as_secs_f64() * 1000.; "worker pool joined");
                Ok(())
            }
            Err(e) => {
                warn!("run failed: {e}");
                self.state = CoordinatorState::Failed;
                Err(e)
            }
        }
    }

    /// Joins every spawned worker.
    ///
    /// A failed worker has already tripped the token, so the others stop within a round.
    /// A real failure takes precedence over the cancellations it caused.
    fn join_all(&mut self) -> Result<Vec<WorkerStats>> {
        let mut stats = Vec::with_capacity(self.handles.len());
        let mut failure = None;
        let mut cancelled = false;

        for (worker_id, handle) in mem::take(&mut self.handles) {
            let err = match handle.join() {
                Ok(Ok(worker_stats)) => {
                    stats.push(worker_stats);
                    continue;
                }
                Ok(Err(e)) => SaxpyErr::from_worker(worker_id, e),
                Err(_) => {
                    self.cancel.cancel();
                    SaxpyErr::WorkerPanicked { worker_id }
                }
            };

            match err {
                SaxpyErr::Cancelled => cancelled = true,
                err if failure.is_none() => failure = Some(err),
                _ => {}
            }
        }

        match failure {
            Some(err) => Err(err),
            None if cancelled => Err(SaxpyErr::Cancelled),
            None => Ok(stats),
        }
    }

    /// Collects the results of a joined run.
    ///
    /// # Returns
    /// The final `y`, the per-iteration averages and the parallel phase stats.
    pub fn finish(&mut self) -> Result<SaxpyReport> {
        self.expect_state("finish", CoordinatorState::Joined)?;
        let Some(store) = self.store.as_ref() else {
            return Err(self.invalid_state("finish"));
        };

        let report = SaxpyReport {
            y: store.y().to_vec(),
            averages: self.aggregator.snapshot()[..self.spec.iterations].to_vec(),
            elapsed: self.elapsed,
            workers: mem::take(&mut self.stats),
        };

        self.state = CoordinatorState::Done;
        info!("run done");
        Ok(report)
    }

    fn expect_state(&self, op: &'static str, expected: CoordinatorState) -> Result<()> {
        if self.state != expected {
            return Err(self.invalid_state(op));
        }

        Ok(())
    }

    fn invalid_state(&self, op: &'static str) -> SaxpyErr {
        SaxpyErr::InvalidState {
            op,
            state: self.state,
        }
    }
}

impl Drop for Coordinator {
    fn drop(&mut self) {
        if self.handles.is_empty() {
            return;
        }

        self.cancel.cancel();
        for (_, handle) in self.handles.drain(..) {
            let _ = handle.join();
        }
    }
}

/// Builds one worker per partition, all sharing the same store, aggregator and token.
///
/// # Errors
/// An `InvalidConfig` error if a worker rejects its partition or the aggregator.
fn build_workers(
    partitioner: &Partitioner,
    store: &Arc<VectorStore>,
    aggregator: &Arc<dyn Aggregator>,
    iterations: usize,
    cancel: &CancelToken,
) -> Result<Vec<Worker>> {
    partitioner
        .partitions()
        .into_iter()
        .map(|partition| {
            let worker_id = partition.worker_id();
            Worker::new(
                partition,
                Arc::clone(store),
                Arc::clone(aggregator),
                iterations,
                cancel.clone(),
            )
            .map_err(|e| SaxpyErr::InvalidConfig(format!("worker {worker_id}: {e}")))
        })
        .collect()
}

/// Trips the run's token if the worker thread unwinds.
struct CancelOnPanic(CancelToken);

impl Drop for CancelOnPanic {
    fn drop(&mut self) {
        if thread::panicking() {
            self.0.cancel();
        }
    }
}
