use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::info;

use saxpy::{AggregatorSpec, SaxpySpec};

/// Iterative SAXPY over a fixed pool of worker threads.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// JSON file with the run's spec, flags override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Vector size.
    #[arg(short = 'p', long)]
    size: Option<usize>,

    /// Seed of the random number generator.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of worker threads.
    #[arg(short = 'n', long)]
    workers: Option<usize>,

    /// Maximum iterations.
    #[arg(short, long)]
    iterations: Option<usize>,

    /// How the per-iteration averages are accumulated.
    #[arg(long, value_enum)]
    aggregator: Option<AggregatorArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AggregatorArg {
    Blocking,
    Atomic,
}

impl From<AggregatorArg> for AggregatorSpec {
    fn from(value: AggregatorArg) -> Self {
        match value {
            AggregatorArg::Blocking => AggregatorSpec::Blocking,
            AggregatorArg::Atomic => AggregatorSpec::Atomic,
        }
    }
}

impl Args {
    fn into_spec(self) -> anyhow::Result<SaxpySpec> {
        let mut spec = match &self.config {
            Some(path) => SaxpySpec::from_json_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => SaxpySpec::default(),
        };

        if let Some(size) = self.size {
            spec.size = size;
        }
        if let Some(seed) = self.seed {
            spec.seed = seed;
        }
        if let Some(workers) = self.workers {
            spec.workers = workers;
        }
        if let Some(iterations) = self.iterations {
            spec.iterations = iterations;
        }
        if let Some(aggregator) = self.aggregator {
            spec.aggregator = aggregator.into();
        }

        Ok(spec)
    }
}

fn format_values(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("{v:.6}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let spec = Args::parse().into_spec()?;
    println!(
        "p = {}, seed = {}, n_threads = {}, max_iters = {}, aggregator = {:?}",
        spec.size, spec.seed, spec.workers, spec.iterations, spec.aggregator
    );

    let report = saxpy::run(spec).context("saxpy run failed")?;

    for stats in &report.workers {
        info!(
            worker_id = stats.worker_id,
            indices = stats.indices,
            rounds = stats.rounds,
            compute_ms = stats.compute_time.as_secs_f64() * 1000.;
            "worker stats"
        );
    }

    println!("Execution time: {:.6} ms", report.elapsed_ms());
    println!("Last 3 values of Y: {}", format_values(report.y_tail(3)));
    println!(
        "Last 3 values of Y_avgs: {}",
        format_values(report.averages_tail(3))
    );

    Ok(())
}
