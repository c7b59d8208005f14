use std::sync::Arc;

use crate::{
    aggregation::{Aggregator, AtomicAggregator, BlockingAggregator},
    error::{Result, SaxpyErr},
    specs::AggregatorSpec,
};

/// Builds `Aggregator`s given a specification.
#[derive(Debug, Default)]
pub struct AggregatorBuilder;

impl AggregatorBuilder {
    /// Creates a new `AggregatorBuilder`.
    pub fn new() -> Self {
        Self
    }

    /// Builds a new shareable `Aggregator` following a spec.
    ///
    /// # Arguments
    /// * `spec` - The aggregation strategy.
    /// * `iterations` - The amount of cells, one per iteration.
    ///
    /// # Returns
    /// The aggregator, or an `Allocation` error if its cells can't be allocated.
    pub fn build(&self, spec: AggregatorSpec, iterations: usize) -> Result<Arc<dyn Aggregator>> {
        let allocation = |source| SaxpyErr::Allocation {
            len: iterations,
            source,
        };

        let aggregator: Arc<dyn Aggregator> = match spec {
            AggregatorSpec::Blocking => {
                Arc::new(BlockingAggregator::new(iterations).map_err(allocation)?)
            }
            AggregatorSpec::Atomic => {
                Arc::new(AtomicAggregator::new(iterations).map_err(allocation)?)
            }
        };

        Ok(aggregator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_every_strategy() {
        let builder = AggregatorBuilder::new();

        for spec in [AggregatorSpec::Blocking, AggregatorSpec::Atomic] {
            let aggregator = builder.build(spec, 3).unwrap();
            aggregator.contribute(1, 2.).unwrap();
            assert_eq!(aggregator.snapshot(), [0., 2., 0.]);
        }
    }

    #[test]
    fn test_unallocatable_aggregator() {
        let builder = AggregatorBuilder::new();

        for spec in [AggregatorSpec::Blocking, AggregatorSpec::Atomic] {
            let res = builder.build(spec, usize::MAX);
            assert!(matches!(
                res,
                Err(SaxpyErr::Allocation {
                    len: usize::MAX,
                    ..
                })
            ));
        }
    }
}
