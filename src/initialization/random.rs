use std::{cell::RefCell, rc::Rc};

use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Uniform};

use super::{Result, ValueGen};

/// A value generator drawing uniformly from `[0, 1]`, the range every seeded vector uses.
///
/// Several generators can share the same random number generator, in which case
/// they consume a single stream in the order they are sampled.
pub struct RandValueGen<R: Rng> {
    rng: Rc<RefCell<R>>,
    distribution: Uniform<f64>,
    remaining: usize,
}

/// Creates the shared random number generator for a seeded run.
///
/// # Arguments
/// * `seed` - The seed of the run.
pub fn seeded_rng(seed: u64) -> Rc<RefCell<StdRng>> {
    Rc::new(RefCell::new(StdRng::seed_from_u64(seed)))
}

impl<R: Rng> RandValueGen<R> {
    /// Creates a new `RandValueGen` over `[0, 1]`.
    ///
    /// # Arguments
    /// * `rng` - A random number generator, possibly shared with other generators.
    /// * `limit` - The maximum amount of numbers to generate.
    pub fn unit(rng: Rc<RefCell<R>>, limit: usize) -> Result<Self> {
        Ok(Self {
            rng,
            distribution: Uniform::new_inclusive(0., 1.)?,
            remaining: limit,
        })
    }
}

impl<R: Rng> ValueGen for RandValueGen<R> {
    fn sample(&mut self, n: usize) -> Option<Vec<f64>> {
        if self.remaining == 0 {
            return None;
        }

        let n = n.min(self.remaining);
        self.remaining -= n;

        let mut rng = self.rng.borrow_mut();
        let sample = (0..n).map(|_| self.distribution.sample(&mut *rng)).collect();
        Some(sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let mut value_gen = RandValueGen::unit(seeded_rng(42), 0).unwrap();
        assert!(value_gen.sample(1).is_none());
    }

    #[test]
    fn test_partial() {
        let mut value_gen = RandValueGen::unit(seeded_rng(42), 10).unwrap();

        assert_eq!(value_gen.sample(7).unwrap().len(), 7);
        assert_eq!(value_gen.sample(7).unwrap().len(), 3);
        assert!(value_gen.sample(1).is_none());
    }

    #[test]
    fn test_values_in_unit_range() {
        let mut value_gen = RandValueGen::unit(seeded_rng(7), 1_000).unwrap();
        let sample = value_gen.sample(1_000).unwrap();

        assert!(sample.iter().all(|v| (0. ..=1.).contains(v)));
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut first = RandValueGen::unit(seeded_rng(3), 32).unwrap();
        let mut second = RandValueGen::unit(seeded_rng(3), 32).unwrap();

        assert_eq!(first.sample(32), second.sample(32));
    }

    #[test]
    fn test_shared_rng_continues_the_stream() {
        let whole = RandValueGen::unit(seeded_rng(9), 8).unwrap().sample(8).unwrap();

        let rng = seeded_rng(9);
        let mut head = RandValueGen::unit(Rc::clone(&rng), 5).unwrap();
        let mut tail = RandValueGen::unit(rng, 3).unwrap();

        let mut joined = head.sample(5).unwrap();
        joined.extend(tail.sample(3).unwrap());
        assert_eq!(joined, whole);
    }
}
