use super::ValueGen;

/// A value generator that always yields the same value.
pub struct ConstValueGen {
    value: f64,
    remaining: usize,
}

impl ConstValueGen {
    /// Creates a new `ConstValueGen` value generator.
    ///
    /// # Arguments
    /// * `value` - The value to yield.
    /// * `limit` - The maximum amount of values to generate.
    ///
    /// # Returns
    /// A new `ConstValueGen` instance.
    pub fn new(value: f64, limit: usize) -> Self {
        Self {
            value,
            remaining: limit,
        }
    }
}

impl ValueGen for ConstValueGen {
    fn sample(&mut self, n: usize) -> Option<Vec<f64>> {
        if self.remaining == 0 {
            return None;
        }

        let n = n.min(self.remaining);
        self.remaining -= n;
        Some(vec![self.value; n])
    }
}
