/// A `ValueGen` generates the initial values of the vectors.
pub trait ValueGen {
    /// Should sample at most `n` values.
    ///
    /// # Arguments
    /// * `n` - The upper limit of samples to generate.
    ///
    /// # Returns
    /// An option whether the generator is exhausted.
    fn sample(&mut self, n: usize) -> Option<Vec<f64>>;
}
