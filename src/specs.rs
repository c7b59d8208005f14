use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SaxpyErr};

/// The largest vector a run accepts.
pub const MAX_SIZE: usize = i32::MAX as usize;

/// The specification for the `Aggregator` trait.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregatorSpec {
    /// One lock per iteration cell.
    #[default]
    Blocking,
    /// Lock-free compare-and-swap on each iteration cell.
    Atomic,
}

/// The specification of a whole SAXPY run.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SaxpySpec {
    pub size: usize,
    pub seed: u64,
    pub workers: usize,
    pub iterations: usize,
    pub aggregator: AggregatorSpec,
}

impl Default for SaxpySpec {
    fn default() -> Self {
        Self {
            size: 10_000_000,
            seed: 1,
            workers: 2,
            iterations: 1000,
            aggregator: AggregatorSpec::default(),
        }
    }
}

impl SaxpySpec {
    /// Loads a spec from a JSON file, missing fields take their default value.
    ///
    /// # Arguments
    /// * `path` - The path to the JSON file.
    ///
    /// # Errors
    /// An `InvalidConfig` error if the file can't be read or parsed.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SaxpyErr::InvalidConfig(format!("cannot read '{}': {e}", path.display()))
        })?;

        serde_json::from_str(&content)
            .map_err(|e| SaxpyErr::InvalidConfig(format!("invalid JSON: {e}")))
    }

    /// Checks every constraint of the run.
    ///
    /// # Errors
    /// An `InvalidConfig` error naming the first violated constraint.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 || self.size > MAX_SIZE {
            return Err(SaxpyErr::InvalidConfig(format!(
                "vector size must be in [1, {MAX_SIZE}], got {}",
                self.size
            )));
        }

        if self.workers == 0 {
            return Err(SaxpyErr::InvalidConfig(
                "worker count must be greater than zero".into(),
            ));
        }

        Ok(())
    }
}
