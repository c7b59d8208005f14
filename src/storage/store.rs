use std::{rc::Rc, sync::atomic::AtomicU64};

use log::debug;

use super::{Result, SharedVector, StoreErr};
use crate::initialization::{RandValueGen, ValueGen, seeded_rng};

/// The maximum amount of values requested from a generator at once.
const SAMPLE_CHUNK: usize = 1 << 16;

/// Owns the two vectors of a SAXPY run and its scalar.
///
/// `x` is read-only once built. `y` is shared by every worker, each index written
/// by the single worker whose partition owns it.
#[derive(Debug)]
pub struct VectorStore {
    x: Box<[f64]>,
    y: SharedVector,
    a: f64,
}

impl VectorStore {
    /// Creates a new `VectorStore` from explicit values.
    ///
    /// # Arguments
    /// * `x` - The read-only vector.
    /// * `y` - The initial state of the updated vector.
    /// * `a` - The scalar multiplying `x`.
    ///
    /// # Returns
    /// A new `VectorStore` or a `StoreErr` if the vectors are empty or of different lengths.
    pub fn new(x: Vec<f64>, y: Vec<f64>, a: f64) -> Result<Self> {
        if x.len() != y.len() {
            return Err(StoreErr::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }

        if x.is_empty() {
            return Err(StoreErr::Empty);
        }

        let mut cells = try_with_capacity(y.len())?;
        cells.extend(y.into_iter().map(|v| AtomicU64::new(v.to_bits())));

        Ok(Self {
            x: x.into_boxed_slice(),
            y: SharedVector::from_cells(cells),
            a,
        })
    }

    /// Creates a new `VectorStore` drawing every value from generators.
    ///
    /// # Arguments
    /// * `len` - The length of both vectors.
    /// * `x_gen` - The generator for `x`.
    /// * `y_gen` - The generator for `y`, sampled after `x` is complete.
    /// * `a_gen` - The generator for `a`, sampled last.
    ///
    /// # Returns
    /// A new `VectorStore` or a `StoreErr` if the vectors can't be allocated or a generator
    /// runs out of values.
    pub fn generate<XG, YG, AG>(
        len: usize,
        x_gen: &mut XG,
        y_gen: &mut YG,
        a_gen: &mut AG,
    ) -> Result<Self>
    where
        XG: ValueGen,
        YG: ValueGen,
        AG: ValueGen,
    {
        if len == 0 {
            return Err(StoreErr::Empty);
        }

        let x = fill("x", len, x_gen)?;

        let mut cells = try_with_capacity(len)?;
        drain_into("y", len, y_gen, |chunk| {
            cells.extend(chunk.into_iter().map(|v| AtomicU64::new(v.to_bits())));
        })?;

        let a = fill("a", 1, a_gen)?[0];

        Ok(Self {
            x: x.into_boxed_slice(),
            y: SharedVector::from_cells(cells),
            a,
        })
    }

    /// Creates a new `VectorStore` with every value drawn uniformly from `[0, 1]`.
    ///
    /// `x`, `y` and `a` come, in that order, from a single stream seeded with `seed`, so the
    /// same seed and length always produce the same store.
    ///
    /// # Arguments
    /// * `len` - The length of both vectors.
    /// * `seed` - The seed of the random number generator.
    pub fn seeded(len: usize, seed: u64) -> Result<Self> {
        let rng = seeded_rng(seed);
        let mut x_gen = RandValueGen::unit(Rc::clone(&rng), len)?;
        let mut y_gen = RandValueGen::unit(Rc::clone(&rng), len)?;
        let mut a_gen = RandValueGen::unit(rng, 1)?;

        let store = Self::generate(len, &mut x_gen, &mut y_gen, &mut a_gen)?;
        debug!(len = len, seed = seed, a = store.a; "generated vector store");
        Ok(store)
    }

    /// Returns the length of both vectors.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// A store always holds at least one value.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Returns the scalar multiplying `x`.
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Returns the read-only vector.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Returns the shared, updated vector.
    pub fn y(&self) -> &SharedVector {
        &self.y
    }

    /// Applies a single SAXPY update, `y[idx] = y[idx] + a * x[idx]`.
    ///
    /// # Returns
    /// The updated value of `y[idx]`.
    ///
    /// # Panics
    /// If `idx` is out of bounds.
    #[inline]
    pub(crate) fn axpy(&self, idx: usize) -> f64 {
        let updated = self.y.load(idx) + self.a * self.x[idx];
        self.y.store(idx, updated);
        updated
    }
}

/// Reserves a vector of exactly `len` elements without aborting on failure.
fn try_with_capacity<T>(len: usize) -> Result<Vec<T>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|source| StoreErr::Allocation { len, source })?;

    Ok(buf)
}

/// Samples exactly `len` values from `value_gen` into a new vector.
fn fill<G: ValueGen>(vector: &'static str, len: usize, value_gen: &mut G) -> Result<Vec<f64>> {
    let mut values = try_with_capacity(len)?;
    drain_into(vector, len, value_gen, |chunk| values.extend(chunk))?;
    Ok(values)
}

/// Samples exactly `len` values from `value_gen`, handing them to `sink` chunk by chunk.
fn drain_into<G, F>(
    vector: &'static str,
    len: usize,
    value_gen: &mut G,
    mut sink: F,
) -> Result<()>
where
    G: ValueGen,
    F: FnMut(Vec<f64>),
{
    let mut got = 0;

    while got < len {
        let Some(chunk) = value_gen.sample(SAMPLE_CHUNK.min(len - got)) else {
            break;
        };

        if chunk.is_empty() {
            break;
        }

        got += chunk.len();
        sink(chunk);
    }

    if got != len {
        return Err(StoreErr::Exhausted {
            vector,
            got,
            expected: len,
        });
    }

    Ok(())
}
