mod constant;
mod error;
mod random;
mod value_gen;

pub use constant::ConstValueGen;
pub use error::{RandErr, Result};
pub use random::{RandValueGen, seeded_rng};
pub use value_gen::ValueGen;
