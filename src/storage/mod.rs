mod error;
mod shared;
mod store;

pub use error::{Result, StoreErr};
pub use shared::SharedVector;
pub use store::VectorStore;
