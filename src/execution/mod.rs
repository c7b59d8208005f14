mod cancel;
mod error;
mod worker;

pub use cancel::CancelToken;
pub use error::{Result, WorkerErr};
pub use worker::{Worker, WorkerStats};
