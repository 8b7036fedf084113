pub mod worker_pool;

pub use worker_pool::{retarget_batch, CancelToken, WorkerPool};
