//! Background and parallel execution on a pool of worker threads.

mod batch;
mod async_handle;
mod task_manager;

pub use batch::*;
pub use async_handle::*;
pub use task_manager::*;
