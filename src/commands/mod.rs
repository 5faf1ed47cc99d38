//! Deferred structural mutations, applied at a synchronization point.
//!
//! Structural changes invalidate the slot ranges parallel work is iterating over,
//! so they are recorded through [Commands] and replayed in order by [`World::sync`](crate::World::sync).

mod command_queue;

pub use command_queue::Commands;

pub(crate) use command_queue::{Command, CommandQueue};
