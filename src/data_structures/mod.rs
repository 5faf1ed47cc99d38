//! Low level containers backing the ECS storages.

mod column;
mod bit_set;

pub use bit_set::*;

pub(crate) use column::*;
