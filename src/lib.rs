//! An archetype-based Entity-Component-System.
//!
//! Entities sharing the same set of components live together in column storages,
//! which queries and systems walk sequentially, on a background job or split in
//! batches across a pool of worker threads.

extern crate self as strata_ecs;

pub mod data_structures;
pub mod components;
pub mod archetypes;
pub mod entities;
pub mod commands;
pub mod queries;
pub mod systems;
pub mod tasks;
mod config;
mod error;
mod world;

pub use world::*;
pub use config::EcsConfig;
pub use error::{EcsError, EcsResult};

pub mod prelude {
	pub use crate::archetype;
	pub use crate::systems::*;
	pub use crate::components::*;
	pub use crate::commands::Commands;
	pub use crate::entities::{Entity, MAX_GENERATIONS};
	pub use crate::queries::{Query, QueryBuilder, QueryContext};
	pub use crate::archetypes::{Archetype, ArchetypeId, ArchetypeStorage};
	pub use crate::tasks::{Async, AsyncStatus, TaskManager, TaskScope};
	pub use crate::{EcsConfig, EcsError, EcsResult, World};
}

#[cfg(test)]
mod tests;
