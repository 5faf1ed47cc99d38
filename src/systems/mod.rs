//! [Systems](System) provide the logic for modifying the state of [Entities](crate::entities::Entity)
//! and their associated [Components](crate::components::Component).
//!
//! A [System] must be registered with a [World](crate::World) before it can be executed by name
//! or as part of [`update_systems`](crate::World::update_systems).

mod system;
mod system_store;

pub use system::*;
pub(crate) use system_store::*;
