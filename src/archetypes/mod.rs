//! [Archetypes](Archetype) are the sets of [components](crate::components::Component)
//! tied to one or more [entities](crate::entities::Entity).
//!
//! Entities with the same archetype live in the same [ArchetypeStorage],
//! one contiguous column per component.

mod archetype;
mod archetype_macros;
mod archetype_store;
mod archetype_storage;

pub use archetype::*;
pub use archetype_storage::*;

pub(crate) use archetype_store::*;
