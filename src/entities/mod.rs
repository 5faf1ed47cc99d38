//! [Entities](Entity) represent the individual "things" in your game or application.
//!
//! An [Entity] doesn't store any data and has no associated behaviour;
//! instead, it identifies which pieces of data ([Components](crate::components::Component)) belong together.

mod entity;
mod entity_allocator;

pub use entity::*;

pub(crate) use entity_allocator::*;
