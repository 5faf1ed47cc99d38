//! [Components](Component) are the plain data attached to [entities](crate::entities::Entity).
//!
//! Component types are registered once in a [ComponentRegistry] before any
//! [World](crate::World) is created.

mod component_id;
mod component_type;
mod component_fetch;
mod component_registry;

pub use component_id::*;
pub use component_type::*;
pub use component_fetch::*;
pub use component_registry::*;
pub use strata_ecs_derive::Component;
