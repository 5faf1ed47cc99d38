//! [Queries](Query) describe which [components](crate::components::Component) an operation touches,
//! and select the [archetypes](crate::archetypes::Archetype) it runs on.

mod query;
mod query_context;

pub use query::*;
pub use query_context::*;
