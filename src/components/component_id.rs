//! A stable runtime identifier tied to a [Component](crate::components::Component) type.
//!
//! [Component ids](ComponentId) are handed out by a [ComponentRegistry](crate::components::ComponentRegistry)
//! in registration order, so registering the same types in the same order always yields the same ids.
//! They are used to populate the [bit sets](crate::data_structures::BitSet) behind
//! [archetypes](crate::archetypes::Archetype) and [queries](crate::queries::Query).

use std::fmt;

/// Identifier of a registered [Component](crate::components::Component) type.
#[derive(Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone)]
pub struct ComponentId {
	value: u32,
}

impl ComponentId {
	#[inline(always)]
	pub(crate) const fn new(value: u32) -> Self {
		Self { value }
	}

	/// The id as an index into per-component tables.
	#[inline(always)]
	pub const fn index(&self) -> usize {
		self.value as usize
	}
}

impl fmt::Debug for ComponentId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "ComponentId({})", self.value)
	}
}
