use crate::data_structures::{BitSet, BIT_SET_CAPACITY};
use crate::components::ComponentId;
use std::fmt;

/// Maximum number of distinct [component](crate::components::Component) types.
pub const MAX_COMPONENTS: usize = BIT_SET_CAPACITY;

/// The exact set of [component](crate::components::Component) types an entity has.
///
/// An [Archetype] is a plain value: adding or removing a component produces a new
/// [Archetype] rather than changing an existing one.
#[derive(Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Archetype {
	components: BitSet,
}

impl Archetype {
	pub const fn new() -> Self {
		Self { components: BitSet::new() }
	}

	/// Create an [Archetype] containing the specified components.
	pub fn from_ids(ids: &[ComponentId]) -> Self {
		Self {
			components: ids.iter().map(|id| id.index()).collect(),
		}
	}

	/// A copy of this archetype that also contains `id`.
	#[must_use]
	pub fn with(self, id: ComponentId) -> Self {
		Self { components: self.components.with(id.index()) }
	}

	/// A copy of this archetype without `id`.
	#[must_use]
	pub fn without(self, id: ComponentId) -> Self {
		Self { components: self.components.without(id.index()) }
	}

	#[inline(always)]
	pub fn has(&self, id: ComponentId) -> bool {
		self.components.get(id.index())
	}

	/// Whether the archetype contains at least one component.
	pub fn any(&self) -> bool {
		self.components.any()
	}

	/// Number of components in the archetype.
	pub fn len(&self) -> usize {
		self.components.count()
	}

	pub fn is_empty(&self) -> bool {
		!self.any()
	}

	/// Components present in both archetypes.
	pub fn intersection(&self, other: &Archetype) -> Archetype {
		Self { components: self.components & other.components }
	}

	pub fn is_subset_of(&self, other: &Archetype) -> bool {
		self.components.is_subset_of(&other.components)
	}

	/// Iterate over the component ids in ascending order.
	pub fn iter(&self) -> impl Iterator<Item = ComponentId> + '_ {
		self.components.iter_ones().map(|i| ComponentId::new(i as u32))
	}

	pub fn bits(&self) -> &BitSet {
		&self.components
	}
}

impl From<BitSet> for Archetype {
	fn from(components: BitSet) -> Self {
		Self { components }
	}
}

impl fmt::Debug for Archetype {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Archetype{:?}", self.components)
	}
}

/// Index of an interned [Archetype] and of its [storage](crate::archetypes::ArchetypeStorage) within a world.
#[derive(Debug, Hash, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct ArchetypeId {
	pub(crate) index: u32,
}

impl ArchetypeId {
	#[inline(always)]
	pub const fn index(&self) -> usize {
		self.index as usize
	}
}
