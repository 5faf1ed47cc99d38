use crate::archetypes::ArchetypeId;
use std::fmt;

/// Number of distinct generations an entity index goes through before wrapping around.
///
/// After `MAX_GENERATIONS` reuses of the same index a stale handle compares equal to a live one again.
pub const MAX_GENERATIONS: u32 = 1 << 24;

/// A unique handle to an `Entity`.
///
/// Handles are cheap to copy. A handle becomes stale once its entity is destroyed:
/// the index may be reused, but with a different generation.
#[derive(Copy, Clone, Hash, Eq, PartialEq)]
pub struct Entity {
	pub(crate) index: u32,
	pub(crate) generation: u32,
}

impl Entity {
	/// A handle that never refers to an entity.
	pub const INVALID: Entity = Entity {
		index: u32::MAX,
		generation: 0,
	};

	pub(crate) const fn new(index: u32, generation: u32) -> Self {
		Self { index, generation }
	}

	#[inline(always)]
	pub const fn index(&self) -> u32 {
		self.index
	}

	#[inline(always)]
	pub const fn generation(&self) -> u32 {
		self.generation
	}

	pub const fn is_valid(&self) -> bool {
		self.index != u32::MAX
	}

	/// The handle the same index gets once this entity is destroyed.
	pub(crate) const fn next_generation(&self) -> Self {
		Self {
			index: self.index,
			generation: (self.generation + 1) % MAX_GENERATIONS,
		}
	}
}

impl Default for Entity {
	fn default() -> Self {
		Self::INVALID
	}
}

impl fmt::Debug for Entity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.is_valid() {
			true => write!(f, "Entity({}v{})", self.index, self.generation),
			false => write!(f, "Entity(invalid)"),
		}
	}
}

#[derive(Default, Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum EntityState {
	#[default]
	Free,
	Alive,
}

/// Location and liveness of an entity index.
#[derive(Copy, Clone, Debug)]
pub(crate) struct EntityInfo {
	pub archetype: ArchetypeId,
	pub slot: u32,
	pub generation: u32,
	pub state: EntityState,
}

impl Default for EntityInfo {
	fn default() -> Self {
		Self {
			archetype: ArchetypeId { index: u32::MAX },
			slot: 0,
			generation: 0,
			state: EntityState::Free,
		}
	}
}

impl EntityInfo {
	#[inline(always)]
	pub fn is_alive(&self, entity: &Entity) -> bool {
		self.state == EntityState::Alive && self.generation == entity.generation
	}
}
