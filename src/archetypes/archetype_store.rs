use crate::archetypes::{Archetype, ArchetypeId, ArchetypeStorage};
use crate::components::ComponentRegistry;
use crate::queries::Query;
use std::collections::HashMap;

/// Interns [archetypes](Archetype) and owns their [storages](ArchetypeStorage).
///
/// Storages are created the first time an archetype is seen and are never removed,
/// so an [ArchetypeId] stays valid for the lifetime of the store.
pub(crate) struct ArchetypeStore {
	capacity: usize,
	map: HashMap<Archetype, ArchetypeId>,
	storages: Vec<ArchetypeStorage>,
}

impl ArchetypeStore {
	pub fn new(capacity: usize) -> Self {
		Self {
			capacity,
			map: HashMap::default(),
			storages: Vec::default(),
		}
	}

	/// Get the id of `archetype`, creating its storage if it's new.
	pub fn register(&mut self, archetype: Archetype, registry: &ComponentRegistry) -> ArchetypeId {
		self.register_with_capacity(archetype, registry, self.capacity)
	}

	/// Get the id of `archetype`, creating its storage with room for `min_capacity` entities if it's new.
	#[inline(never)]
	pub fn register_with_capacity(
		&mut self, archetype: Archetype, registry: &ComponentRegistry, min_capacity: usize,
	) -> ArchetypeId {
		if let Some(id) = self.map.get(&archetype) {
			let storage = &mut self.storages[id.index()];
			storage.reserve(min_capacity.saturating_sub(storage.size()));
			return *id;
		}

		let id = ArchetypeId {
			index: self.storages.len() as u32,
		};

		log::debug!("registered archetype {:?} as {:?}", archetype, id);

		self.storages.push(ArchetypeStorage::new(id, archetype, registry, min_capacity));
		self.map.insert(archetype, id);
		id
	}

	pub fn id_of(&self, archetype: &Archetype) -> Option<ArchetypeId> {
		self.map.get(archetype).copied()
	}

	#[inline(always)]
	pub fn get(&self, id: ArchetypeId) -> &ArchetypeStorage {
		&self.storages[id.index()]
	}

	#[inline(always)]
	pub fn get_mut(&mut self, id: ArchetypeId) -> &mut ArchetypeStorage {
		&mut self.storages[id.index()]
	}

	/// Mutable access to two distinct storages at once.
	pub fn pair_mut(
		&mut self, a: ArchetypeId, b: ArchetypeId,
	) -> (&mut ArchetypeStorage, &mut ArchetypeStorage) {
		assert_ne!(a, b, "Cannot borrow the same storage twice");

		if a.index() < b.index() {
			let (left, right) = self.storages.split_at_mut(b.index());
			(&mut left[a.index()], &mut right[0])
		} else {
			let (left, right) = self.storages.split_at_mut(a.index());
			(&mut right[0], &mut left[b.index()])
		}
	}

	pub fn len(&self) -> usize {
		self.storages.len()
	}

	pub fn iter(&self) -> impl Iterator<Item = &ArchetypeStorage> {
		self.storages.iter()
	}

	/// Iterate over the storages whose archetype matches `query`.
	pub fn matching<'l>(&'l self, query: &'l Query) -> impl Iterator<Item = &'l ArchetypeStorage> + 'l {
		self.storages.iter().filter(move |s| query.matches(s.archetype()))
	}

	/// Drop every entity, keeping the storages.
	pub fn clear(&mut self) {
		for storage in self.storages.iter_mut() {
			storage.clear();
		}
	}
}
