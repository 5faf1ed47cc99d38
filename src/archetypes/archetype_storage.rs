use crate::archetypes::{Archetype, ArchetypeId, MAX_COMPONENTS};
use crate::components::{Component, ComponentId, ComponentRegistry};
use crate::data_structures::Column;
use crate::entities::Entity;
use std::any::TypeId;

const NO_COLUMN: u8 = u8::MAX;

/// Column-oriented storage for every entity sharing one [Archetype].
///
/// Slots are always dense: slot `i` of every column belongs to `entities[i]`,
/// and removal moves the last row into the freed slot.
pub struct ArchetypeStorage {
	id: ArchetypeId,
	archetype: Archetype,
	columns: Vec<Column>,
	column_index: [u8; MAX_COMPONENTS],
	entities: Vec<Entity>,
}

impl ArchetypeStorage {
	pub(crate) fn new(
		id: ArchetypeId, archetype: Archetype, registry: &ComponentRegistry, capacity: usize,
	) -> Self {
		let mut column_index = [NO_COLUMN; MAX_COMPONENTS];
		let columns = archetype
			.iter()
			.enumerate()
			.map(|(i, component)| {
				column_index[component.index()] = i as u8;
				Column::with_capacity(*registry.info(component), capacity)
			})
			.collect();

		Self {
			id,
			archetype,
			columns,
			column_index,
			entities: Vec::with_capacity(capacity),
		}
	}

	pub fn id(&self) -> ArchetypeId {
		self.id
	}

	pub fn archetype(&self) -> &Archetype {
		&self.archetype
	}

	/// Number of entities in the storage.
	#[inline(always)]
	pub fn size(&self) -> usize {
		self.entities.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entities.is_empty()
	}

	#[inline(always)]
	pub fn has_component(&self, id: ComponentId) -> bool {
		self.column_index[id.index()] != NO_COLUMN
	}

	/// Append a row of default-constructed components for `entity`.
	/// Returns the slot of the new row.
	pub(crate) fn make_entity(&mut self, entity: Entity) -> usize {
		let slot = self.entities.len();
		for column in self.columns.iter_mut() {
			let column_slot = column.push_default();
			debug_assert_eq!(column_slot, slot);
		}

		self.entities.push(entity);
		slot
	}

	/// Remove the row at `slot` by moving the last row into it.
	///
	/// Returns `true` when a different entity was moved into `slot`;
	/// the caller must then update that entity's location.
	pub(crate) fn destroy_entity(&mut self, slot: usize) -> bool {
		assert!(slot < self.entities.len(), "Storage slot {slot} is out of range");

		for column in self.columns.iter_mut() {
			// SAFETY: `slot` was checked against the row count, which all columns share.
			unsafe { column.swap_remove(slot) };
		}

		self.entities.swap_remove(slot);
		debug_assert!(self.columns.iter().all(|c| c.len() == self.entities.len()));
		slot < self.entities.len()
	}

	/// Get the entity stored at `slot`.
	#[inline(always)]
	pub fn get_entity(&self, slot: usize) -> Entity {
		self.entities[slot]
	}

	pub(crate) fn set_entity(&mut self, slot: usize, entity: Entity) {
		self.entities[slot] = entity;
	}

	/// All entities, indexed by slot.
	pub fn entities(&self) -> &[Entity] {
		&self.entities
	}

	/// Raw pointer to the component `id` at `slot`.
	///
	/// The pointer stays valid until the next structural change of the storage.
	/// Panics if the archetype doesn't contain `id`.
	#[inline(always)]
	pub fn get_component_raw(&self, slot: usize, id: ComponentId) -> *mut u8 {
		debug_assert!(slot < self.size(), "Storage slot {slot} is out of range");
		self.column(id).get_ptr(slot)
	}

	/// Typed raw pointer to the component `T` at `slot`.
	///
	/// `id` must be the id `T` was registered with.
	#[inline(always)]
	pub fn get_component<T: Component>(&self, slot: usize, id: ComponentId) -> *mut T {
		debug_assert_eq!(self.column(id).info().type_id(), TypeId::of::<T>());
		self.get_component_raw(slot, id) as *mut T
	}

	pub(crate) fn column_base<T: Component>(&self, id: ComponentId) -> *mut T {
		let column = self.column(id);
		debug_assert_eq!(column.info().type_id(), TypeId::of::<T>());
		column.get_ptr(0) as *mut T
	}

	/// Swap the components shared by both storages between `slot` and `other_slot`.
	pub(crate) fn swap_shared(&mut self, slot: usize, other: &mut ArchetypeStorage, other_slot: usize) {
		assert!(slot < self.size() && other_slot < other.size());

		for id in self.archetype.intersection(&other.archetype).iter() {
			let a = self.column_index[id.index()] as usize;
			let b = other.column_index[id.index()] as usize;
			// SAFETY: Both slots are in range and columns of the same id store the same type.
			unsafe { self.columns[a].swap_with(slot, &mut other.columns[b], other_slot) };
		}
	}

	/// Swap every component between two slots of this storage.
	pub(crate) fn swap_rows(&mut self, a: usize, b: usize) {
		assert!(a < self.size() && b < self.size());
		if a == b {
			return;
		}

		for column in self.columns.iter_mut() {
			// SAFETY: Both slots are in range and distinct.
			unsafe { column.swap_slots(a, b) };
		}
	}

	/// Reserve room for `additional` more entities.
	pub fn reserve(&mut self, additional: usize) {
		self.entities.reserve(additional);
		for column in self.columns.iter_mut() {
			column.reserve(additional);
		}
	}

	/// Drop every row.
	pub(crate) fn clear(&mut self) {
		for column in self.columns.iter_mut() {
			column.clear();
		}
		self.entities.clear();
	}

	#[inline(always)]
	fn column(&self, id: ComponentId) -> &Column {
		let index = self.column_index[id.index()];
		assert!(
			index != NO_COLUMN,
			"Archetype {:?} does not contain component {:?}",
			self.archetype,
			id
		);
		&self.columns[index as usize]
	}
}
