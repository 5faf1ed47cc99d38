use crate::archetypes::{Archetype, ArchetypeStorage, ArchetypeStore};
use crate::components::{Component, ComponentRegistry};
use crate::data_structures::Column;
use crate::tests::{registry, Frozen, Name, Position, Tracked, Velocity};
use crate::entities::Entity;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[test]
pub fn interning_is_idempotent() {
	let registry = registry();
	let mut store = ArchetypeStore::new(4);

	let a = registry.archetype::<(Position, Velocity)>();
	let b = registry.archetype::<(Velocity, Position)>();
	assert_eq!(a, b, "Component order must not matter");

	let first = store.register(a, &registry);
	let second = store.register(b, &registry);
	assert_eq!(first, second);
	assert_eq!(store.len(), 1);

	let other = store.register(registry.archetype::<(Position,)>(), &registry);
	assert_ne!(first, other);
	assert_eq!(store.len(), 2);
	assert_eq!(store.id_of(&a), Some(first));
}

#[test]
pub fn archetype_values() {
	let registry = registry();
	let position = registry.id_of::<Position>();
	let velocity = registry.id_of::<Velocity>();

	let base = Archetype::new().with(position);
	let moved = base.with(velocity);

	assert!(!base.has(velocity), "with must return a new archetype");
	assert_eq!(moved.len(), 2);
	assert_eq!(moved.without(velocity), base);
	assert_eq!(moved.iter().collect::<Vec<_>>(), vec![position, velocity]);
	assert_eq!(Archetype::from_ids(&[velocity, position]), moved);
	assert!(Archetype::new().is_empty());
}

#[test]
pub fn swap_removal_moves_last_row() {
	let registry = registry();
	let archetype = registry.archetype::<(Position, Name)>();
	let mut store = ArchetypeStore::new(2);
	let id = store.register(archetype, &registry);
	let storage = store.get_mut(id);

	let position = registry.id_of::<Position>();
	for i in 0..5 {
		let slot = storage.make_entity(Entity::new(i, 0));
		assert_eq!(slot, i as usize);
		unsafe { *storage.get_component::<Position>(slot, position) = Position(i as f32, 0.0) };
	}

	assert!(storage.destroy_entity(1), "Removing a middle row must report a move");
	assert_eq!(storage.size(), 4);
	assert_eq!(storage.get_entity(1), Entity::new(4, 0));
	assert_eq!(unsafe { *storage.get_component::<Position>(1, position) }, Position(4.0, 0.0));

	assert!(!storage.destroy_entity(3), "Removing the last row moves nothing");
	assert_eq!(storage.entities(), &[Entity::new(0, 0), Entity::new(4, 0), Entity::new(2, 0)]);
}

#[test]
pub fn rows_are_dropped_once() {
	let registry = registry();
	let drops = Arc::new(AtomicUsize::new(0));
	let mut store = ArchetypeStore::new(0);
	let id = store.register(registry.archetype::<(Tracked, Frozen)>(), &registry);
	let tracked = registry.id_of::<Tracked>();

	{
		let storage = store.get_mut(id);
		for i in 0..10 {
			let slot = storage.make_entity(Entity::new(i, 0));
			unsafe { *storage.get_component::<Tracked>(slot, tracked) = Tracked::new(&drops) };
		}

		storage.destroy_entity(0);
		storage.destroy_entity(4);
		assert_eq!(drops.load(Ordering::SeqCst), 2);
		assert_eq!(storage.size(), 8);

		storage.clear();
		assert_eq!(drops.load(Ordering::SeqCst), 10);
		assert!(storage.is_empty());
	}

	store.get_mut(id).make_entity(Entity::new(0, 0));
	drop(store);
	assert_eq!(drops.load(Ordering::SeqCst), 10, "Default values are not tracked");
}

#[test]
pub fn swap_shared_components() {
	let registry = registry();
	let mut store = ArchetypeStore::new(1);
	let a = store.register(registry.archetype::<(Position, Velocity)>(), &registry);
	let b = store.register(registry.archetype::<(Position, Name)>(), &registry);

	let position = registry.id_of::<Position>();
	let velocity = registry.id_of::<Velocity>();

	let (left, right) = store.pair_mut(a, b);
	left.make_entity(Entity::new(0, 0));
	right.make_entity(Entity::new(1, 0));

	unsafe {
		*left.get_component::<Position>(0, position) = Position(1.0, 2.0);
		*left.get_component::<Velocity>(0, velocity) = Velocity(3.0, 4.0);
	}

	left.swap_shared(0, right, 0);

	unsafe {
		assert_eq!(*right.get_component::<Position>(0, position), Position(1.0, 2.0));
		assert_eq!(*left.get_component::<Position>(0, position), Position::default());
		assert_eq!(*left.get_component::<Velocity>(0, velocity), Velocity(3.0, 4.0));
	}
}

#[test]
pub fn column_lookup() {
	let registry = registry();
	let mut store = ArchetypeStore::new(0);
	let id = store.register(registry.archetype::<(Name, Frozen)>(), &registry);
	let storage: &ArchetypeStorage = store.get(id);

	assert!(storage.has_component(registry.id_of::<Name>()));
	assert!(storage.has_component(registry.id_of::<Frozen>()));
	assert!(!storage.has_component(registry.id_of::<Position>()));
	assert_eq!(storage.id(), id);
}

/// Panics when dropped while armed.
#[derive(Default, Component)]
struct Fragile {
	armed: bool,
	drops: Option<Arc<AtomicUsize>>,
}

impl Drop for Fragile {
	fn drop(&mut self) {
		if let Some(drops) = &self.drops {
			drops.fetch_add(1, Ordering::SeqCst);
		}
		if self.armed {
			panic!("armed value dropped");
		}
	}
}

#[test]
pub fn panicking_drop_is_not_repeated() {
	let mut registry = ComponentRegistry::new();
	registry.register::<Fragile>().unwrap();
	let info = *registry.info(registry.id_of::<Fragile>());
	let drops = Arc::new(AtomicUsize::new(0));

	let mut column = Column::with_capacity(info, 4);
	for i in 0..3 {
		let slot = column.push_default();
		let value = Fragile {
			armed: i == 0,
			drops: Some(drops.clone()),
		};
		unsafe { *(column.get_ptr(slot) as *mut Fragile) = value };
	}

	let removed = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| unsafe { column.swap_remove(0) }));
	assert!(removed.is_err());
	assert_eq!(column.len(), 2, "The removed value is out of the column even if its drop panics");
	assert_eq!(drops.load(Ordering::SeqCst), 1);
	assert!(!unsafe { &*(column.get_ptr(0) as *const Fragile) }.armed, "The last value fills the slot");

	drop(column);
	assert_eq!(drops.load(Ordering::SeqCst), 3, "Every value is dropped exactly once");
}
