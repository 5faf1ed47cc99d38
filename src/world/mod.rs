//! The [World] owns every [entity](Entity), their [components](crate::components::Component)
//! and the [systems](crate::systems::System) working on them.

mod attributes;
mod execution;

pub use attributes::MAX_ATTRIBUTES;

use crate::archetypes::{Archetype, ArchetypeId, ArchetypeStorage, ArchetypeStore};
use crate::entities::{Entity, EntityAllocator, EntityInfo, EntityState};
use crate::components::{Component, ComponentRegistry, ComponentSet};
use crate::queries::{Query, QueryContext};
use crate::commands::{Command, CommandQueue, Commands};
use crate::systems::SystemStore;
use crate::data_structures::BitSet;
use crate::config::EcsConfig;
use std::any::Any;
use std::sync::Arc;
use parking_lot::Mutex;

type DestroyHook = Box<dyn Fn(&mut QueryContext<'_>) + Send + Sync>;

/// A container for [entities](Entity) and [systems](crate::systems::System).
///
/// Every entity has an [Archetype], the exact set of its components, and lives in the
/// [ArchetypeStorage] of that archetype.
///
/// Typical usage:
/// 1. [Allocate](World::allocate_entity) a handle.
/// 2. [Make](World::make_entity) the entity with an archetype.
/// 3. Process it through queries and systems.
/// 4. [Destroy](World::destroy_entity) it.
///
/// Structural changes need `&mut World`. From systems and jobs, which only get `&World`,
/// record them through [`commands`](World::commands) and apply them on the next [`sync`](World::sync).
pub struct World {
	config: EcsConfig,
	registry: Arc<ComponentRegistry>,
	entity_info: Vec<EntityInfo>,
	allocator: Mutex<EntityAllocator>,
	archetypes: ArchetypeStore,
	on_destroy: Vec<(Query, DestroyHook)>,
	systems: SystemStore,
	system_writes: BitSet,
	pub(crate) queue: CommandQueue,
	attributes: [Option<Arc<dyn Any + Send + Sync>>; MAX_ATTRIBUTES],
	alive: usize,
}

impl World {
	pub fn new(registry: Arc<ComponentRegistry>) -> Self {
		Self::with_config(registry, EcsConfig::default())
	}

	pub fn with_config(registry: Arc<ComponentRegistry>, config: EcsConfig) -> Self {
		Self {
			archetypes: ArchetypeStore::new(config.storage_capacity),
			config,
			registry,
			entity_info: Vec::new(),
			allocator: Mutex::default(),
			on_destroy: Vec::new(),
			systems: SystemStore::default(),
			system_writes: BitSet::new(),
			queue: CommandQueue::default(),
			attributes: Default::default(),
			alive: 0,
		}
	}

	pub fn config(&self) -> &EcsConfig {
		&self.config
	}

	pub fn registry(&self) -> &Arc<ComponentRegistry> {
		&self.registry
	}

	/// Build the [Archetype] made of the component types in `S`.
	pub fn archetype<S: ComponentSet>(&self) -> Archetype {
		self.registry.archetype::<S>()
	}

	/// Reserve a handle for an entity to be made later.
	/// Safe to call from any thread.
	pub fn allocate_entity(&self) -> Entity {
		self.allocator.lock().allocate()
	}

	/// Construct an [allocated](World::allocate_entity) entity with default components of `archetype`.
	pub fn make_entity(&mut self, entity: Entity, archetype: Archetype) {
		assert!(archetype.any(), "An entity must have at least one component");

		let counter = self.allocator.get_mut().counter() as usize;
		assert!(
			entity.is_valid() && (entity.index as usize) < counter,
			"Entity {:?} was not allocated by this world",
			entity
		);

		if self.entity_info.len() < counter {
			self.entity_info.resize(counter, EntityInfo::default());
		}

		let info = &self.entity_info[entity.index as usize];
		assert_eq!(info.state, EntityState::Free, "Entity {:?} has already been made", entity);
		assert_eq!(info.generation, entity.generation, "Entity {:?} is stale", entity);

		let id = self.archetypes.register(archetype, &self.registry);
		let slot = self.archetypes.get_mut(id).make_entity(entity);

		self.entity_info[entity.index as usize] = EntityInfo {
			archetype: id,
			slot: slot as u32,
			generation: entity.generation,
			state: EntityState::Alive,
		};
		self.alive += 1;
	}

	/// Allocate and make an entity in one step.
	pub fn create_entity(&mut self, archetype: Archetype) -> Entity {
		let entity = self.allocator.get_mut().allocate();
		self.make_entity(entity, archetype);
		entity
	}

	/// Destroy `entity`, running the matching [on-destroy](World::on_destroy) hooks first.
	pub fn destroy_entity(&mut self, entity: Entity) {
		let info = self.info(entity);
		self.run_destroy_hooks(&info, |_| true);
		self.remove_row(entity);
	}

	/// Swap the components shared by the archetypes of `a` and `b`.
	pub fn swap_entity(&mut self, a: Entity, b: Entity) {
		let a = self.info(a);
		let b = self.info(b);

		if a.archetype == b.archetype {
			self.archetypes.get_mut(a.archetype).swap_rows(a.slot as usize, b.slot as usize);
		} else {
			let (left, right) = self.archetypes.pair_mut(a.archetype, b.archetype);
			left.swap_shared(a.slot as usize, right, b.slot as usize);
		}
	}

	/// Move `entity` to `archetype`.
	///
	/// Components present in both archetypes keep their values, new ones are default-constructed
	/// and dropped ones are destroyed. [On-destroy](World::on_destroy) hooks run for the queries
	/// the entity stops matching.
	pub fn rearch_entity(&mut self, entity: Entity, archetype: Archetype) {
		assert!(archetype.any(), "An entity must have at least one component");

		let info = self.info(entity);
		if *self.archetypes.get(info.archetype).archetype() == archetype {
			return;
		}

		self.run_destroy_hooks(&info, |query| !query.matches(&archetype));

		let temp = self.allocator.get_mut().allocate();
		self.make_entity(temp, archetype);
		self.swap_entity(temp, entity);

		let old = self.entity_info[entity.index as usize];
		let new = self.entity_info[temp.index as usize];

		self.archetypes.get_mut(new.archetype).set_entity(new.slot as usize, entity);
		self.archetypes.get_mut(old.archetype).set_entity(old.slot as usize, temp);

		let entity_info = &mut self.entity_info[entity.index as usize];
		entity_info.archetype = new.archetype;
		entity_info.slot = new.slot;

		let temp_info = &mut self.entity_info[temp.index as usize];
		temp_info.archetype = old.archetype;
		temp_info.slot = old.slot;

		self.remove_row(temp);
	}

	/// Whether `entity` refers to a live entity of this world.
	pub fn is_alive(&self, entity: Entity) -> bool {
		self.entity_info
			.get(entity.index as usize)
			.map_or(false, |info| info.is_alive(&entity))
	}

	/// The archetype of `entity`.
	pub fn get_arch(&self, entity: Entity) -> Archetype {
		let info = self.info(entity);
		*self.archetypes.get(info.archetype).archetype()
	}

	pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
		self.get_arch(entity).has(self.registry.id_of::<T>())
	}

	/// Panics if `entity` doesn't have the component `T`,
	/// or if a running system writes `T`.
	pub fn get_component<T: Component>(&self, entity: Entity) -> &T {
		let info = self.info(entity);
		let id = self.registry.id_of::<T>();
		assert!(
			!self.system_writes.get(id.index()),
			"Component {} is being written by a running system",
			T::NAME
		);

		let storage = self.archetypes.get(info.archetype);
		// SAFETY: The slot belongs to a live entity and `&self` rules out structural changes.
		unsafe { &*storage.get_component::<T>(info.slot as usize, id) }
	}

	/// Panics if `entity` doesn't have the component `T`.
	pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> &mut T {
		let info = self.info(entity);
		let storage = self.archetypes.get(info.archetype);
		// SAFETY: As for `get_component`, and `&mut self` makes the access exclusive.
		unsafe { &mut *storage.get_component::<T>(info.slot as usize, self.registry.id_of::<T>()) }
	}

	/// Get the component `T` of `entity`, adding a default one if it's missing.
	pub fn get_or_create_component<T: Component>(&mut self, entity: Entity) -> &mut T {
		let archetype = self.get_arch(entity);
		let id = self.registry.id_of::<T>();
		if !archetype.has(id) {
			self.rearch_entity(entity, archetype.with(id));
		}
		self.get_component_mut::<T>(entity)
	}

	/// Remove the component `T` from `entity`.
	/// Removing the last component of an entity destroys it.
	pub fn remove_component<T: Component>(&mut self, entity: Entity) {
		let archetype = self.get_arch(entity);
		let id = self.registry.id_of::<T>();
		if !archetype.has(id) {
			return;
		}

		match archetype.without(id) {
			archetype if archetype.any() => self.rearch_entity(entity, archetype),
			_ => self.destroy_entity(entity),
		}
	}

	/// Create the storage of `archetype` ahead of time.
	pub fn register_arch(&mut self, archetype: Archetype) -> ArchetypeId {
		self.archetypes.register(archetype, &self.registry)
	}

	/// Create the storage of `archetype` ahead of time, with room for `min_capacity` entities.
	pub fn register_arch_with_capacity(&mut self, archetype: Archetype, min_capacity: usize) -> ArchetypeId {
		self.archetypes.register_with_capacity(archetype, &self.registry, min_capacity)
	}

	/// The storage of `archetype`, if it was ever used.
	pub fn storage(&self, archetype: &Archetype) -> Option<&ArchetypeStorage> {
		self.archetypes.id_of(archetype).map(|id| self.archetypes.get(id))
	}

	/// Every archetype storage, in interning order.
	pub fn storages(&self) -> impl Iterator<Item = &ArchetypeStorage> {
		self.archetypes.iter()
	}

	/// Register a hook run on every destroyed entity matching `query`,
	/// before its components are dropped.
	pub fn on_destroy(&mut self, query: Query, hook: impl Fn(&mut QueryContext<'_>) + Send + Sync + 'static) {
		self.on_destroy.push((query, Box::new(hook)));
	}

	/// Deferred access to structural changes.
	pub fn commands(&self) -> Commands<'_> {
		Commands::new(self)
	}

	/// Apply every pending command, in the order they were recorded.
	/// Commands recorded while flushing are applied too.
	pub fn sync(&mut self) {
		let mut flushed = 0usize;
		while let Some(command) = self.queue.pop() {
			self.apply(command);
			flushed += 1;
		}

		if flushed > 0 {
			log::trace!("sync applied {flushed} commands");
		}
	}

	/// Destroy every entity and drop pending commands.
	/// Archetype storages and registered systems are kept.
	pub fn clear(&mut self) {
		self.queue.clear();

		let destroyed = self.alive;
		for index in 0..self.entity_info.len() {
			let info = self.entity_info[index];
			if info.state == EntityState::Alive {
				self.destroy_entity(Entity::new(index as u32, info.generation));
			}
		}

		self.archetypes.clear();
		self.entity_info.clear();
		self.allocator.get_mut().clear();
		debug_assert_eq!(self.alive, 0);

		log::debug!("cleared world, destroyed {destroyed} entities");
	}

	/// Number of live entities.
	pub fn len(&self) -> usize {
		self.alive
	}

	pub fn is_empty(&self) -> bool {
		self.alive == 0
	}

	fn apply(&mut self, command: Command) {
		match command {
			Command::Make { entity, archetype } => self.make_entity(entity, archetype),
			Command::Destroy(entity) if self.is_alive(entity) => self.destroy_entity(entity),
			Command::Rearch { entity, archetype } if self.is_alive(entity) => {
				self.rearch_entity(entity, archetype)
			},
			Command::Destroy(entity) | Command::Rearch { entity, .. } => {
				log::warn!("ignoring command for destroyed entity {:?}", entity);
			},
			Command::Callback(callback) => callback(self),
		}
	}

	#[inline(always)]
	fn info(&self, entity: Entity) -> EntityInfo {
		match self.entity_info.get(entity.index as usize) {
			Some(info) if info.is_alive(&entity) => *info,
			_ => panic!("Entity {:?} has already been destroyed", entity),
		}
	}

	fn run_destroy_hooks(&self, info: &EntityInfo, filter: impl Fn(&Query) -> bool) {
		let storage = self.archetypes.get(info.archetype);
		for (query, hook) in self.on_destroy.iter() {
			if query.matches(storage.archetype()) && filter(query) {
				let mut context = QueryContext::new(storage, &self.registry, query, info.slot as usize, 1);
				hook(&mut context);
			}
		}
	}

	/// Swap-remove the row of `entity` and recycle its handle.
	fn remove_row(&mut self, entity: Entity) {
		let info = self.info(entity);
		let slot = info.slot as usize;

		let storage = self.archetypes.get_mut(info.archetype);
		if storage.destroy_entity(slot) {
			let moved = storage.get_entity(slot);
			self.entity_info[moved.index as usize].slot = info.slot;
		}

		self.entity_info[entity.index as usize] = EntityInfo {
			generation: entity.next_generation().generation,
			..EntityInfo::default()
		};
		self.allocator.get_mut().free(entity);
		self.alive -= 1;
	}
}

impl Drop for World {
	fn drop(&mut self) {
		// Skipped while unwinding, columns still drop their values.
		if !std::thread::panicking() {
			self.clear();
		}
	}
}
