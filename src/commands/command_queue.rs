use crate::components::Component;
use crate::archetypes::Archetype;
use crate::entities::Entity;
use std::collections::VecDeque;
use parking_lot::Mutex;
use crate::World;

/// A deferred mutation of a [World].
pub(crate) enum Command {
	Make { entity: Entity, archetype: Archetype },
	Destroy(Entity),
	Rearch { entity: Entity, archetype: Archetype },
	Callback(Box<dyn FnOnce(&mut World) + Send>),
}

/// First-in first-out buffer of [commands](Command), safe to push from any thread.
#[derive(Default)]
pub(crate) struct CommandQueue {
	commands: Mutex<VecDeque<Command>>,
}

impl CommandQueue {
	pub fn push(&self, command: Command) {
		self.commands.lock().push_back(command);
	}

	/// Pop the oldest command without locking.
	pub fn pop(&mut self) -> Option<Command> {
		self.commands.get_mut().pop_front()
	}

	pub fn len(&self) -> usize {
		self.commands.lock().len()
	}

	pub fn clear(&mut self) {
		self.commands.get_mut().clear();
	}
}

/// Records mutations of a [World] to be applied on the next [`sync`](World::sync).
///
/// Use it wherever the world is only borrowed immutably, most notably from within
/// query functions and systems running on worker threads.
#[derive(Copy, Clone)]
pub struct Commands<'w> {
	world: &'w World,
}

impl<'w> Commands<'w> {
	pub(crate) fn new(world: &'w World) -> Self {
		Self { world }
	}

	/// Allocate an entity now and construct it with `archetype` on the next sync.
	/// The handle can be used in further commands right away.
	pub fn create_entity(&self, archetype: Archetype) -> Entity {
		assert!(archetype.any(), "An entity must have at least one component");
		let entity = self.world.allocate_entity();
		self.world.queue.push(Command::Make { entity, archetype });
		entity
	}

	pub fn destroy_entity(&self, entity: Entity) {
		self.world.queue.push(Command::Destroy(entity));
	}

	pub fn rearch_entity(&self, entity: Entity, archetype: Archetype) {
		self.world.queue.push(Command::Rearch { entity, archetype });
	}

	/// Set the component `T` of `entity`, adding it if missing.
	pub fn set_component<T: Component>(&self, entity: Entity, value: T) {
		self.push(move |world| {
			if !world.is_alive(entity) {
				log::warn!("dropping {} for destroyed entity {:?}", T::NAME, entity);
				return;
			}
			*world.get_or_create_component::<T>(entity) = value;
		});
	}

	/// Remove the component `T` from `entity`, if present.
	pub fn remove_component<T: Component>(&self, entity: Entity) {
		self.push(move |world| {
			if world.is_alive(entity) {
				world.remove_component::<T>(entity);
			}
		});
	}

	/// Run an arbitrary mutation on the next sync.
	pub fn push(&self, callback: impl FnOnce(&mut World) + Send + 'static) {
		self.world.queue.push(Command::Callback(Box::new(callback)));
	}

	/// Number of pending commands.
	pub fn len(&self) -> usize {
		self.world.queue.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}
