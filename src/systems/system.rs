use crate::components::{ComponentFetch, ComponentRegistry, FetchItem};
use crate::queries::{Query, QueryContext};
use crate::entities::Entity;
use crate::World;

/// Where the batches of a [System] are processed.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub enum ExecMode {
	/// Every matching storage in one batch, on the calling thread.
	#[default]
	OnMain,
	/// One batch per worker, each covering a share of every matching storage.
	OnWorkers,
}

/// Provides the logic for modifying the state of [Entities](Entity)
/// and their associated [Components](crate::components::Component).
///
/// ```ignore
/// struct Movement;
///
/// impl System for Movement {
///     type Fetch = (Write<Position>, Read<Velocity>);
///
///     fn name(&self) -> &str { "movement" }
///
///     fn process(&self, _: &World, _: Entity, (position, velocity): FetchItem<'_, Self::Fetch>) {
///         position.0 += velocity.0;
///     }
/// }
/// ```
pub trait System: Send + Sync + 'static {
	/// The components handed to [`process`](System::process), at most 5.
	type Fetch: ComponentFetch;

	/// Unique name of the system within a world.
	fn name(&self) -> &str;

	fn exec_mode(&self) -> ExecMode {
		ExecMode::OnMain
	}

	/// The archetypes the system runs on.
	/// Defaults to the accesses declared by [`Fetch`](System::Fetch).
	fn query(&self, registry: &ComponentRegistry) -> Query {
		registry.query(self.name()).fetch::<Self::Fetch>().build()
	}

	/// Process a single entity.
	fn process(&self, world: &World, entity: Entity, components: FetchItem<'_, Self::Fetch>);

	/// Process every slot of `context`, binding [`Fetch`](System::Fetch) for each one.
	///
	/// Entities that are no longer alive are skipped.
	fn process_batch(&self, world: &World, context: &mut QueryContext<'_>) {
		context.for_each::<Self::Fetch>(|entity, components| {
			if world.is_alive(entity) {
				self.process(world, entity, components);
			}
		});
	}
}

/// Object-safe view of a [System], with its [`Fetch`](System::Fetch) erased.
pub(crate) trait SystemObject: Send + Sync {
	fn name(&self) -> &str;
	fn exec_mode(&self) -> ExecMode;
	fn query(&self, registry: &ComponentRegistry) -> Query;
	fn process_batch(&self, world: &World, context: &mut QueryContext<'_>);
}

impl<S: System> SystemObject for S {
	fn name(&self) -> &str {
		System::name(self)
	}

	fn exec_mode(&self) -> ExecMode {
		System::exec_mode(self)
	}

	fn query(&self, registry: &ComponentRegistry) -> Query {
		System::query(self, registry)
	}

	fn process_batch(&self, world: &World, context: &mut QueryContext<'_>) {
		System::process_batch(self, world, context)
	}
}
