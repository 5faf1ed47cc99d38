use crate::components::{Component, ComponentFetch, ComponentRegistry, FetchItem};
use crate::archetypes::{Archetype, ArchetypeStorage};
use crate::entities::Entity;
use crate::queries::Query;
use std::ops::Range;

/// A contiguous range of slots of one [ArchetypeStorage], handed to query functions.
///
/// Slots are absolute storage slots, within [`range`](QueryContext::range).
/// Parallel executions hand out disjoint ranges of the same storage to different threads,
/// so a context must never be used to touch slots outside its range.
///
/// Components are only reachable with the access the context's [Query] declares:
/// reading an undeclared component or writing a read-only one panics.
pub struct QueryContext<'w> {
	storage: &'w ArchetypeStorage,
	registry: &'w ComponentRegistry,
	query: &'w Query,
	start: usize,
	count: usize,
}

impl<'w> QueryContext<'w> {
	pub(crate) fn new(
		storage: &'w ArchetypeStorage, registry: &'w ComponentRegistry, query: &'w Query, start: usize,
		count: usize,
	) -> Self {
		debug_assert!(start + count <= storage.size());
		Self {
			storage,
			registry,
			query,
			start,
			count,
		}
	}

	/// The query this context was created for.
	pub fn query(&self) -> &Query {
		self.query
	}

	pub fn archetype(&self) -> &Archetype {
		self.storage.archetype()
	}

	/// Whether the storage contains the component `T`.
	pub fn has<T: Component>(&self) -> bool {
		self.storage.has_component(self.registry.id_of::<T>())
	}

	pub fn start(&self) -> usize {
		self.start
	}

	pub fn count(&self) -> usize {
		self.count
	}

	/// The slots this context covers.
	pub fn range(&self) -> Range<usize> {
		self.start..self.start + self.count
	}

	/// The entity stored at `slot`.
	pub fn entity(&self, slot: usize) -> Entity {
		self.check_slot(slot);
		self.storage.get_entity(slot)
	}

	/// Read the component `T` at `slot`.
	pub fn get<T: Component>(&self, slot: usize) -> &T {
		self.check_slot(slot);
		let id = self.registry.id_of::<T>();
		assert!(self.query.reads(id), "Query {:?} does not read component {}", self.query.name(), T::NAME);
		// SAFETY: The slot is in range and no structural change can happen while `self` borrows the world.
		unsafe { &*self.storage.get_component::<T>(slot, id) }
	}

	/// Mutably access the component `T` at `slot`.
	pub fn get_mut<T: Component>(&mut self, slot: usize) -> &mut T {
		self.check_slot(slot);
		let id = self.registry.id_of::<T>();
		assert!(self.query.writes(id), "Query {:?} does not write component {}", self.query.name(), T::NAME);
		// SAFETY: As for `get`, plus the `&mut self` borrow rules out other references from this context.
		unsafe { &mut *self.storage.get_component::<T>(slot, id) }
	}

	/// Access several components of `slot` at once.
	///
	/// ```ignore
	/// let (position, velocity) = context.fetch::<(Write<Position>, Read<Velocity>)>(slot);
	/// ```
	pub fn fetch<F: ComponentFetch>(&mut self, slot: usize) -> FetchItem<'_, F> {
		self.check_slot(slot);
		self.check_fetch::<F>();

		let columns = F::columns(self.storage, self.registry);
		// SAFETY: Same guarantees as `get_mut`; `check_fetch` rejects sets that alias a component.
		unsafe { F::fetch(&columns, slot) }
	}

	/// Call `f` for every slot of the context with the entity and its components.
	pub fn for_each<F: ComponentFetch>(&mut self, mut f: impl FnMut(Entity, FetchItem<'_, F>)) {
		self.check_fetch::<F>();

		let columns = F::columns(self.storage, self.registry);
		for slot in self.range() {
			let entity = self.storage.get_entity(slot);
			// SAFETY: Slots are visited once each and `&mut self` rules out other references from this context.
			f(entity, unsafe { F::fetch(&columns, slot) });
		}
	}

	/// Panics if `F` references a component twice or accesses one the query doesn't declare.
	fn check_fetch<F: ComponentFetch>(&self) {
		let fetched = F::declare(self.registry.query("")).build();
		assert!(
			self.query.covers(&fetched),
			"Query {:?} does not declare every component access of the fetch",
			self.query.name()
		);
	}

	#[inline(always)]
	fn check_slot(&self, slot: usize) {
		debug_assert!(
			self.range().contains(&slot),
			"Slot {slot} is outside of the context range {:?}",
			self.range()
		);
	}
}
