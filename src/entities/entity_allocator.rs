use crate::entities::Entity;
use std::collections::VecDeque;

/// Hands out entity handles, reusing the indices of destroyed entities first.
///
/// Reuse is first-in first-out, so a freed index rests as long as possible before it comes back.
#[derive(Default)]
pub(crate) struct EntityAllocator {
	pool: VecDeque<Entity>,
	counter: u32,
}

impl EntityAllocator {
	pub fn allocate(&mut self) -> Entity {
		match self.pool.pop_front() {
			Some(entity) => entity,
			None => {
				assert!(self.counter < u32::MAX, "Entity index space exhausted");
				let entity = Entity::new(self.counter, 0);
				self.counter += 1;
				entity
			},
		}
	}

	/// Return the index of `entity` to the pool, bumping its generation.
	pub fn free(&mut self, entity: Entity) {
		self.pool.push_back(entity.next_generation());
	}

	/// Total number of indices handed out so far.
	pub fn counter(&self) -> u32 {
		self.counter
	}

	pub fn clear(&mut self) {
		self.pool.clear();
		self.counter = 0;
	}
}
