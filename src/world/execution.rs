use crate::tasks::{batch_start_count, Async, AsyncStatus, TaskManager, TaskScope};
use crate::systems::{ExecMode, System, SystemObject};
use crate::queries::{Query, QueryContext};
use crate::archetypes::ArchetypeId;
use crate::entities::Entity;
use crate::error::{EcsError, EcsResult};
use crate::World;

impl World {
	/// Call `f` once for every storage matching `query`, covering all of its entities.
	pub fn execute(&mut self, query: &Query, f: impl FnMut(&mut QueryContext<'_>)) {
		self.execute_shared(query, f);
	}

	/// Like [`execute`](World::execute), as a single job of `scope` started once `depends_on` completes.
	///
	/// # Safety
	/// Until the returned job completes, in the storages matching `query`:
	/// - no concurrent job may read a component `query` writes, or write one it reads,
	///   unless the two are ordered through `depends_on` chains;
	/// - references to those written components obtained from
	///   [`get_component`](World::get_component) must not be used.
	pub unsafe fn execute_async<'s>(
		&'s self, scope: &TaskScope<'_, 's>, depends_on: &Async, query: &Query,
		f: impl FnMut(&mut QueryContext<'_>) + Send + 's,
	) -> Async {
		let name = query.name().to_owned();
		let query = query.clone();
		scope.spawn(&name, depends_on, move || self.execute_shared(&query, f))
	}

	/// Like [`execute`](World::execute), split into one batch per worker.
	///
	/// Batch `b` of `n` covers the slots `batch_start_count(size, b, n)` of every matching storage,
	/// so `f` may run concurrently on disjoint ranges of the same storage.
	///
	/// # Safety
	/// The same rules as [`execute_async`](World::execute_async) apply, until every batch completes.
	pub unsafe fn execute_parallel<'s>(
		&'s self, scope: &TaskScope<'_, 's>, depends_on: &Async, query: &Query,
		f: impl Fn(&mut QueryContext<'_>) + Send + Sync + 's,
	) -> Async {
		let storages: Vec<ArchetypeId> = self.archetypes.matching(query).map(|s| s.id()).collect();
		let owned = query.clone();

		scope.parallel_for(query.name(), scope.num_workers(), depends_on, move |batch, num_batches| {
			for id in storages.iter() {
				let storage = self.archetypes.get(*id);
				let (start, count) = batch_start_count(storage.size(), batch, num_batches);
				let mut context = QueryContext::new(storage, &self.registry, &owned, start, count);
				f(&mut context);
			}
		})
	}

	/// Call `f` with every entity matching `query`.
	pub fn each(&self, query: &Query, mut f: impl FnMut(Entity)) {
		for storage in self.archetypes.matching(query) {
			storage.entities().iter().copied().for_each(&mut f);
		}
	}

	/// Add a [System] to the world.
	/// Panics if a system with the same name is already registered.
	pub fn register_system<S: System>(&mut self, system: S) {
		if let Err(err) = self.try_register_system(system) {
			panic!("{err}");
		}
	}

	/// Fails if the name is taken, or if the query of the system doesn't declare every access of its
	/// [`Fetch`](System::Fetch).
	pub fn try_register_system<S: System>(&mut self, system: S) -> EcsResult<()> {
		let query = self.system_query(&system)?;
		self.systems.add_system(Box::new(system), query)
	}

	/// Run the registered system called `name`.
	pub fn execute_system(&mut self, name: &str, tasks: &TaskManager) {
		let index = match self.systems.index_of(name) {
			Some(index) => index,
			None => panic!("System {name:?} is not registered"),
		};

		self.run_registered(index, tasks);
	}

	/// Run a system that isn't registered with the world.
	/// Its matching archetypes are looked up on every call.
	/// Panics under the same conditions as [`register_system`](World::register_system), name aside.
	pub fn execute_system_with<S: System>(&mut self, system: &S, tasks: &TaskManager) {
		let query = match self.system_query(system) {
			Ok(query) => query,
			Err(err) => panic!("{err}"),
		};

		let filtered: Vec<ArchetypeId> = self.archetypes.matching(&query).map(|s| s.id()).collect();
		self.system_writes = query.write_set();
		self.run_system(system, System::exec_mode(system), &query, &filtered, tasks);
		self.system_writes.clear();
	}

	/// Run every registered system, in registration order.
	pub fn update_systems(&mut self, tasks: &TaskManager) {
		for index in 0..self.systems.len() {
			self.run_registered(index, tasks);
		}
	}

	fn run_registered(&mut self, index: usize, tasks: &TaskManager) {
		let info = self.systems.get_mut(index);
		info.refresh(&self.archetypes);
		self.system_writes = info.query.write_set();

		let info = self.systems.get(index);
		self.run_system(info.system.as_ref(), info.exec_mode, &info.query, &info.filtered, tasks);
		self.system_writes.clear();
	}

	fn system_query<S: System>(&self, system: &S) -> EcsResult<Query> {
		let query = System::query(system, &self.registry);
		let fetched = self.registry.query(System::name(system)).fetch::<S::Fetch>().build();
		match query.covers(&fetched) {
			true => Ok(query),
			false => Err(EcsError::UncoveredFetch(System::name(system).to_owned())),
		}
	}

	fn execute_shared(&self, query: &Query, mut f: impl FnMut(&mut QueryContext<'_>)) {
		for storage in self.archetypes.matching(query) {
			let mut context = QueryContext::new(storage, &self.registry, query, 0, storage.size());
			f(&mut context);
		}
	}

	/// Runs with `system_writes` set, so `get_component` can't alias what the system writes.
	fn run_system(
		&self, system: &dyn SystemObject, exec_mode: ExecMode, query: &Query, filtered: &[ArchetypeId],
		tasks: &TaskManager,
	) {
		match exec_mode {
			ExecMode::OnMain => {
				for id in filtered.iter() {
					let storage = self.archetypes.get(*id);
					let mut context = QueryContext::new(storage, &self.registry, query, 0, storage.size());
					system.process_batch(self, &mut context);
				}
			},
			ExecMode::OnWorkers => {
				let status = tasks.scope(|scope| {
					let job = |batch: usize, num_batches: usize| {
						for id in filtered.iter() {
							let storage = self.archetypes.get(*id);
							let (start, count) = batch_start_count(storage.size(), batch, num_batches);
							let mut context = QueryContext::new(storage, &self.registry, query, start, count);
							system.process_batch(self, &mut context);
						}
					};

					let name = system.name();
					scope.parallel_for(name, scope.num_workers(), &Async::completed(), job).wait_completed()
				});

				if status == AsyncStatus::Failed {
					log::error!("system {} failed", system.name());
				}
			},
		}
	}
}
