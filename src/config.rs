use std::thread;

/// Tunables for a [World](crate::World) and its [TaskManager](crate::tasks::TaskManager).
#[derive(Clone, Debug)]
pub struct EcsConfig {
	/// Number of worker threads, which is also the batch count of parallel executions.
	pub num_workers: usize,
	/// Entities reserved up front by every new archetype storage.
	pub storage_capacity: usize,
	/// Prefix of worker thread names.
	pub thread_name: String,
}

impl EcsConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_workers(mut self, num_workers: usize) -> Self {
		self.num_workers = num_workers.max(1);
		self
	}

	pub fn with_storage_capacity(mut self, capacity: usize) -> Self {
		self.storage_capacity = capacity;
		self
	}

	pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
		self.thread_name = name.into();
		self
	}
}

impl Default for EcsConfig {
	fn default() -> Self {
		Self {
			num_workers: thread::available_parallelism().map_or(1, |n| n.get()),
			storage_capacity: 64,
			thread_name: String::from("ecs-worker"),
		}
	}
}
