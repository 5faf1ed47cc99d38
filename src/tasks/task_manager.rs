use crate::tasks::{Async, AsyncStatus, CompleteOnDrop};
use rayon::{ScopeFifo, ThreadPool, ThreadPoolBuilder};
use crate::error::EcsResult;
use crate::config::EcsConfig;
use std::sync::Arc;

/// A pool of worker threads executing background and parallel-for jobs.
pub struct TaskManager {
	pool: ThreadPool,
	num_workers: usize,
}

impl TaskManager {
	pub fn new(config: &EcsConfig) -> EcsResult<Self> {
		let num_workers = config.num_workers.max(1);
		let prefix = config.thread_name.clone();

		let pool = ThreadPoolBuilder::new()
			.num_threads(num_workers)
			.thread_name(move |i| format!("{prefix}-{i}"))
			.build()?;

		log::debug!("started task manager with {num_workers} workers");
		Ok(Self { pool, num_workers })
	}

	pub fn num_workers(&self) -> usize {
		self.num_workers
	}

	/// Run `op` on the pool with a [TaskScope] that can borrow anything outliving the call.
	/// Returns once every job spawned in the scope has finished.
	pub fn scope<'s, R: Send>(&self, op: impl for<'a> FnOnce(&TaskScope<'a, 's>) -> R + Send) -> R {
		let num_workers = self.num_workers;
		self.pool.scope_fifo(move |scope| op(&TaskScope { scope, num_workers }))
	}
}

/// Spawns jobs that may borrow data living for `'s`.
///
/// Jobs start in the order they were spawned. A job whose dependency is still running
/// goes back to the end of the queue instead of blocking its worker.
pub struct TaskScope<'a, 's> {
	scope: &'a ScopeFifo<'s>,
	num_workers: usize,
}

impl<'a, 's> TaskScope<'a, 's> {
	pub fn num_workers(&self) -> usize {
		self.num_workers
	}

	/// Schedule `job` to run once `depends_on` has completed.
	///
	/// If the dependency failed, `job` is skipped and the returned handle fails too.
	pub fn spawn(&self, name: &str, depends_on: &Async, job: impl FnOnce() + Send + 's) -> Async {
		let handle = Async::pending(name, 1);
		schedule(self.scope, depends_on.clone(), CompleteOnDrop::new(handle.clone()), job);
		handle
	}

	/// Schedule `job(item, num_elements)` for every item in `0..num_elements`, each as its own job.
	///
	/// With zero elements nothing is scheduled and the returned handle is already completed.
	pub fn parallel_for(
		&self, name: &str, num_elements: usize, depends_on: &Async,
		job: impl Fn(usize, usize) + Send + Sync + 's,
	) -> Async {
		if num_elements == 0 {
			return Async::completed();
		}

		log::trace!("scheduling {name} as {num_elements} jobs");

		let handle = Async::pending(name, num_elements);
		let job = Arc::new(job);

		for item in 0..num_elements {
			let job = job.clone();
			let completion = CompleteOnDrop::new(handle.clone());
			schedule(self.scope, depends_on.clone(), completion, move || job(item, num_elements));
		}

		handle
	}
}

fn schedule<'s>(
	scope: &ScopeFifo<'s>, depends_on: Async, completion: CompleteOnDrop, job: impl FnOnce() + Send + 's,
) {
	scope.spawn_fifo(move |scope| match depends_on.status() {
		AsyncStatus::InProcess => {
			std::thread::yield_now();
			schedule(scope, depends_on, completion, job);
		},
		AsyncStatus::Failed => {
			log::error!("failed: {} dependency {} failed", completion.handle().name(), depends_on.name());
			completion.fail();
		},
		AsyncStatus::Ok => {
			job();
			drop(completion);
		},
	});
}
