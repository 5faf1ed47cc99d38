use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use parking_lot::{Condvar, Mutex};
use std::time::Duration;
use std::sync::Arc;

/// Completion state of an [Async] operation.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AsyncStatus {
	InProcess,
	Ok,
	Failed,
}

/// A handle to work scheduled on a [TaskManager](crate::tasks::TaskManager).
///
/// Handles are cheap to clone. They are used to wait for completion or to make other
/// work [depend](crate::tasks::TaskScope::spawn) on this one.
#[derive(Clone, Default)]
pub struct Async {
	state: Option<Arc<AsyncState>>,
}

struct AsyncState {
	name: String,
	remaining: AtomicUsize,
	failed: AtomicBool,
	done: Mutex<bool>,
	cond: Condvar,
}

impl Async {
	/// A handle that is already completed.
	pub fn completed() -> Self {
		Self::default()
	}

	/// A handle that completes after `jobs` calls to `complete_one`.
	pub(crate) fn pending(name: &str, jobs: usize) -> Self {
		debug_assert!(jobs > 0);
		Self {
			state: Some(Arc::new(AsyncState {
				name: name.to_owned(),
				remaining: AtomicUsize::new(jobs),
				failed: AtomicBool::new(false),
				done: Mutex::new(false),
				cond: Condvar::new(),
			})),
		}
	}

	pub fn name(&self) -> &str {
		self.state.as_ref().map_or("", |s| s.name.as_str())
	}

	pub fn is_completed(&self) -> bool {
		self.status() != AsyncStatus::InProcess
	}

	pub fn status(&self) -> AsyncStatus {
		match &self.state {
			None => AsyncStatus::Ok,
			Some(state) if state.remaining.load(Ordering::Acquire) > 0 => AsyncStatus::InProcess,
			Some(state) if state.failed.load(Ordering::Acquire) => AsyncStatus::Failed,
			Some(_) => AsyncStatus::Ok,
		}
	}

	/// Block until the operation has completed and return its final status.
	///
	/// When called from a worker thread, the worker keeps executing other pending jobs
	/// while it waits.
	pub fn wait_completed(&self) -> AsyncStatus {
		let state = match &self.state {
			None => return AsyncStatus::Ok,
			Some(state) => state,
		};

		while state.remaining.load(Ordering::Acquire) > 0 {
			if let Some(rayon::Yield::Executed) = rayon::yield_now() {
				continue;
			}

			let mut done = state.done.lock();
			if !*done {
				state.cond.wait_for(&mut done, Duration::from_millis(1));
			}
		}

		self.status()
	}

	pub(crate) fn complete_one(&self, ok: bool) {
		let state = match &self.state {
			None => return,
			Some(state) => state,
		};

		if !ok {
			state.failed.store(true, Ordering::Release);
		}

		if state.remaining.fetch_sub(1, Ordering::AcqRel) == 1 {
			*state.done.lock() = true;
			state.cond.notify_all();
		}
	}
}

/// Completes a job of an [Async] when dropped, marking it failed if the job panicked.
pub(crate) struct CompleteOnDrop {
	handle: Async,
	failed: bool,
}

impl CompleteOnDrop {
	pub fn new(handle: Async) -> Self {
		Self { handle, failed: false }
	}

	pub fn handle(&self) -> &Async {
		&self.handle
	}

	/// Complete the job as failed.
	pub fn fail(mut self) {
		self.failed = true;
	}
}

impl Drop for CompleteOnDrop {
	fn drop(&mut self) {
		self.handle.complete_one(!self.failed && !std::thread::panicking());
	}
}
