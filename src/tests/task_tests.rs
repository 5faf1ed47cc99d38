use crate::tasks::{Async, AsyncStatus, TaskManager};
use std::sync::atomic::{AtomicUsize, Ordering};
use crate::tests::config;
use parking_lot::Mutex;

#[test]
pub fn spawn_respects_dependencies() {
	let tasks = TaskManager::new(&config()).unwrap();
	let order = Mutex::new(Vec::new());

	tasks.scope(|scope| {
		let first = scope.spawn("first", &Async::completed(), || {
			std::thread::sleep(std::time::Duration::from_millis(20));
			order.lock().push(1);
		});
		let second = scope.spawn("second", &first, || order.lock().push(2));
		let third = scope.spawn("third", &second, || order.lock().push(3));

		assert_eq!(third.wait_completed(), AsyncStatus::Ok);
		assert!(first.is_completed() && second.is_completed());
	});

	assert_eq!(*order.lock(), vec![1, 2, 3]);
}

#[test]
pub fn parallel_for_visits_every_item() {
	let tasks = TaskManager::new(&config()).unwrap();
	let visited: Vec<AtomicUsize> = (0..100).map(|_| AtomicUsize::new(0)).collect();

	let status = tasks.scope(|scope| {
		let handle = scope.parallel_for("visit", visited.len(), &Async::completed(), |item, count| {
			assert_eq!(count, 100);
			visited[item].fetch_add(1, Ordering::SeqCst);
		});
		handle.wait_completed()
	});

	assert_eq!(status, AsyncStatus::Ok);
	assert!(visited.iter().all(|v| v.load(Ordering::SeqCst) == 1));
}

#[test]
pub fn empty_parallel_for_is_completed() {
	let tasks = TaskManager::new(&config()).unwrap();
	tasks.scope(|scope| {
		let handle = scope.parallel_for("nothing", 0, &Async::completed(), |_, _| unreachable!());
		assert!(handle.is_completed());
		assert_eq!(handle.status(), AsyncStatus::Ok);
	});
}

#[test]
pub fn failed_dependency_skips_job() {
	let tasks = TaskManager::new(&config()).unwrap();
	let ran = AtomicUsize::new(0);

	let failed = Async::pending("failed", 1);
	failed.complete_one(false);
	assert_eq!(failed.status(), AsyncStatus::Failed);

	let status = tasks.scope(|scope| {
		let job = scope.spawn("dependent", &failed, || {
			ran.fetch_add(1, Ordering::SeqCst);
		});
		let batches = scope.parallel_for("dependent batches", 4, &failed, |_, _| {
			ran.fetch_add(1, Ordering::SeqCst);
		});
		(job.wait_completed(), batches.wait_completed())
	});

	assert_eq!(status, (AsyncStatus::Failed, AsyncStatus::Failed));
	assert_eq!(ran.load(Ordering::SeqCst), 0);
}

#[test]
pub fn config_names_workers() {
	let tasks = TaskManager::new(&config().with_thread_name("sim")).unwrap();
	assert_eq!(tasks.num_workers(), 4);

	let name = Mutex::new(None);
	tasks.scope(|scope| {
		scope.spawn("name", &Async::completed(), || {
			*name.lock() = std::thread::current().name().map(String::from);
		});
	});

	assert!(name.into_inner().unwrap().starts_with("sim-"));
}
