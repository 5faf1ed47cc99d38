mod bit_set_tests;
mod archetype_tests;
mod command_tests;
mod task_tests;

use crate::components::{Component, ComponentRegistry};
use crate::{EcsConfig, World};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Default, Debug, Copy, Clone, PartialEq, Component)]
pub struct Position(pub f32, pub f32);

#[derive(Default, Debug, Copy, Clone, PartialEq, Component)]
pub struct Velocity(pub f32, pub f32);

#[derive(Default, Debug, Clone, PartialEq, Component)]
pub struct Name(pub String);

#[derive(Default, Debug, Component)]
pub struct Frozen;

/// Counts how many times a tracked value was dropped.
#[derive(Default, Component)]
pub struct Tracked(pub Option<Arc<AtomicUsize>>);

impl Tracked {
	pub fn new(counter: &Arc<AtomicUsize>) -> Self {
		Self(Some(counter.clone()))
	}
}

impl Drop for Tracked {
	fn drop(&mut self) {
		if let Some(counter) = &self.0 {
			counter.fetch_add(1, Ordering::SeqCst);
		}
	}
}

pub fn registry() -> Arc<ComponentRegistry> {
	let mut registry = ComponentRegistry::new();
	registry.register::<Position>().unwrap();
	registry.register::<Velocity>().unwrap();
	registry.register::<Name>().unwrap();
	registry.register::<Frozen>().unwrap();
	registry.register::<Tracked>().unwrap();
	Arc::new(registry)
}

pub fn config() -> EcsConfig {
	EcsConfig::default().with_workers(4).with_storage_capacity(8)
}

pub fn world() -> World {
	World::with_config(registry(), config())
}
