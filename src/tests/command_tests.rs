use crate::tests::{config, world, Name, Position, Velocity};
use crate::tasks::{Async, TaskManager};
use crate::components::Write;
use parking_lot::Mutex;
use crate::archetype;
use std::sync::Arc;

#[test]
pub fn commands_apply_on_sync() {
	let mut world = world();
	let archetype = archetype!(world, [Position]);

	let entity = world.commands().create_entity(archetype);
	assert!(!world.is_alive(entity), "Entities are only made on sync");
	assert_eq!(world.commands().len(), 1);

	world.sync();
	assert!(world.is_alive(entity));
	assert!(world.commands().is_empty());

	world.commands().set_component(entity, Velocity(1.0, 0.0));
	world.commands().destroy_entity(entity);
	world.sync();

	assert!(!world.is_alive(entity));
	assert!(world.is_empty());
}

#[test]
pub fn commands_run_in_fifo_order() {
	let mut world = world();
	let order = Arc::new(Mutex::new(Vec::new()));

	for i in 0..5 {
		let order = order.clone();
		world.commands().push(move |_| order.lock().push(i));
	}

	let nested = order.clone();
	world.commands().push(move |world| {
		let order = nested.clone();
		world.commands().push(move |_| order.lock().push(6));
		nested.lock().push(5);
	});

	world.sync();
	assert_eq!(*order.lock(), vec![0, 1, 2, 3, 4, 5, 6], "Commands recorded during sync run in the same sync");
}

#[test]
pub fn set_and_remove_components() {
	let mut world = world();
	let entity = world.create_entity(archetype!(world, [Position]));

	let commands = world.commands();
	commands.set_component(entity, Position(1.0, 1.0));
	commands.set_component(entity, Name(String::from("crate")));
	commands.remove_component::<Position>(entity);
	world.sync();

	assert_eq!(world.get_arch(entity), archetype!(world, [Name]));
	assert_eq!(world.get_component::<Name>(entity).0, "crate");
}

#[test]
pub fn stale_handles_are_ignored() {
	let mut world = world();
	let archetype = archetype!(world, [Position]);
	let entity = world.create_entity(archetype);

	world.commands().destroy_entity(entity);
	world.commands().destroy_entity(entity);
	world.commands().rearch_entity(entity, archetype!(world, [Velocity]));
	world.commands().set_component(entity, Position(1.0, 0.0));
	world.sync();

	assert!(!world.is_alive(entity));
	assert!(world.is_empty());
}

#[test]
pub fn commands_from_parallel_queries() {
	let mut world = world();
	let tasks = TaskManager::new(&config()).unwrap();
	let archetype = archetype!(world, [Position, Velocity]);

	for i in 0..64 {
		let entity = world.create_entity(archetype);
		world.get_component_mut::<Position>(entity).0 = i as f32;
	}

	let query = world.registry().query("split").fetch::<Write<Position>>().build();
	let world_ref = &world;
	// SAFETY: The only job of the scope. Commands don't touch components until `sync`.
	tasks.scope(|scope| unsafe {
		world_ref
			.execute_parallel(scope, &Async::completed(), &query, |context| {
				for slot in context.range() {
					if context.get::<Position>(slot).0 as usize % 2 == 0 {
						world_ref.commands().destroy_entity(context.entity(slot));
					} else {
						let child = world_ref.commands().create_entity(world_ref.archetype::<(Name,)>());
						world_ref.commands().set_component(child, Name(format!("{slot}")));
					}
				}
			})
			.wait_completed()
	});

	assert_eq!(world.len(), 64, "Nothing changes before sync");
	world.sync();

	assert_eq!(world.len(), 64);
	assert_eq!(world.storage(&archetype).unwrap().size(), 32);
	assert_eq!(world.storage(&archetype!(world, [Name])).unwrap().size(), 32);
}
