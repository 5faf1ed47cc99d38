use criterion::*;
use std::sync::Arc;
use strata_ecs::archetype;
use strata_ecs::prelude::*;

const COUNT: usize = 10000;

#[derive(Default, Component)]
struct Transform([f32; 16]);

#[derive(Default, Component)]
struct Translation([f32; 3]);

#[derive(Default, Component)]
struct Rotation([f32; 3]);

#[derive(Default, Component)]
struct Velocity([f32; 3]);

type IntegrateFetch = (Write<Transform>, Write<Translation>, Read<Velocity>, Read<Rotation>);

struct Integrate;

impl System for Integrate {
    type Fetch = IntegrateFetch;

    fn name(&self) -> &str {
        "integrate"
    }

    fn exec_mode(&self) -> ExecMode {
        ExecMode::OnWorkers
    }

    fn process(&self, _: &World, _: Entity, (m, t, v, r): FetchItem<'_, Self::Fetch>) {
        integrate(m, t, v, r);
    }
}

fn integrate(m: &mut Transform, t: &mut Translation, v: &Velocity, r: &Rotation) {
    for i in 0..3 {
        t.0[i] += v.0[i];
        m.0[12 + i] = t.0[i];
        m.0[i * 5] = r.0[i].cos();
    }
}

fn registry() -> Arc<ComponentRegistry> {
    let mut registry = ComponentRegistry::new();
    registry.register::<Transform>().unwrap();
    registry.register::<Translation>().unwrap();
    registry.register::<Rotation>().unwrap();
    registry.register::<Velocity>().unwrap();
    Arc::new(registry)
}

fn populated_world() -> (World, Vec<Entity>) {
    let mut world = World::new(registry());
    let archetype = archetype!(world, [Transform, Translation, Rotation, Velocity]);
    world.register_arch_with_capacity(archetype, COUNT);
    let entities = (0..COUNT).map(|_| world.create_entity(archetype)).collect();
    (world, entities)
}

fn create_entities(c: &mut Criterion) {
    c.bench_function("Create entities", |b| {
        b.iter_batched(
            || {
                let mut world = World::new(registry());
                let archetype = archetype!(world, [Transform, Translation, Rotation, Velocity]);
                world.register_arch_with_capacity(archetype, COUNT);
                (world, archetype)
            },
            |(mut world, archetype)| {
                for _ in 0..COUNT {
                    world.create_entity(archetype);
                }
                world
            },
            BatchSize::PerIteration,
        );
    });
}

fn destroy_entities(c: &mut Criterion) {
    c.bench_function("Destroy entities", |b| {
        b.iter_batched(
            populated_world,
            |(mut world, entities)| {
                for entity in entities {
                    world.destroy_entity(entity);
                }
                world
            },
            BatchSize::PerIteration,
        );
    });
}

fn rearch_entities(c: &mut Criterion) {
    c.bench_function("Rearch entities", |b| {
        b.iter_batched(
            populated_world,
            |(mut world, entities)| {
                for entity in entities {
                    world.remove_component::<Velocity>(entity);
                }
                world
            },
            BatchSize::PerIteration,
        );
    });
}

fn iterate_entities(c: &mut Criterion) {
    let tasks = TaskManager::new(&EcsConfig::default()).unwrap();
    let mut group = c.benchmark_group("Iterate entities");

    group.bench_function("Single-threaded", |b| {
        let (mut world, _) = populated_world();
        let query = world.registry().query("integrate").fetch::<IntegrateFetch>().build();

        b.iter(|| {
            world.execute(&query, |context| {
                context.for_each::<IntegrateFetch>(|_, (m, t, v, r)| integrate(m, t, v, r));
            })
        });
    });

    group.bench_function("Multi-threaded", |b| {
        let (mut world, _) = populated_world();
        world.register_system(Integrate);

        b.iter(|| world.execute_system("integrate", &tasks));
    });

    group.finish();
}

criterion_group!(
    benchmarks,
    create_entities,
    destroy_entities,
    rearch_entities,
    iterate_entities,
);
criterion_main!(benchmarks);
