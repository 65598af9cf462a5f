use std::time::Duration;

use criterion::*;
use rand::Rng;
use sparsec::{comp, system, Registry};

#[comp]
struct PositionX(f64);
#[comp]
struct PositionY(f64);
#[comp]
struct PositionZ(f64);
#[comp]
struct VelocityX(f64);
#[comp]
struct VelocityY(f64);
#[comp]
struct VelocityZ(f64);

#[system(require(PositionX, PositionY, PositionZ), require(VelocityX, VelocityY, VelocityZ))]
struct IndividualAdd;

fn run_individual_add(registry: &mut Registry) {
    registry.run_system::<IndividualAdd, _>(|_, members, registry| {
        for &entity in members {
            let vx = registry.get_component::<VelocityX>(entity).0;
            let vy = registry.get_component::<VelocityY>(entity).0;
            let vz = registry.get_component::<VelocityZ>(entity).0;
            registry.get_component_mut::<PositionX>(entity).0 += vx;
            registry.get_component_mut::<PositionY>(entity).0 += vy;
            registry.get_component_mut::<PositionZ>(entity).0 += vz;
        }
    });
}

fn iter_entity_add_individual(c: &mut Criterion) {
    let mut group = c.benchmark_group("iter entity (a += b)");
    group.measurement_time(Duration::from_secs(10));

    for log_entities in (4..=16).step_by(4) {
        let num_entities = 1 << log_entities;
        group.throughput(Throughput::Elements(num_entities));
        group.bench_with_input(
            BenchmarkId::new("individual", format!("{num_entities} entities")),
            &num_entities,
            |b, &num_entities| {
                let mut registry = Registry::new();
                registry.add_system(IndividualAdd);
                let mut rng = rand::thread_rng();
                for _ in 0..num_entities {
                    let entity = registry.create_entity();
                    registry.add_component(entity, PositionX(rng.gen_range(-65536.0..=65536.0)));
                    registry.add_component(entity, PositionY(rng.gen_range(-65536.0..=65536.0)));
                    registry.add_component(entity, PositionZ(rng.gen_range(-65536.0..=65536.0)));
                    registry.add_component(entity, VelocityX(rng.gen_range(-65536.0..=65536.0)));
                    registry.add_component(entity, VelocityY(rng.gen_range(-65536.0..=65536.0)));
                    registry.add_component(entity, VelocityZ(rng.gen_range(-65536.0..=65536.0)));
                }
                registry.update();

                b.iter(|| run_individual_add(&mut registry))
            },
        );
    }
}

#[comp]
struct PositionArray([f64; 3]);
#[comp]
struct VelocityArray([f64; 3]);

#[system(require(PositionArray, VelocityArray))]
struct ArrayAdd;

fn run_array_add(registry: &mut Registry) {
    registry.run_system::<ArrayAdd, _>(|_, members, registry| {
        for &entity in members {
            let v = registry.get_component::<VelocityArray>(entity).0;
            let p = registry.get_component_mut::<PositionArray>(entity);
            for i in 0..3 {
                p.0[i] += v[i];
            }
        }
    });
}

fn iter_entity_add_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("iter entity (a += b)");
    group.measurement_time(Duration::from_secs(10));

    for log_entities in (4..=16).step_by(4) {
        let num_entities = 1 << log_entities;
        group.throughput(Throughput::Elements(num_entities));
        group.bench_with_input(
            BenchmarkId::new("array", format!("{num_entities} entities")),
            &num_entities,
            |b, &num_entities| {
                let mut registry = Registry::new();
                registry.add_system(ArrayAdd);
                let mut rng = rand::thread_rng();
                for _ in 0..num_entities {
                    let entity = registry.create_entity();
                    registry.add_component(
                        entity,
                        PositionArray([
                            rng.gen_range(-65536.0..=65536.0),
                            rng.gen_range(-65536.0..=65536.0),
                            rng.gen_range(-65536.0..=65536.0),
                        ]),
                    );
                    registry.add_component(
                        entity,
                        VelocityArray([
                            rng.gen_range(-65536.0..=65536.0),
                            rng.gen_range(-65536.0..=65536.0),
                            rng.gen_range(-65536.0..=65536.0),
                        ]),
                    );
                }
                registry.update();

                b.iter(|| run_array_add(&mut registry))
            },
        );
    }
}

criterion_group!(individual, iter_entity_add_individual);
criterion_group!(array, iter_entity_add_array);
criterion_main!(individual, array);
