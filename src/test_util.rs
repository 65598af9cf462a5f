//! Fixtures shared by unit tests and benchmarks.

#![allow(missing_docs)]

use parking_lot::Once;

use crate::{comp, system, Entity, Registry};

mod event_tracer;
pub use event_tracer::{EventTracer, UpdateEvent};

pub(crate) fn init() {
    static SET_LOGGER_ONCE: Once = Once::new();
    SET_LOGGER_ONCE.call_once(env_logger::init);
}

#[comp(sparsec_as(crate))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

#[comp(sparsec_as(crate))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

#[comp(sparsec_as(crate))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health(pub u32);

/// A family of distinct component types for benchmarks.
#[comp(sparsec_as(crate))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompN<const N: usize>(pub i32);

/// Moves every entity with a position by its velocity.
#[system(sparsec_as(crate), require(Position, Velocity))]
#[derive(Debug, Default)]
pub struct MovementSystem {
    pub ticks: u32,
}

impl MovementSystem {
    pub fn tick(&mut self, members: &[Entity], registry: &mut Registry) {
        for &entity in members {
            let velocity = *registry.get_component::<Velocity>(entity);
            let position = registry.get_component_mut::<Position>(entity);
            position.x += velocity.x;
            position.y += velocity.y;
        }
        self.ticks += 1;
    }
}

/// Interested in every entity with a health component.
#[system(sparsec_as(crate), require(Health))]
#[derive(Debug, Default)]
pub struct HealthSystem;

/// Requires nothing, so it is interested in every entity.
#[system(sparsec_as(crate))]
#[derive(Debug, Default)]
pub struct EverythingSystem;
