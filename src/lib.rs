//! A sparse-set ECS runtime.
//!
//! # What is ECS?
//! ECS is a data-oriented programming paradigm.
//! Objects ("Entities") are plain IDs that store their data in "Components",
//! which are processed in "Systems".
//! An entity does not know which systems process it,
//! and a system does not know which entities exist until it is handed them.
//!
//! # Storage
//! Each component type is stored in its own [pool](storage::Pool),
//! a sparse set that keeps values densely packed
//! and removes values in constant time by moving the last value into the hole.
//! Each entity carries a [`Signature`], a bit set of the component types it holds.
//!
//! # Systems
//! A [`System`] declares the component types it requires.
//! The [`Registry`] hands each system the entities whose signature contains its requirements,
//! so adding or removing components moves entities in and out of systems.
//! Systems do not run themselves:
//! the caller runs them in whatever order it chooses
//! through [`Registry::run_system`].
//!
//! # Deferred lifecycle
//! Creating an entity, destroying an entity and changing its components
//! only affect system membership at the next [`Registry::update`].
//! Destroyed entities keep their components until then,
//! and their IDs are recycled afterwards.
//! See the [`registry`] module for the exact order of a flush.
//!
//! # Events
//! An [`EventBus`] dispatches typed events synchronously to subscribed handlers.
//!
//! # Example
//! ```
//! use sparsec::{comp, system, Registry};
//!
//! #[comp]
//! #[derive(Debug, PartialEq)]
//! struct Position(f32, f32);
//! #[comp]
//! struct Velocity(f32, f32);
//!
//! #[system(require(Position, Velocity))]
//! struct Movement;
//!
//! let mut registry = Registry::new();
//! registry.add_system(Movement);
//!
//! let entity = registry.create_entity();
//! registry.add_component(entity, Position(0.0, 0.0));
//! registry.add_component(entity, Velocity(1.0, 2.0));
//! registry.update();
//!
//! registry.run_system::<Movement, _>(|_, members, registry| {
//!     for &entity in members {
//!         let &Velocity(vx, vy) = registry.get_component::<Velocity>(entity);
//!         let position = registry.get_component_mut::<Position>(entity);
//!         position.0 += vx;
//!         position.1 += vy;
//!     }
//! });
//!
//! assert_eq!(registry.get_component::<Position>(entity), &Position(1.0, 2.0));
//! ```

#![cfg_attr(not(debug_assertions), deny(missing_docs))]
#![cfg_attr(doc, warn(missing_docs))]

mod macros;
#[doc(inline)]
pub use macros::*;

pub mod comp;
pub use comp::Component;

pub mod entity;
pub use entity::Entity;

pub mod error;
pub use error::Error;

pub mod event;
pub use event::EventBus;

pub mod index;

pub mod registry;
pub use registry::{new, Builder, Bundle, Registry};

pub mod signature;
pub use signature::Signature;

pub mod storage;

pub mod system;
pub use system::System;

#[cfg(any(test, feature = "internal-bench"))]
pub mod test_util;

pub mod tracer;
