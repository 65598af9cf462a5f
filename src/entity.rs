//! An entity is a single object that owns components.
//!
//! Entities carry no data and no reference to their registry.
//! All state associated with an entity lives in the [`Registry`](crate::Registry),
//! so every operation takes the registry explicitly:
//! `registry.add_component(entity, ..)` rather than `entity.add_component(..)`.
//!
//! Entity IDs are 0-based and recycled after the entity has been fully destroyed.
//! A handle to a destroyed entity may therefore alias a newer entity;
//! there is no generation counter to detect this.

use std::fmt;

use xias::Xias;

mod alloc;
pub use alloc::Allocator;

#[cfg(test)]
mod tests;

/// A handle to an entity in a [`Registry`](crate::Registry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity(u32);

impl Entity {
    /// Constructs a handle from a raw ID.
    ///
    /// This does not check whether the ID is allocated in any registry.
    pub const fn from_id(id: u32) -> Self { Self(id) }

    /// Returns the raw ID of this entity.
    pub const fn id(self) -> u32 { self.0 }

    /// Returns the ID as an index into per-entity tables.
    pub fn index(self) -> usize { self.0.small_int() }

    pub(crate) fn from_index(index: usize) -> Self { Self(index.small_int()) }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "entity#{}", self.0) }
}
