use std::{iter, mem};

use xias::Xias;

use crate::Entity;

/// A sparse set mapping entities to component values.
///
/// Values are packed contiguously in `dense`.
/// `entities[slot]` is the owner of `dense[slot]`,
/// and `sparse[entity]` is the slot of the entity's value, if any.
/// The two indices are inverses of each other for every stored value.
///
/// Removal moves the last value into the freed slot,
/// so slot order is not stable across removals.
#[derive(Debug)]
pub struct Pool<C> {
    dense:    Vec<C>,
    entities: Vec<Entity>,
    sparse:   Vec<Option<u32>>,
}

impl<C> Default for Pool<C> {
    fn default() -> Self { Self::with_capacity(0) }
}

impl<C> Pool<C> {
    /// Creates an empty pool with room for `capacity` values before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            dense:    Vec::with_capacity(capacity),
            entities: Vec::with_capacity(capacity),
            sparse:   Vec::new(),
        }
    }

    fn slot(&self, entity: Entity) -> Option<usize> {
        let slot = (*self.sparse.get(entity.index())?)?;
        Some(slot.small_int())
    }

    /// Sets the value for an entity, returning the previous value if there was one.
    pub fn set(&mut self, entity: Entity, value: C) -> Option<C> {
        if let Some(slot) = self.slot(entity) {
            let old = self.dense.get_mut(slot).expect("sparse index points past dense storage");
            return Some(mem::replace(old, value));
        }

        let index = entity.index();
        if self.sparse.len() <= index {
            self.sparse.resize(index + 1, None);
        }

        let slot: u32 = self.dense.len().small_int();
        self.dense.push(value);
        self.entities.push(entity);
        *self.sparse.get_mut(index).expect("resized above") = Some(slot);
        None
    }

    /// Removes the value of an entity, returning it if there was one.
    ///
    /// The last value in the pool is moved into the freed slot.
    pub fn remove(&mut self, entity: Entity) -> Option<C> {
        let slot = self.slot(entity)?;

        let value = self.dense.swap_remove(slot);
        let removed = self.entities.swap_remove(slot);
        debug_assert_eq!(removed, entity, "dense index owner mismatch");
        *self.sparse.get_mut(entity.index()).expect("slot() checked bounds") = None;

        if let Some(&moved) = self.entities.get(slot) {
            let moved_slot = self.sparse.get_mut(moved.index()).expect("moved entity is indexed");
            *moved_slot = Some(slot.small_int());
        }

        Some(value)
    }

    /// Gets the value of an entity.
    pub fn get(&self, entity: Entity) -> Option<&C> {
        let slot = self.slot(entity)?;
        Some(self.dense.get(slot).expect("sparse index points past dense storage"))
    }

    /// Gets the value of an entity mutably.
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut C> {
        let slot = self.slot(entity)?;
        Some(self.dense.get_mut(slot).expect("sparse index points past dense storage"))
    }

    /// Whether the entity has a value in this pool.
    pub fn contains(&self, entity: Entity) -> bool { self.slot(entity).is_some() }

    /// The number of values stored.
    pub fn len(&self) -> usize { self.dense.len() }

    /// Whether the pool is empty.
    pub fn is_empty(&self) -> bool { self.dense.is_empty() }

    /// Removes all values.
    pub fn clear(&mut self) {
        self.dense.clear();
        self.entities.clear();
        self.sparse.clear();
    }

    /// The owners of the stored values, in storage order.
    pub fn entities(&self) -> &[Entity] { &self.entities }

    /// The stored values, in storage order.
    pub fn values(&self) -> &[C] { &self.dense }

    /// The stored values, in storage order.
    pub fn values_mut(&mut self) -> &mut [C] { &mut self.dense }

    /// Iterates over `(entity, value)` pairs in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &C)> + '_ {
        iter::zip(self.entities.iter().copied(), &self.dense)
    }

    /// Iterates over `(entity, value)` pairs in storage order with mutable values.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut C)> + '_ {
        iter::zip(self.entities.iter().copied(), &mut self.dense)
    }
}
