//! Manages entity ID allocation and deallocation.

use std::collections::VecDeque;

use bitvec::prelude::BitVec;

use super::Entity;

/// Allocates sequential entity IDs and recycles deallocated ones.
///
/// Recycled IDs are handed out in the order they were deallocated,
/// and always before a new sequential ID is used.
#[derive(Debug, Default)]
pub struct Allocator {
    /// The next never-used ID.
    gauge: u32,
    /// IDs released by [`deallocate`](Self::deallocate), oldest first.
    free:  VecDeque<Entity>,
    /// Whether each ID below `gauge` is currently allocated.
    live:  BitVec,
    /// Number of set bits in `live`.
    count: usize,
}

impl Allocator {
    /// Allocates an ID, preferring the oldest recycled one.
    pub fn allocate(&mut self) -> Entity {
        let entity = match self.free.pop_front() {
            Some(entity) => entity,
            None => {
                let entity = Entity::from_id(self.gauge);
                self.gauge = self.gauge.checked_add(1).expect("entity ID space exhausted");
                self.live.push(false);
                entity
            }
        };

        self.live.set(entity.index(), true);
        self.count += 1;
        entity
    }

    /// Releases an ID so that it can be reused.
    ///
    /// Returns `false` without effect if the ID is not currently allocated.
    pub fn deallocate(&mut self, entity: Entity) -> bool {
        if !self.is_live(entity) {
            return false;
        }

        self.live.set(entity.index(), false);
        self.count -= 1;
        self.free.push_back(entity);
        true
    }

    /// Checks whether the ID is currently allocated.
    pub fn is_live(&self, entity: Entity) -> bool {
        self.live.get(entity.index()).map_or(false, |bit| *bit)
    }

    /// The number of currently allocated IDs.
    pub fn len(&self) -> usize { self.count }

    /// Whether no IDs are currently allocated.
    pub fn is_empty(&self) -> bool { self.count == 0 }

    /// One past the highest ID ever allocated.
    ///
    /// Per-entity tables indexed by ID never need to be longer than this.
    pub fn high_water(&self) -> usize { self.live.len() }

    /// The number of IDs waiting to be recycled.
    pub fn num_free(&self) -> usize { self.free.len() }

    /// Iterates over all allocated IDs in ascending order.
    pub fn iter_live(&self) -> impl Iterator<Item = Entity> + '_ {
        self.live.iter_ones().map(Entity::from_index)
    }
}
