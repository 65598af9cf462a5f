use std::hash;

use super::{Allocator, Entity};
use crate::test_util;

// Entities are stored in ordered sets and hash maps by the registry.
static_assertions::assert_impl_all!(Entity: Copy, Ord, hash::Hash, Send, Sync);

#[test]
fn test_sequential_allocation() {
    test_util::init();

    let mut alloc = Allocator::default();
    let ids: Vec<_> = (0..4).map(|_| alloc.allocate().id()).collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);
    assert_eq!(alloc.len(), 4);
    assert_eq!(alloc.high_water(), 4);
}

#[test]
fn test_recycle_oldest_first() {
    test_util::init();

    let mut alloc = Allocator::default();
    let ids: Vec<_> = (0..5).map(|_| alloc.allocate()).collect();

    assert!(alloc.deallocate(ids[3]));
    assert!(alloc.deallocate(ids[1]));
    assert_eq!(alloc.num_free(), 2);

    assert_eq!(alloc.allocate(), ids[3], "recycled IDs are reused in deallocation order");
    assert_eq!(alloc.allocate(), ids[1]);
    assert_eq!(alloc.allocate().id(), 5, "new IDs are only used once the free list is empty");
    assert_eq!(alloc.high_water(), 6);
}

#[test]
fn test_double_deallocate_ignored() {
    test_util::init();

    let mut alloc = Allocator::default();
    let entity = alloc.allocate();
    assert!(alloc.deallocate(entity));
    assert!(!alloc.deallocate(entity));
    assert!(!alloc.deallocate(Entity::from_id(42)));
    assert_eq!(alloc.num_free(), 1);
    assert!(alloc.is_empty());
}

#[test]
fn test_iter_live() {
    test_util::init();

    let mut alloc = Allocator::default();
    let ids: Vec<_> = (0..4).map(|_| alloc.allocate()).collect();
    alloc.deallocate(ids[2]);

    let live: Vec<_> = alloc.iter_live().map(Entity::id).collect();
    assert_eq!(live, vec![0, 1, 3]);
    assert!(alloc.is_live(ids[0]));
    assert!(!alloc.is_live(ids[2]));
}
