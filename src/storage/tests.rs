use super::{AnyPool, Pool};
use crate::test_util::Position;
use crate::Entity;

fn entity(id: u32) -> Entity { Entity::from_id(id) }

fn filled(ids: impl IntoIterator<Item = u32>) -> Pool<i64> {
    let mut pool = Pool::default();
    for id in ids {
        assert_eq!(pool.set(entity(id), i64::from(id) * 10), None);
    }
    pool
}

#[test]
fn test_set_get() {
    let mut pool = filled([3, 0, 7]);

    assert_eq!(pool.len(), 3);
    assert_eq!(pool.get(entity(7)), Some(&70));
    assert_eq!(pool.get(entity(1)), None);
    assert_eq!(pool.get(entity(100)), None);

    assert_eq!(pool.set(entity(7), 71), Some(70), "set replaces the existing value");
    assert_eq!(pool.len(), 3);

    *pool.get_mut(entity(0)).expect("entity 0 is set") += 1;
    assert_eq!(pool.get(entity(0)), Some(&1));
}

#[test]
fn test_remove_compacts() {
    let mut pool = filled(1..=10);

    assert_eq!(pool.remove(entity(3)), Some(30));
    assert_eq!(pool.len(), 9);
    assert!(!pool.contains(entity(3)));

    for id in (1..3).chain(4..=10) {
        assert_eq!(pool.get(entity(id)), Some(&(i64::from(id) * 10)), "entity {id} lost its value");
    }

    // the last value was swapped into the freed slot
    assert_eq!(pool.entities()[2], entity(10));
    assert_eq!(pool.values()[2], 100);
}

#[test]
fn test_remove_last_and_only() {
    let mut pool = filled([5, 6]);

    assert_eq!(pool.remove(entity(6)), Some(60));
    assert_eq!(pool.entities(), &[entity(5)]);

    assert_eq!(pool.remove(entity(5)), Some(50));
    assert!(pool.is_empty());

    assert_eq!(pool.set(entity(6), 1), None, "removed entities can be set again");
    assert_eq!(pool.get(entity(6)), Some(&1));
}

#[test]
fn test_remove_absent_is_noop() {
    let mut pool = filled([1, 2]);

    assert_eq!(pool.remove(entity(3)), None);
    assert_eq!(pool.remove(entity(1000)), None);
    pool.remove_entity(entity(4));
    assert_eq!(pool.len(), 2);

    AnyPool::remove_entity(&mut pool, entity(2));
    assert_eq!(pool.entities(), &[entity(1)]);
}

#[test]
fn test_iter_matches_indices() {
    let mut pool = filled([4, 8, 15, 16, 23, 42]);
    pool.remove(entity(8));
    pool.remove(entity(42));

    for (owner, value) in pool.iter_mut() {
        *value += 1;
        assert_eq!(*value, i64::from(owner.id()) * 10 + 1);
    }

    let mut owners: Vec<_> = pool.iter().map(|(owner, _)| owner.id()).collect();
    owners.sort_unstable();
    assert_eq!(owners, vec![4, 15, 16, 23]);
}

#[test]
fn test_values_mut_follows_entities() {
    let mut pool = filled([2, 5, 9]);
    pool.remove(entity(2));

    for value in pool.values_mut() {
        *value = -*value;
    }

    assert_eq!(pool.entities(), &[entity(9), entity(5)]);
    assert_eq!(pool.values(), &[-90, -50]);
    assert_eq!(pool.get(entity(5)), Some(&-50));
}

#[test]
fn test_grows_past_capacity() {
    let mut pool = Pool::with_capacity(2);
    for id in 0..50 {
        pool.set(entity(id), Position { x: id as f32, y: 0.0 });
    }
    assert_eq!(pool.len(), 50);
    assert_eq!(pool.get(entity(49)), Some(&Position { x: 49.0, y: 0.0 }));

    pool.clear();
    assert!(pool.is_empty());
    assert!(!pool.contains(entity(0)));
}

#[test]
fn test_downcast() {
    let mut boxed: Box<dyn AnyPool> = Box::new(Pool::<Position>::default());
    boxed.downcast_mut::<Position>().set(entity(1), Position { x: 1.0, y: 2.0 });

    assert_eq!(boxed.len(), 1);
    assert!(boxed.type_name().ends_with("Position"));
    assert_eq!(boxed.downcast_ref::<Position>().get(entity(1)), Some(&Position { x: 1.0, y: 2.0 }));
}

#[test]
#[should_panic = "was accessed as a pool of"]
fn test_downcast_wrong_type() {
    let boxed: Box<dyn AnyPool> = Box::new(Pool::<Position>::default());
    boxed.downcast_ref::<crate::test_util::Velocity>();
}
