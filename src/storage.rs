//! A storage is the data structure where components of the same type for all entities are stored.
//!
//! Each component type gets its own [`Pool`], a sparse set that keeps the values densely packed.
//! The registry keeps pools behind the type-erased [`AnyPool`] trait,
//! indexed by [`ComponentId`](crate::comp::ComponentId).
//! Typed access downcasts the pool once per call;
//! entity teardown goes through [`AnyPool::remove_entity`]
//! without knowing the component type.

use std::any::{self, Any};

use crate::Entity;

mod pool;
pub use pool::Pool;

#[cfg(test)]
mod tests;

/// The initial capacity of a pool unless configured otherwise.
pub const DEFAULT_POOL_CAPACITY: usize = 100;

/// Type-erased operations on a [`Pool`].
pub trait AnyPool {
    /// Removes the component of `entity` if the pool holds one.
    ///
    /// This is a no-op if the entity never had this component,
    /// so it can be called for every pool when an entity is destroyed.
    fn remove_entity(&mut self, entity: Entity);

    /// The number of components stored.
    fn len(&self) -> usize;

    /// Whether the pool is empty.
    fn is_empty(&self) -> bool { self.len() == 0 }

    /// The name of the component type.
    fn type_name(&self) -> &'static str;

    /// Upcasts for downcasting to the typed pool.
    fn as_any(&self) -> &dyn Any;

    /// Upcasts for downcasting to the typed pool mutably.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<C: 'static> AnyPool for Pool<C> {
    fn remove_entity(&mut self, entity: Entity) { drop(self.remove(entity)); }

    fn len(&self) -> usize { Pool::len(self) }

    fn type_name(&self) -> &'static str { any::type_name::<C>() }

    fn as_any(&self) -> &dyn Any { self }

    fn as_any_mut(&mut self) -> &mut dyn Any { self }
}

impl dyn AnyPool {
    /// Downcasts to the typed pool.
    ///
    /// # Panics
    /// Panics if the pool does not store `C`.
    pub fn downcast_ref<C: 'static>(&self) -> &Pool<C> {
        match self.as_any().downcast_ref::<Pool<C>>() {
            Some(pool) => pool,
            None => panic!(
                "Pool of {} was accessed as a pool of {}",
                self.type_name(),
                any::type_name::<C>()
            ),
        }
    }

    /// Downcasts to the typed pool mutably.
    ///
    /// # Panics
    /// Panics if the pool does not store `C`.
    pub fn downcast_mut<C: 'static>(&mut self) -> &mut Pool<C> {
        let name = self.type_name();
        match self.as_any_mut().downcast_mut::<Pool<C>>() {
            Some(pool) => pool,
            None => panic!("Pool of {name} was accessed as a pool of {}", any::type_name::<C>()),
        }
    }
}
