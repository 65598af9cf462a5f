//! A component is a small data structure that can be attached to an entity.
//!
//! The registry never inspects component values.
//! It only stores them in per-type [pools](crate::storage::Pool)
//! and tracks their presence through [signatures](crate::Signature).
//!
//! # Type IDs
//! Each distinct component type is assigned a [`ComponentId`]
//! the first time a registry sees it (or eagerly through
//! [`Builder::register_component`](crate::registry::Builder::register_component)).
//! IDs are assigned by a counter owned by the registry,
//! so two registries may assign different IDs to the same type.
//! IDs are never reused during the lifetime of a registry.
//!
//! The ID space is bounded by [`MAX_COMPONENTS`](crate::signature::MAX_COMPONENTS),
//! the width of a signature.

use std::any::{self, TypeId};
use std::collections::HashMap;
use std::fmt;

use crate::signature::MAX_COMPONENTS;
use crate::Error;

/// A type that can be attached to entities.
///
/// Use the [`#[comp]`](crate::comp) attribute to implement this trait.
pub trait Component: 'static {}

/// The registry-local identifier of a component type.
///
/// This is the bit index of the component in a [`Signature`](crate::Signature).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentId(pub(crate) usize);

impl ComponentId {
    /// The bit index of this component type.
    pub fn index(self) -> usize { self.0 }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "component#{}", self.0) }
}

/// Assigns [`ComponentId`]s to component types.
#[derive(Debug)]
pub struct ComponentTypes {
    ids:   HashMap<TypeId, ComponentId>,
    names: Vec<&'static str>,
    limit: usize,
}

impl Default for ComponentTypes {
    fn default() -> Self { Self::with_limit(MAX_COMPONENTS) }
}

impl ComponentTypes {
    /// Creates an empty table accepting at most `limit` distinct types.
    ///
    /// # Panics
    /// Panics if `limit` exceeds [`MAX_COMPONENTS`].
    pub fn with_limit(limit: usize) -> Self {
        assert!(
            limit <= MAX_COMPONENTS,
            "component limit {limit} exceeds the signature width {MAX_COMPONENTS}"
        );
        Self { ids: HashMap::new(), names: Vec::new(), limit }
    }

    /// Returns the ID of `C` if it has been registered.
    pub fn get<C: Component>(&self) -> Option<ComponentId> {
        self.ids.get(&TypeId::of::<C>()).copied()
    }

    /// Returns the ID of `C`, assigning the next ID if it is seen for the first time.
    pub fn register<C: Component>(&mut self) -> Result<ComponentId, Error> {
        if let Some(&id) = self.ids.get(&TypeId::of::<C>()) {
            return Ok(id);
        }

        let name = any::type_name::<C>();
        if self.names.len() >= self.limit {
            return Err(Error::ComponentLimit { limit: self.limit, name });
        }

        let id = ComponentId(self.names.len());
        self.ids.insert(TypeId::of::<C>(), id);
        self.names.push(name);
        log::trace!("Assigned {id} to component type {name}");
        Ok(id)
    }

    /// Like [`register`](Self::register), but treats an exhausted ID space as a fatal error.
    ///
    /// This is the lazy path taken when a component is first used on an entity.
    pub(crate) fn register_or_panic<C: Component>(&mut self) -> ComponentId {
        match self.register::<C>() {
            Ok(id) => id,
            Err(err) => panic!("{err}; register component types through the builder at startup"),
        }
    }

    /// The type name of a registered component.
    pub fn name(&self, id: ComponentId) -> &'static str {
        self.names.get(id.0).copied().unwrap_or("<unregistered>")
    }

    /// The number of registered component types.
    pub fn len(&self) -> usize { self.names.len() }

    /// Whether no component types have been registered.
    pub fn is_empty(&self) -> bool { self.names.is_empty() }

    /// The maximum number of distinct component types.
    pub fn limit(&self) -> usize { self.limit }
}

#[cfg(test)]
mod tests {
    use super::ComponentTypes;
    use crate::test_util::{Position, Velocity};
    use crate::Error;

    #[test]
    fn test_ids_are_sequential_and_stable() {
        let mut types = ComponentTypes::default();

        assert_eq!(types.get::<Position>(), None);
        let position = types.register::<Position>().expect("limit not reached");
        let velocity = types.register::<Velocity>().expect("limit not reached");
        assert_eq!(position.index(), 0);
        assert_eq!(velocity.index(), 1);

        assert_eq!(types.register::<Position>().expect("already registered"), position);
        assert_eq!(types.get::<Velocity>(), Some(velocity));
        assert!(types.name(position).ends_with("Position"));
    }

    #[test]
    fn test_limit() {
        let mut types = ComponentTypes::with_limit(1);
        assert_eq!(types.limit(), 1);
        types.register::<Position>().expect("limit not reached");

        match types.register::<Velocity>() {
            Err(Error::ComponentLimit { limit: 1, name }) => assert!(name.ends_with("Velocity")),
            other => panic!("unexpected result {other:?}"),
        }
        assert_eq!(types.len(), 1);
    }

    #[test]
    #[should_panic = "exceeds the signature width"]
    fn test_limit_above_width() { ComponentTypes::with_limit(crate::signature::MAX_COMPONENTS + 1); }
}
