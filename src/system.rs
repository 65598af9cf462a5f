//! Systems are actions performed every frame on the entities that have certain components.
//!
//! A system declares the component types it requires through [`System::require`].
//! After each [`Registry::update`](crate::Registry::update),
//! the system's member list contains exactly the live entities
//! holding all of the required components.
//! A system that requires nothing is handed every entity.
//!
//! Systems do not run themselves.
//! The caller decides the order in which systems run each frame,
//! typically through [`Registry::run_system`](crate::Registry::run_system).

use bitvec::prelude::BitVec;

use crate::comp::{Component, ComponentTypes};
use crate::{Entity, Signature};

#[cfg(test)]
mod tests;

/// A unit of per-frame logic operating on the entities matching its signature.
///
/// Use the [`#[system]`](crate::system) attribute to implement this trait
/// from a list of required components.
pub trait System: 'static {
    /// Declares the required component types.
    ///
    /// Called once when the system is added to a registry.
    fn require(&self, req: &mut Require<'_>);
}

/// Collects the required component types of a system.
pub struct Require<'t> {
    types:     &'t mut ComponentTypes,
    signature: Signature,
}

impl<'t> Require<'t> {
    pub(crate) fn new(types: &'t mut ComponentTypes) -> Self {
        Self { types, signature: Signature::new() }
    }

    /// Requires entities to have a `C` component.
    ///
    /// # Panics
    /// Panics if `C` is a new component type and the component limit has been reached.
    pub fn require_component<C: Component>(&mut self) -> &mut Self {
        let id = self.types.register_or_panic::<C>();
        self.signature.insert(id);
        self
    }

    pub(crate) fn finish(self) -> Signature { self.signature }
}

/// The signature and current members of a system.
#[derive(Debug, Default)]
pub struct SystemBase {
    signature: Signature,
    /// Members in admission order.
    entities:  Vec<Entity>,
    /// Whether each entity ID is in `entities`.
    members:   BitVec,
}

impl SystemBase {
    pub(crate) fn new(signature: Signature) -> Self {
        Self { signature, entities: Vec::new(), members: BitVec::new() }
    }

    /// The component types required by the system.
    pub fn signature(&self) -> &Signature { &self.signature }

    /// The member entities in the order they were admitted.
    pub fn entities(&self) -> &[Entity] { &self.entities }

    /// Whether an entity with the given signature should be a member.
    pub fn is_interested(&self, entity_signature: &Signature) -> bool {
        entity_signature.satisfies(&self.signature)
    }

    /// Whether the entity is currently a member.
    pub fn contains(&self, entity: Entity) -> bool {
        self.members.get(entity.index()).map_or(false, |bit| *bit)
    }

    /// Appends an entity to the member list.
    ///
    /// Returns `false` if the entity is already a member.
    pub(crate) fn add_entity(&mut self, entity: Entity) -> bool {
        if self.contains(entity) {
            return false;
        }

        if self.members.len() <= entity.index() {
            self.members.resize(entity.index() + 1, false);
        }
        self.members.set(entity.index(), true);
        self.entities.push(entity);
        true
    }

    /// Removes an entity from the member list, preserving the order of the other members.
    ///
    /// Returns `false` if the entity was not a member.
    pub(crate) fn remove_entity(&mut self, entity: Entity) -> bool {
        if !self.contains(entity) {
            return false;
        }

        self.members.set(entity.index(), false);
        self.entities.retain(|&member| member != entity);
        true
    }
}
