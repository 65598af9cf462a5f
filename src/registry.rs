//! The registry owns every entity, component, system and index.
//!
//! # Deferred lifecycle
//! Component values and signature bits change immediately,
//! but the member lists of systems only change inside [`Registry::update`].
//! A flush performs the following steps in order:
//!
//! 1. Entities created since the last flush are admitted into every matching system.
//! 2. Admitted entities whose signature changed since the last flush
//!    join the systems they now match and leave the systems they no longer match.
//! 3. Systems added since the last flush are seeded with every matching admitted entity.
//! 4. Pending destructions are applied:
//!    the entity leaves every system, loses all its components, tags and groups,
//!    and its ID is returned to the allocator for reuse.

use std::any::{self, Any, TypeId};
use std::collections::BTreeSet;

use bitvec::prelude::BitVec;
use indexmap::IndexMap;

use crate::comp::{Component, ComponentId, ComponentTypes};
use crate::entity::Allocator;
use crate::index::{Groups, Tags};
use crate::storage::{AnyPool, Pool, DEFAULT_POOL_CAPACITY};
use crate::system::{Require, SystemBase};
use crate::tracer::{self, Tracer};
use crate::{Entity, Error, Signature, System};

mod builder;
pub use builder::{Builder, Bundle};


/// Creates a registry from bundles.
///
/// Each bundle registers its component types and systems first,
/// then each bundle populates the built registry.
pub fn new<'t>(bundles: impl IntoIterator<Item = &'t dyn Bundle> + Copy) -> Result<Registry, Error> {
    let mut builder = Builder::default();

    for bundle in bundles {
        bundle.register(&mut builder);
    }

    let mut registry = builder.build()?;

    for bundle in bundles {
        bundle.populate(&mut registry);
    }

    Ok(registry)
}

/// A system stored in the registry.
struct SystemSlot {
    base:   SystemBase,
    /// `None` while the system is borrowed out by [`Registry::run_system`].
    system: Option<Box<dyn Any>>,
    name:   &'static str,
    /// Whether the system has received the entities admitted before it was added.
    seeded: bool,
}

/// The central store of an ECS.
pub struct Registry {
    pool_capacity: usize,
    types:         ComponentTypes,
    /// Indexed by [`ComponentId`]; a pool is created when its type first stores a value.
    pools:         Vec<Option<Box<dyn AnyPool>>>,
    /// Indexed by entity ID.
    signatures:    Vec<Signature>,
    allocator:     Allocator,
    /// Whether each entity ID has been admitted into the systems.
    admitted:      BitVec,

    to_create:  BTreeSet<Entity>,
    to_destroy: BTreeSet<Entity>,
    /// Admitted entities whose signature changed since the last flush.
    dirty:      BTreeSet<Entity>,

    systems: IndexMap<TypeId, SystemSlot>,
    tags:    Tags,
    groups:  Groups,
}

impl Default for Registry {
    fn default() -> Self { Self::with_config(DEFAULT_POOL_CAPACITY, ComponentTypes::default()) }
}

impl Registry {
    /// Creates an empty registry with the default configuration.
    pub fn new() -> Self { Self::default() }

    /// Creates a [`Builder`] to configure a registry.
    pub fn builder() -> Builder { Builder::default() }

    pub(crate) fn with_config(pool_capacity: usize, types: ComponentTypes) -> Self {
        Self {
            pool_capacity,
            types,
            pools: Vec::new(),
            signatures: Vec::new(),
            allocator: Allocator::default(),
            admitted: BitVec::new(),
            to_create: BTreeSet::new(),
            to_destroy: BTreeSet::new(),
            dirty: BTreeSet::new(),
            systems: IndexMap::new(),
            tags: Tags::default(),
            groups: Groups::default(),
        }
    }

    pub(crate) fn types_mut(&mut self) -> &mut ComponentTypes { &mut self.types }

    fn assert_alive(&self, entity: Entity) {
        assert!(self.allocator.is_live(entity), "{entity} is not alive in this registry");
    }

    fn is_admitted(&self, entity: Entity) -> bool {
        self.admitted.get(entity.index()).map_or(false, |bit| *bit)
    }

    fn set_admitted(&mut self, entity: Entity, value: bool) {
        if self.admitted.len() <= entity.index() {
            self.admitted.resize(entity.index() + 1, false);
        }
        self.admitted.set(entity.index(), value);
    }

    fn mark_dirty(&mut self, entity: Entity) {
        if self.is_admitted(entity) {
            self.dirty.insert(entity);
        }
    }
}

/// Entity lifecycle.
impl Registry {
    /// Allocates a new entity.
    ///
    /// IDs of destroyed entities are reused before new IDs are allocated.
    /// The entity can receive components immediately,
    /// but systems only see it after the next [`update`](Self::update).
    pub fn create_entity(&mut self) -> Entity {
        let entity = self.allocator.allocate();
        if self.signatures.len() <= entity.index() {
            self.signatures.resize(entity.index() + 1, Signature::new());
        }
        self.to_create.insert(entity);

        log::debug!("Created {entity}");
        entity
    }

    /// Queues an entity for destruction at the next [`update`](Self::update).
    ///
    /// Destroying an entity that is not alive or already queued is ignored.
    pub fn destroy_entity(&mut self, entity: Entity) {
        if !self.allocator.is_live(entity) {
            log::warn!("Ignoring destruction of {entity}, which is not alive");
            return;
        }

        if self.to_destroy.insert(entity) {
            log::debug!("Queued destruction of {entity}");
        } else {
            log::warn!("Ignoring duplicate destruction of {entity}");
        }
    }

    /// Whether the entity has been created and its destruction has not been applied yet.
    pub fn is_alive(&self, entity: Entity) -> bool { self.allocator.is_live(entity) }

    /// The number of live entities, including pending creations and destructions.
    pub fn num_entities(&self) -> usize { self.allocator.len() }

    /// Entities created since the last flush, in ascending ID order.
    pub fn pending_creations(&self) -> impl Iterator<Item = Entity> + '_ {
        self.to_create.iter().copied()
    }

    /// Entities queued for destruction, in ascending ID order.
    pub fn pending_destructions(&self) -> impl Iterator<Item = Entity> + '_ {
        self.to_destroy.iter().copied()
    }

    /// The component types currently attached to an entity.
    ///
    /// Entities that are not alive have an empty signature.
    pub fn signature_of(&self, entity: Entity) -> Signature {
        self.signatures.get(entity.index()).copied().unwrap_or_default()
    }

    /// Applies pending creations, membership changes and destructions.
    pub fn update(&mut self) { self.update_with(&tracer::Noop) }

    /// Like [`update`](Self::update), reporting each step to `tracer`.
    pub fn update_with(&mut self, tracer: &impl Tracer) {
        tracer.start_update();
        log::trace!(
            "Flushing {} creations, {} changed entities and {} destructions",
            self.to_create.len(),
            self.dirty.len(),
            self.to_destroy.len()
        );

        for entity in std::mem::take(&mut self.to_create) {
            self.set_admitted(entity, true);
            let signature = self.signature_of(entity);
            for slot in self.systems.values_mut().filter(|slot| slot.seeded) {
                if slot.base.is_interested(&signature) && slot.base.add_entity(entity) {
                    tracer.admit_entity(entity, slot.name);
                }
            }
        }

        for entity in std::mem::take(&mut self.dirty) {
            let signature = self.signature_of(entity);
            for slot in self.systems.values_mut().filter(|slot| slot.seeded) {
                if slot.base.is_interested(&signature) {
                    if slot.base.add_entity(entity) {
                        tracer.admit_entity(entity, slot.name);
                    }
                } else if slot.base.remove_entity(entity) {
                    tracer.evict_entity(entity, slot.name);
                }
            }
        }

        for slot in self.systems.values_mut().filter(|slot| !slot.seeded) {
            log::debug!("Seeding system {}", slot.name);
            for entity in self.allocator.iter_live() {
                let admitted = self.admitted.get(entity.index()).map_or(false, |bit| *bit);
                let signature = self.signatures[entity.index()];
                if admitted && slot.base.is_interested(&signature) && slot.base.add_entity(entity) {
                    tracer.admit_entity(entity, slot.name);
                }
            }
            slot.seeded = true;
        }

        for entity in std::mem::take(&mut self.to_destroy) {
            self.destroy_now(entity, tracer);
        }

        tracer.end_update();
    }

    fn destroy_now(&mut self, entity: Entity, tracer: &impl Tracer) {
        tracer.destroy_entity(entity);

        for slot in self.systems.values_mut() {
            if slot.base.remove_entity(entity) {
                tracer.evict_entity(entity, slot.name);
            }
        }

        self.signatures[entity.index()].clear();
        for pool in self.pools.iter_mut().flatten() {
            pool.remove_entity(entity);
        }
        self.tags.remove(entity);
        self.groups.remove(entity);
        self.set_admitted(entity, false);

        if self.allocator.deallocate(entity) {
            tracer.recycle_id(entity);
        }
        log::debug!("Destroyed {entity}");
    }
}

/// Component access.
impl Registry {
    /// Registers a component type ahead of its first use.
    ///
    /// Returns the existing ID if `C` is already registered.
    pub fn register_component<C: Component>(&mut self) -> Result<ComponentId, Error> {
        self.types.register::<C>()
    }

    /// The ID of a component type, if it has been registered.
    pub fn component_id<C: Component>(&self) -> Option<ComponentId> { self.types.get::<C>() }

    /// The table of registered component types.
    pub fn component_types(&self) -> &ComponentTypes { &self.types }

    /// The pool storing `C`, if any value of `C` has been stored.
    pub fn pool<C: Component>(&self) -> Option<&Pool<C>> {
        let id = self.types.get::<C>()?;
        let pool = self.pools.get(id.index())?.as_deref()?;
        Some(pool.downcast_ref::<C>())
    }

    fn pool_mut_or_insert<C: Component>(&mut self, id: ComponentId) -> &mut Pool<C> {
        if self.pools.len() <= id.index() {
            self.pools.resize_with(id.index() + 1, || None);
        }

        let capacity = self.pool_capacity;
        self.pools[id.index()]
            .get_or_insert_with(|| {
                log::trace!("Creating pool for {}", any::type_name::<C>());
                Box::new(Pool::<C>::with_capacity(capacity))
            })
            .downcast_mut::<C>()
    }

    fn pool_mut<C: Component>(&mut self) -> Option<&mut Pool<C>> {
        let id = self.types.get::<C>()?;
        let pool = self.pools.get_mut(id.index())?.as_deref_mut()?;
        Some(pool.downcast_mut::<C>())
    }

    /// Attaches a component to an entity, replacing the existing value of the same type.
    ///
    /// # Panics
    /// Panics if the entity is not alive,
    /// or if `C` is a new component type and the component limit has been reached.
    pub fn add_component<C: Component>(&mut self, entity: Entity, value: C) {
        self.assert_alive(entity);

        let id = self.types.register_or_panic::<C>();
        let replaced = self.pool_mut_or_insert::<C>(id).set(entity, value).is_some();

        if !replaced {
            self.signatures[entity.index()].insert(id);
            self.mark_dirty(entity);
            log::trace!("Added {} to {entity}", any::type_name::<C>());
        }
    }

    /// Detaches a component from an entity, returning its value.
    ///
    /// Returns `None` if the entity does not have the component.
    pub fn remove_component<C: Component>(&mut self, entity: Entity) -> Option<C> {
        let id = self.types.get::<C>()?;
        let value = self.pool_mut::<C>()?.remove(entity)?;

        self.signatures[entity.index()].remove(id);
        self.mark_dirty(entity);
        log::trace!("Removed {} from {entity}", any::type_name::<C>());
        Some(value)
    }

    /// Whether the entity has a `C` component.
    pub fn has_component<C: Component>(&self, entity: Entity) -> bool {
        match self.types.get::<C>() {
            Some(id) => self.signature_of(entity).contains(id),
            None => false,
        }
    }

    /// Gets the `C` component of an entity.
    ///
    /// # Panics
    /// Panics if the entity does not have a `C` component.
    pub fn get_component<C: Component>(&self, entity: Entity) -> &C {
        match self.try_get_component::<C>(entity) {
            Some(value) => value,
            None => panic!("{entity} does not have a {} component", any::type_name::<C>()),
        }
    }

    /// Gets the `C` component of an entity mutably.
    ///
    /// # Panics
    /// Panics if the entity does not have a `C` component.
    pub fn get_component_mut<C: Component>(&mut self, entity: Entity) -> &mut C {
        match self.try_get_component_mut::<C>(entity) {
            Some(value) => value,
            None => panic!("{entity} does not have a {} component", any::type_name::<C>()),
        }
    }

    /// Gets the `C` component of an entity if it has one.
    pub fn try_get_component<C: Component>(&self, entity: Entity) -> Option<&C> {
        self.pool::<C>()?.get(entity)
    }

    /// Gets the `C` component of an entity mutably if it has one.
    pub fn try_get_component_mut<C: Component>(&mut self, entity: Entity) -> Option<&mut C> {
        self.pool_mut::<C>()?.get_mut(entity)
    }
}

/// System management.
impl Registry {
    /// Adds a system, replacing any existing system of the same type.
    ///
    /// The system receives its matching entities at the next [`update`](Self::update).
    ///
    /// # Panics
    /// Panics if the system requires a new component type beyond the component limit.
    pub fn add_system<S: System>(&mut self, system: S) {
        let mut req = Require::new(&mut self.types);
        system.require(&mut req);
        let signature = req.finish();

        let name = any::type_name::<S>();
        if signature.is_empty() {
            log::debug!("System {name} requires no components and is interested in every entity");
        }

        let slot = SystemSlot {
            base: SystemBase::new(signature),
            system: Some(Box::new(system)),
            name,
            seeded: false,
        };
        if self.systems.insert(TypeId::of::<S>(), slot).is_some() {
            log::warn!("Replaced the existing instance of system {name}");
        } else {
            log::debug!("Added system {name} requiring {signature:?}");
        }
    }

    /// Removes a system, returning it.
    ///
    /// Returns `None` if there is no such system.
    pub fn remove_system<S: System>(&mut self) -> Option<S> {
        let slot = self.systems.shift_remove(&TypeId::of::<S>())?;
        log::debug!("Removed system {}", slot.name);
        let system = slot.system?.downcast::<S>().ok()?;
        Some(*system)
    }

    /// Whether a system of type `S` has been added.
    pub fn has_system<S: System>(&self) -> bool { self.systems.contains_key(&TypeId::of::<S>()) }

    fn system_slot<S: System>(&self) -> &SystemSlot {
        match self.systems.get(&TypeId::of::<S>()) {
            Some(slot) => slot,
            None => panic!("System {} has not been added", any::type_name::<S>()),
        }
    }

    /// Gets the system of type `S`.
    ///
    /// # Panics
    /// Panics if there is no such system or the system is running.
    pub fn get_system<S: System>(&self) -> &S {
        match self.try_get_system::<S>() {
            Some(system) => system,
            None => panic!("System {} has not been added or is running", any::type_name::<S>()),
        }
    }

    /// Gets the system of type `S` mutably.
    ///
    /// # Panics
    /// Panics if there is no such system or the system is running.
    pub fn get_system_mut<S: System>(&mut self) -> &mut S {
        match self.try_get_system_mut::<S>() {
            Some(system) => system,
            None => panic!("System {} has not been added or is running", any::type_name::<S>()),
        }
    }

    /// Gets the system of type `S` if it has been added and is not running.
    pub fn try_get_system<S: System>(&self) -> Option<&S> {
        self.systems.get(&TypeId::of::<S>())?.system.as_ref()?.downcast_ref::<S>()
    }

    /// Gets the system of type `S` mutably if it has been added and is not running.
    pub fn try_get_system_mut<S: System>(&mut self) -> Option<&mut S> {
        self.systems.get_mut(&TypeId::of::<S>())?.system.as_mut()?.downcast_mut::<S>()
    }

    /// The entities currently handed to the system, in admission order.
    ///
    /// # Panics
    /// Panics if there is no such system.
    pub fn system_entities<S: System>(&self) -> &[Entity] { self.system_slot::<S>().base.entities() }

    /// The component types required by the system.
    ///
    /// # Panics
    /// Panics if there is no such system.
    pub fn system_signature<S: System>(&self) -> &Signature {
        self.system_slot::<S>().base.signature()
    }

    /// Runs `f` with the system, a snapshot of its members and the registry.
    ///
    /// The system is taken out of the registry while `f` runs,
    /// so `f` may access components and other systems freely.
    /// If `f` removes or replaces the system, the taken instance is dropped afterwards.
    ///
    /// # Panics
    /// Panics if there is no such system or it is already running.
    pub fn run_system<S: System, R>(
        &mut self,
        f: impl FnOnce(&mut S, &[Entity], &mut Registry) -> R,
    ) -> R {
        let name = any::type_name::<S>();
        let slot = match self.systems.get_mut(&TypeId::of::<S>()) {
            Some(slot) => slot,
            None => panic!("System {name} has not been added"),
        };
        let system = match slot.system.take() {
            Some(system) => system,
            None => panic!("System {name} is already running"),
        };
        let members = slot.base.entities().to_vec();

        let mut system = match system.downcast::<S>() {
            Ok(system) => system,
            Err(_) => panic!("System slot of {name} contains a different type"),
        };

        log::trace!("Running system {name} on {} entities", members.len());
        let ret = f(&mut *system, &members, self);

        match self.systems.get_mut(&TypeId::of::<S>()) {
            Some(slot) if slot.system.is_none() => slot.system = Some(system),
            _ => {
                log::debug!("Dropping the running instance of {name}, which was removed or replaced")
            }
        }

        ret
    }
}

/// Tags and groups.
impl Registry {
    /// Binds a tag to an entity.
    ///
    /// The entity that previously held the tag loses it,
    /// and the previous tag of this entity is released.
    ///
    /// # Panics
    /// Panics if the entity is not alive.
    pub fn tag_entity(&mut self, entity: Entity, tag: &str) {
        self.assert_alive(entity);
        if let Some(previous) = self.tags.insert(entity, tag) {
            log::debug!("Tag {tag:?} moved from {previous} to {entity}");
        }
    }

    /// Binds a tag to an entity unless another entity holds it.
    pub fn try_tag_entity(&mut self, entity: Entity, tag: &str) -> Result<(), Error> {
        if !self.allocator.is_live(entity) {
            return Err(Error::NotAlive(entity));
        }
        self.tags.try_insert(entity, tag)
    }

    /// Whether the entity holds the tag.
    pub fn entity_has_tag(&self, entity: Entity, tag: &str) -> bool { self.tags.has(entity, tag) }

    /// Whether any entity holds the tag.
    pub fn has_tag(&self, tag: &str) -> bool { self.tags.get(tag).is_some() }

    /// The entity holding the tag.
    pub fn get_entity_by_tag(&self, tag: &str) -> Option<Entity> { self.tags.get(tag) }

    /// The tag of an entity.
    pub fn tag_of(&self, entity: Entity) -> Option<&str> { self.tags.tag_of(entity) }

    /// Removes the tag of an entity if it has one.
    pub fn remove_entity_tag(&mut self, entity: Entity) { self.tags.remove(entity); }

    /// The tag index.
    pub fn tags(&self) -> &Tags { &self.tags }

    /// Adds an entity to a group, moving it out of its previous group.
    ///
    /// # Panics
    /// Panics if the entity is not alive.
    pub fn group_entity(&mut self, entity: Entity, group: &str) {
        self.assert_alive(entity);
        self.groups.insert(entity, group);
    }

    /// Whether the entity belongs to the group.
    pub fn entity_belongs_to_group(&self, entity: Entity, group: &str) -> bool {
        self.groups.contains(entity, group)
    }

    /// The members of a group in ascending ID order.
    ///
    /// Unknown groups have no members.
    pub fn get_entities_by_group(&self, group: &str) -> Vec<Entity> {
        self.groups.members(group).collect()
    }

    /// The group of an entity.
    pub fn group_of(&self, entity: Entity) -> Option<&str> { self.groups.group_of(entity) }

    /// Removes an entity from its group if it has one.
    pub fn remove_entity_group(&mut self, entity: Entity) { self.groups.remove(entity); }

    /// The group index.
    pub fn groups(&self) -> &Groups { &self.groups }
}
