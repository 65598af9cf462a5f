use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use indexmap::IndexSet;
use parking_lot::Mutex;

use crate::tracer::Tracer;
use crate::Entity;

/// Records events and ensures that they are in the correct order.
pub struct EventTracer<T: fmt::Debug + Eq + Hash> {
    dependencies: HashMap<T, Vec<T>>,
    seen:         Mutex<IndexSet<T>>,
}

impl<T: fmt::Debug + Eq + Hash> EventTracer<T> {
    /// Creates a new event tracer that ensures `b` happens after `a` for each `(a, b)` input.
    pub fn new(orders: impl IntoIterator<Item = (T, T)>) -> Self {
        let mut dependencies: HashMap<T, Vec<T>> = HashMap::new();
        for (before, after) in orders {
            dependencies.entry(after).or_default().push(before);
        }
        let seen = Mutex::new(IndexSet::new());

        Self { dependencies, seen }
    }

    /// Records that `event` has happened.
    ///
    /// # Panics
    /// Panics if the same `event` was sent twice or a dependency is not satisfied.
    pub fn trace(&self, event: T) {
        let mut seen = self.seen.lock();

        if let Some(deps) = self.dependencies.get(&event) {
            for dep in deps {
                assert!(seen.contains(dep), "{:?} should happen after {:?}", event, dep);
            }
        }

        let (index, inserted) = seen.insert_full(event);
        assert!(
            inserted,
            "{:?} is inserted twice",
            seen.get_index(index).expect("insert_full should return valid index")
        );
    }

    /// Returns the events observed in this tracer.
    pub fn get_events(self) -> Vec<T> {
        let seen = self.seen.into_inner();
        seen.into_iter().collect()
    }
}

/// The hooks of a single flush, as recorded by an [`EventTracer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateEvent {
    Start,
    End,
    Admit(Entity, &'static str),
    Evict(Entity, &'static str),
    Destroy(Entity),
    Recycle(Entity),
}

impl UpdateEvent {
    /// Shortens the system type name to its last path segment.
    fn short(system: &'static str) -> &'static str {
        system.rsplit("::").next().unwrap_or(system)
    }
}

impl Tracer for EventTracer<UpdateEvent> {
    fn start_update(&self) { self.trace(UpdateEvent::Start) }

    fn end_update(&self) { self.trace(UpdateEvent::End) }

    fn admit_entity(&self, entity: Entity, system: &'static str) {
        self.trace(UpdateEvent::Admit(entity, UpdateEvent::short(system)))
    }

    fn evict_entity(&self, entity: Entity, system: &'static str) {
        self.trace(UpdateEvent::Evict(entity, UpdateEvent::short(system)))
    }

    fn destroy_entity(&self, entity: Entity) { self.trace(UpdateEvent::Destroy(entity)) }

    fn recycle_id(&self, entity: Entity) { self.trace(UpdateEvent::Recycle(entity)) }
}
