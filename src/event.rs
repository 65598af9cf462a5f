//! Events are typed messages dispatched synchronously to subscribed handlers.
//!
//! An [`EventBus`] holds handlers for any number of event types.
//! [`emit`](EventBus::emit) passes the event to every handler subscribed for its exact type,
//! in subscription order, before returning it to the caller.
//! There is no queue: a handler observes the event the moment it is emitted.
//!
//! Handlers receive a caller-chosen context `Cx` (typically the [`Registry`](crate::Registry))
//! and the bus itself, so a handler may emit further events,
//! including events of the type it is handling.
//! Nested emits are dispatched to completion before the outer handler resumes.
//! Handlers are `Fn` closures and may be re-entered;
//! state they mutate lives behind interior mutability.

use std::any::{self, Any, TypeId};
use std::marker::PhantomData;
use std::rc::Rc;

use indexmap::IndexMap;


/// A type that can be emitted through an [`EventBus`].
///
/// Use the [`#[event]`](crate::event) attribute to implement this trait.
pub trait Event: 'static {}

type Handler<E, Cx> = Box<dyn Fn(&mut E, &mut Cx, &EventBus<Cx>)>;

/// The handlers of a single event type.
struct Handlers<E: Event, Cx: 'static> {
    list: Vec<Handler<E, Cx>>,
}

/// A synchronous publish/subscribe dispatcher keyed by event type.
pub struct EventBus<Cx: 'static> {
    /// Values are `Handlers<E, Cx>` for the `E` identified by the key.
    handlers: IndexMap<TypeId, Box<dyn Any>>,
    _cx:      PhantomData<fn(&mut Cx)>,
}

impl<Cx: 'static> Default for EventBus<Cx> {
    fn default() -> Self { Self { handlers: IndexMap::new(), _cx: PhantomData } }
}

impl<Cx: 'static> EventBus<Cx> {
    /// Creates a bus without subscribers.
    pub fn new() -> Self { Self::default() }

    /// Subscribes `handler` to events of type `E`.
    ///
    /// The handler stays subscribed until [`reset`](Self::reset).
    pub fn subscribe<E: Event>(
        &mut self,
        handler: impl Fn(&mut E, &mut Cx, &EventBus<Cx>) + 'static,
    ) {
        let handlers = self
            .handlers
            .entry(TypeId::of::<E>())
            .or_insert_with(|| Box::new(Handlers::<E, Cx> { list: Vec::new() }));
        let handlers = handlers
            .downcast_mut::<Handlers<E, Cx>>()
            .expect("handler lists are keyed by the type ID of their event");
        handlers.list.push(Box::new(handler));

        log::trace!(
            "Subscribed handler #{} for {}",
            handlers.list.len() - 1,
            any::type_name::<E>()
        );
    }

    /// Subscribes a method of a shared owner to events of type `E`.
    ///
    /// The same owner may subscribe several methods,
    /// and one method may emit an event handled by another.
    /// The bus keeps the owner alive until [`reset`](Self::reset).
    pub fn subscribe_owned<E: Event, O: 'static>(
        &mut self,
        owner: Rc<O>,
        method: fn(&O, &mut E, &mut Cx, &EventBus<Cx>),
    ) {
        self.subscribe(move |event: &mut E, cx: &mut Cx, bus: &EventBus<Cx>| {
            method(&owner, event, cx, bus)
        });
    }

    /// Dispatches `event` to every handler of type `E` in subscription order,
    /// then returns the event with any modifications made by the handlers.
    pub fn emit<E: Event>(&self, mut event: E, cx: &mut Cx) -> E {
        let handlers = match self.handlers.get(&TypeId::of::<E>()) {
            Some(handlers) => handlers
                .downcast_ref::<Handlers<E, Cx>>()
                .expect("handler lists are keyed by the type ID of their event"),
            None => return event,
        };

        log::trace!("Emitting {} to {} handlers", any::type_name::<E>(), handlers.list.len());

        // `&self` keeps the list fixed for the whole dispatch, nested emits included.
        for handler in &handlers.list {
            handler(&mut event, cx, self);
        }

        event
    }

    /// The number of handlers subscribed to `E`.
    pub fn subscriber_count<E: Event>(&self) -> usize {
        self.handlers.get(&TypeId::of::<E>()).map_or(0, |handlers| {
            handlers
                .downcast_ref::<Handlers<E, Cx>>()
                .expect("handler lists are keyed by the type ID of their event")
                .list
                .len()
        })
    }

    /// Whether no handlers are subscribed for any event type.
    pub fn is_empty(&self) -> bool { self.handlers.is_empty() }

    /// Removes every subscription.
    pub fn reset(&mut self) {
        log::debug!("Resetting event bus with {} event types", self.handlers.len());
        self.handlers.clear();
    }
}
