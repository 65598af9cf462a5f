//! Hooks into the lifecycle work performed by [`Registry::update_with`](crate::Registry::update_with).
//!
//! Tracers are used for testing and profiling.
//! [`Noop`] ignores everything, [`Log`] logs every hook through the `log` facade,
//! and [`Aggregate`] forwards each hook to a tuple of tracers in order.

use crate::Entity;

/// Defines the [`Tracer`] trait and implements it for [`Log`] and [`Aggregate`].
///
/// All hook parameters must be [`Copy`] and [`fmt::Debug`](std::fmt::Debug).
macro_rules! define_tracer {
    (
        $(
            $(#[$meta:meta])*
            fn $name:ident(&self $(, $arg:ident: $arg_ty:ty)* $(,)?);
        )*
    ) => {
        /// Receives the lifecycle events of a flush.
        ///
        /// Every method defaults to a no-op.
        pub trait Tracer {
            $(
                $(#[$meta])*
                #[allow(unused_variables)]
                fn $name(&self, $($arg: $arg_ty),*) {}
            )*
        }

        impl Tracer for Log {
            $(
                fn $name(&self, $($arg: $arg_ty),*) {
                    log::log!(
                        self.0,
                        concat!(stringify!($name), "(", $(stringify!($arg), " = {", stringify!($arg), ":?}, ",)* ")"),
                        $($arg = $arg,)*
                    );
                }
            )*
        }

        impl_tuple_accumulate! {
            @TYPES (T1, T2, T3, T4, T5, T6, T7, T8);
            $(
                @VARS (t1, t2, t3, t4, t5, t6, t7, t8);
                @METHOD {fn $name(&self, $($arg: $arg_ty,)*);}
            )*
        }
    };
}

macro_rules! impl_tuple {
    (
        @TYPES ($($ty:ident),* $(,)?);
        $(
            @VARS ($($vars:ident),* $(,)?);
            @METHOD {fn $name:ident(&self, $($arg:ident: $arg_ty:ty,)*);}
        )*
    ) => {
        impl<$($ty: Tracer),*> Tracer for Aggregate<($($ty,)*)> {
            $(
                fn $name(&self, $($arg: $arg_ty),*) {
                    #[allow(unused_variables)]
                    let args = ($($arg,)*);

                    #[allow(dead_code)]
                    fn call_with_args(tracer: &impl Tracer, ($($arg,)*): ($($arg_ty,)*)) {
                        tracer.$name($($arg),*);
                    }

                    let Aggregate(($($vars,)*)) = self;
                    $(
                        call_with_args($vars, args);
                    )*
                }
            )*
        }
    };
}

macro_rules! impl_tuple_accumulate {
    (@TYPES (); $(@VARS (); @METHOD {$($body:tt)*})*) => {
        impl_tuple! {
            @TYPES ();
            $(
                @VARS ();
                @METHOD {$($body)*}
            )*
        }
    };
    (
        @TYPES ($first_ty:ident $(, $rest_ty:ident)* $(,)?);
        $(
            @VARS ($first_var:ident $(, $rest_var:ident)* $(,)?);
            @METHOD {$($body:tt)*}
        )*
    ) => {
        impl_tuple! {
            @TYPES ($first_ty $(, $rest_ty)*);
            $(
                @VARS ($first_var $(, $rest_var)*);
                @METHOD {$($body)*}
            )*
        }

        impl_tuple_accumulate! {
            @TYPES ($($rest_ty),*);
            $(
                @VARS ($($rest_var),*);
                @METHOD {$($body)*}
            )*
        }
    };
}

define_tracer! {
    /// A flush starts.
    fn start_update(&self);

    /// A flush ends.
    fn end_update(&self);

    /// An entity has been appended to the member list of a system.
    fn admit_entity(&self, entity: Entity, system: &'static str);

    /// An entity has been removed from the member list of a system.
    fn evict_entity(&self, entity: Entity, system: &'static str);

    /// A pending destruction is applied.
    ///
    /// Called before the components of the entity are removed.
    fn destroy_entity(&self, entity: Entity);

    /// The ID of a destroyed entity has been returned to the allocator.
    fn recycle_id(&self, entity: Entity);
}

/// An empty tracer.
pub struct Noop;

impl Tracer for Noop {}

/// Groups multiple tracers into a tuple and dispatches each call to them in serial.
pub struct Aggregate<T>(
    /// A tuple of child tracers to execute in serial.
    pub T,
);

/// A tracer that logs all events.
pub struct Log(
    /// The log level to log events with.
    pub log::Level,
);

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::{Aggregate, Log, Noop, Tracer};
    use crate::Entity;

    #[derive(Default)]
    struct Count(RefCell<Vec<u32>>);

    impl Tracer for Count {
        fn destroy_entity(&self, entity: Entity) { self.0.borrow_mut().push(entity.id()); }
    }

    #[test]
    fn test_aggregate_forwards_in_order() {
        crate::test_util::init();

        let tracer = Aggregate((Count::default(), Noop, Log(log::Level::Trace), Count::default()));
        tracer.start_update();
        tracer.destroy_entity(Entity::from_id(4));
        tracer.destroy_entity(Entity::from_id(2));
        tracer.end_update();

        let Aggregate((first, _, _, last)) = &tracer;
        assert_eq!(*first.0.borrow(), vec![4, 2]);
        assert_eq!(*last.0.borrow(), vec![4, 2]);
    }
}
