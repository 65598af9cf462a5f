/// Implements [`Component`](crate::comp::Component) for the applied type.
/// This macro does not modify the input.
///
/// # Options
/// ## `sparsec_as($path)`
/// Refers to the runtime crate by `$path` instead of `::sparsec`.
///
/// # Example
/// ```
/// use sparsec::comp;
///
/// #[comp]
/// #[derive(Debug, PartialEq)]
/// struct Health(u32);
///
/// #[comp]
/// struct Layer<const N: usize>;
///
/// static_assertions::assert_impl_all!(Health: comp::Component);
/// static_assertions::assert_impl_all!(Layer<3>: comp::Component);
///
/// let mut registry = sparsec::Registry::new();
/// let entity = registry.create_entity();
/// registry.add_component(entity, Health(10));
/// assert_eq!(registry.get_component::<Health>(entity), &Health(10));
/// ```
#[doc(inline)]
pub use sparsec_codegen::comp;

/// Implements [`Event`](crate::event::Event) for the applied type.
/// This macro does not modify the input.
///
/// # Options
/// ## `sparsec_as($path)`
/// Refers to the runtime crate by `$path` instead of `::sparsec`.
///
/// # Example
/// ```
/// use sparsec::EventBus;
///
/// #[sparsec::event]
/// struct Damage(u32);
///
/// let mut bus = EventBus::<u32>::new();
/// bus.subscribe(|event: &mut Damage, total: &mut u32, _: &EventBus<u32>| *total += event.0);
///
/// let mut total = 0;
/// bus.emit(Damage(3), &mut total);
/// bus.emit(Damage(4), &mut total);
/// assert_eq!(total, 7);
/// ```
#[doc(inline)]
pub use sparsec_codegen::event;

/// Implements [`System`](crate::system::System) for the applied type.
/// This macro does not modify the input.
///
/// # Options
/// ## `require($($ty),*)`
/// Declares the component types the system requires.
/// Can be applied multiple times.
/// A system without required components is interested in every entity.
///
/// ## `sparsec_as($path)`
/// Refers to the runtime crate by `$path` instead of `::sparsec`.
///
/// # Example
/// ```
/// #[sparsec::comp]
/// struct Position(f32);
/// #[sparsec::comp]
/// struct Velocity(f32);
///
/// #[sparsec::system(require(Position, Velocity))]
/// struct Movement;
///
/// let mut registry = sparsec::Registry::new();
/// registry.add_system(Movement);
///
/// let entity = registry.create_entity();
/// registry.add_component(entity, Position(0.0));
/// registry.add_component(entity, Velocity(1.0));
/// registry.update();
///
/// assert_eq!(registry.system_entities::<Movement>(), &[entity]);
/// ```
#[doc(inline)]
pub use sparsec_codegen::system;
