use crate::comp::{Component, ComponentId, ComponentTypes};
use crate::signature::MAX_COMPONENTS;
use crate::storage::DEFAULT_POOL_CAPACITY;
use crate::{Error, Registry, System};

/// A bundle configures and populates a registry.
///
/// Bundles are passed to [`sparsec::new`](crate::new).
pub trait Bundle {
    /// Registers the component types and systems used by this bundle.
    fn register(&self, _builder: &mut Builder) {}

    /// Populates the registry with entities.
    fn populate(&self, _registry: &mut Registry) {}
}

/// This type is used to configure a registry.
pub struct Builder {
    pool_capacity:   usize,
    component_limit: usize,
    components:      Vec<fn(&mut ComponentTypes) -> Result<ComponentId, Error>>,
    systems:         Vec<Box<dyn FnOnce(&mut Registry)>>,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            pool_capacity:   DEFAULT_POOL_CAPACITY,
            component_limit: MAX_COMPONENTS,
            components:      Vec::new(),
            systems:         Vec::new(),
        }
    }
}

impl Builder {
    /// Sets the initial capacity of each component pool.
    pub fn pool_capacity(&mut self, capacity: usize) -> &mut Self {
        self.pool_capacity = capacity;
        self
    }

    /// Limits the number of distinct component types.
    ///
    /// # Panics
    /// Panics if `limit` exceeds [`MAX_COMPONENTS`].
    pub fn component_limit(&mut self, limit: usize) -> &mut Self {
        assert!(
            limit <= MAX_COMPONENTS,
            "component limit {limit} exceeds the signature width {MAX_COMPONENTS}"
        );
        self.component_limit = limit;
        self
    }

    /// Assigns an ID to `C` when the registry is built.
    ///
    /// Component types are registered in the order of the calls,
    /// before any system is added.
    pub fn register_component<C: Component>(&mut self) -> &mut Self {
        self.components.push(ComponentTypes::register::<C>);
        self
    }

    /// Adds a system when the registry is built.
    pub fn add_system<S: System>(&mut self, system: S) -> &mut Self {
        self.systems.push(Box::new(move |registry: &mut Registry| registry.add_system(system)));
        self
    }

    /// Registers the contents of a bundle.
    pub fn bundle(&mut self, bundle: &dyn Bundle) -> &mut Self {
        bundle.register(self);
        self
    }

    /// Builds the registry.
    ///
    /// Returns [`Error::ComponentLimit`] if the registered component types exceed the limit.
    ///
    /// # Panics
    /// Panics if a system requires a component type beyond the limit.
    pub fn build(self) -> Result<Registry, Error> {
        let mut registry =
            Registry::with_config(self.pool_capacity, ComponentTypes::with_limit(self.component_limit));

        for register in self.components {
            register(registry.types_mut())?;
        }

        log::debug!(
            "Building registry with {} component types and {} systems",
            registry.component_types().len(),
            self.systems.len()
        );
        for add_system in self.systems {
            add_system(&mut registry);
        }

        Ok(registry)
    }
}
