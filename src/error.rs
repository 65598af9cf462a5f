//! Recoverable errors.
//!
//! Programmer errors such as reading a component an entity does not have
//! are not represented here; they panic at the call site.

use thiserror::Error;

use crate::Entity;

/// Errors returned by fallible registry operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// More distinct component types were registered than a signature can represent.
    #[error("cannot register component type {name}: the limit of {limit} component types is reached")]
    ComponentLimit {
        /// The configured limit.
        limit: usize,
        /// The type name of the rejected component.
        name:  &'static str,
    },

    /// The tag is already bound to a different entity.
    #[error("tag {tag:?} is already bound to {holder}")]
    TagTaken {
        /// The requested tag.
        tag:    String,
        /// The entity currently holding the tag.
        holder: Entity,
    },

    /// The entity is not allocated in this registry.
    #[error("{0} is not alive")]
    NotAlive(Entity),
}
