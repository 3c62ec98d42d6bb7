//! Error types for catalog construction, ancestry resolution, model building
//! and specialization.
//!
//! Model validation does not fail with these: it returns a list of
//! [`Violation`](crate::validate::Violation)s instead.

use serde::Serialize;
use thiserror::Error;

use crate::model::Kind;
use crate::structure::StructuralError;

/// Failure to resolve the ancestor set of a type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error, Serialize)]
pub enum InheritanceError {
    /// The queried type is not registered.
    #[error("unknown {kind} type '{name}'")]
    UnknownType {
        /// Kind that was searched.
        kind: Kind,
        /// Queried type name.
        name: String,
    },

    /// A type on the inheritance path names a parent that is not registered.
    #[error("{kind} type '{name}' inherits from unknown type '{parent}'")]
    UnknownParentType {
        /// Kind of both types.
        kind: Kind,
        /// The type declaring the parent.
        name: String,
        /// The missing parent.
        parent: String,
    },

    /// The inheritance graph loops back onto the current path.
    #[error("cyclic inheritance among {kind} types: {}", .path.join(" -> "))]
    CyclicInheritance {
        /// Kind of the types on the cycle.
        kind: Kind,
        /// The cycle, starting and ending at the same type.
        path: Vec<String>,
    },
}

/// Failure to register a type definition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistrationError {
    /// The name is already registered and overwriting was not requested.
    #[error("{kind} type '{name}' is already registered")]
    DuplicateType {
        /// Kind of the type.
        kind: Kind,
        /// The duplicated name.
        name: String,
    },

    /// The definition does not match its kind's meta-schema.
    #[error("{kind} type '{name}' does not match the {kind} meta-schema ({} error(s))", .errors.len())]
    Structural {
        /// Kind of the type.
        kind: Kind,
        /// Name taken from the document, empty if it had none.
        name: String,
        /// Every mismatch found.
        errors: Vec<StructuralError>,
    },

    /// The definition's inheritance could not be resolved after loading.
    #[error(transparent)]
    Inheritance(#[from] InheritanceError),
}

/// Failure to build or edit a model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The named instance does not exist in the model.
    #[error("no {kind} instance named '{name}'")]
    UnknownInstance {
        /// Category that was searched.
        kind: Kind,
        /// Instance name.
        name: String,
    },
}

/// Failure to specialize an instance's type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecializationError {
    /// The instance does not exist in the chosen category.
    #[error("no {kind} instance named '{name}'")]
    UnknownInstance {
        /// Category that was searched.
        kind: Kind,
        /// Instance name.
        name: String,
    },

    /// The target type is not registered for the category's kind.
    #[error("unknown {kind} type '{name}'")]
    UnknownType {
        /// Kind that was searched.
        kind: Kind,
        /// Target type name.
        name: String,
    },

    /// The target type does not descend from the instance's current type.
    #[error("cannot specialize '{current}' to '{requested}': '{requested}' does not inherit from '{current}'")]
    NotASubtype {
        /// The instance's current type.
        current: String,
        /// The requested type.
        requested: String,
    },

    /// The target type's ancestry could not be resolved.
    #[error(transparent)]
    Inheritance(#[from] InheritanceError),
}
