//! Type catalog for multicellular simulation models.
//!
//! The `multicell-schema` crate registers **object types** (cells, fields,
//! spaces) and **process types** (growth, diffusion, forces) with multiple
//! inheritance, and checks model documents against them:
//!
//! - which object types may contain which ([`validate::check_containment`]),
//! - which object types may take part in which process ([`validate::check_participation`]),
//! - whether an instance may be narrowed to a subtype ([`specialize`](specialize::specialize)).
//!
//! Compatibility is nominal and covariant: a type may stand in wherever one of
//! its ancestors is allowed, never the reverse.
//!
//! # Entry Point
//!
//! ```
//! use multicell_schema::{validate, ModelInstance, ObjectInstance, ObjectType, TypeCatalog};
//!
//! let mut catalog = TypeCatalog::new();
//! catalog.register(ObjectType::new("Cell"), false).unwrap();
//! catalog.register(ObjectType::new("StemCell").inherits(["Cell"]), false).unwrap();
//! catalog.register(ObjectType::new("Tissue").contains(["Cell"]), false).unwrap();
//!
//! let mut model = ModelInstance::new("demo");
//! model.objects.insert("tissue1".into(), ObjectInstance::new("Tissue").containing(["cellA"]));
//! model.objects.insert("cellA".into(), ObjectInstance::new("StemCell"));
//!
//! assert!(validate(&catalog, &model).is_ok());
//! ```
//!
//! # Serialization
//!
//! ```
//! # use multicell_schema::ModelInstance;
//! let dot = multicell_schema::serializer::dot::to_dot(&ModelInstance::new("demo"));
//! assert!(dot.starts_with("digraph"));
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod builder;
pub mod catalog;
pub mod error;
mod inheritance;
pub mod model;
#[cfg(feature = "serializers")]
pub mod serializer;
pub mod specialize;
pub mod structure;
pub mod validate;

pub use builder::ModelBuilder;
pub use catalog::{CatalogConfig, Registration, RegistrationPolicy, TypeCatalog};
pub use error::{InheritanceError, ModelError, RegistrationError, SpecializationError};
pub use model::{
    Attributes, Kind, ModelInstance, ObjectInstance, ObjectType, ProcessInstance, ProcessType,
    TypeDefinition, TypeHeader,
};
pub use specialize::specialize;
pub use structure::{MetaSchemas, StructuralChecker, StructuralError, TemplateChecker};
pub use validate::{validate, Validator, Violation};
