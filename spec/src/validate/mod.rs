//! Model validation.
//!
//! [`validate`] runs four phases in a fixed order and returns every problem
//! found rather than stopping at the first:
//!
//! 1. structural check of each instance against its instance template,
//! 2. registration of each declared instance type,
//! 3. containment legality ([`check_containment`]),
//! 4. participation legality ([`check_participation`]).
//!
//! Violations are deduplicated, keeping the first occurrence, so an
//! unregistered child type reported in phase 2 is not repeated in phase 3.
//! Nothing here mutates the model or the catalog.

mod containment;
mod participation;

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

pub use containment::check_containment;
pub use participation::check_participation;

use crate::catalog::TypeCatalog;
use crate::error::InheritanceError;
use crate::model::{Kind, ModelInstance};

/// One problem found in a model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum Violation {
    /// An instance does not match its instance template.
    Structural {
        /// Category of the instance.
        kind: Kind,
        /// Instance name.
        instance: String,
        /// Location inside the instance document.
        path: String,
        /// What is wrong there.
        message: String,
    },
    /// An instance declares a type the catalog does not know.
    UnknownType {
        /// Category of the instance.
        kind: Kind,
        /// Instance name.
        instance: String,
        /// Declared type.
        type_name: String,
    },
    /// An object contains children but its type declares no containment rule.
    UnregisteredContainer {
        /// Container instance name.
        instance: String,
        /// Its declared type.
        type_name: String,
    },
    /// A process has participants but its type declares no participation rule.
    UnregisteredProcessType {
        /// Process instance name.
        instance: String,
        /// Its declared type.
        type_name: String,
    },
    /// A contained or participating name is not an object instance.
    DanglingReference {
        /// Category of the referring instance.
        kind: Kind,
        /// Referring instance name.
        instance: String,
        /// The missing object instance name.
        reference: String,
    },
    /// A child's type is not compatible with any type its parent may contain.
    InvalidContainment {
        /// Container instance name.
        parent: String,
        /// Child instance name.
        child: String,
        /// Container type.
        parent_type: String,
        /// Child type.
        child_type: String,
    },
    /// A participant's type is not compatible with any allowed participant type.
    InvalidParticipation {
        /// Process instance name.
        process: String,
        /// Object instance name.
        object: String,
        /// Process type.
        process_type: String,
        /// Object type.
        object_type: String,
    },
    /// An instance's type is registered but its ancestry cannot be resolved.
    BrokenInheritance {
        /// Instance whose type was being resolved.
        instance: String,
        /// The resolution failure.
        error: InheritanceError,
    },
}

impl Violation {
    /// Stable snake_case code, identical to the serialized `code` tag.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Violation::Structural { .. } => "structural",
            Violation::UnknownType { .. } => "unknown_type",
            Violation::UnregisteredContainer { .. } => "unregistered_container",
            Violation::UnregisteredProcessType { .. } => "unregistered_process_type",
            Violation::DanglingReference { .. } => "dangling_reference",
            Violation::InvalidContainment { .. } => "invalid_containment",
            Violation::InvalidParticipation { .. } => "invalid_participation",
            Violation::BrokenInheritance { .. } => "broken_inheritance",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Structural {
                kind,
                instance,
                path,
                message,
            } => write!(f, "{} instance '{}': {}: {}", kind, instance, path, message),
            Violation::UnknownType {
                kind,
                instance,
                type_name,
            } => write!(
                f,
                "{} instance '{}' has unknown type '{}'",
                kind, instance, type_name
            ),
            Violation::UnregisteredContainer {
                instance,
                type_name,
            } => write!(
                f,
                "object '{}' contains objects but type '{}' declares no contained object types",
                instance, type_name
            ),
            Violation::UnregisteredProcessType {
                instance,
                type_name,
            } => write!(
                f,
                "process '{}' has participants but type '{}' declares no participating object types",
                instance, type_name
            ),
            Violation::DanglingReference {
                kind,
                instance,
                reference,
            } => write!(
                f,
                "{} instance '{}' references missing object '{}'",
                kind, instance, reference
            ),
            Violation::InvalidContainment {
                parent,
                child,
                parent_type,
                child_type,
            } => write!(
                f,
                "object '{}' ({}) may not contain '{}' ({})",
                parent, parent_type, child, child_type
            ),
            Violation::InvalidParticipation {
                process,
                object,
                process_type,
                object_type,
            } => write!(
                f,
                "object '{}' ({}) may not participate in process '{}' ({})",
                object, object_type, process, process_type
            ),
            Violation::BrokenInheritance { instance, error } => {
                write!(f, "instance '{}': {}", instance, error)
            }
        }
    }
}

/// Validates `model` against `catalog`.
///
/// # Errors
///
/// Returns the deduplicated violation list when any phase finds a problem.
pub fn validate(catalog: &TypeCatalog, model: &ModelInstance) -> Result<(), Vec<Violation>> {
    Validator::new(catalog).validate(model)
}

/// A catalog bound for repeated validation.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    catalog: &'a TypeCatalog,
}

impl<'a> Validator<'a> {
    /// Binds a catalog.
    #[must_use]
    pub fn new(catalog: &'a TypeCatalog) -> Self {
        Self { catalog }
    }

    /// The bound catalog.
    #[must_use]
    pub fn catalog(&self) -> &'a TypeCatalog {
        self.catalog
    }

    /// Runs all four phases.
    ///
    /// # Errors
    ///
    /// Returns the deduplicated violation list when any phase finds a problem.
    pub fn validate(&self, model: &ModelInstance) -> Result<(), Vec<Violation>> {
        let mut violations = self.structure(model);
        violations.extend(self.registration(model));
        violations.extend(check_containment(self.catalog, model));
        violations.extend(check_participation(self.catalog, model));
        finish(&model.id, violations)
    }

    /// Validates a raw model document.
    ///
    /// The structural phase runs on the raw instance documents, so properties
    /// that decoding would drop are still reported. A document that cannot be
    /// decoded stops after that phase.
    ///
    /// # Errors
    ///
    /// Returns the deduplicated violation list when any phase finds a problem.
    pub fn validate_document(&self, document: &Value) -> Result<(), Vec<Violation>> {
        let mut violations = Vec::new();
        for kind in Kind::ALL {
            let Some(instances) = document.get(kind.category()).and_then(Value::as_object) else {
                continue;
            };
            for (name, instance) in instances {
                violations.extend(self.structural_violations(kind, name, instance));
            }
        }

        let model: ModelInstance = match serde_json::from_value(document.clone()) {
            Ok(model) => model,
            Err(e) => {
                if violations.is_empty() {
                    violations.push(Violation::Structural {
                        kind: Kind::Object,
                        instance: String::new(),
                        path: "$".to_owned(),
                        message: e.to_string(),
                    });
                }
                return finish("", violations);
            }
        };
        violations.extend(self.registration(&model));
        violations.extend(check_containment(self.catalog, &model));
        violations.extend(check_participation(self.catalog, &model));
        finish(&model.id, violations)
    }

    /// Phase 1: every instance against its instance template.
    #[must_use]
    pub fn structure(&self, model: &ModelInstance) -> Vec<Violation> {
        let mut violations = Vec::new();
        for (name, object) in &model.objects {
            violations.extend(self.typed_structure(Kind::Object, name, object));
        }
        for (name, process) in &model.processes {
            violations.extend(self.typed_structure(Kind::Process, name, process));
        }
        violations
    }

    /// Phase 2: every declared instance type must be registered.
    #[must_use]
    pub fn registration(&self, model: &ModelInstance) -> Vec<Violation> {
        let objects = model
            .objects
            .iter()
            .map(|(name, o)| (Kind::Object, name, &o.type_name));
        let processes = model
            .processes
            .iter()
            .map(|(name, p)| (Kind::Process, name, &p.type_name));
        objects
            .chain(processes)
            .filter(|(kind, _, type_name)| !self.catalog.contains(type_name, *kind))
            .map(|(kind, name, type_name)| Violation::UnknownType {
                kind,
                instance: name.clone(),
                type_name: type_name.clone(),
            })
            .collect()
    }

    fn typed_structure<T: Serialize>(&self, kind: Kind, name: &str, instance: &T) -> Vec<Violation> {
        match serde_json::to_value(instance) {
            Ok(document) => self.structural_violations(kind, name, &document),
            Err(e) => vec![Violation::Structural {
                kind,
                instance: name.to_owned(),
                path: "$".to_owned(),
                message: e.to_string(),
            }],
        }
    }

    fn structural_violations(&self, kind: Kind, name: &str, document: &Value) -> Vec<Violation> {
        self.catalog
            .check_instance(kind, document)
            .into_iter()
            .map(|e| Violation::Structural {
                kind,
                instance: name.to_owned(),
                path: e.path,
                message: e.message,
            })
            .collect()
    }
}

fn finish(model_id: &str, violations: Vec<Violation>) -> Result<(), Vec<Violation>> {
    let violations = dedup(violations);
    debug!(
        target: "multicell::validate",
        model = model_id,
        violations = violations.len(),
        "validated model"
    );
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

fn dedup(violations: Vec<Violation>) -> Vec<Violation> {
    let mut seen = HashSet::new();
    violations
        .into_iter()
        .filter(|v| seen.insert(v.clone()))
        .collect()
}
