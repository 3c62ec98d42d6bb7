//! Structural checking of documents against meta-schema templates.
//!
//! The catalog and the model validator only depend on the
//! [`StructuralChecker`] trait. [`TemplateChecker`] is the built-in
//! implementation: every template is compiled as a JSON Schema with the
//! `jsonschema` crate, and each validation error becomes one
//! [`StructuralError`]. Locations are rendered as `$`-rooted paths
//! (`$.inherits_from[1]`), and an unlisted property is reported at its own
//! path rather than at the enclosing object.

use std::fmt;

use jsonschema::error::ValidationErrorKind;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::model::Kind;

/// One structural mismatch between a document and a template.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StructuralError {
    /// Location inside the document, `$` being the root (e.g. `$.inherits_from[1]`).
    pub path: String,
    /// What is wrong at that location.
    pub message: String,
}

impl StructuralError {
    /// Creates an error at `path`.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for StructuralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Checks a document against a structural template.
pub trait StructuralChecker: fmt::Debug + Send + Sync {
    /// Returns every mismatch found; an empty list means the document conforms.
    fn check(&self, document: &Value, template: &Value) -> Vec<StructuralError>;
}

/// Built-in checker treating templates as JSON Schema documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateChecker;

impl StructuralChecker for TemplateChecker {
    fn check(&self, document: &Value, template: &Value) -> Vec<StructuralError> {
        let validator = match jsonschema::validator_for(template) {
            Ok(validator) => validator,
            Err(e) => return vec![StructuralError::new("$", format!("invalid template: {}", e))],
        };

        let mut errors = Vec::new();
        for error in validator.iter_errors(document) {
            let path = dollar_path(&error.instance_path.to_string());
            match &error.kind {
                ValidationErrorKind::AdditionalProperties { unexpected } => {
                    for key in unexpected {
                        errors.push(StructuralError::new(
                            format!("{}.{}", path, key),
                            "property is not allowed here",
                        ));
                    }
                }
                _ => errors.push(StructuralError::new(path, error.to_string())),
            }
        }
        errors.sort();
        errors.dedup();
        errors
    }
}

/// `/inherits_from/1` becomes `$.inherits_from[1]`.
fn dollar_path(pointer: &str) -> String {
    let mut path = String::from("$");
    for segment in pointer.split('/').skip(1) {
        let segment = segment.replace("~1", "/").replace("~0", "~");
        if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
            path.push_str(&format!("[{}]", segment));
        } else {
            path.push('.');
            path.push_str(&segment);
        }
    }
    path
}

/// The four meta-schema templates used by the catalog and the model validator.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaSchemas {
    /// Template for object type definitions.
    pub object_type: Value,
    /// Template for process type definitions.
    pub process_type: Value,
    /// Template for object instances in a model.
    pub object_instance: Value,
    /// Template for process instances in a model.
    pub process_instance: Value,
}

impl MetaSchemas {
    /// Template for type definitions of `kind`.
    #[must_use]
    pub fn definition(&self, kind: Kind) -> &Value {
        match kind {
            Kind::Object => &self.object_type,
            Kind::Process => &self.process_type,
        }
    }

    /// Template for model instances of `kind`.
    #[must_use]
    pub fn instance(&self, kind: Kind) -> &Value {
        match kind {
            Kind::Object => &self.object_instance,
            Kind::Process => &self.process_instance,
        }
    }
}

impl Default for MetaSchemas {
    fn default() -> Self {
        let name = json!({"type": "string", "minLength": 1});
        let name_set = json!({"type": "array", "items": name, "uniqueItems": true});
        let name_list = json!({"type": ["array", "string"], "items": name});
        let fragment = json!({"type": "object"});
        let description = json!({"type": "string"});

        Self {
            object_type: json!({
                "type": "object",
                "required": ["type"],
                "properties": {
                    "type": name,
                    "description": description,
                    "inherits_from": {"type": ["array", "string"], "items": name, "uniqueItems": true},
                    "attributes": fragment,
                    "contained_object_types": name_set,
                    "boundary_conditions": fragment
                },
                "additionalProperties": false
            }),
            process_type: json!({
                "type": "object",
                "required": ["type"],
                "properties": {
                    "type": name,
                    "description": description,
                    "inherits_from": {"type": ["array", "string"], "items": name, "uniqueItems": true},
                    "attributes": fragment,
                    "participating_object_types": name_set,
                    "participating_objects": name_set,
                    "dynamics": fragment
                },
                "additionalProperties": false
            }),
            object_instance: json!({
                "type": "object",
                "required": ["type"],
                "properties": {
                    "type": name,
                    "attributes": fragment,
                    "boundary_conditions": fragment,
                    "contained_objects": {"type": "array", "items": name}
                },
                "additionalProperties": false
            }),
            process_instance: json!({
                "type": "object",
                "required": ["type"],
                "properties": {
                    "type": name,
                    "attributes": fragment,
                    "participating_objects": name_list
                },
                "additionalProperties": false
            }),
        }
    }
}
