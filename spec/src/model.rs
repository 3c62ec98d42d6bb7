//! Core data model: type definitions and model instances.
//!
//! Type definitions are tagged variants ([`TypeDefinition::Object`] and
//! [`TypeDefinition::Process`]) that share a [`TypeHeader`]. Model instances
//! are plain documents keyed by instance name; both instance maps are ordered
//! so that every traversal over a model is deterministic.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Opaque attribute mapping (attribute name → JSON fragment).
pub type Attributes = Map<String, Value>;

/// The two categories of types held by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// Things: cells, fields, spaces.
    Object,
    /// Interactions acting on objects: growth, diffusion, forces.
    Process,
}

impl Kind {
    /// Both kinds, objects first.
    pub const ALL: [Kind; 2] = [Kind::Object, Kind::Process];

    /// Singular name used in messages (`"object"` / `"process"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Object => "object",
            Kind::Process => "process",
        }
    }

    /// Key of the instance map inside a model document (`"objects"` / `"processes"`).
    #[must_use]
    pub fn category(self) -> &'static str {
        match self {
            Kind::Object => "objects",
            Kind::Process => "processes",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields shared by object and process type definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeHeader {
    /// Unique type name; stored under the `type` key in documents.
    #[serde(rename = "type")]
    pub name: String,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ordered parent type names. A bare string is accepted for a single parent.
    #[serde(default, deserialize_with = "one_or_many")]
    pub inherits_from: Vec<String>,
    /// Attribute schema fragments. Not interpreted by the catalog.
    #[serde(default)]
    pub attributes: Attributes,
}

impl TypeHeader {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            inherits_from: Vec::new(),
            attributes: Attributes::new(),
        }
    }
}

/// An object type: something that can be instantiated and can contain other objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectType {
    /// Name, parents and attributes.
    #[serde(flatten)]
    pub header: TypeHeader,
    /// Object types an instance of this type may directly contain.
    #[serde(default)]
    pub contained_object_types: Vec<String>,
    /// Opaque boundary-condition fragments.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub boundary_conditions: Attributes,
}

impl ObjectType {
    /// A root object type with no parents and no containment rule.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            header: TypeHeader::new(name),
            contained_object_types: Vec::new(),
            boundary_conditions: Attributes::new(),
        }
    }

    /// Sets the parent types.
    #[must_use]
    pub fn inherits<I, S>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.header.inherits_from = parents.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the object types this type may contain.
    #[must_use]
    pub fn contains<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.contained_object_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Adds one attribute schema fragment.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, schema: Value) -> Self {
        self.header.attributes.insert(name.into(), schema);
        self
    }
}

/// A process type: an interaction in which objects participate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessType {
    /// Name, parents and attributes.
    #[serde(flatten)]
    pub header: TypeHeader,
    /// Object types allowed to participate in this process.
    #[serde(default, alias = "participating_objects")]
    pub participating_object_types: Vec<String>,
    /// Opaque dynamics description.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub dynamics: Attributes,
}

impl ProcessType {
    /// A root process type with no parents and no participation rule.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            header: TypeHeader::new(name),
            participating_object_types: Vec::new(),
            dynamics: Attributes::new(),
        }
    }

    /// Sets the parent types.
    #[must_use]
    pub fn inherits<I, S>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.header.inherits_from = parents.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the object types allowed to participate.
    #[must_use]
    pub fn participants<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.participating_object_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Adds one attribute schema fragment.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, schema: Value) -> Self {
        self.header.attributes.insert(name.into(), schema);
        self
    }
}

/// A registered type definition of either kind.
///
/// Serializes untagged: the kind is implied by where a document lives
/// (object directory vs. process directory), not by a field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TypeDefinition {
    /// An object type.
    Object(ObjectType),
    /// A process type.
    Process(ProcessType),
}

impl TypeDefinition {
    /// Decodes a raw JSON document as a definition of the given kind.
    ///
    /// # Errors
    ///
    /// Returns the decoder error if the document does not have the shape of
    /// the requested kind.
    pub fn from_value(kind: Kind, document: Value) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            Kind::Object => TypeDefinition::Object(serde_json::from_value(document)?),
            Kind::Process => TypeDefinition::Process(serde_json::from_value(document)?),
        })
    }

    /// Which kind this definition is.
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            TypeDefinition::Object(_) => Kind::Object,
            TypeDefinition::Process(_) => Kind::Process,
        }
    }

    /// The shared header.
    #[must_use]
    pub fn header(&self) -> &TypeHeader {
        match self {
            TypeDefinition::Object(o) => &o.header,
            TypeDefinition::Process(p) => &p.header,
        }
    }

    /// The type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.header().name
    }

    /// Declared parent type names.
    #[must_use]
    pub fn inherits_from(&self) -> &[String] {
        &self.header().inherits_from
    }

    /// The constraint list: contained object types for objects, participating
    /// object types for processes.
    #[must_use]
    pub fn allowed_types(&self) -> &[String] {
        match self {
            TypeDefinition::Object(o) => &o.contained_object_types,
            TypeDefinition::Process(p) => &p.participating_object_types,
        }
    }
}

impl From<ObjectType> for TypeDefinition {
    fn from(value: ObjectType) -> Self {
        TypeDefinition::Object(value)
    }
}

impl From<ProcessType> for TypeDefinition {
    fn from(value: ProcessType) -> Self {
        TypeDefinition::Process(value)
    }
}

/// An object instance inside a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectInstance {
    /// Declared object type name.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Instance attribute values.
    #[serde(default)]
    pub attributes: Attributes,
    /// Instance boundary conditions.
    #[serde(default)]
    pub boundary_conditions: Attributes,
    /// Names of directly contained object instances.
    #[serde(default)]
    pub contained_objects: Vec<String>,
}

impl ObjectInstance {
    /// An instance of `type_name` with no attributes and no children.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            attributes: Attributes::new(),
            boundary_conditions: Attributes::new(),
            contained_objects: Vec::new(),
        }
    }

    /// Sets the contained object instance names.
    #[must_use]
    pub fn containing<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.contained_objects = children.into_iter().map(Into::into).collect();
        self
    }

    /// Sets one attribute value.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    /// Sets one boundary condition.
    #[must_use]
    pub fn with_boundary_condition(mut self, name: impl Into<String>, value: Value) -> Self {
        self.boundary_conditions.insert(name.into(), value);
        self
    }
}

/// A process instance inside a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessInstance {
    /// Declared process type name.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Instance attribute values.
    #[serde(default)]
    pub attributes: Attributes,
    /// Names of participating object instances.
    #[serde(default, deserialize_with = "one_or_many")]
    pub participating_objects: Vec<String>,
}

impl ProcessInstance {
    /// An instance of `type_name` with no attributes and no participants.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            attributes: Attributes::new(),
            participating_objects: Vec::new(),
        }
    }

    /// Sets the participating object instance names.
    #[must_use]
    pub fn participants<I, S>(mut self, objects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.participating_objects = objects.into_iter().map(Into::into).collect();
        self
    }

    /// Sets one attribute value.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }
}

/// A complete model document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInstance {
    /// Model identifier.
    #[serde(default)]
    pub id: String,
    /// Human-readable model name.
    #[serde(default)]
    pub name: String,
    /// Object instances by name.
    #[serde(default)]
    pub objects: BTreeMap<String, ObjectInstance>,
    /// Process instances by name.
    #[serde(default)]
    pub processes: BTreeMap<String, ProcessInstance>,
}

impl ModelInstance {
    /// An empty model whose id and name are both `name`.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            objects: BTreeMap::new(),
            processes: BTreeMap::new(),
        }
    }

    /// Declared type of the named instance in the given category.
    #[must_use]
    pub fn instance_type(&self, kind: Kind, name: &str) -> Option<&str> {
        match kind {
            Kind::Object => self.objects.get(name).map(|o| o.type_name.as_str()),
            Kind::Process => self.processes.get(name).map(|p| p.type_name.as_str()),
        }
    }

    /// Whether an instance with this name exists in the given category.
    #[must_use]
    pub fn has_instance(&self, kind: Kind, name: &str) -> bool {
        self.instance_type(kind, name).is_some()
    }

    /// Total number of object and process instances.
    #[must_use]
    pub fn instance_count(&self) -> usize {
        self.objects.len() + self.processes.len()
    }

    pub(crate) fn set_instance_type(&mut self, kind: Kind, name: &str, type_name: &str) -> bool {
        let slot = match kind {
            Kind::Object => self.objects.get_mut(name).map(|o| &mut o.type_name),
            Kind::Process => self.processes.get_mut(name).map(|p| &mut p.type_name),
        };
        match slot {
            Some(slot) => {
                *slot = type_name.to_owned();
                true
            }
            None => false,
        }
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(v) => v,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_type_round_trips_through_type_key() {
        let doc = json!({
            "type": "StemCell",
            "inherits_from": ["Cell"],
            "attributes": {"volume": {"type": "number"}},
            "contained_object_types": []
        });
        let def = TypeDefinition::from_value(Kind::Object, doc).unwrap();
        assert_eq!(def.kind(), Kind::Object);
        assert_eq!(def.name(), "StemCell");
        assert_eq!(def.inherits_from(), ["Cell".to_string()]);
        let back = serde_json::to_value(&def).unwrap();
        assert_eq!(back["type"], "StemCell");
    }

    #[test]
    fn single_parent_string_is_accepted() {
        let doc = json!({"type": "CellCPM", "inherits_from": "Cell"});
        let def = TypeDefinition::from_value(Kind::Object, doc).unwrap();
        assert_eq!(def.inherits_from(), ["Cell".to_string()]);
    }

    #[test]
    fn legacy_participating_objects_key_is_accepted() {
        let doc = json!({"type": "Diffusion", "participating_objects": ["Field"]});
        let def = TypeDefinition::from_value(Kind::Process, doc).unwrap();
        assert_eq!(def.allowed_types(), ["Field".to_string()]);
    }

    #[test]
    fn model_document_defaults_missing_lists() {
        let model: ModelInstance = serde_json::from_value(json!({
            "id": "m1",
            "objects": {"cell": {"type": "Cell"}},
            "processes": {"growth": {"type": "CellGrowth", "participating_objects": "cell"}}
        }))
        .unwrap();
        assert!(model.objects["cell"].contained_objects.is_empty());
        assert_eq!(model.processes["growth"].participating_objects, ["cell"]);
        assert_eq!(model.instance_type(Kind::Process, "growth"), Some("CellGrowth"));
        assert_eq!(model.instance_count(), 2);
    }

    #[test]
    fn set_instance_type_reports_missing_instance() {
        let mut model = ModelInstance::new("m");
        model.objects.insert("a".into(), ObjectInstance::new("Cell"));
        assert!(model.set_instance_type(Kind::Object, "a", "StemCell"));
        assert!(!model.set_instance_type(Kind::Object, "b", "StemCell"));
        assert_eq!(model.objects["a"].type_name, "StemCell");
    }
}
