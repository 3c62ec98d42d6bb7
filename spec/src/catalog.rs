//! The type catalog: registration, lookup, derived indexes and ancestry.
//!
//! A [`TypeCatalog`] is built once, typically from two directories of type
//! definitions, and then read by the validators. Registration takes
//! `&mut self`; every read, including memoized ancestor resolution, takes
//! `&self`, so a finished catalog can be shared between threads.
//!
//! # Examples
//!
//! ```
//! use multicell_schema::{Kind, ObjectType, TypeCatalog};
//!
//! let mut catalog = TypeCatalog::new();
//! catalog.register(ObjectType::new("Cell"), false).unwrap();
//! catalog.register(ObjectType::new("StemCell").inherits(["Cell"]), false).unwrap();
//!
//! let ancestors = catalog.ancestors("StemCell", Kind::Object).unwrap();
//! assert!(ancestors.contains("Cell"));
//! assert!(catalog.is_subtype_compatible("StemCell", "Cell", Kind::Object).unwrap());
//! ```

use std::collections::{BTreeMap, BTreeSet};

use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{InheritanceError, RegistrationError};
use crate::inheritance::{self, AncestorMemo, ParentGraph};
use crate::model::{Kind, ObjectType, ProcessType, TypeDefinition};
use crate::structure::{MetaSchemas, StructuralChecker, StructuralError, TemplateChecker};

/// What to do with a definition that fails its structural check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegistrationPolicy {
    /// Reject the definition.
    #[default]
    Strict,
    /// Register it anyway and return the errors as warnings.
    Lenient,
}

/// Catalog configuration.
#[derive(Debug, Clone, Default)]
pub struct CatalogConfig {
    /// Structural failure policy.
    pub policy: RegistrationPolicy,
    /// Templates for definitions and instances.
    pub meta_schemas: MetaSchemas,
}

impl CatalogConfig {
    /// Default templates with the lenient policy.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            policy: RegistrationPolicy::Lenient,
            ..Self::default()
        }
    }
}

/// Outcome of a successful registration.
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    /// Kind of the registered type.
    pub kind: Kind,
    /// Registered name.
    pub name: String,
    /// Whether an existing definition was replaced.
    pub replaced: bool,
    /// Structural errors tolerated under [`RegistrationPolicy::Lenient`].
    pub warnings: Vec<StructuralError>,
}

impl Registration {
    /// True when the definition passed its structural check.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Registry of object and process type definitions.
#[derive(Debug)]
pub struct TypeCatalog {
    config: CatalogConfig,
    checker: Box<dyn StructuralChecker>,
    objects: BTreeMap<String, ObjectType>,
    processes: BTreeMap<String, ProcessType>,
    allowed_containments: BTreeMap<String, BTreeSet<String>>,
    allowed_participants: BTreeMap<String, BTreeSet<String>>,
    object_inheritance: ParentGraph,
    process_inheritance: ParentGraph,
    memo: RwLock<AncestorMemo>,
}

impl Default for TypeCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeCatalog {
    /// An empty catalog with the default (strict) configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CatalogConfig::default())
    }

    /// An empty catalog using the built-in [`TemplateChecker`].
    #[must_use]
    pub fn with_config(config: CatalogConfig) -> Self {
        Self::with_checker(config, TemplateChecker)
    }

    /// An empty catalog using a custom structural checker.
    pub fn with_checker(config: CatalogConfig, checker: impl StructuralChecker + 'static) -> Self {
        Self {
            config,
            checker: Box::new(checker),
            objects: BTreeMap::new(),
            processes: BTreeMap::new(),
            allowed_containments: BTreeMap::new(),
            allowed_participants: BTreeMap::new(),
            object_inheritance: ParentGraph::new(),
            process_inheritance: ParentGraph::new(),
            memo: RwLock::new(AncestorMemo::default()),
        }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    /// Registers a typed definition.
    ///
    /// The definition is serialized and checked against its kind's
    /// meta-schema before it is stored.
    ///
    /// # Errors
    ///
    /// - [`RegistrationError::DuplicateType`] if the name exists and `overwrite` is false.
    /// - [`RegistrationError::Structural`] under the strict policy when the
    ///   structural check fails.
    pub fn register(
        &mut self,
        definition: impl Into<TypeDefinition>,
        overwrite: bool,
    ) -> Result<Registration, RegistrationError> {
        let definition = definition.into();
        let kind = definition.kind();
        let name = definition.name().to_owned();
        self.check_duplicate(kind, &name, overwrite)?;

        let document = serde_json::to_value(&definition).map_err(|e| {
            RegistrationError::Structural {
                kind,
                name: name.clone(),
                errors: vec![StructuralError::new("$", e.to_string())],
            }
        })?;
        let warnings = self.check_structure(kind, &name, &document)?;
        Ok(self.insert(definition, warnings))
    }

    /// Registers a raw JSON definition of the given kind.
    ///
    /// The raw document is checked first, so unknown or misplaced properties
    /// are caught before decoding drops them.
    ///
    /// # Errors
    ///
    /// As [`register`](Self::register); additionally a document that cannot be
    /// decoded is a [`RegistrationError::Structural`] under either policy.
    pub fn register_document(
        &mut self,
        kind: Kind,
        document: Value,
        overwrite: bool,
    ) -> Result<Registration, RegistrationError> {
        let name = document
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();
        self.check_duplicate(kind, &name, overwrite)?;

        let warnings = self.check_structure(kind, &name, &document)?;
        let definition = TypeDefinition::from_value(kind, document).map_err(|e| {
            RegistrationError::Structural {
                kind,
                name: name.clone(),
                errors: vec![StructuralError::new("$", e.to_string())],
            }
        })?;
        Ok(self.insert(definition, warnings))
    }

    /// Registers a batch in two phases: store everything, then resolve the
    /// ancestry of every stored type.
    ///
    /// Forward references inside the batch are therefore legal. A type whose
    /// ancestry cannot be resolved is removed again and its result becomes
    /// [`RegistrationError::Inheritance`]; removal repeats until every
    /// remaining type of the batch resolves. Results are in input order.
    ///
    /// With `overwrite`, an evicted definition that replaced an existing one
    /// puts the previous definition back, so a failed batch never deletes a
    /// type registered before it.
    pub fn register_all<I>(
        &mut self,
        definitions: I,
        overwrite: bool,
    ) -> Vec<Result<Registration, RegistrationError>>
    where
        I: IntoIterator,
        I::Item: Into<TypeDefinition>,
    {
        let mut replaced = Vec::new();
        let mut results: Vec<_> = definitions
            .into_iter()
            .map(|d| {
                let definition = d.into();
                replaced.push(self.replaced_by(definition.kind(), definition.name(), overwrite));
                self.register(definition, overwrite)
            })
            .collect();
        self.evict_unresolved(&mut results, replaced);
        results
    }

    /// Two-phase registration of raw documents; see [`register_all`](Self::register_all).
    pub fn register_documents<I>(
        &mut self,
        documents: I,
        overwrite: bool,
    ) -> Vec<Result<Registration, RegistrationError>>
    where
        I: IntoIterator<Item = (Kind, Value)>,
    {
        let mut replaced = Vec::new();
        let mut results: Vec<_> = documents
            .into_iter()
            .map(|(kind, doc)| {
                let name = doc.get("type").and_then(Value::as_str).unwrap_or_default();
                replaced.push(self.replaced_by(kind, name, overwrite));
                self.register_document(kind, doc, overwrite)
            })
            .collect();
        self.evict_unresolved(&mut results, replaced);
        results
    }

    /// The definition an overwriting registration of `name` would replace.
    fn replaced_by(&self, kind: Kind, name: &str, overwrite: bool) -> Option<TypeDefinition> {
        if overwrite {
            self.get(name, kind)
        } else {
            None
        }
    }

    fn check_duplicate(&self, kind: Kind, name: &str, overwrite: bool) -> Result<(), RegistrationError> {
        if !overwrite && self.contains(name, kind) {
            return Err(RegistrationError::DuplicateType {
                kind,
                name: name.to_owned(),
            });
        }
        Ok(())
    }

    fn check_structure(
        &self,
        kind: Kind,
        name: &str,
        document: &Value,
    ) -> Result<Vec<StructuralError>, RegistrationError> {
        let errors = self
            .checker
            .check(document, self.config.meta_schemas.definition(kind));
        if errors.is_empty() {
            return Ok(errors);
        }
        match self.config.policy {
            RegistrationPolicy::Strict => Err(RegistrationError::Structural {
                kind,
                name: name.to_owned(),
                errors,
            }),
            RegistrationPolicy::Lenient => {
                warn!(
                    target: "multicell::catalog",
                    %kind,
                    name,
                    errors = errors.len(),
                    "registering type despite structural errors"
                );
                Ok(errors)
            }
        }
    }

    fn insert(&mut self, definition: TypeDefinition, warnings: Vec<StructuralError>) -> Registration {
        let kind = definition.kind();
        let name = definition.name().to_owned();
        let replaced = self.remove(kind, &name);

        let parents = definition.inherits_from().to_vec();
        let allowed: BTreeSet<String> = definition.allowed_types().iter().cloned().collect();
        match definition {
            TypeDefinition::Object(object) => {
                if !allowed.is_empty() {
                    self.allowed_containments.insert(name.clone(), allowed);
                }
                self.object_inheritance.insert(name.clone(), parents);
                self.objects.insert(name.clone(), object);
            }
            TypeDefinition::Process(process) => {
                if !allowed.is_empty() {
                    self.allowed_participants.insert(name.clone(), allowed);
                }
                self.process_inheritance.insert(name.clone(), parents);
                self.processes.insert(name.clone(), process);
            }
        }

        debug!(target: "multicell::catalog", %kind, name = %name, replaced, "registered type");
        Registration {
            kind,
            name,
            replaced,
            warnings,
        }
    }

    /// Drops a definition and its index entries; true if one was present.
    fn remove(&mut self, kind: Kind, name: &str) -> bool {
        self.memo.get_mut().clear();
        match kind {
            Kind::Object => {
                self.allowed_containments.remove(name);
                self.object_inheritance.remove(name);
                self.objects.remove(name).is_some()
            }
            Kind::Process => {
                self.allowed_participants.remove(name);
                self.process_inheritance.remove(name);
                self.processes.remove(name).is_some()
            }
        }
    }

    fn evict_unresolved(
        &mut self,
        results: &mut [Result<Registration, RegistrationError>],
        mut replaced: Vec<Option<TypeDefinition>>,
    ) {
        loop {
            let failures: Vec<(usize, InheritanceError)> = results
                .iter()
                .enumerate()
                .filter_map(|(i, r)| {
                    let reg = r.as_ref().ok()?;
                    self.ancestors(&reg.name, reg.kind).err().map(|e| (i, e))
                })
                .collect();
            if failures.is_empty() {
                break;
            }
            for (i, error) in failures {
                if let Ok(reg) = &results[i] {
                    warn!(
                        target: "multicell::catalog",
                        kind = %reg.kind,
                        name = %reg.name,
                        %error,
                        "evicting type with unresolvable inheritance"
                    );
                    let (kind, name) = (reg.kind, reg.name.clone());
                    self.remove(kind, &name);
                    if let Some(previous) = replaced.get_mut(i).and_then(Option::take) {
                        debug!(
                            target: "multicell::catalog",
                            %kind,
                            name = %name,
                            "restoring replaced definition"
                        );
                        self.insert(previous, Vec::new());
                    }
                }
                results[i] = Err(RegistrationError::Inheritance(error));
            }
        }

        // Types outside the batch whose ancestry now runs through an evicted name.
        for kind in [Kind::Object, Kind::Process] {
            for name in self.names(kind) {
                if let Err(error) = self.ancestors(name, kind) {
                    warn!(
                        target: "multicell::catalog",
                        %kind,
                        name,
                        %error,
                        "registered type no longer resolves"
                    );
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    /// A copy of the named definition.
    #[must_use]
    pub fn get(&self, name: &str, kind: Kind) -> Option<TypeDefinition> {
        match kind {
            Kind::Object => self.objects.get(name).cloned().map(TypeDefinition::Object),
            Kind::Process => self.processes.get(name).cloned().map(TypeDefinition::Process),
        }
    }

    /// The named object type.
    #[must_use]
    pub fn object(&self, name: &str) -> Option<&ObjectType> {
        self.objects.get(name)
    }

    /// The named process type.
    #[must_use]
    pub fn process(&self, name: &str) -> Option<&ProcessType> {
        self.processes.get(name)
    }

    /// Whether `name` is registered for `kind`.
    #[must_use]
    pub fn contains(&self, name: &str, kind: Kind) -> bool {
        match kind {
            Kind::Object => self.objects.contains_key(name),
            Kind::Process => self.processes.contains_key(name),
        }
    }

    /// Registered names of `kind`, in sorted order.
    pub fn names(&self, kind: Kind) -> Box<dyn Iterator<Item = &str> + '_> {
        match kind {
            Kind::Object => Box::new(self.objects.keys().map(String::as_str)),
            Kind::Process => Box::new(self.processes.keys().map(String::as_str)),
        }
    }

    /// Number of registered types of both kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len() + self.processes.len()
    }

    /// True when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Object types that instances of `container` may contain, or `None` if
    /// the type declares no containment rule.
    #[must_use]
    pub fn allowed_containments(&self, container: &str) -> Option<&BTreeSet<String>> {
        self.allowed_containments.get(container)
    }

    /// Object types allowed to participate in `process`, or `None` if the
    /// type declares no participation rule.
    #[must_use]
    pub fn allowed_participants(&self, process: &str) -> Option<&BTreeSet<String>> {
        self.allowed_participants.get(process)
    }

    /// Declared parents of `name`.
    #[must_use]
    pub fn parents(&self, name: &str, kind: Kind) -> Option<&[String]> {
        self.inheritance(kind).get(name).map(Vec::as_slice)
    }

    fn inheritance(&self, kind: Kind) -> &ParentGraph {
        match kind {
            Kind::Object => &self.object_inheritance,
            Kind::Process => &self.process_inheritance,
        }
    }

    /// Checks a model instance document against the instance template of `kind`.
    #[must_use]
    pub fn check_instance(&self, kind: Kind, document: &Value) -> Vec<StructuralError> {
        self.checker
            .check(document, self.config.meta_schemas.instance(kind))
    }

    // ------------------------------------------------------------------
    // Ancestry
    // ------------------------------------------------------------------

    /// Transitive closure of `name`'s parents. Never contains `name` itself.
    ///
    /// # Errors
    ///
    /// Returns [`InheritanceError`] if `name` is unknown, if a reachable type
    /// names an unregistered parent, or if the graph has a cycle on the way.
    pub fn ancestors(&self, name: &str, kind: Kind) -> Result<BTreeSet<String>, InheritanceError> {
        if let Some(hit) = self.memo.read().get(kind, name) {
            return Ok(hit.clone());
        }
        let mut memo = self.memo.write();
        inheritance::resolve(self.inheritance(kind), kind, name, memo.for_kind(kind))
    }

    /// `candidate` may stand in for `required`: equal, or `required` is an ancestor.
    ///
    /// # Errors
    ///
    /// Propagates ancestry errors for `candidate` when the names differ.
    pub fn is_subtype_compatible(
        &self,
        candidate: &str,
        required: &str,
        kind: Kind,
    ) -> Result<bool, InheritanceError> {
        if candidate == required {
            return Ok(true);
        }
        Ok(self.ancestors(candidate, kind)?.contains(required))
    }

    /// `candidate` is compatible with at least one member of `allowed`.
    ///
    /// # Errors
    ///
    /// Propagates ancestry errors for `candidate` when it is not itself a member.
    pub fn is_compatible_with_any(
        &self,
        candidate: &str,
        allowed: &BTreeSet<String>,
        kind: Kind,
    ) -> Result<bool, InheritanceError> {
        if allowed.contains(candidate) {
            return Ok(true);
        }
        let ancestors = self.ancestors(candidate, kind)?;
        Ok(ancestors.iter().any(|a| allowed.contains(a)))
    }

    /// `descendant` strictly inherits, directly or not, from `ancestor`.
    ///
    /// # Errors
    ///
    /// Propagates ancestry errors for `descendant`.
    pub fn inherits_from(
        &self,
        descendant: &str,
        ancestor: &str,
        kind: Kind,
    ) -> Result<bool, InheritanceError> {
        Ok(self.ancestors(descendant, kind)?.contains(ancestor))
    }
}
