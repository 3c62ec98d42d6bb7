//! Incremental construction of a [`ModelInstance`].
//!
//! # Examples
//!
//! ```
//! use multicell_schema::{ModelBuilder, ObjectInstance, ProcessInstance};
//!
//! let mut builder = ModelBuilder::new("growth_demo");
//! builder
//!     .add_object("tissue", ObjectInstance::new("Tissue"))
//!     .add_object("cell", ObjectInstance::new("Cell"))
//!     .add_process("growth", ProcessInstance::new("CellGrowth"));
//! builder.link_containment("tissue", "cell").unwrap();
//! builder.link_participation("growth", "cell").unwrap();
//!
//! let model = builder.build();
//! assert_eq!(model.objects["tissue"].contained_objects, ["cell"]);
//! ```

use crate::catalog::TypeCatalog;
use crate::error::{ModelError, SpecializationError};
use crate::model::{Kind, ModelInstance, ObjectInstance, ProcessInstance};
use crate::specialize::specialize;

/// Builds a model one instance or edge at a time.
#[derive(Debug, Clone)]
pub struct ModelBuilder {
    model: ModelInstance,
}

impl ModelBuilder {
    /// Starts an empty model; the id defaults to the name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            model: ModelInstance::new(name),
        }
    }

    /// Overrides the model id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.model.id = id.into();
        self
    }

    /// Adds an object instance, replacing any instance of the same name.
    pub fn add_object(&mut self, name: impl Into<String>, object: ObjectInstance) -> &mut Self {
        self.model.objects.insert(name.into(), object);
        self
    }

    /// Adds a process instance, replacing any instance of the same name.
    pub fn add_process(&mut self, name: impl Into<String>, process: ProcessInstance) -> &mut Self {
        self.model.processes.insert(name.into(), process);
        self
    }

    /// Appends `child` to `parent`'s contained objects.
    ///
    /// The child does not need to exist yet; dangling names are reported by
    /// validation.
    ///
    /// # Errors
    ///
    /// [`ModelError::UnknownInstance`] if there is no object named `parent`.
    pub fn link_containment(&mut self, parent: &str, child: &str) -> Result<&mut Self, ModelError> {
        let object = self
            .model
            .objects
            .get_mut(parent)
            .ok_or_else(|| ModelError::UnknownInstance {
                kind: Kind::Object,
                name: parent.to_owned(),
            })?;
        object.contained_objects.push(child.to_owned());
        Ok(self)
    }

    /// Appends `object` to `process`'s participating objects.
    ///
    /// # Errors
    ///
    /// [`ModelError::UnknownInstance`] if there is no process named `process`.
    pub fn link_participation(&mut self, process: &str, object: &str) -> Result<&mut Self, ModelError> {
        let instance = self
            .model
            .processes
            .get_mut(process)
            .ok_or_else(|| ModelError::UnknownInstance {
                kind: Kind::Process,
                name: process.to_owned(),
            })?;
        instance.participating_objects.push(object.to_owned());
        Ok(self)
    }

    /// Specializes an instance of the model under construction.
    ///
    /// # Errors
    ///
    /// As [`specialize`](crate::specialize::specialize).
    pub fn specialize(
        &mut self,
        catalog: &TypeCatalog,
        kind: Kind,
        name: &str,
        new_type: &str,
    ) -> Result<&mut Self, SpecializationError> {
        specialize(catalog, &mut self.model, kind, name, new_type)?;
        Ok(self)
    }

    /// The model built so far.
    #[must_use]
    pub fn model(&self) -> &ModelInstance {
        &self.model
    }

    /// Finishes the model.
    #[must_use]
    pub fn build(self) -> ModelInstance {
        self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ObjectType;

    #[test]
    fn id_defaults_to_name_and_can_be_overridden() {
        assert_eq!(ModelBuilder::new("demo").model().id, "demo");
        let model = ModelBuilder::new("demo").with_id("demo-1").build();
        assert_eq!(model.id, "demo-1");
        assert_eq!(model.name, "demo");
    }

    #[test]
    fn linking_requires_the_owner() {
        let mut builder = ModelBuilder::new("m");
        builder.add_object("space", ObjectInstance::new("Universe"));
        assert!(builder.link_containment("space", "cells").is_ok());
        assert_eq!(
            builder.link_participation("growth", "cells").unwrap_err(),
            ModelError::UnknownInstance {
                kind: Kind::Process,
                name: "growth".into()
            }
        );
        assert!(builder.link_containment("nowhere", "cells").is_err());
    }

    #[test]
    fn adding_twice_replaces() {
        let mut builder = ModelBuilder::new("m");
        builder
            .add_process("p", ProcessInstance::new("Diffusion").participants(["field"]))
            .add_process("p", ProcessInstance::new("CellGrowth"));
        let model = builder.build();
        assert_eq!(model.processes["p"].type_name, "CellGrowth");
        assert!(model.processes["p"].participating_objects.is_empty());
    }

    #[test]
    fn specialize_through_builder() {
        let mut catalog = TypeCatalog::new();
        catalog.register(ObjectType::new("Cell"), false).unwrap();
        catalog
            .register(ObjectType::new("CellCPM").inherits(["Cell"]), false)
            .unwrap();

        let mut builder = ModelBuilder::new("m");
        builder.add_object("cell", ObjectInstance::new("Cell"));
        builder
            .specialize(&catalog, Kind::Object, "cell", "CellCPM")
            .unwrap();
        assert_eq!(builder.model().objects["cell"].type_name, "CellCPM");
    }
}
