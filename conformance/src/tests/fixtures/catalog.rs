//! Reference type definitions.
//!
//! Covers a spatial hierarchy (`Universe` > `MaterialObjectSpace` > `Cell`),
//! a specialized cell (`CellCPM`), a plain `Field`, and four processes.
//! `CellField` inherits from `MaterialObjectSpace` but restates its own
//! containment rule, since rules are not inherited.

/// Object type definitions, listed so that `CellCPM` precedes its parent.
pub const REFERENCE_OBJECT_TYPES: &str = r#"
[
  {
    "type": "Universe",
    "description": "Root container of a simulation.",
    "contained_object_types": ["MaterialObjectSpace", "Field"]
  },
  {
    "type": "MaterialObjectSpace",
    "contained_object_types": ["Cell"]
  },
  {
    "type": "CellField",
    "inherits_from": ["MaterialObjectSpace"],
    "attributes": {"lattice": {"type": "string", "enum": ["square", "hexagonal"]}},
    "contained_object_types": ["Cell"]
  },
  {
    "type": "CellCPM",
    "inherits_from": "Cell",
    "attributes": {"target_volume": {"type": "number"}}
  },
  {
    "type": "Cell",
    "attributes": {"volume": {"type": "number"}}
  },
  {
    "type": "Field",
    "attributes": {"molecular_species": {"type": "array"}},
    "boundary_conditions": {"x": {"type": "string"}}
  }
]
"#;

/// Process type definitions.
pub const REFERENCE_PROCESS_TYPES: &str = r#"
[
  {
    "type": "CellGrowth",
    "participating_object_types": ["Cell"],
    "attributes": {"rate": {"type": "number"}}
  },
  {
    "type": "Diffusion",
    "participating_object_types": ["Field"],
    "dynamics": {"equation": "du/dt = D * laplacian(u)"}
  },
  {
    "type": "VolumeExclusion",
    "participating_object_types": ["Cell"]
  },
  {
    "type": "MotileForce",
    "participating_objects": ["Cell"]
  }
]
"#;
