//! Reference model documents.

/// Valid model using only generic types. `universe` contains a `CellField`,
/// which is accepted through its `MaterialObjectSpace` parent.
pub const MODEL_DEMO: &str = r#"
{
  "id": "demo",
  "name": "demo",
  "objects": {
    "universe": {"type": "Universe", "contained_objects": ["cell field", "chemical field"]},
    "chemical field": {"type": "Field", "attributes": {"molecular_species": ["X", "Y"]}},
    "cell field": {"type": "CellField", "contained_objects": ["cell"]},
    "cell": {"type": "Cell"}
  },
  "processes": {
    "growth": {"type": "CellGrowth", "participating_objects": "cell"},
    "diffusion": {"type": "Diffusion", "participating_objects": ["chemical field"]},
    "volume exclusion": {"type": "VolumeExclusion", "participating_objects": ["cell"]}
  }
}
"#;

/// Valid model after specializing `single_cell` from `Cell` to `CellCPM`.
pub const MODEL_CELL_MIGRATION_CPM: &str = r#"
{
  "id": "cell_migration",
  "name": "cell_migration",
  "objects": {
    "universe": {"type": "Universe", "contained_objects": ["environment"]},
    "environment": {"type": "MaterialObjectSpace", "contained_objects": ["single_cell"]},
    "single_cell": {"type": "CellCPM", "attributes": {"target_volume": 25}}
  },
  "processes": {
    "motile force": {"type": "MotileForce", "participating_objects": ["single_cell"]}
  }
}
"#;

/// Invalid: an object of an unregistered type.
pub const MODEL_UNKNOWN_TYPE: &str = r#"
{
  "id": "unknown_type",
  "objects": {"universe": {"type": "DoesNotExist"}},
  "processes": {}
}
"#;

/// Invalid: a `CellField` containing a `Field`.
pub const MODEL_INVALID_CONTAINMENT: &str = r#"
{
  "id": "invalid_containment",
  "objects": {
    "cell_field": {"type": "CellField", "contained_objects": ["field"]},
    "field": {"type": "Field"}
  },
  "processes": {}
}
"#;

/// Invalid: a process naming an object that does not exist.
pub const MODEL_DANGLING_PARTICIPANT: &str = r#"
{
  "id": "dangling_participant",
  "objects": {"cell": {"type": "Cell"}},
  "processes": {"growth": {"type": "CellGrowth", "participating_objects": ["cell2"]}}
}
"#;

/// Invalid: a `Cell` taking part in `Diffusion`.
pub const MODEL_INVALID_PARTICIPATION: &str = r#"
{
  "id": "invalid_participation",
  "objects": {"cell": {"type": "Cell"}},
  "processes": {"diffusion": {"type": "Diffusion", "participating_objects": ["cell"]}}
}
"#;
