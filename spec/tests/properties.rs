//! End-to-end behaviour of the catalog, validator and specializer on the
//! Cell / Tissue / Division reference scenario.

use multicell_schema::{
    specialize, validate, InheritanceError, Kind, ModelInstance, ObjectInstance, ObjectType,
    ProcessInstance, ProcessType, RegistrationError, SpecializationError, TypeCatalog,
    TypeDefinition, Violation,
};

fn catalog() -> TypeCatalog {
    let mut catalog = TypeCatalog::new();
    let results = catalog.register_all(
        vec![
            TypeDefinition::from(ObjectType::new("StemCell").inherits(["Cell"])),
            ObjectType::new("Cell").into(),
            ObjectType::new("Field").into(),
            ObjectType::new("Tissue").contains(["Cell"]).into(),
            ProcessType::new("Division").participants(["Cell"]).into(),
        ],
        false,
    );
    assert!(results.iter().all(Result::is_ok), "{:?}", results);
    catalog
}

fn tissue_model(cell_type: &str) -> ModelInstance {
    let mut model = ModelInstance::new("tissue_model");
    model
        .objects
        .insert("tissue1".into(), ObjectInstance::new("Tissue").containing(["cellA"]));
    model.objects.insert("cellA".into(), ObjectInstance::new(cell_type));
    model
}

#[test]
fn validation_is_idempotent() {
    let catalog = catalog();
    let model = tissue_model("Field");
    let first = validate(&catalog, &model);
    let second = validate(&catalog, &model);
    assert!(first.is_err());
    assert_eq!(first, second);
}

#[test]
fn a_type_is_compatible_with_itself_but_not_its_own_ancestor() {
    let catalog = catalog();
    for name in ["Cell", "StemCell", "Tissue"] {
        assert!(!catalog.ancestors(name, Kind::Object).unwrap().contains(name));
        assert!(catalog.is_subtype_compatible(name, name, Kind::Object).unwrap());
    }
}

#[test]
fn ancestry_is_transitive() {
    let mut catalog = TypeCatalog::new();
    catalog.register(ObjectType::new("A"), false).unwrap();
    catalog.register(ObjectType::new("B").inherits(["A"]), false).unwrap();
    catalog.register(ObjectType::new("C").inherits(["B"]), false).unwrap();
    assert!(catalog.ancestors("C", Kind::Object).unwrap().contains("A"));
}

#[test]
fn cyclic_inheritance_is_rejected_for_either_member() {
    let mut catalog = TypeCatalog::new();
    catalog.register(ObjectType::new("A").inherits(["B"]), false).unwrap();
    catalog.register(ObjectType::new("B").inherits(["A"]), false).unwrap();
    for name in ["A", "B"] {
        assert!(matches!(
            catalog.ancestors(name, Kind::Object),
            Err(InheritanceError::CyclicInheritance { .. })
        ));
    }
}

#[test]
fn containment_of_declared_type_is_valid() {
    assert_eq!(validate(&catalog(), &tissue_model("Cell")), Ok(()));
}

#[test]
fn containment_of_unrelated_type_yields_one_violation() {
    assert_eq!(
        validate(&catalog(), &tissue_model("Field")),
        Err(vec![Violation::InvalidContainment {
            parent: "tissue1".into(),
            child: "cellA".into(),
            parent_type: "Tissue".into(),
            child_type: "Field".into(),
        }])
    );
}

#[test]
fn containment_accepts_subtypes() {
    assert_eq!(validate(&catalog(), &tissue_model("StemCell")), Ok(()));
}

#[test]
fn participation_accepts_subtypes_and_rejects_unrelated_types() {
    let catalog = catalog();
    let mut model = tissue_model("StemCell");
    model.objects.insert("fieldX".into(), ObjectInstance::new("Field"));
    model
        .processes
        .insert("div1".into(), ProcessInstance::new("Division").participants(["cellA"]));
    assert_eq!(validate(&catalog, &model), Ok(()));

    model
        .processes
        .insert("div1".into(), ProcessInstance::new("Division").participants(["fieldX"]));
    let violations = validate(&catalog, &model).unwrap_err();
    assert_eq!(violations.len(), 1);
    assert!(matches!(
        &violations[0],
        Violation::InvalidParticipation { object, .. } if object == "fieldX"
    ));
}

#[test]
fn specialization_narrows_only_the_type() {
    let catalog = catalog();
    let mut model = tissue_model("Cell");
    specialize(&catalog, &mut model, Kind::Object, "cellA", "StemCell").unwrap();

    let mut expected = tissue_model("Cell");
    expected.objects.get_mut("cellA").unwrap().type_name = "StemCell".into();
    assert_eq!(model, expected);
}

#[test]
fn failed_specialization_leaves_model_byte_identical() {
    let catalog = catalog();
    let mut model = tissue_model("Cell");
    let before = serde_json::to_vec(&model).unwrap();

    let err = specialize(&catalog, &mut model, Kind::Object, "cellA", "Field").unwrap_err();
    assert_eq!(
        err,
        SpecializationError::NotASubtype {
            current: "Cell".into(),
            requested: "Field".into(),
        }
    );
    assert_eq!(serde_json::to_vec(&model).unwrap(), before);
}

#[test]
fn duplicate_registration_requires_overwrite() {
    let mut catalog = catalog();
    let err = catalog
        .register(ObjectType::new("Field").contains(["Cell"]), false)
        .unwrap_err();
    assert!(matches!(err, RegistrationError::DuplicateType { .. }));

    catalog
        .register(ObjectType::new("Field").contains(["Cell"]), true)
        .unwrap();
    match catalog.get("Field", Kind::Object) {
        Some(TypeDefinition::Object(field)) => {
            assert_eq!(field.contained_object_types, ["Cell"]);
        }
        other => panic!("expected the newer Field definition, got {:?}", other),
    }
}

#[test]
fn unknown_parent_is_a_hard_error() {
    let mut catalog = catalog();
    catalog
        .register(ObjectType::new("Neuron").inherits(["Axon"]), false)
        .unwrap();
    assert_eq!(
        catalog.ancestors("Neuron", Kind::Object),
        Err(InheritanceError::UnknownParentType {
            kind: Kind::Object,
            name: "Neuron".into(),
            parent: "Axon".into(),
        })
    );
}
