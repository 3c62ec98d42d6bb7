use crate::catalog::TypeCatalog;
use crate::model::{Kind, ModelInstance};

use super::Violation;

/// Checks every containment edge in `model`.
///
/// Objects are visited in name order and children in name order. An object
/// with children whose type declares no containment rule yields one
/// [`Violation::UnregisteredContainer`] and its children are not inspected.
#[must_use]
pub fn check_containment(catalog: &TypeCatalog, model: &ModelInstance) -> Vec<Violation> {
    let mut violations = Vec::new();
    for (parent, instance) in &model.objects {
        if instance.contained_objects.is_empty() {
            continue;
        }
        let parent_type = &instance.type_name;
        let Some(allowed) = catalog.allowed_containments(parent_type) else {
            violations.push(Violation::UnregisteredContainer {
                instance: parent.clone(),
                type_name: parent_type.clone(),
            });
            continue;
        };

        let mut children: Vec<&String> = instance.contained_objects.iter().collect();
        children.sort();
        for child in children {
            let Some(child_type) = model.instance_type(Kind::Object, child) else {
                violations.push(Violation::DanglingReference {
                    kind: Kind::Object,
                    instance: parent.clone(),
                    reference: child.clone(),
                });
                continue;
            };
            if !catalog.contains(child_type, Kind::Object) {
                violations.push(Violation::UnknownType {
                    kind: Kind::Object,
                    instance: child.clone(),
                    type_name: child_type.to_owned(),
                });
                continue;
            }
            match catalog.is_compatible_with_any(child_type, allowed, Kind::Object) {
                Ok(true) => {}
                Ok(false) => violations.push(Violation::InvalidContainment {
                    parent: parent.clone(),
                    child: child.clone(),
                    parent_type: parent_type.clone(),
                    child_type: child_type.to_owned(),
                }),
                Err(error) => violations.push(Violation::BrokenInheritance {
                    instance: child.clone(),
                    error,
                }),
            }
        }
    }
    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InheritanceError;
    use crate::model::{ObjectInstance, ObjectType};

    fn catalog() -> TypeCatalog {
        let mut catalog = TypeCatalog::new();
        catalog.register(ObjectType::new("Cell"), false).unwrap();
        catalog
            .register(ObjectType::new("StemCell").inherits(["Cell"]), false)
            .unwrap();
        catalog.register(ObjectType::new("Field"), false).unwrap();
        catalog
            .register(ObjectType::new("Tissue").contains(["Cell"]), false)
            .unwrap();
        catalog
    }

    fn tissue_with(child_type: &str) -> ModelInstance {
        let mut model = ModelInstance::new("m");
        model
            .objects
            .insert("tissue1".into(), ObjectInstance::new("Tissue").containing(["cellA"]));
        model.objects.insert("cellA".into(), ObjectInstance::new(child_type));
        model
    }

    #[test]
    fn declared_child_type_is_accepted() {
        assert!(check_containment(&catalog(), &tissue_with("Cell")).is_empty());
    }

    #[test]
    fn subtype_child_is_accepted() {
        assert!(check_containment(&catalog(), &tissue_with("StemCell")).is_empty());
    }

    #[test]
    fn unrelated_child_is_rejected_once() {
        assert_eq!(
            check_containment(&catalog(), &tissue_with("Field")),
            vec![Violation::InvalidContainment {
                parent: "tissue1".into(),
                child: "cellA".into(),
                parent_type: "Tissue".into(),
                child_type: "Field".into(),
            }]
        );
    }

    #[test]
    fn container_without_rule_skips_children() {
        let mut model = ModelInstance::new("m");
        model
            .objects
            .insert("c".into(), ObjectInstance::new("Cell").containing(["ghost", "other"]));
        assert_eq!(
            check_containment(&catalog(), &model),
            vec![Violation::UnregisteredContainer {
                instance: "c".into(),
                type_name: "Cell".into(),
            }]
        );
    }

    #[test]
    fn all_children_are_checked() {
        let mut model = tissue_with("Field");
        if let Some(tissue) = model.objects.get_mut("tissue1") {
            tissue.contained_objects.push("ghost".into());
            tissue.contained_objects.push("cellB".into());
        }
        model.objects.insert("cellB".into(), ObjectInstance::new("Mystery"));
        let codes: Vec<_> = check_containment(&catalog(), &model)
            .iter()
            .map(Violation::code)
            .collect();
        assert_eq!(codes, ["invalid_containment", "unknown_type", "dangling_reference"]);
    }

    #[test]
    fn parent_type_is_not_a_containment_ancestor() {
        // Rules attach to the declared container type only.
        let mut catalog = catalog();
        catalog
            .register(ObjectType::new("Epithelium").inherits(["Tissue"]), false)
            .unwrap();
        let mut model = tissue_with("Cell");
        model.objects.get_mut("tissue1").unwrap().type_name = "Epithelium".into();
        assert_eq!(
            check_containment(&catalog, &model),
            vec![Violation::UnregisteredContainer {
                instance: "tissue1".into(),
                type_name: "Epithelium".into(),
            }]
        );
    }

    #[test]
    fn children_are_reported_in_name_order() {
        let mut model = ModelInstance::new("m");
        model
            .objects
            .insert("tissue1".into(), ObjectInstance::new("Tissue").containing(["zeta", "alpha"]));
        model.objects.insert("zeta".into(), ObjectInstance::new("Field"));
        model.objects.insert("alpha".into(), ObjectInstance::new("Field"));
        let children: Vec<_> = check_containment(&catalog(), &model)
            .into_iter()
            .filter_map(|v| match v {
                Violation::InvalidContainment { child, .. } => Some(child),
                _ => None,
            })
            .collect();
        assert_eq!(children, ["alpha", "zeta"]);
    }

    #[test]
    fn child_with_cyclic_type_is_broken_inheritance() {
        let mut catalog = catalog();
        catalog.register(ObjectType::new("A").inherits(["B"]), false).unwrap();
        catalog.register(ObjectType::new("B").inherits(["A"]), false).unwrap();
        assert_eq!(
            check_containment(&catalog, &tissue_with("A")),
            vec![Violation::BrokenInheritance {
                instance: "cellA".into(),
                error: InheritanceError::CyclicInheritance {
                    kind: Kind::Object,
                    path: vec!["A".into(), "B".into(), "A".into()],
                },
            }]
        );
    }
}
