use crate::catalog::TypeCatalog;
use crate::model::{Kind, ModelInstance};

use super::Violation;

/// Checks every participation edge in `model`.
///
/// Processes are visited in name order and participants in name order. Every
/// process whose type declares no participation rule yields one
/// [`Violation::UnregisteredProcessType`], whether or not it lists
/// participants.
#[must_use]
pub fn check_participation(catalog: &TypeCatalog, model: &ModelInstance) -> Vec<Violation> {
    let mut violations = Vec::new();
    for (process, instance) in &model.processes {
        let process_type = &instance.type_name;
        let Some(allowed) = catalog.allowed_participants(process_type) else {
            violations.push(Violation::UnregisteredProcessType {
                instance: process.clone(),
                type_name: process_type.clone(),
            });
            continue;
        };

        let mut participants: Vec<&String> = instance.participating_objects.iter().collect();
        participants.sort();
        for object in participants {
            let Some(object_type) = model.instance_type(Kind::Object, object) else {
                violations.push(Violation::DanglingReference {
                    kind: Kind::Process,
                    instance: process.clone(),
                    reference: object.clone(),
                });
                continue;
            };
            if !catalog.contains(object_type, Kind::Object) {
                violations.push(Violation::UnknownType {
                    kind: Kind::Object,
                    instance: object.clone(),
                    type_name: object_type.to_owned(),
                });
                continue;
            }
            match catalog.is_compatible_with_any(object_type, allowed, Kind::Object) {
                Ok(true) => {}
                Ok(false) => violations.push(Violation::InvalidParticipation {
                    process: process.clone(),
                    object: object.clone(),
                    process_type: process_type.clone(),
                    object_type: object_type.to_owned(),
                }),
                Err(error) => violations.push(Violation::BrokenInheritance {
                    instance: object.clone(),
                    error,
                }),
            }
        }
    }
    violations
}
