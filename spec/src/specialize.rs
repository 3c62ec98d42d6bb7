//! Narrowing an instance's declared type to a registered subtype.

use tracing::debug;

use crate::catalog::TypeCatalog;
use crate::error::SpecializationError;
use crate::model::{Kind, ModelInstance};

/// Replaces the type of instance `name` in the `kind` category with `new_type`.
///
/// Succeeds only if the instance's current type is an ancestor of `new_type`.
/// Every other field of the instance is left as it was. On failure the model
/// is not touched.
///
/// # Errors
///
/// - [`SpecializationError::UnknownInstance`] if there is no such instance.
/// - [`SpecializationError::UnknownType`] if `new_type` is not registered for `kind`.
/// - [`SpecializationError::Inheritance`] if `new_type`'s ancestry cannot be resolved.
/// - [`SpecializationError::NotASubtype`] if `new_type` does not descend from the current type.
pub fn specialize(
    catalog: &TypeCatalog,
    model: &mut ModelInstance,
    kind: Kind,
    name: &str,
    new_type: &str,
) -> Result<(), SpecializationError> {
    let current = model
        .instance_type(kind, name)
        .ok_or_else(|| SpecializationError::UnknownInstance {
            kind,
            name: name.to_owned(),
        })?
        .to_owned();
    if !catalog.contains(new_type, kind) {
        return Err(SpecializationError::UnknownType {
            kind,
            name: new_type.to_owned(),
        });
    }
    if !catalog.inherits_from(new_type, &current, kind)? {
        return Err(SpecializationError::NotASubtype {
            current,
            requested: new_type.to_owned(),
        });
    }

    model.set_instance_type(kind, name, new_type);
    debug!(
        target: "multicell::specialize",
        %kind,
        instance = name,
        from = %current,
        to = new_type,
        "specialized instance"
    );
    Ok(())
}
