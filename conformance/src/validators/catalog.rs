//! Type catalog validator.
//!
//! Loads the object and process definition directories into a fresh
//! [`TypeCatalog`] with two-phase registration and reports one result per
//! definition file:
//! - Pass: registered cleanly
//! - Warning: registered despite structural errors (lenient policy)
//! - Failure: rejected (duplicate, structural, or unresolvable inheritance)

use std::path::Path;

use anyhow::Result;
use multicell_schema::{CatalogConfig, Kind, Registration, RegistrationError, TypeCatalog};

use crate::loader::{self, LoadedDocument};
use crate::report::{ConformanceReport, TestResult};

/// Builds a catalog from the two definition directories.
///
/// Objects are registered before processes. The returned catalog holds every
/// definition that registered successfully.
///
/// # Errors
///
/// Returns an error if either directory cannot be read or a file is not a
/// JSON object.
pub fn load_catalog(
    objects: &Path,
    processes: &Path,
    config: CatalogConfig,
) -> Result<(TypeCatalog, ConformanceReport)> {
    let mut catalog = TypeCatalog::with_config(config);
    let mut report = ConformanceReport::new();
    for (kind, dir) in [(Kind::Object, objects), (Kind::Process, processes)] {
        let documents = loader::load_definitions(dir)?;
        let results = catalog.register_documents(
            documents.iter().map(|d| (kind, d.document.clone())),
            false,
        );
        for (document, result) in documents.iter().zip(results) {
            report.push(describe(kind, document, result));
        }
    }
    Ok((catalog, report))
}

fn describe(
    kind: Kind,
    document: &LoadedDocument,
    result: Result<Registration, RegistrationError>,
) -> TestResult {
    let name = document.document["type"].as_str().unwrap_or_default();
    let validator = format!("catalog/{}/{}", kind.category(), name);
    let source = document.path.display();
    match result {
        Ok(registration) if registration.is_clean() => {
            TestResult::pass(validator, format!("registered from {}", source))
        }
        Ok(registration) => TestResult::warn_with_details(
            validator,
            format!(
                "registered from {} with {} structural error(s)",
                source,
                registration.warnings.len()
            ),
            registration.warnings.iter().map(ToString::to_string).collect(),
        ),
        Err(RegistrationError::Structural { errors, .. }) => TestResult::fail_with_details(
            validator,
            format!("{} does not match the {} meta-schema", source, kind),
            errors.iter().map(ToString::to_string).collect(),
        ),
        Err(error) => TestResult::fail(validator, format!("{}: {}", source, error)),
    }
}
