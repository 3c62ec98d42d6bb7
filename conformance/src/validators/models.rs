//! Model document validator.
//!
//! Validates every model file below a directory against a loaded catalog.
//! One result per file; a failing file lists each violation as a detail line.

use std::path::Path;

use anyhow::Result;
use multicell_schema::{TypeCatalog, Validator};

use crate::loader;
use crate::report::{ConformanceReport, TestResult};

/// Validates every `*.json` model below `dir`.
///
/// # Errors
///
/// Returns an error if the directory cannot be walked or a file cannot be
/// read or parsed.
pub fn validate(catalog: &TypeCatalog, dir: &Path) -> Result<ConformanceReport> {
    let mut report = ConformanceReport::new();
    let validator = Validator::new(catalog);

    for model in loader::load_models(dir)? {
        let name = format!("models/{}", model.stem());
        match validator.validate_document(&model.document) {
            Ok(()) => report.push(TestResult::pass(
                name,
                format!("{} is valid", model.path.display()),
            )),
            Err(violations) => report.push(TestResult::fail_with_details(
                name,
                format!(
                    "{} has {} violation(s)",
                    model.path.display(),
                    violations.len()
                ),
                violations.iter().map(ToString::to_string).collect(),
            )),
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use multicell_schema::ObjectType;
    use std::fs;

    #[test]
    fn each_model_gets_one_result() {
        let mut catalog = TypeCatalog::new();
        catalog
            .register(ObjectType::new("Tissue").contains(["Cell"]), false)
            .unwrap();
        catalog.register(ObjectType::new("Cell"), false).unwrap();
        catalog.register(ObjectType::new("Field"), false).unwrap();

        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("good.json"),
            r#"{"id": "good", "objects": {"t": {"type": "Tissue", "contained_objects": ["c"]}, "c": {"type": "Cell"}}}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("bad.json"),
            r#"{"id": "bad", "objects": {"t": {"type": "Tissue", "contained_objects": ["f"]}, "f": {"type": "Field"}}}"#,
        )
        .unwrap();

        let report = validate(&catalog, dir.path()).unwrap();
        assert_eq!(report.results.len(), 2);
        assert_eq!(report.results[0].validator, "models/bad");
        assert!(report.results[0].is_failure());
        assert_eq!(
            report.results[0].details,
            ["object 't' (Tissue) may not contain 'f' (Field)"]
        );
        assert!(!report.results[1].is_failure());
    }
}
