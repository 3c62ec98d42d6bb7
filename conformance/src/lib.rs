//! Conformance runner for multicell type catalogs and models.
//!
//! Loads object and process type definitions from disk into a
//! [`TypeCatalog`](multicell_schema::TypeCatalog), then validates every model
//! document in a directory against it. Each definition and each model yields
//! one [`TestResult`].
//!
//! # Conformance Scope
//!
//! | Input | Checks |
//! |-------|--------|
//! | Object / process definitions | meta-schema structure, duplicates, resolvable inheritance |
//! | Model documents | instance structure, registered types, containment, participation |
//! | Built-in reference scenario | expected classification of six reference models, specialization |
//!
//! # Entry Point
//!
//! ```no_run
//! use multicell_conformance::{run_all, SchemaPaths};
//! use multicell_schema::CatalogConfig;
//! use std::path::PathBuf;
//!
//! let paths = SchemaPaths {
//!     objects: PathBuf::from("schema/object"),
//!     processes: PathBuf::from("schema/process"),
//!     models: PathBuf::from("models"),
//! };
//! let report = run_all(&paths, CatalogConfig::default()).expect("Failed to run conformance");
//! assert!(report.all_passed());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod loader;
pub mod report;
pub mod tests;
pub mod validators;

use std::path::PathBuf;

use multicell_schema::CatalogConfig;
use tracing::info;

pub use report::{ConformanceReport, Severity, TestResult};
pub use validators::catalog::load_catalog;

/// Paths required by the conformance runner.
#[derive(Debug, Clone)]
pub struct SchemaPaths {
    /// Directory of object type definitions.
    pub objects: PathBuf,
    /// Directory of process type definitions.
    pub processes: PathBuf,
    /// Directory of model documents.
    pub models: PathBuf,
}

/// Loads the catalog and validates every model, returning the aggregated report.
///
/// Validators are run in this order:
/// 1. Object type definitions
/// 2. Process type definitions
/// 3. Model documents
///
/// # Errors
///
/// Returns an error only if a file system operation fails or a file is not JSON.
pub fn run_all(paths: &SchemaPaths, config: CatalogConfig) -> anyhow::Result<ConformanceReport> {
    let (catalog, mut report) = load_catalog(&paths.objects, &paths.processes, config)?;
    info!(
        target: "multicell::conformance",
        types = catalog.len(),
        rejected = report.failure_count(),
        "catalog loaded"
    );

    if paths.models.is_dir() {
        report.extend(validators::models::validate(&catalog, &paths.models)?);
    } else {
        report.push(TestResult::fail(
            "models",
            format!("{} is not a directory", paths.models.display()),
        ));
    }

    Ok(report)
}

#[cfg(test)]
mod tests_unit {
    use super::*;
    use std::fs;

    #[test]
    fn reference_scenario_passes() {
        let report = validators::reference::validate();
        let failures: Vec<_> = report
            .results
            .iter()
            .filter(|r| r.is_failure())
            .collect();
        assert!(
            failures.is_empty(),
            "Reference scenario failures: {:#?}",
            failures
        );
    }

    #[test]
    fn run_all_over_a_workspace_layout() {
        let root = tempfile::tempdir().unwrap();
        let objects = root.path().join("schema").join("object");
        let processes = root.path().join("schema").join("process");
        let models = root.path().join("models");
        for dir in [&objects, &processes, &models] {
            fs::create_dir_all(dir).unwrap();
        }
        fs::write(objects.join("Cell.json"), "{}").unwrap();
        fs::write(objects.join("Cell2.json"), r#"{"type": "Cell"}"#).unwrap();
        fs::write(
            processes.join("CellGrowth.json"),
            r#"{"participating_object_types": ["Cell"]}"#,
        )
        .unwrap();
        fs::write(
            models.join("growth.json"),
            r#"{"objects": {"c": {"type": "Cell"}}, "processes": {"g": {"type": "CellGrowth", "participating_objects": "c"}}}"#,
        )
        .unwrap();

        let paths = SchemaPaths {
            objects,
            processes,
            models,
        };
        let report = run_all(&paths, CatalogConfig::default()).unwrap();
        // Cell2.json redeclares Cell.
        assert_eq!(report.failure_count(), 1);
        assert_eq!(report.results.len(), 4);
        assert!(report.results[1].message.contains("already registered"));
        assert_eq!(report.results[3].validator, "models/growth");
        assert!(!report.results[3].is_failure());
    }

    #[test]
    fn missing_models_directory_is_a_failure() {
        let root = tempfile::tempdir().unwrap();
        let paths = SchemaPaths {
            objects: root.path().to_path_buf(),
            processes: root.path().to_path_buf(),
            models: root.path().join("absent"),
        };
        let report = run_all(&paths, CatalogConfig::default()).unwrap();
        assert_eq!(report.failure_count(), 1);
        assert_eq!(report.results[0].validator, "models");
    }
}
