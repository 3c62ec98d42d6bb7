//! Reference scenario validator.
//!
//! Registers the built-in reference catalog from `tests/fixtures/` and checks
//! that the library classifies the reference models as expected:
//! - the two valid models produce no violations
//! - each invalid model produces exactly the expected violation codes
//! - specializing the generic cell-migration model yields the CPM model, and
//!   an unrelated target is refused without touching the model

use multicell_schema::{
    specialize, CatalogConfig, Kind, ModelInstance, SpecializationError, TypeCatalog, Validator,
};
use serde_json::Value;

use crate::report::{ConformanceReport, TestResult};
use crate::tests::fixtures;

/// Expected violation codes per reference model.
const EXPECTATIONS: &[(&str, &str, &[&str])] = &[
    ("demo", fixtures::MODEL_DEMO, &[]),
    ("cell_migration_cpm", fixtures::MODEL_CELL_MIGRATION_CPM, &[]),
    ("unknown_type", fixtures::MODEL_UNKNOWN_TYPE, &["unknown_type"]),
    (
        "invalid_containment",
        fixtures::MODEL_INVALID_CONTAINMENT,
        &["invalid_containment"],
    ),
    (
        "dangling_participant",
        fixtures::MODEL_DANGLING_PARTICIPANT,
        &["dangling_reference"],
    ),
    (
        "invalid_participation",
        fixtures::MODEL_INVALID_PARTICIPATION,
        &["invalid_participation"],
    ),
];

/// Runs every reference check.
pub fn validate() -> ConformanceReport {
    let mut report = ConformanceReport::new();

    let Some(catalog) = reference_catalog(&mut report) else {
        return report;
    };
    for (name, source, expected) in EXPECTATIONS {
        run_model(&catalog, name, source, expected, &mut report);
    }
    run_specialization(&catalog, &mut report);

    report
}

/// Builds the reference catalog, or records why it could not be built.
pub fn reference_catalog(report: &mut ConformanceReport) -> Option<TypeCatalog> {
    let validator = "reference/catalog";
    let mut documents = Vec::new();
    for (kind, source) in [
        (Kind::Object, fixtures::REFERENCE_OBJECT_TYPES),
        (Kind::Process, fixtures::REFERENCE_PROCESS_TYPES),
    ] {
        match serde_json::from_str::<Vec<Value>>(source) {
            Ok(list) => documents.extend(list.into_iter().map(|d| (kind, d))),
            Err(e) => {
                report.push(TestResult::fail(
                    validator,
                    format!("{} fixture is not a JSON array: {}", kind, e),
                ));
                return None;
            }
        }
    }

    let mut catalog = TypeCatalog::with_config(CatalogConfig::default());
    let failures: Vec<String> = catalog
        .register_documents(documents, false)
        .into_iter()
        .filter_map(Result::err)
        .map(|e| e.to_string())
        .collect();
    if failures.is_empty() {
        report.push(TestResult::pass(
            validator,
            format!("{} reference types registered", catalog.len()),
        ));
        Some(catalog)
    } else {
        report.push(TestResult::fail_with_details(
            validator,
            "Reference catalog did not register cleanly",
            failures,
        ));
        None
    }
}

fn run_model(
    catalog: &TypeCatalog,
    name: &str,
    source: &str,
    expected: &[&str],
    report: &mut ConformanceReport,
) {
    let validator = format!("reference/models/{}", name);
    let document: Value = match serde_json::from_str(source) {
        Ok(v) => v,
        Err(e) => {
            report.push(TestResult::fail(validator, format!("Fixture is not JSON: {}", e)));
            return;
        }
    };

    let violations = Validator::new(catalog)
        .validate_document(&document)
        .err()
        .unwrap_or_default();
    let codes: Vec<&str> = violations.iter().map(|v| v.code()).collect();
    if codes == expected {
        report.push(TestResult::pass(
            validator,
            format!("Classified as expected ({} violation(s))", codes.len()),
        ));
    } else {
        report.push(TestResult::fail_with_details(
            validator,
            format!("Expected {:?}, found {:?}", expected, codes),
            violations.iter().map(ToString::to_string).collect(),
        ));
    }
}

fn run_specialization(catalog: &TypeCatalog, report: &mut ConformanceReport) {
    let validator = "reference/specialize";
    let specialized: ModelInstance = match serde_json::from_str(fixtures::MODEL_CELL_MIGRATION_CPM) {
        Ok(m) => m,
        Err(e) => {
            report.push(TestResult::fail(validator, format!("Fixture is not a model: {}", e)));
            return;
        }
    };
    let mut model = specialized.clone();
    if let Some(cell) = model.objects.get_mut("single_cell") {
        cell.type_name = "Cell".to_owned();
    }

    let untouched = model.clone();
    match specialize(catalog, &mut model, Kind::Object, "single_cell", "Field") {
        Err(SpecializationError::NotASubtype { .. }) if model == untouched => {}
        other => {
            report.push(TestResult::fail(
                validator,
                format!("Specializing Cell to Field should be refused, got {:?}", other),
            ));
            return;
        }
    }

    match specialize(catalog, &mut model, Kind::Object, "single_cell", "CellCPM") {
        Ok(()) if model == specialized => report.push(TestResult::pass(
            validator,
            "Cell specializes to CellCPM and is refused as Field",
        )),
        Ok(()) => report.push(TestResult::fail(
            validator,
            "Specialized model differs from the CPM fixture",
        )),
        Err(e) => report.push(TestResult::fail(validator, e.to_string())),
    }
}
