//! Reference catalog and model fixtures.
//!
//! Each constant holds a JSON document. The catalog fixtures are arrays of
//! type definitions; the model fixtures are complete model documents, two
//! valid and four each carrying exactly one kind of problem.

mod catalog;
mod models;

pub use catalog::{REFERENCE_OBJECT_TYPES, REFERENCE_PROCESS_TYPES};
pub use models::{
    MODEL_CELL_MIGRATION_CPM, MODEL_DANGLING_PARTICIPANT, MODEL_DEMO, MODEL_INVALID_CONTAINMENT,
    MODEL_INVALID_PARTICIPATION, MODEL_UNKNOWN_TYPE,
};
