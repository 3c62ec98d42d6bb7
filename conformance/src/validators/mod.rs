//! Conformance validators: catalog loading, model documents, and the built-in reference scenario.

pub mod catalog;
pub mod models;
pub mod reference;
