//! Built-in test data for the reference conformance checks.

pub mod fixtures;
