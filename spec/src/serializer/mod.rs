//! Serializers for model documents.
//!
//! - **DOT** ([`dot`]): Graphviz rendering of a model's instances with
//!   containment and participation edges.

pub mod dot;
