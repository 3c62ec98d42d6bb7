//! Graphviz DOT serializer for model instances.
//!
//! Objects are drawn as circles and processes as rectangles, both labelled
//! `name:type`. Participation edges run from the object to the process,
//! dashed and drawn with `dir=back`; containment edges run from parent to
//! child, bold and without an arrowhead.

use crate::model::ModelInstance;

/// Renders `model` as a DOT digraph.
///
/// Nodes and edges follow the model's name order, so the output is stable.
#[must_use]
pub fn to_dot(model: &ModelInstance) -> String {
    let mut out = String::with_capacity(256 + 64 * model.instance_count());

    out.push_str(&format!("digraph {} {{\n", dot_id(graph_name(model))));
    out.push_str("  // Model Graph\n");

    for (name, object) in &model.objects {
        out.push_str(&format!(
            "  {} [label={} shape=circle]\n",
            dot_id(name),
            dot_id(&format!("{}:{}", name, object.type_name))
        ));
    }

    for (name, process) in &model.processes {
        out.push_str(&format!(
            "  {} [label={} shape=rectangle]\n",
            dot_id(name),
            dot_id(&format!("{}:{}", name, process.type_name))
        ));
        for object in &process.participating_objects {
            out.push_str(&format!(
                "  {} -> {} [dir=back style=dashed]\n",
                dot_id(object),
                dot_id(name)
            ));
        }
    }

    for (parent, object) in &model.objects {
        for child in &object.contained_objects {
            out.push_str(&format!(
                "  {} -> {} [arrowhead=none style=bold]\n",
                dot_id(parent),
                dot_id(child)
            ));
        }
    }

    out.push_str("}\n");
    out
}

fn graph_name(model: &ModelInstance) -> &str {
    if model.name.is_empty() {
        &model.id
    } else {
        &model.name
    }
}

fn dot_id(s: &str) -> String {
    let escaped = s.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ObjectInstance, ProcessInstance};

    fn model() -> ModelInstance {
        let mut model = ModelInstance::new("cell_sorting");
        model
            .objects
            .insert("space".into(), ObjectInstance::new("Universe").containing(["cell"]));
        model.objects.insert("cell".into(), ObjectInstance::new("Cell"));
        model
            .processes
            .insert("growth".into(), ProcessInstance::new("CellGrowth").participants(["cell"]));
        model
    }

    #[test]
    fn nodes_carry_name_and_type() {
        let dot = to_dot(&model());
        assert!(dot.starts_with("digraph \"cell_sorting\" {\n"));
        assert!(dot.contains("\"space\" [label=\"space:Universe\" shape=circle]"));
        assert!(dot.contains("\"growth\" [label=\"growth:CellGrowth\" shape=rectangle]"));
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn edges_have_their_styles() {
        let dot = to_dot(&model());
        assert!(dot.contains("\"cell\" -> \"growth\" [dir=back style=dashed]"));
        assert!(dot.contains("\"space\" -> \"cell\" [arrowhead=none style=bold]"));
    }

    #[test]
    fn quotes_in_names_are_escaped() {
        let mut model = ModelInstance::new("m");
        model
            .objects
            .insert("say \"hi\"".into(), ObjectInstance::new("Cell"));
        assert!(to_dot(&model).contains("\"say \\\"hi\\\"\" [label=\"say \\\"hi\\\":Cell\""));
    }

    #[test]
    fn output_is_deterministic() {
        assert_eq!(to_dot(&model()), to_dot(&model()));
    }
}
