//! Inheritance resolution over the per-kind parent graph.
//!
//! The graph maps each registered type name to its declared parents. Ancestor
//! sets are the transitive closure of those edges, computed by depth-first
//! search. A node met again while it is still on the current path is a cycle;
//! a node reached twice through different parents (a diamond) is not.
//!
//! Results are memoized per type name. The memo is only valid for the graph
//! it was filled from, so the catalog clears it on every registration.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::error::InheritanceError;
use crate::model::Kind;

/// Parent lists keyed by type name, for a single kind.
pub(crate) type ParentGraph = BTreeMap<String, Vec<String>>;

/// Memoized ancestor sets for both kinds.
#[derive(Debug, Default)]
pub(crate) struct AncestorMemo {
    objects: HashMap<String, BTreeSet<String>>,
    processes: HashMap<String, BTreeSet<String>>,
}

impl AncestorMemo {
    pub(crate) fn get(&self, kind: Kind, name: &str) -> Option<&BTreeSet<String>> {
        match kind {
            Kind::Object => self.objects.get(name),
            Kind::Process => self.processes.get(name),
        }
    }

    pub(crate) fn for_kind(&mut self, kind: Kind) -> &mut HashMap<String, BTreeSet<String>> {
        match kind {
            Kind::Object => &mut self.objects,
            Kind::Process => &mut self.processes,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.objects.clear();
        self.processes.clear();
    }
}

/// Computes the ancestor set of `name` in `graph`, filling `memo` with every
/// fully resolved type met on the way.
///
/// # Errors
///
/// - [`InheritanceError::UnknownType`] if `name` is not in the graph.
/// - [`InheritanceError::UnknownParentType`] if any reachable type names a parent
///   outside the graph.
/// - [`InheritanceError::CyclicInheritance`] if the search loops back onto its path.
pub(crate) fn resolve(
    graph: &ParentGraph,
    kind: Kind,
    name: &str,
    memo: &mut HashMap<String, BTreeSet<String>>,
) -> Result<BTreeSet<String>, InheritanceError> {
    if !graph.contains_key(name) {
        return Err(InheritanceError::UnknownType {
            kind,
            name: name.to_owned(),
        });
    }
    let mut path = Vec::new();
    visit(graph, kind, name, &mut path, memo)
}

fn visit(
    graph: &ParentGraph,
    kind: Kind,
    name: &str,
    path: &mut Vec<String>,
    memo: &mut HashMap<String, BTreeSet<String>>,
) -> Result<BTreeSet<String>, InheritanceError> {
    if let Some(done) = memo.get(name) {
        return Ok(done.clone());
    }
    if let Some(start) = path.iter().position(|p| p == name) {
        let mut cycle = path[start..].to_vec();
        cycle.push(name.to_owned());
        return Err(InheritanceError::CyclicInheritance { kind, path: cycle });
    }

    let parents = graph.get(name).map(Vec::as_slice).unwrap_or_default();
    path.push(name.to_owned());

    let mut ancestors = BTreeSet::new();
    for parent in parents {
        if !graph.contains_key(parent) {
            return Err(InheritanceError::UnknownParentType {
                kind,
                name: name.to_owned(),
                parent: parent.clone(),
            });
        }
        let inherited = visit(graph, kind, parent, path, memo)?;
        ancestors.insert(parent.clone());
        ancestors.extend(inherited);
    }

    path.pop();
    memo.insert(name.to_owned(), ancestors.clone());
    Ok(ancestors)
}
