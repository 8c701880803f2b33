//! Form-data capture and re-hydration: the flat key/value object exchanged
//! with the persistence collaborator when a form is filled in.

use crate::schema::{Node, NodePatch, Schema};
use ahash::AHashMap;

/// Captures the filled-in form as a flat object keyed by each keyed leaf
/// node's business key, in tree order. Containers contribute their children;
/// nodes without a key or without a value are skipped.
pub fn capture(schema: &Schema) -> AHashMap<String, serde_json::Value> {
    let mut data = AHashMap::new();
    capture_nodes(&schema.nodes, &mut data);
    data
}

fn capture_nodes(nodes: &[Node], data: &mut AHashMap<String, serde_json::Value>) {
    for node in nodes {
        if let Some(children) = node.children() {
            capture_nodes(children, data);
            continue;
        }
        if let (Some(key), Some(value)) = (&node.key, &node.value) {
            data.insert(key.clone(), value.clone());
        }
    }
}

/// Re-hydrates a schema from captured form data: every keyed leaf node whose
/// key appears in `data` gets that value written back. Returns how many
/// nodes matched.
pub fn hydrate(schema: &mut Schema, data: &AHashMap<String, serde_json::Value>) -> usize {
    let mut matched = Vec::new();
    collect_matches(&schema.nodes, data, &mut matched);
    let count = matched.len();
    for (id, value) in matched {
        schema.update_node(&id, &NodePatch::value(value));
    }
    count
}

fn collect_matches(
    nodes: &[Node],
    data: &AHashMap<String, serde_json::Value>,
    matched: &mut Vec<(crate::schema::NodeId, serde_json::Value)>,
) {
    for node in nodes {
        if let Some(children) = node.children() {
            collect_matches(children, data, matched);
            continue;
        }
        if let Some(key) = &node.key {
            if let Some(value) = data.get(key) {
                matched.push((node.id.clone(), value.clone()));
            }
        }
    }
}
