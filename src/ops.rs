//! Tree mutation operations over a [`Schema`].
//!
//! Operating on an id that is not present in the tree is not an error: the
//! mutating operations return `false` and leave the schema untouched, and
//! lookups return `None`. The editor layer relies on this fire-and-forget
//! contract during rapid interaction, so none of these functions panic or
//! propagate errors.
//!
//! Observed schemas are at most two levels deep (root nodes and their direct
//! children), but every algorithm here recurses and tolerates arbitrary
//! nesting.

use crate::schema::{Node, NodeId, NodePatch, Schema, WidgetKind};

impl Schema {
    /// Appends a node to the root sequence.
    pub fn insert_root(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Appends a node to the children of the container with the given id,
    /// wherever it sits in the tree. Returns `false` (no-op) when the id is
    /// missing or names a non-container node.
    pub fn insert_into_container(&mut self, container_id: &NodeId, node: Node) -> bool {
        match find_mut(&mut self.nodes, container_id) {
            Some(target) => match target.children_mut() {
                Some(children) => {
                    children.push(node);
                    true
                }
                None => false,
            },
            None => false,
        }
    }

    /// Shallow-merges a patch into the node with the given id. Returns
    /// whether a node was found and patched.
    pub fn update_node(&mut self, id: &NodeId, patch: &NodePatch) -> bool {
        match find_mut(&mut self.nodes, id) {
            Some(node) => {
                patch.apply_to(node);
                true
            }
            None => false,
        }
    }

    /// Removes the node with the given id at any depth, including from
    /// containers' child lists. Returns whether a node was removed.
    pub fn remove_node(&mut self, id: &NodeId) -> bool {
        remove_in(&mut self.nodes, id)
    }

    /// Depth-first search: root sequence order, each node's children before
    /// the next sibling.
    pub fn find_node(&self, id: &NodeId) -> Option<&Node> {
        find_in(&self.nodes, id)
    }

    pub fn find_node_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        find_mut(&mut self.nodes, id)
    }

    /// Collects all nodes of the given kind, in tree order.
    pub fn nodes_of_kind(&self, kind: WidgetKind) -> Vec<&Node> {
        let mut found = Vec::new();
        collect_kind(&self.nodes, kind, &mut found);
        found
    }

    /// Moves a root node from one position to another; the drag-and-drop
    /// commit. Out-of-range indices are a no-op.
    pub fn reorder_root(&mut self, from: usize, to: usize) -> bool {
        if from >= self.nodes.len() || to >= self.nodes.len() {
            return false;
        }
        let node = self.nodes.remove(from);
        self.nodes.insert(to, node);
        true
    }
}

fn find_in<'a>(nodes: &'a [Node], id: &NodeId) -> Option<&'a Node> {
    for node in nodes {
        if node.id == *id {
            return Some(node);
        }
        if let Some(children) = node.children() {
            if let Some(found) = find_in(children, id) {
                return Some(found);
            }
        }
    }
    None
}

fn find_mut<'a>(nodes: &'a mut [Node], id: &NodeId) -> Option<&'a mut Node> {
    for node in nodes {
        if node.id == *id {
            return Some(node);
        }
        if let Some(children) = node.children_mut() {
            if let Some(found) = find_mut(children, id) {
                return Some(found);
            }
        }
    }
    None
}

fn remove_in(nodes: &mut Vec<Node>, id: &NodeId) -> bool {
    if let Some(position) = nodes.iter().position(|n| n.id == *id) {
        nodes.remove(position);
        return true;
    }
    for node in nodes {
        if let Some(children) = node.children_mut() {
            if remove_in(children, id) {
                return true;
            }
        }
    }
    false
}

fn collect_kind<'a>(nodes: &'a [Node], kind: WidgetKind, found: &mut Vec<&'a Node>) {
    for node in nodes {
        if node.kind() == kind {
            found.push(node);
        }
        if let Some(children) = node.children() {
            collect_kind(children, kind, found);
        }
    }
}
