//! Snapshot-based undo/redo over the whole schema, and the `Designer`
//! editing façade built on top of it.

use crate::formula;
use crate::schema::{Node, NodeId, NodePatch, Schema};

/// The undo/redo stacks. Every mutation pushes a full snapshot of the
/// current schema onto the undo stack and clears the redo stack; whole
/// snapshots are cheap at the schema sizes a designer produces, so there is
/// no structural sharing.
#[derive(Debug, Clone, Default)]
pub struct History {
    undo_stack: Vec<Schema>,
    redo_stack: Vec<Schema>,
    current: Schema,
}

impl History {
    pub fn new(initial: Schema) -> Self {
        History {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            current: initial,
        }
    }

    pub fn current(&self) -> &Schema {
        &self.current
    }

    /// Applies a mutation as one undoable transaction.
    pub fn apply<F>(&mut self, op: F)
    where
        F: FnOnce(&mut Schema),
    {
        self.undo_stack.push(self.current.clone());
        self.redo_stack.clear();
        op(&mut self.current);
    }

    /// Steps back one snapshot. Returns `false` when there is nothing to
    /// undo.
    pub fn undo(&mut self) -> bool {
        match self.undo_stack.pop() {
            Some(previous) => {
                self.redo_stack
                    .push(std::mem::replace(&mut self.current, previous));
                true
            }
            None => false,
        }
    }

    /// Steps forward one snapshot. Returns `false` when there is nothing to
    /// redo.
    pub fn redo(&mut self) -> bool {
        match self.redo_stack.pop() {
            Some(next) => {
                self.undo_stack
                    .push(std::mem::replace(&mut self.current, next));
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}

/// The form designer's editing session: a history-tracked schema plus the
/// currently selected node.
///
/// Every editor verb is a single history transaction, and any transaction
/// that can change a value-bearing field ends with a formula recompute so
/// Formula nodes stay consistent. Selection is inspection state, not a
/// mutation: it never touches the history stacks.
#[derive(Debug, Default)]
pub struct Designer {
    history: History,
    selected: Option<NodeId>,
}

impl Designer {
    pub fn new(schema: Schema) -> Self {
        Designer {
            history: History::new(schema),
            selected: None,
        }
    }

    pub fn schema(&self) -> &Schema {
        self.history.current()
    }

    pub fn select(&mut self, id: NodeId) {
        self.selected = Some(id);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&NodeId> {
        self.selected.as_ref()
    }

    pub fn set_title(&mut self, title: &str) {
        let title = title.to_string();
        self.history
            .apply(|schema| schema.title = Some(title));
    }

    pub fn insert_root(&mut self, node: Node) {
        self.history.apply(|schema| {
            schema.insert_root(node);
            formula::recompute(schema);
        });
    }

    /// Inserts into a container. A missing or non-container target is a
    /// no-op and does not pollute the undo stack.
    pub fn insert_into(&mut self, container_id: &NodeId, node: Node) -> bool {
        let is_container = self
            .schema()
            .find_node(container_id)
            .is_some_and(|n| n.children().is_some());
        if !is_container {
            return false;
        }
        self.history.apply(|schema| {
            schema.insert_into_container(container_id, node);
            formula::recompute(schema);
        });
        true
    }

    /// Patches a node. A missing id is a no-op and does not pollute the
    /// undo stack.
    pub fn patch(&mut self, id: &NodeId, patch: NodePatch) -> bool {
        if self.schema().find_node(id).is_none() {
            return false;
        }
        self.history.apply(|schema| {
            schema.update_node(id, &patch);
            formula::recompute(schema);
        });
        true
    }

    /// Removes a node anywhere in the tree, clearing the selection if it
    /// pointed at the removed node.
    pub fn remove(&mut self, id: &NodeId) -> bool {
        if self.schema().find_node(id).is_none() {
            return false;
        }
        self.history.apply(|schema| {
            schema.remove_node(id);
            formula::recompute(schema);
        });
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        true
    }

    /// Commits a drag-and-drop reorder of root nodes as one transaction.
    pub fn reorder_root(&mut self, from: usize, to: usize) -> bool {
        let len = self.schema().nodes.len();
        if from >= len || to >= len || from == to {
            return false;
        }
        self.history.apply(|schema| {
            schema.reorder_root(from, to);
        });
        true
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}
