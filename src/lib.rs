//! # Katachi - Form-Schema Tree Engine
//!
//! **Katachi** is the core engine behind a drag-and-drop form designer: an
//! in-memory, ordered, possibly-nested collection of typed widget nodes,
//! the mutation operations the designer applies to it, a sandboxed formula
//! evaluator that keeps computed fields consistent, snapshot-based
//! undo/redo, and the approval-step sequencer used by document routing.
//!
//! ## Core Workflow
//!
//! 1.  **Load or create a schema**: [`schema::Schema::from_json`] normalizes
//!     any of the persisted JSON shapes (wrapped object, bare node array,
//!     single node) into the canonical model, degrading to an empty schema
//!     on malformed input instead of erroring.
//! 2.  **Edit through a `Designer`**: [`history::Designer`] wraps the schema
//!     in an undo/redo history and exposes the editor verbs (insert, patch,
//!     remove, reorder). Formula nodes are recomputed after every relevant
//!     change.
//! 3.  **Fill and capture**: [`form::hydrate`] writes previously captured
//!     form data back into the tree; [`form::capture`] extracts the flat
//!     key/value object at submission time.
//! 4.  **Sequence approvals**: [`approval::ApprovalFlow`] keeps the routing
//!     steps numbered and validated.
//!
//! ## Quick Start
//!
//! ```rust
//! use katachi::prelude::*;
//!
//! // Start a new design and add a couple of widgets.
//! let mut designer = Designer::new(Schema::new(Some("Expenses".to_string())));
//! let amount = Node::new(Body::InputNumber)
//!     .with_label("Amount")
//!     .with_value(serde_json::json!(40));
//! let tax = Node::new(Body::InputNumber)
//!     .with_label("Tax")
//!     .with_value(serde_json::json!(2));
//! let total = Node::new(Body::Formula {
//!     expression: "amount + tax".to_string(),
//! })
//! .with_label("Total");
//!
//! designer.insert_root(amount);
//! designer.insert_root(tax);
//! designer.insert_root(total);
//!
//! // The Formula node now carries the computed value.
//! let computed = designer.schema().nodes_of_kind(WidgetKind::Formula)[0]
//!     .value
//!     .clone();
//! assert_eq!(computed, Some(serde_json::json!(42.0)));
//!
//! // Undo restores the pre-insert state; redo brings it back.
//! designer.undo();
//! designer.redo();
//!
//! // Persist and reload.
//! let json = designer.schema().to_json().unwrap();
//! let reloaded = Schema::from_json(&json);
//! assert_eq!(reloaded, *designer.schema());
//! ```

pub mod approval;
pub mod error;
pub mod fetch;
pub mod form;
pub mod formula;
pub mod history;
pub mod ops;
pub mod prelude;
pub mod render;
pub mod schema;
