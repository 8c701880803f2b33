//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types from the katachi crate. Import
//! this module to get the core functionality without importing each type
//! individually.

// Schema model
pub use crate::schema::{derive_key, Body, Node, NodeId, NodePatch, Schema, WidgetKind};

// Editing and history
pub use crate::history::{Designer, History};

// Formula evaluation
pub use crate::formula::{evaluate, recompute, resolve_variable, try_evaluate, Expr};

// Form data
pub use crate::form::{capture, hydrate};

// Approval sequencing
pub use crate::approval::{ApprovalFlow, ApprovalMode, ApprovalStep, StepMark};

// Rendering helpers
pub use crate::render::{inspector_fields, survey_entries, InspectorField, SchemaOutline, SurveyEntry};

// Stale-response guard
pub use crate::fetch::{LatestOnly, RequestSequence, RequestTicket};

// Error types
pub use crate::error::{FormulaError, SchemaError, ValidationError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
