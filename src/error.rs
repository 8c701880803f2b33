use thiserror::Error;

/// Errors that can occur when parsing a persisted schema strictly.
///
/// The lenient loader ([`crate::schema::Schema::from_json`]) never surfaces
/// these; it degrades to an empty schema and logs instead.
#[derive(Error, Debug, Clone)]
pub enum SchemaError {
    #[error("Failed to parse schema JSON: {0}")]
    JsonParseError(String),

    #[error(
        "Unrecognized schema shape: expected an object with `nodes`, an array of nodes, or a single node"
    )]
    UnrecognizedShape,

    #[error("Node '{node_id}' has an unrecognized widget type: '{type_name}'")]
    UnknownWidgetType { node_id: String, type_name: String },
}

/// Errors that can occur while lexing, parsing, or evaluating a formula.
///
/// These stay internal to the evaluator: the editor-facing entry point maps
/// every failure to `0.0` and emits a diagnostic.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormulaError {
    #[error("Unexpected character '{0}' in formula")]
    UnexpectedChar(char),

    #[error("Unexpected token '{0}' in formula")]
    UnexpectedToken(String),

    #[error("Formula ended unexpectedly")]
    UnexpectedEnd,

    #[error("Formula did not evaluate to a finite number")]
    NonFinite,
}

/// User-visible validation failures that block submission of an approval
/// flow. Recoverable: the user corrects the rows and resubmits.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("The approval flow must contain at least one step")]
    EmptyFlow,

    #[error("Approval steps at rows {0:?} are missing a selected user or role")]
    IncompleteSteps(Vec<usize>),
}
