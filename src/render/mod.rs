//! Presentation helpers over the node model: the designer canvas outline,
//! the capability-indexed inspector dispatch, and the flattened survey view.
//!
//! Dispatch here is by exhaustive match on [`WidgetKind`], so adding a
//! widget kind without teaching the renderer about it is a compile error,
//! not a runtime default branch.

use crate::schema::{Body, Node, Schema, WidgetKind};
use itertools::Itertools;
use std::fmt;

/// A property slot the inspector panel can edit for a given widget kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InspectorField {
    Label,
    Key,
    Value,
    Options,
    Rows,
    Headers,
    Expression,
}

use InspectorField::*;

/// The inspector fields applicable to each widget kind.
pub fn inspector_fields(kind: WidgetKind) -> &'static [InspectorField] {
    match kind {
        WidgetKind::Button => &[Label],
        WidgetKind::Card => &[Label],
        WidgetKind::Input => &[Label, Key, Value],
        WidgetKind::InputNumber => &[Label, Key, Value],
        WidgetKind::TextArea => &[Label, Key, Value, Rows],
        WidgetKind::DatePicker => &[Label, Key, Value],
        WidgetKind::Select => &[Label, Key, Value, Options],
        WidgetKind::Checkbox => &[Label, Key, Value, Options],
        WidgetKind::Radio => &[Label, Key, Value, Options],
        WidgetKind::Switch => &[Label, Key, Value],
        WidgetKind::Label => &[Label],
        WidgetKind::Holder => &[Label],
        WidgetKind::Table => &[Label, Key, Headers],
        WidgetKind::Formula => &[Label, Key, Expression],
    }
}

impl WidgetKind {
    /// The human-readable name shown in the designer palette.
    pub fn palette_label(self) -> &'static str {
        match self {
            WidgetKind::Button => "Button",
            WidgetKind::Card => "Card",
            WidgetKind::Input => "Text input",
            WidgetKind::InputNumber => "Number input",
            WidgetKind::TextArea => "Text area",
            WidgetKind::DatePicker => "Date picker",
            WidgetKind::Select => "Dropdown",
            WidgetKind::Checkbox => "Checkboxes",
            WidgetKind::Radio => "Radio group",
            WidgetKind::Switch => "Switch",
            WidgetKind::Label => "Label",
            WidgetKind::Holder => "Group",
            WidgetKind::Table => "Table",
            WidgetKind::Formula => "Formula",
        }
    }
}

/// Renders the schema as an indented tree, the designer's canvas preview.
pub struct SchemaOutline<'a> {
    pub schema: &'a Schema,
}

impl<'a> fmt::Display for SchemaOutline<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.schema.title.as_deref().unwrap_or("(untitled form)"))?;
        let count = self.schema.nodes.len();
        for (index, node) in self.schema.nodes.iter().enumerate() {
            self.fmt_as_tree(node, f, "", index + 1 == count)?;
        }
        Ok(())
    }
}

impl<'a> SchemaOutline<'a> {
    /// Recursively formats the node tree with box-drawing prefixes.
    fn fmt_as_tree(
        &self,
        node: &Node,
        f: &mut fmt::Formatter<'_>,
        prefix: &str,
        is_last: bool,
    ) -> fmt::Result {
        let node_marker = if is_last { "└── " } else { "├── " };
        write!(f, "{}{}", prefix, node_marker)?;
        writeln!(f, "{}", describe(node))?;

        if let Some(children) = node.children() {
            let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
            let count = children.len();
            for (index, child) in children.iter().enumerate() {
                self.fmt_as_tree(child, f, &child_prefix, index + 1 == count)?;
            }
        }
        Ok(())
    }
}

fn describe(node: &Node) -> String {
    let mut line = node.kind().palette_label().to_string();
    if let Some(label) = &node.label {
        line.push_str(&format!(" \"{}\"", label));
    }
    if let Some(key) = &node.key {
        line.push_str(&format!(" [{}]", key));
    }
    match &node.body {
        Body::Select { options } | Body::Checkbox { options } | Body::Radio { options } => {
            if !options.is_empty() {
                line.push_str(&format!(" ({})", options.iter().join(" | ")));
            }
        }
        Body::Table { headers } => {
            if !headers.is_empty() {
                line.push_str(&format!(" ({})", headers.iter().join(" | ")));
            }
        }
        Body::Formula { expression } => {
            line.push_str(&format!(" = {}", expression));
        }
        Body::TextArea { rows } => {
            line.push_str(&format!(" ({} rows)", rows));
        }
        _ => {}
    }
    if let Some(value) = &node.value {
        line.push_str(&format!(" → {}", value));
    }
    line
}

/// One fillable field in the survey view of a schema.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyEntry {
    pub kind: WidgetKind,
    pub label: Option<String>,
    pub key: String,
    pub options: Vec<String>,
    pub value: Option<serde_json::Value>,
}

/// Flattens the schema into the ordered list of fillable fields the survey
/// runner presents. Containers contribute their children; decorations
/// (Button, Card, Label) and unkeyed nodes are skipped.
pub fn survey_entries(schema: &Schema) -> Vec<SurveyEntry> {
    let mut entries = Vec::new();
    collect_entries(&schema.nodes, &mut entries);
    entries
}

fn collect_entries(nodes: &[Node], entries: &mut Vec<SurveyEntry>) {
    for node in nodes {
        match &node.body {
            Body::Holder { children } => collect_entries(children, entries),
            Body::Button | Body::Card | Body::Label => {}
            Body::Input
            | Body::InputNumber
            | Body::TextArea { .. }
            | Body::DatePicker
            | Body::Switch
            | Body::Table { .. }
            | Body::Formula { .. } => {
                if let Some(key) = &node.key {
                    entries.push(SurveyEntry {
                        kind: node.kind(),
                        label: node.label.clone(),
                        key: key.clone(),
                        options: Vec::new(),
                        value: node.value.clone(),
                    });
                }
            }
            Body::Select { options } | Body::Checkbox { options } | Body::Radio { options } => {
                if let Some(key) = &node.key {
                    entries.push(SurveyEntry {
                        kind: node.kind(),
                        label: node.label.clone(),
                        key: key.clone(),
                        options: options.clone(),
                        value: node.value.clone(),
                    });
                }
            }
        }
    }
}
