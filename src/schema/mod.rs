//! The canonical form-schema model: a titled, ordered collection of typed
//! widget nodes. Persisted JSON shapes live in [`wire`] and are normalized
//! into this model before any engine code touches them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub mod wire;

/// Opaque identifier of a node, stable for the node's lifetime.
///
/// Freshly created nodes get a UUID; ids loaded from persisted JSON are kept
/// verbatim, whatever their format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Generates a new unique id for a freshly created node.
    pub fn fresh() -> Self {
        NodeId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        NodeId(s)
    }
}

/// The closed set of widget kinds a schema can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Button,
    Card,
    Input,
    InputNumber,
    TextArea,
    DatePicker,
    Select,
    Checkbox,
    Radio,
    Switch,
    Label,
    Holder,
    Table,
    Formula,
}

impl WidgetKind {
    /// The wire-format tag, exactly as it appears in persisted JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            WidgetKind::Button => "Button",
            WidgetKind::Card => "Card",
            WidgetKind::Input => "Input",
            WidgetKind::InputNumber => "InputNumber",
            WidgetKind::TextArea => "TextArea",
            WidgetKind::DatePicker => "DatePicker",
            WidgetKind::Select => "Select",
            WidgetKind::Checkbox => "Checkbox",
            WidgetKind::Radio => "Radio",
            WidgetKind::Switch => "Switch",
            WidgetKind::Label => "Label",
            WidgetKind::Holder => "Holder",
            WidgetKind::Table => "Table",
            WidgetKind::Formula => "Formula",
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WidgetKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Button" => Ok(WidgetKind::Button),
            "Card" => Ok(WidgetKind::Card),
            "Input" => Ok(WidgetKind::Input),
            "InputNumber" => Ok(WidgetKind::InputNumber),
            "TextArea" => Ok(WidgetKind::TextArea),
            "DatePicker" => Ok(WidgetKind::DatePicker),
            "Select" => Ok(WidgetKind::Select),
            "Checkbox" => Ok(WidgetKind::Checkbox),
            "Radio" => Ok(WidgetKind::Radio),
            "Switch" => Ok(WidgetKind::Switch),
            "Label" => Ok(WidgetKind::Label),
            "Holder" => Ok(WidgetKind::Holder),
            "Table" => Ok(WidgetKind::Table),
            "Formula" => Ok(WidgetKind::Formula),
            _ => Err(()),
        }
    }
}

/// The per-kind payload of a node. One variant per widget kind, so that
/// "unsupported type" is an exhaustiveness error at compile time rather than
/// a runtime default branch, and only `Holder` can own children.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Button,
    Card,
    Input,
    InputNumber,
    TextArea { rows: u32 },
    DatePicker,
    Select { options: Vec<String> },
    Checkbox { options: Vec<String> },
    Radio { options: Vec<String> },
    Switch,
    Label,
    Holder { children: Vec<Node> },
    Table { headers: Vec<String> },
    Formula { expression: String },
}

impl Body {
    pub fn kind(&self) -> WidgetKind {
        match self {
            Body::Button => WidgetKind::Button,
            Body::Card => WidgetKind::Card,
            Body::Input => WidgetKind::Input,
            Body::InputNumber => WidgetKind::InputNumber,
            Body::TextArea { .. } => WidgetKind::TextArea,
            Body::DatePicker => WidgetKind::DatePicker,
            Body::Select { .. } => WidgetKind::Select,
            Body::Checkbox { .. } => WidgetKind::Checkbox,
            Body::Radio { .. } => WidgetKind::Radio,
            Body::Switch => WidgetKind::Switch,
            Body::Label => WidgetKind::Label,
            Body::Holder { .. } => WidgetKind::Holder,
            Body::Table { .. } => WidgetKind::Table,
            Body::Formula { .. } => WidgetKind::Formula,
        }
    }
}

/// One widget instance in a schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub label: Option<String>,
    /// Stable business identifier used by the formula evaluator and by
    /// form-data capture. Derived from the label via [`derive_key`].
    pub key: Option<String>,
    /// The current user-entered or computed value.
    pub value: Option<serde_json::Value>,
    pub body: Body,
}

impl Node {
    /// Creates a node with a fresh id and no label, key, or value.
    pub fn new(body: Body) -> Self {
        Node {
            id: NodeId::fresh(),
            label: None,
            key: None,
            value: None,
            body,
        }
    }

    /// Creates an empty container node.
    pub fn holder() -> Self {
        Node::new(Body::Holder {
            children: Vec::new(),
        })
    }

    /// Sets the label and derives the key from it.
    pub fn with_label(mut self, label: &str) -> Self {
        self.key = Some(derive_key(label));
        self.label = Some(label.to_string());
        self
    }

    /// Overrides the key explicitly (instead of the label-derived one).
    pub fn with_key(mut self, key: &str) -> Self {
        self.key = Some(key.to_string());
        self
    }

    pub fn with_value(mut self, value: serde_json::Value) -> Self {
        self.value = Some(value);
        self
    }

    pub fn kind(&self) -> WidgetKind {
        self.body.kind()
    }

    /// The ordered children, for container nodes.
    pub fn children(&self) -> Option<&[Node]> {
        match &self.body {
            Body::Holder { children } => Some(children),
            _ => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match &mut self.body {
            Body::Holder { children } => Some(children),
            _ => None,
        }
    }
}

/// The root ordered sequence of nodes plus an optional title. One schema is
/// one form design.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schema {
    pub title: Option<String>,
    pub nodes: Vec<Node>,
}

impl Schema {
    pub fn new(title: Option<String>) -> Self {
        Schema {
            title,
            nodes: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// A shallow-merge patch against a node's properties. `None` fields are left
/// untouched; fields that do not apply to the target's widget kind are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePatch {
    pub label: Option<String>,
    pub key: Option<String>,
    pub value: Option<serde_json::Value>,
    pub options: Option<Vec<String>>,
    pub rows: Option<u32>,
    pub headers: Option<Vec<String>>,
    pub expression: Option<String>,
}

impl NodePatch {
    pub fn value(value: serde_json::Value) -> Self {
        NodePatch {
            value: Some(value),
            ..NodePatch::default()
        }
    }

    /// Relabels a node, regenerating its key from the new label so formula
    /// references can follow the rename.
    pub fn relabel(label: &str) -> Self {
        NodePatch {
            label: Some(label.to_string()),
            key: Some(derive_key(label)),
            ..NodePatch::default()
        }
    }

    /// Applies the patch to a node in place.
    pub fn apply_to(&self, node: &mut Node) {
        if let Some(label) = &self.label {
            node.label = Some(label.clone());
        }
        if let Some(key) = &self.key {
            node.key = Some(key.clone());
        }
        if let Some(value) = &self.value {
            node.value = Some(value.clone());
        }
        match &mut node.body {
            Body::TextArea { rows } => {
                if let Some(patched) = self.rows {
                    *rows = patched;
                }
            }
            Body::Select { options } | Body::Checkbox { options } | Body::Radio { options } => {
                if let Some(patched) = &self.options {
                    *options = patched.clone();
                }
            }
            Body::Table { headers } => {
                if let Some(patched) = &self.headers {
                    *headers = patched.clone();
                }
            }
            Body::Formula { expression } => {
                if let Some(patched) = &self.expression {
                    *expression = patched.clone();
                }
            }
            Body::Button
            | Body::Card
            | Body::Input
            | Body::InputNumber
            | Body::DatePicker
            | Body::Switch
            | Body::Label
            | Body::Holder { .. } => {}
        }
    }
}

/// Derives the stable business key from a widget label: lowercased, accents
/// folded to their base letter, and every run of non-alphanumerics collapsed
/// into a single underscore. Idempotent.
pub fn derive_key(label: &str) -> String {
    let mut key = String::with_capacity(label.len());
    let mut pending_separator = false;
    for c in label.chars() {
        let folded = fold_accent(c);
        if folded.is_ascii_alphanumeric() {
            if pending_separator && !key.is_empty() {
                key.push('_');
            }
            pending_separator = false;
            key.push(folded.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }
    key
}

/// Maps common Latin accented letters to their base letter. Anything not in
/// the table passes through unchanged and is treated as a separator by
/// [`derive_key`] unless it is ASCII alphanumeric.
fn fold_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'a',
        'è' | 'é' | 'ê' | 'ë' | 'È' | 'É' | 'Ê' | 'Ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' | 'Ì' | 'Í' | 'Î' | 'Ï' => 'i',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' | 'Ù' | 'Ú' | 'Û' | 'Ü' => 'u',
        'ý' | 'ÿ' | 'Ý' => 'y',
        'ñ' | 'Ñ' => 'n',
        'ç' | 'Ç' => 'c',
        'đ' | 'Đ' => 'd',
        'š' | 'Š' => 's',
        'ž' | 'Ž' => 'z',
        other => other,
    }
}
