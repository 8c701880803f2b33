//! Persisted JSON shapes and their normalization into the canonical model.
//!
//! Observed inputs come in three shapes: `{ title?, nodes: [...] }`, a bare
//! array of nodes, or a single node object. `null` and unparseable input
//! normalize to the empty schema. The raw structs here exist only at this
//! boundary; engine code never sees them.

use super::{Body, Node, NodeId, Schema, WidgetKind};
use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Serialize, Deserialize)]
struct RawSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default)]
    nodes: Vec<RawNode>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RawNode {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    props: RawProps,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RawProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rows: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    headers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    formular_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    children: Option<Vec<RawNode>>,
}

const DEFAULT_TEXTAREA_ROWS: u32 = 3;

impl Schema {
    /// Lenient loader: normalizes any of the observed persisted shapes and
    /// degrades to the empty schema on unparseable or unrecognized input,
    /// logging a diagnostic. Nodes with an unrecognized widget type are
    /// skipped, not fatal. Never errors.
    pub fn from_json(input: &str) -> Schema {
        let value: serde_json::Value = match serde_json::from_str(input) {
            Ok(v) => v,
            Err(e) => {
                warn!("malformed schema JSON, loading empty schema: {e}");
                return Schema::default();
            }
        };
        match normalize(value) {
            Ok((title, raw_nodes)) => Schema {
                title,
                nodes: raw_nodes.into_iter().filter_map(node_lenient).collect(),
            },
            Err(e) => {
                warn!("unrecognized schema shape, loading empty schema: {e}");
                Schema::default()
            }
        }
    }

    /// Strict loader for callers that want shape problems surfaced.
    pub fn parse(input: &str) -> Result<Schema, SchemaError> {
        let value: serde_json::Value =
            serde_json::from_str(input).map_err(|e| SchemaError::JsonParseError(e.to_string()))?;
        let (title, raw_nodes) = normalize(value)?;
        let nodes = raw_nodes
            .into_iter()
            .map(node_strict)
            .collect::<Result<_, _>>()?;
        Ok(Schema { title, nodes })
    }

    /// Serializes to the canonical `{ title, nodes }` object shape.
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(RawSchema::from(self)).unwrap_or(serde_json::Value::Null)
    }

    pub fn to_json(&self) -> Result<String, SchemaError> {
        serde_json::to_string_pretty(&RawSchema::from(self))
            .map_err(|e| SchemaError::JsonParseError(e.to_string()))
    }
}

/// Reduces the three accepted shapes (plus `null`) to a title and a raw node
/// list.
fn normalize(value: serde_json::Value) -> Result<(Option<String>, Vec<RawNode>), SchemaError> {
    match value {
        serde_json::Value::Null => Ok((None, Vec::new())),
        serde_json::Value::Array(_) => {
            let nodes: Vec<RawNode> = serde_json::from_value(value)
                .map_err(|e| SchemaError::JsonParseError(e.to_string()))?;
            Ok((None, nodes))
        }
        serde_json::Value::Object(ref map) => {
            if map.contains_key("nodes") || map.contains_key("title") {
                let raw: RawSchema = serde_json::from_value(value)
                    .map_err(|e| SchemaError::JsonParseError(e.to_string()))?;
                Ok((raw.title, raw.nodes))
            } else if map.contains_key("id") && map.contains_key("type") {
                let node: RawNode = serde_json::from_value(value)
                    .map_err(|e| SchemaError::JsonParseError(e.to_string()))?;
                Ok((None, vec![node]))
            } else {
                Err(SchemaError::UnrecognizedShape)
            }
        }
        _ => Err(SchemaError::UnrecognizedShape),
    }
}

fn node_strict(mut raw: RawNode) -> Result<Node, SchemaError> {
    let kind = WidgetKind::from_str(&raw.kind).map_err(|_| SchemaError::UnknownWidgetType {
        node_id: raw.id.clone(),
        type_name: raw.kind.clone(),
    })?;
    let children = raw
        .props
        .children
        .take()
        .unwrap_or_default()
        .into_iter()
        .map(node_strict)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(assemble(raw.id, kind, raw.props, children))
}

fn node_lenient(mut raw: RawNode) -> Option<Node> {
    let kind = match WidgetKind::from_str(&raw.kind) {
        Ok(k) => k,
        Err(()) => {
            warn!(
                "skipping node '{}': unrecognized widget type '{}'",
                raw.id, raw.kind
            );
            return None;
        }
    };
    let children = raw
        .props
        .children
        .take()
        .unwrap_or_default()
        .into_iter()
        .filter_map(node_lenient)
        .collect();
    Some(assemble(raw.id, kind, raw.props, children))
}

fn assemble(id: String, kind: WidgetKind, props: RawProps, children: Vec<Node>) -> Node {
    let body = match kind {
        WidgetKind::Button => Body::Button,
        WidgetKind::Card => Body::Card,
        WidgetKind::Input => Body::Input,
        WidgetKind::InputNumber => Body::InputNumber,
        WidgetKind::TextArea => Body::TextArea {
            rows: props.rows.unwrap_or(DEFAULT_TEXTAREA_ROWS),
        },
        WidgetKind::DatePicker => Body::DatePicker,
        WidgetKind::Select => Body::Select {
            options: props.options.unwrap_or_default(),
        },
        WidgetKind::Checkbox => Body::Checkbox {
            options: props.options.unwrap_or_default(),
        },
        WidgetKind::Radio => Body::Radio {
            options: props.options.unwrap_or_default(),
        },
        WidgetKind::Switch => Body::Switch,
        WidgetKind::Label => Body::Label,
        WidgetKind::Holder => Body::Holder { children },
        WidgetKind::Table => Body::Table {
            headers: props.headers.unwrap_or_default(),
        },
        WidgetKind::Formula => Body::Formula {
            expression: props.formular_value.unwrap_or_default(),
        },
    };
    Node {
        id: NodeId::from(id),
        label: props.label,
        key: props.key,
        value: props.value,
        body,
    }
}

impl From<&Schema> for RawSchema {
    fn from(schema: &Schema) -> Self {
        RawSchema {
            title: schema.title.clone(),
            nodes: schema.nodes.iter().map(RawNode::from).collect(),
        }
    }
}

impl From<&Node> for RawNode {
    fn from(node: &Node) -> Self {
        let mut props = RawProps {
            label: node.label.clone(),
            key: node.key.clone(),
            value: node.value.clone(),
            ..RawProps::default()
        };
        match &node.body {
            Body::TextArea { rows } => props.rows = Some(*rows),
            Body::Select { options } | Body::Checkbox { options } | Body::Radio { options } => {
                props.options = Some(options.clone());
            }
            Body::Table { headers } => props.headers = Some(headers.clone()),
            Body::Formula { expression } => props.formular_value = Some(expression.clone()),
            Body::Holder { children } => {
                props.children = Some(children.iter().map(RawNode::from).collect());
            }
            Body::Button
            | Body::Card
            | Body::Input
            | Body::InputNumber
            | Body::DatePicker
            | Body::Switch
            | Body::Label => {}
        }
        RawNode {
            id: node.id.as_str().to_string(),
            kind: node.kind().as_str().to_string(),
            props,
        }
    }
}
