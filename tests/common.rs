//! Common test utilities for building schemas and approval flows.
use katachi::prelude::*;

/// A flat schema with two numeric inputs and a formula over them.
///
/// Logic: `total = amount + tax * 2`
#[allow(dead_code)]
pub fn create_invoice_schema() -> Schema {
    let mut schema = Schema::new(Some("Invoice".to_string()));
    schema.insert_root(
        Node::new(Body::InputNumber)
            .with_label("Amount")
            .with_key("a")
            .with_value(serde_json::json!(2)),
    );
    schema.insert_root(
        Node::new(Body::InputNumber)
            .with_label("Tax")
            .with_key("b")
            .with_value(serde_json::json!(3)),
    );
    schema.insert_root(
        Node::new(Body::Formula {
            expression: "a + b * 2".to_string(),
        })
        .with_label("Total")
        .with_key("total"),
    );
    schema
}

/// A nested schema: two root inputs and a Holder containing two more
/// widgets.
#[allow(dead_code)]
pub fn create_contact_schema() -> Schema {
    let mut schema = Schema::new(Some("Contact".to_string()));
    schema.insert_root(Node::new(Body::Input).with_label("First name"));
    schema.insert_root(Node::new(Body::Input).with_label("Last name"));

    let mut details = Node::holder().with_label("Details");
    if let Some(children) = details.children_mut() {
        children.push(Node::new(Body::DatePicker).with_label("Birth date"));
        children.push(
            Node::new(Body::Select {
                options: vec!["DE".to_string(), "FR".to_string(), "VN".to_string()],
            })
            .with_label("Country"),
        );
    }
    schema.insert_root(details);
    schema
}

/// An approval flow with every step fully filled in.
#[allow(dead_code)]
pub fn create_complete_flow(modes: &[ApprovalMode]) -> ApprovalFlow {
    let mut flow = ApprovalFlow::new();
    for index in 0..modes.len() {
        let step = flow.add_step();
        step.user_id = Some(format!("user-{}", index));
        step.role_id = Some(format!("role-{}", index));
        step.dept_id = Some("dept-1".to_string());
    }
    for (index, mode) in modes.iter().enumerate() {
        flow.set_mode(index, *mode);
    }
    flow
}

/// Finds a root node id by its key.
#[allow(dead_code)]
pub fn id_by_key(schema: &Schema, key: &str) -> NodeId {
    fn walk(nodes: &[Node], key: &str) -> Option<NodeId> {
        for node in nodes {
            if node.key.as_deref() == Some(key) {
                return Some(node.id.clone());
            }
            if let Some(children) = node.children() {
                if let Some(found) = walk(children, key) {
                    return Some(found);
                }
            }
        }
        None
    }
    walk(&schema.nodes, key).expect("key not found in schema")
}
