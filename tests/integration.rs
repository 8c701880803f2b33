//! End-to-end designer session: design a form, persist it, fill it in as a
//! survey, and capture the form data.
mod common;
use common::*;
use katachi::prelude::*;

#[test]
fn test_full_designer_session() {
    let mut designer = Designer::new(Schema::new(Some("Travel request".to_string())));

    // Compose the form.
    designer.insert_root(Node::new(Body::Input).with_label("Employee"));
    designer.insert_root(Node::new(Body::DatePicker).with_label("Departure"));
    designer.insert_root(Node::new(Body::DatePicker).with_label("Return"));

    let costs = Node::holder().with_label("Costs");
    let costs_id = costs.id.clone();
    designer.insert_root(costs);
    designer.insert_into(
        &costs_id,
        Node::new(Body::InputNumber).with_label("Hotel"),
    );
    designer.insert_into(
        &costs_id,
        Node::new(Body::InputNumber).with_label("Transport"),
    );
    designer.insert_root(
        Node::new(Body::Formula {
            expression: "hotel + transport".to_string(),
        })
        .with_label("Total cost"),
    );
    designer.insert_root(
        Node::new(Body::Formula {
            expression: "return - departure".to_string(),
        })
        .with_label("Days away"),
    );

    // Persist and reload through the wire format.
    let json = designer.schema().to_json().unwrap();
    let mut schema = Schema::from_json(&json);
    assert_eq!(schema, *designer.schema());

    // The survey view flattens the Holder's children into fillable fields.
    let entries = survey_entries(&schema);
    let keys: Vec<_> = entries.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(
        keys,
        [
            "employee",
            "departure",
            "return",
            "hotel",
            "transport",
            "total_cost",
            "days_away"
        ]
    );

    // Fill the form in.
    let mut form_data = ahash::AHashMap::new();
    form_data.insert("employee".to_string(), serde_json::json!("Riku"));
    form_data.insert("departure".to_string(), serde_json::json!("1970-01-05"));
    form_data.insert("return".to_string(), serde_json::json!("1970-01-12"));
    form_data.insert("hotel".to_string(), serde_json::json!(300));
    form_data.insert("transport".to_string(), serde_json::json!(120.5));
    let matched = hydrate(&mut schema, &form_data);
    assert_eq!(matched, 5);

    recompute(&mut schema);
    let total_id = id_by_key(&schema, "total_cost");
    assert_eq!(
        schema.find_node(&total_id).unwrap().value,
        Some(serde_json::json!(420.5))
    );
    let days_id = id_by_key(&schema, "days_away");
    assert_eq!(
        schema.find_node(&days_id).unwrap().value,
        Some(serde_json::json!(7.0))
    );

    // Capture includes user input and computed values.
    let captured = capture(&schema);
    assert_eq!(captured.len(), 7);
    assert_eq!(captured["employee"], serde_json::json!("Riku"));
    assert_eq!(captured["total_cost"], serde_json::json!(420.5));

    // The outline renders every node, nested ones indented under the group.
    let outline = SchemaOutline { schema: &schema }.to_string();
    assert!(outline.contains("Travel request"));
    assert!(outline.contains("Group \"Costs\""));
    assert!(outline.contains("= hotel + transport"));
}

#[test]
fn test_inspector_dispatch_is_kind_indexed() {
    assert!(inspector_fields(WidgetKind::Formula).contains(&InspectorField::Expression));
    assert!(inspector_fields(WidgetKind::Select).contains(&InspectorField::Options));
    assert!(!inspector_fields(WidgetKind::Button).contains(&InspectorField::Value));
    assert_eq!(WidgetKind::Holder.palette_label(), "Group");
}

#[test]
fn test_approval_flow_alongside_schema_persistence() {
    // A document bundles its form schema and its routing definition.
    let schema = create_invoice_schema();
    let flow = create_complete_flow(&[ApprovalMode::Sequential, ApprovalMode::Parallel]);
    assert!(flow.validate().is_ok());

    let document = serde_json::json!({
        "schema": schema.to_value(),
        "approval": flow,
    });
    let reloaded_schema = Schema::from_json(&document["schema"].to_string());
    let reloaded_flow: ApprovalFlow =
        serde_json::from_value(document["approval"].clone()).unwrap();
    assert_eq!(reloaded_schema, schema);
    assert_eq!(reloaded_flow, flow);
}
