//! Tests for schema loading, normalization, and serialization.
mod common;
use common::*;
use katachi::prelude::*;

#[test]
fn test_round_trip_empty_schema() {
    let schema = Schema::new(None);
    let json = schema.to_json().unwrap();
    assert_eq!(Schema::from_json(&json), schema);
}

#[test]
fn test_round_trip_flat_schema() {
    let schema = create_invoice_schema();
    let json = schema.to_json().unwrap();
    assert_eq!(Schema::from_json(&json), schema);
}

#[test]
fn test_round_trip_nested_schema() {
    let schema = create_contact_schema();
    let json = schema.to_json().unwrap();
    let reloaded = Schema::from_json(&json);
    assert_eq!(reloaded, schema);

    // The Holder's children survived as children, not as roots.
    let holder_id = id_by_key(&schema, "details");
    let holder = reloaded.find_node(&holder_id).unwrap();
    assert_eq!(holder.children().unwrap().len(), 2);
    assert_eq!(reloaded.nodes.len(), 3);
}

#[test]
fn test_normalizes_bare_node_array() {
    let input = r#"[
        { "id": "n1", "type": "Input", "props": { "label": "Name", "key": "name" } },
        { "id": "n2", "type": "Switch", "props": {} }
    ]"#;
    let schema = Schema::from_json(input);
    assert_eq!(schema.title, None);
    assert_eq!(schema.nodes.len(), 2);
    assert_eq!(schema.nodes[0].kind(), WidgetKind::Input);
}

#[test]
fn test_normalizes_single_node() {
    let input = r#"{ "id": "only", "type": "Label", "props": { "label": "Hello" } }"#;
    let schema = Schema::from_json(input);
    assert_eq!(schema.nodes.len(), 1);
    assert_eq!(schema.nodes[0].id, NodeId::from("only"));
}

#[test]
fn test_null_and_garbage_normalize_to_empty() {
    assert!(Schema::from_json("null").is_empty());
    assert!(Schema::from_json("not json at all {{{").is_empty());
    assert!(Schema::from_json("42").is_empty());
}

#[test]
fn test_unknown_widget_type_skipped_leniently() {
    let input = r#"{ "nodes": [
        { "id": "n1", "type": "Input", "props": {} },
        { "id": "n2", "type": "Hologram", "props": {} }
    ] }"#;
    let schema = Schema::from_json(input);
    assert_eq!(schema.nodes.len(), 1);

    // The strict parser surfaces the same input as an error.
    let err = Schema::parse(input).unwrap_err();
    assert!(err.to_string().contains("Hologram"));
    assert!(err.to_string().contains("n2"));
}

#[test]
fn test_unknown_props_keys_ignored() {
    let input = r#"{ "nodes": [
        { "id": "n1", "type": "Input", "props": { "label": "X", "futureProp": true } }
    ] }"#;
    let schema = Schema::from_json(input);
    assert_eq!(schema.nodes.len(), 1);
    assert_eq!(schema.nodes[0].label.as_deref(), Some("X"));
}

#[test]
fn test_formula_expression_maps_to_formular_value() {
    let schema = create_invoice_schema();
    let json = schema.to_json().unwrap();
    assert!(json.contains("formular_value"));
    assert!(json.contains("a + b * 2"));
}

#[test]
fn test_derive_key_idempotent() {
    for label in [
        "Héllo Wörld!",
        "  spaced   out  ",
        "àéîõü",
        "Already_good_key",
        "123 leading digits",
        "--punct--only--",
        "Ça va? Très bien!",
    ] {
        let once = derive_key(label);
        let twice = derive_key(&once);
        assert_eq!(once, twice, "derive_key not idempotent for {label:?}");
    }
}

#[test]
fn test_derive_key_examples() {
    assert_eq!(derive_key("Héllo Wörld!"), "hello_world");
    assert_eq!(derive_key("Total (incl. tax)"), "total_incl_tax");
    assert_eq!(derive_key("Ça va"), "ca_va");
    assert_eq!(derive_key(""), "");
}
