//! Tests for RecordStore, TableSchema and Record.

use super::*;
use serde_json::json;

fn person_store() -> RecordStore {
    let store = RecordStore::new();
    store
        .create_table(
            TableSchema::new("Person")
                .with_column("Name", ColumnKind::String)
                .with_column("Age", ColumnKind::Int),
        )
        .expect("create Person");
    store
}

// =============================================================================
// Tables
// =============================================================================

#[test]
fn test_create_table_twice_fails() {
    let store = person_store();

    let err = store
        .create_table(TableSchema::new("Person"))
        .expect_err("duplicate table");

    assert!(matches!(err, Error::TableExists(ref name) if name == "Person"));
}

#[test]
fn test_table_names_sorted() {
    let store = person_store();
    store.create_table(TableSchema::new("Company")).unwrap();

    assert_eq!(store.table_names(), vec!["Company", "Person"]);
    assert!(store.has_table("Company"));
    assert!(!store.has_table("Animal"));
}

// =============================================================================
// Insert / get / update / delete
// =============================================================================

#[test]
fn test_insert_assigns_increasing_ids_across_tables() {
    let store = person_store();
    store.create_table(TableSchema::new("Company")).unwrap();

    let a = store.insert("Person", json!({"Name": "Ada"})).unwrap();
    let b = store.insert("Company", json!({})).unwrap();
    let c = store.insert("Person", json!({"Name": "Bob"})).unwrap();

    assert_eq!((a, b, c), (1, 2, 3));
}

#[test]
fn test_insert_unknown_table() {
    let store = person_store();

    let err = store.insert("Animal", json!({})).expect_err("no table");

    assert_eq!(err.code(), "RELGRAPH-001");
}

#[test]
fn test_insert_undeclared_column_rejected() {
    let store = person_store();

    let err = store
        .insert("Person", json!({"Email": "ada@example.com"}))
        .expect_err("undeclared column");

    assert!(matches!(err, Error::SchemaValidation(_)));
    assert!(err.to_string().contains("Email"));
}

#[test]
fn test_insert_wrong_type_rejected() {
    let store = person_store();

    let err = store
        .insert("Person", json!({"Age": "forty"}))
        .expect_err("type mismatch");

    assert!(matches!(err, Error::SchemaValidation(_)));
}

#[test]
fn test_insert_reserved_column_rejected() {
    let store = person_store();

    let err = store.insert("Person", json!({"ID": 7})).expect_err("reserved");

    assert!(err.to_string().contains("reserved"));
}

#[test]
fn test_insert_non_object_rejected() {
    let store = person_store();

    assert!(store.insert("Person", json!([1, 2])).is_err());
    assert!(store.insert("Person", Value::Null).is_ok());
}

#[test]
fn test_reference_column_requires_unsigned_id() {
    let store = RecordStore::new();
    store
        .create_table(TableSchema::new("Follows").with_reference("FromID", "Person"))
        .unwrap();

    assert!(store.insert("Follows", json!({"FromID": 4})).is_ok());
    assert!(store.insert("Follows", json!({"FromID": null})).is_ok());
    assert!(store.insert("Follows", json!({"FromID": -1})).is_err());
    assert!(store.insert("Follows", json!({"FromID": "4"})).is_err());
}

#[test]
fn test_get_update_delete() {
    let store = person_store();
    let id = store.insert("Person", json!({"Name": "Ada", "Age": 36})).unwrap();

    store.update("Person", id, json!({"Age": 37})).unwrap();
    let record = store.get("Person", id).unwrap();
    assert_eq!(record.field("Age"), Some(&json!(37)));
    assert_eq!(record.field("Name"), Some(&json!("Ada")));

    let removed = store.delete("Person", id).unwrap();
    assert_eq!(removed.id(), id);
    assert!(matches!(
        store.get("Person", id),
        Err(Error::RecordNotFound { id: missing, .. }) if missing == id
    ));
    assert_eq!(store.len("Person").unwrap(), 0);
}

#[test]
fn test_scan_keeps_insertion_order_after_delete() {
    let store = person_store();
    let a = store.insert("Person", json!({"Name": "A"})).unwrap();
    let b = store.insert("Person", json!({"Name": "B"})).unwrap();
    let c = store.insert("Person", json!({"Name": "C"})).unwrap();

    store.delete("Person", b).unwrap();
    let ids: Vec<RecordId> = store.scan("Person").unwrap().iter().map(Record::id).collect();

    assert_eq!(ids, vec![a, c]);
}

// =============================================================================
// Record pseudo-columns
// =============================================================================

#[test]
fn test_record_pseudo_columns() {
    let store = person_store();
    let id = store.insert("Person", json!({"Name": "Ada"})).unwrap();
    let record = store.get("Person", id).unwrap();

    assert_eq!(record.value(ID_COLUMN), Some(json!(id)));
    assert_eq!(record.value(CLASS_COLUMN), Some(json!("Person")));
    assert_eq!(record.value("Name"), Some(json!("Ada")));
    assert_eq!(record.value("Age"), None);
    assert_eq!(record.reference(ID_COLUMN), Some(id));
    assert_eq!(record.reference("Name"), None);
}
