//! Tests for `edge_type` module

use super::edge_type::*;
use crate::store::{ColumnKind, RecordStore, TableSchema};

// -------------------------------------------------------------------------
// Field naming
// -------------------------------------------------------------------------

#[test]
fn test_default_field_names() {
    let follows = EdgeTypeDescriptor::new("Follows", "Person", "Person");

    assert_eq!(follows.from_field_name(None), "FromID");
    assert_eq!(follows.to_field_name(None), "ToID");
    assert_eq!(follows.suffix(), "ID");
    assert!(!follows.has_explicit_suffix());
}

#[test]
fn test_suffix_override_per_call_and_per_type() {
    let follows = EdgeTypeDescriptor::new("Follows", "Person", "Person").with_suffix("Identifier");

    assert_eq!(follows.to_field_name(None), "ToIdentifier");
    assert_eq!(follows.to_field_name(Some("Ref")), "ToRef");
    assert_eq!(follows.from_field_name(None), "FromIdentifier");
}

#[test]
fn test_custom_roles() {
    let parent = EdgeTypeDescriptor::new("ParentOf", "Person", "Person").with_roles("Parent", "Child");

    assert_eq!(parent.field_name(Direction::From, None), "ParentID");
    assert_eq!(parent.field_name(Direction::To, None), "ChildID");
    assert_eq!(parent.role(Direction::To), "Child");
}

#[test]
fn test_endpoint_classes_by_direction() {
    let works_at = EdgeTypeDescriptor::new("WorksAt", "Person", "Company");

    assert_eq!(works_at.endpoint_class(Direction::To), Some("Company"));
    assert_eq!(works_at.endpoint_class(Direction::From), Some("Person"));
    assert_eq!(Direction::To.reverse(), Direction::From);
}

#[test]
fn test_directed_has_no_endpoints() {
    let directed = EdgeTypeDescriptor::directed();

    assert_eq!(directed.name(), DIRECTED_EDGE);
    assert!(directed.from_class().is_none());
    assert!(directed.to_class().is_none());
}

// -------------------------------------------------------------------------
// Declaration
// -------------------------------------------------------------------------

#[test]
fn test_table_schema_declares_reference_columns() {
    let works_at = EdgeTypeDescriptor::new("WorksAt", "Person", "Company")
        .with_column("Since", ColumnKind::Int);

    let schema = works_at.table_schema();

    assert_eq!(schema.name(), "WorksAt");
    assert_eq!(
        schema.column("FromID"),
        Some(&ColumnKind::Reference("Person".to_string()))
    );
    assert_eq!(
        schema.column("ToID"),
        Some(&ColumnKind::Reference("Company".to_string()))
    );
    assert_eq!(schema.column("Since"), Some(&ColumnKind::Int));
}

#[test]
fn test_untyped_schema_references_generic_node() {
    let schema = EdgeTypeDescriptor::untyped("Loose").table_schema();

    assert_eq!(
        schema.column("ToID"),
        Some(&ColumnKind::Reference(NODE_CLASS.to_string()))
    );
}

#[test]
fn test_declare_creates_table_once() {
    let store = RecordStore::new();
    let follows = EdgeTypeDescriptor::new("Follows", "Person", "Person");

    follows.declare(&store).unwrap();

    assert!(store.has_table("Follows"));
    assert!(follows.declare(&store).is_err());
}

#[test]
fn test_resolves_requires_known_class() {
    let store = RecordStore::new();
    store.create_table(TableSchema::new("Person")).unwrap();
    let works_at = EdgeTypeDescriptor::new("WorksAt", "Person", "Company");

    assert!(works_at.resolves(Direction::From, &store));
    assert!(!works_at.resolves(Direction::To, &store));
    assert!(!EdgeTypeDescriptor::directed().resolves(Direction::To, &store));
}

// -------------------------------------------------------------------------
// Catalog
// -------------------------------------------------------------------------

#[test]
fn test_catalog_shares_descriptors() {
    let mut types = EdgeTypes::new();
    let registered = types.register(EdgeTypeDescriptor::new("Follows", "Person", "Person"));

    let looked_up = types.get("Follows").expect("registered");

    assert!(std::sync::Arc::ptr_eq(&registered, &looked_up));
    assert_eq!(types.names(), vec!["Follows"]);
}

#[test]
fn test_catalog_applies_default_suffix() {
    let mut types = EdgeTypes::with_default_suffix("Ref");

    let implicit = types.register(EdgeTypeDescriptor::new("Follows", "Person", "Person"));
    let explicit = types.register(EdgeTypeDescriptor::new("Likes", "Person", "Post").with_suffix("ID"));

    assert_eq!(implicit.to_field_name(None), "ToRef");
    assert_eq!(explicit.to_field_name(None), "ToID");
    assert_eq!(types.directed().to_field_name(None), "ToRef");
}

#[test]
fn test_catalog_resolve_falls_back_to_directed() {
    let types = EdgeTypes::new();

    assert_eq!(types.resolve(None).name(), DIRECTED_EDGE);
    assert_eq!(types.resolve(Some("Unknown")).name(), DIRECTED_EDGE);
    assert!(types.get(DIRECTED_EDGE).is_some());
}
