//! Tests for `factory` module

use super::factory::*;
use crate::config::{FilterStage, RelGraphConfig};
use crate::edge_type::EdgeTypeDescriptor;
use crate::error::Error;
use crate::query::{Predicate, RecordList};
use crate::store::{ColumnKind, RecordSource, RecordStore, TableSchema};
use serde_json::json;
use std::sync::Arc;

/// Kind hiding rows flagged `Hidden = true`.
#[derive(Debug)]
struct VisibleOnly;

impl ListKind for VisibleOnly {
    fn name(&self) -> &str {
        "VisibleNodeList"
    }

    fn refine(&self, list: RecordList) -> RecordList {
        list.exclude(Predicate::eq("Hidden", true))
    }
}

fn store() -> Arc<RecordStore> {
    let store = Arc::new(RecordStore::new());
    store
        .create_table(TableSchema::new("Person").with_column("Hidden", ColumnKind::Bool))
        .unwrap();
    store.insert("Person", json!({"Hidden": false})).unwrap();
    store.insert("Person", json!({"Hidden": true})).unwrap();
    store
}

fn factory(store: &Arc<RecordStore>) -> ListFactory {
    let source: Arc<dyn RecordSource> = store.clone();
    ListFactory::new(source)
}

#[test]
fn test_builtin_kinds_registered() {
    let factory = factory(&store());

    assert_eq!(factory.kind("EdgeList").unwrap().name(), "EdgeList");
    assert_eq!(factory.kind("NodeList").unwrap().name(), "NodeList");
    assert_eq!(factory.filter_stage(), FilterStage::AfterExpansion);
}

#[test]
fn test_unknown_kind_is_resolution_error() {
    let factory = factory(&store());

    let err = factory.kind("Missing").expect_err("not registered");

    assert!(matches!(err, Error::FactoryResolution(ref name) if name == "Missing"));
}

#[test]
fn test_configured_unknown_kind_fails_at_construction() {
    let mut factory = factory(&store());
    factory.set_node_list_kind("Missing");
    let factory = Arc::new(factory);

    let err = factory
        .node_list("Person", Arc::new(EdgeTypeDescriptor::directed()))
        .expect_err("construction must fail");

    assert_eq!(err.code(), "RELGRAPH-005");
}

#[test]
fn test_default_kind_switch() {
    let store = store();
    let mut factory = factory(&store);
    factory.register_kind(Arc::new(VisibleOnly));
    factory.set_node_list_kind("VisibleNodeList");
    let factory = Arc::new(factory);

    let people = factory
        .node_list("Person", Arc::new(EdgeTypeDescriptor::directed()))
        .unwrap();

    assert_eq!(people.kind_name(), "VisibleNodeList");
    assert_eq!(people.count().unwrap(), 1);
}

#[test]
fn test_per_class_override_wins() {
    let mut factory = factory(&store());
    factory.register_kind(Arc::new(VisibleOnly));
    factory.override_node_list_kind("Person", "VisibleNodeList");
    factory.override_edge_list_kind("Follows", "Missing");
    let factory = Arc::new(factory);

    assert_eq!(factory.node_list_kind("Person").unwrap().name(), "VisibleNodeList");
    assert_eq!(factory.node_list_kind("Company").unwrap().name(), "NodeList");
    assert!(factory.edge_list_kind("Follows").is_err());
    assert_eq!(factory.edge_list_kind("Likes").unwrap().name(), "EdgeList");
}

#[test]
fn test_config_sections_are_honoured() {
    let store = store();
    let mut config = RelGraphConfig::default();
    config.factory.node_list = "Custom".into();
    config.traversal.filter_stage = FilterStage::BeforeExpansion;
    let source: Arc<dyn RecordSource> = store.clone();

    let factory = ListFactory::with_config(source, &config);

    assert_eq!(factory.filter_stage(), FilterStage::BeforeExpansion);
    assert!(factory.node_list_kind("Person").is_err());
}

#[test]
fn test_empty_node_list_never_scans() {
    let factory = Arc::new(factory(&store()));

    let empty = factory
        .empty_node_list("NoSuchClass", Arc::new(EdgeTypeDescriptor::directed()))
        .unwrap();

    assert_eq!(empty.class(), "NoSuchClass");
    assert!(empty.to_vec().unwrap().is_empty());
}
