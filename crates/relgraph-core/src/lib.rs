//! # `relgraph` Core
//!
//! Directed-graph traversal over a relational record store.
//!
//! Nodes and typed edges are plain records. [`NodeList`] and [`EdgeList`]
//! are lazy, filterable views over them that expand into each other along
//! an edge type: "to" follows edges forward, "from" follows them backward.
//! A chain of hops composes nested `ID IN (...)` predicates and runs only
//! when the final list is enumerated.
//!
//! ## Features
//!
//! - **Lazy hops**: `nodes.to()?.to()?` reads nothing until `to_vec()`
//! - **Edge types**: endpoint classes, role names and column suffixes per type
//! - **Pluggable lists**: every list is built by a configurable [`ListFactory`]
//! - **Empty-set guard**: an empty identifier set never widens a filter
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use relgraph_core::{EdgeTypeDescriptor, Graph, TableSchema, Traverse};
//! use serde_json::json;
//!
//! let mut graph = Graph::new();
//! graph.define_node_class(TableSchema::new("City"))?;
//! graph.define_edge_type(EdgeTypeDescriptor::new("Road", "City", "City"))?;
//!
//! let a = graph.add_node("City", json!({}))?;
//! let b = graph.add_node("City", json!({}))?;
//! let c = graph.add_node("City", json!({}))?;
//! graph.add_edge("Road", a, b, json!({}))?;
//! graph.add_edge("Road", b, c, json!({}))?;
//!
//! let two_hops = graph.nodes("City", Some("Road"))?.with_ids([a]).to()?.to()?;
//! assert_eq!(two_hops.ids()?, vec![c]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::assertions_on_constants)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::redundant_pub_crate)]
#![allow(clippy::use_self)]
#![allow(clippy::implicit_hasher)]
#![allow(clippy::wrong_self_convention)]

pub mod config;
pub mod edge_type;
#[cfg(test)]
mod edge_type_tests;
pub mod error;
pub mod factory;
#[cfg(test)]
mod factory_tests;
pub mod graph;
pub mod query;
pub mod store;
pub mod telemetry;
pub mod traversal;

pub use config::{FilterStage, RelGraphConfig};
pub use edge_type::{EdgeTypeDescriptor, EdgeTypes};
pub use error::{Error, Result};
pub use factory::{ListFactory, ListKind, PlainKind};
pub use graph::Graph;
pub use query::{Predicate, Projection, RecordList};
pub use store::{ColumnKind, Record, RecordId, RecordSource, RecordStore, TableSchema};
pub use traversal::{Direction, EdgeList, NodeList, Traverse};
