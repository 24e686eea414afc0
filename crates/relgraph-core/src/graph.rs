//! Graph facade bundling a store, its edge types and the list factory.
//!
//! # Example
//!
//! ```rust,ignore
//! use relgraph_core::{EdgeTypeDescriptor, Graph, TableSchema, Traverse};
//! use serde_json::json;
//!
//! let mut graph = Graph::new();
//! graph.define_node_class(TableSchema::new("Person"))?;
//! graph.define_edge_type(EdgeTypeDescriptor::new("Follows", "Person", "Person"))?;
//!
//! let ada = graph.add_node("Person", json!({}))?;
//! let bob = graph.add_node("Person", json!({}))?;
//! graph.add_edge("Follows", ada, bob, json!({}))?;
//!
//! let followed = graph.nodes("Person", Some("Follows"))?.with_ids([ada]).to()?;
//! assert_eq!(followed.ids()?, vec![bob]);
//! ```

use serde_json::{Map, Value};
use std::sync::Arc;

use crate::config::RelGraphConfig;
use crate::edge_type::{EdgeTypeDescriptor, EdgeTypes, DIRECTED_EDGE};
use crate::error::{Error, Result};
use crate::factory::{ListFactory, ListKind};
use crate::store::{RecordId, RecordSource, RecordStore, TableSchema};
use crate::traversal::{EdgeList, NodeList};

/// A record store viewed as a directed graph.
#[derive(Debug)]
pub struct Graph {
    store: Arc<RecordStore>,
    edge_types: EdgeTypes,
    factory: Arc<ListFactory>,
    config: RelGraphConfig,
}

impl Default for Graph {
    fn default() -> Self {
        Self::build(RelGraphConfig::default())
    }
}

impl Graph {
    /// Creates an empty graph with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `config` does not validate.
    pub fn with_config(config: RelGraphConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: RelGraphConfig) -> Self {
        let store = Arc::new(RecordStore::new());
        let source: Arc<dyn RecordSource> = store.clone();
        let factory = Arc::new(ListFactory::with_config(source, &config));
        Self {
            store,
            edge_types: EdgeTypes::with_default_suffix(&config.traversal.id_suffix),
            factory,
            config,
        }
    }

    /// Returns the backing store.
    #[must_use]
    pub fn store(&self) -> &Arc<RecordStore> {
        &self.store
    }

    /// Returns the configuration the graph was built with.
    #[must_use]
    pub fn config(&self) -> &RelGraphConfig {
        &self.config
    }

    /// Returns the edge type catalog.
    #[must_use]
    pub fn edge_types(&self) -> &EdgeTypes {
        &self.edge_types
    }

    /// Returns the list factory.
    #[must_use]
    pub fn factory(&self) -> &Arc<ListFactory> {
        &self.factory
    }

    /// Returns the list factory for reconfiguration.
    ///
    /// Lists created before the change keep the factory they were built with.
    pub fn factory_mut(&mut self) -> &mut ListFactory {
        Arc::make_mut(&mut self.factory)
    }

    /// Registers a list kind on the factory.
    pub fn register_kind(&mut self, kind: Arc<dyn ListKind>) {
        self.factory_mut().register_kind(kind);
    }

    /// Declares a node class.
    pub fn define_node_class(&self, schema: TableSchema) -> Result<()> {
        self.store.create_table(schema)
    }

    /// Registers an edge type and declares its table.
    ///
    /// Edge types without an explicit suffix receive the configured one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaValidation`] for the reserved directed edge
    /// name and [`Error::TableExists`] if the table is already declared.
    pub fn define_edge_type(
        &mut self,
        descriptor: EdgeTypeDescriptor,
    ) -> Result<Arc<EdgeTypeDescriptor>> {
        if descriptor.name() == DIRECTED_EDGE {
            return Err(Error::SchemaValidation(format!(
                "'{DIRECTED_EDGE}' is reserved for the generic directed edge"
            )));
        }
        if self.store.has_table(descriptor.name()) {
            return Err(Error::TableExists(descriptor.name().to_string()));
        }
        let descriptor = self.edge_types.register(descriptor);
        descriptor.declare(&self.store)?;
        tracing::info!(
            edge_type = descriptor.name(),
            from = ?descriptor.from_class(),
            to = ?descriptor.to_class(),
            "edge type defined"
        );
        Ok(descriptor)
    }

    /// Looks up a registered edge type.
    #[must_use]
    pub fn edge_type(&self, name: &str) -> Option<Arc<EdgeTypeDescriptor>> {
        self.edge_types.get(name)
    }

    /// Inserts a node.
    pub fn add_node(&self, class: &str, fields: Value) -> Result<RecordId> {
        self.store.insert(class, fields)
    }

    /// Inserts an edge of `edge_type` from node `from` to node `to`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TableNotFound`] for an unknown edge type and
    /// [`Error::RecordNotFound`] if a typed endpoint does not exist.
    pub fn add_edge(
        &self,
        edge_type: &str,
        from: RecordId,
        to: RecordId,
        fields: Value,
    ) -> Result<RecordId> {
        let descriptor = self
            .edge_types
            .get(edge_type)
            .filter(|d| self.store.has_table(d.name()))
            .ok_or_else(|| Error::TableNotFound(edge_type.to_string()))?;

        for (class, id) in [(descriptor.from_class(), from), (descriptor.to_class(), to)] {
            if let Some(class) = class {
                self.store.get(class, id)?;
            }
        }

        let mut row = match fields {
            Value::Null => Map::new(),
            Value::Object(map) => map,
            other => {
                return Err(Error::SchemaValidation(format!(
                    "edge fields must be an object, got {other}"
                )))
            }
        };
        row.insert(descriptor.from_field_name(None), Value::from(from));
        row.insert(descriptor.to_field_name(None), Value::from(to));
        self.store.insert(descriptor.name(), Value::Object(row))
    }

    /// Returns every node of `class`, traversing along `edge_type`.
    ///
    /// `None` (or an unregistered name) falls back to the generic directed
    /// edge, whose hops are always empty.
    pub fn nodes(&self, class: &str, edge_type: Option<&str>) -> Result<NodeList> {
        let descriptor = self.edge_types.resolve(edge_type);
        if let Some(name) = edge_type.filter(|name| *name != descriptor.name()) {
            tracing::warn!(edge_type = name, "unknown edge type, using the directed edge");
        }
        self.factory.node_list(class, descriptor)
    }

    /// Returns every edge of `edge_type`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TableNotFound`] for an unregistered edge type.
    pub fn edges(&self, edge_type: &str) -> Result<EdgeList> {
        let descriptor = self
            .edge_types
            .get(edge_type)
            .ok_or_else(|| Error::TableNotFound(edge_type.to_string()))?;
        self.factory.edge_list(descriptor)
    }
}
