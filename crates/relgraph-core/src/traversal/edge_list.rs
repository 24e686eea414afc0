//! Lazy list of edges of one edge type.

use serde_json::Value;
use std::sync::Arc;

use super::{Direction, NodeList, Traverse};
use crate::edge_type::{EdgeTypeDescriptor, NODE_CLASS};
use crate::error::Result;
use crate::factory::{ListFactory, ListKind};
use crate::query::{Predicate, Projection, RecordList};
use crate::store::{Record, RecordId, ID_COLUMN};

/// Filterable list of the edges of one edge type.
#[derive(Debug, Clone)]
pub struct EdgeList {
    factory: Arc<ListFactory>,
    kind: Arc<dyn ListKind>,
    edge_type: Arc<EdgeTypeDescriptor>,
    records: RecordList,
}

impl EdgeList {
    /// Creates a list of every edge of `edge_type` with the built-in kind.
    ///
    /// Traversals from this list still resolve their node lists through
    /// `factory`.
    pub fn new(factory: Arc<ListFactory>, edge_type: Arc<EdgeTypeDescriptor>) -> Result<Self> {
        let kind = factory.kind(crate::config::DEFAULT_EDGE_LIST_KIND)?;
        Ok(Self::with_kind(factory, kind, edge_type))
    }

    pub(crate) fn with_kind(
        factory: Arc<ListFactory>,
        kind: Arc<dyn ListKind>,
        edge_type: Arc<EdgeTypeDescriptor>,
    ) -> Self {
        let base = RecordList::new(Arc::clone(factory.source()), edge_type.name());
        let records = kind.refine(base);
        Self {
            factory,
            kind,
            edge_type,
            records,
        }
    }

    fn with_records(&self, records: RecordList) -> Self {
        Self {
            records,
            ..self.clone()
        }
    }

    /// Returns the governing edge type.
    #[must_use]
    pub fn edge_type(&self) -> &Arc<EdgeTypeDescriptor> {
        &self.edge_type
    }

    /// Returns the name of the kind this list was built with.
    #[must_use]
    pub fn kind_name(&self) -> &str {
        self.kind.name()
    }

    /// Returns the underlying relational list.
    #[must_use]
    pub fn records(&self) -> &RecordList {
        &self.records
    }

    /// Column holding the "from" endpoint reference.
    #[must_use]
    pub fn from_field_name(&self, suffix: Option<&str>) -> String {
        self.edge_type.from_field_name(suffix)
    }

    /// Column holding the "to" endpoint reference.
    #[must_use]
    pub fn to_field_name(&self, suffix: Option<&str>) -> String {
        self.edge_type.to_field_name(suffix)
    }

    /// Keeps edges whose `column` is one of `values`.
    #[must_use]
    pub fn filter(&self, column: &str, values: Vec<Value>) -> Self {
        self.with_records(self.records.filter(column, values))
    }

    /// Keeps edges whose `column` equals `value`.
    #[must_use]
    pub fn filter_eq(&self, column: &str, value: impl Into<Value>) -> Self {
        self.with_records(self.records.filter_eq(column, value))
    }

    /// Keeps edges whose `column` references one of `ids`.
    #[must_use]
    pub fn filter_ids(&self, column: &str, ids: impl IntoIterator<Item = RecordId>) -> Self {
        self.with_records(self.records.filter_ids(column, ids))
    }

    /// Keeps edges matching `predicate`.
    #[must_use]
    pub fn where_(&self, predicate: Predicate) -> Self {
        self.with_records(self.records.where_(predicate))
    }

    /// Keeps edges whose `column` references a value of `projection`.
    #[must_use]
    pub fn filter_in_column(&self, column: &str, projection: Projection) -> Self {
        self.with_records(self.records.filter_in_column(column, projection))
    }

    /// Drops edges matching `predicate`.
    #[must_use]
    pub fn exclude(&self, predicate: Predicate) -> Self {
        self.with_records(self.records.exclude(predicate))
    }

    /// Caps the number of edges returned.
    #[must_use]
    pub fn limit(&self, limit: usize) -> Self {
        self.with_records(self.records.limit(limit))
    }

    /// Enumerates the edges.
    pub fn to_vec(&self) -> Result<Vec<Record>> {
        self.records.to_vec()
    }

    /// Counts the edges.
    pub fn count(&self) -> Result<usize> {
        self.records.count()
    }

    /// Returns true if at least one edge matches.
    pub fn exists(&self) -> Result<bool> {
        self.records.exists()
    }

    /// Returns the edge identifiers in store order.
    pub fn ids(&self) -> Result<Vec<RecordId>> {
        self.records.ids()
    }

    /// Returns `column` of every edge.
    pub fn column(&self, column: &str) -> Result<Vec<Value>> {
        self.records.column(column)
    }
}

impl Traverse for EdgeList {
    fn traverse(&self, direction: Direction, filter: Option<Predicate>) -> Result<NodeList> {
        let source = self.factory.source();
        let endpoint = self.edge_type.endpoint_class(direction);

        // schema is checked here, when the hop is composed
        let class = match endpoint {
            Some(class)
                if self.edge_type.resolves(direction, source.as_ref())
                    && source.has_class(self.edge_type.name()) =>
            {
                class
            }
            _ => {
                tracing::warn!(
                    edge_type = self.edge_type.name(),
                    ?direction,
                    endpoint = ?endpoint,
                    "edge type does not resolve to a known node class, traversal is empty"
                );
                return self
                    .factory
                    .empty_node_list(endpoint.unwrap_or(NODE_CLASS), Arc::clone(&self.edge_type));
            }
        };

        let far = self.edge_type.field_name(direction, None);
        tracing::debug!(
            edge_type = self.edge_type.name(),
            ?direction,
            column = %far,
            class,
            "edge hop composed"
        );

        let nodes = self
            .factory
            .node_list(class, Arc::clone(&self.edge_type))?
            .filter_in_column(ID_COLUMN, self.records.project(&far));
        Ok(match filter {
            Some(filter) => nodes.where_(filter),
            None => nodes,
        })
    }
}
