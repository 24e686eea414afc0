//! Lazy list of nodes of one class.

use serde_json::Value;
use std::sync::Arc;

use super::{Direction, Traverse};
use crate::config::{FilterStage, DEFAULT_NODE_LIST_KIND};
use crate::edge_type::EdgeTypeDescriptor;
use crate::error::Result;
use crate::factory::{ListFactory, ListKind};
use crate::query::{Predicate, Projection, RecordList};
use crate::store::{Record, RecordId, ID_COLUMN};

/// Filterable list of the nodes of one class.
///
/// The list is bound to the edge type its `to` / `from` hops follow; use
/// [`NodeList::via`] to follow another one.
#[derive(Debug, Clone)]
pub struct NodeList {
    factory: Arc<ListFactory>,
    kind: Arc<dyn ListKind>,
    class: String,
    edge_type: Arc<EdgeTypeDescriptor>,
    records: RecordList,
}

impl NodeList {
    /// Creates a list of every node of `class` with the built-in kind.
    pub fn new(
        factory: Arc<ListFactory>,
        class: &str,
        edge_type: Arc<EdgeTypeDescriptor>,
    ) -> Result<Self> {
        let kind = factory.kind(DEFAULT_NODE_LIST_KIND)?;
        Ok(Self::with_kind(factory, kind, class, edge_type))
    }

    pub(crate) fn with_kind(
        factory: Arc<ListFactory>,
        kind: Arc<dyn ListKind>,
        class: &str,
        edge_type: Arc<EdgeTypeDescriptor>,
    ) -> Self {
        let base = RecordList::new(Arc::clone(factory.source()), class);
        let records = kind.refine(base);
        Self {
            factory,
            kind,
            class: class.to_string(),
            edge_type,
            records,
        }
    }

    pub(crate) fn with_records(&self, records: RecordList) -> Self {
        Self {
            records,
            ..self.clone()
        }
    }

    /// Returns the node class.
    #[must_use]
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Returns the edge type hops follow.
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

    /// Returns the same nodes, with hops following `edge_type`.
    #[must_use]
    pub fn via(&self, edge_type: Arc<EdgeTypeDescriptor>) -> Self {
        Self {
            edge_type,
            ..self.clone()
        }
    }

    /// Shorthand for [`Traverse::to`].
    pub fn out(&self) -> Result<Self> {
        self.to()
    }

    /// Keeps nodes whose `column` is one of `values`.
    #[must_use]
    pub fn filter(&self, column: &str, values: Vec<Value>) -> Self {
        self.with_records(self.records.filter(column, values))
    }

    /// Keeps nodes whose `column` equals `value`.
    #[must_use]
    pub fn filter_eq(&self, column: &str, value: impl Into<Value>) -> Self {
        self.with_records(self.records.filter_eq(column, value))
    }

    /// Keeps nodes whose `column` references one of `ids`.
    #[must_use]
    pub fn filter_ids(&self, column: &str, ids: impl IntoIterator<Item = RecordId>) -> Self {
        self.with_records(self.records.filter_ids(column, ids))
    }

    /// Keeps nodes with one of the identifiers `ids`.
    #[must_use]
    pub fn with_ids(&self, ids: impl IntoIterator<Item = RecordId>) -> Self {
        self.filter_ids(ID_COLUMN, ids)
    }

    /// Keeps nodes matching `predicate`.
    #[must_use]
    pub fn where_(&self, predicate: Predicate) -> Self {
        self.with_records(self.records.where_(predicate))
    }

    /// Keeps nodes whose `column` references a value of `projection`.
    #[must_use]
    pub fn filter_in_column(&self, column: &str, projection: Projection) -> Self {
        self.with_records(self.records.filter_in_column(column, projection))
    }

    /// Drops nodes matching `predicate`.
    #[must_use]
    pub fn exclude(&self, predicate: Predicate) -> Self {
        self.with_records(self.records.exclude(predicate))
    }

    /// Caps the number of nodes returned.
    #[must_use]
    pub fn limit(&self, limit: usize) -> Self {
        self.with_records(self.records.limit(limit))
    }

    /// Enumerates the nodes.
    ///
    /// Every call re-executes the composed query.
    pub fn to_vec(&self) -> Result<Vec<Record>> {
        self.records.to_vec()
    }

    /// Counts the nodes.
    pub fn count(&self) -> Result<usize> {
        self.records.count()
    }

    /// Returns true if at least one node matches.
    pub fn exists(&self) -> Result<bool> {
        self.records.exists()
    }

    /// Returns the first node in store order.
    pub fn first(&self) -> Result<Option<Record>> {
        self.records.first()
    }

    /// Returns the node identifiers in store order.
    pub fn ids(&self) -> Result<Vec<RecordId>> {
        self.records.ids()
    }

    /// Returns `column` of every node.
    pub fn column(&self, column: &str) -> Result<Vec<Value>> {
        self.records.column(column)
    }
}

impl Traverse for NodeList {
    fn traverse(&self, direction: Direction, filter: Option<Predicate>) -> Result<NodeList> {
        // edges leave this set through the opposite endpoint column
        let near = self.edge_type.field_name(direction.reverse(), None);
        tracing::debug!(
            class = %self.class,
            edge_type = self.edge_type.name(),
            ?direction,
            column = %near,
            "node hop composed"
        );

        let edges = self
            .factory
            .edge_list(Arc::clone(&self.edge_type))?
            .filter_in_column(&near, self.records.project(ID_COLUMN));

        match (filter, self.factory.filter_stage()) {
            (Some(filter), FilterStage::BeforeExpansion) => {
                edges.where_(filter).traverse(direction, None)
            }
            (filter, _) => edges.traverse(direction, filter),
        }
    }
}
