//! Pluggable construction of node and edge lists.
//!
//! Lists are never built with a hard-coded behavior: every traversal step
//! asks the [`ListFactory`] for the [`ListKind`] registered under the
//! configured name (`"EdgeList"` / `"NodeList"` by default, overridable per
//! class). Registering a kind and pointing the configuration at it swaps the
//! behavior of every list built from then on, including the intermediate
//! lists of `to` / `from`.

use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

use crate::config::{FactoryConfig, FilterStage, RelGraphConfig};
use crate::config::{DEFAULT_EDGE_LIST_KIND, DEFAULT_NODE_LIST_KIND};
use crate::edge_type::EdgeTypeDescriptor;
use crate::error::{Error, Result};
use crate::query::RecordList;
use crate::store::RecordSource;
use crate::traversal::{EdgeList, NodeList};

/// A named collection behavior.
///
/// `refine` sees the base query of every list created with this kind and may
/// narrow it, e.g. to hide soft-deleted rows.
pub trait ListKind: Send + Sync + fmt::Debug {
    /// Name the kind is registered under.
    fn name(&self) -> &str;

    /// Adjusts the base query of a freshly created list.
    fn refine(&self, list: RecordList) -> RecordList {
        list
    }
}

/// Kind that leaves the base query untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainKind {
    name: String,
}

impl PlainKind {
    /// Creates a plain kind named `name`.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl ListKind for PlainKind {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Registry of list kinds plus everything a list needs to build its peers.
///
/// Lists hold an `Arc<ListFactory>`; changing a shared factory through
/// `Arc::make_mut` only affects lists built afterwards.
#[derive(Clone)]
pub struct ListFactory {
    source: Arc<dyn RecordSource>,
    kinds: FxHashMap<String, Arc<dyn ListKind>>,
    config: FactoryConfig,
    filter_stage: FilterStage,
}

impl fmt::Debug for ListFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<&str> = self.kinds.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        f.debug_struct("ListFactory")
            .field("kinds", &kinds)
            .field("edge_list", &self.config.edge_list)
            .field("node_list", &self.config.node_list)
            .field("filter_stage", &self.filter_stage)
            .finish_non_exhaustive()
    }
}

impl ListFactory {
    /// Creates a factory with the default configuration.
    #[must_use]
    pub fn new(source: Arc<dyn RecordSource>) -> Self {
        Self::with_config(source, &RelGraphConfig::default())
    }

    /// Creates a factory using the `factory` and `traversal` sections of `config`.
    ///
    /// The built-in `"EdgeList"` and `"NodeList"` kinds are always registered.
    #[must_use]
    pub fn with_config(source: Arc<dyn RecordSource>, config: &RelGraphConfig) -> Self {
        let mut factory = Self {
            source,
            kinds: FxHashMap::default(),
            config: config.factory.clone(),
            filter_stage: config.traversal.filter_stage,
        };
        factory.register_kind(Arc::new(PlainKind::new(DEFAULT_EDGE_LIST_KIND)));
        factory.register_kind(Arc::new(PlainKind::new(DEFAULT_NODE_LIST_KIND)));
        factory
    }

    /// Registers a kind, replacing any kind with the same name.
    pub fn register_kind(&mut self, kind: Arc<dyn ListKind>) {
        tracing::debug!(kind = kind.name(), "list kind registered");
        self.kinds.insert(kind.name().to_string(), kind);
    }

    /// Uses `kind` for every edge list without a per-class override.
    pub fn set_edge_list_kind(&mut self, kind: &str) {
        self.config.edge_list = kind.to_string();
    }

    /// Uses `kind` for every node list without a per-class override.
    pub fn set_node_list_kind(&mut self, kind: &str) {
        self.config.node_list = kind.to_string();
    }

    /// Uses `kind` for edge lists of `edge_class`.
    pub fn override_edge_list_kind(&mut self, edge_class: &str, kind: &str) {
        self.config
            .edge_list_overrides
            .insert(edge_class.to_string(), kind.to_string());
    }

    /// Uses `kind` for node lists of `node_class`.
    pub fn override_node_list_kind(&mut self, node_class: &str, kind: &str) {
        self.config
            .node_list_overrides
            .insert(node_class.to_string(), kind.to_string());
    }

    /// Sets where caller filters on `NodeList::to` / `from` apply.
    pub fn set_filter_stage(&mut self, stage: FilterStage) {
        self.filter_stage = stage;
    }

    /// Returns where caller filters on node traversals apply.
    #[must_use]
    pub fn filter_stage(&self) -> FilterStage {
        self.filter_stage
    }

    /// Returns the backing record source.
    #[must_use]
    pub fn source(&self) -> &Arc<dyn RecordSource> {
        &self.source
    }

    /// Looks up a registered kind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FactoryResolution`] for unknown names.
    pub fn kind(&self, name: &str) -> Result<Arc<dyn ListKind>> {
        self.kinds
            .get(name)
            .cloned()
            .ok_or_else(|| Error::FactoryResolution(name.to_string()))
    }

    /// Resolves the kind used for edge lists of `edge_class`.
    pub fn edge_list_kind(&self, edge_class: &str) -> Result<Arc<dyn ListKind>> {
        self.kind(self.config.edge_list_kind(edge_class))
    }

    /// Resolves the kind used for node lists of `node_class`.
    pub fn node_list_kind(&self, node_class: &str) -> Result<Arc<dyn ListKind>> {
        self.kind(self.config.node_list_kind(node_class))
    }

    /// Builds an edge list of `edge_type` with the configured kind.
    ///
    /// Takes the same arguments as [`EdgeList::new`].
    pub fn edge_list(
        self: &Arc<Self>,
        edge_type: Arc<EdgeTypeDescriptor>,
    ) -> Result<EdgeList> {
        let kind = self.edge_list_kind(edge_type.name())?;
        Ok(EdgeList::with_kind(Arc::clone(self), kind, edge_type))
    }

    /// Builds a node list of `class` governed by `edge_type` with the
    /// configured kind.
    ///
    /// Takes the same arguments as [`NodeList::new`].
    pub fn node_list(
        self: &Arc<Self>,
        class: &str,
        edge_type: Arc<EdgeTypeDescriptor>,
    ) -> Result<NodeList> {
        let kind = self.node_list_kind(class)?;
        Ok(NodeList::with_kind(Arc::clone(self), kind, class, edge_type))
    }

    /// Builds a node list of `class` that is empty by construction.
    pub fn empty_node_list(
        self: &Arc<Self>,
        class: &str,
        edge_type: Arc<EdgeTypeDescriptor>,
    ) -> Result<NodeList> {
        let list = self.node_list(class, edge_type)?;
        let none = RecordList::none(Arc::clone(&self.source), class);
        Ok(list.with_records(none))
    }
}
