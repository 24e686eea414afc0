//! Edge type descriptors and the endpoint column-naming convention.
//!
//! An edge type fixes which node class sits at each end of its edges and
//! how the two reference columns are named: role + suffix, so `FromID` and
//! `ToID` by default. Traversal code only ever asks the descriptor for column
//! names, which keeps "to" and "from" symmetric across differently named
//! schemas.

use rustc_hash::FxHashMap;
use std::sync::Arc;

use crate::config::DEFAULT_ID_SUFFIX;
use crate::error::Result;
use crate::store::{ColumnKind, RecordSource, RecordStore, TableSchema};

/// Name of the generic directed edge abstraction.
pub const DIRECTED_EDGE: &str = "DirectedEdge";

/// Generic node class, used when an endpoint class is unknown.
pub const NODE_CLASS: &str = "Node";

/// Default role name of the source endpoint.
pub const DEFAULT_FROM_ROLE: &str = "From";

/// Default role name of the target endpoint.
pub const DEFAULT_TO_ROLE: &str = "To";

/// Traversal direction relative to an edge's declared orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Forward: from the "from" endpoint to the "to" endpoint.
    To,
    /// Backward: from the "to" endpoint to the "from" endpoint.
    From,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::To => Self::From,
            Self::From => Self::To,
        }
    }
}

/// Type-level declaration of an edge class.
///
/// Descriptors are immutable once registered and shared as
/// `Arc<EdgeTypeDescriptor>` by every list built for that edge type.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeTypeDescriptor {
    name: String,
    from_class: Option<String>,
    to_class: Option<String>,
    from_role: String,
    to_role: String,
    suffix: Option<String>,
    columns: Vec<(String, ColumnKind)>,
}

impl EdgeTypeDescriptor {
    /// Creates an edge type between two node classes.
    #[must_use]
    pub fn new(name: &str, from_class: &str, to_class: &str) -> Self {
        Self::untyped(name)
            .with_from_class(from_class)
            .with_to_class(to_class)
    }

    /// Creates an edge type without endpoint classes.
    ///
    /// Projections of such an edge type are always empty.
    #[must_use]
    pub fn untyped(name: &str) -> Self {
        Self {
            name: name.to_string(),
            from_class: None,
            to_class: None,
            from_role: DEFAULT_FROM_ROLE.to_string(),
            to_role: DEFAULT_TO_ROLE.to_string(),
            suffix: None,
            columns: Vec::new(),
        }
    }

    /// The generic directed edge, used when no concrete edge type is known.
    #[must_use]
    pub fn directed() -> Self {
        Self::untyped(DIRECTED_EDGE)
    }

    /// Sets the node class of the "from" endpoint (builder pattern).
    #[must_use]
    pub fn with_from_class(mut self, class: &str) -> Self {
        self.from_class = Some(class.to_string());
        self
    }

    /// Sets the node class of the "to" endpoint (builder pattern).
    #[must_use]
    pub fn with_to_class(mut self, class: &str) -> Self {
        self.to_class = Some(class.to_string());
        self
    }

    /// Renames the endpoint roles (builder pattern).
    #[must_use]
    pub fn with_roles(mut self, from_role: &str, to_role: &str) -> Self {
        self.from_role = from_role.to_string();
        self.to_role = to_role.to_string();
        self
    }

    /// Sets the column suffix (builder pattern).
    #[must_use]
    pub fn with_suffix(mut self, suffix: &str) -> Self {
        self.suffix = Some(suffix.to_string());
        self
    }

    /// Declares an extra edge attribute column (builder pattern).
    #[must_use]
    pub fn with_column(mut self, name: &str, kind: ColumnKind) -> Self {
        self.columns.push((name.to_string(), kind));
        self
    }

    /// Returns the edge class (table) name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the node class at the "from" end.
    #[must_use]
    pub fn from_class(&self) -> Option<&str> {
        self.from_class.as_deref()
    }

    /// Returns the node class at the "to" end.
    #[must_use]
    pub fn to_class(&self) -> Option<&str> {
        self.to_class.as_deref()
    }

    /// Returns the node class reached by following edges in `direction`.
    #[must_use]
    pub fn endpoint_class(&self, direction: Direction) -> Option<&str> {
        match direction {
            Direction::To => self.to_class(),
            Direction::From => self.from_class(),
        }
    }

    /// Returns the role name of the endpoint reached in `direction`.
    #[must_use]
    pub fn role(&self, direction: Direction) -> &str {
        match direction {
            Direction::To => &self.to_role,
            Direction::From => &self.from_role,
        }
    }

    /// Returns the declared suffix, or `"ID"`.
    #[must_use]
    pub fn suffix(&self) -> &str {
        self.suffix.as_deref().unwrap_or(DEFAULT_ID_SUFFIX)
    }

    /// Returns true if the suffix was set explicitly.
    #[must_use]
    pub fn has_explicit_suffix(&self) -> bool {
        self.suffix.is_some()
    }

    /// Column holding the reference to the endpoint reached in `direction`.
    ///
    /// `suffix` overrides the declared suffix.
    #[must_use]
    pub fn field_name(&self, direction: Direction, suffix: Option<&str>) -> String {
        format!("{}{}", self.role(direction), suffix.unwrap_or(self.suffix()))
    }

    /// Column holding the "from" endpoint reference.
    #[must_use]
    pub fn from_field_name(&self, suffix: Option<&str>) -> String {
        self.field_name(Direction::From, suffix)
    }

    /// Column holding the "to" endpoint reference.
    #[must_use]
    pub fn to_field_name(&self, suffix: Option<&str>) -> String {
        self.field_name(Direction::To, suffix)
    }

    /// Returns the extra attribute columns.
    #[must_use]
    pub fn columns(&self) -> &[(String, ColumnKind)] {
        &self.columns
    }

    /// Returns true if the endpoint reached in `direction` names a class
    /// `source` knows about.
    #[must_use]
    pub fn resolves(&self, direction: Direction, source: &dyn RecordSource) -> bool {
        self.endpoint_class(direction)
            .is_some_and(|class| source.has_class(class))
    }

    /// Derives the edge table schema: one reference column per endpoint plus
    /// the extra attribute columns.
    #[must_use]
    pub fn table_schema(&self) -> TableSchema {
        let schema = TableSchema::new(&self.name)
            .with_reference(
                &self.from_field_name(None),
                self.from_class().unwrap_or(NODE_CLASS),
            )
            .with_reference(
                &self.to_field_name(None),
                self.to_class().unwrap_or(NODE_CLASS),
            );
        self.columns
            .iter()
            .fold(schema, |schema, (name, kind)| schema.with_column(name, kind.clone()))
    }

    /// Registers the edge table on `store`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::TableExists`] if the table is already declared.
    pub fn declare(&self, store: &RecordStore) -> Result<()> {
        store.create_table(self.table_schema())
    }
}

/// Process-wide catalog of edge type descriptors.
///
/// Each edge type is resolved once and handed out as a shared `Arc`.
#[derive(Debug, Clone)]
pub struct EdgeTypes {
    types: FxHashMap<String, Arc<EdgeTypeDescriptor>>,
    directed: Arc<EdgeTypeDescriptor>,
    default_suffix: String,
}

impl Default for EdgeTypes {
    fn default() -> Self {
        Self::with_default_suffix(DEFAULT_ID_SUFFIX)
    }
}

impl EdgeTypes {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog whose descriptors default to `suffix`.
    #[must_use]
    pub fn with_default_suffix(suffix: &str) -> Self {
        Self {
            types: FxHashMap::default(),
            directed: Arc::new(EdgeTypeDescriptor::directed().with_suffix(suffix)),
            default_suffix: suffix.to_string(),
        }
    }

    /// Adds a descriptor, replacing any previous one of the same name.
    ///
    /// Descriptors without an explicit suffix receive the catalog default.
    pub fn register(&mut self, descriptor: EdgeTypeDescriptor) -> Arc<EdgeTypeDescriptor> {
        let descriptor = if descriptor.has_explicit_suffix() {
            descriptor
        } else {
            descriptor.with_suffix(&self.default_suffix)
        };
        let descriptor = Arc::new(descriptor);
        self.types
            .insert(descriptor.name().to_string(), Arc::clone(&descriptor));
        descriptor
    }

    /// Looks up a descriptor by edge class name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<EdgeTypeDescriptor>> {
        if name == DIRECTED_EDGE {
            return Some(self.directed());
        }
        self.types.get(name).cloned()
    }

    /// Returns the named descriptor or the generic directed edge.
    #[must_use]
    pub fn resolve(&self, name: Option<&str>) -> Arc<EdgeTypeDescriptor> {
        name.and_then(|n| self.get(n))
            .unwrap_or_else(|| self.directed())
    }

    /// Returns the generic directed edge descriptor.
    #[must_use]
    pub fn directed(&self) -> Arc<EdgeTypeDescriptor> {
        Arc::clone(&self.directed)
    }

    /// Returns the registered edge class names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
