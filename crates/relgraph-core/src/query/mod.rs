//! Lazy relational lists.
//!
//! A [`RecordList`] describes a query over one table: a class name plus a
//! stack of [`Predicate`]s. Building a list never touches the store; rows are
//! read only by the enumerating methods (`to_vec`, `count`, `column`, ...).
//!
//! ```rust,ignore
//! use relgraph_core::query::{Predicate, RecordList};
//!
//! let adults = RecordList::new(store.clone(), "Person")
//!     .filter_by(Predicate::gte("Age", 18));
//! let employers = RecordList::new(store, "Company")
//!     .filter_in_column("ID", adults.project("EmployerID"));
//!
//! // Nothing has run yet.
//! let rows = employers.to_vec()?;
//! ```

mod predicate;

use roaring::RoaringTreemap;
use serde_json::Value;
use std::sync::Arc;

use crate::error::Result;
use crate::store::{Record, RecordId, RecordSource, ID_COLUMN};

pub use predicate::Predicate;

/// Deferred projection of one column of a list.
#[derive(Debug, Clone)]
pub struct Projection {
    list: RecordList,
    column: String,
}

impl Projection {
    /// Creates a projection of `column` over `list`.
    #[must_use]
    pub fn new(list: RecordList, column: &str) -> Self {
        Self {
            list,
            column: column.to_string(),
        }
    }

    /// Returns the projected list.
    #[must_use]
    pub fn list(&self) -> &RecordList {
        &self.list
    }

    /// Returns the projected column.
    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Enumerates the list and collects the distinct references in the column.
    pub fn ids(&self) -> Result<RoaringTreemap> {
        self.list.column_ids(&self.column)
    }
}

/// Lazily evaluated, filterable list of records of one class.
///
/// Every builder method returns a new list; the receiver is never modified.
#[derive(Debug, Clone)]
pub struct RecordList {
    source: Arc<dyn RecordSource>,
    class: String,
    predicates: Vec<Predicate>,
    limit: Option<usize>,
}

impl RecordList {
    /// Creates an unfiltered list over `class`.
    #[must_use]
    pub fn new(source: Arc<dyn RecordSource>, class: &str) -> Self {
        Self {
            source,
            class: class.to_string(),
            predicates: Vec::new(),
            limit: None,
        }
    }

    /// Creates a list over `class` that is empty by construction.
    ///
    /// Enumerating it never reaches the store, so `class` need not exist.
    #[must_use]
    pub fn none(source: Arc<dyn RecordSource>, class: &str) -> Self {
        Self::new(source, class).filter_by(Predicate::Never)
    }

    /// Returns the class this list reads.
    #[must_use]
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Returns the backing source.
    #[must_use]
    pub fn source(&self) -> &Arc<dyn RecordSource> {
        &self.source
    }

    /// Returns the stacked predicates.
    #[must_use]
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Returns the row limit, if any.
    #[must_use]
    pub fn limit_value(&self) -> Option<usize> {
        self.limit
    }

    /// Adds a predicate.
    #[must_use]
    pub fn filter_by(&self, predicate: Predicate) -> Self {
        let mut list = self.clone();
        list.predicates.push(predicate);
        list
    }

    /// Alias of [`Self::filter_by`].
    #[must_use]
    pub fn where_(&self, predicate: Predicate) -> Self {
        self.filter_by(predicate)
    }

    /// Keeps records whose `column` is one of `values`.
    ///
    /// An empty `values` yields an empty list.
    #[must_use]
    pub fn filter(&self, column: &str, values: Vec<Value>) -> Self {
        self.filter_by(Predicate::is_in(column, values))
    }

    /// Keeps records whose `column` equals `value`.
    #[must_use]
    pub fn filter_eq(&self, column: &str, value: impl Into<Value>) -> Self {
        self.filter_by(Predicate::eq(column, value))
    }

    /// Keeps records whose `column` references one of `ids`.
    ///
    /// An empty `ids` yields an empty list.
    #[must_use]
    pub fn filter_ids(&self, column: &str, ids: impl IntoIterator<Item = RecordId>) -> Self {
        self.filter_by(Predicate::in_ids(column, ids))
    }

    /// Keeps records whose `column` references a value of `projection`.
    ///
    /// The projection is evaluated when this list is enumerated.
    #[must_use]
    pub fn filter_in_column(&self, column: &str, projection: Projection) -> Self {
        self.filter_by(Predicate::in_projection(column, projection))
    }

    /// Drops records matching `predicate`.
    #[must_use]
    pub fn exclude(&self, predicate: Predicate) -> Self {
        self.filter_by(Predicate::not(predicate))
    }

    /// Caps the number of records returned.
    #[must_use]
    pub fn limit(&self, limit: usize) -> Self {
        let mut list = self.clone();
        list.limit = Some(list.limit.map_or(limit, |current| current.min(limit)));
        list
    }

    /// Describes `column` of this list without evaluating it.
    #[must_use]
    pub fn project(&self, column: &str) -> Projection {
        Projection::new(self.clone(), column)
    }

    /// Returns true if the list is empty without consulting the store.
    #[must_use]
    pub fn is_statically_empty(&self) -> bool {
        self.limit == Some(0) || self.predicates.iter().any(Predicate::is_unsatisfiable)
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns the backing store's error unchanged (e.g. an unknown table).
    pub fn to_vec(&self) -> Result<Vec<Record>> {
        if self.is_statically_empty() {
            return Ok(Vec::new());
        }

        let resolved = self
            .predicates
            .iter()
            .map(Predicate::resolve)
            .collect::<Result<Vec<_>>>()?;
        if resolved.iter().any(Predicate::is_unsatisfiable) {
            tracing::trace!(class = %self.class, "list resolved to an empty id set");
            return Ok(Vec::new());
        }

        let rows = self.source.scan(&self.class)?;
        let scanned = rows.len();
        let records: Vec<Record> = rows
            .into_iter()
            .filter(|record| resolved.iter().all(|p| p.matches(record)))
            .take(self.limit.unwrap_or(usize::MAX))
            .collect();
        tracing::trace!(
            class = %self.class,
            scanned,
            matched = records.len(),
            "list enumerated"
        );
        Ok(records)
    }

    /// Counts matching records.
    pub fn count(&self) -> Result<usize> {
        Ok(self.to_vec()?.len())
    }

    /// Returns true if at least one record matches.
    pub fn exists(&self) -> Result<bool> {
        Ok(!self.limit(1).to_vec()?.is_empty())
    }

    /// Returns the first matching record in store order.
    pub fn first(&self) -> Result<Option<Record>> {
        Ok(self.limit(1).to_vec()?.into_iter().next())
    }

    /// Returns the matching record with identifier `id`.
    pub fn by_id(&self, id: RecordId) -> Result<Option<Record>> {
        self.filter_ids(ID_COLUMN, [id]).first()
    }

    /// Returns the identifiers of matching records in store order.
    pub fn ids(&self) -> Result<Vec<RecordId>> {
        Ok(self.to_vec()?.iter().map(Record::id).collect())
    }

    /// Returns `column` of every matching record; missing values become null.
    pub fn column(&self, column: &str) -> Result<Vec<Value>> {
        Ok(self
            .to_vec()?
            .iter()
            .map(|record| record.value(column).unwrap_or(Value::Null))
            .collect())
    }

    /// Returns the distinct record references held in `column`.
    ///
    /// Nulls and non-reference values are skipped.
    pub fn column_ids(&self, column: &str) -> Result<RoaringTreemap> {
        Ok(self
            .to_vec()?
            .iter()
            .filter_map(|record| record.reference(column))
            .collect())
    }
}
