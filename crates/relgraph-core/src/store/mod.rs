//! Relational record store backing node and edge lists.
//!
//! Tables are declared up front with a [`TableSchema`]. Records keep insertion
//! order, which is the only ordering traversal results inherit.
//!
//! # Architecture
//!
//! ```text
//! RecordStore
//! ├── tables: FxHashMap<class, Table>
//! │   ├── "Person"  -> schema + IndexMap<RecordId, Record>
//! │   └── "Follows" -> schema (FromID, ToID references) + rows
//! └── next_id: store-wide identifier counter
//! ```

mod record;
mod schema;
#[cfg(test)]
mod store_tests;

use indexmap::IndexMap;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use serde_json::Value;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{Error, Result};

pub use record::{Record, RecordId, CLASS_COLUMN, ID_COLUMN};
pub use schema::{ColumnKind, TableSchema};

/// Read access to stored records, as needed by [`crate::query::RecordList`].
///
/// Implement this to put lists on top of another backing store. Errors
/// returned from `scan` reach the caller of the enumerating list unchanged.
pub trait RecordSource: Send + Sync + fmt::Debug {
    /// Returns true if a table named `class` exists.
    fn has_class(&self, class: &str) -> bool;

    /// Returns every live record of `class` in store order.
    fn scan(&self, class: &str) -> Result<Vec<Record>>;
}

#[derive(Debug)]
struct Table {
    schema: TableSchema,
    rows: IndexMap<RecordId, Record>,
}

/// In-memory relational store.
pub struct RecordStore {
    tables: RwLock<FxHashMap<String, Table>>,
    next_id: AtomicU64,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self {
            tables: RwLock::new(FxHashMap::default()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tables = self.tables.read();
        let mut names: Vec<&str> = tables.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("RecordStore")
            .field("tables", &names)
            .field("next_id", &self.next_id.load(Ordering::Relaxed))
            .finish()
    }
}

impl RecordStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TableExists`] if the name is taken.
    pub fn create_table(&self, schema: TableSchema) -> Result<()> {
        let mut tables = self.tables.write();
        if tables.contains_key(schema.name()) {
            return Err(Error::TableExists(schema.name().to_string()));
        }
        tracing::debug!(table = schema.name(), columns = schema.columns().len(), "table created");
        tables.insert(
            schema.name().to_string(),
            Table {
                schema,
                rows: IndexMap::new(),
            },
        );
        Ok(())
    }

    /// Returns true if `class` is a declared table.
    #[must_use]
    pub fn has_table(&self, class: &str) -> bool {
        self.tables.read().contains_key(class)
    }

    /// Returns a copy of a table's schema.
    #[must_use]
    pub fn schema(&self, class: &str) -> Option<TableSchema> {
        self.tables.read().get(class).map(|t| t.schema.clone())
    }

    /// Returns the declared table names, sorted.
    #[must_use]
    pub fn table_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.read().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Inserts a record and returns its new identifier.
    ///
    /// `fields` must be a JSON object whose keys are declared columns.
    pub fn insert(&self, class: &str, fields: Value) -> Result<RecordId> {
        let fields = into_object(class, fields)?;
        let mut tables = self.tables.write();
        let table = tables
            .get_mut(class)
            .ok_or_else(|| Error::TableNotFound(class.to_string()))?;
        table.schema.validate(&fields)?;

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        table.rows.insert(id, Record::new(id, class, fields));
        tracing::trace!(table = class, id, "record inserted");
        Ok(id)
    }

    /// Fetches one record by identifier.
    pub fn get(&self, class: &str, id: RecordId) -> Result<Record> {
        let tables = self.tables.read();
        let table = tables
            .get(class)
            .ok_or_else(|| Error::TableNotFound(class.to_string()))?;
        table
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::RecordNotFound {
                class: class.to_string(),
                id,
            })
    }

    /// Merges `fields` into an existing record.
    pub fn update(&self, class: &str, id: RecordId, fields: Value) -> Result<()> {
        let fields = into_object(class, fields)?;
        let mut tables = self.tables.write();
        let table = tables
            .get_mut(class)
            .ok_or_else(|| Error::TableNotFound(class.to_string()))?;
        table.schema.validate(&fields)?;

        let record = table.rows.get_mut(&id).ok_or_else(|| Error::RecordNotFound {
            class: class.to_string(),
            id,
        })?;
        record.merge_fields(fields);
        Ok(())
    }

    /// Removes a record, keeping the order of the remaining rows.
    pub fn delete(&self, class: &str, id: RecordId) -> Result<Record> {
        let mut tables = self.tables.write();
        let table = tables
            .get_mut(class)
            .ok_or_else(|| Error::TableNotFound(class.to_string()))?;
        table
            .rows
            .shift_remove(&id)
            .ok_or_else(|| Error::RecordNotFound {
                class: class.to_string(),
                id,
            })
    }

    /// Returns the number of records in a table.
    pub fn len(&self, class: &str) -> Result<usize> {
        self.tables
            .read()
            .get(class)
            .map(|t| t.rows.len())
            .ok_or_else(|| Error::TableNotFound(class.to_string()))
    }
}

impl RecordSource for RecordStore {
    fn has_class(&self, class: &str) -> bool {
        self.has_table(class)
    }

    fn scan(&self, class: &str) -> Result<Vec<Record>> {
        let tables = self.tables.read();
        let table = tables
            .get(class)
            .ok_or_else(|| Error::TableNotFound(class.to_string()))?;
        Ok(table.rows.values().cloned().collect())
    }
}

fn into_object(class: &str, fields: Value) -> Result<serde_json::Map<String, Value>> {
    match fields {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(serde_json::Map::new()),
        other => Err(Error::SchemaValidation(format!(
            "Record for '{class}' must be a JSON object, got {other}"
        ))),
    }
}
