//! Stored records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Store-assigned record identifier.
pub type RecordId = u64;

/// Pseudo-column resolving to [`Record::id`].
pub const ID_COLUMN: &str = "ID";

/// Pseudo-column resolving to [`Record::class_name`].
pub const CLASS_COLUMN: &str = "ClassName";

/// A row of a table: identifier, class tag and declared field values.
///
/// Nodes and edges are both plain records; an edge is a record whose table
/// declares two reference columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    id: RecordId,
    class_name: String,
    fields: Map<String, Value>,
}

impl Record {
    /// Creates a record.
    #[must_use]
    pub fn new(id: RecordId, class_name: &str, fields: Map<String, Value>) -> Self {
        Self {
            id,
            class_name: class_name.to_string(),
            fields,
        }
    }

    /// Returns the record identifier.
    #[must_use]
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Returns the class (table) this record belongs to.
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Returns the declared field values.
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Returns a stored field, ignoring pseudo-columns.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Reads a column, resolving `ID` and `ClassName`.
    #[must_use]
    pub fn value(&self, column: &str) -> Option<Value> {
        match column {
            ID_COLUMN => Some(Value::from(self.id)),
            CLASS_COLUMN => Some(Value::from(self.class_name.as_str())),
            _ => self.fields.get(column).cloned(),
        }
    }

    /// Reads a column as a record reference.
    ///
    /// Returns `None` for nulls, missing fields and non-integer values.
    #[must_use]
    pub fn reference(&self, column: &str) -> Option<RecordId> {
        if column == ID_COLUMN {
            return Some(self.id);
        }
        self.fields.get(column).and_then(Value::as_u64)
    }

    pub(crate) fn merge_fields(&mut self, fields: Map<String, Value>) {
        self.fields.extend(fields);
    }
}
