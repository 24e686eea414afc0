//! Table schema declarations.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use super::record::{CLASS_COLUMN, ID_COLUMN};
use crate::error::{Error, Result};

/// Value kinds a column accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnKind {
    /// Integer value (i64 or u64).
    Int,
    /// Any JSON number.
    Float,
    /// String value.
    String,
    /// Boolean value.
    Bool,
    /// Arbitrary JSON.
    Json,
    /// Single reference to a record of the named class.
    Reference(String),
}

impl ColumnKind {
    /// Returns true if `value` is acceptable for this kind. Null always is.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        if value.is_null() {
            return true;
        }
        match self {
            Self::Int => value.is_i64() || value.is_u64(),
            Self::Float => value.is_number(),
            Self::String => value.is_string(),
            Self::Bool => value.is_boolean(),
            Self::Json => true,
            Self::Reference(_) => value.is_u64(),
        }
    }
}

/// Declared columns of one table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSchema {
    name: String,
    columns: IndexMap<String, ColumnKind>,
}

impl TableSchema {
    /// Creates a table schema without columns.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            columns: IndexMap::new(),
        }
    }

    /// Adds a column (builder pattern).
    #[must_use]
    pub fn with_column(mut self, name: &str, kind: ColumnKind) -> Self {
        self.columns.insert(name.to_string(), kind);
        self
    }

    /// Adds a reference column pointing at `class` (builder pattern).
    #[must_use]
    pub fn with_reference(self, name: &str, class: &str) -> Self {
        self.with_column(name, ColumnKind::Reference(class.to_string()))
    }

    /// Returns the table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared columns in declaration order.
    #[must_use]
    pub fn columns(&self) -> &IndexMap<String, ColumnKind> {
        &self.columns
    }

    /// Returns the kind of a declared column.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnKind> {
        self.columns.get(name)
    }

    /// Checks a set of field values against this schema.
    pub fn validate(&self, fields: &Map<String, Value>) -> Result<()> {
        for (name, value) in fields {
            if name == ID_COLUMN || name == CLASS_COLUMN {
                return Err(Error::SchemaValidation(format!(
                    "Column '{}' is reserved in table '{}'",
                    name, self.name
                )));
            }
            let Some(kind) = self.columns.get(name) else {
                let declared: Vec<&str> = self.columns.keys().map(String::as_str).collect();
                return Err(Error::SchemaValidation(format!(
                    "Column '{}' not declared in table '{}'. Declared: {:?}",
                    name, self.name, declared
                )));
            };
            if !kind.accepts(value) {
                return Err(Error::SchemaValidation(format!(
                    "Column '{}.{}' expects {:?}, got {}",
                    self.name, name, kind, value
                )));
            }
        }
        Ok(())
    }
}
