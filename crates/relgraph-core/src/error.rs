//! Error types for `relgraph`.
//!
//! Traversal itself never fails: every error here comes from the record store,
//! from schema declaration, or from resolving a collection kind in the factory.

use thiserror::Error;

/// Result type alias for `relgraph` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in `relgraph` operations.
///
/// Error codes follow the pattern `RELGRAPH-XXX` for easy debugging.
#[derive(Error, Debug)]
pub enum Error {
    /// Table (record class) not declared in the store (RELGRAPH-001).
    #[error("[RELGRAPH-001] Table '{0}' not found")]
    TableNotFound(String),

    /// Table already declared (RELGRAPH-002).
    #[error("[RELGRAPH-002] Table '{0}' already exists")]
    TableExists(String),

    /// Record not found (RELGRAPH-003).
    #[error("[RELGRAPH-003] Record {id} not found in '{class}'")]
    RecordNotFound {
        /// Table the lookup ran against.
        class: String,
        /// Missing record identifier.
        id: u64,
    },

    /// Record does not fit its table schema (RELGRAPH-004).
    #[error("[RELGRAPH-004] Schema validation error: {0}")]
    SchemaValidation(String),

    /// A collection kind could not be resolved by the factory (RELGRAPH-005).
    #[error("[RELGRAPH-005] Cannot resolve collection kind '{0}'")]
    FactoryResolution(String),

    /// Configuration error (RELGRAPH-006).
    #[error("[RELGRAPH-006] Configuration error: {0}")]
    Config(String),

    /// Backing store failure (RELGRAPH-007).
    #[error("[RELGRAPH-007] Storage error: {0}")]
    Storage(String),

    /// Internal error (RELGRAPH-008).
    ///
    /// Indicates an unexpected internal error. Please report if encountered.
    #[error("[RELGRAPH-008] Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Returns the error code (e.g., "RELGRAPH-001").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::TableNotFound(_) => "RELGRAPH-001",
            Self::TableExists(_) => "RELGRAPH-002",
            Self::RecordNotFound { .. } => "RELGRAPH-003",
            Self::SchemaValidation(_) => "RELGRAPH-004",
            Self::FactoryResolution(_) => "RELGRAPH-005",
            Self::Config(_) => "RELGRAPH-006",
            Self::Storage(_) => "RELGRAPH-007",
            Self::Internal(_) => "RELGRAPH-008",
        }
    }

    /// Returns true if the caller can fix the input and try again.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Storage(_) | Self::Internal(_))
    }
}

impl From<crate::config::ConfigError> for Error {
    fn from(err: crate::config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
