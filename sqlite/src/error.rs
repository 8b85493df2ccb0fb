//! Error types for SQLite mapping operations.
//!
//! Every failure surfaces as a [`StoreError`] carrying a numeric code and a
//! descriptive message. Native engine failures keep SQLite's extended result
//! code; failures local to the mapper (a record returning the wrong value
//! kind, an operation on a closed connection) use small negative codes so
//! callers can still branch on [`StoreError::code`] uniformly.

use rowmap_core::FieldType;
use thiserror::Error;

/// Errors that can occur while mapping records to SQLite.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Native engine failure (open, prepare, bind, step, close).
    #[error("database error {code}: {message}")]
    Database {
        /// SQLite extended result code.
        code: i32,
        /// Engine-provided message.
        message: String,
    },

    /// A record did not recognize a field named by its own descriptors.
    #[error("type '{type_name}' does not expose a field named '{field}'")]
    UnknownField {
        /// The record type's identifier.
        type_name: String,
        /// The field that could not be read.
        field: String,
    },

    /// A record returned a value kind that does not match the field's
    /// declared type.
    #[error("field '{field}' declares {expected:?} but the record returned {found}")]
    TypeMismatch {
        /// The mismatched field.
        field: String,
        /// The declared field type.
        expected: FieldType,
        /// Kind of the value actually read.
        found: &'static str,
    },

    /// Nested records were supplied for an `Array` field without an item
    /// class annotation.
    #[error("array field '{field}' has no item class; nested records cannot be inserted")]
    MissingItemClass {
        /// The offending field.
        field: String,
    },

    /// Item-class references form a cycle, so table derivation would never
    /// terminate.
    #[error("item class cycle detected through '{type_name}'")]
    ItemClassCycle {
        /// The type at which the cycle was detected.
        type_name: String,
    },

    /// A type declares no scalar columns, so no row shape exists for it.
    #[error("type '{type_name}' declares no scalar columns")]
    NoColumns {
        /// The column-less type.
        type_name: String,
    },

    /// Operation attempted after `close`.
    #[error("connection is closed")]
    Closed,
}

impl StoreError {
    /// Numeric failure code: the SQLite extended result code for native
    /// failures, a negative library code otherwise.
    pub fn code(&self) -> i32 {
        match self {
            Self::Database { code, .. } => *code,
            Self::UnknownField { .. } => -1,
            Self::TypeMismatch { .. } => -2,
            Self::MissingItemClass { .. } => -3,
            Self::ItemClassCycle { .. } => -4,
            Self::NoColumns { .. } => -5,
            Self::Closed => -6,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        let code = match &e {
            rusqlite::Error::SqliteFailure(err, _) => err.extended_code,
            rusqlite::Error::SqlInputError { error, .. } => error.extended_code,
            _ => -1,
        };
        Self::Database {
            code,
            message: e.to_string(),
        }
    }
}

/// Convenience alias for results with [`StoreError`].
pub type Result<T> = std::result::Result<T, StoreError>;
