// ⚠️ Errors - identifiers, data files, office requests
//
// None of these are fatal: the office turns every one of them into a Notice
// for whoever is driving the application.

use std::path::PathBuf;

use thiserror::Error;

use crate::identity::EntityKind;
use crate::notice::Notice;

/// Result type used by the office layer.
pub type OfficeResult<T> = Result<T, OfficeError>;

// ============================================================================
// IDENTIFIERS
// ============================================================================

/// A record ID string could not be understood.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
    #[error("empty identifier")]
    Empty,

    #[error("unknown identifier prefix in {0:?}")]
    UnknownPrefix(String),

    #[error("invalid sequence number in {0:?}")]
    InvalidSequence(String),

    #[error("expected a {expected} identifier, got {found:?}")]
    WrongKind { expected: EntityKind, found: String },

    #[error("no {0} identifiers left to allocate")]
    Exhausted(EntityKind),
}

// ============================================================================
// PERSISTENCE
// ============================================================================

/// Failure reading or writing one kind's data file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The data file does not exist yet (expected on a first run).
    #[error("{} does not exist", .path.display())]
    Missing { path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode {kind} records: {source}")]
    Encode {
        kind: EntityKind,
        #[source]
        source: serde_json::Error,
    },

    /// A file holds a record keyed by another kind's ID (e.g. `C1` in the employee file).
    #[error("{} contains a foreign identifier {id}", .path.display())]
    ForeignId { path: PathBuf, id: String },

    #[error("{} has a key {key:?} that is not an identifier: {source}", .path.display())]
    InvalidKey {
        path: PathBuf,
        key: String,
        #[source]
        source: IdError,
    },

    /// The record stored under a key carries a different ID (`"V1": {"venue_id": "V9"}`).
    #[error("{} stores {id} under the key {key}", .path.display())]
    KeyMismatch { path: PathBuf, key: String, id: String },

    /// Two keys name the same record, e.g. `EP7` and `EP007`.
    #[error("{} holds {id} more than once", .path.display())]
    DuplicateId { path: PathBuf, id: String },
}

impl StoreError {
    pub fn is_missing(&self) -> bool {
        matches!(self, StoreError::Missing { .. })
    }
}

// ============================================================================
// OFFICE OPERATIONS
// ============================================================================

/// A create / modify / remove / find request was rejected.
///
/// Rejection always happens before any mutation, so the collection and its
/// data file are untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OfficeError {
    #[error("All fields must be filled out ({0} is empty).")]
    MissingField(&'static str),

    #[error("Invalid {field} input. {field} must be {expected}, got {value:?}.")]
    InvalidNumber {
        field: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("Unrecognised record ID: {0}")]
    UnknownId(String),

    #[error("Expected field=value, got {0:?}.")]
    MalformedField(String),

    #[error("Unknown field {0:?}.")]
    UnknownField(String),

    #[error("Could not assign a new ID: {0}")]
    Id(#[from] IdError),
}

impl OfficeError {
    pub fn missing(field: &'static str) -> Self {
        Self::MissingField(field)
    }

    pub fn invalid_number(field: &'static str, expected: &'static str, value: &str) -> Self {
        Self::InvalidNumber {
            field,
            expected,
            value: value.to_string(),
        }
    }

    pub fn not_found(kind: EntityKind, id: &str) -> Self {
        Self::NotFound {
            kind,
            id: id.trim().to_string(),
        }
    }

    /// True for bad form input, false for lookup failures.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            OfficeError::MissingField(_)
                | OfficeError::InvalidNumber { .. }
                | OfficeError::MalformedField(_)
                | OfficeError::UnknownField(_)
        )
    }

    /// The user-visible form of this error.
    pub fn notice(&self) -> Notice {
        let title = if self.is_input_error() { "Input Error" } else { "Error" };
        Notice::error(title, self.to_string())
    }
}
