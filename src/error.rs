//! Error types for the document model

use crate::tables::TableKind;
use thiserror::Error;

/// Main error type for document operations
///
/// Failed removals are not errors: `remove` reports them with `false`.
/// Everything here is a programming or data error that needs a fix rather
/// than a retry.
#[derive(Debug, Error)]
pub enum DxfError {
    /// A table is at its maximum entry count
    #[error("{kind} table overflow: maximum of {capacity} entries reached")]
    TableOverflow { kind: TableKind, capacity: usize },

    /// Missing or malformed argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The name is empty or contains characters a table name cannot hold
    #[error("Invalid {kind} name: \"{name}\"")]
    InvalidName { kind: TableKind, name: String },

    /// A rename targets a name already present in the table
    #[error("{kind} \"{name}\" already exists")]
    NameCollision { kind: TableKind, name: String },

    /// Reserved entries cannot be renamed
    #[error("{kind} \"{name}\" is reserved")]
    ReservedObject { kind: TableKind, name: String },

    /// The table does not accept additions
    #[error("{0} table is read-only")]
    ReadOnlyTable(TableKind),

    /// No entry with that name
    #[error("{kind} \"{name}\" not found")]
    EntryNotFound { kind: TableKind, name: String },

    /// Object not found in document
    #[error("Object not found: handle {0:#X}")]
    ObjectNotFound(u64),

    /// A pre-assigned handle is already live in the document
    #[error("Duplicate handle: {0:#X}")]
    DuplicateHandle(u64),

    /// A cross-reference names an entry that cannot be created on demand
    #[error("Unresolved {kind} reference: \"{name}\"")]
    UnresolvedReference { kind: TableKind, name: String },

    /// The object already belongs to a block or another document
    #[error("Object {0:#X} already has an owner")]
    ForeignObject(u64),

    /// A collection observer vetoed the mutation
    #[error("Cancelled: {0}")]
    Cancelled(String),

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

/// Result type alias for document operations
pub type Result<T> = std::result::Result<T, DxfError>;

impl From<String> for DxfError {
    fn from(s: String) -> Self {
        DxfError::Custom(s)
    }
}

impl From<&str> for DxfError {
    fn from(s: &str) -> Self {
        DxfError::Custom(s.to_string())
    }
}
