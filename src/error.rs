//! Error types for recordkv
//!
//! Lookups report absence through `Option` and `bool`; this type covers
//! the mutations that can be refused.

use thiserror::Error;

use crate::record::RecordId;

/// Result type alias using RecordError
pub type Result<T> = std::result::Result<T, RecordError>;

/// Unified error type for recordkv operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    // -------------------------------------------------------------------------
    // Insertion Errors
    // -------------------------------------------------------------------------
    #[error("Duplicate record id: {0}")]
    DuplicateId(RecordId),

    // -------------------------------------------------------------------------
    // Update Errors
    // -------------------------------------------------------------------------
    #[error("Record not found: {0}")]
    NotFound(RecordId),

    #[error("Record id {id} is immutable (attempted to change it to {attempted})")]
    ImmutableId { id: RecordId, attempted: RecordId },
}
