//! Record definitions
//!
//! The fixed-schema row stored by the engine.

/// Primary key of a record
pub type RecordId = u32;

/// A single row in the store
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Unique identifier, immutable once the record is stored
    pub id: RecordId,

    /// Last name (indexed case-insensitively)
    pub last: String,

    pub first: String,

    pub major: String,

    pub gpa: f64,

    /// Soft-delete marker. Not consulted by the engine: deletion always
    /// removes the record from both indexes.
    pub deleted: bool,
}

impl Record {
    /// Create a live record
    pub fn new(
        id: RecordId,
        last: impl Into<String>,
        first: impl Into<String>,
        major: impl Into<String>,
        gpa: f64,
    ) -> Self {
        Self {
            id,
            last: last.into(),
            first: first.into(),
            major: major.into(),
            gpa,
            deleted: false,
        }
    }
}
