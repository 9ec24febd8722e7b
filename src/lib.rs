//! # recordkv
//!
//! An in-memory record store with:
//! - A generic, unbalanced binary search tree that counts every key comparison
//! - A primary index by record id (point and range queries)
//! - A secondary index by case-folded surname (prefix queries)
//! - Consistency between both indexes across insert / update / delete
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Engine                               │
//! │   insert_record / find_by_id / range_by_id / prefix_by_last  │
//! │              update_by_id / delete_by_id                     │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌──────────────────┐
//!   │   Primary   │◄─────────│    Secondary     │
//!   │ id → Record │   ids    │ surname → {ids}  │
//!   └─────────────┘          └──────────────────┘
//!          │                         │
//!          └────────────┬────────────┘
//!                       ▼
//!               ┌───────────────┐
//!               │  OrderedMap   │
//!               │ (counted BST) │
//!               └───────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use recordkv::{Engine, Record};
//!
//! let mut engine = Engine::new();
//! engine.insert_record(Record::new(1, "Smith", "Riley", "CS", 2.98)).unwrap();
//! engine.insert_record(Record::new(2, "Smythe", "Avery", "EE", 3.70)).unwrap();
//!
//! let hits = engine.prefix_by_last("SMI");
//! assert_eq!(hits.value.len(), 1);
//! assert_eq!(engine.find_by_id(2).comparisons, 3);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod bst;
pub mod prefix;
pub mod engine;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{RecordError, Result};
pub use config::{CaseFolding, Config};
pub use record::{Record, RecordId};
pub use bst::OrderedMap;
pub use engine::{Engine, Measured};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of recordkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
