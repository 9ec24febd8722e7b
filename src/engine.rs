//! Engine Module
//!
//! The record engine that coordinates both indexes.
//!
//! ## Responsibilities
//! - Own the primary index (id -> Record) and the secondary index
//!   (folded surname -> ids sharing it)
//! - Keep both indexes consistent under insert / update / delete
//! - Answer point, range and prefix queries with their comparison cost

use std::collections::BTreeSet;

use tracing::{debug, error, trace, warn};

use crate::bst::OrderedMap;
use crate::config::Config;
use crate::error::{RecordError, Result};
use crate::prefix;
use crate::record::{Record, RecordId};

/// A query result together with the comparisons it cost
#[derive(Debug, Clone, PartialEq)]
pub struct Measured<T> {
    pub value: T,

    /// Comparisons charged to the queried index by this call alone
    pub comparisons: u64,
}

impl<T> Measured<T> {
    pub fn new(value: T, comparisons: u64) -> Self {
        Self { value, comparisons }
    }

    pub fn into_parts(self) -> (T, u64) {
        (self.value, self.comparisons)
    }
}

/// The dual-index record engine
///
/// ## Index Consistency
///
/// For every stored record `r`, `fold(r.last)` is a key of the secondary
/// index and `r.id` belongs to its set; every id in a secondary set names
/// a stored record. Only the mutating methods below touch the indexes, and
/// each performs both updates before returning.
///
/// A secondary key whose set becomes empty stays in the tree, so deletions
/// never change the secondary index's shape.
#[derive(Debug)]
pub struct Engine {
    /// Engine configuration
    config: Config,

    /// id -> Record (sole owner of every record)
    primary: OrderedMap<RecordId, Record>,

    /// folded surname -> ids of the records carrying it
    secondary: OrderedMap<String, BTreeSet<RecordId>>,
}

impl Engine {
    /// Create an empty engine with the default config
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create an empty engine
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            primary: OrderedMap::new(),
            secondary: OrderedMap::new(),
        }
    }

    /// Store a record under its id
    ///
    /// Steps:
    /// 1. Insert into the primary index (rejects a taken id, no mutation)
    /// 2. Add the id to its surname's set, creating the set on first use
    pub fn insert_record(&mut self, record: Record) -> Result<()> {
        let id = record.id;
        let surname = self.fold(&record.last);

        if !self.primary.insert(id, record) {
            debug!(id, "rejected duplicate record id");
            return Err(RecordError::DuplicateId(id));
        }

        debug!(id, surname = %surname, "inserted record");
        self.link_surname(surname, id);
        Ok(())
    }

    /// Point lookup by id
    pub fn find_by_id(&self, id: RecordId) -> Measured<Option<&Record>> {
        self.primary.reset_metrics();
        let record = self.primary.find(&id);
        let comparisons = self.primary.comparisons();

        self.observe("find_by_id", comparisons);
        Measured::new(record, comparisons)
    }

    /// All records with `lo <= id <= hi`, in ascending id order
    pub fn range_by_id(&self, lo: RecordId, hi: RecordId) -> Measured<Vec<&Record>> {
        self.primary.reset_metrics();
        let mut rows = Vec::new();
        self.primary.range_apply(&lo, &hi, |_, record| rows.push(record));
        let comparisons = self.primary.comparisons();

        self.observe("range_by_id", comparisons);
        Measured::new(rows, comparisons)
    }

    /// All records whose surname starts with `prefix`, ignoring case
    ///
    /// Records are grouped by surname in ascending surname order, each
    /// group in ascending id order. The reported cost is the secondary
    /// index scan only; resolving ids through the primary index is not
    /// counted.
    pub fn prefix_by_last(&self, prefix: &str) -> Measured<Vec<&Record>> {
        let lo = self.fold(prefix);
        self.secondary.reset_metrics();

        let mut rows = Vec::new();
        let collect = |surname: &String, ids: &BTreeSet<RecordId>| {
            // The inclusive scan admits the bound itself, which never matches
            if !surname.starts_with(lo.as_str()) {
                return;
            }
            for id in ids {
                match self.primary.find(id) {
                    Some(record) => rows.push(record),
                    None => error!(id, surname = %surname, "secondary index names a missing record"),
                }
            }
        };

        match prefix::upper_bound(&lo) {
            Some(hi) => self.secondary.range_apply(&lo, &hi, collect),
            None => self.secondary.range_apply_from(&lo, collect),
        }
        let comparisons = self.secondary.comparisons();

        self.observe("prefix_by_last", comparisons);
        Measured::new(rows, comparisons)
    }

    /// Delete a record, returning whether one was removed
    pub fn delete_by_id(&mut self, id: RecordId) -> bool {
        self.remove_by_id(id).is_some()
    }

    /// Delete a record and hand it back
    ///
    /// Steps:
    /// 1. Drop the id from its surname's set (the set's node stays)
    /// 2. Erase the record from the primary index
    pub fn remove_by_id(&mut self, id: RecordId) -> Option<Record> {
        let surname = self.fold(&self.primary.find(&id)?.last);

        self.unlink_surname(&surname, id);
        let record = self.primary.remove(&id);

        debug!(id, surname = %surname, "deleted record");
        record
    }

    /// Find-and-mutate a stored record
    ///
    /// `mutate` works on a copy; nothing is written if it changes the id.
    /// A changed surname moves the id to its new secondary set.
    pub fn update_by_id<F>(&mut self, id: RecordId, mutate: F) -> Result<()>
    where
        F: FnOnce(&mut Record),
    {
        let Some(current) = self.primary.find(&id) else {
            return Err(RecordError::NotFound(id));
        };
        let old_surname = self.fold(&current.last);
        let mut draft = current.clone();

        mutate(&mut draft);
        if draft.id != id {
            return Err(RecordError::ImmutableId {
                id,
                attempted: draft.id,
            });
        }

        let new_surname = self.fold(&draft.last);
        if new_surname != old_surname {
            debug!(id, from = %old_surname, to = %new_surname, "moving record between surnames");
            self.unlink_surname(&old_surname, id);
            self.link_surname(new_surname, id);
        }

        if let Some(stored) = self.primary.find_mut(&id) {
            *stored = draft;
        }
        Ok(())
    }

    // =========================================================================
    // Index Maintenance
    // =========================================================================

    fn link_surname(&mut self, surname: String, id: RecordId) {
        match self.secondary.find_mut(&surname) {
            Some(ids) => {
                ids.insert(id);
            }
            None => {
                self.secondary.insert(surname, BTreeSet::from([id]));
            }
        }
    }

    fn unlink_surname(&mut self, surname: &str, id: RecordId) {
        let unlinked = match self.secondary.find_mut(surname) {
            Some(ids) => ids.remove(&id),
            None => false,
        };
        if !unlinked {
            error!(id, surname = %surname, "record missing from its surname set");
        }
    }

    fn fold(&self, text: &str) -> String {
        prefix::fold(text, self.config.case_folding)
    }

    fn observe(&self, operation: &'static str, comparisons: u64) {
        trace!(operation, comparisons, "query cost");
        if let Some(limit) = self.config.cost_warn_threshold {
            if comparisons > limit {
                warn!(operation, comparisons, limit, "query exceeded comparison threshold");
            }
        }
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.primary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_empty()
    }

    /// Number of secondary index nodes (distinct surnames ever stored)
    pub fn surname_count(&self) -> usize {
        self.secondary.len()
    }

    /// Height of the primary index tree
    pub fn primary_height(&self) -> usize {
        self.primary.height()
    }

    /// Height of the secondary index tree
    pub fn secondary_height(&self) -> usize {
        self.secondary.height()
    }

    /// All records in ascending id order
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.primary.iter().map(|(_, record)| record)
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
