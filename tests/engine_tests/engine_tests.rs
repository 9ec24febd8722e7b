//! Tests for Engine
//!
//! These tests verify:
//! - Insert / find / range / prefix / delete over both indexes
//! - Comparison costs reported per call
//! - Secondary index shape under repeated and deleted surnames
//! - Find-and-mutate updates
//! - Case folding configuration

use recordkv::{CaseFolding, Config, Engine, Record, RecordError, RecordId};

// =============================================================================
// Helper Functions
// =============================================================================

fn student(id: RecordId, last: &str) -> Record {
    Record::new(id, last, "First", "CS", 3.0)
}

fn engine_with(rows: &[(RecordId, &str)]) -> Engine {
    let mut engine = Engine::new();
    for &(id, last) in rows {
        engine.insert_record(student(id, last)).unwrap();
    }
    engine
}

fn ids(rows: &[&Record]) -> Vec<RecordId> {
    rows.iter().map(|r| r.id).collect()
}

// =============================================================================
// Insert / Find Tests
// =============================================================================

#[test]
fn test_new_engine_is_empty() {
    let engine = Engine::new();

    assert!(engine.is_empty());
    assert_eq!(engine.len(), 0);
    assert_eq!(engine.surname_count(), 0);

    let found = engine.find_by_id(1);
    assert_eq!(found.value, None);
    assert_eq!(found.comparisons, 0);
}

#[test]
fn test_find_returns_all_fields() {
    let mut engine = Engine::new();
    engine
        .insert_record(Record::new(7, "Okafor", "Chidi", "Philosophy", 3.41))
        .unwrap();

    let record = engine.find_by_id(7).value.unwrap();

    assert_eq!(record.id, 7);
    assert_eq!(record.last, "Okafor");
    assert_eq!(record.first, "Chidi");
    assert_eq!(record.major, "Philosophy");
    assert_eq!(record.gpa, 3.41);
    assert!(!record.deleted);
}

#[test]
fn test_duplicate_id_is_rejected_without_mutation() {
    let mut engine = engine_with(&[(1, "Smith"), (2, "Jones")]);

    let result = engine.insert_record(student(2, "Brown"));

    assert_eq!(result, Err(RecordError::DuplicateId(2)));
    assert_eq!(engine.len(), 2);
    assert_eq!(engine.surname_count(), 2);
    assert_eq!(engine.find_by_id(2).value.unwrap().last, "Jones");
    assert!(engine.prefix_by_last("brown").value.is_empty());
}

#[test]
fn test_find_cost_follows_insertion_order() {
    let engine = engine_with(&[(50, "A"), (30, "B"), (70, "C"), (60, "D")]);

    assert_eq!(engine.find_by_id(50).comparisons, 1);
    assert_eq!(engine.find_by_id(30).comparisons, 3);
    assert_eq!(engine.find_by_id(70).comparisons, 3);
    assert_eq!(engine.find_by_id(60).comparisons, 5);
    assert_eq!(engine.find_by_id(65).comparisons, 6);
}

#[test]
fn test_increasing_ids_skew_the_primary_index() {
    let n: RecordId = 50;
    let mut engine = Engine::new();
    for id in 1..=n {
        engine.insert_record(student(id, "Same")).unwrap();
    }

    assert_eq!(engine.primary_height(), n as usize);
    assert_eq!(engine.find_by_id(n).comparisons, 2 * u64::from(n) - 1);
    assert_eq!(engine.find_by_id(n + 1).comparisons, 2 * u64::from(n));
}

#[test]
fn test_counts_do_not_accumulate_across_calls() {
    let engine = engine_with(&[(1, "A"), (2, "B"), (3, "C")]);

    let first = engine.find_by_id(3).comparisons;
    let second = engine.find_by_id(3).comparisons;

    assert_eq!(first, 5);
    assert_eq!(second, 5);
}

// =============================================================================
// Range Tests
// =============================================================================

#[test]
fn test_range_is_ascending_and_inclusive() {
    let engine = engine_with(&[(40, "A"), (20, "B"), (60, "C"), (10, "D"), (30, "E"), (50, "F")]);

    let rows = engine.range_by_id(20, 50).value;

    assert_eq!(ids(&rows), vec![20, 30, 40, 50]);
}

#[test]
fn test_range_without_matches() {
    let engine = engine_with(&[(10, "A"), (20, "B")]);

    assert!(engine.range_by_id(11, 19).value.is_empty());
    assert!(engine.range_by_id(30, 20).value.is_empty());
}

#[test]
fn test_range_skips_deleted_ids() {
    let mut engine = engine_with(&[(1, "A"), (2, "B"), (3, "C"), (4, "D")]);

    assert!(engine.delete_by_id(3));

    assert_eq!(ids(&engine.range_by_id(1, 4).value), vec![1, 2, 4]);
}

// =============================================================================
// Prefix Tests
// =============================================================================

#[test]
fn test_prefix_is_case_insensitive() {
    let engine = engine_with(&[(1, "McDonald"), (2, "MCCARTHY"), (3, "mcadams"), (4, "Mills")]);

    for prefix in ["mc", "MC", "Mc", "mC"] {
        let rows = engine.prefix_by_last(prefix).value;
        assert_eq!(ids(&rows), vec![3, 2, 1], "prefix {:?}", prefix);
    }
}

#[test]
fn test_prefix_groups_by_surname() {
    let engine = engine_with(&[(5, "Lee"), (1, "Lewis"), (3, "Lee"), (2, "Lemke")]);

    let rows = engine.prefix_by_last("le").value;

    // lee {3, 5}, lemke {2}, lewis {1}
    assert_eq!(ids(&rows), vec![3, 5, 2, 1]);
}

#[test]
fn test_prefix_excludes_the_successor_key() {
    let engine = engine_with(&[(1, "Ab"), (2, "Ac"), (3, "Abbott")]);

    let rows = engine.prefix_by_last("ab").value;

    assert_eq!(ids(&rows), vec![1, 3]);
}

#[test]
fn test_prefix_matches_whole_surname() {
    let engine = engine_with(&[(1, "Li"), (2, "Lin"), (3, "Liu")]);

    assert_eq!(ids(&engine.prefix_by_last("lin").value), vec![2]);
    assert_eq!(ids(&engine.prefix_by_last("li").value), vec![1, 2, 3]);
    assert!(engine.prefix_by_last("lio").value.is_empty());
}

#[test]
fn test_empty_prefix_matches_everything() {
    let engine = engine_with(&[(1, "Zed"), (2, "Adams"), (3, "Moss")]);

    let measured = engine.prefix_by_last("");

    assert_eq!(ids(&measured.value), vec![2, 3, 1]);
    // Unbounded above: 2 comparisons per node, all 3 nodes touched
    assert_eq!(measured.comparisons, 6);
}

#[test]
fn test_repeated_surname_keeps_secondary_shape() {
    let mut engine = engine_with(&[(1, "Nguyen"), (2, "Patel"), (3, "Smith")]);
    let before = engine.prefix_by_last("smi").comparisons;
    let surnames = engine.surname_count();

    engine.insert_record(student(4, "SMITH")).unwrap();
    engine.insert_record(student(5, "smith")).unwrap();

    let after = engine.prefix_by_last("smi");
    assert_eq!(engine.surname_count(), surnames);
    assert_eq!(after.comparisons, before);
    assert_eq!(ids(&after.value), vec![3, 4, 5]);
}

// =============================================================================
// Delete Tests
// =============================================================================

#[test]
fn test_delete_missing_id() {
    let mut engine = engine_with(&[(1, "A")]);

    assert!(!engine.delete_by_id(2));
    assert_eq!(engine.len(), 1);
    assert_eq!(engine.surname_count(), 1);
}

#[test]
fn test_delete_twice() {
    let mut engine = engine_with(&[(1, "A"), (2, "B")]);

    assert!(engine.delete_by_id(1));
    assert!(!engine.delete_by_id(1));
    assert_eq!(engine.len(), 1);
}

#[test]
fn test_remove_returns_record() {
    let mut engine = engine_with(&[(1, "Park")]);

    let removed = engine.remove_by_id(1).unwrap();

    assert_eq!(removed.id, 1);
    assert_eq!(removed.last, "Park");
    assert!(engine.is_empty());
    assert_eq!(engine.find_by_id(1).value, None);
}

#[test]
fn test_delete_keeps_empty_surname_node() {
    let mut engine = engine_with(&[(1, "Ortiz"), (2, "Quinn")]);

    assert!(engine.delete_by_id(1));

    assert_eq!(engine.surname_count(), 2);
    assert!(engine.prefix_by_last("ortiz").value.is_empty());
}

#[test]
fn test_delete_with_two_children_promotes_successor() {
    let mut engine = engine_with(&[(50, "A"), (30, "B"), (70, "C"), (60, "D"), (80, "E")]);

    assert!(engine.delete_by_id(50));

    assert_eq!(engine.find_by_id(60).comparisons, 1);
    assert_eq!(engine.find_by_id(50).value, None);
    assert_eq!(ids(&engine.range_by_id(0, 100).value), vec![30, 60, 70, 80]);
}

#[test]
fn test_reinsert_after_delete() {
    let mut engine = engine_with(&[(1, "Old")]);

    assert!(engine.delete_by_id(1));
    engine.insert_record(student(1, "New")).unwrap();

    assert_eq!(engine.find_by_id(1).value.unwrap().last, "New");
    assert!(engine.prefix_by_last("old").value.is_empty());
    assert_eq!(ids(&engine.prefix_by_last("new").value), vec![1]);
}

// =============================================================================
// Update Tests
// =============================================================================

#[test]
fn test_update_in_place() {
    let mut engine = engine_with(&[(1, "Kim")]);

    engine.update_by_id(1, |r| r.gpa = 3.99).unwrap();

    assert_eq!(engine.find_by_id(1).value.unwrap().gpa, 3.99);
    assert_eq!(engine.surname_count(), 1);
}

#[test]
fn test_update_moves_surname() {
    let mut engine = engine_with(&[(1, "Kim"), (2, "Kim")]);

    engine.update_by_id(2, |r| r.last = "Kimura".to_string()).unwrap();

    assert_eq!(ids(&engine.prefix_by_last("kim").value), vec![1, 2]);
    assert_eq!(ids(&engine.prefix_by_last("kimu").value), vec![2]);
    assert_eq!(engine.surname_count(), 2);

    assert!(engine.delete_by_id(2));
    assert!(engine.prefix_by_last("kimu").value.is_empty());
}

#[test]
fn test_update_case_only_change_keeps_set() {
    let mut engine = engine_with(&[(1, "Kim")]);

    engine.update_by_id(1, |r| r.last = "KIM".to_string()).unwrap();

    assert_eq!(engine.surname_count(), 1);
    assert_eq!(engine.prefix_by_last("kim").value[0].last, "KIM");
}

#[test]
fn test_update_rejects_id_change() {
    let mut engine = engine_with(&[(1, "Kim")]);

    let result = engine.update_by_id(1, |r| {
        r.id = 9;
        r.last = "Changed".to_string();
    });

    assert_eq!(result, Err(RecordError::ImmutableId { id: 1, attempted: 9 }));
    assert_eq!(engine.find_by_id(1).value.unwrap().last, "Kim");
    assert_eq!(engine.find_by_id(9).value, None);
}

#[test]
fn test_update_missing_id() {
    let mut engine = Engine::new();

    assert_eq!(
        engine.update_by_id(3, |r| r.gpa = 1.0),
        Err(RecordError::NotFound(3))
    );
}

// =============================================================================
// Configuration Tests
// =============================================================================

#[test]
fn test_unicode_folding_by_default() {
    let engine = engine_with(&[(1, "Élan"), (2, "Ørsted")]);

    assert_eq!(ids(&engine.prefix_by_last("él").value), vec![1]);
    assert_eq!(ids(&engine.prefix_by_last("ØR").value), vec![2]);
    assert_eq!(ids(&engine.prefix_by_last("ør").value), vec![2]);
}

#[test]
fn test_ascii_folding() {
    let config = Config::builder().case_folding(CaseFolding::Ascii).build();
    let mut engine = Engine::with_config(config);
    engine.insert_record(student(1, "ÉLAN")).unwrap();

    assert!(engine.prefix_by_last("élan").value.is_empty());
    assert_eq!(ids(&engine.prefix_by_last("Élan").value), vec![1]);
}

#[test]
fn test_config_accessors() {
    let config = Config::builder().cost_warn_threshold(4).build();
    let engine = Engine::with_config(config);

    assert_eq!(engine.config().cost_warn_threshold, Some(4));
    assert_eq!(engine.config().case_folding, CaseFolding::Unicode);
}

#[test]
fn test_records_iterate_in_id_order() {
    let engine = engine_with(&[(3, "C"), (1, "A"), (2, "B")]);

    let all: Vec<RecordId> = engine.records().map(|r| r.id).collect();

    assert_eq!(all, vec![1, 2, 3]);
}
