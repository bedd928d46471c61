//! Integration tests for prefix cursor lifecycle
//!
//! The cursor file is the only state carried between runs; these tests
//! drive it through the same load/advance/save path the CLI uses.

use rego_sweep::keyspace::{KeyspaceError, Plate, Prefix, PrefixCursor, PLATES_PER_PREFIX};

#[test]
fn fresh_cursor_starts_at_aaa_and_advances() {
    let dir = tempfile::tempdir().unwrap();
    let cursor = PrefixCursor::new(dir.path().join("current_prefix.txt"));

    assert_eq!(cursor.load().unwrap().to_string(), "AAA");
    assert_eq!(cursor.advance().unwrap().to_string(), "AAB");
    assert_eq!(cursor.advance().unwrap().to_string(), "AAC");

    // The state file now carries the advanced prefix for the next run.
    let raw = std::fs::read_to_string(dir.path().join("current_prefix.txt")).unwrap();
    assert_eq!(raw, "AAC");
}

#[test]
fn carry_rules_apply_through_the_cursor() {
    let dir = tempfile::tempdir().unwrap();
    let cursor = PrefixCursor::new(dir.path().join("current_prefix.txt"));

    cursor.save(Prefix::parse("AAZ").unwrap()).unwrap();
    assert_eq!(cursor.advance().unwrap().to_string(), "ABA");

    cursor.save(Prefix::parse("AZZ").unwrap()).unwrap();
    assert_eq!(cursor.advance().unwrap().to_string(), "BAA");
}

#[test]
fn exhausted_keyspace_is_an_error_not_a_wrap() {
    let dir = tempfile::tempdir().unwrap();
    let cursor = PrefixCursor::new(dir.path().join("current_prefix.txt"));

    cursor.save(Prefix::parse("ZZZ").unwrap()).unwrap();
    let err = cursor.advance().unwrap_err();
    assert!(matches!(err, KeyspaceError::PrefixOverflow));

    // A failed advance must not corrupt the stored prefix.
    assert_eq!(cursor.load().unwrap().to_string(), "ZZZ");
}

#[test]
fn corrupt_cursor_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("current_prefix.txt");
    std::fs::write(&path, "not-a-prefix").unwrap();

    let cursor = PrefixCursor::new(&path);
    assert!(matches!(
        cursor.load(),
        Err(KeyspaceError::InvalidPrefix(_))
    ));
}

#[test]
fn sequence_covers_the_whole_prefix_once() {
    let prefix = Prefix::parse("KWT").unwrap();
    let plates: Vec<Plate> = Plate::sequence(prefix).collect();
    assert_eq!(plates.len(), PLATES_PER_PREFIX);
    assert_eq!(plates.first().unwrap().as_str(), "KWT000");
    assert_eq!(plates.last().unwrap().as_str(), "KWT999");
}
