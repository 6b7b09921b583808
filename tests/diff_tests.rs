//! Integration tests for snapshot diffing: the before/after workflow the
//! tree exists for.

use pretty_assertions::assert_eq;
use stattree::{DiffError, Node};

// ============================================================================
// SHARED TEST HELPERS
// ============================================================================

/// Simulated accumulated counters at some point in a run
fn snapshot_at(cycles: i64, hits: i64, misses: i64) -> Node {
    let mut root = Node::null("machine");
    root.add(Node::new("cycles", cycles));

    let cache = root.get("cache");
    cache.set_summable(true);
    cache.add(Node::new("hits", hits));
    cache.add(Node::new("misses", misses));

    root.add(Node::new("build", "v3"));
    root
}

// ============================================================================
// DELTA TREES
// ============================================================================

#[test]
fn test_before_after_delta() {
    let before = snapshot_at(1_000, 800, 200);
    let after = snapshot_at(5_000, 4_100, 900);

    let delta = after.subtract(&before).unwrap();

    assert_eq!(delta.name(), "machine");
    assert_eq!(delta.search("cycles").unwrap().value().as_i64(), 4_000);
    assert_eq!(delta.searchpath("cache/hits").unwrap().value().as_i64(), 3_300);
    assert_eq!(delta.searchpath("cache/misses").unwrap().value().as_i64(), 700);
    // strings carry the baseline's value through
    assert_eq!(delta.search("build").unwrap().value().as_string(), "v3");
}

#[test]
fn test_delta_is_detached_and_structurally_complete() {
    let before = snapshot_at(10, 5, 5);
    let after = snapshot_at(20, 10, 10);

    let delta = after.subtract(&before).unwrap();
    assert_eq!(delta.children().len(), after.children().len());
    // deltas of identical snapshots are all-zero at numeric leaves
    let zero = after.subtract(&after).unwrap();
    assert_eq!(zero.searchpath("cache/hits").unwrap().value().as_i64(), 0);
    assert_eq!(zero.search("cycles").unwrap().value().as_i64(), 0);
}

#[test]
fn test_delta_renders_with_percentages() {
    let before = snapshot_at(0, 0, 0);
    let after = snapshot_at(1_000, 750, 250);

    let delta = after.subtract(&before).unwrap();
    let text = delta.render();

    assert!(text.contains("cycles = 1000;"));
    assert!(text.contains("(total 1000)"));
    assert!(text.contains("[  75% ] hits = 750;"));
}

// ============================================================================
// STRUCTURAL MISMATCHES
// ============================================================================

#[test]
fn test_extra_child_in_current_is_rejected() {
    let mut after = snapshot_at(10, 5, 5);
    after.get("cache").add(Node::new("evictions", 3i64));
    let before = snapshot_at(5, 2, 3);

    match after.subtract(&before) {
        Err(DiffError::MissingCounterpart { path }) => {
            assert_eq!(path, "machine/cache/evictions");
        }
        other => panic!("expected MissingCounterpart, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_retyped_leaf_is_rejected() {
    let after = snapshot_at(10, 5, 5);
    let mut before = snapshot_at(5, 2, 3);
    before.search_mut("cycles").unwrap().assign(5.0f64);

    assert!(matches!(
        after.subtract(&before),
        Err(DiffError::TypeMismatch { .. })
    ));
}

#[test]
fn test_resized_array_is_rejected() {
    let mut after = Node::null("root");
    after.add(Node::new("hist", vec![1i64, 2, 3]));
    let mut before = Node::null("root");
    before.add(Node::new("hist", vec![1i64, 2]));

    assert!(matches!(
        after.subtract(&before),
        Err(DiffError::CountMismatch { .. })
    ));
}

// ============================================================================
// END-TO-END: SNAPSHOT, DIFF, RENDER
// ============================================================================

#[test]
fn test_diff_through_the_binary_codec() {
    use stattree::codec::{read_node, write_node};

    let before = snapshot_at(1_000, 800, 200);
    let after = snapshot_at(2_000, 1_700, 300);

    // persist both snapshots, read them back, then diff the decoded trees
    let mut before_bytes = Vec::new();
    let mut after_bytes = Vec::new();
    write_node(&before, &mut before_bytes).unwrap();
    write_node(&after, &mut after_bytes).unwrap();

    let before_decoded = read_node(&mut before_bytes.as_slice()).unwrap();
    let after_decoded = read_node(&mut after_bytes.as_slice()).unwrap();

    let delta = after_decoded.subtract(&before_decoded).unwrap();
    assert_eq!(delta.search("cycles").unwrap().value().as_i64(), 1_000);
    assert_eq!(delta.searchpath("cache/hits").unwrap().value().as_i64(), 900);
}
