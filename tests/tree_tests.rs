//! Integration tests for tree construction, directory operations, and
//! aggregation.

use pretty_assertions::assert_eq;
use stattree::{Node, TypeTag, Value};

// ============================================================================
// SHARED TEST HELPERS
// ============================================================================

/// A small per-subsystem counter tree, built the way a simulator would
fn build_counter_tree() -> Node {
    let mut root = Node::null("machine");

    let cache = root.get("cache");
    cache.set_summable(true);
    cache.add(Node::new("hits", 900i64));
    cache.add(Node::new("misses", 100i64));

    let core = root.get("core");
    core.add(Node::new("cycles", 5000i64));
    core.add(Node::new("ipc", 1.25f64));
    core.get("frontend").add(Node::new("fetches", 2000i64));

    root.add(Node::new("config", "default"));
    root
}

// ============================================================================
// DIRECTORY OPERATIONS
// ============================================================================

mod directory_tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn test_get_then_search_find_the_same_node() {
        let mut root = Node::null("root");
        root.get("sub").assign(3i64);

        let found = root.search("sub").expect("child must exist after get");
        assert_eq!(found.value().as_i64(), 3);
        assert_eq!(root.children().len(), 1);
    }

    #[test]
    fn test_get_is_idempotent() {
        let mut root = Node::null("root");
        root.get("sub");
        root.get("sub");
        root.get("sub");
        assert_eq!(root.children().len(), 1);
        assert_eq!(root.get("sub").type_tag(), TypeTag::Null);
    }

    #[test]
    fn test_collision_replaces_entire_subtree() {
        let mut root = Node::null("root");
        root.get("sub").add(Node::new("deep", 1i64));

        // same name, fresh node: the old subtree is gone
        root.add(Node::new("sub", 42i64));
        let sub = root.search("sub").unwrap();
        assert_eq!(sub.value().as_i64(), 42);
        assert!(sub.children().is_empty());
    }

    #[test]
    fn test_searchpath_across_depths() {
        let root = build_counter_tree();
        assert_eq!(
            root.searchpath("core/frontend/fetches")
                .unwrap()
                .value()
                .as_i64(),
            2000
        );
        assert!(root.searchpath("core/backend/retires").is_none());
        // lookup never creates
        assert_eq!(root.search("core").unwrap().children().len(), 3);
    }

    #[test]
    fn test_entries_reflect_insertion_order() {
        let root = build_counter_tree();
        let names: Vec<&str> = root.entries().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["cache", "core", "config"]);
    }

    #[test]
    fn test_remove_detaches_and_returns_ownership() {
        let mut root = build_counter_tree();
        let core = root.remove("core").expect("core exists");
        assert!(root.search("core").is_none());

        // the detached subtree is intact and independently usable
        assert_eq!(core.searchpath("frontend/fetches").unwrap().value().as_i64(), 2000);
    }
}

// ============================================================================
// AGGREGATION
// ============================================================================

mod sum_tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn test_sum_equals_own_value_plus_child_sums() {
        let root = build_counter_tree();
        let child_total: f64 = root.children().iter().map(Node::sum).sum();
        assert_eq!(root.sum(), root.value().as_f64() + child_total);
    }

    #[test]
    fn test_sum_of_counter_tree() {
        let root = build_counter_tree();
        // 900 + 100 + 5000 + 1.25 + 2000 + "default"(0)
        assert_eq!(root.sum(), 8001.25);
    }

    #[test]
    fn test_string_nodes_contribute_parsed_value() {
        let mut root = Node::null("root");
        root.add(Node::new("n", "17"));
        root.add(Node::new("junk", "n/a"));
        assert_eq!(root.sum(), 17.0);
    }
}

// ============================================================================
// VALUE ASSIGNMENT AND COERCION
// ============================================================================

mod value_tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn test_assign_discards_previous_payload() {
        let mut node = Node::new("n", vec![1i64, 2, 3]);
        assert_eq!(node.count(), 3);

        node.assign(9.5f64);
        assert_eq!(node.type_tag(), TypeTag::Float);
        assert_eq!(node.count(), 1);
        assert_eq!(node.value(), &Value::Float(9.5));
    }

    #[test]
    fn test_scalar_coercion_is_lossless_for_own_type() {
        let int_node = Node::new("i", 1234567890i64);
        assert_eq!(int_node.value().as_i64(), 1234567890);

        let str_node = Node::new("s", "hello");
        assert_eq!(str_node.value().as_string(), "hello");
    }
}

// ============================================================================
// HISTOGRAM BUILDERS
// ============================================================================

mod histogram_tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn test_histogram_children_named_by_index() {
        let mut node = Node::null("latency");
        node.histogram(&[10, 20, 30, 40]);

        let names: Vec<&str> = node.entries().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["0", "1", "2", "3"]);
        assert_eq!(node.sum(), 100.0);
        assert!(node.summable());
    }

    #[test]
    fn test_labeled_histogram_overrides_index_names() {
        let mut node = Node::null("opcode");
        node.histogram_labeled(&["alu", "mem", "branch"], &[60, 30, 10]);
        assert_eq!(node.search("mem").unwrap().value().as_i64(), 30);
    }
}
