//! # Tree Model Unit Tests / 树模型单元测试
//!
//! Lookups (exact, flexible, name), leaf counting and ancestor paths.
//!
//! 查找（精确、灵活、名称）、叶子计数和祖先路径。

mod common;

use catalog_viewer::models::Node;
use catalog_viewer::playlist::normalize_token;
use catalog_viewer::tree::{Catalog, count_leaves, token_matches_id};

#[cfg(test)]
mod lookup_tests {
    use super::*;

    #[test]
    fn test_resolve_exact_id() {
        let catalog = Catalog::seed();
        let node = catalog.resolve("a-1").unwrap();
        assert_eq!(node.name, "Test A1");
    }

    #[test]
    fn test_resolve_normalized_hash_token() {
        let catalog = Catalog::seed();
        let token = normalize_token("#a-1");
        assert_eq!(catalog.resolve(&token).unwrap().id, "a-1");
    }

    #[test]
    fn test_resolve_case_mismatch_uses_flexible_match() {
        let catalog = Catalog::seed();
        assert!(catalog.find_exact("A-1").is_none());
        assert_eq!(catalog.resolve("A-1").unwrap().id, "a-1");
    }

    #[test]
    fn test_resolve_empty_token_is_none() {
        let catalog = Catalog::seed();
        assert!(catalog.resolve("").is_none());
        assert!(catalog.find_flexible("").is_some_and(|node| node.id == "suite-a"));
    }

    #[test]
    fn test_resolve_by_name_fragment() {
        let catalog = Catalog::seed();
        assert_eq!(catalog.resolve("deep").unwrap().id, "b-1-1");
    }

    #[test]
    fn test_id_pass_runs_before_name_pass() {
        // "login" is contained in the id of the first leaf as well as the
        // suite name; the id pass wins and finds the suite itself first.
        let catalog = Catalog::new(common::sample_forest());
        assert_eq!(catalog.resolve("login").unwrap().id, "suite-login");
        assert_eq!(catalog.resolve("valid password").unwrap().id, "login.spec.ts:12");
    }

    #[test]
    fn test_colon_token_matches_location_suffix() {
        let catalog = Catalog::new(common::sample_forest());
        assert_eq!(catalog.resolve("spec.ts:40").unwrap().id, "login.spec.ts:40");
        // Colon tokens are case-sensitive.
        assert!(catalog.resolve("SPEC.TS:40").is_none());
    }

    #[test]
    fn test_unknown_token_is_none() {
        let catalog = Catalog::seed();
        assert!(catalog.resolve("zzz-missing").is_none());
    }

    #[test]
    fn test_duplicate_ids_first_in_preorder_wins() {
        let catalog = Catalog::new(vec![
            Node::suite("s", "Suite", vec![Node::leaf("dup", "Inner")]),
            Node::leaf("dup", "Outer"),
        ]);
        assert_eq!(catalog.find_exact("dup").unwrap().name, "Inner");
    }

    #[test]
    fn test_token_matches_id_rules() {
        assert!(token_matches_id("a-1", "a-1"));
        assert!(token_matches_id("A-1", "suite-a-1"));
        assert!(token_matches_id("file.ts:3", "dir/file.ts:3"));
        assert!(!token_matches_id("FILE.ts:3", "dir/file.ts:3"));
        assert!(!token_matches_id("", "a-1"));
    }
}

#[cfg(test)]
mod structure_tests {
    use super::*;

    #[test]
    fn test_count_leaves_two_children() {
        let suite = Node::suite("s", "S", vec![Node::leaf("a", "A"), Node::leaf("b", "B")]);
        assert_eq!(count_leaves(&suite), 2);
    }

    #[test]
    fn test_count_leaves_three_levels_single_leaf() {
        let suite = Node::suite(
            "s1",
            "S1",
            vec![Node::suite("s2", "S2", vec![Node::leaf("t", "T")])],
        );
        assert_eq!(count_leaves(&suite), 1);
    }

    #[test]
    fn test_empty_children_counts_as_leaf() {
        let node = Node::suite("s", "S", vec![]);
        assert!(!node.is_suite());
        assert_eq!(count_leaves(&node), 1);
    }

    #[test]
    fn test_preorder_iteration() {
        let catalog = Catalog::seed();
        let ids: Vec<&str> = catalog.iter().map(|node| node.id.as_str()).collect();
        assert_eq!(ids, ["suite-a", "a-1", "a-2", "suite-b", "b-1", "b-1-1"]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.total_leaves(), 3);
    }

    #[test]
    fn test_path_to_nested_node() {
        let catalog = Catalog::seed();
        let path: Vec<&str> = catalog
            .path_to("b-1-1")
            .unwrap()
            .into_iter()
            .map(|node| node.id.as_str())
            .collect();
        assert_eq!(path, ["suite-b", "b-1", "b-1-1"]);
        assert!(catalog.path_to("nope").is_none());
    }

    #[test]
    fn test_replace_is_substitution() {
        let mut catalog = Catalog::seed();
        let old = catalog.replace(vec![Node::leaf("x", "X")]);
        assert_eq!(old.len(), 2);
        assert_eq!(catalog.len(), 1);
        assert!(catalog.find_exact("a-1").is_none());
    }

    #[test]
    fn test_node_json_omits_absent_fields() {
        let json = Node::leaf("a", "A").to_pretty_json();
        assert!(json.contains("\"id\": \"a\""));
        assert!(!json.contains("description"));
        assert!(!json.contains("children"));
    }
}
