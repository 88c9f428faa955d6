//! Breadcrumb resolution
//!
//! Finds the node owning a page path with a depth-first walk and returns the
//! chain of ancestors leading to it. The first match in document order wins,
//! so when several nodes share a path the later ones are never reached.

use crate::config::MatchMode;
use crate::models::{
    BreadcrumbTrail, Crumb, DuplicatePath, ForestStats, IndexEntry, NavigationForest,
    NavigationNode, SiteIndex,
};
use std::collections::HashMap;

/// Resolve the ancestor chain for `target` using exact path equality.
///
/// Returns the crumbs from a root down to the matching node, or an empty
/// vector when no node has that path.
pub fn resolve_breadcrumbs(forest: &NavigationForest, target: &str) -> Vec<Crumb> {
    resolve_breadcrumbs_with(forest, target, MatchMode::Exact)
}

/// Resolve the ancestor chain for `target` using the given match mode
pub fn resolve_breadcrumbs_with(
    forest: &NavigationForest,
    target: &str,
    mode: MatchMode,
) -> Vec<Crumb> {
    forest
        .roots()
        .iter()
        .find_map(|root| find_chain(root, target, mode))
        .unwrap_or_default()
}

/// Resolve into a [`BreadcrumbTrail`]
pub fn resolve_trail(forest: &NavigationForest, target: &str, mode: MatchMode) -> BreadcrumbTrail {
    BreadcrumbTrail::new(target, resolve_breadcrumbs_with(forest, target, mode))
}

/// Depth-first search below `node`. The chain is built leaf first and
/// reversed once at the top.
fn find_chain(node: &NavigationNode, target: &str, mode: MatchMode) -> Option<Vec<Crumb>> {
    let mut chain = find_reversed(node, target, mode)?;
    chain.reverse();
    Some(chain)
}

fn find_reversed(node: &NavigationNode, target: &str, mode: MatchMode) -> Option<Vec<Crumb>> {
    if mode.matches(&node.path, target) {
        return Some(vec![node.crumb()]);
    }

    let mut chain = node
        .items
        .iter()
        .find_map(|child| find_reversed(child, target, mode))?;
    chain.push(node.crumb());
    Some(chain)
}

/// Build the trail of every node in the forest, in depth-first order.
///
/// A node whose path already belongs to an earlier node gets the earlier
/// node's trail and is marked `shadowed`, matching what a lookup with the
/// same `mode` returns.
pub fn index_forest(forest: &NavigationForest, mode: MatchMode) -> SiteIndex {
    let mut entries = Vec::with_capacity(forest.total_nodes());
    let mut first_seen: HashMap<&str, Vec<Crumb>> = HashMap::new();
    let mut ancestors = Vec::new();

    for root in forest.roots() {
        index_node(root, mode, &mut ancestors, &mut first_seen, &mut entries);
    }

    SiteIndex { entries }
}

fn index_node<'a>(
    node: &'a NavigationNode,
    mode: MatchMode,
    ancestors: &mut Vec<Crumb>,
    first_seen: &mut HashMap<&'a str, Vec<Crumb>>,
    entries: &mut Vec<IndexEntry>,
) {
    let depth = ancestors.len();
    ancestors.push(node.crumb());

    let key = mode.normalize(&node.path);
    let (crumbs, shadowed) = match first_seen.get(key) {
        Some(existing) => (existing.clone(), true),
        None => {
            first_seen.insert(key, ancestors.clone());
            (ancestors.clone(), false)
        }
    };

    entries.push(IndexEntry {
        path: node.path.clone(),
        label: node.label.clone(),
        depth,
        crumbs,
        shadowed,
    });

    for child in &node.items {
        index_node(child, mode, ancestors, first_seen, entries);
    }

    ancestors.pop();
}

/// Paths owned by more than one node under `mode`, in order of first
/// appearance. Each is reported by the spelling of its first occurrence.
pub fn find_duplicate_paths(forest: &NavigationForest, mode: MatchMode) -> Vec<DuplicatePath> {
    let mut order: Vec<(&str, &str)> = Vec::new();
    let mut labels: HashMap<&str, Vec<String>> = HashMap::new();

    for node in forest.flatten() {
        let key = mode.normalize(&node.path);
        let entry = labels.entry(key).or_insert_with(|| {
            order.push((key, node.path.as_str()));
            Vec::new()
        });
        entry.push(node.label.clone());
    }

    order
        .into_iter()
        .filter_map(|(key, path)| {
            let labels = labels.remove(key)?;
            (labels.len() > 1).then(|| DuplicatePath {
                path: path.to_string(),
                count: labels.len(),
                labels,
            })
        })
        .collect()
}

/// Compute summary statistics for a forest
pub fn forest_stats(forest: &NavigationForest, mode: MatchMode) -> ForestStats {
    ForestStats {
        roots: forest.roots().len(),
        total_nodes: forest.total_nodes(),
        max_depth: forest.max_depth(),
        duplicate_paths: find_duplicate_paths(forest, mode).len(),
        empty_paths: forest
            .flatten()
            .iter()
            .filter(|n| n.path.trim().is_empty())
            .count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn guides() -> NavigationForest {
        NavigationForest::new(vec![NavigationNode::new("Guides", "/guides")
            .with_item(NavigationNode::new("Setup", "/guides/setup"))])
    }

    fn docs_site() -> NavigationForest {
        NavigationForest::new(vec![
            NavigationNode::new("Getting Started", "/start")
                .with_item(NavigationNode::new("Install", "/start/install")),
            NavigationNode::new("Reference", "/reference").with_item(
                NavigationNode::new("API", "/reference/api")
                    .with_item(NavigationNode::new("Client", "/reference/api/client"))
                    .with_item(NavigationNode::new("Server", "/reference/api/server")),
            ),
        ])
    }

    #[test]
    fn test_resolves_child() {
        let crumbs = resolve_breadcrumbs(&guides(), "/guides/setup");
        assert_eq!(
            crumbs,
            vec![Crumb::new("Guides", "/guides"), Crumb::new("Setup", "/guides/setup")]
        );
    }

    #[test]
    fn test_missing_target_is_empty() {
        assert!(resolve_breadcrumbs(&guides(), "/missing").is_empty());
        assert!(resolve_breadcrumbs(&NavigationForest::default(), "/").is_empty());
    }

    #[test]
    fn test_root_match_is_singleton() {
        assert_eq!(
            resolve_breadcrumbs(&guides(), "/guides"),
            vec![Crumb::new("Guides", "/guides")]
        );
    }

    #[test]
    fn test_match_in_second_root_only() {
        let crumbs = resolve_breadcrumbs(&docs_site(), "/reference/api/server");
        let paths: Vec<_> = crumbs.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["/reference", "/reference/api", "/reference/api/server"]
        );
    }

    #[test]
    fn test_first_duplicate_wins() {
        let forest = NavigationForest::new(vec![
            NavigationNode::new("Intro", "/intro")
                .with_item(NavigationNode::new("Shared A", "/shared")),
            NavigationNode::new("Shared Root", "/shared"),
        ]);
        let crumbs = resolve_breadcrumbs(&forest, "/shared");
        assert_eq!(
            crumbs,
            vec![Crumb::new("Intro", "/intro"), Crumb::new("Shared A", "/shared")]
        );
    }

    #[test]
    fn test_document_order_beats_shorter_chain() {
        // A deep match in an earlier subtree wins over a shallow later sibling.
        let forest = NavigationForest::new(vec![NavigationNode::new("Root", "/")
            .with_item(
                NavigationNode::new("A", "/a").with_item(NavigationNode::new("Deep", "/x")),
            )
            .with_item(NavigationNode::new("Shallow", "/x"))]);
        let crumbs = resolve_breadcrumbs(&forest, "/x");
        assert_eq!(crumbs.len(), 3);
        assert_eq!(crumbs[2].label, "Deep");
    }

    #[test]
    fn test_trailing_slash_mode() {
        let forest = guides();
        assert!(resolve_breadcrumbs(&forest, "/guides/setup/").is_empty());

        let crumbs =
            resolve_breadcrumbs_with(&forest, "/guides/setup/", MatchMode::IgnoreTrailingSlash);
        assert_eq!(crumbs.len(), 2);

        let trail = resolve_trail(&forest, "/guides/setup/", MatchMode::IgnoreTrailingSlash);
        assert_eq!(trail.target, "/guides/setup/");
        assert_eq!(trail.display_path(" / "), "Guides / Setup");
    }

    #[test]
    fn test_index_matches_resolver() {
        let forest = docs_site();
        let index = index_forest(&forest, MatchMode::Exact);
        assert_eq!(index.len(), forest.total_nodes());

        for entry in &index.entries {
            assert_eq!(entry.crumbs, resolve_breadcrumbs(&forest, &entry.path));
            assert!(!entry.shadowed);
        }
        let client = index
            .entries
            .iter()
            .find(|e| e.path == "/reference/api/client")
            .unwrap();
        assert_eq!(client.depth, 2);
    }

    #[test]
    fn test_index_marks_shadowed() {
        let forest = NavigationForest::new(vec![
            NavigationNode::new("First", "/dup"),
            NavigationNode::new("Parent", "/parent")
                .with_item(NavigationNode::new("Second", "/dup")),
        ]);
        let index = index_forest(&forest, MatchMode::Exact);
        let dups: Vec<_> = index.entries.iter().filter(|e| e.path == "/dup").collect();
        assert_eq!(dups.len(), 2);
        assert!(!dups[0].shadowed);
        assert!(dups[1].shadowed);
        assert_eq!(dups[1].crumbs, vec![Crumb::new("First", "/dup")]);
        assert_eq!(index.reachable().count(), 2);
    }

    #[test]
    fn test_duplicates_and_stats() {
        let forest = NavigationForest::new(vec![
            NavigationNode::new("A", "/same").with_item(NavigationNode::new("Blank", "")),
            NavigationNode::new("B", "/same"),
            NavigationNode::new("C", "/c"),
        ]);
        let dups = find_duplicate_paths(&forest, MatchMode::Exact);
        assert_eq!(dups.len(), 1);
        assert_eq!(dups[0].path, "/same");
        assert_eq!(dups[0].labels, vec!["A".to_string(), "B".to_string()]);

        let stats = forest_stats(&forest, MatchMode::Exact);
        assert_eq!(stats.roots, 3);
        assert_eq!(stats.total_nodes, 4);
        assert_eq!(stats.max_depth, 2);
        assert_eq!(stats.duplicate_paths, 1);
        assert_eq!(stats.empty_paths, 1);
        assert!(!stats.is_clean());
    }

    #[test]
    fn test_index_and_duplicates_follow_match_mode() {
        let forest = NavigationForest::new(vec![
            NavigationNode::new("A", "/a"),
            NavigationNode::new("A2", "/a/"),
        ]);

        let exact = index_forest(&forest, MatchMode::Exact);
        assert!(!exact.entries[1].shadowed);
        assert!(find_duplicate_paths(&forest, MatchMode::Exact).is_empty());

        let mode = MatchMode::IgnoreTrailingSlash;
        let loose = index_forest(&forest, mode);
        assert!(loose.entries[1].shadowed);
        assert_eq!(loose.entries[1].crumbs, vec![Crumb::new("A", "/a")]);
        assert_eq!(
            loose.entries[1].crumbs,
            resolve_breadcrumbs_with(&forest, "/a/", mode)
        );

        let dups = find_duplicate_paths(&forest, mode);
        assert_eq!(dups.len(), 1);
        assert_eq!(dups[0].path, "/a");
        assert_eq!(dups[0].labels, vec!["A".to_string(), "A2".to_string()]);
        assert_eq!(forest_stats(&forest, mode).duplicate_paths, 1);
    }

    fn arb_node() -> impl Strategy<Value = NavigationNode> {
        let leaf = ("[A-Za-z]{1,6}", "/[a-z]{1,4}")
            .prop_map(|(label, path)| NavigationNode::new(label, path));
        leaf.prop_recursive(3, 24, 4, |inner| {
            ("[A-Za-z]{1,6}", "/[a-z]{1,4}", prop::collection::vec(inner, 0..4)).prop_map(
                |(label, path, items)| NavigationNode::new(label, path).with_items(items),
            )
        })
    }

    fn arb_forest() -> impl Strategy<Value = NavigationForest> {
        prop::collection::vec(arb_node(), 0..4).prop_map(NavigationForest::new)
    }

    /// Walk `crumbs` down from the roots, requiring each to be a child of the previous.
    fn is_ancestor_chain(forest: &NavigationForest, crumbs: &[Crumb]) -> bool {
        fn walk(level: &[NavigationNode], crumbs: &[Crumb]) -> bool {
            let Some((first, rest)) = crumbs.split_first() else {
                return true;
            };
            level
                .iter()
                .filter(|n| n.label == first.label && n.path == first.path)
                .any(|n| walk(&n.items, rest))
        }
        walk(forest.roots(), crumbs)
    }

    proptest! {
        #[test]
        fn prop_present_path_ends_chain(forest in arb_forest(), pick in any::<prop::sample::Index>()) {
            let nodes = forest.flatten();
            prop_assume!(!nodes.is_empty());
            let target = nodes[pick.index(nodes.len())].path.clone();

            let crumbs = resolve_breadcrumbs(&forest, &target);
            prop_assert!(!crumbs.is_empty());
            prop_assert_eq!(&crumbs.last().unwrap().path, &target);
            prop_assert!(is_ancestor_chain(&forest, &crumbs));
        }

        #[test]
        fn prop_absent_path_is_empty(forest in arb_forest()) {
            // Generated paths are lowercase, so this never occurs.
            prop_assert!(resolve_breadcrumbs(&forest, "/ABSENT").is_empty());
        }

        #[test]
        fn prop_index_agrees_with_resolver(forest in arb_forest()) {
            for entry in index_forest(&forest, MatchMode::Exact).entries {
                prop_assert_eq!(entry.crumbs, resolve_breadcrumbs(&forest, &entry.path));
            }
        }
    }
}
