//! Data models for site navigation and breadcrumb trails
//!
//! This module defines the navigation tree read from the site's navigation
//! data, the resolved breadcrumb trail, and the summary structures produced
//! when loading or indexing a forest.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One entry in the site navigation tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationNode {
    /// Display label
    pub label: String,

    /// Page path this entry links to
    pub path: String,

    /// Child entries, in display order. Missing or `null` means a leaf.
    #[serde(default, deserialize_with = "deserialize_items")]
    pub items: Vec<NavigationNode>,
}

fn deserialize_items<'de, D>(deserializer: D) -> Result<Vec<NavigationNode>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<NavigationNode>>::deserialize(deserializer)?.unwrap_or_default())
}

impl NavigationNode {
    /// Create a leaf node
    pub fn new(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
            items: Vec::new(),
        }
    }

    /// Append a child (builder pattern)
    pub fn with_item(mut self, item: NavigationNode) -> Self {
        self.items.push(item);
        self
    }

    /// Replace all children (builder pattern)
    pub fn with_items(mut self, items: Vec<NavigationNode>) -> Self {
        self.items = items;
        self
    }

    /// The crumb for this node
    pub fn crumb(&self) -> Crumb {
        Crumb {
            label: self.label.clone(),
            path: self.path.clone(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.items.is_empty()
    }

    /// Count total nodes in this subtree
    pub fn total_nodes(&self) -> usize {
        1 + self.items.iter().map(|c| c.total_nodes()).sum::<usize>()
    }

    /// Depth of this subtree (a leaf has depth 1)
    pub fn depth(&self) -> usize {
        1 + self.items.iter().map(|c| c.depth()).max().unwrap_or(0)
    }

    /// Flatten the subtree in depth-first order
    pub fn flatten(&self) -> Vec<&NavigationNode> {
        let mut result = vec![self];
        for child in &self.items {
            result.extend(child.flatten());
        }
        result
    }
}

/// The full site navigation: an ordered list of root trees
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NavigationForest(pub Vec<NavigationNode>);

impl NavigationForest {
    pub fn new(roots: Vec<NavigationNode>) -> Self {
        Self(roots)
    }

    pub fn roots(&self) -> &[NavigationNode] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total nodes across every root
    pub fn total_nodes(&self) -> usize {
        self.0.iter().map(|n| n.total_nodes()).sum()
    }

    /// Deepest root-to-leaf chain (0 for an empty forest)
    pub fn max_depth(&self) -> usize {
        self.0.iter().map(|n| n.depth()).max().unwrap_or(0)
    }

    /// All nodes in depth-first document order
    pub fn flatten(&self) -> Vec<&NavigationNode> {
        self.0.iter().flat_map(|n| n.flatten()).collect()
    }
}

impl From<Vec<NavigationNode>> for NavigationForest {
    fn from(roots: Vec<NavigationNode>) -> Self {
        Self(roots)
    }
}

/// A single element of a breadcrumb trail
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Crumb {
    pub label: String,
    pub path: String,
}

impl Crumb {
    pub fn new(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
        }
    }
}

/// A resolved breadcrumb trail for one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreadcrumbTrail {
    /// The page path that was resolved
    pub target: String,

    /// Crumbs from the root down to the matched page (inclusive)
    pub crumbs: Vec<Crumb>,
}

impl BreadcrumbTrail {
    pub fn new(target: impl Into<String>, crumbs: Vec<Crumb>) -> Self {
        Self {
            target: target.into(),
            crumbs,
        }
    }

    /// True when the target matched nothing
    pub fn is_empty(&self) -> bool {
        self.crumbs.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.crumbs.len()
    }

    /// The current page (rendered as plain text)
    pub fn current(&self) -> Option<&Crumb> {
        self.crumbs.last()
    }

    /// Every crumb before the current page (rendered as links)
    pub fn links(&self) -> &[Crumb] {
        match self.crumbs.split_last() {
            Some((_, links)) => links,
            None => &[],
        }
    }

    /// Labels joined by `separator`
    pub fn display_path(&self, separator: &str) -> String {
        self.crumbs
            .iter()
            .map(|c| c.label.as_str())
            .collect::<Vec<_>>()
            .join(separator)
    }
}

/// Index entry: the trail for one navigation node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Path of the node
    pub path: String,

    /// Label of the node
    pub label: String,

    /// Depth of the node (0 = root)
    pub depth: usize,

    /// Trail a lookup of `path` resolves to
    pub crumbs: Vec<Crumb>,

    /// An earlier node already owns this path, so lookups never reach this one
    #[serde(default)]
    pub shadowed: bool,
}

/// Trails for every node in a forest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteIndex {
    pub entries: Vec<IndexEntry>,
}

impl SiteIndex {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries not shadowed by an earlier duplicate
    pub fn reachable(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.iter().filter(|e| !e.shadowed)
    }
}

/// A path owned by more than one node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicatePath {
    pub path: String,

    /// Number of nodes using this path
    pub count: usize,

    /// Labels of those nodes, in document order
    pub labels: Vec<String>,
}

/// Summary statistics for a forest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestStats {
    /// Number of root trees
    pub roots: usize,

    /// Total nodes across all trees
    pub total_nodes: usize,

    /// Deepest root-to-leaf chain
    pub max_depth: usize,

    /// Paths owned by more than one node
    pub duplicate_paths: usize,

    /// Nodes with an empty path
    pub empty_paths: usize,
}

impl ForestStats {
    /// True when validation found nothing to report
    pub fn is_clean(&self) -> bool {
        self.duplicate_paths == 0 && self.empty_paths == 0
    }
}

/// A navigation data file that contributed roots to the forest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    /// Path relative to the load root
    pub path: PathBuf,

    /// Number of root nodes read from this file
    pub roots: usize,
}

/// Metadata about the load operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadMetadata {
    /// Duration of the load in milliseconds
    pub load_duration_ms: u64,

    /// ISO timestamp of the load
    pub timestamp: String,

    /// Tool version
    pub tool_version: String,
}

/// A forest together with where it came from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadedForest {
    /// File or directory the forest was loaded from
    pub root: PathBuf,

    pub forest: NavigationForest,

    /// Files read, in forest order
    pub sources: Vec<SourceFile>,

    pub stats: ForestStats,

    pub metadata: LoadMetadata,
}

/// Result of validating a loaded forest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// File or directory the forest was loaded from
    pub root: PathBuf,

    pub stats: ForestStats,

    /// Paths owned by more than one node
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub duplicates: Vec<DuplicatePath>,

    /// Labels of nodes with an empty path
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub empty_paths: Vec<String>,

    pub sources: Vec<SourceFile>,

    pub metadata: LoadMetadata,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.stats.is_clean()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NavigationNode {
        NavigationNode::new("Guides", "/guides")
            .with_item(
                NavigationNode::new("Setup", "/guides/setup")
                    .with_item(NavigationNode::new("Linux", "/guides/setup/linux")),
            )
            .with_item(NavigationNode::new("Usage", "/guides/usage"))
    }

    #[test]
    fn test_missing_items_is_leaf() {
        let node: NavigationNode =
            serde_json::from_str(r#"{"label": "Home", "path": "/"}"#).unwrap();
        assert!(node.is_leaf());

        let node: NavigationNode =
            serde_json::from_str(r#"{"label": "Home", "path": "/", "items": null}"#).unwrap();
        assert!(node.is_leaf());
    }

    #[test]
    fn test_node_counts() {
        let node = sample();
        assert_eq!(node.total_nodes(), 4);
        assert_eq!(node.depth(), 3);

        let paths: Vec<_> = node.flatten().iter().map(|n| n.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["/guides", "/guides/setup", "/guides/setup/linux", "/guides/usage"]
        );
    }

    #[test]
    fn test_forest_is_transparent() {
        let forest: NavigationForest = serde_json::from_str(
            r#"[{"label": "A", "path": "/a"}, {"label": "B", "path": "/b", "items": []}]"#,
        )
        .unwrap();
        assert_eq!(forest.roots().len(), 2);
        assert_eq!(forest.max_depth(), 1);

        let json = serde_json::to_string(&forest).unwrap();
        assert!(json.starts_with('['));
    }

    #[test]
    fn test_trail_links_and_current() {
        let trail = BreadcrumbTrail::new(
            "/guides/setup",
            vec![Crumb::new("Guides", "/guides"), Crumb::new("Setup", "/guides/setup")],
        );
        assert_eq!(trail.links(), &[Crumb::new("Guides", "/guides")]);
        assert_eq!(trail.current().map(|c| c.label.as_str()), Some("Setup"));
        assert_eq!(trail.display_path(" / "), "Guides / Setup");

        let empty = BreadcrumbTrail::new("/missing", vec![]);
        assert!(empty.is_empty());
        assert!(empty.links().is_empty());
        assert!(empty.current().is_none());
    }
}
