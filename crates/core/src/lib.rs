//! mta_navcrumbs_core - Core library for navigation breadcrumbs
//!
//! This crate loads a static site's navigation tree, resolves the chain of
//! ancestors leading to a page path, and renders that chain as a breadcrumb
//! trail.
//!
//! # Features
//!
//! - **Ancestor Resolution**: Depth-first lookup of a page path; the first
//!   match in document order wins.
//! - **Navigation Loading**: Reads JSON and YAML navigation files from a file
//!   or a whole directory, honoring `.gitignore` and custom globs.
//! - **Site Index & Validation**: Trails for every page, plus duplicate and
//!   empty path detection.
//! - **Multiple Output Formats**: JSON, YAML, HTML, plain text and ANSI.
//!
//! # Example
//!
//! ```rust
//! use mta_navcrumbs_core::{resolve_breadcrumbs, Crumb, NavigationForest, NavigationNode};
//!
//! let forest = NavigationForest::new(vec![
//!     NavigationNode::new("Guides", "/guides")
//!         .with_item(NavigationNode::new("Setup", "/guides/setup")),
//! ]);
//!
//! let crumbs = resolve_breadcrumbs(&forest, "/guides/setup");
//! assert_eq!(crumbs, vec![Crumb::new("Guides", "/guides"), Crumb::new("Setup", "/guides/setup")]);
//! assert!(resolve_breadcrumbs(&forest, "/missing").is_empty());
//! ```

pub mod config;
pub mod loader;
pub mod models;
pub mod output;
pub mod resolver;

// Re-exports for convenience
pub use config::{ConfigError, LoadConfig, MatchMode};
pub use loader::{load_forest, load_str, validate, LoadError, NavigationLoader, SourceFormat};
pub use models::{
    BreadcrumbTrail, Crumb, DuplicatePath, ForestStats, IndexEntry, LoadMetadata, LoadedForest,
    NavigationForest, NavigationNode, SiteIndex, SourceFile, ValidationReport,
};
pub use output::{format_index, format_report, format_trail, FormatError, OutputFormat};
pub use resolver::{
    find_duplicate_paths, forest_stats, index_forest, resolve_breadcrumbs,
    resolve_breadcrumbs_with, resolve_trail,
};
