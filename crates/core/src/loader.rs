//! Navigation loader module
//!
//! This module reads navigation data files (JSON or YAML) from a single file
//! or a directory tree and assembles them into one navigation forest.

use crate::config::{IgnoreFilter, LoadConfig, MatchMode};
use crate::models::{
    LoadMetadata, LoadedForest, NavigationForest, NavigationNode, SourceFile, ValidationReport,
};
use crate::resolver::{find_duplicate_paths, forest_stats};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use walkdir::WalkDir;

/// Loader errors
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config error: {0}")]
    ConfigError(#[from] crate::config::ConfigError),

    #[error("Invalid JSON in {path}: {source}")]
    JsonError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid YAML in {path}: {source}")]
    YamlError {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Navigation source not found: {0}")]
    NotFound(PathBuf),

    #[error("Unsupported navigation file (expected .json, .yaml or .yml): {0}")]
    UnsupportedFormat(PathBuf),

    #[error("Thread pool error: {0}")]
    ThreadPoolError(String),
}

/// Serialization format of a navigation data file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Yaml,
}

impl SourceFormat {
    /// Determine format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(SourceFormat::Json),
            "yaml" | "yml" => Some(SourceFormat::Yaml),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// Parse navigation data held in memory
pub fn load_str(source: &str, format: SourceFormat) -> Result<NavigationForest, LoadError> {
    parse_document(source, format, Path::new("<memory>")).map(NavigationForest::new)
}

/// A navigation file holds either a list of root nodes or a single one.
/// The shape is decided up front so serde reports the real error.
fn parse_document(
    source: &str,
    format: SourceFormat,
    path: &Path,
) -> Result<Vec<NavigationNode>, LoadError> {
    match format {
        SourceFormat::Json => parse_json(source).map_err(|source| LoadError::JsonError {
            path: path.to_path_buf(),
            source,
        }),
        SourceFormat::Yaml => parse_yaml(source).map_err(|source| LoadError::YamlError {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn parse_json(source: &str) -> Result<Vec<NavigationNode>, serde_json::Error> {
    if source.trim_start().starts_with('[') {
        serde_json::from_str(source)
    } else {
        serde_json::from_str::<NavigationNode>(source).map(|node| vec![node])
    }
}

fn parse_yaml(source: &str) -> Result<Vec<NavigationNode>, serde_yaml::Error> {
    let value: serde_yaml::Value = serde_yaml::from_str(source)?;
    match value {
        // An empty YAML file is null: no roots
        serde_yaml::Value::Null => Ok(Vec::new()),
        serde_yaml::Value::Sequence(_) => serde_yaml::from_value(value),
        _ => serde_yaml::from_value::<NavigationNode>(value).map(|node| vec![node]),
    }
}

/// Loads navigation data according to a [`LoadConfig`]
pub struct NavigationLoader {
    config: LoadConfig,
    ignore_filter: IgnoreFilter,
}

impl NavigationLoader {
    /// Create a new loader with the given configuration
    pub fn new(config: LoadConfig) -> Result<Self, LoadError> {
        let ignore_filter = IgnoreFilter::new(&config)?;
        Ok(Self {
            config,
            ignore_filter,
        })
    }

    /// Load the configured file or directory into a forest
    pub fn load(&self) -> Result<LoadedForest, LoadError> {
        let start = Instant::now();
        let root = &self.config.root;

        let files = if root.is_file() {
            if SourceFormat::from_path(root).is_none() {
                return Err(LoadError::UnsupportedFormat(root.clone()));
            }
            vec![root.clone()]
        } else if root.is_dir() {
            self.find_navigation_files()
        } else {
            return Err(LoadError::NotFound(root.clone()));
        };

        tracing::debug!(root = %root.display(), files = files.len(), "loading navigation data");

        // Parse files (in parallel if configured); collect keeps file order
        let parsed: Vec<(PathBuf, Vec<NavigationNode>)> = if self.config.threads <= 1 {
            files
                .iter()
                .map(|path| self.read_file(path).map(|nodes| (path.clone(), nodes)))
                .collect::<Result<Vec<_>, LoadError>>()?
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.threads)
                .build()
                .map_err(|e| LoadError::ThreadPoolError(e.to_string()))?;

            pool.install(|| {
                files
                    .par_iter()
                    .map(|path| self.read_file(path).map(|nodes| (path.clone(), nodes)))
                    .collect::<Result<Vec<_>, LoadError>>()
            })?
        };

        let mut roots = Vec::new();
        let mut sources = Vec::with_capacity(parsed.len());
        for (path, nodes) in parsed {
            sources.push(SourceFile {
                path: self.relative_path(&path),
                roots: nodes.len(),
            });
            roots.extend(nodes);
        }

        let forest = NavigationForest::new(roots);
        let stats = forest_stats(&forest, MatchMode::Exact);

        let metadata = LoadMetadata {
            load_duration_ms: start.elapsed().as_millis() as u64,
            timestamp: chrono::Utc::now().to_rfc3339(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        };

        Ok(LoadedForest {
            root: root.clone(),
            forest,
            sources,
            stats,
            metadata,
        })
    }

    /// Find all navigation files under the root, sorted by path
    fn find_navigation_files(&self) -> Vec<PathBuf> {
        let root = &self.config.root;
        let walker = WalkDir::new(root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                // The root is always walked, whatever its name
                if e.depth() == 0 {
                    return true;
                }
                if e.file_type().is_dir() {
                    return !self
                        .ignore_filter
                        .should_ignore(&self.relative_path(e.path()), true);
                }
                true
            });

        let mut files = Vec::new();
        for entry in walker.filter_map(|e| e.ok()) {
            if entry.file_type().is_dir() {
                continue;
            }

            let path = entry.path();
            if SourceFormat::from_path(path).is_none() {
                continue;
            }

            if self
                .ignore_filter
                .should_ignore(&self.relative_path(path), false)
            {
                tracing::debug!(path = %path.display(), "ignored");
                continue;
            }

            if let Ok(metadata) = entry.metadata() {
                if metadata.len() > self.config.max_file_size as u64 {
                    tracing::warn!(
                        path = %path.display(),
                        size = metadata.len(),
                        "skipping navigation file larger than the configured limit"
                    );
                    continue;
                }
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        files
    }

    /// Read and parse a single navigation file
    fn read_file(&self, path: &Path) -> Result<Vec<NavigationNode>, LoadError> {
        let format = SourceFormat::from_path(path)
            .ok_or_else(|| LoadError::UnsupportedFormat(path.to_path_buf()))?;
        let source = fs::read_to_string(path)?;
        let nodes = parse_document(&source, format, path)?;
        tracing::debug!(path = %path.display(), roots = nodes.len(), "parsed navigation file");
        Ok(nodes)
    }

    fn relative_path(&self, path: &Path) -> PathBuf {
        if self.config.root.is_file() {
            return path
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| path.to_path_buf());
        }
        path.strip_prefix(&self.config.root)
            .unwrap_or(path)
            .to_path_buf()
    }
}

/// Load navigation data from a file or directory with default settings
pub fn load_forest(path: &Path) -> Result<LoadedForest, LoadError> {
    NavigationLoader::new(LoadConfig::new(path.to_path_buf()))?.load()
}

/// Check a loaded forest for duplicate and empty paths, treating paths that
/// `mode` considers equal as duplicates
pub fn validate(loaded: &LoadedForest, mode: MatchMode) -> ValidationReport {
    let duplicates = find_duplicate_paths(&loaded.forest, mode);
    for dup in &duplicates {
        tracing::warn!(
            path = %dup.path,
            count = dup.count,
            "duplicate navigation path; only the first entry is reachable"
        );
    }

    let empty_paths: Vec<String> = loaded
        .forest
        .flatten()
        .iter()
        .filter(|n| n.path.trim().is_empty())
        .map(|n| n.label.clone())
        .collect();
    for label in &empty_paths {
        tracing::warn!(label = %label, "navigation entry has an empty path");
    }

    ValidationReport {
        root: loaded.root.clone(),
        stats: forest_stats(&loaded.forest, mode),
        duplicates,
        empty_paths,
        sources: loaded.sources.clone(),
        metadata: loaded.metadata.clone(),
    }
}
