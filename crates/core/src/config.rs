//! Configuration module for navigation loading and path matching
//!
//! This module provides the loader configuration, the ignore filtering logic
//! applied when walking a navigation data directory, and the path matching
//! mode used by the resolver.

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid glob pattern: {0}")]
    InvalidGlob(String),
}

/// How a node path is compared against the target path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Byte-for-byte equality
    #[default]
    Exact,

    /// Equality after dropping trailing slashes (`/guides/` == `/guides`)
    IgnoreTrailingSlash,
}

impl MatchMode {
    /// Check whether a node path matches the target
    pub fn matches(&self, node_path: &str, target: &str) -> bool {
        self.normalize(node_path) == self.normalize(target)
    }

    /// The form of `path` this mode compares; equal keys mean the same page
    pub fn normalize<'a>(&self, path: &'a str) -> &'a str {
        match self {
            MatchMode::Exact => path,
            MatchMode::IgnoreTrailingSlash => normalize_trailing_slash(path),
        }
    }
}

/// Strip trailing slashes, keeping a lone `/`
fn normalize_trailing_slash(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() && path.starts_with('/') {
        "/"
    } else {
        trimmed
    }
}

/// Configuration for loading navigation data
#[derive(Debug, Clone)]
pub struct LoadConfig {
    /// Navigation file or directory
    pub root: PathBuf,

    /// Custom ignore patterns
    pub ignore_patterns: Vec<String>,

    /// Number of threads for parallel parsing
    pub threads: usize,

    /// Maximum file size to read (bytes)
    pub max_file_size: usize,

    /// Whether to follow symlinks
    pub follow_symlinks: bool,

    /// Whether to include hidden files
    pub include_hidden: bool,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            ignore_patterns: Vec::new(),
            threads: num_cpus(),
            max_file_size: 4 * 1024 * 1024, // 4 MB
            follow_symlinks: false,
            include_hidden: false,
        }
    }
}

impl LoadConfig {
    /// Create new config with a navigation file or directory
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            ..Default::default()
        }
    }

    /// Set ignore patterns (builder pattern)
    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    /// Set number of threads (builder pattern)
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    /// Set max file size (builder pattern)
    pub fn with_max_file_size(mut self, size: usize) -> Self {
        self.max_file_size = size;
        self
    }

    /// Set follow symlinks (builder pattern)
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Set include hidden files (builder pattern)
    pub fn with_include_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }
}

/// Get number of available CPUs
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(4)
}

/// Filter for ignoring files and directories
pub struct IgnoreFilter {
    /// Gitignore rules
    gitignore: Option<Gitignore>,

    /// Custom glob patterns
    custom_globs: GlobSet,

    /// Default ignore patterns
    default_ignores: GlobSet,

    /// Whether to include hidden files
    include_hidden: bool,
}

impl IgnoreFilter {
    /// Create a new ignore filter from config
    pub fn new(config: &LoadConfig) -> Result<Self, ConfigError> {
        let gitignore = if config.root.is_dir() {
            Self::build_gitignore(&config.root)
        } else {
            None
        };

        let custom_globs = Self::build_globset(&config.ignore_patterns)?;

        // Build output and dependency directories of static site projects.
        // The bare forms match the directory itself so the walk skips it.
        let default_patterns = [
            "**/node_modules",
            "**/node_modules/**",
            "**/.git",
            "**/.git/**",
            "**/.cache",
            "**/.cache/**",
            "**/public",
            "**/public/**",
            "**/dist",
            "**/dist/**",
            "**/build",
            "**/build/**",
            "**/target",
            "**/target/**",
            "**/package.json",
            "**/package-lock.json",
            "**/tsconfig.json",
        ];
        let default_ignores = Self::build_globset(
            &default_patterns.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
        )?;

        Ok(Self {
            gitignore,
            custom_globs,
            default_ignores,
            include_hidden: config.include_hidden,
        })
    }

    /// Build gitignore from root directory
    fn build_gitignore(root: &Path) -> Option<Gitignore> {
        let gitignore_path = root.join(".gitignore");
        if !gitignore_path.exists() {
            return None;
        }

        let mut builder = GitignoreBuilder::new(root);
        if let Some(err) = builder.add(&gitignore_path) {
            tracing::warn!(path = %gitignore_path.display(), "ignoring unreadable .gitignore: {err}");
            return None;
        }

        builder.build().ok()
    }

    /// Build a globset from patterns
    fn build_globset(patterns: &[String]) -> Result<GlobSet, ConfigError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| ConfigError::InvalidGlob(e.to_string()))?;
            builder.add(glob);
        }
        builder
            .build()
            .map_err(|e| ConfigError::InvalidGlob(e.to_string()))
    }

    /// Check if a path should be ignored
    pub fn should_ignore(&self, path: &Path, is_dir: bool) -> bool {
        let path_str = path.to_string_lossy();

        if !self.include_hidden {
            if let Some(name) = path.file_name() {
                let name = name.to_string_lossy();
                if name.starts_with('.') && name != "." && name != ".." {
                    return true;
                }
            }
        }

        if self.default_ignores.is_match(&*path_str) {
            return true;
        }

        if self.custom_globs.is_match(&*path_str) {
            return true;
        }

        if let Some(ref gi) = self.gitignore {
            if gi.matched(path, is_dir).is_ignore() {
                return true;
            }
        }

        false
    }
}
