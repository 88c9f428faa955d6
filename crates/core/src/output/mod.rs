//! Output formatting module
//!
//! This module provides renderers for breadcrumb trails, site indexes and
//! validation reports: JSON, YAML, ANSI terminal text, plain text and HTML.

pub mod ansi;
pub mod html;
mod json;
mod yaml;

pub use ansi::{format_index_ansi, format_report_ansi, format_trail_ansi};
pub use html::{escape_html, format_index_html, format_report_html, format_trail_html};
pub use json::format_json;
pub use yaml::format_yaml;

use crate::models::{BreadcrumbTrail, SiteIndex, ValidationReport};
use thiserror::Error;

/// Separator placed after every linked crumb
pub const SEPARATOR: &str = " / ";

/// Output format errors
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Available output formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format
    #[default]
    Json,
    /// YAML format
    Yaml,
    /// ANSI colored text
    Ansi,
    /// Plain text
    Text,
    /// HTML markup
    Html,
}

/// Format a single breadcrumb trail
pub fn format_trail(trail: &BreadcrumbTrail, format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::Json => format_json(trail),
        OutputFormat::Yaml => format_yaml(trail),
        OutputFormat::Ansi => Ok(format_trail_ansi(trail)),
        OutputFormat::Text => Ok(format_trail_text(trail)),
        OutputFormat::Html => Ok(format_trail_html(trail)),
    }
}

/// Format the trails of every page
pub fn format_index(index: &SiteIndex, format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::Json => format_json(index),
        OutputFormat::Yaml => format_yaml(index),
        OutputFormat::Ansi => Ok(format_index_ansi(index)),
        OutputFormat::Text => Ok(format_index_text(index)),
        OutputFormat::Html => Ok(format_index_html(index)),
    }
}

/// Format a validation report
pub fn format_report(
    report: &ValidationReport,
    format: OutputFormat,
) -> Result<String, FormatError> {
    match format {
        OutputFormat::Json => format_json(report),
        OutputFormat::Yaml => format_yaml(report),
        OutputFormat::Ansi => Ok(format_report_ansi(report)),
        OutputFormat::Text => Ok(format_report_text(report)),
        OutputFormat::Html => Ok(format_report_html(report)),
    }
}

/// Labels joined by the separator; empty when nothing matched
pub fn format_trail_text(trail: &BreadcrumbTrail) -> String {
    trail.display_path(SEPARATOR)
}

/// One line per page: `path<TAB>trail`
fn format_index_text(index: &SiteIndex) -> String {
    let mut output = String::new();
    for entry in &index.entries {
        let trail = entry
            .crumbs
            .iter()
            .map(|c| c.label.as_str())
            .collect::<Vec<_>>()
            .join(SEPARATOR);
        output.push_str(&entry.path);
        output.push('\t');
        output.push_str(&trail);
        if entry.shadowed {
            output.push_str("\t(shadowed)");
        }
        output.push('\n');
    }
    output
}

/// Format a validation report as plain text
fn format_report_text(report: &ValidationReport) -> String {
    let mut output = String::new();

    output.push_str("Navigation Validation\n");
    output.push_str("=====================\n\n");
    output.push_str(&format!("Root: {}\n", report.root.display()));
    output.push_str(&format!("Files: {}\n", report.sources.len()));
    output.push_str(&format!("Roots: {}\n", report.stats.roots));
    output.push_str(&format!("Nodes: {}\n", report.stats.total_nodes));
    output.push_str(&format!("Max Depth: {}\n", report.stats.max_depth));

    if !report.duplicates.is_empty() {
        output.push_str("\nDuplicate paths (first entry wins):\n");
        for dup in &report.duplicates {
            output.push_str(&format!(
                "  {} x{}: {}\n",
                dup.path,
                dup.count,
                dup.labels.join(", ")
            ));
        }
    }

    if !report.empty_paths.is_empty() {
        output.push_str("\nEntries with empty paths:\n");
        for label in &report.empty_paths {
            output.push_str(&format!("  {}\n", label));
        }
    }

    output.push_str(&format!(
        "\nStatus: {}\n",
        if report.is_clean() { "ok" } else { "issues found" }
    ));
    output.push_str(&format!("Load Duration: {}ms\n", report.metadata.load_duration_ms));

    output
}
