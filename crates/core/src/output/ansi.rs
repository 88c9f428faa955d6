//! ANSI colored output formatter
//!
//! This module provides colorful terminal output for trails, indexes and
//! validation reports.

use super::SEPARATOR;
use crate::models::{BreadcrumbTrail, Crumb, SiteIndex, ValidationReport};
use colored::Colorize;

fn colorize_crumbs(crumbs: &[Crumb]) -> String {
    let Some((current, links)) = crumbs.split_last() else {
        return String::new();
    };

    let mut output = String::new();
    for link in links {
        output.push_str(&format!("{}{}", link.label.cyan(), SEPARATOR.dimmed()));
    }
    output.push_str(&current.label.bold().to_string());
    output
}

/// Format a trail as ANSI colored text
pub fn format_trail_ansi(trail: &BreadcrumbTrail) -> String {
    if trail.is_empty() {
        return format!("{}", format!("(no match for {})", trail.target).dimmed());
    }
    colorize_crumbs(&trail.crumbs)
}

/// Format every page's trail, indented by depth
pub fn format_index_ansi(index: &SiteIndex) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n{}\n\n",
        "  Breadcrumb Index  ".bold().on_blue()
    ));

    for entry in &index.entries {
        let indent = "   ".repeat(entry.depth);
        output.push_str(&format!(
            "{}{} {}",
            indent,
            entry.path.bright_yellow(),
            colorize_crumbs(&entry.crumbs)
        ));
        if entry.shadowed {
            output.push_str(&format!(" {}", "⚠ shadowed".bright_red()));
        }
        output.push('\n');
    }

    output.push_str(&format!(
        "\n{}\n",
        format!("{} pages", index.len()).dimmed()
    ));
    output
}

/// Format a validation report as ANSI colored text
pub fn format_report_ansi(report: &ValidationReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n{}\n\n",
        "  Navigation Validation  ".bold().on_blue()
    ));
    output.push_str(&format!("{} {}\n\n", "Root:".bold(), report.root.display()));
    output.push_str(&format!(
        "{} {}  {} {}  {} {}  {} {}\n",
        "Files:".bold(),
        report.sources.len(),
        "Roots:".bold(),
        report.stats.roots,
        "Nodes:".bold(),
        report.stats.total_nodes,
        "Depth:".bold(),
        report.stats.max_depth
    ));

    for dup in &report.duplicates {
        output.push_str(&format!(
            "   {} {} used {} times ({})\n",
            "⚠".bright_red(),
            dup.path.bright_yellow(),
            dup.count,
            dup.labels.join(", ")
        ));
    }
    for label in &report.empty_paths {
        output.push_str(&format!(
            "   {} {} has an empty path\n",
            "⚠".bright_red(),
            label.bold()
        ));
    }

    let status = if report.is_clean() {
        "✔ ok".bright_green()
    } else {
        "✖ issues found".bright_red()
    };
    output.push_str(&format!(
        "\n{}  {}\n",
        status,
        format!("loaded in {}ms", report.metadata.load_duration_ms).dimmed()
    ));
    output
}
