//! HTML output formatter
//!
//! Every crumb but the last becomes a link whose text carries the trailing
//! separator; the last crumb is the current page and is plain text.

use super::SEPARATOR;
use crate::models::{BreadcrumbTrail, SiteIndex, ValidationReport};

/// Escape text for use in element content and double-quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Render a trail as a `<nav>` element; an empty trail renders nothing
pub fn format_trail_html(trail: &BreadcrumbTrail) -> String {
    let Some(current) = trail.current() else {
        return String::new();
    };

    let mut output = String::from("<nav class=\"breadcrumbs\" aria-label=\"Breadcrumb\">");
    for link in trail.links() {
        output.push_str(&format!(
            "<a href=\"{}\">{}{}</a>",
            escape_html(&link.path),
            escape_html(&link.label),
            SEPARATOR
        ));
    }
    output.push_str(&format!(
        "<span class=\"current\" aria-current=\"page\">{}</span>",
        escape_html(&current.label)
    ));
    output.push_str("</nav>");
    output
}

/// Render every page's trail as a list
pub fn format_index_html(index: &SiteIndex) -> String {
    let mut output = String::from("<ul class=\"breadcrumb-index\">\n");
    for entry in index.reachable() {
        let trail = BreadcrumbTrail::new(entry.path.clone(), entry.crumbs.clone());
        output.push_str(&format!(
            "  <li data-path=\"{}\">{}</li>\n",
            escape_html(&entry.path),
            format_trail_html(&trail)
        ));
    }
    output.push_str("</ul>\n");
    output
}

/// Render a validation report as preformatted text
pub fn format_report_html(report: &ValidationReport) -> String {
    format!(
        "<pre class=\"navigation-report\">{}</pre>\n",
        escape_html(&super::format_report_text(report))
    )
}
