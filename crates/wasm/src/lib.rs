//! WASM bindings for mta-navcrumbs
//!
//! Lets a site's JavaScript host resolve and render breadcrumbs from the
//! same navigation JSON it already queries.

use mta_navcrumbs_core::{
    load_str, output::format_trail_html, resolve_trail, BreadcrumbTrail, MatchMode, SourceFormat,
};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Result envelope returned to JavaScript
#[derive(Serialize, Deserialize)]
pub struct WasmResult {
    pub success: bool,
    pub data: Option<String>,
    pub error: Option<String>,
}

impl WasmResult {
    fn ok(data: String) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }

    fn into_js(self) -> JsValue {
        serde_wasm_bindgen::to_value(&self).unwrap_or(JsValue::NULL)
    }
}

fn match_mode(ignore_trailing_slash: bool) -> MatchMode {
    if ignore_trailing_slash {
        MatchMode::IgnoreTrailingSlash
    } else {
        MatchMode::Exact
    }
}

fn trail_for(
    navigation_json: &str,
    target: &str,
    ignore_trailing_slash: bool,
) -> Result<BreadcrumbTrail, String> {
    let forest = load_str(navigation_json, SourceFormat::Json).map_err(|e| e.to_string())?;
    Ok(resolve_trail(&forest, target, match_mode(ignore_trailing_slash)))
}

/// Resolve the trail for `target`; `data` holds the crumbs as a JSON array
pub fn resolve_json(
    navigation_json: &str,
    target: &str,
    ignore_trailing_slash: bool,
) -> WasmResult {
    match trail_for(navigation_json, target, ignore_trailing_slash)
        .and_then(|trail| serde_json::to_string(&trail.crumbs).map_err(|e| e.to_string()))
    {
        Ok(data) => WasmResult::ok(data),
        Err(e) => WasmResult::err(e),
    }
}

/// Render the trail for `target` as HTML; `data` is empty when nothing matched
pub fn render_html(navigation_json: &str, target: &str, ignore_trailing_slash: bool) -> WasmResult {
    match trail_for(navigation_json, target, ignore_trailing_slash) {
        Ok(trail) => WasmResult::ok(format_trail_html(&trail)),
        Err(e) => WasmResult::err(e),
    }
}

/// Resolve breadcrumbs and return a `{success, data, error}` object
#[wasm_bindgen]
pub fn resolve_breadcrumbs(
    navigation_json: &str,
    target: &str,
    ignore_trailing_slash: bool,
) -> JsValue {
    resolve_json(navigation_json, target, ignore_trailing_slash).into_js()
}

/// Render breadcrumbs as HTML and return a `{success, data, error}` object
#[wasm_bindgen]
pub fn render_breadcrumbs_html(
    navigation_json: &str,
    target: &str,
    ignore_trailing_slash: bool,
) -> JsValue {
    render_html(navigation_json, target, ignore_trailing_slash).into_js()
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAV: &str = r#"[
        {"label": "Docs", "path": "/docs"},
        {"label": "Guides", "path": "/guides", "items": [
            {"label": "Setup", "path": "/guides/setup", "items": []}
        ]}
    ]"#;

    #[test]
    fn test_resolve_json() {
        let result = resolve_json(NAV, "/guides/setup", false);
        assert!(result.success);
        let crumbs: serde_json::Value = serde_json::from_str(&result.data.unwrap()).unwrap();
        assert_eq!(crumbs[0]["label"], "Guides");
        assert_eq!(crumbs[1]["label"], "Setup");
    }

    #[test]
    fn test_missing_is_empty_array() {
        let result = resolve_json(NAV, "/missing", false);
        assert!(result.success);
        assert_eq!(result.data.as_deref(), Some("[]"));
    }

    #[test]
    fn test_render_html_and_bad_input() {
        let result = render_html(NAV, "/guides/setup/", true);
        assert!(result.data.unwrap().contains("<a href=\"/guides\">Guides / </a>"));

        let result = render_html("not json", "/", false);
        assert!(!result.success);
        assert!(result.error.is_some());
    }
}
