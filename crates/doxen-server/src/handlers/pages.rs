//! Pages API endpoint.
//!
//! Renders a page through the node event and returns JSON with metadata and
//! HTML content.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use doxen_core::Leaf;
use md5::{Digest, Md5};
use serde::Serialize;

use crate::error::ServerError;
use crate::handlers::{to_key, to_url_path};
use crate::state::AppState;

/// Response for GET /api/pages/{path}.
#[derive(Serialize)]
struct PageResponse {
    /// Page metadata.
    meta: PageMeta,
    /// Rendered HTML content. Empty for containers.
    content: String,
}

/// Page metadata.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageMeta {
    /// Page title.
    title: String,
    /// URL path.
    path: String,
    /// Source file path relative to the source directory. Empty for nodes
    /// without a file.
    source_file: String,
}

/// Handle GET /api/pages/ (root page).
pub(crate) async fn get_root_page(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ServerError> {
    get_page_impl("", &state, &headers)
}

/// Handle GET /api/pages/{path}.
pub(crate) async fn get_page(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ServerError> {
    get_page_impl(to_key(&path), &state, &headers)
}

/// Shared implementation for page rendering.
fn get_page_impl(
    key: &str,
    state: &AppState,
    headers: &HeaderMap,
) -> Result<axum::response::Response, ServerError> {
    let node = state
        .render_node(key)
        .ok_or_else(|| ServerError::PageNotFound(key.to_owned()))?;

    let leaf = node.as_leaf();
    let content = leaf.and_then(Leaf::text).unwrap_or_default().to_owned();

    let etag = compute_etag(&state.version, &content);

    // Check If-None-Match header for conditional request
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && if_none_match.as_bytes() == etag.as_bytes()
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    let source_file = leaf
        .and_then(Leaf::as_file)
        .map_or(String::new(), |file| {
            state.tree.relative_path(file.filename()).display().to_string()
        });

    let response = PageResponse {
        meta: PageMeta {
            title: node.title().to_owned(),
            path: to_url_path(key),
            source_file,
        },
        content,
    };

    Ok((
        [
            (header::ETAG, etag),
            (header::CACHE_CONTROL, "private, max-age=60".to_owned()),
        ],
        Json(response),
    )
        .into_response())
}

/// Compute `ETag` from version and content.
///
/// MD5 truncated to 64 bits (16 hex chars).
fn compute_etag(version: &str, content: &str) -> String {
    let hash = Md5::digest(format!("{version}:{content}").as_bytes());
    format!("\"{}\"", &hex::encode(hash)[..16])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_etag_includes_version() {
        assert_ne!(
            compute_etag("1.0.0", "content"),
            compute_etag("1.0.1", "content")
        );
    }

    #[test]
    fn test_compute_etag_includes_content() {
        assert_ne!(
            compute_etag("1.0.0", "content1"),
            compute_etag("1.0.0", "content2")
        );
    }

    #[test]
    fn test_compute_etag_format() {
        let etag = compute_etag("1.0.0", "content");

        assert!(etag.starts_with('"'));
        assert!(etag.ends_with('"'));
        // 16 hex chars + 2 quotes
        assert_eq!(etag.len(), 18);
    }

    #[test]
    fn test_page_meta_serialization() {
        let meta = PageMeta {
            title: "Guide".to_owned(),
            path: "/guide".to_owned(),
            source_file: "domain/guide.md".to_owned(),
        };

        let json = serde_json::to_value(&meta).unwrap();

        assert_eq!(json["title"], "Guide");
        assert_eq!(json["path"], "/guide");
        assert_eq!(json["sourceFile"], "domain/guide.md");
    }
}
