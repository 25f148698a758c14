//! Root endpoint.
//!
//! `GET /?do=<component>-<signal>&page=<key>&...` dispatches a signal event
//! and flushes the response the listener prepared. Without `do`, the page
//! named by `page` (the root by default) is rendered as an HTML document.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use doxen_core::{Control, Event, Leaf, Listener, Node};
use doxen_markdown::escape_html;

use crate::control::RequestControl;
use crate::error::ServerError;
use crate::handlers::to_key;
use crate::state::AppState;

/// Query parameter selecting the signal.
const DO_PARAM: &str = "do";
/// Query parameter naming the page.
const PAGE_PARAM: &str = "page";

/// Handle GET /.
pub(crate) async fn get_root(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ServerError> {
    if params.contains_key(DO_PARAM) {
        // Listeners touch the filesystem and encode images
        return tokio::task::spawn_blocking(move || dispatch_signal(&state, &params)).await?;
    }
    render_page(&state, page_key(&params))
}

fn page_key(params: &HashMap<String, String>) -> &str {
    params.get(PAGE_PARAM).map_or("", |page| to_key(page))
}

/// Dispatch the `do` parameter (`<component>-<signal>`) as a signal event.
fn dispatch_signal(
    state: &AppState,
    params: &HashMap<String, String>,
) -> Result<Response, ServerError> {
    let action = params.get(DO_PARAM).map_or("", String::as_str);
    let page = page_key(params);
    let signal = match action.split_once('-') {
        Some((component, signal)) if component == state.component && !signal.is_empty() => signal,
        _ => return Err(ServerError::InvalidSignal(action.to_owned())),
    };

    let mut control = RequestControl::new(state, page, params);
    state
        .decorator
        .listen(Event::signal(signal, &mut control, &state.tree));

    let Some(response) = control.take_response() else {
        tracing::debug!(signal = %signal, page = %page, "No listener answered signal");
        return Err(ServerError::UnhandledSignal(signal.to_owned()));
    };

    let content_type = response.content_type();
    let body = response.into_bytes()?;
    Ok(([(header::CONTENT_TYPE, content_type)], body).into_response())
}

/// Render the page at `key` as an HTML document.
fn render_page(state: &AppState, key: &str) -> Result<Response, ServerError> {
    let node = state
        .render_node(key)
        .ok_or_else(|| ServerError::PageNotFound(key.to_owned()))?;

    let params = HashMap::new();
    let control = RequestControl::new(state, key, &params);

    let mut body = String::new();
    if let Some(html) = node.as_leaf().and_then(Leaf::text) {
        body.push_str(html);
    }
    write_children(&mut body, state, key, &control);

    Ok(Html(html_document(node.title(), &body)).into_response())
}

/// Append a list of links to the children of `key`, if it has any.
fn write_children(out: &mut String, state: &AppState, key: &str, control: &dyn Control) {
    let mut children = state.tree.children(key).peekable();
    if children.peek().is_none() {
        return;
    }

    out.push_str("<nav><ul>");
    for child in children {
        let title = state.tree.get_node(child).map_or(child, Node::title);
        let _ = write!(
            out,
            r#"<li><a href="{}">{}</a></li>"#,
            escape_html(&control.page_link(child)),
            escape_html(title)
        );
    }
    out.push_str("</ul></nav>");
}

fn html_document(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n<main>\n{body}\n</main>\n</body>\n</html>\n",
        escape_html(title)
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_html_document_escapes_title() {
        let html = html_document("A & B", "<p>x</p>");

        assert!(html.starts_with("<!doctype html>"));
        assert!(html.contains("<title>A &amp; B</title>"));
        assert!(html.contains("<main>\n<p>x</p>\n</main>"));
    }

    #[test]
    fn test_html_document_shape() {
        assert_eq!(
            html_document("T", "b"),
            "<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>T</title>\n</head>\n<body>\n<main>\nb\n</main>\n</body>\n</html>\n"
        );
    }
}
