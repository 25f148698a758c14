//! Navigation API endpoint.
//!
//! Returns the document tree as nested navigation items.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use doxen_core::{DocTree, Node};
use serde::Serialize;

use crate::handlers::to_url_path;
use crate::state::AppState;

/// Response for GET /api/navigation.
#[derive(Serialize)]
pub(crate) struct NavigationResponse {
    /// Top-level navigation items.
    items: Vec<NavItem>,
}

/// Navigation entry.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub(crate) struct NavItem {
    /// Display title.
    title: String,
    /// URL path.
    path: String,
    /// Nested entries.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<NavItem>,
}

/// Handle GET /api/navigation.
pub(crate) async fn get_navigation(State(state): State<Arc<AppState>>) -> Json<NavigationResponse> {
    Json(NavigationResponse {
        items: nav_items(&state.tree, ""),
    })
}

/// Navigation items for the children of `key`.
fn nav_items(tree: &DocTree, key: &str) -> Vec<NavItem> {
    tree.children(key)
        .map(|child| NavItem {
            title: tree.get_node(child).map_or(child, Node::title).to_owned(),
            path: to_url_path(child),
            children: nav_items(tree, child),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use doxen_core::{Container, TextLeaf};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_nav_items_nested() {
        let mut tree = DocTree::new();
        tree.insert("", Container::new("Home").into());
        tree.insert("api", Container::new("API").into());
        tree.insert("api/v1", TextLeaf::new("V1", "").into());
        tree.insert("guide", TextLeaf::new("Guide", "").into());

        let items = nav_items(&tree, "");

        assert_eq!(
            items,
            vec![
                NavItem {
                    title: "API".to_owned(),
                    path: "/api".to_owned(),
                    children: vec![NavItem {
                        title: "V1".to_owned(),
                        path: "/api/v1".to_owned(),
                        children: vec![],
                    }],
                },
                NavItem {
                    title: "Guide".to_owned(),
                    path: "/guide".to_owned(),
                    children: vec![],
                },
            ]
        );
    }

    #[test]
    fn test_navigation_response_serialization() {
        let response = NavigationResponse {
            items: vec![NavItem {
                title: "Guide".to_owned(),
                path: "/guide".to_owned(),
                children: vec![],
            }],
        };

        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["items"][0]["title"], "Guide");
        assert_eq!(json["items"][0]["path"], "/guide");
        assert!(json["items"][0].get("children").is_none());
    }
}
