//! Application state.
//!
//! Shared state for all request handlers.

use std::collections::HashMap;
use std::sync::Arc;

use doxen_core::{DocTree, Event, Listener, Node};
use doxen_decorator::Decorator;

use crate::control::RequestControl;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Document tree, loaded once and never mutated.
    pub(crate) tree: Arc<DocTree>,
    /// Listener notified on page rendering and signals.
    pub(crate) decorator: Decorator,
    /// Component name expected in `do=<component>-<signal>`.
    pub(crate) component: String,
    /// URL prefix for generated links.
    pub(crate) base_url: String,
    /// Application version for cache invalidation.
    pub(crate) version: String,
}

impl AppState {
    /// Render a copy of the node at `key` through the node event.
    ///
    /// The shared tree keeps the raw source, which the image signal checks
    /// links against.
    pub(crate) fn render_node(&self, key: &str) -> Option<Node> {
        let mut node = self.tree.get_node(key)?.clone();
        let params = HashMap::new();
        let control = RequestControl::new(self, key, &params);
        self.decorator.listen(Event::node(&mut node, &control));
        Some(node)
    }
}
