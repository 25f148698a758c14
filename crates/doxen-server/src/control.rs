//! Per-request control.

use std::collections::HashMap;

use doxen_core::{Control, Response, link};

use crate::state::AppState;

/// [`Control`] built from an HTTP request.
///
/// Parameters come from the query string. Links are built against the
/// configured base URL and component.
pub(crate) struct RequestControl<'a> {
    state: &'a AppState,
    page: &'a str,
    params: &'a HashMap<String, String>,
    response: Option<Response>,
}

impl<'a> RequestControl<'a> {
    pub(crate) fn new(
        state: &'a AppState,
        page: &'a str,
        params: &'a HashMap<String, String>,
    ) -> Self {
        Self {
            state,
            page,
            params,
            response: None,
        }
    }

    /// Take the response sent by a listener, if any.
    pub(crate) fn take_response(&mut self) -> Option<Response> {
        self.response.take()
    }
}

impl Control for RequestControl<'_> {
    fn page(&self) -> &str {
        self.page
    }

    fn parameter(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    fn link_base(&self) -> &str {
        self.state.tree.link_base(self.page)
    }

    fn signal_link(&self, signal: &str, params: &[(&str, &str)]) -> String {
        link::signal_link(
            &self.state.base_url,
            &self.state.component,
            signal,
            self.page,
            params,
        )
    }

    fn page_link(&self, key: &str) -> String {
        link::page_link(&self.state.base_url, key)
    }

    fn send_response(&mut self, response: Response) {
        if self.response.is_some() {
            tracing::warn!(page = %self.page, "Response already sent, replacing");
        }
        self.response = Some(response);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use doxen_core::{DocTree, FileLeaf};
    use doxen_decorator::Decorator;

    use super::*;

    fn state() -> AppState {
        let mut tree = DocTree::new();
        tree.insert(
            "domain",
            FileLeaf::new("Domain", "/docs/domain/index.md", "").into(),
        );
        AppState {
            tree: Arc::new(tree),
            decorator: Decorator::new(),
            component: "manual".to_owned(),
            base_url: "/wiki/".to_owned(),
            version: String::new(),
        }
    }

    #[test]
    fn test_links_use_configured_base_and_component() {
        let state = state();
        let params = HashMap::new();
        let control = RequestControl::new(&state, "domain", &params);

        assert_eq!(
            control.signal_link("parsedown2image", &[("imageLink", "a.png")]),
            "/wiki/?do=manual-parsedown2image&page=domain&imageLink=a.png"
        );
        assert_eq!(control.page_link("domain/billing"), "/wiki/?page=domain/billing");
    }

    #[test]
    fn test_link_base_of_index_page_is_its_own_key() {
        let state = state();
        let params = HashMap::new();

        assert_eq!(RequestControl::new(&state, "domain", &params).link_base(), "domain");
        assert_eq!(RequestControl::new(&state, "other/page", &params).link_base(), "other");
    }

    #[test]
    fn test_parameters_from_query() {
        let state = state();
        let params = HashMap::from([("imageLink".to_owned(), "images/a.png".to_owned())]);
        let control = RequestControl::new(&state, "domain", &params);

        assert_eq!(control.parameter("imageLink"), Some("images/a.png"));
        assert_eq!(control.parameter("page"), None);
    }
}
