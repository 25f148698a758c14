//! Per-request control context.

use crate::response::Response;
use crate::tree::parent_key;

/// Request context handed to listeners and converters.
///
/// Implemented by the hosting framework. A control carries the current page
/// key, the request parameters and the sink for a prepared response.
pub trait Control {
    /// Key of the page the request targets.
    fn page(&self) -> &str;

    /// Named request parameter. `None` when absent.
    fn parameter(&self, name: &str) -> Option<&str>;

    /// Key relative links in the current page resolve against.
    ///
    /// Defaults to the parent of [`page`](Self::page). Section index pages
    /// override this with their own key.
    fn link_base(&self) -> &str {
        parent_key(self.page())
    }

    /// URL dispatching `signal` for the current page with extra parameters.
    fn signal_link(&self, signal: &str, params: &[(&str, &str)]) -> String;

    /// URL of another page in the tree.
    fn page_link(&self, key: &str) -> String;

    /// Hand a prepared response to the host.
    fn send_response(&mut self, response: Response);
}

/// Markup converter consumed by the decorator.
pub trait MarkupConverter: Send + Sync {
    /// Convert `text` into display markup.
    ///
    /// The control is used to resolve relative links against the current page.
    fn render(&self, text: &str, control: &dyn Control) -> String;
}

/// Control for offline rendering and tests.
///
/// Builds links against a fixed base URL and records the last response sent.
#[derive(Default)]
pub struct StaticControl {
    base_url: String,
    component: String,
    page: String,
    link_base: Option<String>,
    params: Vec<(String, String)>,
    response: Option<Response>,
}

impl StaticControl {
    /// Create a control for `page`.
    #[must_use]
    pub fn new(component: impl Into<String>, page: impl Into<String>) -> Self {
        Self {
            base_url: "/".to_owned(),
            component: component.into(),
            page: page.into(),
            link_base: None,
            params: Vec::new(),
            response: None,
        }
    }

    /// Set the URL prefix for generated links.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the key relative links resolve against.
    #[must_use]
    pub fn with_link_base(mut self, link_base: impl Into<String>) -> Self {
        self.link_base = Some(link_base.into());
        self
    }

    /// Add a request parameter.
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// Take the response sent by a listener, if any.
    pub fn take_response(&mut self) -> Option<Response> {
        self.response.take()
    }
}

impl Control for StaticControl {
    fn page(&self) -> &str {
        &self.page
    }

    fn parameter(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn link_base(&self) -> &str {
        self.link_base
            .as_deref()
            .unwrap_or_else(|| parent_key(&self.page))
    }

    fn signal_link(&self, signal: &str, params: &[(&str, &str)]) -> String {
        crate::link::signal_link(&self.base_url, &self.component, signal, &self.page, params)
    }

    fn page_link(&self, key: &str) -> String {
        crate::link::page_link(&self.base_url, key)
    }

    fn send_response(&mut self, response: Response) {
        self.response = Some(response);
    }
}
