//! Markdown to HTML conversion for Doxen pages.
//!
//! [`MarkdownConverter`] implements [`MarkupConverter`] on top of
//! `pulldown-cmark`. Links are resolved through the request [`Control`]:
//!
//! - relative `.md` links become page links
//! - document-relative images become image-signal links, so the browser
//!   fetches them through the signal handler rather than from disk. The
//!   signal link carries the source as written; [`unescape_destination`]
//!   recovers the file path from it.
//!
//! # Example
//!
//! ```
//! use doxen_core::{MarkupConverter, StaticControl};
//! use doxen_markdown::MarkdownConverter;
//!
//! let control = StaticControl::new("doxen", "guide");
//! let converter = MarkdownConverter::new().with_image_signal("parsedown2image");
//! let html = converter.render("![Flow](images/flow.png)", &control);
//! assert!(html.contains("do=doxen-parsedown2image"));
//! ```

mod links;
mod renderer;
mod state;

use doxen_core::{Control, MarkupConverter};

pub use links::unescape_destination;
pub use renderer::HtmlRenderer;
pub use state::escape_html;

/// Stateless markdown converter.
#[derive(Clone, Debug, Default)]
pub struct MarkdownConverter {
    image_signal: Option<String>,
}

impl MarkdownConverter {
    /// Create a converter that leaves image sources untouched.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Route document-relative images through `signal`.
    #[must_use]
    pub fn with_image_signal(mut self, signal: impl Into<String>) -> Self {
        self.image_signal = Some(signal.into());
        self
    }
}

impl MarkupConverter for MarkdownConverter {
    fn render(&self, text: &str, control: &dyn Control) -> String {
        HtmlRenderer::new(control)
            .with_image_signal(self.image_signal.as_deref())
            .render_markdown(text)
    }
}
