//! `doxen render` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use doxen_config::{CliSettings, Config};
use doxen_core::{DocTree, Event, Leaf, Listener, StaticControl};
use doxen_decorator::Decorator;

use crate::error::CliError;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Page key to render (e.g. `guide` or `domain/billing`; empty for the root).
    page: String,

    /// Path to configuration file (default: auto-discover doxen.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,
}

impl RenderArgs {
    /// Execute the render command, writing the page HTML to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or tree loading fails, or the page
    /// has no textual content.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let html = render_page(&config, &self.page)?;

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(html.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}

/// Render the page at `page` through the decorator's node event.
fn render_page(config: &Config, page: &str) -> Result<String, CliError> {
    let tree = DocTree::load(&config.docs_resolved.source_dir)?;
    let key = page.trim_matches('/');
    tracing::debug!(page = %key, pages = tree.len(), "Rendering page");

    let mut node = tree
        .get_node(key)
        .cloned()
        .ok_or_else(|| CliError::Validation(format!("Page not found: {key}")))?;

    let control = StaticControl::new(config.docs_resolved.component.as_str(), key)
        .with_base_url(config.server.base_url.as_str())
        .with_link_base(tree.link_base(key));
    Decorator::new().listen(Event::node(&mut node, &control));

    match node.as_leaf().and_then(Leaf::text) {
        Some(html) => Ok(html.to_owned()),
        None => Err(CliError::Validation(format!(
            "Page has no textual content: {key}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::*;

    fn config_for(dir: &Path) -> Config {
        let path = dir.join("doxen.toml");
        fs::write(&path, "[docs]\nsource_dir = \"docs\"\n").unwrap();
        Config::load(Some(&path), None).unwrap()
    }

    #[test]
    fn test_render_page_converts_markdown() {
        let temp_dir = tempfile::tempdir().unwrap();
        let docs = temp_dir.path().join("docs");
        fs::create_dir_all(docs.join("section")).unwrap();
        fs::write(
            docs.join("section/page.md"),
            "# Page\n\n![d](images/diagram.png)\n",
        )
        .unwrap();
        let config = config_for(temp_dir.path());

        let html = render_page(&config, "section/page").unwrap();

        assert!(html.contains(r#"<h1 id="page">Page</h1>"#));
        assert!(html.contains(
            "/?do=doxen-parsedown2image&amp;page=section/page&amp;imageLink=images/diagram.png"
        ));
    }

    #[test]
    fn test_render_missing_page() {
        let temp_dir = tempfile::tempdir().unwrap();
        let docs = temp_dir.path().join("docs");
        fs::create_dir_all(&docs).unwrap();
        let config = config_for(temp_dir.path());

        let err = render_page(&config, "missing").unwrap_err();

        assert!(err.to_string().contains("Page not found"));
    }

    #[test]
    fn test_render_container_has_no_content() {
        let temp_dir = tempfile::tempdir().unwrap();
        let docs = temp_dir.path().join("docs");
        fs::create_dir_all(docs.join("api")).unwrap();
        fs::write(docs.join("api/v1.md"), "# V1").unwrap();
        let config = config_for(temp_dir.path());

        let err = render_page(&config, "api").unwrap_err();

        assert!(matches!(err, CliError::Validation(_)));
    }
}
