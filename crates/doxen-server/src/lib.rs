//! HTTP server for the Doxen documentation renderer.
//!
//! Serves a document tree loaded once at startup:
//! - `GET /?page=<key>` renders a page through the decorator's node event
//! - `GET /?do=<component>-<signal>&page=<key>&...` dispatches a signal and
//!   writes the response the listener prepared (e.g. document images)
//! - `GET /api/pages/{path}` and `GET /api/navigation` expose pages and
//!   structure as JSON
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use doxen_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         source_dir: PathBuf::from("docs"),
//!         version: "1.0.0".to_owned(),
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```

mod app;
mod control;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use doxen_core::DocTree;
use doxen_decorator::Decorator;
use state::AppState;

pub use error::ServerError;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Documentation source directory.
    pub source_dir: PathBuf,
    /// URL prefix for generated links.
    pub base_url: String,
    /// Component name in `do=<component>-<signal>`.
    pub component: String,
    /// Application version (for cache invalidation).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
            source_dir: PathBuf::from("docs"),
            base_url: "/".to_owned(),
            component: doxen_config::DEFAULT_COMPONENT.to_owned(),
            version: String::new(),
        }
    }
}

/// Run the server.
///
/// # Errors
///
/// Returns an error if the document tree cannot be loaded or the server
/// fails to bind.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let tree = DocTree::load(&config.source_dir)?;
    tracing::info!(
        pages = tree.len(),
        source = %config.source_dir.display(),
        "Loaded documentation"
    );

    let state = Arc::new(AppState {
        tree: Arc::new(tree),
        decorator: Decorator::new(),
        component: config.component,
        base_url: config.base_url,
        version: config.version,
    });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from Doxen config.
#[must_use]
pub fn server_config_from_config(config: &doxen_config::Config, version: String) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        source_dir: config.docs_resolved.source_dir.clone(),
        base_url: config.server.base_url.clone(),
        component: config.docs_resolved.component.clone(),
        version,
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_server_config_from_config() {
        let toml_dir = tempfile::tempdir().unwrap();
        let path = toml_dir.path().join("doxen.toml");
        std::fs::write(
            &path,
            "[server]\nport = 8000\nbase_url = \"/wiki/\"\n\n[docs]\ncomponent = \"manual\"\n",
        )
        .unwrap();
        let config = doxen_config::Config::load(Some(&path), None).unwrap();

        let server = server_config_from_config(&config, "1.2.3".to_owned());

        assert_eq!(server.port, 8000);
        assert_eq!(server.base_url, "/wiki/");
        assert_eq!(server.component, "manual");
        assert_eq!(server.source_dir, toml_dir.path().join("docs"));
        assert_eq!(server.version, "1.2.3");
    }

    #[tokio::test]
    async fn test_run_server_missing_source_dir() {
        let config = ServerConfig {
            source_dir: Path::new("/nonexistent/doxen/docs").to_path_buf(),
            ..ServerConfig::default()
        };

        let err = run_server(config).await.unwrap_err();

        assert!(matches!(err, ServerError::Tree(_)));
    }
}
