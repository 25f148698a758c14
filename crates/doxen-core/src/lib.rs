//! Core contracts for the Doxen documentation renderer.
//!
//! This crate provides:
//! - [`DocTree`] and [`Node`]: the document tree, loadable from a directory
//! - [`Event`] and [`Listener`]: the extension point notified on node
//!   rendering and on out-of-band signals
//! - [`Control`]: the per-request context (page, parameters, response sink)
//! - [`MarkupConverter`]: the text-to-markup contract
//! - [`Response`]: a deferred response written by the host
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use doxen_core::{DocTree, Event, StaticControl};
//!
//! let tree = DocTree::load(Path::new("docs"))?;
//! let mut node = tree.get_node("guide").cloned().unwrap();
//! let control = StaticControl::new("doxen", "guide");
//! listener.listen(Event::node(&mut node, &control));
//! ```

mod control;
mod error;
mod event;
pub mod link;
pub mod loader;
mod node;
mod response;
mod tree;

pub use control::{Control, MarkupConverter, StaticControl};
pub use error::TreeError;
pub use event::{Event, Listener, NodeEvent, SignalEvent};
pub use node::{AssetLeaf, Container, FileLeaf, Leaf, Node, NodeKind, TextLeaf};
pub use response::Response;
pub use tree::{DocTree, parent_key};
