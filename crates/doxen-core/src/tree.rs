//! Document tree.
//!
//! # Key Convention
//!
//! Keys are URL-style paths without a leading slash:
//! - `""` - root
//! - `"guide"` - top-level page or section
//! - `"domain/billing"` - nested page

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::TreeError;
use crate::loader;
use crate::node::{Leaf, Node};

/// Ordered mapping from page key to node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocTree {
    nodes: BTreeMap<String, Node>,
    source_dir: Option<PathBuf>,
}

impl DocTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from a documentation directory.
    ///
    /// See the [`loader`](crate::loader) module for the key mapping.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::NotFound`] if `source_dir` is not a directory and
    /// [`TreeError::Io`] if it cannot be canonicalized. Unreadable markdown
    /// files are skipped with a warning.
    pub fn load(source_dir: &Path) -> Result<Self, TreeError> {
        loader::load(source_dir)
    }

    /// Look up the node at `key`.
    #[must_use]
    pub fn get_node(&self, key: &str) -> Option<&Node> {
        self.nodes.get(key)
    }

    pub(crate) fn get_node_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.nodes.get_mut(key)
    }

    /// Insert a node, returning the node previously stored at `key`.
    pub fn insert(&mut self, key: impl Into<String>, node: Node) -> Option<Node> {
        self.nodes.insert(key.into(), node)
    }

    /// Iterate over all keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Record the canonical directory the tree was loaded from.
    pub(crate) fn set_source_dir(&mut self, source_dir: PathBuf) {
        self.source_dir = Some(source_dir);
    }

    /// `path` relative to the source directory.
    ///
    /// Paths outside it, or in a tree built in memory, are reduced to their
    /// file name so callers never expose absolute locations.
    #[must_use]
    pub fn relative_path<'a>(&self, path: &'a Path) -> &'a Path {
        self.source_dir
            .as_deref()
            .and_then(|root| path.strip_prefix(root).ok())
            .or_else(|| path.file_name().map(Path::new))
            .unwrap_or(Path::new(""))
    }

    /// Keys of the direct children of `key`, whatever the node kind.
    ///
    /// A section with an `index.md` is a leaf but still has children.
    pub fn children<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> {
        self.keys()
            .filter(move |candidate| !candidate.is_empty() && parent_key(candidate) == key)
    }

    /// Key relative links in the page at `key` resolve against.
    ///
    /// Pages loaded from an `index.md` live inside their own directory, every
    /// other page lives in its parent's.
    #[must_use]
    pub fn link_base<'a>(&self, key: &'a str) -> &'a str {
        let is_index = self
            .get_node(key)
            .and_then(Node::as_leaf)
            .and_then(Leaf::as_file)
            .and_then(|file| file.filename().file_stem())
            .is_some_and(|stem| stem.eq_ignore_ascii_case("index"));

        if is_index || key.is_empty() {
            key
        } else {
            parent_key(key)
        }
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Key of the parent of `key` (`""` for top-level keys).
#[must_use]
pub fn parent_key(key: &str) -> &str {
    key.rsplit_once('/').map_or("", |(parent, _)| parent)
}
