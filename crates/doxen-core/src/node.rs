//! Document tree nodes.
//!
//! A node is either a [`Container`] (children only) or a [`Leaf`]. Leaves come
//! in three variants:
//!
//! - [`TextLeaf`]: inline text content
//! - [`FileLeaf`]: a markdown file on disk (full path plus raw text)
//! - [`AssetLeaf`]: a non-textual payload, never transformed

use std::path::{Path, PathBuf};

/// Structural kind of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// Node with children and no direct content.
    Container,
    /// Node without children.
    Leaf,
}

/// A node in the document tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// Directory-like node.
    Container(Container),
    /// Content-bearing node.
    Leaf(Leaf),
}

impl Node {
    /// Structural kind of this node.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Container(_) => NodeKind::Container,
            Self::Leaf(_) => NodeKind::Leaf,
        }
    }

    /// Borrow the leaf, if this is one.
    #[must_use]
    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            Self::Container(_) => None,
        }
    }

    /// Mutably borrow the leaf, if this is one.
    pub fn as_leaf_mut(&mut self) -> Option<&mut Leaf> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            Self::Container(_) => None,
        }
    }

    /// Display title of the node.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Container(container) => &container.title,
            Self::Leaf(leaf) => leaf.title(),
        }
    }
}

impl From<Container> for Node {
    fn from(container: Container) -> Self {
        Self::Container(container)
    }
}

impl From<TextLeaf> for Node {
    fn from(leaf: TextLeaf) -> Self {
        Self::Leaf(Leaf::Text(leaf))
    }
}

impl From<FileLeaf> for Node {
    fn from(leaf: FileLeaf) -> Self {
        Self::Leaf(Leaf::File(leaf))
    }
}

impl From<AssetLeaf> for Node {
    fn from(leaf: AssetLeaf) -> Self {
        Self::Leaf(Leaf::Asset(leaf))
    }
}

/// Node holding child keys.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Container {
    /// Display title.
    pub title: String,
    /// Keys of direct children, in display order.
    pub children: Vec<String>,
}

impl Container {
    /// Create an empty container.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            children: Vec::new(),
        }
    }

    /// Append a child key.
    #[must_use]
    pub fn with_child(mut self, key: impl Into<String>) -> Self {
        self.children.push(key.into());
        self
    }
}

/// Leaf node variants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Leaf {
    /// Inline text.
    Text(TextLeaf),
    /// Markdown file loaded from disk.
    File(FileLeaf),
    /// Opaque bytes.
    Asset(AssetLeaf),
}

impl Leaf {
    /// Mutable access to the textual content.
    ///
    /// Returns `None` for leaves whose representation is not text.
    pub fn text_mut(&mut self) -> Option<&mut String> {
        match self {
            Self::Text(leaf) => Some(&mut leaf.content),
            Self::File(leaf) => Some(&mut leaf.content),
            Self::Asset(_) => None,
        }
    }

    /// Textual content, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(leaf) => Some(&leaf.content),
            Self::File(leaf) => Some(&leaf.content),
            Self::Asset(_) => None,
        }
    }

    /// Borrow the file leaf, if this is one.
    #[must_use]
    pub fn as_file(&self) -> Option<&FileLeaf> {
        match self {
            Self::File(leaf) => Some(leaf),
            Self::Text(_) | Self::Asset(_) => None,
        }
    }

    fn title(&self) -> &str {
        match self {
            Self::Text(leaf) => &leaf.title,
            Self::File(leaf) => &leaf.title,
            Self::Asset(leaf) => &leaf.title,
        }
    }
}

/// Leaf carrying inline text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextLeaf {
    /// Display title.
    pub title: String,
    /// Text content, replaced in place when rendered.
    pub content: String,
}

impl TextLeaf {
    /// Create a text leaf.
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Leaf backed by a markdown file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileLeaf {
    /// Display title.
    pub title: String,
    filename: PathBuf,
    /// Document text. Raw source in the loaded tree.
    pub content: String,
}

impl FileLeaf {
    /// Create a file leaf.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        filename: impl Into<PathBuf>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            filename: filename.into(),
            content: content.into(),
        }
    }

    /// Full filesystem path of the source file.
    #[must_use]
    pub fn filename(&self) -> &Path {
        &self.filename
    }

    /// Directory containing the source file.
    #[must_use]
    pub fn directory(&self) -> &Path {
        self.filename.parent().unwrap_or(Path::new(""))
    }
}

/// Leaf carrying non-textual bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetLeaf {
    /// Display title.
    pub title: String,
    /// Source path of the asset.
    pub filename: PathBuf,
    /// Raw bytes.
    pub bytes: Vec<u8>,
}

impl AssetLeaf {
    /// Create an asset leaf.
    #[must_use]
    pub fn new(title: impl Into<String>, filename: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        Self {
            title: title.into(),
            filename: filename.into(),
            bytes,
        }
    }
}
