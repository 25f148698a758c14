//! Filesystem tree loader.
//!
//! Walks a documentation directory and maps it onto [`DocTree`] keys:
//!
//! | File                  | Key             | Node               |
//! |-----------------------|-----------------|--------------------|
//! | `index.md`            | `""`            | file leaf          |
//! | `guide.md`            | `"guide"`       | file leaf          |
//! | `domain/index.md`     | `"domain"`      | file leaf          |
//! | `domain/billing.md`   | `"domain/billing"` | file leaf       |
//! | `api/` (no index.md)  | `"api"`         | container          |
//!
//! Hidden entries and gitignored paths are skipped. Non-markdown files are not
//! part of the tree, and directories without pages get no node.

use std::fs;
use std::path::{Component, Path};

use ignore::WalkBuilder;

use crate::error::TreeError;
use crate::node::{Container, FileLeaf, Node};
use crate::tree::{DocTree, parent_key};

/// Title used for the root container when no `index.md` exists.
const ROOT_TITLE: &str = "Home";

pub(crate) fn load(source_dir: &Path) -> Result<DocTree, TreeError> {
    if !source_dir.is_dir() {
        return Err(TreeError::NotFound(source_dir.to_path_buf()));
    }
    // File leaves carry absolute paths so image resolution can compare prefixes
    let root = source_dir
        .canonicalize()
        .map_err(|e| TreeError::io(source_dir, e))?;

    let mut tree = DocTree::new();

    let walker = WalkBuilder::new(&root)
        .require_git(false)
        .sort_by_file_name(std::cmp::Ord::cmp)
        .build();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(error = %err, "Skipping unreadable entry");
                continue;
            }
        };
        let path = entry.path();
        let Ok(relative) = path.strip_prefix(&root) else {
            continue;
        };

        if entry.file_type().is_none_or(|t| !t.is_file()) {
            continue;
        }
        if path.extension().is_none_or(|ext| ext != "md") {
            continue;
        }

        let key = markdown_key(relative);
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(file = %path.display(), error = %err, "Skipping unreadable page");
                continue;
            }
        };
        let title = extract_title(&content).unwrap_or_else(|| title_from_key(&key).to_owned());
        let leaf = FileLeaf::new(title, path, content);

        if tree.insert(key.clone(), leaf.into()).is_some() {
            tracing::warn!(key = %key, file = %path.display(), "Duplicate page key, last file wins");
        }
    }

    add_containers(&mut tree);
    link_children(&mut tree);

    tracing::debug!(nodes = tree.len(), source = %root.display(), "Loaded document tree");
    tree.set_source_dir(root);
    Ok(tree)
}

/// Add a container for every ancestor key without a node, and for the root.
///
/// Directories holding no pages get no node.
fn add_containers(tree: &mut DocTree) {
    let mut missing: Vec<String> = vec![String::new()];
    for key in tree.keys() {
        let mut parent = key;
        while !parent.is_empty() {
            parent = parent_key(parent);
            missing.push(parent.to_owned());
        }
    }

    for key in missing {
        if tree.get_node(&key).is_none() {
            let title = title_from_key(&key).to_owned();
            tree.insert(key, Container::new(title).into());
        }
    }
}

/// Record each node's key in its parent container.
fn link_children(tree: &mut DocTree) {
    let keys: Vec<String> = tree
        .keys()
        .filter(|key| !key.is_empty())
        .map(ToOwned::to_owned)
        .collect();

    for key in keys {
        if let Some(Node::Container(container)) = tree.get_node_mut(parent_key(&key)) {
            container.children.push(key);
        }
    }
}

/// Convert a relative path to a key.
fn path_to_key(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Convert a relative markdown file path to a key.
fn markdown_key(relative: &Path) -> String {
    let is_index = relative
        .file_name()
        .is_some_and(|name| name.eq_ignore_ascii_case("index.md"));

    if is_index {
        path_to_key(relative.parent().unwrap_or(Path::new("")))
    } else {
        path_to_key(&relative.with_extension(""))
    }
}

/// Last key segment, or the root title.
fn title_from_key(key: &str) -> &str {
    if key.is_empty() {
        ROOT_TITLE
    } else {
        key.rsplit('/').next().unwrap_or(key)
    }
}

/// Extract the text of the first level-one ATX heading.
fn extract_title(content: &str) -> Option<String> {
    content
        .lines()
        .map(str::trim_start)
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().trim_end_matches('#').trim_end().to_owned())
        .filter(|title| !title.is_empty())
}
