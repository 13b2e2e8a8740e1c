//! Nested path tree and its `tree`-style rendering.

use std::collections::BTreeMap;
use std::path::{Component, Path};
#[cfg(feature = "logging")]
use tracing;

const HEADER: &str = ". Files that were selected:\n|";

/// A node per path segment. Children are ordered by name.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PathTree {
    children: BTreeMap<String, PathTree>,
    /// Set when some inserted path ended at this node.
    leaf: bool,
}

/// Directory and file counts gathered while rendering.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TreeSummary {
    pub directories: usize,
    pub files: usize,
}

impl PathTree {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut tree = Self::new();
        for path in paths {
            tree.insert(path.as_ref());
        }
        tree
    }
    /// Inserts the normal components of `path`; `.` and root components are skipped.
    pub fn insert(&mut self, path: &Path) {
        let mut node = self;
        for component in path.components() {
            let segment = match component {
                Component::Normal(name) => name.to_string_lossy().into_owned(),
                Component::ParentDir => "..".to_string(),
                Component::CurDir | Component::RootDir | Component::Prefix(_) => continue,
            };
            node = node.children.entry(segment).or_default();
        }
        node.leaf = true;
    }
    /// Whether some inserted path ended exactly at this node.
    pub fn is_leaf(&self) -> bool {
        self.leaf
    }
    /// A node is a directory iff it has children, even if a path also ended here.
    pub fn is_dir(&self) -> bool {
        !self.children.is_empty()
    }

    /// Renders the header, the tree body and the `N directories, M files` line.
    pub fn render(&self) -> (String, TreeSummary) {
        let mut summary = TreeSummary::default();
        let mut lines = vec![HEADER.to_string()];
        self.render_children("", &mut lines, &mut summary);
        lines.push(format!(
            "\n{} directories, {} files",
            summary.directories, summary.files
        ));
        (lines.join("\n"), summary)
    }
    fn render_children(&self, prefix: &str, lines: &mut Vec<String>, summary: &mut TreeSummary) {
        let last = self.children.len().saturating_sub(1);
        for (i, (name, child)) in self.children.iter().enumerate() {
            let (connector, extension) = if i == last {
                ("└── ", "    ")
            } else {
                ("├── ", "│   ")
            };
            if child.is_dir() {
                #[cfg(feature = "logging")]
                {
                    if child.is_leaf() {
                        tracing::warn!(name = %name, "path is both a file and a directory; shown as directory");
                    }
                }
                lines.push(format!("{prefix}{connector}{name}/"));
                summary.directories += 1;
            } else {
                lines.push(format!("{prefix}{connector}{name}"));
                summary.files += 1;
            }
            child.render_children(&format!("{prefix}{extension}"), lines, summary);
        }
    }
}

/// Builds the path tree for `paths` and renders it.
pub fn paths_as_tree<P: AsRef<Path>>(paths: &[P]) -> String {
    PathTree::from_paths(paths).render().0
}
