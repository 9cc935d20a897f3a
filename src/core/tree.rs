//! In-memory file tree shown by the navigator.
//!
//! Nodes live in a flat arena ([`FileTree::nodes`]) and link to each other
//! by index.  A [`NodeId`] therefore names one position in the hierarchy,
//! which is what expansion and selection are keyed on: two files called
//! `main.tf` in different directories never share state.
//!
//! The tree is immutable once built; only [`super::navigator`] state
//! changes while the UI runs.

use crate::error::SourceError;

/// Index into [`FileTree::nodes`].
pub type NodeId = usize;

// ───────────────────────────────────────── node ──────────────

/// Directories carry nothing but children; files carry an optional payload
/// and never have children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Directory,
    File {
        content: Option<String>,
        /// Highlighter hint, e.g. `"hcl"` or `"yaml"`.
        language: Option<String>,
    },
}

impl NodeKind {
    pub fn file(content: Option<String>, language: Option<String>) -> Self {
        NodeKind::File { content, language }
    }
}

#[derive(Debug, Clone)]
pub struct TreeNode {
    pub name: String,
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Depth from the top level (0 = root entry).
    pub depth: usize,
}

impl TreeNode {
    pub fn is_dir(&self) -> bool {
        matches!(self.kind, NodeKind::Directory)
    }

    /// File content.  An empty string counts as no content.
    pub fn content(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::File { content, .. } => content.as_deref().filter(|c| !c.is_empty()),
            NodeKind::Directory => None,
        }
    }

    pub fn language(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::File { language, .. } => language.as_deref(),
            NodeKind::Directory => None,
        }
    }
}

// ───────────────────────────────────────── arena tree ────────

/// Arena-backed tree with an ordered list of top-level entries.
#[derive(Debug, Clone, Default)]
pub struct FileTree {
    pub nodes: Vec<TreeNode>,
    pub roots: Vec<NodeId>,
}

impl FileTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a top-level entry.
    pub fn add_root(&mut self, name: impl Into<String>, kind: NodeKind) -> NodeId {
        let id = self.push(name.into(), kind, None, 0);
        self.roots.push(id);
        id
    }

    /// Append `name` under `parent`.  Files cannot have children.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        kind: NodeKind,
    ) -> Result<NodeId, SourceError> {
        let name = name.into();
        let parent_node = &self.nodes[parent];
        if !parent_node.is_dir() {
            return Err(SourceError::FileWithChildren {
                name: parent_node.name.clone(),
            });
        }
        let depth = parent_node.depth + 1;
        let id = self.push(name, kind, Some(parent), depth);
        self.nodes[parent].children.push(id);
        Ok(id)
    }

    fn push(&mut self, name: String, kind: NodeKind, parent: Option<NodeId>, depth: usize) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(TreeNode {
            name,
            kind,
            parent,
            children: Vec::new(),
            depth,
        });
        id
    }

    pub fn get(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Depth-first search, in document order, for the first *file* named
    /// `name`.  Returns the ids from the top-level entry down to the file.
    pub fn locate_file(&self, name: &str) -> Option<Vec<NodeId>> {
        let mut path = Vec::new();
        for &root in &self.roots {
            if self.locate_in(root, name, &mut path) {
                return Some(path);
            }
        }
        None
    }

    fn locate_in(&self, id: NodeId, name: &str, path: &mut Vec<NodeId>) -> bool {
        let node = &self.nodes[id];
        path.push(id);
        if !node.is_dir() && node.name == name {
            return true;
        }
        for &child in &node.children {
            if self.locate_in(child, name, path) {
                return true;
            }
        }
        path.pop();
        false
    }

    /// Names from the top-level entry down to `id`.
    pub fn path_names(&self, id: NodeId) -> Vec<&str> {
        let mut names = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = &self.nodes[current];
            names.push(node.name.as_str());
            cursor = node.parent;
        }
        names.reverse();
        names
    }

    /// Top-level directories, in order.
    pub fn root_dirs(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.roots.iter().copied().filter(|&id| self.nodes[id].is_dir())
    }
}
