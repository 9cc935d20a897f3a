//! Tree navigator view state: which directories are expanded and which file
//! is selected.
//!
//! The state only changes in response to user input, synchronously.  It
//! holds [`NodeId`]s, never references into the tree, so the tree can be
//! borrowed freely by the renderer.

use std::collections::HashSet;

use super::highlight::display_line_count;
use super::tree::{FileTree, NodeId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigatorOptions {
    /// Render file content inline under each file (ignored with a side panel).
    pub show_content: bool,
    /// Start with every top-level directory expanded.
    pub default_expanded: bool,
    /// Render the selected file in a panel beside the tree.
    pub side_panel: bool,
    /// File name to select on mount.
    pub default_open_file: Option<String>,
}

impl Default for NavigatorOptions {
    fn default() -> Self {
        Self {
            show_content: false,
            default_expanded: true,
            side_panel: false,
            default_open_file: None,
        }
    }
}

impl NavigatorOptions {
    /// Inline content rows are drawn only without a side panel.
    pub fn inline_content(&self) -> bool {
        self.show_content && !self.side_panel
    }
}

// ───────────────────────────────────────── rows ──────────────

/// One entry of the flattened render list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibleRow {
    Node { id: NodeId, depth: usize },
    /// Line `line` of the content of file `id`, drawn inline.
    Content { id: NodeId, line: usize, depth: usize },
}

impl VisibleRow {
    pub fn node_id(&self) -> NodeId {
        match *self {
            VisibleRow::Node { id, .. } | VisibleRow::Content { id, .. } => id,
        }
    }

    pub fn is_node(&self) -> bool {
        matches!(self, VisibleRow::Node { .. })
    }
}

// ───────────────────────────────────────── state ─────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeViewState {
    expanded: HashSet<NodeId>,
    selected: Option<NodeId>,
}

impl TreeViewState {
    /// Build the initial state for `tree`.  A `default_open_file` that cannot
    /// be found is ignored.
    pub fn mount(tree: &FileTree, options: &NavigatorOptions) -> Self {
        let mut state = Self::default();
        if options.default_expanded {
            state.expanded.extend(tree.root_dirs());
        }

        if let Some(name) = options.default_open_file.as_deref() {
            match tree.locate_file(name) {
                Some(path) => {
                    if let Some((&file, ancestors)) = path.split_last() {
                        state.expanded.extend(ancestors.iter().copied());
                        state.selected = Some(file);
                        tracing::debug!(path = ?tree.path_names(file), "default file opened");
                    }
                }
                None => tracing::debug!(file = name, "default file not found"),
            }
        }
        state
    }

    /// Flip the expansion of a directory.  Files are left alone.
    pub fn toggle(&mut self, tree: &FileTree, id: NodeId) {
        if !tree.get(id).is_dir() {
            return;
        }
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
    }

    pub fn expand(&mut self, tree: &FileTree, id: NodeId) {
        if tree.get(id).is_dir() {
            self.expanded.insert(id);
        }
    }

    pub fn collapse(&mut self, id: NodeId) {
        self.expanded.remove(&id);
    }

    /// Select `id` if it is a file.  Returns whether the selection changed.
    pub fn select_file(&mut self, tree: &FileTree, id: NodeId) -> bool {
        if tree.get(id).is_dir() || self.selected == Some(id) {
            return false;
        }
        self.selected = Some(id);
        true
    }

    /// Click behaviour: directories toggle, files become selected.
    pub fn activate(&mut self, tree: &FileTree, id: NodeId) {
        if tree.get(id).is_dir() {
            self.toggle(tree, id);
        } else {
            self.select_file(tree, id);
        }
    }

    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.expanded.contains(&id)
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    #[cfg(test)]
    pub fn expanded(&self) -> &HashSet<NodeId> {
        &self.expanded
    }

    /// Flatten the tree into render order.  Children of collapsed
    /// directories are skipped; files with content get one row per content
    /// line when inline content is on.
    pub fn visible_rows(&self, tree: &FileTree, options: &NavigatorOptions) -> Vec<VisibleRow> {
        let mut out = Vec::new();
        for &root in &tree.roots {
            self.collect_visible(tree, root, options.inline_content(), &mut out);
        }
        out
    }

    fn collect_visible(&self, tree: &FileTree, id: NodeId, inline: bool, out: &mut Vec<VisibleRow>) {
        let node = tree.get(id);
        out.push(VisibleRow::Node {
            id,
            depth: node.depth,
        });

        if node.is_dir() {
            if self.is_expanded(id) {
                for &child in &node.children {
                    self.collect_visible(tree, child, inline, out);
                }
            }
        } else if inline {
            if let Some(content) = node.content() {
                let count = display_line_count(content, node.language());
                out.extend((0..count).map(|line| VisibleRow::Content {
                    id,
                    line,
                    depth: node.depth + 1,
                }));
            }
        }
    }
}
