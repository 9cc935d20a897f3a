//! Custom Ratatui widget that renders a [`FileTree`] as an indented,
//! collapsible tree, optionally with file content inline.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, StatefulWidget, Widget},
};

use crate::core::{
    highlight::{source_text, HighlightCache},
    icons::{dir_icon, file_icon},
    navigator::{NavigatorOptions, TreeViewState, VisibleRow},
    tree::FileTree,
};

use super::layout::point_in_rect;
use super::theme::Theme;

const CONTENT_GUTTER: &str = "│ ";

// ───────────────────────────────────────── state ─────────────

/// Persistent state for the tree widget (cursor row, scroll offset).
#[derive(Debug, Default)]
pub struct TreeWidgetState {
    /// Index into the visible row list under the keyboard cursor.
    pub cursor: usize,
    /// Vertical scroll offset (first visible row).
    pub offset: usize,
    /// Rows available at the last render, used for mouse hit-testing.
    pub viewport: Rect,
}

impl TreeWidgetState {
    /// Ensure the cursor row is visible within a viewport of `height` rows.
    pub fn clamp_scroll(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + height {
            self.offset = self.cursor - height + 1;
        }
    }

    /// Visible-row index at screen position `row`, if it lies inside the
    /// last rendered viewport.
    pub fn row_at(&self, col: u16, row: u16) -> Option<usize> {
        point_in_rect(self.viewport, col, row).then(|| self.offset + (row - self.viewport.y) as usize)
    }
}

// ───────────────────────────────────────── widget ────────────

/// The tree widget itself, created fresh each frame.
pub struct TreeWidget<'a> {
    tree: &'a FileTree,
    view: &'a TreeViewState,
    options: &'a NavigatorOptions,
    highlights: &'a HighlightCache,
    theme: Theme,
    block: Option<Block<'a>>,
}

impl<'a> TreeWidget<'a> {
    pub fn new(
        tree: &'a FileTree,
        view: &'a TreeViewState,
        options: &'a NavigatorOptions,
        highlights: &'a HighlightCache,
        theme: Theme,
    ) -> Self {
        Self {
            tree,
            view,
            options,
            highlights,
            theme,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn node_line(&self, row: &VisibleRow) -> Line<'a> {
        let id = row.node_id();
        let node = self.tree.get(id);
        let indent = "  ".repeat(node.depth);

        match *row {
            VisibleRow::Node { .. } => {
                let (icon, style) = if node.is_dir() {
                    (dir_icon(self.view.is_expanded(id)), self.theme.dir_style())
                } else if self.view.selected() == Some(id) {
                    (file_icon(&node.name), self.theme.selected_file_style())
                } else {
                    (file_icon(&node.name), self.theme.file_style())
                };
                Line::from(vec![
                    Span::raw(indent),
                    Span::raw(format!("{icon} ")),
                    Span::styled(node.name.clone(), style),
                ])
            }
            VisibleRow::Content { line, depth, .. } => {
                let mut spans = vec![
                    Span::raw("  ".repeat(depth)),
                    Span::styled(CONTENT_GUTTER, self.theme.border_style()),
                ];
                match self.highlights.get(id, self.theme.mode()).and_then(|l| l.get(line)) {
                    Some(tokens) => spans.extend(
                        tokens
                            .iter()
                            .map(|t| Span::styled(t.text.clone(), self.theme.token_style(&t.style))),
                    ),
                    None => {
                        let text = node
                            .content()
                            .and_then(|c| source_text(c, node.language()).lines().nth(line))
                            .unwrap_or_default();
                        spans.push(Span::styled(text.to_string(), self.theme.content_style()));
                    }
                }
                Line::from(spans)
            }
        }
    }
}

impl<'a> StatefulWidget for TreeWidget<'a> {
    type State = TreeWidgetState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        // Resolve the inner area (inside the optional block border).
        let inner = if let Some(ref block) = self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };
        state.viewport = inner;

        let rows = self.view.visible_rows(self.tree, self.options);
        if rows.is_empty() {
            return;
        }
        state.cursor = state.cursor.min(rows.len() - 1);
        state.clamp_scroll(inner.height as usize);

        let visible = rows
            .iter()
            .enumerate()
            .skip(state.offset)
            .take(inner.height as usize);

        for (i, (row_idx, row)) in visible.enumerate() {
            let y = inner.y + i as u16;
            let line = self.node_line(row);
            buf.set_line(inner.x, y, &line, inner.width);
            if row_idx == state.cursor {
                buf.set_style(Rect::new(inner.x, y, inner.width, 1), self.theme.cursor_style());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::highlight::ColorMode;
    use crate::core::tree::{NodeId, NodeKind};

    fn row(buf: &Buffer, y: u16) -> String {
        (buf.area.x..buf.area.right()).map(|x| buf[(x, y)].symbol()).collect()
    }

    fn sample() -> (FileTree, NodeId, NodeId) {
        let mut tree = FileTree::new();
        let src = tree.add_root("src", NodeKind::Directory);
        let a = tree
            .add_child(src, "a.ts", NodeKind::file(Some("let x = 1;\nlet y = 2;".into()), None))
            .unwrap();
        tree.add_root("README.md", NodeKind::file(None, None));
        (tree, src, a)
    }

    fn render(
        tree: &FileTree,
        view: &TreeViewState,
        options: &NavigatorOptions,
        state: &mut TreeWidgetState,
        height: u16,
    ) -> Buffer {
        let area = Rect::new(0, 0, 40, height);
        let mut buf = Buffer::empty(area);
        let cache = HighlightCache::default();
        TreeWidget::new(tree, view, options, &cache, Theme::new(ColorMode::Dark)).render(area, &mut buf, state);
        buf
    }

    #[test]
    fn renders_icons_and_indentation() {
        let (tree, _, _) = sample();
        let options = NavigatorOptions::default();
        let view = TreeViewState::mount(&tree, &options);
        let buf = render(&tree, &view, &options, &mut TreeWidgetState::default(), 5);

        let first = row(&buf, 0);
        assert!(first.starts_with("📂"), "{first}");
        assert!(first.contains("src"));
        assert!(row(&buf, 1).starts_with("  🔷"));
        assert!(row(&buf, 1).contains("a.ts"));
        assert!(row(&buf, 2).starts_with("📝"));
        assert!(row(&buf, 3).trim().is_empty());
    }

    #[test]
    fn collapsed_directory_hides_children() {
        let (tree, src, _) = sample();
        let options = NavigatorOptions::default();
        let mut view = TreeViewState::mount(&tree, &options);
        view.toggle(&tree, src);
        let buf = render(&tree, &view, &options, &mut TreeWidgetState::default(), 5);
        assert!(row(&buf, 0).starts_with("📁"));
        assert!(row(&buf, 1).contains("README.md"));
    }

    #[test]
    fn inline_content_falls_back_to_raw_lines() {
        let (tree, _, _) = sample();
        let options = NavigatorOptions {
            show_content: true,
            ..NavigatorOptions::default()
        };
        let view = TreeViewState::mount(&tree, &options);
        let buf = render(&tree, &view, &options, &mut TreeWidgetState::default(), 6);
        assert!(row(&buf, 2).starts_with("    │ let x = 1;"), "{}", row(&buf, 2));
        assert!(row(&buf, 3).contains("let y = 2;"));
        assert!(row(&buf, 4).contains("README.md"));
    }

    #[test]
    fn cursor_row_is_highlighted_and_scrolled_into_view() {
        let (tree, _, _) = sample();
        let options = NavigatorOptions::default();
        let view = TreeViewState::mount(&tree, &options);
        let mut state = TreeWidgetState {
            cursor: 2,
            ..TreeWidgetState::default()
        };
        let theme = Theme::new(ColorMode::Dark);
        let buf = render(&tree, &view, &options, &mut state, 2);
        assert_eq!(state.offset, 1);
        assert!(row(&buf, 1).contains("README.md"));
        assert_eq!(buf[(30, 1)].bg, theme.cursor_style().bg.unwrap());
        assert_eq!(state.row_at(5, 1), Some(2));
        assert_eq!(state.row_at(5, 2), None);
    }

    #[test]
    fn cursor_is_clamped_to_rows() {
        let (tree, _, _) = sample();
        let options = NavigatorOptions::default();
        let view = TreeViewState::mount(&tree, &options);
        let mut state = TreeWidgetState {
            cursor: 99,
            ..TreeWidgetState::default()
        };
        render(&tree, &view, &options, &mut state, 5);
        assert_eq!(state.cursor, 2);
    }
}
