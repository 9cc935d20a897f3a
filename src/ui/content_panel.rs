//! Side panel showing the selected file's content.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

use crate::core::{
    highlight::HighlightCache,
    icons::file_icon,
    tree::{FileTree, NodeId},
};

use super::theme::Theme;

pub const NO_CONTENT: &str = "No content available for this file.";
pub const NO_CONTENT_HINT: &str = "Add a content property to display file contents.";
pub const NOTHING_SELECTED: &str = "Select a file to view its content.";

pub struct ContentPanel<'a> {
    tree: &'a FileTree,
    selected: Option<NodeId>,
    highlights: &'a HighlightCache,
    theme: Theme,
}

impl<'a> ContentPanel<'a> {
    pub fn new(tree: &'a FileTree, selected: Option<NodeId>, highlights: &'a HighlightCache, theme: Theme) -> Self {
        Self {
            tree,
            selected,
            highlights,
            theme,
        }
    }

    fn placeholder(&self, lines: &[&'static str]) -> Vec<Line<'a>> {
        let mut out = vec![Line::raw("")];
        out.extend(
            lines
                .iter()
                .map(|text| Line::from(Span::styled(*text, self.theme.hint_style())).centered()),
        );
        out
    }
}

impl Widget for ContentPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_style());

        let Some(node) = self.selected.map(|id| self.tree.get(id)) else {
            let body = self.placeholder(&[NOTHING_SELECTED]);
            Paragraph::new(body).block(block).render(area, buf);
            return;
        };

        block = block
            .title(format!(" {} {} ", file_icon(&node.name), node.name))
            .title_style(self.theme.title_style());

        let cached = self.selected.and_then(|id| self.highlights.get(id, self.theme.mode()));
        let body: Vec<Line> = match (cached, node.content()) {
            (Some(lines), _) => lines
                .iter()
                .map(|tokens| {
                    Line::from(
                        tokens
                            .iter()
                            .map(|t| Span::styled(t.text.as_str(), self.theme.token_style(&t.style)))
                            .collect::<Vec<_>>(),
                    )
                })
                .collect(),
            (None, Some(content)) => content
                .lines()
                .map(|l| Line::styled(l, self.theme.file_style()))
                .collect(),
            (None, None) => self.placeholder(&[NO_CONTENT, NO_CONTENT_HINT]),
        };

        Paragraph::new(body)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::highlight::{ColorMode, Highlighter, Rgb, Token, TokenLines, TokenStyle};
    use crate::core::tree::NodeKind;

    struct Upper;
    impl Highlighter for Upper {
        fn highlight(&self, code: &str, _: &str, _: ColorMode) -> TokenLines {
            code.lines()
                .map(|l| {
                    vec![Token {
                        text: l.to_uppercase(),
                        style: TokenStyle {
                            fg: Some(Rgb(255, 0, 0)),
                            ..TokenStyle::default()
                        },
                    }]
                })
                .collect()
        }
    }

    fn screen(buf: &Buffer) -> String {
        let area = buf.area;
        (area.y..area.bottom())
            .map(|y| (area.x..area.right()).map(|x| buf[(x, y)].symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render(tree: &FileTree, selected: Option<NodeId>, cache: &HighlightCache) -> Buffer {
        let area = Rect::new(0, 0, 60, 8);
        let mut buf = Buffer::empty(area);
        ContentPanel::new(tree, selected, cache, Theme::new(ColorMode::Dark)).render(area, &mut buf);
        buf
    }

    #[test]
    fn empty_file_shows_placeholder() {
        let mut tree = FileTree::new();
        let f = tree.add_root("notes.md", NodeKind::file(None, None));
        let text = screen(&render(&tree, Some(f), &HighlightCache::default()));
        assert!(text.contains("notes.md"));
        assert!(text.contains(NO_CONTENT));
        assert!(text.contains(NO_CONTENT_HINT));
    }

    #[test]
    fn empty_string_content_shows_placeholder() {
        let tree = crate::core::source::from_json_str(r#"[{"name":"empty.md","type":"file","content":""}]"#).unwrap();
        let f = tree.roots[0];
        let mut cache = HighlightCache::default();
        cache.ensure(&crate::core::highlight::SyntectHighlighter::new(), &tree, f, ColorMode::Dark);
        assert!(cache.get(f, ColorMode::Dark).is_none());
        let text = screen(&render(&tree, Some(f), &cache));
        assert!(text.contains("empty.md"));
        assert!(text.contains(NO_CONTENT), "{text}");
    }

    #[test]
    fn highlighted_content_is_drawn() {
        let mut tree = FileTree::new();
        let f = tree.add_root(
            "main.tf",
            NodeKind::file(Some("\nresource x\n".into()), Some("hcl".into())),
        );
        let mut cache = HighlightCache::default();
        cache.ensure(&Upper, &tree, f, ColorMode::Dark);
        let buf = render(&tree, Some(f), &cache);
        let text = screen(&buf);
        assert!(text.contains("RESOURCE X"), "{text}");
        assert!(!text.contains(NO_CONTENT));
        assert_eq!(buf[(1, 1)].fg, ratatui::style::Color::Rgb(255, 0, 0));
    }

    #[test]
    fn nothing_selected() {
        let tree = FileTree::new();
        let text = screen(&render(&tree, None, &HighlightCache::default()));
        assert!(text.contains(NOTHING_SELECTED));
    }
}
