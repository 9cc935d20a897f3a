//! Syntax highlighting for file content.
//!
//! The tokenizer itself is `syntect`; this module only decides *what* gets
//! tokenized and turns the result into renderer-neutral [`Token`]s so that
//! `core` stays free of Ratatui types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Style, Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use super::tree::{FileTree, NodeId};

// ───────────────────────────────────────── colour mode ───────

/// Light/dark signal shared by every widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Light,
    #[default]
    Dark,
}

impl ColorMode {
    pub fn toggled(self) -> Self {
        match self {
            ColorMode::Light => ColorMode::Dark,
            ColorMode::Dark => ColorMode::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ColorMode::Light => "light",
            ColorMode::Dark => "dark",
        }
    }
}

// ───────────────────────────────────────── tokens ────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenStyle {
    pub fg: Option<Rgb>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub style: TokenStyle,
}

impl Token {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TokenStyle::default(),
        }
    }
}

/// One entry per source line, each a run of tokens.
pub type TokenLines = Vec<Vec<Token>>;

/// Opaque tokenizer: `(code, language, mode)` → lines of tokens.
pub trait Highlighter {
    fn highlight(&self, code: &str, language: &str, mode: ColorMode) -> TokenLines;
}

// ───────────────────────────────────────── rendering ─────────

/// The text that will actually be displayed for a file.  Highlighted
/// content is trimmed; plain content is shown verbatim.
pub fn source_text<'a>(content: &'a str, language: Option<&str>) -> &'a str {
    if language.is_some() {
        content.trim()
    } else {
        content
    }
}

/// Number of display lines [`render_content`] produces (at least one).
pub fn display_line_count(content: &str, language: Option<&str>) -> usize {
    source_text(content, language).lines().count().max(1)
}

/// Turn file content into display lines.  Without a language the content is
/// split verbatim, one unstyled token per line.
pub fn render_content(
    highlighter: &dyn Highlighter,
    content: &str,
    language: Option<&str>,
    mode: ColorMode,
) -> TokenLines {
    match language {
        Some(lang) => highlighter.highlight(source_text(content, language), lang, mode),
        None => content.lines().map(|l| vec![Token::plain(l)]).collect(),
    }
}

/// Rendered content per file and colour mode.  File content is fixed once
/// loaded, so entries are never invalidated.
#[derive(Debug, Default)]
pub struct HighlightCache {
    entries: HashMap<(NodeId, ColorMode), TokenLines>,
}

impl HighlightCache {
    pub fn get(&self, id: NodeId, mode: ColorMode) -> Option<&TokenLines> {
        self.entries.get(&(id, mode))
    }

    /// Render `id` for `mode` unless already cached.  Directories and files
    /// without content are skipped.
    pub fn ensure(&mut self, highlighter: &dyn Highlighter, tree: &FileTree, id: NodeId, mode: ColorMode) {
        if self.entries.contains_key(&(id, mode)) {
            return;
        }
        let node = tree.get(id);
        if let Some(content) = node.content() {
            let lines = render_content(highlighter, content, node.language(), mode);
            self.entries.insert((id, mode), lines);
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

// ───────────────────────────────────────── syntect ───────────

const LIGHT_THEME: &str = "InspiredGitHub";
const DARK_THEME: &str = "base16-ocean.dark";

/// Language hints that syntect's bundled grammars know under another name.
fn alias(language: &str) -> &str {
    match language {
        "ts" | "tsx" | "typescript" | "jsx" | "javascript" => "js",
        "shell" | "zsh" | "console" => "sh",
        "yml" => "yaml",
        "markdown" | "mdx" => "md",
        "python" => "py",
        other => other,
    }
}

pub struct SyntectHighlighter {
    syntaxes: SyntaxSet,
    themes: ThemeSet,
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntectHighlighter {
    pub fn new() -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            themes: ThemeSet::load_defaults(),
        }
    }

    fn syntax_for(&self, language: &str) -> &SyntaxReference {
        let lang = language.to_lowercase();
        self.syntaxes
            .find_syntax_by_token(alias(&lang))
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text())
    }

    fn theme_for(&self, mode: ColorMode) -> Option<&Theme> {
        let name = match mode {
            ColorMode::Light => LIGHT_THEME,
            ColorMode::Dark => DARK_THEME,
        };
        self.themes.themes.get(name)
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, code: &str, language: &str, mode: ColorMode) -> TokenLines {
        let Some(theme) = self.theme_for(mode) else {
            return code.lines().map(|l| vec![Token::plain(l)]).collect();
        };
        let mut state = HighlightLines::new(self.syntax_for(language), theme);

        LinesWithEndings::from(code)
            .map(|line| match state.highlight_line(line, &self.syntaxes) {
                Ok(ranges) => ranges
                    .into_iter()
                    .filter_map(|(style, text)| {
                        let text = text.trim_end_matches(['\n', '\r']);
                        (!text.is_empty()).then(|| to_token(style, text))
                    })
                    .collect(),
                Err(err) => {
                    tracing::debug!(%err, language, "highlight failed, falling back to plain");
                    vec![Token::plain(line.trim_end_matches(['\n', '\r']))]
                }
            })
            .collect()
    }
}

fn to_token(style: Style, text: &str) -> Token {
    let fg = style.foreground;
    Token {
        text: text.to_string(),
        style: TokenStyle {
            fg: Some(Rgb(fg.r, fg.g, fg.b)),
            bold: style.font_style.contains(FontStyle::BOLD),
            italic: style.font_style.contains(FontStyle::ITALIC),
            underline: style.font_style.contains(FontStyle::UNDERLINE),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Splits on whitespace and tags every token with the language length,
    /// enough to observe what reached the highlighter.
    struct Recording;

    impl Highlighter for Recording {
        fn highlight(&self, code: &str, language: &str, mode: ColorMode) -> TokenLines {
            let shade = if mode == ColorMode::Dark { 200 } else { 20 };
            code.lines()
                .map(|line| {
                    line.split_whitespace()
                        .map(|w| Token {
                            text: w.to_string(),
                            style: TokenStyle {
                                fg: Some(Rgb(shade, language.len() as u8, 0)),
                                ..TokenStyle::default()
                            },
                        })
                        .collect()
                })
                .collect()
        }
    }

    fn text_of(lines: &TokenLines) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.iter().map(|t| t.text.as_str()).collect::<String>())
            .collect()
    }

    #[test]
    fn plain_content_is_verbatim() {
        let out = render_content(&Recording, "  indented\n\nlast  ", None, ColorMode::Dark);
        assert_eq!(text_of(&out), vec!["  indented", "", "last  "]);
        assert!(out.iter().flatten().all(|t| t.style == TokenStyle::default()));
    }

    #[test]
    fn language_content_is_trimmed_and_tokenized() {
        let out = render_content(&Recording, "\n\nfoo bar\nbaz\n\n", Some("hcl"), ColorMode::Light);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].len(), 2);
        assert_eq!(out[0][0].style.fg, Some(Rgb(20, 3, 0)));
    }

    #[test]
    fn display_line_count_matches_render() {
        let content = "\na\nb\n\n";
        assert_eq!(display_line_count(content, Some("sh")), 2);
        assert_eq!(display_line_count(content, None), 4);
        assert_eq!(display_line_count("", None), 1);
    }

    #[test]
    fn syntect_preserves_lines_and_text() {
        let h = SyntectHighlighter::new();
        let code = "fn main() {\n    println!(\"hi\");\n}";
        for mode in [ColorMode::Light, ColorMode::Dark] {
            let out = h.highlight(code, "rs", mode);
            assert_eq!(text_of(&out), code.lines().collect::<Vec<_>>());
            assert!(out[0].iter().all(|t| t.style.fg.is_some()));
        }
    }

    #[test]
    fn theme_changes_colours() {
        let h = SyntectHighlighter::new();
        let light = h.highlight("key: value", "yaml", ColorMode::Light);
        let dark = h.highlight("key: value", "yaml", ColorMode::Dark);
        assert_eq!(text_of(&light), text_of(&dark));
        assert_ne!(light, dark);
    }

    #[test]
    fn unknown_language_falls_back_to_plain_text_grammar() {
        let h = SyntectHighlighter::new();
        let out = h.highlight("resource \"x\" {}", "no-such-lang", ColorMode::Dark);
        assert_eq!(text_of(&out), vec!["resource \"x\" {}"]);
    }

    #[test]
    fn cache_renders_once_per_mode() {
        use crate::core::tree::NodeKind;
        use std::cell::Cell;

        struct Counting(Cell<usize>);
        impl Highlighter for Counting {
            fn highlight(&self, code: &str, _: &str, _: ColorMode) -> TokenLines {
                self.0.set(self.0.get() + 1);
                code.lines().map(|l| vec![Token::plain(l)]).collect()
            }
        }

        let mut tree = FileTree::new();
        let dir = tree.add_root("d", NodeKind::Directory);
        let f = tree
            .add_child(dir, "a.sh", NodeKind::file(Some("echo".into()), Some("sh".into())))
            .unwrap();
        let empty = tree.add_child(dir, "b.sh", NodeKind::file(None, None)).unwrap();

        let h = Counting(Cell::new(0));
        let mut cache = HighlightCache::default();
        cache.ensure(&h, &tree, f, ColorMode::Dark);
        cache.ensure(&h, &tree, f, ColorMode::Dark);
        cache.ensure(&h, &tree, dir, ColorMode::Dark);
        cache.ensure(&h, &tree, empty, ColorMode::Dark);
        assert_eq!(h.0.get(), 1);
        assert_eq!(cache.len(), 1);

        cache.ensure(&h, &tree, f, ColorMode::Light);
        assert_eq!(h.0.get(), 2);
        assert!(cache.get(f, ColorMode::Light).is_some());
        assert!(cache.get(empty, ColorMode::Light).is_none());
    }

    #[test]
    fn color_mode_toggles() {
        assert_eq!(ColorMode::Dark.toggled(), ColorMode::Light);
        assert_eq!(ColorMode::Light.toggled().label(), "dark");
    }
}
