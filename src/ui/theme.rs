//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

use crate::core::highlight::{ColorMode, Rgb, TokenStyle};

/// Central theme for one colour mode.  Widgets take a `Theme` by value and
/// ask it for styles; nothing else hard-codes colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    mode: ColorMode,
}

impl Theme {
    pub fn new(mode: ColorMode) -> Self {
        Self { mode }
    }

    pub fn mode(self) -> ColorMode {
        self.mode
    }

    fn pick(self, light: Color, dark: Color) -> Color {
        match self.mode {
            ColorMode::Light => light,
            ColorMode::Dark => dark,
        }
    }

    fn text(self) -> Color {
        self.pick(Color::Rgb(36, 41, 47), Color::Rgb(220, 223, 228))
    }

    fn muted(self) -> Color {
        self.pick(Color::Rgb(110, 119, 129), Color::Rgb(125, 133, 144))
    }

    fn accent(self) -> Color {
        self.pick(Color::Rgb(9, 105, 218), Color::Rgb(88, 166, 255))
    }

    // ── tree view ──────────────────────────────────────────────
    pub fn dir_style(self) -> Style {
        Style::default()
            .fg(self.pick(Color::Rgb(9, 105, 218), Color::Cyan))
            .add_modifier(Modifier::BOLD)
    }

    pub fn file_style(self) -> Style {
        Style::default().fg(self.text())
    }

    /// The file shown in the side panel.
    pub fn selected_file_style(self) -> Style {
        Style::default()
            .fg(self.accent())
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    /// The row under the keyboard cursor.
    pub fn cursor_style(self) -> Style {
        Style::default()
            .bg(self.pick(Color::Rgb(221, 244, 255), Color::DarkGray))
            .add_modifier(Modifier::BOLD)
    }

    pub fn content_style(self) -> Style {
        Style::default().fg(self.muted())
    }

    // ── terminal banner ───────────────────────────────────────
    pub fn terminal_bg(self) -> Style {
        Style::default().bg(self.pick(Color::Rgb(246, 248, 250), Color::Rgb(30, 30, 30)))
    }

    pub fn prompt_style(self) -> Style {
        Style::default()
            .fg(self.pick(Color::Rgb(26, 127, 55), Color::Rgb(80, 250, 123)))
            .add_modifier(Modifier::BOLD)
    }

    pub fn command_style(self) -> Style {
        Style::default().fg(self.text())
    }

    pub fn caret_style(self) -> Style {
        Style::default().fg(self.text())
    }

    pub fn link_style(self) -> Style {
        Style::default()
            .fg(self.accent())
            .add_modifier(Modifier::UNDERLINED)
    }

    pub fn window_button(index: usize) -> Style {
        let color = match index {
            0 => Color::Rgb(255, 95, 86),
            1 => Color::Rgb(255, 189, 46),
            _ => Color::Rgb(39, 201, 63),
        };
        Style::default().fg(color)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style(self) -> Style {
        Style::default().fg(self.muted())
    }

    pub fn title_style(self) -> Style {
        Style::default()
            .fg(self.pick(Color::Rgb(26, 127, 55), Color::Green))
            .add_modifier(Modifier::BOLD)
    }

    pub fn hint_style(self) -> Style {
        Style::default()
            .fg(self.muted())
            .add_modifier(Modifier::ITALIC)
    }

    pub fn status_bar_style(self) -> Style {
        Style::default()
            .bg(self.pick(Color::Rgb(208, 215, 222), Color::DarkGray))
            .fg(self.text())
    }

    pub fn ack_style(self) -> Style {
        self.status_bar_style()
            .fg(self.pick(Color::Rgb(26, 127, 55), Color::LightGreen))
            .add_modifier(Modifier::BOLD)
    }

    /// Map a highlighter token style onto a terminal style.
    pub fn token_style(self, token: &TokenStyle) -> Style {
        let mut style = Style::default().fg(match token.fg {
            Some(Rgb(r, g, b)) => Color::Rgb(r, g, b),
            None => self.text(),
        });
        if token.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if token.italic {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if token.underline {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        style
    }
}
