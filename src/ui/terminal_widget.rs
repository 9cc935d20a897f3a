//! The animated terminal banner: a fake window with three buttons, a
//! `terminal` title and the lines revealed so far.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::core::reveal::RevealScheduler;

use super::theme::Theme;

const PROMPT: &str = "$ ";
const CARET: &str = "█";
const LINK_MARKER: &str = "➜ ";

pub struct TerminalWidget<'a> {
    scheduler: &'a RevealScheduler,
    theme: Theme,
}

impl<'a> TerminalWidget<'a> {
    pub fn new(scheduler: &'a RevealScheduler, theme: Theme) -> Self {
        Self { scheduler, theme }
    }

    fn header(&self) -> Line<'static> {
        let mut spans: Vec<Span> = (0..3)
            .flat_map(|i| [Span::styled("●", Theme::window_button(i)), Span::raw(" ")])
            .collect();
        spans.push(Span::styled(" terminal ", self.theme.title_style()));
        Line::from(spans)
    }

    /// Body lines, oldest first.
    fn body(&self) -> Vec<Line<'a>> {
        let caret = self.scheduler.caret_line();
        let mut lines: Vec<Line> = self
            .scheduler
            .revealed()
            .iter()
            .enumerate()
            .map(|(idx, text)| {
                let mut spans = vec![
                    Span::styled(PROMPT, self.theme.prompt_style()),
                    Span::styled(text.as_str(), self.theme.command_style()),
                ];
                if caret == Some(idx) {
                    spans.push(Span::styled(CARET, self.theme.caret_style()));
                }
                Line::from(spans)
            })
            .collect();

        if let Some(link) = self.scheduler.link() {
            lines.push(Line::from(vec![
                Span::styled(LINK_MARKER, self.theme.prompt_style()),
                Span::styled(link.label.as_str(), self.theme.link_style()),
            ]));
        }
        lines
    }
}

impl Widget for TerminalWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(self.header())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_style())
            .style(self.theme.terminal_bg());
        let inner = block.inner(area);
        block.render(area, buf);

        // Keep the newest lines in view when the window is too short.
        let mut lines = self.body();
        let height = inner.height as usize;
        if lines.len() > height {
            lines.drain(..lines.len() - height);
        }
        Paragraph::new(lines).render(inner, buf);
    }
}
