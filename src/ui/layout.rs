//! Layout helpers: split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};

/// Rows the banner needs beyond its text: two borders and the link line.
const BANNER_CHROME: u16 = 3;

/// Screen layout: terminal banner on top, tree (plus optional side panel)
/// in the middle, status bar at the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub banner_area: Rect,
    pub tree_area: Rect,
    pub panel_area: Option<Rect>,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.  The banner never
    /// takes more than half the screen.
    pub fn from_area(area: Rect, banner_lines: usize, side_panel: bool) -> Self {
        let wanted = u16::try_from(banner_lines)
            .unwrap_or(u16::MAX)
            .saturating_add(BANNER_CHROME);
        let banner_height = wanted.min(area.height / 2);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(banner_height),
                Constraint::Min(3),    // tree pane (takes all remaining space)
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let (tree_area, panel_area) = if side_panel {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
                .split(rows[1]);
            (cols[0], Some(cols[1]))
        } else {
            (rows[1], None)
        };

        Self {
            banner_area: rows[0],
            tree_area,
            panel_area,
            status_area: rows[2],
        }
    }
}

pub fn point_in_rect(area: Rect, col: u16, row: u16) -> bool {
    area.contains(Position::new(col, row))
}
