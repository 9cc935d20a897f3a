//! Input handling: maps key/mouse events to state mutations.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::config::Action;
use crate::core::navigator::VisibleRow;
use crate::core::reveal::RevealPhase;
use crate::core::tree::NodeId;

use super::state::AppState;

/// Process a key event.  `now` is app time, used by timed actions.
pub fn handle_key(state: &mut AppState, key: KeyEvent, now: Duration) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    if state.show_help {
        handle_help_key(state, key);
        return;
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };
    state.status_message = None;

    match action {
        Action::Quit => state.should_quit = true,
        Action::Help => state.show_help = true,
        Action::MoveUp => move_cursor(state, Step::Up),
        Action::MoveDown => move_cursor(state, Step::Down),
        Action::Activate => {
            if let Some(id) = cursor_node(state) {
                state.tree_view.activate(&state.tree, id);
            }
        }
        Action::Expand => handle_expand(state),
        Action::Collapse => handle_collapse(state),
        Action::Copy => state.copy_selection(now),
        Action::FollowLink => follow_link(state),
        Action::RestartBanner => state.restart_banner(now),
        Action::ToggleTheme => {
            state.color_mode = state.color_mode.toggled();
            tracing::debug!(mode = state.color_mode.label(), "colour mode toggled");
        }
        Action::ToggleSidePanel => {
            let keep = cursor_node(state);
            state.nav_options.side_panel = !state.nav_options.side_panel;
            if let Some(id) = keep {
                focus_node(state, id);
            }
        }
    }
}

/// The help popup swallows every key; Esc, `?` or a quit binding closes it.
fn handle_help_key(state: &mut AppState, key: KeyEvent) {
    let closes = matches!(key.code, KeyCode::Esc | KeyCode::Enter)
        || matches!(state.config.match_key(key), Some(Action::Help | Action::Quit));
    if closes {
        state.show_help = false;
    }
}

fn follow_link(state: &mut AppState) {
    if state.banner.config().link.is_none() {
        state.status_message = Some("No banner link configured".into());
        return;
    }
    match (state.banner.phase(), state.banner.link()) {
        (RevealPhase::Done, Some(link)) => {
            state.followed_link = Some(link.destination.clone());
            state.should_quit = true;
        }
        _ => state.status_message = Some("The link appears once the banner has finished".into()),
    }
}

/// Directories expand (or step into their first child when already open);
/// files become selected.
fn handle_expand(state: &mut AppState) {
    let Some(id) = cursor_node(state) else {
        return;
    };
    let node = state.tree.get(id);
    if !node.is_dir() {
        state.tree_view.select_file(&state.tree, id);
    } else if state.tree_view.is_expanded(id) {
        if let Some(&first) = node.children.first() {
            focus_node(state, first);
        }
    } else {
        state.tree_view.expand(&state.tree, id);
    }
}

/// Collapse an expanded directory, otherwise move to the parent row.
fn handle_collapse(state: &mut AppState) {
    let Some(id) = cursor_node(state) else {
        return;
    };
    if state.tree.get(id).is_dir() && state.tree_view.is_expanded(id) {
        state.tree_view.collapse(id);
    } else if let Some(parent) = state.tree.get(id).parent {
        focus_node(state, parent);
    }
}

// ── Mouse ───────────────────────────────────────────────────────

/// Process a mouse event: left click activates a tree row, the wheel moves
/// the cursor.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    if state.show_help {
        return;
    }
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let Some(idx) = state.tree_widget.row_at(mouse.column, mouse.row) else {
                return;
            };
            let rows = rows(state);
            if let Some(VisibleRow::Node { id, .. }) = rows.get(idx).copied() {
                state.tree_widget.cursor = idx;
                state.tree_view.activate(&state.tree, id);
            }
        }
        MouseEventKind::ScrollUp => move_cursor(state, Step::Up),
        MouseEventKind::ScrollDown => move_cursor(state, Step::Down),
        _ => {}
    }
}

// ── helpers ─────────────────────────────────────────────────────

#[derive(Clone, Copy)]
enum Step {
    Up,
    Down,
}

fn rows(state: &AppState) -> Vec<VisibleRow> {
    state.tree_view.visible_rows(&state.tree, &state.nav_options)
}

/// Node under the cursor.  A cursor left on a content row (after the rows
/// changed) resolves to the file that owns it.
fn cursor_node(state: &AppState) -> Option<NodeId> {
    rows(state).get(state.tree_widget.cursor).map(VisibleRow::node_id)
}

/// Move to the next node row, skipping inline content rows.
fn move_cursor(state: &mut AppState, step: Step) {
    let rows = rows(state);
    let current = state.tree_widget.cursor.min(rows.len().saturating_sub(1));
    let next = match step {
        Step::Up => rows[..current].iter().rposition(VisibleRow::is_node),
        Step::Down => rows
            .iter()
            .skip(current + 1)
            .position(VisibleRow::is_node)
            .map(|p| p + current + 1),
    };
    if let Some(idx) = next {
        state.tree_widget.cursor = idx;
    }
}

fn focus_node(state: &mut AppState, id: NodeId) {
    if let Some(idx) = rows(state).iter().position(|r| r.is_node() && r.node_id() == id) {
        state.tree_widget.cursor = idx;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::state_with;
    use crate::core::navigator::NavigatorOptions;
    use crate::core::reveal::Link;
    use crossterm::event::KeyEventState;
    use ratatui::layout::Rect;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn key(state: &mut AppState, code: KeyCode) {
        handle_key(state, press(code), Duration::ZERO);
    }

    fn cursor_name(state: &AppState) -> String {
        state.tree.get(cursor_node(state).unwrap()).name.clone()
    }

    #[test]
    fn navigation_moves_between_rows() {
        let mut state = state_with(NavigatorOptions::default());
        assert_eq!(cursor_name(&state), "infra");
        key(&mut state, KeyCode::Down);
        assert_eq!(cursor_name(&state), "main.tf");
        key(&mut state, KeyCode::Char('j'));
        assert_eq!(cursor_name(&state), "README.md");
        key(&mut state, KeyCode::Down);
        assert_eq!(cursor_name(&state), "README.md");
        key(&mut state, KeyCode::Char('k'));
        key(&mut state, KeyCode::Up);
        key(&mut state, KeyCode::Up);
        assert_eq!(cursor_name(&state), "infra");
    }

    #[test]
    fn cursor_skips_inline_content_rows() {
        let mut state = state_with(NavigatorOptions {
            show_content: true,
            ..NavigatorOptions::default()
        });
        key(&mut state, KeyCode::Down);
        key(&mut state, KeyCode::Down);
        assert_eq!(cursor_name(&state), "README.md");
        assert_eq!(state.tree_widget.cursor, 3);
        key(&mut state, KeyCode::Up);
        assert_eq!(cursor_name(&state), "main.tf");
    }

    #[test]
    fn activate_toggles_dirs_and_selects_files() {
        let mut state = state_with(NavigatorOptions::default());
        let infra = state.tree.roots[0];
        key(&mut state, KeyCode::Enter);
        assert!(!state.tree_view.is_expanded(infra));
        key(&mut state, KeyCode::Char(' '));
        assert!(state.tree_view.is_expanded(infra));

        key(&mut state, KeyCode::Down);
        key(&mut state, KeyCode::Enter);
        assert_eq!(state.tree_view.selected(), cursor_node(&state));
    }

    #[test]
    fn collapse_goes_to_parent_then_closes() {
        let mut state = state_with(NavigatorOptions::default());
        let infra = state.tree.roots[0];
        key(&mut state, KeyCode::Down);
        key(&mut state, KeyCode::Left);
        assert_eq!(cursor_name(&state), "infra");
        assert!(state.tree_view.is_expanded(infra));
        key(&mut state, KeyCode::Char('h'));
        assert!(!state.tree_view.is_expanded(infra));
    }

    #[test]
    fn expand_opens_then_descends() {
        let mut state = state_with(NavigatorOptions {
            default_expanded: false,
            ..NavigatorOptions::default()
        });
        let infra = state.tree.roots[0];
        key(&mut state, KeyCode::Right);
        assert!(state.tree_view.is_expanded(infra));
        assert_eq!(cursor_name(&state), "infra");
        key(&mut state, KeyCode::Char('l'));
        assert_eq!(cursor_name(&state), "main.tf");
        key(&mut state, KeyCode::Right);
        assert_eq!(state.tree_view.selected(), cursor_node(&state));
    }

    #[test]
    fn follow_link_only_when_banner_complete() {
        let mut state = state_with(NavigatorOptions::default());
        key(&mut state, KeyCode::Char('o'));
        assert!(!state.should_quit);
        assert_eq!(state.status_message.as_deref(), Some("No banner link configured"));

        let mut config = state.banner.config().clone();
        config.link = Some(Link {
            label: "Docs".into(),
            destination: "/docs/intro".into(),
        });
        state.banner = crate::core::reveal::RevealScheduler::mount(state.banner.lines().to_vec(), config);
        key(&mut state, KeyCode::Char('o'));
        assert!(!state.should_quit);

        let total = state.banner.total_duration();
        state.tick(total);
        key(&mut state, KeyCode::Char('o'));
        assert!(state.should_quit);
        assert_eq!(state.followed_link.as_deref(), Some("/docs/intro"));
    }

    #[test]
    fn help_popup_swallows_keys() {
        let mut state = state_with(NavigatorOptions::default());
        key(&mut state, KeyCode::Char('?'));
        assert!(state.show_help);
        key(&mut state, KeyCode::Down);
        assert_eq!(cursor_name(&state), "infra");
        key(&mut state, KeyCode::Char('q'));
        assert!(!state.show_help);
        assert!(!state.should_quit);
        key(&mut state, KeyCode::Char('q'));
        assert!(state.should_quit);
    }

    #[test]
    fn ctrl_c_quits_even_in_help() {
        let mut state = state_with(NavigatorOptions::default());
        state.show_help = true;
        handle_key(
            &mut state,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Duration::ZERO,
        );
        assert!(state.should_quit);
    }

    #[test]
    fn theme_side_panel_and_restart() {
        let mut state = state_with(NavigatorOptions {
            show_content: true,
            ..NavigatorOptions::default()
        });
        let mode = state.color_mode;
        key(&mut state, KeyCode::Char('t'));
        assert_eq!(state.color_mode, mode.toggled());

        // Cursor on README.md sits below main.tf's inline content.
        key(&mut state, KeyCode::Down);
        key(&mut state, KeyCode::Down);
        key(&mut state, KeyCode::Char('p'));
        assert!(state.nav_options.side_panel);
        assert_eq!(cursor_name(&state), "README.md");
        assert_eq!(state.tree_widget.cursor, 2);

        handle_key(&mut state, press(KeyCode::Char('r')), Duration::from_secs(9));
        assert_eq!(state.banner_offset, Duration::from_secs(9));
    }

    #[test]
    fn copy_key_triggers_acknowledgement() {
        let mut state = state_with(NavigatorOptions::default());
        handle_key(&mut state, press(KeyCode::Char('y')), Duration::from_secs(1));
        assert_eq!(state.copy_ack.deadline(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn click_activates_row_under_pointer() {
        let mut state = state_with(NavigatorOptions::default());
        state.tree_widget.viewport = Rect::new(1, 10, 30, 5);
        let infra = state.tree.roots[0];

        handle_mouse(&mut state, click(5, 11));
        assert_eq!(cursor_name(&state), "main.tf");
        assert_eq!(state.tree_view.selected(), cursor_node(&state));

        handle_mouse(&mut state, click(5, 10));
        assert!(!state.tree_view.is_expanded(infra));

        // Outside the viewport or below the last row.
        handle_mouse(&mut state, click(0, 10));
        handle_mouse(&mut state, click(5, 14));
        assert!(!state.tree_view.is_expanded(infra));
        assert_eq!(cursor_name(&state), "infra");
    }
}
