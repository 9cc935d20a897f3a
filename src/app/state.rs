//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).
//! Time is passed in as a [`Duration`] since the app started; the state never
//! reads a clock.

use std::time::Duration;

use crate::config::AppConfig;
use crate::core::{
    ack::Acknowledgement,
    highlight::{ColorMode, HighlightCache, Highlighter},
    navigator::{NavigatorOptions, TreeViewState},
    reveal::{RevealConfig, RevealScheduler},
    tree::FileTree,
};
use crate::ui::tree_widget::TreeWidgetState;

/// Writes text to the system clipboard, reporting success.
pub type ClipboardFn = fn(&str) -> bool;

/// Top-level application state.
pub struct AppState {
    /// The animated terminal banner.
    pub banner: RevealScheduler,
    /// App time at which the banner was (re)mounted; the scheduler's own
    /// clock starts there.
    pub banner_offset: Duration,
    /// The static tree data.
    pub tree: FileTree,
    /// Expansion and file selection.
    pub tree_view: TreeViewState,
    /// Widget-level state (cursor row, scroll).
    pub tree_widget: TreeWidgetState,
    pub nav_options: NavigatorOptions,
    pub color_mode: ColorMode,
    pub config: AppConfig,
    /// "Copied!" window after a successful copy.
    pub copy_ack: Acknowledgement,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    pub show_help: bool,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// Destination printed on exit after the user follows the banner link.
    pub followed_link: Option<String>,
    pub highlights: HighlightCache,
    highlighter: Box<dyn Highlighter>,
    clipboard: ClipboardFn,
}

impl AppState {
    pub fn new(
        banner_lines: Vec<String>,
        reveal: RevealConfig,
        tree: FileTree,
        nav_options: NavigatorOptions,
        config: AppConfig,
        highlighter: Box<dyn Highlighter>,
    ) -> Self {
        let tree_view = TreeViewState::mount(&tree, &nav_options);
        let mut state = Self {
            banner: RevealScheduler::mount(banner_lines, reveal),
            banner_offset: Duration::ZERO,
            tree,
            tree_view,
            tree_widget: TreeWidgetState::default(),
            nav_options,
            color_mode: config.ui.color_mode,
            config,
            copy_ack: Acknowledgement::default(),
            status_message: None,
            show_help: false,
            should_quit: false,
            followed_link: None,
            highlights: HighlightCache::default(),
            highlighter,
            clipboard: crate::shell::clipboard::copy_text,
        };
        state.place_cursor_on_selection();
        state
    }

    #[cfg(test)]
    pub fn with_clipboard(mut self, clipboard: ClipboardFn) -> Self {
        self.clipboard = clipboard;
        self
    }

    /// Move the keyboard cursor onto the selected file's row, if visible.
    pub fn place_cursor_on_selection(&mut self) {
        let Some(selected) = self.tree_view.selected() else {
            return;
        };
        let rows = self.tree_view.visible_rows(&self.tree, &self.nav_options);
        if let Some(idx) = rows.iter().position(|r| r.is_node() && r.node_id() == selected) {
            self.tree_widget.cursor = idx;
        }
    }

    // ── timers ──────────────────────────────────────────────────

    /// Earliest pending deadline in app time, across the banner and the
    /// copy acknowledgement.
    pub fn next_deadline(&self) -> Option<Duration> {
        let banner = self.banner.next_deadline().map(|d| self.banner_offset + d);
        match (banner, self.copy_ack.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Fire everything due at `now`.  Returns whether a redraw is needed.
    pub fn tick(&mut self, now: Duration) -> bool {
        let banner_changed = self.banner.advance(now.saturating_sub(self.banner_offset));
        let ack_changed = self.copy_ack.expire(now);
        banner_changed || ack_changed
    }

    /// Replay the banner from the start with the same lines.
    pub fn restart_banner(&mut self, now: Duration) {
        self.banner.restart();
        self.banner_offset = now;
        tracing::debug!(at_ms = now.as_millis() as u64, "banner restarted");
    }

    /// Cancel every pending timer.  The only teardown path; after it
    /// `next_deadline` is `None`.
    pub fn teardown(&mut self) {
        self.banner.teardown();
        self.copy_ack.cancel();
    }

    // ── rendering support ──────────────────────────────────────

    /// Highlight whatever the next frame will show: the selected file for
    /// the side panel, every file with content when content is inline.
    pub fn prepare_frame(&mut self) {
        let mode = self.color_mode;
        if self.nav_options.side_panel {
            if let Some(id) = self.tree_view.selected() {
                self.highlights.ensure(self.highlighter.as_ref(), &self.tree, id, mode);
            }
        } else if self.nav_options.inline_content() {
            for row in self.tree_view.visible_rows(&self.tree, &self.nav_options) {
                if row.is_node() {
                    self.highlights
                        .ensure(self.highlighter.as_ref(), &self.tree, row.node_id(), mode);
                }
            }
        }
    }

    /// Status-bar text: the copy acknowledgement wins, then any message,
    /// then the key hint.
    pub fn status_text(&self, now: Duration) -> String {
        if self.copy_ack.is_active(now) {
            return "Copied!".to_string();
        }
        match &self.status_message {
            Some(msg) => msg.clone(),
            None => self.config.status_bar_hint(),
        }
    }

    // ── copy ────────────────────────────────────────────────────

    /// Text the copy action puts on the clipboard: the selected file's
    /// content, or the banner script when no file is selected.
    pub fn copy_payload(&self) -> Option<String> {
        match self.tree_view.selected() {
            Some(id) => self.tree.get(id).content().map(str::to_string),
            None => Some(self.banner.lines().join("\n")),
        }
    }

    pub fn copy_selection(&mut self, now: Duration) {
        let Some(text) = self.copy_payload() else {
            self.status_message = Some("Nothing to copy: this file has no content".into());
            return;
        };
        if (self.clipboard)(&text) {
            self.copy_ack.trigger(now);
            self.status_message = None;
            tracing::debug!(bytes = text.len(), "copied to clipboard");
        } else {
            tracing::warn!("no clipboard command succeeded");
            self.status_message = Some("Clipboard unavailable".into());
        }
    }
}
