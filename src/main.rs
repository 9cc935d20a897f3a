//! An animated terminal banner above a syntax-highlighting file tree.
//!
//! Run the binary to launch the TUI.  `--tree` loads a JSON tree, `--dir`
//! scans a directory, and with neither a built-in sample is shown.

mod app;
mod config;
mod core;
mod error;
mod shell;
mod ui;

use std::fs::OpenOptions;
use std::io::{self, stderr};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{
    backend::CrosstermBackend,
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use tokio::time::Instant;

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::AppState,
};
use crate::config::AppConfig;
use crate::core::{
    highlight::{ColorMode, SyntectHighlighter},
    navigator::NavigatorOptions,
    script::BannerScript,
    source::{self, ScanConfig},
    tree::FileTree,
};
use crate::shell::integration;
use crate::ui::{
    content_panel::ContentPanel, layout::AppLayout, popup::HelpPopup, terminal_widget::TerminalWidget,
    theme::Theme, tree_widget::TreeWidget,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(
    name = env!("CARGO_PKG_NAME"),
    version,
    about = "Animated terminal banner and file-tree viewer"
)]
struct Cli {
    /// JSON tree document: `[{ "name", "type", "children", "content", "language" }]`.
    #[arg(long, value_name = "FILE", conflicts_with = "dir")]
    tree: Option<PathBuf>,

    /// Scan a directory instead of loading a JSON tree.
    #[arg(long, value_name = "PATH")]
    dir: Option<PathBuf>,

    /// Maximum scan depth for `--dir`.
    #[arg(long, default_value_t = 3)]
    depth: usize,

    /// Include hidden (dot) files when scanning.
    #[arg(long)]
    hidden: bool,

    /// File name to select (and reveal) on start.
    #[arg(long, value_name = "NAME")]
    open: Option<String>,

    /// Show file content inline under each file.
    #[arg(long)]
    show_content: bool,

    /// Show the selected file in a panel beside the tree.
    #[arg(long)]
    side_panel: bool,

    /// Start with every directory collapsed.
    #[arg(long)]
    collapsed: bool,

    /// Banner line (repeatable).  Replaces the sampled script.
    #[arg(long = "line", value_name = "TEXT")]
    lines: Vec<String>,

    /// Seed for banner sampling.
    #[arg(long)]
    seed: Option<u64>,

    /// Per-character delay of the first banner line, in milliseconds.
    #[arg(long, value_name = "MS")]
    typing_speed: Option<u64>,

    /// Delay before the banner starts typing, in milliseconds.
    #[arg(long, value_name = "MS")]
    start_delay: Option<u64>,

    /// Hide the blinking caret.
    #[arg(long)]
    no_cursor: bool,

    /// Text of the link shown when the banner finishes.
    #[arg(long, value_name = "TEXT", requires = "link_to")]
    link_label: Option<String>,

    /// Destination printed on exit when the banner link is followed.
    #[arg(long = "link-to", value_name = "URL")]
    link_to: Option<String>,

    /// Start in light mode.
    #[arg(long)]
    light: bool,

    /// Write logs here (filtered by `RUST_LOG`).
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Write the effective configuration to the config file and exit.
    #[arg(long)]
    write_config: bool,
}

impl Cli {
    /// Fold command-line overrides into the file configuration.
    fn apply(&self, config: &mut AppConfig) {
        if let Some(ms) = self.typing_speed {
            config.banner.typing_speed_ms = ms;
        }
        if let Some(ms) = self.start_delay {
            config.banner.start_delay_ms = ms;
        }
        if self.no_cursor {
            config.banner.cursor = false;
        }
        if let Some(to) = &self.link_to {
            config.banner.link_destination = Some(to.clone());
            config.banner.link_label = self.link_label.clone();
        }
        if self.show_content {
            config.tree.show_content = true;
        }
        if self.side_panel {
            config.tree.side_panel = true;
        }
        if self.collapsed {
            config.tree.default_expanded = false;
        }
        if self.light {
            config.ui.color_mode = ColorMode::Light;
        }
    }

    fn navigator_options(&self, config: &AppConfig) -> NavigatorOptions {
        NavigatorOptions {
            default_open_file: self.open.clone(),
            ..config.navigator_options()
        }
    }

    fn load_tree(&self) -> Result<FileTree> {
        if let Some(path) = &self.tree {
            return source::load_json(path).with_context(|| format!("loading tree from {}", path.display()));
        }
        if let Some(dir) = &self.dir {
            let scan = ScanConfig {
                max_depth: self.depth,
                show_hidden: self.hidden,
                ..ScanConfig::default()
            };
            return source::scan_dir(dir, &scan).with_context(|| format!("scanning {}", dir.display()));
        }
        Ok(source::sample_tree()?)
    }

    /// Explicit `--line`s, or one sampled playback of the default script.
    fn banner_lines(&self) -> Vec<String> {
        if !self.lines.is_empty() {
            return self.lines.clone();
        }
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        BannerScript::default().sample_lines(&mut rng)
    }
}

// ───────────────────────────────────────── logging ───────────

/// Logs go to `log_file` when given.  Otherwise they go to stderr only
/// when no TUI owns the terminal.
fn init_tracing(log_file: Option<&Path>, tui: bool) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env());
    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None if !tui => builder.with_writer(io::stderr).init(),
        None => {}
    }
    Ok(())
}

// ───────────────────────────────────────── drawing ───────────

fn draw(frame: &mut Frame, state: &mut AppState, now: Duration) {
    let theme = Theme::new(state.color_mode);
    let layout = AppLayout::from_area(frame.area(), state.banner.lines().len(), state.nav_options.side_panel);

    frame.render_widget(TerminalWidget::new(&state.banner, theme), layout.banner_area);

    let tree_block = Block::default()
        .title(" Files ")
        .title_style(theme.title_style())
        .borders(Borders::ALL)
        .border_style(theme.border_style());
    let tree_widget = TreeWidget::new(
        &state.tree,
        &state.tree_view,
        &state.nav_options,
        &state.highlights,
        theme,
    )
    .block(tree_block);
    frame.render_stateful_widget(tree_widget, layout.tree_area, &mut state.tree_widget);

    if let Some(panel_area) = layout.panel_area {
        let panel = ContentPanel::new(&state.tree, state.tree_view.selected(), &state.highlights, theme);
        frame.render_widget(panel, panel_area);
    }

    let style = if state.copy_ack.is_active(now) {
        theme.ack_style()
    } else {
        theme.status_bar_style()
    };
    frame.render_widget(Paragraph::new(state.status_text(now)).style(style), layout.status_area);

    if state.show_help {
        frame.render_widget(
            HelpPopup {
                config: &state.config,
                theme,
            },
            frame.area(),
        );
    }
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref(), !cli.write_config)?;

    let config_path = config::config_path();
    let mut user_config = AppConfig::load_or_default(&config_path);
    cli.apply(&mut user_config);

    if cli.write_config {
        user_config
            .save(&config_path)
            .with_context(|| format!("writing {}", config_path.display()))?;
        println!("{}", config_path.display());
        return Ok(());
    }

    // ── build initial state ───────────────────────────────────
    let tree = cli.load_tree()?;
    let reveal = user_config.reveal_config();
    let nav_options = cli.navigator_options(&user_config);
    let mut state = AppState::new(
        cli.banner_lines(),
        reveal,
        tree,
        nav_options,
        user_config,
        Box::new(SyntectHighlighter::new()),
    );

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut state).await;

    // ── teardown ──────────────────────────────────────────────
    state.teardown();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    result?;

    integration::print_exit_payload(state.followed_link.as_deref())?;
    Ok(())
}

/// Draw, then wait for either the next terminal event or the next timer
/// deadline, until the user quits.
async fn run(terminal: &mut Terminal<CrosstermBackend<io::Stderr>>, state: &mut AppState) -> Result<()> {
    let epoch = Instant::now();
    let mut events = spawn_event_reader(Duration::from_millis(100));

    loop {
        let now = epoch.elapsed();
        state.tick(now);
        state.prepare_frame();
        terminal.draw(|frame| draw(frame, state, now))?;

        let deadline = state.next_deadline().map(|d| epoch + d);
        tokio::select! {
            biased;

            event = events.recv() => {
                let now = epoch.elapsed();
                match event {
                    Some(AppEvent::Key(k)) => handler::handle_key(state, k, now),
                    Some(AppEvent::Mouse(m)) => handler::handle_mouse(state, m),
                    Some(AppEvent::Resize) => {}
                    None => state.should_quit = true,
                }
            }

            _ = tokio::time::sleep_until(deadline.unwrap_or(epoch)), if deadline.is_some() => {}
        }

        if state.should_quit {
            return Ok(());
        }
    }
}
