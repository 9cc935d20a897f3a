//! User configuration: banner timing, tree defaults, colour mode and key
//! bindings.
//!
//! Stored as TOML at `$XDG_CONFIG_HOME/showterm/config.toml` (default
//! `~/.config/showterm/config.toml`).  Every section and key is optional;
//! anything missing falls back to the built-in defaults.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

use crate::core::highlight::ColorMode;
use crate::core::navigator::NavigatorOptions;
use crate::core::reveal::{Link, RevealConfig};
use crate::error::ConfigError;

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveUp,
    MoveDown,
    Activate,
    Expand,
    Collapse,
    Copy,
    FollowLink,
    RestartBanner,
    ToggleTheme,
    ToggleSidePanel,
    Help,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the help popup).
    pub const ALL: &[Action] = &[
        Action::MoveUp,
        Action::MoveDown,
        Action::Activate,
        Action::Expand,
        Action::Collapse,
        Action::Copy,
        Action::FollowLink,
        Action::RestartBanner,
        Action::ToggleTheme,
        Action::ToggleSidePanel,
        Action::Help,
        Action::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Action::MoveUp => "Move Up",
            Action::MoveDown => "Move Down",
            Action::Activate => "Open File / Toggle Dir",
            Action::Expand => "Expand",
            Action::Collapse => "Collapse / Parent",
            Action::Copy => "Copy Content",
            Action::FollowLink => "Follow Banner Link",
            Action::RestartBanner => "Replay Banner",
            Action::ToggleTheme => "Light / Dark",
            Action::ToggleSidePanel => "Toggle Side Panel",
            Action::Help => "Help",
            Action::Quit => "Quit",
        }
    }

    /// Key used in the `[keys]` table.
    fn config_key(self) -> &'static str {
        match self {
            Action::MoveUp => "move_up",
            Action::MoveDown => "move_down",
            Action::Activate => "activate",
            Action::Expand => "expand",
            Action::Collapse => "collapse",
            Action::Copy => "copy",
            Action::FollowLink => "follow_link",
            Action::RestartBanner => "restart_banner",
            Action::ToggleTheme => "toggle_theme",
            Action::ToggleSidePanel => "toggle_side_panel",
            Action::Help => "help",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding: key code plus modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

const MODIFIER_MASK: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SHIFT);

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Only CTRL/ALT/SHIFT are compared.  Character keys ignore SHIFT since
    /// the terminal already reports the shifted character (`?`, `Y`).
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mut mask = MODIFIER_MASK;
        if matches!(self.code, KeyCode::Char(_)) {
            mask.remove(KeyModifiers::SHIFT);
        }
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// Short form for the UI (`"↑"`, `"Ctrl+c"`).
    pub fn display(&self) -> String {
        self.render(true)
    }

    /// Form written to the config file (`"Up"`, `"Ctrl+c"`).
    fn to_config_string(&self) -> String {
        self.render(false)
    }

    fn render(&self, arrows: bool) -> String {
        let mut s = String::new();
        for (flag, prefix) in [
            (KeyModifiers::CONTROL, "Ctrl+"),
            (KeyModifiers::ALT, "Alt+"),
            (KeyModifiers::SHIFT, "Shift+"),
        ] {
            if self.modifiers.contains(flag) {
                s.push_str(prefix);
            }
        }
        let key = match (self.code, arrows) {
            (KeyCode::Char(' '), _) => "Space".to_string(),
            (KeyCode::Char(c), _) => c.to_string(),
            (KeyCode::Up, true) => "↑".into(),
            (KeyCode::Down, true) => "↓".into(),
            (KeyCode::Left, true) => "←".into(),
            (KeyCode::Right, true) => "→".into(),
            (KeyCode::Up, false) => "Up".into(),
            (KeyCode::Down, false) => "Down".into(),
            (KeyCode::Left, false) => "Left".into(),
            (KeyCode::Right, false) => "Right".into(),
            (KeyCode::Enter, _) => "Enter".into(),
            (KeyCode::Esc, _) => "Esc".into(),
            (KeyCode::Tab, _) => "Tab".into(),
            (KeyCode::Backspace, _) => "Backspace".into(),
            (KeyCode::Home, _) => "Home".into(),
            (KeyCode::End, _) => "End".into(),
            (KeyCode::PageUp, _) => "PageUp".into(),
            (KeyCode::PageDown, _) => "PageDown".into(),
            (KeyCode::F(n), _) => format!("F{n}"),
            (other, _) => format!("{other:?}"),
        };
        s.push_str(&key);
        s
    }

    /// Parse `"Ctrl+c"`, `"Alt+Up"`, `"q"`, `"Enter"`.
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split('+').collect();
        let (key_part, mods) = parts.split_last()?;

        let mut modifiers = KeyModifiers::NONE;
        for part in mods {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        // Single characters keep their case: `Y` and `y` are different keys.
        let mut chars = key_part.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Some(KeyBind::new(KeyCode::Char(c), modifiers));
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backspace" => KeyCode::Backspace,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            f if f.starts_with('f') && f.len() > 1 => KeyCode::F(f[1..].parse().ok()?),
            _ => return None,
        };
        Some(KeyBind::new(code, modifiers))
    }
}

// ───────────────────────────────────────── file sections ─────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerSettings {
    pub typing_speed_ms: u64,
    pub burst_speed_ms: u64,
    pub start_delay_ms: u64,
    pub cursor: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_destination: Option<String>,
}

impl Default for BannerSettings {
    fn default() -> Self {
        let reveal = RevealConfig::default();
        Self {
            typing_speed_ms: reveal.typing_speed.as_millis() as u64,
            burst_speed_ms: reveal.burst_speed.as_millis() as u64,
            start_delay_ms: reveal.start_delay.as_millis() as u64,
            cursor: reveal.cursor,
            link_label: None,
            link_destination: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeSettings {
    pub show_content: bool,
    pub default_expanded: bool,
    pub side_panel: bool,
}

impl Default for TreeSettings {
    fn default() -> Self {
        let nav = NavigatorOptions::default();
        Self {
            show_content: nav.show_content,
            default_expanded: nav.default_expanded,
            side_panel: nav.side_panel,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    pub color_mode: ColorMode,
}

/// On-disk shape of the config file.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct ConfigFile {
    banner: BannerSettings,
    tree: TreeSettings,
    ui: UiSettings,
    keys: BTreeMap<String, Vec<String>>,
}

// ───────────────────────────────────────── config ────────────

pub struct AppConfig {
    pub banner: BannerSettings,
    pub tree: TreeSettings,
    pub ui: UiSettings,
    pub bindings: HashMap<Action, Vec<KeyBind>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            banner: BannerSettings::default(),
            tree: TreeSettings::default(),
            ui: UiSettings::default(),
            bindings: Self::default_bindings(),
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(MoveUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(MoveDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(Activate, vec![KeyBind::new(Enter, n), KeyBind::new(Char(' '), n)]);
        m.insert(Expand, vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n)]);
        m.insert(Collapse, vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n)]);
        m.insert(Copy, vec![KeyBind::new(Char('y'), n)]);
        m.insert(FollowLink, vec![KeyBind::new(Char('o'), n)]);
        m.insert(RestartBanner, vec![KeyBind::new(Char('r'), n)]);
        m.insert(ToggleTheme, vec![KeyBind::new(Char('t'), n)]);
        m.insert(ToggleSidePanel, vec![KeyBind::new(Char('p'), n)]);
        m.insert(Help, vec![KeyBind::new(Char('?'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n), KeyBind::new(Esc, n)]);

        m
    }

    /// The action bound to `event`.  When several match, the binding with
    /// the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        self.bindings
            .iter()
            .flat_map(|(&action, binds)| binds.iter().map(move |b| (action, b)))
            .filter(|(_, bind)| bind.matches(event))
            .max_by_key(|(_, bind)| bind.modifiers.bits().count_ones())
            .map(|(action, _)| action)
    }

    /// e.g. `"↑/k"`.
    pub fn display_bindings(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => {
                binds.iter().map(KeyBind::display).collect::<Vec<_>>().join("/")
            }
            _ => "unbound".into(),
        }
    }

    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action).and_then(|b| b.first()) {
            Some(bind) => bind.display(),
            None => "?".into(),
        }
    }

    /// Status-bar hint built from the current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}: open | {}: copy | {}: theme | {}: replay | {}: help",
            self.short_binding(Action::Activate),
            self.short_binding(Action::Copy),
            self.short_binding(Action::ToggleTheme),
            self.short_binding(Action::RestartBanner),
            self.short_binding(Action::Help),
        )
    }

    pub fn reveal_config(&self) -> RevealConfig {
        let b = &self.banner;
        let link = match (&b.link_label, &b.link_destination) {
            (Some(label), Some(destination)) => Some(Link {
                label: label.clone(),
                destination: destination.clone(),
            }),
            (None, Some(destination)) => Some(Link {
                label: destination.clone(),
                destination: destination.clone(),
            }),
            _ => None,
        };
        RevealConfig {
            typing_speed: Duration::from_millis(b.typing_speed_ms),
            burst_speed: Duration::from_millis(b.burst_speed_ms),
            start_delay: Duration::from_millis(b.start_delay_ms),
            cursor: b.cursor,
            link,
            ..RevealConfig::default()
        }
    }

    pub fn navigator_options(&self) -> NavigatorOptions {
        NavigatorOptions {
            show_content: self.tree.show_content,
            default_expanded: self.tree.default_expanded,
            side_panel: self.tree.side_panel,
            default_open_file: None,
        }
    }

    // ── persistence ─────────────────────────────────────────────

    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(s)?;
        let mut bindings = Self::default_bindings();
        for (key, values) in &file.keys {
            let Some(action) = Action::from_config_key(key) else {
                tracing::warn!(key, "unknown action in [keys]");
                continue;
            };
            let parsed: Vec<KeyBind> = values.iter().filter_map(|v| KeyBind::parse(v.trim())).collect();
            if parsed.is_empty() {
                tracing::warn!(key, "no usable bindings, keeping defaults");
            } else {
                bindings.insert(action, parsed);
            }
        }
        Ok(Self {
            banner: file.banner,
            tree: file.tree,
            ui: file.ui,
            bindings,
        })
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        let keys = Action::ALL
            .iter()
            .filter_map(|&action| {
                let binds = self.bindings.get(&action)?;
                let values = binds.iter().map(KeyBind::to_config_string).collect();
                Some((action.config_key().to_string(), values))
            })
            .collect();
        let file = ConfigFile {
            banner: self.banner.clone(),
            tree: self.tree.clone(),
            ui: self.ui.clone(),
            keys,
        };
        Ok(format!("# showterm configuration\n\n{}", toml::to_string(&file)?))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    /// Load, falling back to defaults (with a warning) on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|err| {
            tracing::warn!(%err, "using default configuration");
            Self::default()
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(path, self.to_toml()?).map_err(io_err)
    }
}

/// `$XDG_CONFIG_HOME/showterm/config.toml`.
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join(env!("CARGO_PKG_NAME")).join("config.toml")
}
