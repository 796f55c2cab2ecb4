// Settings persistence: app configuration stored separately from session state.
// Uses platform-native config dir: e.g. ~/Library/Application Support/mosaic/settings.json
// on macOS, ~/.config/mosaic/settings.json on Linux.

use std::io;
use std::path::{Path, PathBuf};

use mosaic_input::{Command, Hotkey, KeybindingMap, Scope};
use mosaic_layout::{LayoutPin, WrapPolicy};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MosaicSettings {
    #[serde(default = "default_workspace_count")]
    pub workspace_count: usize,
    #[serde(default)]
    pub navigation: NavigationSettings,
    #[serde(default)]
    pub layout_pin: Option<LayoutPin>,
    /// Pane types opened on a fresh start with no session.
    #[serde(default = "default_seed_panes")]
    pub seed_panes: Vec<String>,
    #[serde(default = "default_window_width")]
    pub window_width: f32,
    #[serde(default = "default_window_height")]
    pub window_height: f32,
    #[serde(default)]
    pub keybindings: Vec<KeybindingOverride>,
}

fn default_workspace_count() -> usize {
    4
}

fn default_seed_panes() -> Vec<String> {
    vec!["notes".to_string()]
}

fn default_window_width() -> f32 {
    1280.0
}

fn default_window_height() -> f32 {
    800.0
}

impl Default for MosaicSettings {
    fn default() -> Self {
        Self {
            workspace_count: default_workspace_count(),
            navigation: NavigationSettings::default(),
            layout_pin: None,
            seed_panes: default_seed_panes(),
            window_width: default_window_width(),
            window_height: default_window_height(),
            keybindings: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavigationSettings {
    /// `stop` (default) or `wrap` at the grid edge.
    #[serde(default)]
    pub wrap: WrapPolicy,
}

/// A single keybinding override stored in settings.json.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeybindingOverride {
    pub action: String,
    pub key: String,
    /// `global`, `workspace` or `pane:<type>`.
    #[serde(default = "default_scope")]
    pub scope: String,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub meta: bool,
    #[serde(default)]
    pub alt: bool,
}

fn default_scope() -> String {
    "workspace".to_string()
}

impl KeybindingOverride {
    /// Convert to a (Scope, Hotkey, Command) triple.
    pub fn to_binding(&self) -> Option<(Scope, Hotkey, Command)> {
        let scope = Scope::parse(&self.scope)?;
        let command = Command::from_action_key(&self.action)?;
        let key = Hotkey::key_from_name(&self.key)?;
        let hotkey = Hotkey::new(key, self.shift, self.ctrl, self.meta, self.alt);
        Some((scope, hotkey, command))
    }

    pub fn from_binding(scope: &Scope, hotkey: &Hotkey, command: &Command) -> Self {
        Self {
            action: command.action_key(),
            key: hotkey.key_name(),
            scope: scope.name(),
            shift: hotkey.shift,
            ctrl: hotkey.ctrl,
            meta: hotkey.meta,
            alt: hotkey.alt,
        }
    }
}

fn settings_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("mosaic").join("settings.json"))
}

pub fn load_settings_from(path: &Path) -> io::Result<MosaicSettings> {
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

pub fn save_settings_to(path: &Path, settings: &MosaicSettings) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, json)
}

pub fn load_settings() -> MosaicSettings {
    let path = match settings_path() {
        Some(p) => p,
        None => return MosaicSettings::default(),
    };

    match load_settings_from(&path) {
        Ok(settings) => settings,
        Err(e) if e.kind() == io::ErrorKind::NotFound => MosaicSettings::default(),
        Err(e) => {
            log::warn!("Failed to load {}: {}", path.display(), e);
            MosaicSettings::default()
        }
    }
}

pub fn save_settings(settings: &MosaicSettings) {
    let path = match settings_path() {
        Some(p) => p,
        None => {
            log::warn!("Cannot determine settings path");
            return;
        }
    };

    if let Err(e) = save_settings_to(&path, settings) {
        log::error!("Failed to write {}: {}", path.display(), e);
    }
}

/// Build a KeybindingMap from settings overrides. Overrides that name an
/// unknown action, key or scope are skipped.
pub fn build_keybinding_map(settings: &MosaicSettings) -> KeybindingMap {
    if settings.keybindings.is_empty() {
        return KeybindingMap::new();
    }
    let overrides: Vec<(Scope, Hotkey, Command)> = settings
        .keybindings
        .iter()
        .filter_map(|o| {
            let binding = o.to_binding();
            if binding.is_none() {
                log::warn!("Ignoring keybinding {} = {}", o.action, o.key);
            }
            binding
        })
        .collect();
    KeybindingMap::with_overrides(overrides)
}
