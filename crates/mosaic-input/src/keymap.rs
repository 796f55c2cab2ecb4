use std::collections::HashMap;

use mosaic_core::{Key, Modifiers};

use crate::Command;

// ──────────────────────────────────────────────
// Hotkey
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hotkey {
    pub key: Key,
    pub shift: bool,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
}

impl Hotkey {
    pub fn new(key: Key, shift: bool, ctrl: bool, meta: bool, alt: bool) -> Self {
        Self {
            key: normalize(key),
            shift,
            ctrl,
            meta,
            alt,
        }
    }

    /// A key with no modifiers at all.
    pub fn plain(key: Key) -> Self {
        Self::new(key, false, false, false, false)
    }

    pub fn ctrl(key: Key) -> Self {
        Self::new(key, false, true, false, false)
    }

    pub fn alt(key: Key) -> Self {
        Self::new(key, false, false, false, true)
    }

    /// Parse a chord such as `ctrl+shift+tab`, `alt+left` or `h`.
    pub fn parse(chord: &str) -> Option<Self> {
        let chord = chord.trim().to_ascii_lowercase();
        let mut parts: Vec<&str> = chord.split('+').collect();
        // "ctrl++" names the plus key itself.
        if chord.ends_with("++") {
            parts.truncate(parts.len().saturating_sub(2));
            parts.push("+");
        }
        let key_name = parts.pop()?;
        let key = Self::key_from_name(key_name)?;
        let mut hotkey = Self::plain(key);
        for modifier in parts {
            match modifier {
                "shift" => hotkey.shift = true,
                "ctrl" | "control" => hotkey.ctrl = true,
                "alt" | "option" => hotkey.alt = true,
                "meta" | "cmd" | "super" => hotkey.meta = true,
                _ => return None,
            }
        }
        Some(hotkey)
    }

    /// True when no chord modifier is involved. Such shortcuts collide with
    /// typing and are suppressed while a text control has focus.
    pub fn is_single_key(&self) -> bool {
        !self.modifiers().has_command()
    }

    pub fn modifiers(&self) -> Modifiers {
        Modifiers {
            shift: self.shift,
            ctrl: self.ctrl,
            alt: self.alt,
            meta: self.meta,
        }
    }

    pub fn matches(&self, key: Key, modifiers: Modifiers) -> bool {
        self.key == normalize(key) && self.modifiers() == modifiers
    }

    pub fn key_from_name(name: &str) -> Option<Key> {
        let key = match name {
            "enter" | "return" => Key::Enter,
            "tab" => Key::Tab,
            "esc" | "escape" => Key::Escape,
            "backspace" => Key::Backspace,
            "delete" | "del" => Key::Delete,
            "up" => Key::Up,
            "down" => Key::Down,
            "left" => Key::Left,
            "right" => Key::Right,
            "home" => Key::Home,
            "end" => Key::End,
            "pageup" => Key::PageUp,
            "pagedown" => Key::PageDown,
            "insert" => Key::Insert,
            "space" => Key::Char(' '),
            _ => {
                if let Some(n) = name.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                    if (1..=24).contains(&n) {
                        return Some(Key::F(n));
                    }
                    return None;
                }
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => return None,
                }
            }
        };
        Some(normalize(key))
    }

    /// Inverse of `key_from_name` for this hotkey's key.
    pub fn key_name(&self) -> String {
        match self.key {
            Key::Char(' ') => "space".to_string(),
            Key::Char(c) => c.to_string(),
            Key::Enter => "enter".to_string(),
            Key::Backspace => "backspace".to_string(),
            Key::Tab => "tab".to_string(),
            Key::Escape => "escape".to_string(),
            Key::Delete => "delete".to_string(),
            Key::Up => "up".to_string(),
            Key::Down => "down".to_string(),
            Key::Left => "left".to_string(),
            Key::Right => "right".to_string(),
            Key::Home => "home".to_string(),
            Key::End => "end".to_string(),
            Key::PageUp => "pageup".to_string(),
            Key::PageDown => "pagedown".to_string(),
            Key::F(n) => format!("f{n}"),
            Key::Insert => "insert".to_string(),
        }
    }
}

/// Letters bind case-insensitively; shift is a separate flag.
fn normalize(key: Key) -> Key {
    match key {
        Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

// ──────────────────────────────────────────────
// Scopes and the binding table
// ──────────────────────────────────────────────

/// Where a binding applies. Dispatch checks pane-local bindings for the
/// focused pane's type first, then workspace bindings, then global ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    Pane(String),
    Workspace,
    Global,
}

impl Scope {
    pub fn name(&self) -> String {
        match self {
            Scope::Pane(kind) => format!("pane:{kind}"),
            Scope::Workspace => "workspace".to_string(),
            Scope::Global => "global".to_string(),
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "workspace" => Some(Scope::Workspace),
            "global" => Some(Scope::Global),
            _ => name
                .strip_prefix("pane:")
                .filter(|kind| !kind.is_empty())
                .map(|kind| Scope::Pane(kind.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct KeybindingMap {
    pane: HashMap<String, Vec<(Hotkey, Command)>>,
    workspace: Vec<(Hotkey, Command)>,
    global: Vec<(Hotkey, Command)>,
}

impl KeybindingMap {
    /// The default bindings.
    pub fn new() -> Self {
        let mut map = Self::empty();

        let nav = [('h', Key::Left), ('j', Key::Down), ('k', Key::Up), ('l', Key::Right)];
        for (letter, arrow) in nav {
            let Some(dir) = arrow.arrow_direction() else {
                continue;
            };
            map.bind(Scope::Workspace, Hotkey::plain(Key::Char(letter)), Command::Navigate(dir));
            map.bind(Scope::Workspace, Hotkey::alt(arrow), Command::Navigate(dir));
        }
        map.bind(Scope::Workspace, Hotkey::ctrl(Key::Tab), Command::FocusNext);
        map.bind(
            Scope::Workspace,
            Hotkey::new(Key::Tab, true, true, false, false),
            Command::FocusPrev,
        );
        map.bind(Scope::Workspace, Hotkey::ctrl(Key::Char('w')), Command::ClosePane);
        map.bind(
            Scope::Workspace,
            Hotkey::new(Key::Char('l'), true, true, false, false),
            Command::CycleLayoutPin,
        );

        for n in 1..=9u8 {
            let digit = char::from(b'0' + n);
            map.bind(
                Scope::Global,
                Hotkey::ctrl(Key::Char(digit)),
                Command::SwitchWorkspace(usize::from(n - 1)),
            );
        }
        map
    }

    /// A map with no bindings at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Defaults plus user overrides. An override takes the command's place
    /// in its scope: earlier bindings of the same command there are dropped.
    pub fn with_overrides(overrides: Vec<(Scope, Hotkey, Command)>) -> Self {
        let mut map = Self::new();
        for (scope, hotkey, command) in overrides {
            map.table_mut(&scope).retain(|(_, c)| *c != command);
            map.bind(scope, hotkey, command);
        }
        map
    }

    /// Bind `hotkey` in `scope`, replacing whatever it was bound to there.
    pub fn bind(&mut self, scope: Scope, hotkey: Hotkey, command: Command) {
        let table = self.table_mut(&scope);
        match table.iter_mut().find(|(h, _)| *h == hotkey) {
            Some(entry) => entry.1 = command,
            None => table.push((hotkey, command)),
        }
    }

    pub fn unbind(&mut self, scope: &Scope, hotkey: &Hotkey) -> Option<Command> {
        let table = self.table_mut(scope);
        let index = table.iter().position(|(h, _)| h == hotkey)?;
        Some(table.remove(index).1)
    }

    pub fn lookup(&self, scope: &Scope, key: Key, modifiers: Modifiers) -> Option<(&Hotkey, &Command)> {
        self.bindings(scope)
            .iter()
            .find(|(h, _)| h.matches(key, modifiers))
            .map(|(h, c)| (h, c))
    }

    pub fn bindings(&self, scope: &Scope) -> &[(Hotkey, Command)] {
        match scope {
            Scope::Pane(kind) => self.pane.get(kind).map(Vec::as_slice).unwrap_or(&[]),
            Scope::Workspace => &self.workspace,
            Scope::Global => &self.global,
        }
    }

    fn table_mut(&mut self, scope: &Scope) -> &mut Vec<(Hotkey, Command)> {
        match scope {
            Scope::Pane(kind) => self.pane.entry(kind.clone()).or_default(),
            Scope::Workspace => &mut self.workspace,
            Scope::Global => &mut self.global,
        }
    }
}
