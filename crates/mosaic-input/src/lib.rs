// Shortcut router: turns input events into focus/workspace commands with a
// fixed scope priority (pane-local, then workspace, then global), and routes
// everything else to the focused pane.

mod keymap;

use mosaic_core::{Direction, InputEvent, Key, Modifiers, PaneId, Rect, Vec2};

pub use keymap::{Hotkey, KeybindingMap, Scope};

// ──────────────────────────────────────────────
// Action types
// ──────────────────────────────────────────────

/// Actions the app should handle in response to input.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Route event to a specific pane.
    RouteToPane(PaneId),
    /// A bound shortcut fired.
    Command(Command),
    /// A click landed on a pane that should take focus.
    FocusPane(PaneId),
    /// No action to take.
    None,
}

/// Commands a shortcut can trigger.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    Navigate(Direction),
    FocusNext,
    FocusPrev,
    /// Zero-based workspace index.
    SwitchWorkspace(usize),
    ClosePane,
    OpenPane(String),
    CycleLayoutPin,
    /// A pane-local command, handled by the focused pane's content.
    Pane(String),
}

impl Command {
    /// Stable string key used in settings files.
    pub fn action_key(&self) -> String {
        match self {
            Command::Navigate(dir) => format!("navigate_{}", dir.name()),
            Command::FocusNext => "focus_next".to_string(),
            Command::FocusPrev => "focus_prev".to_string(),
            Command::SwitchWorkspace(i) => format!("switch_workspace_{}", i + 1),
            Command::ClosePane => "close_pane".to_string(),
            Command::OpenPane(kind) => format!("open_pane:{kind}"),
            Command::CycleLayoutPin => "cycle_layout_pin".to_string(),
            Command::Pane(name) => format!("pane:{name}"),
        }
    }

    pub fn from_action_key(key: &str) -> Option<Self> {
        if let Some(dir) = key.strip_prefix("navigate_") {
            return Direction::from_name(dir).map(Command::Navigate);
        }
        if let Some(n) = key.strip_prefix("switch_workspace_") {
            let n: usize = n.parse().ok()?;
            return n.checked_sub(1).map(Command::SwitchWorkspace);
        }
        if let Some(kind) = key.strip_prefix("open_pane:") {
            return (!kind.is_empty()).then(|| Command::OpenPane(kind.to_string()));
        }
        if let Some(name) = key.strip_prefix("pane:") {
            return (!name.is_empty()).then(|| Command::Pane(name.to_string()));
        }
        match key {
            "focus_next" => Some(Command::FocusNext),
            "focus_prev" => Some(Command::FocusPrev),
            "close_pane" => Some(Command::ClosePane),
            "cycle_layout_pin" => Some(Command::CycleLayoutPin),
            _ => None,
        }
    }
}

/// What the router needs to know about the focused pane for one dispatch.
#[derive(Debug, Clone, Copy, Default)]
pub struct DispatchContext<'a> {
    /// Type tag of the focused pane, selecting its pane-local bindings.
    pub pane_type: Option<&'a str>,
    /// The user is typing in a text control.
    pub typing: bool,
}

// ──────────────────────────────────────────────
// Router
// ──────────────────────────────────────────────

/// The router decides what happens with each input event: which pane it
/// goes to, or which command it triggers.
pub struct Router {
    focused: Option<PaneId>,
    hovered: Option<PaneId>,
    keymap: KeybindingMap,
}

impl Router {
    /// Create a new Router with the default bindings.
    pub fn new() -> Self {
        Self::with_keymap(KeybindingMap::new())
    }

    pub fn with_keymap(keymap: KeybindingMap) -> Self {
        Self {
            focused: None,
            hovered: None,
            keymap,
        }
    }

    pub fn keymap(&self) -> &KeybindingMap {
        &self.keymap
    }

    pub fn keymap_mut(&mut self) -> &mut KeybindingMap {
        &mut self.keymap
    }

    /// Get the currently focused pane, if any.
    pub fn focused(&self) -> Option<PaneId> {
        self.focused
    }

    /// Mirror the focus coordinator's pane. The router never decides focus
    /// on its own for keyboard input.
    pub fn set_focused(&mut self, pane: Option<PaneId>) {
        self.focused = pane;
    }

    /// Get the currently hovered pane, if any.
    pub fn hovered(&self) -> Option<PaneId> {
        self.hovered
    }

    /// Process an input event and return what action should be taken.
    pub fn process(
        &mut self,
        event: InputEvent,
        pane_rects: &[(PaneId, Rect)],
        ctx: DispatchContext<'_>,
    ) -> Action {
        match event {
            InputEvent::KeyPress { key, modifiers } => self.dispatch_key(key, modifiers, ctx),
            InputEvent::MouseClick { position, .. } => match pane_at(position, pane_rects) {
                Some(id) => Action::FocusPane(id),
                None => Action::None,
            },
            InputEvent::MouseMove { position } => {
                self.hovered = pane_at(position, pane_rects);
                Action::None
            }
            InputEvent::MouseScroll { position, .. } => {
                // Route scroll events to the pane under the mouse.
                match pane_at(position, pane_rects) {
                    Some(id) => Action::RouteToPane(id),
                    None => Action::None,
                }
            }
            InputEvent::Resize { .. } => {
                // Resize events are handled globally by the app, not routed to panes.
                Action::None
            }
        }
    }

    // ── Key processing ──────────────────────────

    /// Match a key press against pane-local, then workspace, then global
    /// bindings. While the user is typing, bindings without a chord
    /// modifier are skipped so plain letters and arrows reach the text
    /// control.
    pub fn dispatch_key(&self, key: Key, modifiers: Modifiers, ctx: DispatchContext<'_>) -> Action {
        let mut scopes = Vec::with_capacity(3);
        if let Some(kind) = ctx.pane_type {
            scopes.push(Scope::Pane(kind.to_string()));
        }
        scopes.push(Scope::Workspace);
        scopes.push(Scope::Global);

        for scope in &scopes {
            if let Some((hotkey, command)) = self.keymap.lookup(scope, key, modifiers) {
                if ctx.typing && hotkey.is_single_key() {
                    log::trace!("{} suppressed while typing", hotkey.key_name());
                    continue;
                }
                return Action::Command(command.clone());
            }
        }

        // Not a shortcut -- route to the focused pane.
        match self.focused {
            Some(id) => Action::RouteToPane(id),
            None => Action::None,
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

// ── Hit testing ─────────────────────────────

/// Find which pane contains the given point.
/// If panes overlap, returns the first match (they should not overlap
/// in a well-formed layout).
fn pane_at(position: Vec2, pane_rects: &[(PaneId, Rect)]) -> Option<PaneId> {
    for &(id, rect) in pane_rects {
        if rect.contains(position) {
            return Some(id);
        }
    }
    None
}
