// Control arena: the interactive widgets inside panes, addressed by
// generational keys so that a stored id can go stale but never dangle.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

use crate::PaneId;

new_key_type! {
    /// Handle to a control. Removing the control invalidates every copy of
    /// the id; lookups through a stale id return `None`.
    pub struct ControlId;
}

// ──────────────────────────────────────────────
// Control kinds and state
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    TextInput,
    TextArea,
    List,
    Button,
    Custom,
}

/// Which parts of `ControlState` a control kind actually has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub cursor: bool,
    pub selection: bool,
    pub scroll: bool,
}

impl ControlKind {
    pub fn capabilities(self) -> Capabilities {
        match self {
            ControlKind::TextInput => Capabilities {
                cursor: true,
                selection: true,
                scroll: false,
            },
            ControlKind::TextArea => Capabilities {
                cursor: true,
                selection: true,
                scroll: true,
            },
            ControlKind::List => Capabilities {
                cursor: true,
                selection: false,
                scroll: true,
            },
            ControlKind::Button => Capabilities::default(),
            ControlKind::Custom => Capabilities {
                cursor: true,
                selection: true,
                scroll: true,
            },
        }
    }

    /// Controls that consume plain keystrokes as text.
    pub fn is_text_entry(self) -> bool {
        matches!(self, ControlKind::TextInput | ControlKind::TextArea)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Transient per-control state: what a user loses when focus moves away
/// and a naive restore puts the cursor back at zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<Selection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll: Option<f32>,
}

impl ControlState {
    /// Keep only the fields the capability set covers.
    pub fn masked(&self, caps: Capabilities) -> Self {
        Self {
            cursor: self.cursor.filter(|_| caps.cursor),
            selection: self.selection.filter(|_| caps.selection),
            scroll: self.scroll.filter(|_| caps.scroll),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cursor.is_none() && self.selection.is_none() && self.scroll.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    pub pane: PaneId,
    pub kind: ControlKind,
    pub focusable: bool,
    pub state: ControlState,
}

// ──────────────────────────────────────────────
// Keyboard focus
// ──────────────────────────────────────────────

/// Where platform keyboard focus currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardTarget {
    Pane(PaneId),
    Control(ControlId),
}

// ──────────────────────────────────────────────
// ControlTree
// ──────────────────────────────────────────────

/// Every control of every open pane, plus the single keyboard focus slot.
///
/// Per pane, controls keep their insertion order, which doubles as tab
/// order and as the ordinal used to find "the same" control again after the
/// pane is recreated.
#[derive(Default)]
pub struct ControlTree {
    controls: SlotMap<ControlId, Control>,
    order: HashMap<PaneId, Vec<ControlId>>,
    keyboard: Option<KeyboardTarget>,
    suppress_depth: usize,
    changed: Vec<ControlId>,
}

impl ControlTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a focusable control to `pane`.
    pub fn insert(&mut self, pane: PaneId, kind: ControlKind) -> ControlId {
        self.insert_with(pane, kind, true)
    }

    pub fn insert_with(&mut self, pane: PaneId, kind: ControlKind, focusable: bool) -> ControlId {
        let id = self.controls.insert(Control {
            pane,
            kind,
            focusable,
            state: ControlState::default(),
        });
        self.order.entry(pane).or_default().push(id);
        id
    }

    pub fn get(&self, id: ControlId) -> Option<&Control> {
        self.controls.get(id)
    }

    pub fn contains(&self, id: ControlId) -> bool {
        self.controls.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Controls of a pane in tab order.
    pub fn controls_of(&self, pane: PaneId) -> &[ControlId] {
        self.order.get(&pane).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Remove one control. Clears keyboard focus if it was there.
    pub fn remove(&mut self, id: ControlId) -> Option<Control> {
        let control = self.controls.remove(id)?;
        if let Some(list) = self.order.get_mut(&control.pane) {
            list.retain(|&c| c != id);
        }
        if self.keyboard == Some(KeyboardTarget::Control(id)) {
            self.keyboard = None;
        }
        self.changed.retain(|&c| c != id);
        Some(control)
    }

    /// Drop every control owned by `pane`. Returns how many were removed.
    pub fn remove_pane(&mut self, pane: PaneId) -> usize {
        let ids = self.order.remove(&pane).unwrap_or_default();
        for &id in &ids {
            self.controls.remove(id);
        }
        self.changed.retain(|c| !ids.contains(c));
        let keyboard_gone = match self.keyboard {
            Some(KeyboardTarget::Pane(p)) => p == pane,
            Some(KeyboardTarget::Control(c)) => !self.controls.contains_key(c),
            None => false,
        };
        if keyboard_gone {
            self.keyboard = None;
        }
        ids.len()
    }

    pub fn set_focusable(&mut self, id: ControlId, focusable: bool) -> bool {
        match self.controls.get_mut(id) {
            Some(control) => {
                control.focusable = focusable;
                if !focusable && self.keyboard == Some(KeyboardTarget::Control(id)) {
                    self.keyboard = None;
                }
                true
            }
            None => false,
        }
    }

    pub fn is_focusable(&self, id: ControlId) -> bool {
        self.controls.get(id).is_some_and(|c| c.focusable)
    }

    pub fn first_focusable(&self, pane: PaneId) -> Option<ControlId> {
        self.controls_of(pane)
            .iter()
            .copied()
            .find(|&id| self.is_focusable(id))
    }

    /// Position of a control within its pane's tab order.
    pub fn ordinal(&self, id: ControlId) -> Option<usize> {
        let control = self.controls.get(id)?;
        self.controls_of(control.pane).iter().position(|&c| c == id)
    }

    pub fn control_at(&self, pane: PaneId, ordinal: usize) -> Option<ControlId> {
        self.controls_of(pane).get(ordinal).copied()
    }

    // ── Keyboard focus ──────────────────────────

    pub fn keyboard_focus(&self) -> Option<KeyboardTarget> {
        self.keyboard
    }

    /// The control holding keyboard focus, if focus is on a control.
    pub fn focused_control(&self) -> Option<ControlId> {
        match self.keyboard {
            Some(KeyboardTarget::Control(id)) if self.controls.contains_key(id) => Some(id),
            _ => None,
        }
    }

    /// The pane that keyboard focus is currently inside.
    pub fn keyboard_pane(&self) -> Option<PaneId> {
        match self.keyboard? {
            KeyboardTarget::Pane(pane) => Some(pane),
            KeyboardTarget::Control(id) => self.controls.get(id).map(|c| c.pane),
        }
    }

    /// Give keyboard focus to a control. Fails (returning false) for stale
    /// or non-focusable controls, leaving focus where it was.
    pub fn focus_control(&mut self, id: ControlId) -> bool {
        if !self.is_focusable(id) {
            return false;
        }
        self.keyboard = Some(KeyboardTarget::Control(id));
        true
    }

    /// Give keyboard focus to the pane surface itself.
    pub fn focus_pane_surface(&mut self, pane: PaneId) {
        self.keyboard = Some(KeyboardTarget::Pane(pane));
    }

    pub fn clear_keyboard_focus(&mut self) {
        self.keyboard = None;
    }

    /// True while keyboard focus is in a text entry control. Single-key
    /// shortcuts must not fire in that state.
    pub fn is_typing(&self) -> bool {
        self.focused_control()
            .and_then(|id| self.controls.get(id))
            .is_some_and(|c| c.kind.is_text_entry())
    }

    // ── State and change notification ───────────

    pub fn state(&self, id: ControlId) -> Option<&ControlState> {
        self.controls.get(id).map(|c| &c.state)
    }

    /// Edit a control's transient state. The edit is reported through
    /// `take_changes` unless change notification is suppressed.
    pub fn update_state(&mut self, id: ControlId, f: impl FnOnce(&mut ControlState)) -> bool {
        let Some(control) = self.controls.get_mut(id) else {
            return false;
        };
        f(&mut control.state);
        if self.suppress_depth == 0 && !self.changed.contains(&id) {
            self.changed.push(id);
        }
        true
    }

    /// Replace a control's state without reporting a change. Used when
    /// focus history puts saved state back.
    pub fn apply_state(&mut self, id: ControlId, state: &ControlState) -> bool {
        match self.controls.get_mut(id) {
            Some(control) => {
                let caps = control.kind.capabilities();
                let masked = state.masked(caps);
                if masked.cursor.is_some() {
                    control.state.cursor = masked.cursor;
                }
                if masked.selection.is_some() {
                    control.state.selection = masked.selection;
                }
                if masked.scroll.is_some() {
                    control.state.scroll = masked.scroll;
                }
                true
            }
            None => false,
        }
    }

    /// Run `f` with change notification suspended. Panes loading content
    /// programmatically go through here so the load is not taken for a user
    /// edit. Nests.
    pub fn with_changes_suppressed<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.suppress_depth += 1;
        let result = f(self);
        self.suppress_depth -= 1;
        result
    }

    pub fn changes_suppressed(&self) -> bool {
        self.suppress_depth > 0
    }

    /// Drain the controls edited since the last call, in edit order.
    pub fn take_changes(&mut self) -> Vec<ControlId> {
        std::mem::take(&mut self.changed)
    }
}
