// Pane contents and the factories that recreate them from type tags.

use std::collections::HashMap;

use mosaic_core::{ControlTree, PaneHost, PaneId};
use serde_json::Value;

// ──────────────────────────────────────────────
// Trait: PaneContent
// ──────────────────────────────────────────────

/// What a pane implementation provides. The workspace treats the content as
/// opaque apart from these hooks.
pub trait PaneContent {
    /// Type tag used to recreate the pane through a `PaneRegistry`.
    fn pane_type(&self) -> &str;

    /// Called once after the pane joins the tiling set. Register controls
    /// here; their insertion order is the pane's tab order.
    fn initialize(&mut self, id: PaneId, controls: &mut ControlTree);

    fn save_state(&self, _controls: &ControlTree) -> Option<Value> {
        None
    }

    /// Load a blob produced by `save_state`. Programmatic edits must run
    /// inside `ControlTree::with_changes_suppressed` so they are not
    /// recorded as user edits.
    fn restore_state(&mut self, _blob: &Value, _controls: &mut ControlTree) {}

    /// Release timers, watchers and subscriptions before removal.
    fn dispose(&mut self) {}

    fn on_active_changed(&mut self, _active: bool) {}

    fn accepts_keyboard_focus(&self) -> bool {
        false
    }

    /// Pane-local command from a pane-scoped binding.
    fn handle_command(&mut self, _name: &str, _controls: &mut ControlTree) -> bool {
        false
    }
}

// ──────────────────────────────────────────────
// PaneRegistry
// ──────────────────────────────────────────────

pub type PaneFactory = Box<dyn Fn() -> Box<dyn PaneContent>>;

/// Type tag → constructor.
#[derive(Default)]
pub struct PaneRegistry {
    factories: HashMap<String, PaneFactory>,
}

impl PaneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, kind: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn PaneContent> + 'static,
    {
        self.factories.insert(kind.into(), Box::new(factory));
    }

    pub fn create(&self, kind: &str) -> Option<Box<dyn PaneContent>> {
        self.factories.get(kind).map(|factory| factory())
    }

    pub fn knows(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    /// Registered type tags, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }
}

// ──────────────────────────────────────────────
// PaneSet
// ──────────────────────────────────────────────

struct Slot {
    content: Box<dyn PaneContent>,
    active: bool,
}

/// Owner of every open pane's content. Implements `PaneHost` for the focus
/// coordinator and filters repeated active/inactive notifications, so each
/// pane hears about a transition exactly once.
#[derive(Default)]
pub struct PaneSet {
    slots: HashMap<PaneId, Slot>,
}

impl PaneSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: PaneId, content: Box<dyn PaneContent>) {
        self.slots.insert(
            id,
            Slot {
                content,
                active: false,
            },
        );
    }

    pub fn remove(&mut self, id: PaneId) -> Option<Box<dyn PaneContent>> {
        self.slots.remove(&id).map(|slot| slot.content)
    }

    pub fn get(&self, id: PaneId) -> Option<&dyn PaneContent> {
        self.slots.get(&id).map(|slot| slot.content.as_ref())
    }

    pub fn get_mut(&mut self, id: PaneId) -> Option<&mut (dyn PaneContent + 'static)> {
        self.slots.get_mut(&id).map(|slot| slot.content.as_mut())
    }

    pub fn is_active(&self, id: PaneId) -> bool {
        self.slots.get(&id).is_some_and(|slot| slot.active)
    }

    /// Panes currently reporting active. Never more than one.
    pub fn active_panes(&self) -> Vec<PaneId> {
        let mut ids: Vec<PaneId> = self
            .slots
            .iter()
            .filter(|(_, slot)| slot.active)
            .map(|(&id, _)| id)
            .collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl PaneHost for PaneSet {
    fn contains(&self, pane: PaneId) -> bool {
        self.slots.contains_key(&pane)
    }

    fn accepts_keyboard_focus(&self, pane: PaneId) -> bool {
        self.get(pane).is_some_and(|c| c.accepts_keyboard_focus())
    }

    fn notify_active(&mut self, pane: PaneId, active: bool) {
        let Some(slot) = self.slots.get_mut(&pane) else {
            return;
        };
        if slot.active == active {
            return;
        }
        slot.active = active;
        slot.content.on_active_changed(active);
    }
}
