use mosaic_core::{ControlId, ControlTree, Direction, LayoutEngine, PaneHost, PaneId};

// ──────────────────────────────────────────────
// Notifications
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusChange {
    pub previous: Option<PaneId>,
    pub current: Option<PaneId>,
}

/// Receives one call per focus transition, in subscription order.
pub trait FocusObserver {
    fn focus_changed(&mut self, change: &FocusChange);
}

impl<F: FnMut(&FocusChange)> FocusObserver for F {
    fn focus_changed(&mut self, change: &FocusChange) {
        self(change)
    }
}

/// Where keyboard focus ended up after a pane took focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardLanding {
    /// The pane surface itself.
    Pane,
    Control(ControlId),
    /// Nothing in the pane can take keyboard focus; it stayed where it was.
    Nowhere,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusOutcome {
    /// Unknown pane, nothing focused to navigate from, or no target.
    Ignored,
    Focused {
        pane: PaneId,
        keyboard: KeyboardLanding,
        /// False when the pane already had focus and only keyboard focus
        /// was re-acquired.
        changed: bool,
    },
}

impl FocusOutcome {
    pub fn focused_pane(&self) -> Option<PaneId> {
        match self {
            FocusOutcome::Focused { pane, .. } => Some(*pane),
            FocusOutcome::Ignored => None,
        }
    }
}

// ──────────────────────────────────────────────
// FocusCoordinator
// ──────────────────────────────────────────────

/// Owns the focused-pane pointer. Every active/inactive notification and
/// every keyboard focus request for a pane goes through here.
///
/// Collaborators are passed per call rather than stored, so the coordinator
/// never reaches for shared state and cannot be re-entered while observers
/// run: they only see the change, not the coordinator.
#[derive(Default)]
pub struct FocusCoordinator {
    focused: Option<PaneId>,
    observers: Vec<Box<dyn FocusObserver>>,
    dispatching: bool,
}

impl FocusCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(&self) -> Option<PaneId> {
        self.focused
    }

    pub fn subscribe(&mut self, observer: impl FocusObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Give `pane` focus. Panes the host does not know are ignored.
    ///
    /// The previous pane hears `false` and the new pane hears `true`, once
    /// each. Observers then see one `FocusChange`. Keyboard focus goes to
    /// whatever already had it inside the pane, else to the pane surface,
    /// else to the first focusable control.
    pub fn focus(
        &mut self,
        pane: PaneId,
        host: &mut dyn PaneHost,
        controls: &mut ControlTree,
    ) -> FocusOutcome {
        if self.dispatching || !host.contains(pane) {
            return FocusOutcome::Ignored;
        }

        let previous = self.focused;
        if previous == Some(pane) {
            let keyboard = acquire_keyboard(pane, host, controls);
            return FocusOutcome::Focused {
                pane,
                keyboard,
                changed: false,
            };
        }

        if let Some(prev) = previous {
            if host.contains(prev) {
                host.notify_active(prev, false);
            }
        }
        self.focused = Some(pane);
        host.notify_active(pane, true);
        let keyboard = acquire_keyboard(pane, host, controls);

        self.emit(FocusChange {
            previous,
            current: Some(pane),
        });
        FocusOutcome::Focused {
            pane,
            keyboard,
            changed: true,
        }
    }

    /// Move focus to the neighbour in `direction`. Running into an edge is
    /// a silent no-op.
    pub fn navigate(
        &mut self,
        direction: Direction,
        layout: &dyn LayoutEngine,
        host: &mut dyn PaneHost,
        controls: &mut ControlTree,
    ) -> FocusOutcome {
        let Some(from) = self.focused else {
            return FocusOutcome::Ignored;
        };
        match layout.find_in_direction(from, direction) {
            Some(target) => self.focus(target, host, controls),
            None => FocusOutcome::Ignored,
        }
    }

    /// Step through navigable panes in tiling order, wrapping at the ends.
    pub fn cycle(
        &mut self,
        forward: bool,
        layout: &dyn LayoutEngine,
        host: &mut dyn PaneHost,
        controls: &mut ControlTree,
    ) -> FocusOutcome {
        let ring: Vec<PaneId> = layout
            .pane_ids()
            .into_iter()
            .filter(|&id| layout.is_navigable(id) || Some(id) == self.focused)
            .collect();
        if ring.is_empty() {
            return FocusOutcome::Ignored;
        }

        let target = match self.focused.and_then(|f| ring.iter().position(|&id| id == f)) {
            Some(i) if forward => ring[(i + 1) % ring.len()],
            Some(i) => ring[(i + ring.len() - 1) % ring.len()],
            None if forward => ring[0],
            None => ring[ring.len() - 1],
        };
        if Some(target) == self.focused || !layout.is_navigable(target) {
            return FocusOutcome::Ignored;
        }
        self.focus(target, host, controls)
    }

    /// Re-focus after the focused pane was closed. The closed pane gets no
    /// inactive notification (it is gone) and observers see a single change
    /// from it to `successor`.
    pub fn hand_off(
        &mut self,
        removed: PaneId,
        successor: Option<PaneId>,
        host: &mut dyn PaneHost,
        controls: &mut ControlTree,
    ) -> FocusOutcome {
        if self.focused != Some(removed) {
            return FocusOutcome::Ignored;
        }

        let next = successor.filter(|&id| id != removed && host.contains(id));
        self.focused = next;
        let outcome = match next {
            Some(pane) => {
                host.notify_active(pane, true);
                let keyboard = acquire_keyboard(pane, host, controls);
                FocusOutcome::Focused {
                    pane,
                    keyboard,
                    changed: true,
                }
            }
            None => FocusOutcome::Ignored,
        };

        self.emit(FocusChange {
            previous: Some(removed),
            current: next,
        });
        outcome
    }

    /// Drop focus entirely. Returns the pane that had it.
    pub fn clear(&mut self, host: &mut dyn PaneHost) -> Option<PaneId> {
        let previous = self.focused.take()?;
        if host.contains(previous) {
            host.notify_active(previous, false);
        }
        self.emit(FocusChange {
            previous: Some(previous),
            current: None,
        });
        Some(previous)
    }

    fn emit(&mut self, change: FocusChange) {
        if self.dispatching {
            log::warn!("focus change {:?} raised during dispatch, dropped", change);
            return;
        }
        self.dispatching = true;
        for observer in self.observers.iter_mut() {
            observer.focus_changed(&change);
        }
        self.dispatching = false;
    }
}

fn acquire_keyboard(
    pane: PaneId,
    host: &dyn PaneHost,
    controls: &mut ControlTree,
) -> KeyboardLanding {
    if controls.keyboard_pane() == Some(pane) {
        if let Some(id) = controls.focused_control() {
            return KeyboardLanding::Control(id);
        }
        return KeyboardLanding::Pane;
    }
    if host.accepts_keyboard_focus(pane) {
        controls.focus_pane_surface(pane);
        return KeyboardLanding::Pane;
    }
    if let Some(id) = controls.first_focusable(pane) {
        if controls.focus_control(id) {
            return KeyboardLanding::Control(id);
        }
    }
    log::debug!("pane {} has no focusable surface", pane);
    KeyboardLanding::Nowhere
}
