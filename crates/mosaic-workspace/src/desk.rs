// The desk: one live workspace plus the stored ones. Sequences save,
// teardown, recreation and deferred focus, and turns router actions into
// focus and layout changes.

use mosaic_core::{
    ControlId, ControlState, ControlTree, Direction, InputEvent, LayoutEngine, PaneHandle,
    PaneHost, PaneId, Rect, Size, Vec2,
};
use mosaic_focus::{FocusCoordinator, FocusHistory, FocusObserver, FocusOutcome};
use mosaic_input::{Action, Command, DispatchContext, KeybindingMap, Router};
use mosaic_layout::{LayoutPin, TilingEngine};

use crate::deferred::{Deferred, DeferredQueue};
use crate::pane_set::{PaneContent, PaneRegistry, PaneSet};
use crate::settings::{build_keybinding_map, MosaicSettings};
use crate::{Session, WorkspaceSnapshot, WorkspaceStore};

/// What a workspace switch (or a session restore) did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwitchReport {
    /// Type tags that could not be recreated.
    pub skipped: Vec<String>,
    pub restored: usize,
    pub focused: Option<PaneId>,
}

pub struct Desk {
    registry: PaneRegistry,
    panes: PaneSet,
    controls: ControlTree,
    engine: TilingEngine,
    coordinator: FocusCoordinator,
    history: FocusHistory,
    router: Router,
    store: WorkspaceStore,
    deferred: DeferredQueue,
    context_ref: Option<String>,
    default_pin: Option<LayoutPin>,
    next_id: PaneId,
    window: Size,
}

impl Desk {
    pub fn new(registry: PaneRegistry, settings: &MosaicSettings) -> Self {
        let mut engine = TilingEngine::with_wrap_policy(settings.navigation.wrap);
        engine.pin_layout(settings.layout_pin);
        Self {
            registry,
            panes: PaneSet::new(),
            controls: ControlTree::new(),
            engine,
            coordinator: FocusCoordinator::new(),
            history: FocusHistory::new(),
            router: Router::with_keymap(build_keybinding_map(settings)),
            store: WorkspaceStore::new(settings.workspace_count),
            deferred: DeferredQueue::new(),
            context_ref: None,
            default_pin: settings.layout_pin,
            next_id: 1,
            window: Size::new(settings.window_width, settings.window_height),
        }
    }

    /// Rebuild every workspace from a saved session and bring the one that
    /// was on screen back up.
    pub fn from_session(
        registry: PaneRegistry,
        settings: &MosaicSettings,
        session: Session,
    ) -> (Self, SwitchReport) {
        let mut desk = Self::new(registry, settings);
        desk.store =
            WorkspaceStore::from_slots(session.workspaces, session.current, settings.workspace_count);
        desk.next_id = desk.store.max_pane_id().map_or(1, |max| max + 1);

        let current = desk.store.current();
        let snapshot = desk
            .store
            .take(current)
            .unwrap_or_else(|| desk.blank_snapshot());
        let report = desk.rebuild(snapshot);
        (desk, report)
    }

    /// Everything needed to bring the desk back after a restart. The live
    /// workspace is captured on the spot.
    pub fn checkpoint(&mut self) -> Session {
        let live = self.capture_now();
        let current = self.store.current();
        let mut workspaces = self.store.slots().to_vec();
        if let Some(slot) = workspaces.get_mut(current) {
            *slot = Some(live);
        }
        Session {
            current,
            workspaces,
        }
    }

    // ── Panes ───────────────────────────────────

    /// Open a pane of a registered type and focus it.
    pub fn open_pane(&mut self, kind: &str) -> Option<PaneId> {
        let Some(content) = self.registry.create(kind) else {
            log::warn!("Unknown pane type {:?}", kind);
            return None;
        };
        let id = self.alloc_id();
        self.install(id, kind, content);
        self.focus_pane(id);
        Some(id)
    }

    /// Dispose and remove a pane. If it had focus, focus passes to the pane
    /// that took its place in tiling order, or the one before it.
    pub fn close_pane(&mut self, id: PaneId) -> bool {
        if !self.panes.contains(id) {
            return false;
        }
        self.deferred.cancel(id);
        let index = self.engine.index_of(id).unwrap_or(0);

        if let Some(mut content) = self.panes.remove(id) {
            content.dispose();
        }
        self.controls.remove_pane(id);
        self.history.forget(id);
        self.engine.remove_pane(id);

        if self.coordinator.focused() == Some(id) {
            let successor = self.successor(index);
            let outcome =
                self.coordinator
                    .hand_off(id, successor, &mut self.panes, &mut self.controls);
            if let FocusOutcome::Focused { pane, .. } = outcome {
                self.restore_if_recorded(pane);
            }
        }
        self.router.set_focused(self.coordinator.focused());
        true
    }

    pub fn set_pane_visible(&mut self, id: PaneId, visible: bool) -> bool {
        let Some(index) = self.engine.index_of(id) else {
            return false;
        };
        self.engine.set_visible(id, visible);
        if !visible && self.coordinator.focused() == Some(id) {
            match self.successor(index) {
                Some(next) => {
                    self.focus_pane(next);
                }
                None => {
                    self.history.record_current(id, &self.controls);
                    self.controls.clear_keyboard_focus();
                    self.coordinator.clear(&mut self.panes);
                    self.router.set_focused(None);
                }
            }
        }
        true
    }

    pub fn pin_layout(&mut self, pin: Option<LayoutPin>) {
        self.engine.pin_layout(pin);
    }

    /// Auto → Grid → MasterStack → Auto.
    pub fn cycle_layout_pin(&mut self) -> Option<LayoutPin> {
        let pin = LayoutPin::cycle(self.engine.pin());
        self.engine.pin_layout(pin);
        pin
    }

    // ── Focus ───────────────────────────────────

    pub fn focus_pane(&mut self, id: PaneId) -> FocusOutcome {
        self.transfer(|coordinator, _, panes, controls| coordinator.focus(id, panes, controls))
    }

    pub fn navigate(&mut self, direction: Direction) -> FocusOutcome {
        self.transfer(|coordinator, engine, panes, controls| {
            coordinator.navigate(direction, engine, panes, controls)
        })
    }

    pub fn cycle_focus(&mut self, forward: bool) -> FocusOutcome {
        self.transfer(|coordinator, engine, panes, controls| {
            coordinator.cycle(forward, engine, panes, controls)
        })
    }

    /// Focus the pane under a window point.
    pub fn focus_at(&mut self, point: Vec2) -> FocusOutcome {
        match self.engine.pane_at(self.window, point) {
            Some(id) => self.focus_pane(id),
            None => FocusOutcome::Ignored,
        }
    }

    /// Move keyboard focus to a control, focusing its pane first.
    pub fn focus_control(&mut self, id: ControlId) -> bool {
        let Some(pane) = self.controls.get(id).map(|c| c.pane) else {
            return false;
        };
        if self.coordinator.focused() != Some(pane) {
            self.focus_pane(pane);
        }
        self.coordinator.focused() == Some(pane) && self.controls.focus_control(id)
    }

    /// A user edit to a control's cursor, selection or scroll.
    pub fn update_control(&mut self, id: ControlId, f: impl FnOnce(&mut ControlState)) -> bool {
        let updated = self.controls.update_state(id, f);
        self.pump_changes();
        updated
    }

    pub fn subscribe(&mut self, observer: impl FocusObserver + 'static) {
        self.coordinator.subscribe(observer);
    }

    // ── Workspaces ──────────────────────────────

    /// Snapshot the live workspace. Synchronous: this reads the focused pane
    /// and its focused control before anything can be torn down.
    pub fn capture_now(&mut self) -> WorkspaceSnapshot {
        self.pump_changes();
        let focused = self.coordinator.focused();
        if let Some(pane) = focused {
            self.history.record_current(pane, &self.controls);
        }

        let handles: Vec<(PaneId, String, bool)> = self
            .engine
            .panes()
            .iter()
            .map(|p| (p.id, p.kind.clone(), p.visible))
            .collect();

        let mut snapshot = WorkspaceSnapshot {
            context_ref: self.context_ref.clone(),
            layout_pin: self.engine.pin(),
            ..Default::default()
        };
        for (index, (id, kind, visible)) in handles.into_iter().enumerate() {
            snapshot.pane_types.push(kind);
            snapshot.pane_ids.push(id);
            if !visible {
                snapshot.hidden.push(index);
            }
            if focused == Some(id) {
                snapshot.focused_index = Some(index);
            }
            if let Some(memo) = self.history.export(id, &self.controls) {
                snapshot.focus_blobs.insert(id, memo);
            }
            if let Some(blob) = self.panes.get(id).and_then(|c| c.save_state(&self.controls)) {
                snapshot.pane_states.insert(id, blob);
            }
        }
        snapshot
    }

    /// Capture the live workspace into slot `index`.
    pub fn save(&mut self, index: usize) -> bool {
        if index >= self.store.len() {
            return false;
        }
        let snapshot = self.capture_now();
        self.store.put(index, snapshot)
    }

    /// Save the live workspace, tear it down, and recreate workspace
    /// `index` from its snapshot. Each step completes before the next.
    pub fn switch_to(&mut self, index: usize) -> Option<SwitchReport> {
        if index >= self.store.len() {
            log::debug!("No workspace {}", index + 1);
            return None;
        }
        let outgoing = self.store.current();
        if index == outgoing {
            return Some(SwitchReport {
                restored: self.engine.len(),
                focused: self.coordinator.focused(),
                ..Default::default()
            });
        }

        let snapshot = self.capture_now();
        self.store.put(outgoing, snapshot);
        self.teardown();

        let incoming = self
            .store
            .take(index)
            .unwrap_or_else(|| self.blank_snapshot());
        self.store.set_current(index);
        let report = self.rebuild(incoming);
        log::info!(
            "Switched workspace {} -> {} ({} panes, {} skipped)",
            outgoing + 1,
            index + 1,
            report.restored,
            report.skipped.len()
        );
        Some(report)
    }

    /// Queue focus for `pane`; it runs on the next `settle`.
    pub fn apply_focus_when_ready(&mut self, pane: PaneId) {
        self.deferred.push(Deferred::ApplyFocus { pane });
    }

    /// Run queued focus work. Items whose pane has gone away are dropped.
    /// Returns how many items ran.
    pub fn settle(&mut self) -> usize {
        let mut ran = 0;
        while let Some(item) = self.deferred.pop() {
            if !self.panes.contains(item.pane()) {
                log::debug!("Dropping {:?}: pane is gone", item);
                continue;
            }
            ran += 1;
            match item {
                Deferred::ApplyFocus { pane } => {
                    self.pump_changes();
                    if let Some(prev) = self.coordinator.focused() {
                        self.history.record_current(prev, &self.controls);
                    }
                    self.coordinator
                        .focus(pane, &mut self.panes, &mut self.controls);
                    self.router.set_focused(self.coordinator.focused());
                    self.deferred.push(Deferred::RestoreControl { pane });
                }
                Deferred::RestoreControl { pane } => {
                    if self.coordinator.focused() != Some(pane) {
                        continue;
                    }
                    let recorded = self.history.lookup(pane, &self.controls).is_some();
                    if (recorded || self.controls.keyboard_pane() != Some(pane))
                        && !self.history.restore(pane, &mut self.controls)
                    {
                        log::debug!("Pane {} has no control to restore", pane);
                    }
                }
            }
        }
        ran
    }

    // ── Commands and input ──────────────────────

    /// Carry out a bound command. Returns false when it had nothing to act on.
    pub fn execute(&mut self, command: Command) -> bool {
        match command {
            Command::Navigate(direction) => self.navigate(direction) != FocusOutcome::Ignored,
            Command::FocusNext => self.cycle_focus(true) != FocusOutcome::Ignored,
            Command::FocusPrev => self.cycle_focus(false) != FocusOutcome::Ignored,
            Command::SwitchWorkspace(index) => self.switch_to(index).is_some(),
            Command::ClosePane => match self.coordinator.focused() {
                Some(id) => self.close_pane(id),
                None => false,
            },
            Command::OpenPane(kind) => self.open_pane(&kind).is_some(),
            Command::CycleLayoutPin => {
                self.cycle_layout_pin();
                true
            }
            Command::Pane(name) => {
                let Some(pane) = self.coordinator.focused() else {
                    return false;
                };
                let handled = match self.panes.get_mut(pane) {
                    Some(content) => content.handle_command(&name, &mut self.controls),
                    None => false,
                };
                self.pump_changes();
                handled
            }
        }
    }

    /// Feed one input event through the router and act on the result. The
    /// returned action tells the caller where unbound input should go.
    pub fn handle_event(&mut self, event: InputEvent) -> Action {
        if let InputEvent::Resize { size } = event {
            self.window = size;
        }
        let rects = self.layout();
        let pane_type = self
            .coordinator
            .focused()
            .and_then(|id| self.engine.pane(id))
            .map(|handle| handle.kind.clone());
        let ctx = DispatchContext {
            pane_type: pane_type.as_deref(),
            typing: self.controls.is_typing(),
        };

        let action = self.router.process(event, &rects, ctx);
        match &action {
            Action::FocusPane(id) => {
                self.focus_pane(*id);
            }
            Action::Command(command) => {
                self.execute(command.clone());
            }
            Action::RouteToPane(_) | Action::None => {}
        }
        action
    }

    // ── Accessors ───────────────────────────────

    pub fn focused(&self) -> Option<PaneId> {
        self.coordinator.focused()
    }

    pub fn focused_control(&self) -> Option<ControlId> {
        self.controls.focused_control()
    }

    pub fn controls(&self) -> &ControlTree {
        &self.controls
    }

    pub fn engine(&self) -> &TilingEngine {
        &self.engine
    }

    pub fn panes(&self) -> &PaneSet {
        &self.panes
    }

    pub fn history(&self) -> &FocusHistory {
        &self.history
    }

    pub fn store(&self) -> &WorkspaceStore {
        &self.store
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn keymap_mut(&mut self) -> &mut KeybindingMap {
        self.router.keymap_mut()
    }

    pub fn registry(&self) -> &PaneRegistry {
        &self.registry
    }

    pub fn current_workspace(&self) -> usize {
        self.store.current()
    }

    pub fn pane_ids(&self) -> Vec<PaneId> {
        self.engine.pane_ids()
    }

    pub fn pane_type(&self, id: PaneId) -> Option<&str> {
        self.engine.pane(id).map(|handle| handle.kind.as_str())
    }

    pub fn context_ref(&self) -> Option<&str> {
        self.context_ref.as_deref()
    }

    pub fn set_context_ref(&mut self, context: Option<String>) {
        self.context_ref = context;
    }

    pub fn window_size(&self) -> Size {
        self.window
    }

    pub fn set_window_size(&mut self, size: Size) {
        self.window = size;
    }

    /// Pixel rects of the visible panes for the current window size.
    pub fn layout(&self) -> Vec<(PaneId, Rect)> {
        self.engine.compute(self.window)
    }

    // ── Internals ───────────────────────────────

    fn alloc_id(&mut self) -> PaneId {
        while self.panes.contains(self.next_id) {
            self.next_id += 1;
        }
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a pane to the tiling set, then let it build its controls.
    fn install(&mut self, id: PaneId, kind: &str, content: Box<dyn PaneContent>) {
        self.engine.add_pane(PaneHandle::new(id, kind));
        self.panes.insert(id, content);
        let accepts = match self.panes.get_mut(id) {
            Some(content) => {
                content.initialize(id, &mut self.controls);
                content.accepts_keyboard_focus()
            }
            None => false,
        };
        let focusable = accepts || self.controls.first_focusable(id).is_some();
        self.engine.set_focusable(id, focusable);
        self.next_id = self.next_id.max(id + 1);
    }

    fn teardown(&mut self) {
        self.deferred.clear();
        self.coordinator.clear(&mut self.panes);
        self.router.set_focused(None);
        for handle in self.engine.clear() {
            if let Some(mut content) = self.panes.remove(handle.id) {
                content.dispose();
            }
            self.controls.remove_pane(handle.id);
        }
        self.controls.take_changes();
        self.controls.clear_keyboard_focus();
        self.history.clear();
        self.context_ref = None;
    }

    /// Recreate a workspace from its snapshot. Unknown pane types are
    /// skipped; the rest of the workspace still comes back.
    fn rebuild(&mut self, snapshot: WorkspaceSnapshot) -> SwitchReport {
        let mut report = SwitchReport::default();
        self.engine.pin_layout(snapshot.layout_pin);

        let mut created: Vec<Option<PaneId>> = Vec::with_capacity(snapshot.len());
        for (index, kind) in snapshot.pane_types.iter().enumerate() {
            let Some(content) = self.registry.create(kind) else {
                log::warn!("Skipping unknown pane type {:?}", kind);
                report.skipped.push(kind.clone());
                created.push(None);
                continue;
            };

            let saved = snapshot.saved_id(index);
            let id = match saved {
                Some(id) if !self.panes.contains(id) => id,
                _ => self.alloc_id(),
            };
            self.install(id, kind, content);

            if let Some(blob) = saved.and_then(|s| snapshot.pane_states.get(&s)) {
                if let Some(content) = self.panes.get_mut(id) {
                    content.restore_state(blob, &mut self.controls);
                }
            }
            if let Some(memo) = saved.and_then(|s| snapshot.focus_blobs.get(&s)) {
                self.history.adopt(id, memo, &self.controls);
            }
            if snapshot.hidden.contains(&index) {
                self.engine.set_visible(id, false);
            }
            created.push(Some(id));
        }

        self.engine.relayout();
        self.context_ref = snapshot.context_ref.clone();

        let live: Vec<PaneId> = created.iter().flatten().copied().collect();
        let target = snapshot
            .focused_index
            .and_then(|i| created.get(i).copied().flatten())
            .or_else(|| live.iter().copied().find(|&id| self.engine.is_navigable(id)))
            .or_else(|| live.first().copied());
        if let Some(pane) = target {
            self.apply_focus_when_ready(pane);
        }
        self.settle();

        report.restored = live.len();
        report.focused = self.coordinator.focused();
        report
    }

    fn blank_snapshot(&self) -> WorkspaceSnapshot {
        WorkspaceSnapshot {
            layout_pin: self.default_pin,
            ..Default::default()
        }
    }

    /// Pane to focus after the one at `index` went away or was hidden.
    fn successor(&self, index: usize) -> Option<PaneId> {
        let navigable: Vec<(usize, PaneId)> = self
            .engine
            .panes()
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_navigable())
            .map(|(i, p)| (i, p.id))
            .collect();
        navigable
            .iter()
            .find(|(i, _)| *i >= index)
            .or_else(|| navigable.last())
            .map(|&(_, id)| id)
    }

    fn transfer<F>(&mut self, f: F) -> FocusOutcome
    where
        F: FnOnce(&mut FocusCoordinator, &TilingEngine, &mut PaneSet, &mut ControlTree) -> FocusOutcome,
    {
        self.pump_changes();
        if let Some(prev) = self.coordinator.focused() {
            self.history.record_current(prev, &self.controls);
        }
        let outcome = f(
            &mut self.coordinator,
            &self.engine,
            &mut self.panes,
            &mut self.controls,
        );
        if let FocusOutcome::Focused {
            pane,
            changed: true,
            ..
        } = outcome
        {
            self.restore_if_recorded(pane);
        }
        self.router.set_focused(self.coordinator.focused());
        outcome
    }

    fn restore_if_recorded(&mut self, pane: PaneId) {
        if self.history.lookup(pane, &self.controls).is_some() {
            self.history.restore(pane, &mut self.controls);
        }
    }

    /// Feed user edits to focus history.
    fn pump_changes(&mut self) {
        for id in self.controls.take_changes() {
            self.history.observe_change(id, &self.controls);
        }
    }
}
