#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::session::{load_session_from, save_session_to};
    use crate::settings::{build_keybinding_map, load_settings_from, save_settings_to};
    use crate::{
        Deferred, DeferredQueue, Desk, KeybindingOverride, MosaicSettings, PaneContent,
        PaneRegistry, Session, WorkspaceSnapshot, WorkspaceStore,
    };
    use mosaic_core::{
        ControlId, ControlKind, ControlTree, Direction, InputEvent, Key, Modifiers, PaneId, Vec2,
    };
    use mosaic_focus::FocusOutcome;
    use mosaic_input::{Action, Command, Scope};
    use mosaic_layout::{LayoutMode, LayoutPin, WrapPolicy};
    use serde_json::{json, Value};

    type Journal = Rc<RefCell<Vec<String>>>;

    // ── Test panes ──────────────────────────────

    /// A title input and a body text area. Saves its text as the pane blob.
    struct Notes {
        id: PaneId,
        body: Option<ControlId>,
        text: String,
        journal: Journal,
    }

    impl PaneContent for Notes {
        fn pane_type(&self) -> &str {
            "notes"
        }

        fn initialize(&mut self, id: PaneId, controls: &mut ControlTree) {
            self.id = id;
            controls.insert(id, ControlKind::TextInput);
            self.body = Some(controls.insert(id, ControlKind::TextArea));
        }

        fn save_state(&self, _controls: &ControlTree) -> Option<Value> {
            Some(json!({ "text": self.text }))
        }

        fn restore_state(&mut self, blob: &Value, controls: &mut ControlTree) {
            self.text = blob["text"].as_str().unwrap_or_default().to_string();
            let end = self.text.len();
            if let Some(body) = self.body {
                controls.with_changes_suppressed(|c| {
                    c.update_state(body, |s| s.cursor = Some(end));
                });
            }
        }

        fn dispose(&mut self) {
            self.journal.borrow_mut().push(format!("dispose {}", self.id));
        }

        fn on_active_changed(&mut self, active: bool) {
            let word = if active { "on" } else { "off" };
            self.journal.borrow_mut().push(format!("{} {}", self.id, word));
        }
    }

    /// A single list; `next` moves its cursor.
    struct Tasks {
        list: Option<ControlId>,
    }

    impl PaneContent for Tasks {
        fn pane_type(&self) -> &str {
            "tasks"
        }

        fn initialize(&mut self, id: PaneId, controls: &mut ControlTree) {
            self.list = Some(controls.insert(id, ControlKind::List));
        }

        fn handle_command(&mut self, name: &str, controls: &mut ControlTree) -> bool {
            match (name, self.list) {
                ("next", Some(list)) => {
                    controls.update_state(list, |s| s.cursor = Some(s.cursor.unwrap_or(0) + 1))
                }
                _ => false,
            }
        }
    }

    /// Display only: nothing can take keyboard focus.
    struct Clock;

    impl PaneContent for Clock {
        fn pane_type(&self) -> &str {
            "clock"
        }

        fn initialize(&mut self, _id: PaneId, _controls: &mut ControlTree) {}
    }

    fn registry(journal: &Journal) -> PaneRegistry {
        let mut registry = PaneRegistry::new();
        let journal = Rc::clone(journal);
        registry.register("notes", move || {
            Box::new(Notes {
                id: 0,
                body: None,
                text: "draft".to_string(),
                journal: Rc::clone(&journal),
            }) as Box<dyn PaneContent>
        });
        registry.register("tasks", || Box::new(Tasks { list: None }) as Box<dyn PaneContent>);
        registry.register("clock", || Box::new(Clock) as Box<dyn PaneContent>);
        registry
    }

    fn desk_with(settings: &MosaicSettings) -> (Desk, Journal) {
        let journal: Journal = Rc::new(RefCell::new(Vec::new()));
        let desk = Desk::new(registry(&journal), settings);
        (desk, journal)
    }

    fn desk() -> (Desk, Journal) {
        desk_with(&MosaicSettings::default())
    }

    fn body_of(desk: &Desk, pane: PaneId) -> ControlId {
        desk.controls().controls_of(pane)[1]
    }

    fn cursor_of(desk: &Desk, control: ControlId) -> Option<usize> {
        desk.controls().state(control).and_then(|s| s.cursor)
    }

    fn key(key: Key, modifiers: Modifiers) -> InputEvent {
        InputEvent::KeyPress { key, modifiers }
    }

    fn alt() -> Modifiers {
        Modifiers {
            alt: true,
            ..Default::default()
        }
    }

    // ──────────────────────────────────────────
    // Round trips
    // ──────────────────────────────────────────

    #[test]
    fn round_trip_restores_focused_cursor() {
        let (mut desk, _) = desk();
        let first = desk.open_pane("notes").unwrap();
        let second = desk.open_pane("notes").unwrap();
        assert_eq!(desk.focused(), Some(second));

        let body = body_of(&desk, second);
        assert!(desk.focus_control(body));
        desk.update_control(body, |s| s.cursor = Some(7));

        let away = desk.switch_to(1).unwrap();
        assert_eq!(away.restored, 0);
        assert_eq!(desk.focused(), None);
        for kind in ["notes", "tasks", "clock"] {
            desk.open_pane(kind);
        }
        assert_eq!(desk.pane_ids().len(), 3);

        let back = desk.switch_to(0).unwrap();
        assert!(back.skipped.is_empty());
        assert_eq!(desk.pane_ids(), vec![first, second]);
        assert_eq!(desk.focused(), Some(second));

        let body = body_of(&desk, second);
        assert_eq!(desk.focused_control(), Some(body));
        // The memo wins over the cursor the pane put at end of text on load.
        assert_eq!(cursor_of(&desk, body), Some(7));
    }

    #[test]
    fn round_trip_in_both_directions() {
        let (mut desk, _) = desk();
        desk.open_pane("notes");
        desk.switch_to(2).unwrap();
        let ids: Vec<PaneId> = ["tasks", "notes", "clock"]
            .iter()
            .filter_map(|kind| desk.open_pane(kind))
            .collect();
        desk.focus_pane(ids[1]);
        let before = desk.capture_now();

        desk.switch_to(0).unwrap();
        desk.switch_to(2).unwrap();
        let after = desk.capture_now();

        assert_eq!(after.pane_types, before.pane_types);
        assert_eq!(after.pane_ids, before.pane_ids);
        assert_eq!(after.focused_index, Some(1));
        assert_eq!(after.focus_blobs, before.focus_blobs);
        assert_eq!(desk.focused(), Some(ids[1]));
    }

    #[test]
    fn capture_includes_types_focus_and_blobs() {
        let (mut desk, _) = desk();
        let notes = desk.open_pane("notes").unwrap();
        let tasks = desk.open_pane("tasks").unwrap();
        desk.set_context_ref(Some("project-42".into()));
        desk.focus_pane(notes);

        let snapshot = desk.capture_now();
        assert_eq!(snapshot.pane_types, vec!["notes", "tasks"]);
        assert_eq!(snapshot.pane_ids, vec![notes, tasks]);
        assert_eq!(snapshot.focused_index, Some(0));
        assert_eq!(snapshot.focused_pane_id(), Some(notes));
        assert_eq!(snapshot.context_ref.as_deref(), Some("project-42"));
        assert_eq!(snapshot.pane_states[&notes]["text"], "draft");
        assert_eq!(snapshot.focus_blobs[&notes].slot, 0);
        assert!(snapshot.focus_blobs.contains_key(&tasks));
    }

    #[test]
    fn snapshot_serializes_camel_case() {
        let (mut desk, _) = desk();
        desk.open_pane("tasks");
        desk.pin_layout(Some(LayoutPin::Grid));
        let json = serde_json::to_value(desk.capture_now()).unwrap();

        for field in ["paneTypes", "paneIds", "focusedIndex", "focusBlobs", "paneStates", "layoutPin"] {
            assert!(json.get(field).is_some(), "missing {field}");
        }
        assert!(json.get("contextRef").is_none());
        let back: WorkspaceSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(back.layout_pin, Some(LayoutPin::Grid));
    }

    #[test]
    fn context_pin_and_hidden_panes_survive_switch() {
        let (mut desk, _) = desk();
        let ids: Vec<PaneId> = (0..3).filter_map(|_| desk.open_pane("tasks")).collect();
        desk.set_context_ref(Some("inbox".into()));
        desk.pin_layout(Some(LayoutPin::Grid));
        desk.set_pane_visible(ids[2], false);

        desk.switch_to(1).unwrap();
        assert_eq!(desk.context_ref(), None);
        desk.switch_to(0).unwrap();

        assert_eq!(desk.context_ref(), Some("inbox"));
        assert_eq!(desk.engine().pin(), Some(LayoutPin::Grid));
        assert_eq!(desk.engine().mode(), LayoutMode::Grid(2));
        assert!(!desk.engine().pane(ids[2]).unwrap().visible);
    }

    #[test]
    fn switch_to_same_or_missing_workspace() {
        let (mut desk, journal) = desk();
        let pane = desk.open_pane("notes").unwrap();
        journal.borrow_mut().clear();

        let report = desk.switch_to(0).unwrap();
        assert_eq!(report.restored, 1);
        assert_eq!(report.focused, Some(pane));
        assert!(journal.borrow().is_empty());

        assert!(desk.switch_to(4).is_none());
        assert_eq!(desk.current_workspace(), 0);
    }

    #[test]
    fn switch_disposes_every_pane() {
        let (mut desk, journal) = desk();
        let a = desk.open_pane("notes").unwrap();
        let b = desk.open_pane("notes").unwrap();
        journal.borrow_mut().clear();

        desk.switch_to(1).unwrap();
        let log = journal.borrow();
        assert!(log.contains(&format!("{b} off")));
        assert!(log.contains(&format!("dispose {a}")));
        assert!(log.contains(&format!("dispose {b}")));
        assert!(desk.panes().is_empty());
        assert!(desk.controls().is_empty());
    }

    #[test]
    fn unknown_pane_type_is_skipped() {
        let journal: Journal = Rc::new(RefCell::new(Vec::new()));
        let snapshot = WorkspaceSnapshot {
            pane_types: vec!["notes".into(), "ghost".into(), "tasks".into()],
            pane_ids: vec![1, 2, 3],
            focused_index: Some(1),
            ..Default::default()
        };
        let session = Session {
            current: 0,
            workspaces: vec![Some(snapshot)],
        };

        let (desk, report) =
            Desk::from_session(registry(&journal), &MosaicSettings::default(), session);

        assert_eq!(report.skipped, vec!["ghost".to_string()]);
        assert_eq!(report.restored, 2);
        assert_eq!(desk.pane_ids(), vec![1, 3]);
        // The saved focus was on the skipped pane: first pane instead.
        assert_eq!(desk.focused(), Some(1));
        assert_eq!(desk.store().len(), 4);
    }

    #[test]
    fn empty_workspace_starts_with_default_pin() {
        let settings = MosaicSettings {
            layout_pin: Some(LayoutPin::MasterStack),
            ..Default::default()
        };
        let (mut desk, _) = desk_with(&settings);
        desk.switch_to(3).unwrap();
        assert_eq!(desk.engine().pin(), Some(LayoutPin::MasterStack));
    }

    // ──────────────────────────────────────────
    // Focus through the desk
    // ──────────────────────────────────────────

    #[test]
    fn active_notifications_fire_once_per_transition() {
        let (mut desk, journal) = desk();
        let a = desk.open_pane("notes").unwrap();
        let b = desk.open_pane("notes").unwrap();
        desk.focus_pane(b);
        desk.focus_pane(a);

        assert_eq!(
            *journal.borrow(),
            vec![
                format!("{a} on"),
                format!("{a} off"),
                format!("{b} on"),
                format!("{b} off"),
                format!("{a} on"),
            ]
        );
        assert_eq!(desk.panes().active_panes(), vec![a]);
    }

    #[test]
    fn two_by_two_scenario() {
        let (mut desk, _) = desk();
        let ids: Vec<PaneId> = (0..4).filter_map(|_| desk.open_pane("tasks")).collect();
        assert_eq!(desk.engine().mode(), LayoutMode::Grid(4));

        desk.focus_pane(ids[0]);
        assert!(desk.execute(Command::Navigate(Direction::Right)));
        assert_eq!(desk.focused(), Some(ids[1]));
        assert!(desk.execute(Command::Navigate(Direction::Down)));
        assert_eq!(desk.focused(), Some(ids[3]));
        assert!(!desk.execute(Command::Navigate(Direction::Right)));
        assert_eq!(desk.focused(), Some(ids[3]));
    }

    #[test]
    fn single_pane_navigation_is_noop() {
        let (mut desk, _) = desk();
        let only = desk.open_pane("notes").unwrap();
        for dir in Direction::ALL {
            assert_eq!(desk.navigate(dir), FocusOutcome::Ignored);
        }
        assert_eq!(desk.focused(), Some(only));
    }

    #[test]
    fn wrap_policy_comes_from_settings() {
        let mut settings = MosaicSettings::default();
        settings.navigation.wrap = WrapPolicy::Wrap;
        let (mut desk, _) = desk_with(&settings);
        let left = desk.open_pane("tasks").unwrap();
        desk.open_pane("tasks").unwrap();

        desk.navigate(Direction::Right);
        assert_eq!(desk.focused(), Some(left));
    }

    #[test]
    fn returning_to_pane_restores_its_control() {
        let (mut desk, _) = desk();
        let notes = desk.open_pane("notes").unwrap();
        let body = body_of(&desk, notes);
        desk.focus_control(body);
        desk.update_control(body, |s| s.cursor = Some(3));

        desk.open_pane("tasks");
        assert_ne!(desk.focused_control(), Some(body));

        desk.focus_pane(notes);
        assert_eq!(desk.focused_control(), Some(body));
        assert_eq!(cursor_of(&desk, body), Some(3));
    }

    #[test]
    fn closing_focused_pane_hands_focus_on() {
        let (mut desk, journal) = desk();
        let a = desk.open_pane("notes").unwrap();
        let b = desk.open_pane("notes").unwrap();
        let c = desk.open_pane("notes").unwrap();

        desk.focus_pane(b);
        assert!(desk.close_pane(b));
        assert_eq!(desk.focused(), Some(c));
        assert!(journal.borrow().contains(&format!("dispose {b}")));

        assert!(desk.execute(Command::ClosePane));
        assert_eq!(desk.focused(), Some(a));
        assert!(desk.close_pane(a));
        assert_eq!(desk.focused(), None);
        assert!(!desk.execute(Command::ClosePane));
        assert!(!desk.close_pane(a));
    }

    #[test]
    fn closed_pane_leaves_no_usable_history() {
        let (mut desk, _) = desk();
        let notes = desk.open_pane("notes").unwrap();
        let body = body_of(&desk, notes);
        desk.focus_control(body);
        desk.update_control(body, |s| s.cursor = Some(2));
        desk.open_pane("tasks");
        let recorded = desk.history().len();

        desk.close_pane(notes);
        assert_eq!(desk.history().len(), recorded - 1);
        assert!(!desk.controls().contains(body));
        assert!(!desk.focus_control(body));
    }

    #[test]
    fn hiding_focused_pane_moves_focus() {
        let (mut desk, _) = desk();
        let a = desk.open_pane("tasks").unwrap();
        let b = desk.open_pane("tasks").unwrap();
        desk.set_pane_visible(b, false);
        assert_eq!(desk.focused(), Some(a));
        desk.set_pane_visible(a, false);
        assert_eq!(desk.focused(), None);
        assert!(desk.panes().active_panes().is_empty());
    }

    #[test]
    fn hiding_the_last_pane_releases_the_keyboard() {
        let (mut desk, _) = desk();
        let notes = desk.open_pane("notes").unwrap();
        let title = desk.controls().controls_of(notes)[0];
        assert!(desk.controls().is_typing());

        desk.set_pane_visible(notes, false);
        assert_eq!(desk.focused(), None);
        assert_eq!(desk.focused_control(), None);
        assert!(!desk.controls().is_typing());
        // Plain keys are shortcuts again.
        let action = desk.handle_event(key(Key::Char('l'), Modifiers::default()));
        assert_eq!(action, Action::Command(Command::Navigate(Direction::Right)));

        desk.set_pane_visible(notes, true);
        desk.focus_pane(notes);
        assert_eq!(desk.focused_control(), Some(title));
    }

    #[test]
    fn clock_pane_takes_pane_focus_without_keyboard() {
        let (mut desk, _) = desk();
        let notes = desk.open_pane("notes").unwrap();
        let clock = desk.open_pane("clock").unwrap();
        assert_eq!(desk.focused(), Some(clock));
        // Keyboard focus stayed in the notes pane.
        assert_eq!(desk.controls().keyboard_pane(), Some(notes));
        assert!(!desk.engine().pane(clock).unwrap().focusable);
    }

    #[test]
    fn focus_at_hit_tests_the_layout() {
        let (mut desk, _) = desk();
        let left = desk.open_pane("tasks").unwrap();
        let right = desk.open_pane("tasks").unwrap();
        desk.focus_at(Vec2::new(100.0, 100.0));
        assert_eq!(desk.focused(), Some(left));
        desk.focus_at(Vec2::new(1000.0, 100.0));
        assert_eq!(desk.focused(), Some(right));
    }

    // ──────────────────────────────────────────
    // Deferred focus
    // ──────────────────────────────────────────

    #[test]
    fn deferred_focus_waits_for_settle() {
        let (mut desk, _) = desk();
        let a = desk.open_pane("tasks").unwrap();
        let b = desk.open_pane("tasks").unwrap();
        desk.apply_focus_when_ready(a);
        assert_eq!(desk.focused(), Some(b));
        assert_eq!(desk.settle(), 2);
        assert_eq!(desk.focused(), Some(a));
    }

    #[test]
    fn deferred_focus_on_closed_pane_is_dropped() {
        let (mut desk, _) = desk();
        let a = desk.open_pane("tasks").unwrap();
        let b = desk.open_pane("tasks").unwrap();
        desk.apply_focus_when_ready(a);
        desk.apply_focus_when_ready(99);
        desk.close_pane(a);

        assert_eq!(desk.settle(), 0);
        assert_eq!(desk.focused(), Some(b));
    }

    #[test]
    fn deferred_queue_dedups_and_cancels() {
        let mut queue = DeferredQueue::new();
        queue.push(Deferred::ApplyFocus { pane: 1 });
        queue.push(Deferred::ApplyFocus { pane: 1 });
        queue.push(Deferred::RestoreControl { pane: 2 });
        assert_eq!(queue.len(), 2);
        queue.cancel(1);
        assert_eq!(queue.pop(), Some(Deferred::RestoreControl { pane: 2 }));
        assert!(queue.is_empty());
    }

    // ──────────────────────────────────────────
    // Input
    // ──────────────────────────────────────────

    #[test]
    fn typing_suppresses_letter_navigation() {
        let (mut desk, _) = desk();
        let tasks = desk.open_pane("tasks").unwrap();
        let notes = desk.open_pane("notes").unwrap();
        assert!(desk.controls().is_typing());

        let action = desk.handle_event(key(Key::Char('h'), Modifiers::default()));
        assert_eq!(action, Action::RouteToPane(notes));
        assert_eq!(desk.focused(), Some(notes));

        desk.handle_event(key(Key::Left, alt()));
        assert_eq!(desk.focused(), Some(tasks));

        // A list is not a text control: plain letters navigate again.
        desk.handle_event(key(Key::Char('l'), Modifiers::default()));
        assert_eq!(desk.focused(), Some(notes));
    }

    #[test]
    fn pane_scoped_binding_reaches_pane() {
        let settings = MosaicSettings {
            keybindings: vec![KeybindingOverride {
                action: "pane:next".into(),
                key: "n".into(),
                scope: "pane:tasks".into(),
                shift: false,
                ctrl: false,
                meta: false,
                alt: false,
            }],
            ..Default::default()
        };
        let (mut desk, _) = desk_with(&settings);
        let tasks = desk.open_pane("tasks").unwrap();
        let list = desk.controls().controls_of(tasks)[0];

        desk.handle_event(key(Key::Char('n'), Modifiers::default()));
        desk.handle_event(key(Key::Char('n'), Modifiers::default()));
        assert_eq!(cursor_of(&desk, list), Some(2));
    }

    #[test]
    fn workspace_switch_shortcut() {
        let (mut desk, _) = desk();
        desk.open_pane("tasks");
        let ctrl = Modifiers {
            ctrl: true,
            ..Default::default()
        };
        desk.handle_event(key(Key::Char('2'), ctrl));
        assert_eq!(desk.current_workspace(), 1);
        assert!(desk.pane_ids().is_empty());
    }

    #[test]
    fn cycle_layout_pin_command() {
        let (mut desk, _) = desk();
        for _ in 0..3 {
            desk.open_pane("tasks");
        }
        assert_eq!(desk.engine().mode(), LayoutMode::MasterStack);
        desk.execute(Command::CycleLayoutPin);
        assert_eq!(desk.engine().mode(), LayoutMode::Grid(3));
        desk.execute(Command::CycleLayoutPin);
        desk.execute(Command::CycleLayoutPin);
        assert_eq!(desk.engine().pin(), None);
    }

    #[test]
    fn open_unknown_type_fails() {
        let (mut desk, _) = desk();
        assert_eq!(desk.open_pane("ghost"), None);
        assert!(!desk.execute(Command::OpenPane("ghost".into())));
        assert!(desk.execute(Command::OpenPane("clock".into())));
    }

    // ──────────────────────────────────────────
    // Store, session and settings
    // ──────────────────────────────────────────

    #[test]
    fn store_take_consumes_once() {
        let mut store = WorkspaceStore::new(2);
        assert!(store.put(1, WorkspaceSnapshot::default()));
        assert!(!store.put(2, WorkspaceSnapshot::default()));
        assert!(store.peek(1).is_some());
        assert!(store.take(1).is_some());
        assert!(store.take(1).is_none());
        assert!(!store.set_current(5));
    }

    #[test]
    fn store_from_slots_pads_and_clamps() {
        let store = WorkspaceStore::from_slots(vec![None], 7, 3);
        assert_eq!(store.len(), 3);
        assert_eq!(store.current(), 0);
    }

    #[test]
    fn session_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mosaic").join("session.json");

        let (mut desk, _) = desk();
        desk.open_pane("tasks");
        let notes = desk.open_pane("notes").unwrap();
        let body = body_of(&desk, notes);
        desk.focus_control(body);
        desk.update_control(body, |s| s.cursor = Some(7));
        desk.switch_to(1).unwrap();
        let other = desk.open_pane("clock").unwrap();

        save_session_to(&path, &desk.checkpoint()).unwrap();
        let session = load_session_from(&path).unwrap();
        assert_eq!(session.current, 1);

        let journal: Journal = Rc::new(RefCell::new(Vec::new()));
        let (mut restored, report) =
            Desk::from_session(registry(&journal), &MosaicSettings::default(), session);
        assert_eq!(report.focused, Some(other));

        restored.switch_to(0).unwrap();
        assert_eq!(restored.focused(), Some(notes));
        let body = body_of(&restored, notes);
        assert_eq!(restored.focused_control(), Some(body));
        assert_eq!(cursor_of(&restored, body), Some(7));

        // New panes never collide with ids held by stored workspaces.
        let fresh = restored.open_pane("tasks").unwrap();
        assert!(fresh > other);
    }

    #[test]
    fn load_session_reports_missing_and_corrupt_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        assert!(load_session_from(&path).is_err());

        std::fs::write(&path, "{ not json").unwrap();
        let err = load_session_from(&path).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }

    #[test]
    fn settings_fill_defaults_for_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "navigation": { "wrap": "wrap" } }"#).unwrap();

        let settings = load_settings_from(&path).unwrap();
        assert_eq!(settings.workspace_count, 4);
        assert_eq!(settings.navigation.wrap, WrapPolicy::Wrap);
        assert_eq!(settings.seed_panes, vec!["notes".to_string()]);

        let out = dir.path().join("nested").join("settings.json");
        save_settings_to(&out, &settings).unwrap();
        assert_eq!(load_settings_from(&out).unwrap(), settings);
    }

    #[test]
    fn keybinding_overrides_skip_invalid_entries() {
        let good = KeybindingOverride::from_binding(
            &Scope::Workspace,
            &mosaic_input::Hotkey::ctrl(Key::Char('q')),
            &Command::ClosePane,
        );
        let bad = KeybindingOverride {
            action: "explode".into(),
            ..good.clone()
        };
        let settings = MosaicSettings {
            keybindings: vec![good, bad],
            ..Default::default()
        };

        let map = build_keybinding_map(&settings);
        let ctrl = Modifiers {
            ctrl: true,
            ..Default::default()
        };
        let (_, command) = map.lookup(&Scope::Workspace, Key::Char('q'), ctrl).unwrap();
        assert_eq!(*command, Command::ClosePane);
        assert!(map.lookup(&Scope::Workspace, Key::Char('w'), ctrl).is_none());
    }
}
