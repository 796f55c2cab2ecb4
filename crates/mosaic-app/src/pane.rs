// Demo pane types: a note editor, a task list and a clock.

use mosaic_core::{ControlId, ControlKind, ControlTree, PaneId};
use mosaic_workspace::{PaneContent, PaneRegistry};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub fn registry() -> PaneRegistry {
    let mut registry = PaneRegistry::new();
    registry.register("notes", || Box::new(NotesPane::default()) as Box<dyn PaneContent>);
    registry.register("tasks", || Box::new(TasksPane::default()) as Box<dyn PaneContent>);
    registry.register("clock", || Box::new(ClockPane::default()) as Box<dyn PaneContent>);
    registry
}

// ──────────────────────────────────────────────
// Notes
// ──────────────────────────────────────────────

#[derive(Default, Serialize, Deserialize)]
struct Note {
    title: String,
    body: String,
}

#[derive(Default)]
pub struct NotesPane {
    id: PaneId,
    title: Option<ControlId>,
    body: Option<ControlId>,
    note: Note,
}

impl PaneContent for NotesPane {
    fn pane_type(&self) -> &str {
        "notes"
    }

    fn initialize(&mut self, id: PaneId, controls: &mut ControlTree) {
        self.id = id;
        self.title = Some(controls.insert(id, ControlKind::TextInput));
        self.body = Some(controls.insert(id, ControlKind::TextArea));
    }

    fn save_state(&self, _controls: &ControlTree) -> Option<Value> {
        serde_json::to_value(&self.note).ok()
    }

    fn restore_state(&mut self, blob: &Value, controls: &mut ControlTree) {
        match serde_json::from_value::<Note>(blob.clone()) {
            Ok(note) => self.note = note,
            Err(e) => {
                log::warn!("notes pane {}: bad saved state: {}", self.id, e);
                return;
            }
        }
        // Loading text moves the cursors; that is not a user edit.
        let ends = [
            (self.title, self.note.title.len()),
            (self.body, self.note.body.len()),
        ];
        controls.with_changes_suppressed(|controls| {
            for (control, end) in ends {
                if let Some(id) = control {
                    controls.update_state(id, |s| s.cursor = Some(end));
                }
            }
        });
    }

    fn dispose(&mut self) {
        log::debug!("notes pane {} disposed", self.id);
    }

    fn on_active_changed(&mut self, active: bool) {
        log::debug!("notes pane {} active={}", self.id, active);
    }
}

// ──────────────────────────────────────────────
// Tasks
// ──────────────────────────────────────────────

#[derive(Clone, Serialize, Deserialize)]
struct Task {
    title: String,
    done: bool,
}

#[derive(Default)]
pub struct TasksPane {
    id: PaneId,
    list: Option<ControlId>,
    tasks: Vec<Task>,
}

impl TasksPane {
    fn selected(&self, controls: &ControlTree) -> Option<usize> {
        let list = self.list?;
        let cursor = controls.state(list)?.cursor.unwrap_or(0);
        (cursor < self.tasks.len()).then_some(cursor)
    }

    fn move_cursor(&self, controls: &mut ControlTree, forward: bool) -> bool {
        let Some(list) = self.list else {
            return false;
        };
        let last = self.tasks.len().saturating_sub(1);
        controls.update_state(list, |s| {
            let at = s.cursor.unwrap_or(0);
            s.cursor = Some(if forward { (at + 1).min(last) } else { at.saturating_sub(1) });
        })
    }
}

impl PaneContent for TasksPane {
    fn pane_type(&self) -> &str {
        "tasks"
    }

    fn initialize(&mut self, id: PaneId, controls: &mut ControlTree) {
        self.id = id;
        self.list = Some(controls.insert(id, ControlKind::List));
        if self.tasks.is_empty() {
            self.tasks = ["triage inbox", "review layout", "ship"]
                .iter()
                .map(|title| Task {
                    title: title.to_string(),
                    done: false,
                })
                .collect();
        }
    }

    fn save_state(&self, _controls: &ControlTree) -> Option<Value> {
        serde_json::to_value(&self.tasks).ok()
    }

    fn restore_state(&mut self, blob: &Value, _controls: &mut ControlTree) {
        match serde_json::from_value::<Vec<Task>>(blob.clone()) {
            Ok(tasks) => self.tasks = tasks,
            Err(e) => log::warn!("tasks pane {}: bad saved state: {}", self.id, e),
        }
    }

    fn handle_command(&mut self, name: &str, controls: &mut ControlTree) -> bool {
        match name {
            "next" => self.move_cursor(controls, true),
            "prev" => self.move_cursor(controls, false),
            "toggle" => match self.selected(controls) {
                Some(i) => {
                    self.tasks[i].done = !self.tasks[i].done;
                    log::info!("task {:?} done={}", self.tasks[i].title, self.tasks[i].done);
                    true
                }
                None => false,
            },
            _ => false,
        }
    }
}

// ──────────────────────────────────────────────
// Clock
// ──────────────────────────────────────────────

/// Display only. Takes pane focus when clicked but has nothing for the
/// keyboard, so it is skipped by directional navigation.
#[derive(Default)]
pub struct ClockPane {
    id: PaneId,
}

impl PaneContent for ClockPane {
    fn pane_type(&self) -> &str {
        "clock"
    }

    fn initialize(&mut self, id: PaneId, _controls: &mut ControlTree) {
        self.id = id;
    }

    fn on_active_changed(&mut self, active: bool) {
        log::debug!("clock pane {} active={}", self.id, active);
    }
}
