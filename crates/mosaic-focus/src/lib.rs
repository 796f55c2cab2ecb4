// Focus: which pane is active, where keyboard focus lands inside it, and
// what each pane's last-focused control looked like when focus left.

mod coordinator;
mod history;

pub use coordinator::{FocusChange, FocusCoordinator, FocusObserver, FocusOutcome, KeyboardLanding};
pub use history::{FocusHistory, FocusMemo, FocusRecord};
