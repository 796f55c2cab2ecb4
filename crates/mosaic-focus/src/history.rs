use std::collections::HashMap;

use mosaic_core::{ControlId, ControlKind, ControlState, ControlTree, PaneId};
use serde::{Deserialize, Serialize};

/// The last-focused control of a pane and its transient state at the time.
/// `control` is a generational key: once the control is removed, the record
/// reads as absent.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusRecord {
    pub pane: PaneId,
    pub control: ControlId,
    pub kind: ControlKind,
    pub state: ControlState,
}

/// Persistable form of a `FocusRecord`. Control ids do not survive pane
/// recreation, so the control is named by its position in the pane's tab
/// order instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusMemo {
    pub slot: usize,
    pub kind: ControlKind,
    #[serde(default)]
    pub state: ControlState,
}

/// One record per pane, overwritten on every capture.
#[derive(Debug, Default)]
pub struct FocusHistory {
    records: HashMap<PaneId, FocusRecord>,
}

impl FocusHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture `control` as the pane's last-focused control. Fails for stale
    /// controls and for controls that belong to another pane.
    pub fn record(&mut self, pane: PaneId, control: ControlId, controls: &ControlTree) -> bool {
        let Some(c) = controls.get(control) else {
            return false;
        };
        if c.pane != pane {
            return false;
        }
        let state = c.state.masked(c.kind.capabilities());
        self.records.insert(
            pane,
            FocusRecord {
                pane,
                control,
                kind: c.kind,
                state,
            },
        );
        true
    }

    /// Record whichever control of `pane` holds keyboard focus right now.
    pub fn record_current(&mut self, pane: PaneId, controls: &ControlTree) -> bool {
        match controls.focused_control() {
            Some(id) if controls.get(id).is_some_and(|c| c.pane == pane) => {
                self.record(pane, id, controls)
            }
            _ => false,
        }
    }

    /// Refresh the snapshot after a user edit. Only the focused control or
    /// the control already on record for its pane is captured.
    pub fn observe_change(&mut self, control: ControlId, controls: &ControlTree) {
        let Some(c) = controls.get(control) else {
            return;
        };
        let tracked = controls.focused_control() == Some(control)
            || self.records.get(&c.pane).is_some_and(|r| r.control == control);
        if tracked {
            self.record(c.pane, control, controls);
        }
    }

    /// The pane's record, if its control still exists. Stale records are
    /// dropped here rather than swept eagerly.
    pub fn lookup(&mut self, pane: PaneId, controls: &ControlTree) -> Option<&FocusRecord> {
        let stale = self
            .records
            .get(&pane)
            .is_some_and(|r| !controls.contains(r.control));
        if stale {
            self.records.remove(&pane);
            return None;
        }
        self.records.get(&pane)
    }

    /// Put keyboard focus back inside `pane`: the recorded control with its
    /// state, else the first focusable control. Returns false, leaving focus
    /// alone, when the pane has nothing focusable.
    pub fn restore(&mut self, pane: PaneId, controls: &mut ControlTree) -> bool {
        if let Some(record) = self.lookup(pane, controls).cloned() {
            if controls.focus_control(record.control) {
                controls.apply_state(record.control, &record.state);
                return true;
            }
        }
        match controls.first_focusable(pane) {
            Some(id) => controls.focus_control(id),
            None => {
                log::debug!("nothing to restore focus to in pane {}", pane);
                false
            }
        }
    }

    pub fn forget(&mut self, pane: PaneId) -> Option<FocusRecord> {
        self.records.remove(&pane)
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Number of stored records, stale ones included until looked up.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // ── Carrying records across recreation ──────

    pub fn export(&mut self, pane: PaneId, controls: &ControlTree) -> Option<FocusMemo> {
        let record = self.lookup(pane, controls)?;
        let slot = controls.ordinal(record.control)?;
        Some(FocusMemo {
            slot,
            kind: record.kind,
            state: record.state.clone(),
        })
    }

    /// Re-attach a memo to the recreated pane. The control at the memo's slot
    /// must still be of the same kind.
    pub fn adopt(&mut self, pane: PaneId, memo: &FocusMemo, controls: &ControlTree) -> bool {
        let Some(control) = controls.control_at(pane, memo.slot) else {
            log::debug!("pane {} has no control at slot {}", pane, memo.slot);
            return false;
        };
        let Some(c) = controls.get(control) else {
            return false;
        };
        if c.kind != memo.kind {
            log::debug!(
                "pane {} slot {} is {:?}, memo expected {:?}",
                pane,
                memo.slot,
                c.kind,
                memo.kind
            );
            return false;
        }
        self.records.insert(
            pane,
            FocusRecord {
                pane,
                control,
                kind: c.kind,
                state: memo.state.masked(c.kind.capabilities()),
            },
        );
        true
    }
}
