use std::collections::BTreeMap;

use mosaic_core::PaneId;
use mosaic_focus::FocusMemo;
use mosaic_layout::LayoutPin;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One workspace's arrangement, captured on switch-away and consumed on
/// switch-in. Map keys are the pane ids the workspace had when captured.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceSnapshot {
    pub pane_types: Vec<String>,
    #[serde(default)]
    pub pane_ids: Vec<PaneId>,
    #[serde(default)]
    pub focused_index: Option<usize>,
    #[serde(default)]
    pub focus_blobs: BTreeMap<PaneId, FocusMemo>,
    #[serde(default)]
    pub pane_states: BTreeMap<PaneId, Value>,
    /// Indices into `pane_types` of panes that were hidden.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hidden: Vec<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_pin: Option<LayoutPin>,
}

impl WorkspaceSnapshot {
    pub fn is_empty(&self) -> bool {
        self.pane_types.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pane_types.len()
    }

    pub fn focused_pane_id(&self) -> Option<PaneId> {
        self.focused_index
            .and_then(|i| self.pane_ids.get(i))
            .copied()
    }

    /// The id the pane at `index` had when captured.
    pub fn saved_id(&self, index: usize) -> Option<PaneId> {
        self.pane_ids.get(index).copied()
    }

    pub fn max_pane_id(&self) -> Option<PaneId> {
        self.pane_ids.iter().copied().max()
    }
}
