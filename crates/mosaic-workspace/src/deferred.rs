// Work that must wait until the current operation (recreation, layout)
// has finished. Items name panes by id and re-check them when run.

use std::collections::VecDeque;

use mosaic_core::PaneId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Give the pane focus.
    ApplyFocus { pane: PaneId },
    /// Put keyboard focus back on the pane's recorded control.
    RestoreControl { pane: PaneId },
}

impl Deferred {
    pub fn pane(&self) -> PaneId {
        match *self {
            Deferred::ApplyFocus { pane } | Deferred::RestoreControl { pane } => pane,
        }
    }
}

#[derive(Debug, Default)]
pub struct DeferredQueue {
    items: VecDeque<Deferred>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: Deferred) {
        if !self.items.contains(&item) {
            self.items.push_back(item);
        }
    }

    pub fn pop(&mut self) -> Option<Deferred> {
        self.items.pop_front()
    }

    /// Drop every item naming `pane`.
    pub fn cancel(&mut self, pane: PaneId) {
        self.items.retain(|item| item.pane() != pane);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
