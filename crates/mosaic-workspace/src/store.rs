use crate::WorkspaceSnapshot;

/// N workspace slots and the index of the live one. The live workspace's
/// slot stays empty while it is on screen; its state is in the `Desk`.
#[derive(Debug, Clone)]
pub struct WorkspaceStore {
    slots: Vec<Option<WorkspaceSnapshot>>,
    current: usize,
}

impl WorkspaceStore {
    pub fn new(count: usize) -> Self {
        Self {
            slots: vec![None; count.max(1)],
            current: 0,
        }
    }

    /// Rebuild from persisted slots, padded or truncated to `count`.
    pub fn from_slots(mut slots: Vec<Option<WorkspaceSnapshot>>, current: usize, count: usize) -> Self {
        slots.resize(count.max(1), None);
        let current = if current < slots.len() { current } else { 0 };
        Self { slots, current }
    }

    /// Store `snapshot` in `index`, overwriting what was there.
    pub fn put(&mut self, index: usize, snapshot: WorkspaceSnapshot) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => {
                *slot = Some(snapshot);
                true
            }
            None => false,
        }
    }

    /// Consume the snapshot in `index`. A second take yields `None`.
    pub fn take(&mut self, index: usize) -> Option<WorkspaceSnapshot> {
        self.slots.get_mut(index)?.take()
    }

    pub fn peek(&self, index: usize) -> Option<&WorkspaceSnapshot> {
        self.slots.get(index)?.as_ref()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn set_current(&mut self, index: usize) -> bool {
        if index < self.slots.len() {
            self.current = index;
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn slots(&self) -> &[Option<WorkspaceSnapshot>] {
        &self.slots
    }

    /// Highest pane id mentioned by any stored snapshot.
    pub fn max_pane_id(&self) -> Option<u64> {
        self.slots
            .iter()
            .flatten()
            .filter_map(WorkspaceSnapshot::max_pane_id)
            .max()
    }
}
