use std::collections::HashMap;

use mosaic_core::{PaneId, Rect, Size};
use serde::{Deserialize, Serialize};

// ──────────────────────────────────────────────
// Layout modes
// ──────────────────────────────────────────────

/// A layout the user can pin regardless of pane count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutPin {
    Grid,
    MasterStack,
}

impl LayoutPin {
    /// Next pin in the Auto → Grid → MasterStack → Auto cycle.
    pub fn cycle(pin: Option<LayoutPin>) -> Option<LayoutPin> {
        match pin {
            None => Some(LayoutPin::Grid),
            Some(LayoutPin::Grid) => Some(LayoutPin::MasterStack),
            Some(LayoutPin::MasterStack) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    Single,
    SplitPair,
    Grid(usize),
    MasterStack,
}

impl LayoutMode {
    /// Pick the mode for `count` panes. Pure: the same inputs always give the
    /// same mode.
    pub fn for_count(count: usize, pin: Option<LayoutPin>) -> Self {
        match (count, pin) {
            (0 | 1, _) => LayoutMode::Single,
            (n, Some(LayoutPin::Grid)) => LayoutMode::Grid(n),
            (_, Some(LayoutPin::MasterStack)) => LayoutMode::MasterStack,
            (2, None) => LayoutMode::SplitPair,
            (3, None) => LayoutMode::MasterStack,
            (n, None) => LayoutMode::Grid(n),
        }
    }

    /// (rows, columns) of the grid this mode lays `count` panes into.
    pub fn dimensions(self, count: usize) -> (usize, usize) {
        let count = count.max(1);
        match self {
            LayoutMode::Single => (1, 1),
            LayoutMode::SplitPair => (1, count),
            LayoutMode::MasterStack => {
                if count == 1 {
                    (1, 1)
                } else {
                    (count - 1, 2)
                }
            }
            LayoutMode::Grid(_) => {
                let columns = ceil_sqrt(count);
                (count.div_ceil(columns), columns)
            }
        }
    }
}

fn ceil_sqrt(n: usize) -> usize {
    let mut c = 1;
    while c * c < n {
        c += 1;
    }
    c
}

// ──────────────────────────────────────────────
// Grid positions
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    pub row: usize,
    pub column: usize,
    pub row_span: usize,
    pub col_span: usize,
}

impl GridPosition {
    pub fn new(row: usize, column: usize, row_span: usize, col_span: usize) -> Self {
        Self {
            row,
            column,
            row_span,
            col_span,
        }
    }

    /// Center of the cell in grid units as (row, column). Spans are whole
    /// numbers, so centers land on exact halves and compare without drift.
    pub fn center(&self) -> (f32, f32) {
        (
            self.row as f32 + self.row_span as f32 / 2.0,
            self.column as f32 + self.col_span as f32 / 2.0,
        )
    }
}

// ──────────────────────────────────────────────
// GeometryStore
// ──────────────────────────────────────────────

/// Grid position of every placed pane under the current mode.
#[derive(Debug, Clone)]
pub struct GeometryStore {
    positions: HashMap<PaneId, GridPosition>,
    mode: LayoutMode,
    rows: usize,
    columns: usize,
}

impl GeometryStore {
    pub fn new() -> Self {
        Self {
            positions: HashMap::new(),
            mode: LayoutMode::Single,
            rows: 1,
            columns: 1,
        }
    }

    /// Throw away every position and place `panes`, in order, under `mode`.
    /// Never patched incrementally.
    pub fn recompute(&mut self, panes: &[PaneId], mode: LayoutMode) {
        self.positions.clear();
        self.mode = mode;
        let (rows, columns) = mode.dimensions(panes.len());
        self.rows = rows;
        self.columns = columns;

        match mode {
            LayoutMode::Single => {
                if let Some(&id) = panes.first() {
                    self.positions.insert(id, GridPosition::new(0, 0, 1, 1));
                }
            }
            LayoutMode::SplitPair => {
                for (i, &id) in panes.iter().enumerate() {
                    self.positions.insert(id, GridPosition::new(0, i, 1, 1));
                }
            }
            LayoutMode::MasterStack => {
                let mut iter = panes.iter();
                if let Some(&master) = iter.next() {
                    self.positions
                        .insert(master, GridPosition::new(0, 0, rows.max(1), 1));
                }
                for (i, &id) in iter.enumerate() {
                    self.positions.insert(id, GridPosition::new(i, 1, 1, 1));
                }
            }
            LayoutMode::Grid(_) => {
                let last = panes.len().saturating_sub(1);
                for (i, &id) in panes.iter().enumerate() {
                    let row = i / columns;
                    let column = i % columns;
                    // The last pane stretches across an unfilled final row.
                    let col_span = if i == last { columns - column } else { 1 };
                    self.positions
                        .insert(id, GridPosition::new(row, column, 1, col_span));
                }
            }
        }
    }

    pub fn position(&self, pane: PaneId) -> Option<GridPosition> {
        self.positions.get(&pane).copied()
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Pixel rect of a grid cell inside a window of `window_size`.
    pub fn cell_rect(&self, position: GridPosition, window_size: Size) -> Rect {
        let cell_w = window_size.width / self.columns.max(1) as f32;
        let cell_h = window_size.height / self.rows.max(1) as f32;
        Rect::new(
            position.column as f32 * cell_w,
            position.row as f32 * cell_h,
            position.col_span as f32 * cell_w,
            position.row_span as f32 * cell_h,
        )
    }
}

impl Default for GeometryStore {
    fn default() -> Self {
        Self::new()
    }
}
