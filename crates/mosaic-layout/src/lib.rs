// Tiling engine: places panes on a grid and answers directional lookups.
// Implements mosaic_core::LayoutEngine.

mod geometry;

use mosaic_core::{Direction, LayoutEngine, PaneHandle, PaneId, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

pub use geometry::{GeometryStore, GridPosition, LayoutMode, LayoutPin};

// ──────────────────────────────────────────────
// Navigation policy
// ──────────────────────────────────────────────

/// Weight of the perpendicular axis in the directional score. Below 1.0 so a
/// pane straight ahead beats a diagonal one that is nominally closer.
const PERPENDICULAR_WEIGHT: f32 = 0.5;

/// What happens when directional navigation runs into the edge of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapPolicy {
    /// Report no target; focus stays put.
    #[default]
    Stop,
    /// Continue from the opposite edge.
    Wrap,
}

// ──────────────────────────────────────────────
// TilingEngine
// ──────────────────────────────────────────────

pub struct TilingEngine {
    panes: Vec<PaneHandle>,
    geometry: GeometryStore,
    pin: Option<LayoutPin>,
    wrap: WrapPolicy,
}

impl TilingEngine {
    pub fn new() -> Self {
        Self::with_wrap_policy(WrapPolicy::Stop)
    }

    pub fn with_wrap_policy(wrap: WrapPolicy) -> Self {
        Self {
            panes: Vec::new(),
            geometry: GeometryStore::new(),
            pin: None,
            wrap,
        }
    }

    /// Append a pane and re-tile. A pane id already present is ignored.
    pub fn add_pane(&mut self, pane: PaneHandle) -> bool {
        if self.contains(pane.id) {
            log::debug!("pane {} already tiled", pane.id);
            return false;
        }
        self.panes.push(pane);
        self.relayout();
        true
    }

    /// Remove a pane and re-tile. Re-focusing is the caller's business.
    pub fn remove_pane(&mut self, pane: PaneId) -> Option<PaneHandle> {
        let index = self.index_of(pane)?;
        let removed = self.panes.remove(index);
        self.relayout();
        Some(removed)
    }

    /// Remove every pane, returning them in tiling order.
    pub fn clear(&mut self) -> Vec<PaneHandle> {
        let panes = std::mem::take(&mut self.panes);
        self.relayout();
        panes
    }

    pub fn set_visible(&mut self, pane: PaneId, visible: bool) -> bool {
        match self.panes.iter_mut().find(|p| p.id == pane) {
            Some(handle) => {
                if handle.visible != visible {
                    handle.visible = visible;
                    self.relayout();
                }
                true
            }
            None => false,
        }
    }

    pub fn set_focusable(&mut self, pane: PaneId, focusable: bool) -> bool {
        match self.panes.iter_mut().find(|p| p.id == pane) {
            Some(handle) => {
                handle.focusable = focusable;
                true
            }
            None => false,
        }
    }

    pub fn pin_layout(&mut self, pin: Option<LayoutPin>) {
        if self.pin != pin {
            self.pin = pin;
            self.relayout();
        }
    }

    pub fn pin(&self) -> Option<LayoutPin> {
        self.pin
    }

    pub fn wrap_policy(&self) -> WrapPolicy {
        self.wrap
    }

    pub fn set_wrap_policy(&mut self, wrap: WrapPolicy) {
        self.wrap = wrap;
    }

    /// Recompute the mode and every grid position from the visible panes.
    pub fn relayout(&mut self) {
        let visible: Vec<PaneId> = self
            .panes
            .iter()
            .filter(|p| p.visible)
            .map(|p| p.id)
            .collect();
        let mode = LayoutMode::for_count(visible.len(), self.pin);
        self.geometry.recompute(&visible, mode);
    }

    // ── Queries ─────────────────────────────────

    pub fn mode(&self) -> LayoutMode {
        self.geometry.mode()
    }

    pub fn geometry(&self) -> &GeometryStore {
        &self.geometry
    }

    pub fn position(&self, pane: PaneId) -> Option<GridPosition> {
        self.geometry.position(pane)
    }

    pub fn panes(&self) -> &[PaneHandle] {
        &self.panes
    }

    pub fn pane(&self, pane: PaneId) -> Option<&PaneHandle> {
        self.panes.iter().find(|p| p.id == pane)
    }

    pub fn index_of(&self, pane: PaneId) -> Option<usize> {
        self.panes.iter().position(|p| p.id == pane)
    }

    pub fn contains(&self, pane: PaneId) -> bool {
        self.index_of(pane).is_some()
    }

    pub fn len(&self) -> usize {
        self.panes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panes.is_empty()
    }

    /// Find which visible pane contains the given point.
    pub fn pane_at(&self, window_size: Size, point: Vec2) -> Option<PaneId> {
        self.compute(window_size)
            .into_iter()
            .find(|(_, rect)| rect.contains(point))
            .map(|(id, _)| id)
    }

    /// Navigable panes with their grid cells, in tiling order.
    fn candidates(&self, from: PaneId) -> impl Iterator<Item = (PaneId, GridPosition)> + '_ {
        self.panes
            .iter()
            .filter(move |p| p.id != from && p.is_navigable())
            .filter_map(move |p| self.geometry.position(p.id).map(|pos| (p.id, pos)))
    }

    /// Edge continuation for `WrapPolicy::Wrap`: the pane on the far side
    /// that lines up best with the origin.
    fn wrap_target(&self, from: PaneId, origin: GridPosition, direction: Direction) -> Option<PaneId> {
        let back = direction.opposite();
        let mut best: Option<(PaneId, f32)> = None;
        for (id, cell) in self.candidates(from) {
            let (primary, perpendicular) = axis_offsets(origin.center(), cell.center(), back);
            if primary <= 0.0 || !clears(origin, cell, back) {
                continue;
            }
            let score = PERPENDICULAR_WEIGHT * perpendicular.abs() - primary;
            if best.map_or(true, |(_, s)| score < s) {
                best = Some((id, score));
            }
        }
        best.map(|(id, _)| id)
    }
}

impl Default for TilingEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// True when `cell` lies entirely past `origin`'s edge in `direction`. A
/// spanning cell (the master pane, a stretched last row) can have a
/// neighbour whose center is further along without being beyond it.
fn clears(origin: GridPosition, cell: GridPosition, direction: Direction) -> bool {
    match direction {
        Direction::Up => cell.row + cell.row_span <= origin.row,
        Direction::Down => cell.row >= origin.row + origin.row_span,
        Direction::Left => cell.column + cell.col_span <= origin.column,
        Direction::Right => cell.column >= origin.column + origin.col_span,
    }
}

/// Offsets of `to` relative to `from` as (along `direction`, across it).
/// A positive primary offset means `to` lies on the requested side.
fn axis_offsets(from: (f32, f32), to: (f32, f32), direction: Direction) -> (f32, f32) {
    let (d_row, d_col) = (to.0 - from.0, to.1 - from.1);
    let (along, across) = if direction.is_vertical() {
        (d_row, d_col)
    } else {
        (d_col, d_row)
    };
    match direction {
        Direction::Up | Direction::Left => (-along, across),
        Direction::Down | Direction::Right => (along, across),
    }
}

impl LayoutEngine for TilingEngine {
    fn compute(&self, window_size: Size) -> Vec<(PaneId, Rect)> {
        self.panes
            .iter()
            .filter_map(|p| {
                self.geometry
                    .position(p.id)
                    .map(|pos| (p.id, self.geometry.cell_rect(pos, window_size)))
            })
            .collect()
    }

    /// Closest navigable pane on the `direction` side of `from`, scored by
    /// distance between cell centers along the direction plus half the
    /// sideways offset. Candidates must also clear the origin cell.
    ///
    /// Running off the edge yields `None` under `WrapPolicy::Stop`; callers
    /// treat that as "stay put".
    fn find_in_direction(&self, from: PaneId, direction: Direction) -> Option<PaneId> {
        if self.panes.len() <= 1 {
            return None;
        }
        let origin = self.geometry.position(from)?;

        let mut best: Option<(PaneId, f32)> = None;
        for (id, cell) in self.candidates(from) {
            let (primary, perpendicular) = axis_offsets(origin.center(), cell.center(), direction);
            if primary <= 0.0 || !clears(origin, cell, direction) {
                continue;
            }
            let score = primary + PERPENDICULAR_WEIGHT * perpendicular.abs();
            if best.map_or(true, |(_, s)| score < s) {
                best = Some((id, score));
            }
        }

        match best {
            Some((id, _)) => Some(id),
            None if self.wrap == WrapPolicy::Wrap => self.wrap_target(from, origin, direction),
            None => None,
        }
    }

    fn pane_ids(&self) -> Vec<PaneId> {
        self.panes.iter().map(|p| p.id).collect()
    }

    fn is_navigable(&self, pane: PaneId) -> bool {
        self.pane(pane)
            .is_some_and(|p| p.is_navigable() && self.geometry.position(pane).is_some())
    }
}
