mod control;

pub use control::{
    Capabilities, Control, ControlId, ControlKind, ControlState, ControlTree, KeyboardTarget,
    Selection,
};

// ──────────────────────────────────────────────
// Geometry
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

// ──────────────────────────────────────────────
// Identity
// ──────────────────────────────────────────────

pub type PaneId = u64;

// ──────────────────────────────────────────────
// Direction
// ──────────────────────────────────────────────

/// Cardinal direction for focus movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// True for Up/Down, which compare rows rather than columns.
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }
}

// ──────────────────────────────────────────────
// Input
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Tab,
    Escape,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
    Insert,
}

impl Key {
    /// The navigation direction an arrow key stands for.
    pub fn arrow_direction(self) -> Option<Direction> {
        match self {
            Key::Up => Some(Direction::Up),
            Key::Down => Some(Direction::Down),
            Key::Left => Some(Direction::Left),
            Key::Right => Some(Direction::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// True when a chord modifier (ctrl, alt or meta) is held. Shift alone
    /// only changes the character being typed.
    pub fn has_command(&self) -> bool {
        self.ctrl || self.alt || self.meta
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyPress { key: Key, modifiers: Modifiers },
    MouseClick { position: Vec2, button: MouseButton },
    MouseMove { position: Vec2 },
    MouseScroll { delta: f32, position: Vec2 },
    Resize { size: Size },
}

// ──────────────────────────────────────────────
// Panes
// ──────────────────────────────────────────────

/// What the tiling layer knows about an open pane. The pane's content lives
/// elsewhere; this is only the identity, the type tag used to recreate it,
/// and the two flags that decide whether it takes part in navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneHandle {
    pub id: PaneId,
    pub kind: String,
    pub focusable: bool,
    pub visible: bool,
}

impl PaneHandle {
    pub fn new(id: PaneId, kind: impl Into<String>) -> Self {
        Self {
            id,
            kind: kind.into(),
            focusable: true,
            visible: true,
        }
    }

    /// Visible and focusable: a candidate for directional navigation.
    pub fn is_navigable(&self) -> bool {
        self.visible && self.focusable
    }
}

// ──────────────────────────────────────────────
// Trait: LayoutEngine
// ──────────────────────────────────────────────

/// The layout engine places panes and answers spatial questions about them.
/// It doesn't know what panes contain and holds no focus state.
pub trait LayoutEngine {
    fn compute(&self, window_size: Size) -> Vec<(PaneId, Rect)>;
    fn find_in_direction(&self, from: PaneId, direction: Direction) -> Option<PaneId>;
    /// All pane ids in insertion order.
    fn pane_ids(&self) -> Vec<PaneId>;
    fn is_navigable(&self, pane: PaneId) -> bool;
}

// ──────────────────────────────────────────────
// Trait: PaneHost
// ──────────────────────────────────────────────

/// Whoever owns pane contents. The focus coordinator talks to panes only
/// through this trait.
pub trait PaneHost {
    fn contains(&self, pane: PaneId) -> bool;
    /// Whether the pane surface itself can take keyboard focus.
    fn accepts_keyboard_focus(&self, pane: PaneId) -> bool;
    /// Deliver an active/inactive transition to the pane.
    fn notify_active(&mut self, pane: PaneId, active: bool);
}
