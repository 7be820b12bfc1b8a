//! Input events fed to the selection engine by the host view.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Identifier of one pointer (the mouse, or a single touch contact).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointerId(pub u32);

impl std::fmt::Display for PointerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pointer#{}", self.0)
    }
}

/// Device that produced a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    #[default]
    Mouse,
    Touch,
}

/// Mouse button
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Default::default()
        }
    }
}

/// A pointer down/move/up/cancel event in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub pointer_id: PointerId,
    #[serde(default)]
    pub kind: PointerKind,
    #[serde(default)]
    pub button: MouseButton,
    /// First contact of a multitouch interaction, or the only mouse pointer.
    #[serde(default = "default_primary")]
    pub is_primary: bool,
    pub position: Point,
    #[serde(default)]
    pub modifiers: Modifiers,
}

fn default_primary() -> bool {
    true
}

impl PointerEvent {
    /// A primary left-button mouse event.
    pub fn mouse(pointer_id: u32, x: f64, y: f64) -> Self {
        Self {
            pointer_id: PointerId(pointer_id),
            kind: PointerKind::Mouse,
            button: MouseButton::Left,
            is_primary: true,
            position: Point::new(x, y),
            modifiers: Modifiers::default(),
        }
    }

    /// A touch contact. Only the first contact of a gesture is primary.
    pub fn touch(pointer_id: u32, x: f64, y: f64, is_primary: bool) -> Self {
        Self {
            pointer_id: PointerId(pointer_id),
            kind: PointerKind::Touch,
            button: MouseButton::Left,
            is_primary,
            position: Point::new(x, y),
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Point::new(x, y);
        self
    }

    /// Primary button of the primary pointer.
    pub fn is_primary_press(&self) -> bool {
        self.is_primary && self.button == MouseButton::Left
    }
}

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Char(char),
    Enter,
    Space,
}

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, the host may handle it elsewhere.
    Ignored,
    /// Event was consumed.
    Consumed,
    /// Event started a drag session owned by this pointer.
    StartDrag,
}
