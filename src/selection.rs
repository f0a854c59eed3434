//! The current selection: which box, and which handle of it, is active.

use crate::geometry::Position;

/// Which box, and which part of it, the pointer is acting on. Replaced
/// wholesale on every selection change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectedArea {
    pub box_id: Option<usize>,
    pub position: Position,
}

impl SelectedArea {
    pub const fn none() -> Self {
        Self {
            box_id: None,
            position: Position::Outside,
        }
    }

    pub const fn new(box_id: usize, position: Position) -> Self {
        Self {
            box_id: Some(box_id),
            position,
        }
    }

    pub fn is_active(&self) -> bool {
        self.box_id.is_some()
    }
}

impl Default for SelectedArea {
    fn default() -> Self {
        Self::none()
    }
}
