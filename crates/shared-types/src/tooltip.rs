//! Hover state for the floating point label

use serde::{Deserialize, Serialize};

/// At most one point is highlighted at a time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoverState {
    #[default]
    Hidden,
    Shown(usize),
}

impl HoverState {
    /// Pointer entered the hit-region of `index`. Returns true if the state changed.
    pub fn enter(&mut self, index: usize) -> bool {
        let next = HoverState::Shown(index);
        let changed = *self != next;
        *self = next;
        changed
    }

    /// Pointer left the chart area. Returns true if the state changed.
    pub fn leave(&mut self) -> bool {
        let changed = self.is_shown();
        *self = HoverState::Hidden;
        changed
    }

    pub fn is_shown(&self) -> bool {
        matches!(self, HoverState::Shown(_))
    }

    pub fn active_index(&self) -> Option<usize> {
        match self {
            HoverState::Shown(index) => Some(*index),
            HoverState::Hidden => None,
        }
    }
}
