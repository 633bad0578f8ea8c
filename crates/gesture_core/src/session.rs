use shared::domain::Axis;

use crate::{coords::PointerDelta, input::PointerPosition};

/// Record of the gesture in progress on one image.
///
/// Only the gesture controller mutates it. While `active`, `last` holds the most recent
/// pointer sample.
#[derive(Debug, Clone, Default)]
pub struct DragSession {
    last: Option<PointerPosition>,
    active: bool,
    axis: Axis,
}

impl DragSession {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn last_position(&self) -> Option<PointerPosition> {
        self.last
    }

    pub(crate) fn begin(&mut self, at: PointerPosition, axis: Axis) {
        self.last = Some(at);
        self.active = true;
        self.axis = axis;
    }

    /// Travel since the previous sample; the sample is stored even when the caller later
    /// discards the delta.
    pub(crate) fn advance(&mut self, to: PointerPosition) -> Option<PointerDelta> {
        if !self.active {
            return None;
        }
        let from = self.last.replace(to)?;
        Some(PointerDelta::between(from, to))
    }

    /// Ends the gesture, returning its locked axis if one was active.
    pub(crate) fn finish(&mut self) -> Option<Axis> {
        let axis = self.active.then_some(self.axis);
        self.reset();
        axis
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
