//! Pure conversions between pointer pixels, displayed percentages and normalized positions.

use shared::domain::Axis;

use crate::input::{InputEvent, PointerPosition};

/// Normalized values are persisted with this many fractional digits.
const NORMALIZED_DECIMALS: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportGeometry {
    pub rendered_width: f64,
    pub rendered_height: f64,
    pub natural_width: f64,
    pub natural_height: f64,
}

impl ViewportGeometry {
    pub fn axis_lock(&self) -> Axis {
        decide_axis_lock(
            self.rendered_width,
            self.rendered_height,
            self.natural_width,
            self.natural_height,
        )
    }

    /// Rendered extent along `axis`, used to scale pixel travel into percent.
    pub fn rendered_extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Vertical => self.rendered_height,
            Axis::Horizontal => self.rendered_width,
        }
    }
}

/// Pointer travel between two samples, positive when the pointer moves up or left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerDelta {
    pub dx: f64,
    pub dy: f64,
}

impl PointerDelta {
    pub fn between(from: PointerPosition, to: PointerPosition) -> Self {
        Self {
            dx: from.x - to.x,
            dy: from.y - to.y,
        }
    }

    pub fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Vertical => self.dy,
            Axis::Horizontal => self.dx,
        }
    }
}

/// Pointer coordinates for mouse events, first contact point for touch events.
pub fn extract_pointer_position(event: &InputEvent) -> Option<PointerPosition> {
    match event {
        InputEvent::Pointer { position, .. } => Some(*position),
        InputEvent::Touch { touches } => touches.first().copied(),
    }
}

/// `None` for a zero-sized (or negative) dimension, which counts as no movement.
pub fn pixel_delta_to_percent(delta: f64, dimension: f64) -> Option<f64> {
    (dimension > 0.0).then(|| delta / dimension * 100.0)
}

pub fn clamp_percent(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

pub fn percent_to_normalized(value: f64) -> f64 {
    let scale = 10f64.powi(NORMALIZED_DECIMALS);
    (value / 100.0 * scale).round() / scale
}

/// Vertical when the natural aspect ratio (height / width) is at least the rendered one.
///
/// Compared by cross-multiplication so zero widths never divide; an all-zero geometry
/// locks vertical.
pub fn decide_axis_lock(
    rendered_width: f64,
    rendered_height: f64,
    natural_width: f64,
    natural_height: f64,
) -> Axis {
    if natural_height * rendered_width >= rendered_height * natural_width {
        Axis::Vertical
    } else {
        Axis::Horizontal
    }
}

#[cfg(test)]
#[path = "tests/coords_tests.rs"]
mod tests;
