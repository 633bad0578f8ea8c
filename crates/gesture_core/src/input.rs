use serde::{Deserialize, Serialize};
use shared::domain::Modifiers;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputDevice {
    #[default]
    Mouse,
    Touch,
}

/// Client-space pointer coordinates in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Mouse (or pen) event.
    Pointer {
        position: PointerPosition,
        modifiers: Modifiers,
    },
    /// Touch event; `touches` holds the points still in contact, in contact order.
    Touch { touches: Vec<PointerPosition> },
}

impl InputEvent {
    pub fn mouse(x: f64, y: f64) -> Self {
        Self::mouse_with(x, y, Modifiers::default())
    }

    pub fn mouse_with(x: f64, y: f64, modifiers: Modifiers) -> Self {
        Self::Pointer {
            position: PointerPosition::new(x, y),
            modifiers,
        }
    }

    pub fn touch(x: f64, y: f64) -> Self {
        Self::Touch {
            touches: vec![PointerPosition::new(x, y)],
        }
    }

    pub fn device(&self) -> InputDevice {
        match self {
            Self::Pointer { .. } => InputDevice::Mouse,
            Self::Touch { .. } => InputDevice::Touch,
        }
    }
}

/// One step of a gesture as forwarded by the host.
///
/// `Up` carries no position: releases are observed on the containing frame and touch-end
/// events no longer list the lifted point.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureEvent {
    Down(InputEvent),
    Move(InputEvent),
    Up,
}
