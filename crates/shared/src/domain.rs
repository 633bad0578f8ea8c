use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub String);

impl DocumentId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Moves the `y` component.
    #[default]
    Vertical,
    Horizontal,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertical => f.write_str("vertical"),
            Self::Horizontal => f.write_str("horizontal"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialPosition {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

/// Both components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPosition {
    pub x: f64,
    pub y: f64,
}

impl NormalizedPosition {
    pub const CENTER: Self = Self { x: 0.5, y: 0.5 };

    /// Missing components become the center; the rest are clamped.
    pub fn resolve(partial: PartialPosition) -> Self {
        Self {
            x: resolve_component(partial.x),
            y: resolve_component(partial.y),
        }
    }

    pub fn to_percent(self) -> PercentPosition {
        PercentPosition {
            x: self.x * 100.0,
            y: self.y * 100.0,
        }
    }
}

impl Default for NormalizedPosition {
    fn default() -> Self {
        Self::CENTER
    }
}

fn resolve_component(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v.clamp(0.0, 1.0),
        _ => 0.5,
    }
}

/// Both components in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentPosition {
    pub x: f64,
    pub y: f64,
}

impl PercentPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn component(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Vertical => self.y,
            Axis::Horizontal => self.x,
        }
    }

    pub fn with_component(self, axis: Axis, value: f64) -> Self {
        match axis {
            Axis::Vertical => Self { y: value, ..self },
            Axis::Horizontal => Self { x: value, ..self },
        }
    }
}

/// Serializes as `{"x": 0.25}` or `{"y": 0.6}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistedPositionPatch {
    X(f64),
    Y(f64),
}

impl PersistedPositionPatch {
    pub fn along(axis: Axis, value: f64) -> Self {
        match axis {
            Axis::Vertical => Self::Y(value),
            Axis::Horizontal => Self::X(value),
        }
    }

    pub fn axis(&self) -> Axis {
        match self {
            Self::X(_) => Axis::Horizontal,
            Self::Y(_) => Axis::Vertical,
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            Self::X(v) | Self::Y(v) => *v,
        }
    }

    pub fn x(&self) -> Option<f64> {
        match self {
            Self::X(v) => Some(*v),
            Self::Y(_) => None,
        }
    }

    pub fn y(&self) -> Option<f64> {
        match self {
            Self::Y(v) => Some(*v),
            Self::X(_) => None,
        }
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
