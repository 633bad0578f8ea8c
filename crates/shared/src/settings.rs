use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{domain::Modifiers, error::UnknownModifier};

/// Modifier key a mouse drag must hold before it may start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragModifier {
    #[default]
    None,
    Alt,
    Ctrl,
    Meta,
    Shift,
}

impl DragModifier {
    /// `None` is always satisfied.
    pub fn is_held(self, modifiers: Modifiers) -> bool {
        match self {
            Self::None => true,
            Self::Alt => modifiers.alt,
            Self::Ctrl => modifiers.ctrl,
            Self::Meta => modifiers.meta,
            Self::Shift => modifiers.shift,
        }
    }
}

impl FromStr for DragModifier {
    type Err = UnknownModifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(Self::None),
            "alt" | "option" => Ok(Self::Alt),
            "ctrl" | "control" => Ok(Self::Ctrl),
            "meta" | "cmd" | "command" => Ok(Self::Meta),
            "shift" => Ok(Self::Shift),
            _ => Err(UnknownModifier(s.to_string())),
        }
    }
}

impl fmt::Display for DragModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Alt => "alt",
            Self::Ctrl => "ctrl",
            Self::Meta => "meta",
            Self::Shift => "shift",
        };
        f.write_str(name)
    }
}

impl FromIterator<DragModifier> for Modifiers {
    fn from_iter<I: IntoIterator<Item = DragModifier>>(iter: I) -> Self {
        let mut modifiers = Modifiers::default();
        for key in iter {
            match key {
                DragModifier::None => {}
                DragModifier::Alt => modifiers.alt = true,
                DragModifier::Ctrl => modifiers.ctrl = true,
                DragModifier::Meta => modifiers.meta = true,
                DragModifier::Shift => modifiers.shift = true,
            }
        }
        modifiers
    }
}

/// Settings consulted at the start of every gesture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragSettings {
    pub modifier: DragModifier,
    /// Lets touch input start a drag on mobile-class devices.
    pub allow_mobile_drag: bool,
}

impl Default for DragSettings {
    fn default() -> Self {
        Self {
            modifier: DragModifier::None,
            allow_mobile_drag: true,
        }
    }
}

/// Naming of the metadata fields that hold a document's image position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataSettings {
    pub field_prefix: String,
}

impl MetadataSettings {
    pub fn x_field(&self) -> String {
        format!("{}_x", self.field_prefix)
    }

    pub fn y_field(&self) -> String {
        format!("{}_y", self.field_prefix)
    }

    pub fn lock_field(&self) -> String {
        format!("{}_lock", self.field_prefix)
    }
}

impl Default for MetadataSettings {
    fn default() -> Self {
        Self {
            field_prefix: "banner".into(),
        }
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
