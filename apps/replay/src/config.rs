use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use shared::settings::{DragModifier, DragSettings, MetadataSettings};
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub drag: DragSettings,
    pub metadata: MetadataSettings,
}

/// Defaults, then the optional TOML file, then `APP__*` environment overrides.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let mut settings = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
            parse_settings(&raw)
                .with_context(|| format!("invalid settings file '{}'", path.display()))?
        }
        None => Settings::default(),
    };
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

pub fn parse_settings(raw: &str) -> Result<Settings, toml::de::Error> {
    toml::from_str(raw)
}

pub fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("APP__DRAG_MODIFIER") {
        match v.parse::<DragModifier>() {
            Ok(modifier) => settings.drag.modifier = modifier,
            Err(err) => warn!("ignoring APP__DRAG_MODIFIER: {err}"),
        }
    }

    if let Some(v) = lookup("APP__ALLOW_MOBILE_DRAG") {
        match parse_flag(&v) {
            Some(allow) => settings.drag.allow_mobile_drag = allow,
            None => warn!("ignoring APP__ALLOW_MOBILE_DRAG: '{v}' is not a boolean"),
        }
    }

    if let Some(v) = lookup("APP__FIELD_PREFIX") {
        let prefix = v.trim();
        if prefix.is_empty() {
            warn!("ignoring empty APP__FIELD_PREFIX");
        } else {
            settings.metadata.field_prefix = prefix.to_string();
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
