use std::{collections::HashMap, io::Write};

use super::*;

fn overrides(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn empty_file_yields_defaults() {
    let settings = parse_settings("").expect("parse");
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.drag.modifier, DragModifier::None);
    assert!(settings.drag.allow_mobile_drag);
    assert_eq!(settings.metadata.field_prefix, "banner");
}

#[test]
fn parses_full_settings_file() {
    let settings = parse_settings(
        r#"
        [drag]
        modifier = "shift"
        allow_mobile_drag = false

        [metadata]
        field_prefix = "cover"
        "#,
    )
    .expect("parse");

    assert_eq!(settings.drag.modifier, DragModifier::Shift);
    assert!(!settings.drag.allow_mobile_drag);
    assert_eq!(settings.metadata.field_prefix, "cover");
}

#[test]
fn partial_sections_keep_other_defaults() {
    let settings = parse_settings("[drag]\nmodifier = \"alt\"\n").expect("parse");
    assert_eq!(settings.drag.modifier, DragModifier::Alt);
    assert!(settings.drag.allow_mobile_drag);
    assert_eq!(settings.metadata, MetadataSettings::default());
}

#[test]
fn unknown_modifier_in_file_is_an_error() {
    assert!(parse_settings("[drag]\nmodifier = \"hyper\"\n").is_err());
}

#[test]
fn env_overrides_replace_file_values() {
    let mut settings = Settings::default();
    apply_env_overrides(
        &mut settings,
        overrides(&[
            ("APP__DRAG_MODIFIER", "Meta"),
            ("APP__ALLOW_MOBILE_DRAG", "off"),
            ("APP__FIELD_PREFIX", " hero "),
        ]),
    );

    assert_eq!(settings.drag.modifier, DragModifier::Meta);
    assert!(!settings.drag.allow_mobile_drag);
    assert_eq!(settings.metadata.field_prefix, "hero");
}

#[test]
fn invalid_env_overrides_are_ignored() {
    let mut settings = Settings::default();
    apply_env_overrides(
        &mut settings,
        overrides(&[
            ("APP__DRAG_MODIFIER", "hyper"),
            ("APP__ALLOW_MOBILE_DRAG", "maybe"),
            ("APP__FIELD_PREFIX", "   "),
        ]),
    );
    assert_eq!(settings, Settings::default());
}

#[test]
fn loads_settings_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "[drag]\nmodifier = \"ctrl\"").expect("write");

    let settings = load_settings(Some(file.path())).expect("load");
    assert_eq!(settings.drag.modifier, DragModifier::Ctrl);
}

#[test]
fn missing_settings_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = load_settings(Some(&dir.path().join("absent.toml"))).expect_err("missing");
    assert!(err.to_string().contains("failed to read settings file"));
}
