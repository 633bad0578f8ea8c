//! Codec for the `object-position` style string a rendered image carries, e.g. `"50% 60%"`.

use crate::{domain::PercentPosition, error::StyleParseError};

/// Fractional digits kept when formatting a percentage.
const PERCENT_DECIMALS: i32 = 5;

pub fn format_object_position(position: PercentPosition) -> String {
    format!(
        "{}% {}%",
        round_percent(position.x),
        round_percent(position.y)
    )
}

pub fn parse_object_position(raw: &str) -> Result<PercentPosition, StyleParseError> {
    let mut parts = raw.split_whitespace();
    let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(StyleParseError::ComponentCount(raw.to_string()));
    };
    Ok(PercentPosition::new(parse_percent(x)?, parse_percent(y)?))
}

fn parse_percent(part: &str) -> Result<f64, StyleParseError> {
    part.strip_suffix('%')
        .and_then(|number| number.parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .ok_or_else(|| StyleParseError::NotPercent(part.to_string()))
}

fn round_percent(value: f64) -> f64 {
    let scale = 10f64.powi(PERCENT_DECIMALS);
    // `+ 0.0` turns a negative zero into zero so it never prints as "-0%".
    (value * scale).round() / scale + 0.0
}

#[cfg(test)]
#[path = "tests/style_tests.rs"]
mod tests;
