//! Chapter duration normalisation.
//!
//! Durations are reduced to `"<number> <unit>"` with the unit one of `min`, `mins`,
//! `hour` or `hours`. Anything without a recognisable unit becomes the default.

use crate::constants::DEFAULT_DURATION;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static DURATION: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(minutes|minute|mins|min|hours|hour|hrs|hr)\b").ok()
});

/// Normalise a raw duration value.
pub fn normalize_duration(value: Option<&Value>) -> String {
    let Some(Value::String(raw)) = value else {
        return DEFAULT_DURATION.to_string();
    };
    parse_duration(raw).unwrap_or_else(|| DEFAULT_DURATION.to_string())
}

/// Parse `(number, unit)` out of free text, e.g. `"about 2 Hours"` -> `"2 hours"`.
pub fn parse_duration(raw: &str) -> Option<String> {
    let caps = DURATION.as_ref()?.captures(raw)?;
    let number = caps.get(1)?.as_str();
    let unit = caps.get(2)?.as_str().to_ascii_lowercase();

    let singular = number.parse::<f64>().ok()? == 1.0;
    let unit = match (unit.starts_with('h'), singular) {
        (true, true) => "hour",
        (true, false) => "hours",
        (false, true) => "min",
        (false, false) => "mins",
    };

    Some(format!("{number} {unit}"))
}
