//! Schema normalisation.
//!
//! Maps any decoded value onto one of the canonical shapes. Normalisation never fails:
//! unknown structure degrades to empty fields and the validator decides whether the
//! result is usable. Normalising an already-canonical object returns it unchanged.

pub mod aliases;
pub mod chapter;
pub mod course;
pub mod duration;
pub mod flashcards;
pub mod quiz;
pub mod text;

use serde_json::{Map, Value};

/// Items of a list field, or nothing if the field is absent or not an array.
pub(crate) fn list<'a>(object: &'a Map<String, Value>, aliases: &[&str]) -> &'a [Value] {
    match aliases::first_present(object, aliases) {
        Some(Value::Array(items)) => items,
        _ => &[],
    }
}

/// Field lookup on an optional object.
pub(crate) fn field<'a>(object: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Value> {
    aliases::first_present(object, aliases)
}
