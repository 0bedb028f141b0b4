//! Flashcard set shape.

use crate::Difficulty;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FlashcardSet {
    pub title: String,
    pub description: String,
    pub flashcards: Vec<Flashcard>,
}

/// A two-sided study card. Both sides are non-empty once normalised.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
    pub difficulty: Difficulty,
    pub category: String,
    /// At most five distinct tags.
    pub tags: Vec<String>,
    pub chapter: String,
}
