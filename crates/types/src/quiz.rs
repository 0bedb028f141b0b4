//! Multiple-choice quiz shape.

use crate::Difficulty;
use serde::{Deserialize, Serialize};

/// A quiz generated for a course.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Quiz {
    pub title: String,
    pub description: String,
    pub questions: Vec<Question>,
    /// Time limit in minutes.
    pub time_limit: u32,
    /// Pass mark as a percentage.
    pub passing_score: u32,
}

/// A single multiple-choice question.
///
/// `options` always holds exactly four answers and `correct_answer` indexes into it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Question {
    pub question: String,
    pub options: [String; 4],
    pub correct_answer: u8,
    pub explanation: String,
    pub difficulty: Difficulty,
    /// Chapter tag; may be empty.
    pub chapter: String,
}

impl Question {
    /// The text of the correct option, if the index is in range.
    pub fn correct_option(&self) -> Option<&str> {
        self.options
            .get(usize::from(self.correct_answer))
            .map(String::as_str)
    }
}
