//! Course outline shape.

use serde::{Deserialize, Serialize};

/// A generated course outline.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Course {
    /// Course title. Required; at most 100 characters.
    pub course_name: String,

    /// Short description of the course.
    pub course_description: String,

    /// Chapters in teaching order.
    pub chapters: Vec<ChapterSummary>,
}

/// One entry of a course outline.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ChapterSummary {
    pub chapter_name: String,
    pub chapter_description: String,
    /// Canonical duration such as `"30 mins"` or `"1 hour"`.
    pub duration: String,
}
