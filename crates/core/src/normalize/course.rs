//! Course outline normalisation.

use super::aliases::{
    unwrap_envelope, CHAPTERS, CHAPTER_DESCRIPTION, CHAPTER_NAME, COURSE_DESCRIPTION,
    COURSE_ENVELOPE, COURSE_NAME, DURATION,
};
use super::duration::normalize_duration;
use super::text::clean_text;
use super::{field, list};
use crate::shape::ShapeContext;
use coursegen_types::{ChapterSummary, Course};
use serde_json::{Map, Value};

pub fn normalize_course(value: &Value, _ctx: &ShapeContext) -> Course {
    let value = unwrap_envelope(value, COURSE_ENVELOPE);

    match value {
        Value::Object(object) => Course {
            course_name: clean_text(field(object, COURSE_NAME)),
            course_description: clean_text(field(object, COURSE_DESCRIPTION)),
            chapters: chapter_summaries(list(object, CHAPTERS)),
        },
        // A bare chapter list with no course header around it.
        Value::Array(items) => Course {
            chapters: chapter_summaries(items),
            ..Course::default()
        },
        _ => Course::default(),
    }
}

fn chapter_summaries(items: &[Value]) -> Vec<ChapterSummary> {
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match item {
            Value::Object(object) => Some(chapter_summary(object)),
            _ => {
                tracing::debug!("dropping chapter {} of course: not an object", index + 1);
                None
            }
        })
        .collect()
}

fn chapter_summary(object: &Map<String, Value>) -> ChapterSummary {
    ChapterSummary {
        chapter_name: clean_text(field(object, CHAPTER_NAME)),
        chapter_description: clean_text(field(object, CHAPTER_DESCRIPTION)),
        duration: normalize_duration(field(object, DURATION)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn norm(value: Value) -> Course {
        normalize_course(&value, &ShapeContext::default())
    }

    #[test]
    fn reads_canonical_fields() {
        let course = norm(json!({
            "courseName": "  Intro   to Rust ",
            "courseDescription": "Learn Rust",
            "chapters": [
                {"chapterName": "Basics", "chapterDescription": "Syntax", "duration": "1 hour"}
            ]
        }));
        assert_eq!(course.course_name, "Intro to Rust");
        assert_eq!(course.chapters.len(), 1);
        assert_eq!(course.chapters[0].duration, "1 hour");
    }

    #[test]
    fn resolves_historical_aliases() {
        let course = norm(json!({
            "course_name": "Python",
            "course_description": "Snakes",
            "chapters": [
                {"chapter_name": "Loops", "description": "for and while"}
            ]
        }));
        assert_eq!(course.course_name, "Python");
        assert_eq!(course.course_description, "Snakes");
        assert_eq!(course.chapters[0].chapter_name, "Loops");
        assert_eq!(course.chapters[0].chapter_description, "for and while");
        assert_eq!(course.chapters[0].duration, "30 mins");
    }

    #[test]
    fn coerces_bad_types_to_defaults() {
        let course = norm(json!({
            "courseName": "X",
            "courseDescription": 12,
            "chapters": {"not": "a list"}
        }));
        assert_eq!(course.course_description, "");
        assert!(course.chapters.is_empty());
    }

    #[test]
    fn drops_non_object_chapters() {
        let course = norm(json!({"courseName": "X", "chapters": ["oops", {"chapterName": "A"}]}));
        assert_eq!(course.chapters.len(), 1);
        assert_eq!(course.chapters[0].chapter_name, "A");
    }

    #[test]
    fn unwraps_course_envelope() {
        let course = norm(json!({"course": {"courseName": "Wrapped"}}));
        assert_eq!(course.course_name, "Wrapped");
    }

    #[test]
    fn non_objects_normalise_to_empty_course() {
        assert_eq!(norm(json!("text")), Course::default());
    }
}
