//! Structural validation of normalised content.
//!
//! Validation is structural only: required fields present, sequences non-empty and
//! length bounds respected. Hard failures are reported as violations and make the
//! object unusable; softer issues are warnings the caller may log or surface.

use crate::constants::{
    MAX_CHAPTER_DESCRIPTION_LEN, MAX_COURSE_DESCRIPTION_LEN, MAX_NAME_LEN,
    MAX_SUB_FEATURE_DESCRIPTION_LEN, MAX_TOPIC_DESCRIPTION_LEN, MIN_COURSE_DESCRIPTION_LEN,
    MIN_SUB_FEATURE_DESCRIPTION_LEN, MIN_TOPIC_DESCRIPTION_LEN,
};
use crate::parse::{decode, RawResponse};
use crate::shape::{ContentShape, ShapeContext};
use coursegen_types::{
    ChapterContent, Content, ContentKind, Course, FlashcardSet, Quiz, Topic,
};
use serde::Serialize;

/// Violations and warnings collected for one object.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub violations: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    fn violation(&mut self, message: impl Into<String>) {
        self.violations.push(message.into());
    }

    fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    fn check_count(&mut self, what: &str, actual: usize, ctx: &ShapeContext) {
        if let Some(expected) = ctx.expected_count {
            if expected != actual {
                self.warn(format!("expected {expected} {what}, found {actual}"));
            }
        }
    }
}

fn len(text: &str) -> usize {
    text.chars().count()
}

pub fn validate_course(course: &Course, ctx: &ShapeContext) -> ValidationReport {
    let mut report = ValidationReport::default();

    if course.course_name.is_empty() {
        report.violation("courseName is required");
    } else if len(&course.course_name) > MAX_NAME_LEN {
        report.warn(format!("courseName exceeds {MAX_NAME_LEN} characters"));
    }

    let description = len(&course.course_description);
    if description < MIN_COURSE_DESCRIPTION_LEN {
        report.warn(format!(
            "courseDescription is shorter than {MIN_COURSE_DESCRIPTION_LEN} characters"
        ));
    } else if description > MAX_COURSE_DESCRIPTION_LEN {
        report.warn(format!(
            "courseDescription exceeds {MAX_COURSE_DESCRIPTION_LEN} characters"
        ));
    }

    if course.chapters.is_empty() {
        report.warn("course has no chapters");
    }
    for (index, chapter) in course.chapters.iter().enumerate() {
        let n = index + 1;
        if chapter.chapter_name.is_empty() {
            report.warn(format!("chapter {n} has no chapterName"));
        } else if len(&chapter.chapter_name) > MAX_NAME_LEN {
            report.warn(format!("chapter {n} chapterName exceeds {MAX_NAME_LEN} characters"));
        }
        if len(&chapter.chapter_description) > MAX_CHAPTER_DESCRIPTION_LEN {
            report.warn(format!(
                "chapter {n} chapterDescription exceeds {MAX_CHAPTER_DESCRIPTION_LEN} characters"
            ));
        }
    }
    report.check_count("chapters", course.chapters.len(), ctx);

    report
}

pub fn validate_chapter(chapter: &ChapterContent, ctx: &ShapeContext) -> ValidationReport {
    let mut report = ValidationReport::default();

    if chapter.is_empty() {
        report.violation("chapter content has no topics");
        return report;
    }

    for (index, topic) in chapter.topics.iter().enumerate() {
        let n = index + 1;
        if len(topic.title()) > MAX_NAME_LEN {
            report.warn(format!("topic {n} title exceeds {MAX_NAME_LEN} characters"));
        }

        let description = len(topic.description());
        if description == 0 {
            report.violation(format!("topic {n} ({}) has no description", topic.title()));
        } else if description < MIN_TOPIC_DESCRIPTION_LEN {
            report.warn(format!(
                "topic {n} description is shorter than {MIN_TOPIC_DESCRIPTION_LEN} characters"
            ));
        } else if description > MAX_TOPIC_DESCRIPTION_LEN {
            report.warn(format!(
                "topic {n} description exceeds {MAX_TOPIC_DESCRIPTION_LEN} characters"
            ));
        }

        if let Topic::General(general) = topic {
            if ctx.is_programming() && general.code_example.is_none() {
                report.warn(format!("topic {n} has no code example"));
            }
            for (sub_index, sub) in general.sub_features.iter().enumerate() {
                let sub_len = len(&sub.description);
                if sub_len < MIN_SUB_FEATURE_DESCRIPTION_LEN {
                    report.warn(format!(
                        "topic {n} sub-feature {} description is shorter than {MIN_SUB_FEATURE_DESCRIPTION_LEN} characters",
                        sub_index + 1
                    ));
                } else if sub_len > MAX_SUB_FEATURE_DESCRIPTION_LEN {
                    report.warn(format!(
                        "topic {n} sub-feature {} description exceeds {MAX_SUB_FEATURE_DESCRIPTION_LEN} characters",
                        sub_index + 1
                    ));
                }
            }
        }
    }

    report
}

pub fn validate_quiz(quiz: &Quiz, ctx: &ShapeContext) -> ValidationReport {
    let mut report = ValidationReport::default();

    if quiz.title.is_empty() {
        report.violation("quiz title is required");
    }
    if quiz.questions.is_empty() {
        report.violation("quiz has no valid questions (each needs text, 4 options and a correctAnswer in 0..=3)");
    }
    report.check_count("questions", quiz.questions.len(), ctx);

    report
}

pub fn validate_flashcards(set: &FlashcardSet, ctx: &ShapeContext) -> ValidationReport {
    let mut report = ValidationReport::default();

    if set.title.is_empty() {
        report.warn("flashcard set has no title");
    }
    if set.flashcards.is_empty() {
        report.violation("flashcard set has no valid flashcards (each needs a front and a back)");
    }
    report.check_count("flashcards", set.flashcards.len(), ctx);

    report
}

/// Validate content of any kind.
pub fn validate_content(content: &Content, ctx: &ShapeContext) -> ValidationReport {
    match content {
        Content::Course(course) => validate_course(course, ctx),
        Content::Chapter(chapter) => validate_chapter(chapter, ctx),
        Content::Quiz(quiz) => validate_quiz(quiz, ctx),
        Content::FlashcardSet(set) => validate_flashcards(set, ctx),
    }
}

/// Result of decoding, normalising and validating one response as a known shape.
#[derive(Clone, Debug)]
pub struct Checked<C> {
    /// `None` when nothing could be decoded from the response.
    pub content: Option<C>,
    pub report: ValidationReport,
    /// Text the decision was made on; fed back into the repair prompt.
    pub candidate: String,
}

impl<C> Checked<C> {
    pub fn is_valid(&self) -> bool {
        self.content.is_some() && self.report.is_valid()
    }
}

/// Decode, normalise and validate `raw` as shape `C`.
pub fn check<C: ContentShape>(raw: impl Into<RawResponse>, ctx: &ShapeContext) -> Checked<C> {
    let raw = raw.into();
    let original = match &raw {
        RawResponse::Text(text) => text.clone(),
        RawResponse::Parsed(value) => value.to_string(),
    };

    match decode(raw) {
        Ok(decoded) => {
            let content = C::normalize(&decoded.value, ctx);
            let report = content.validate(ctx);
            Checked {
                content: Some(content),
                report,
                candidate: decoded.candidate,
            }
        }
        Err(err) => {
            tracing::debug!("decode of {} response failed: {err}", C::KIND);
            Checked {
                content: None,
                report: ValidationReport {
                    violations: vec![format!("response is not usable JSON: {err}")],
                    warnings: Vec::new(),
                },
                candidate: original,
            }
        }
    }
}

/// Outcome of [`validate_and_normalize`], shaped for API responses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Validation {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// Kind of the normalised content, or `"none"` when decoding failed.
    pub content_type: &'static str,
    pub normalized: Option<Content>,
}

impl<C: ContentShape> From<Checked<C>> for Validation {
    fn from(checked: Checked<C>) -> Self {
        let is_valid = checked.is_valid();
        let content_type = if checked.content.is_some() {
            C::KIND.as_str()
        } else {
            "none"
        };
        Validation {
            is_valid,
            errors: checked.report.violations,
            warnings: checked.report.warnings,
            content_type,
            normalized: checked.content.map(ContentShape::into_content),
        }
    }
}

/// Validate and normalise a response for a kind chosen at runtime.
///
/// # Arguments
///
/// * `raw` - Response text, or an already decoded JSON value.
/// * `kind` - The shape the response should be coerced into.
/// * `ctx` - Category, topic and expected count from the originating request.
pub fn validate_and_normalize(
    raw: impl Into<RawResponse>,
    kind: ContentKind,
    ctx: &ShapeContext,
) -> Validation {
    match kind {
        ContentKind::Course => check::<Course>(raw, ctx).into(),
        ContentKind::Chapter => check::<ChapterContent>(raw, ctx).into(),
        ContentKind::Quiz => check::<Quiz>(raw, ctx).into(),
        ContentKind::FlashcardSet => check::<FlashcardSet>(raw, ctx).into(),
    }
}
