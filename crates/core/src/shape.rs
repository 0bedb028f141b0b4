//! The `ContentShape` seam between the generic pipeline and the four canonical shapes.

use crate::constants::{HEALTH_CATEGORY, PROGRAMMING_CATEGORY};
use crate::validate::ValidationReport;
use crate::{fallback, normalize, validate};
use coursegen_types::{ChapterContent, Content, ContentKind, Course, FlashcardSet, Quiz};
use serde::Serialize;
use serde_json::Value;

/// Request context that influences normalisation and validation.
///
/// None of this is required; an empty context gives the generic behaviour.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShapeContext {
    /// Course topic, used for synthesised titles and fallbacks.
    pub topic: Option<String>,
    /// Course category; `"health"` switches chapter topics to the clinical variant.
    pub category: Option<String>,
    /// Number of chapters/questions/cards the prompt asked for.
    pub expected_count: Option<usize>,
}

impl ShapeContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_expected_count(mut self, count: usize) -> Self {
        self.expected_count = Some(count);
        self
    }

    fn category_is(&self, name: &str) -> bool {
        self.category
            .as_deref()
            .is_some_and(|c| c.trim().eq_ignore_ascii_case(name))
    }

    pub fn is_health(&self) -> bool {
        self.category_is(HEALTH_CATEGORY)
    }

    pub fn is_programming(&self) -> bool {
        self.category_is(PROGRAMMING_CATEGORY)
    }

    /// Topic text for synthesised titles, if one was given.
    pub fn topic_label(&self) -> Option<&str> {
        self.topic.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}

/// A canonical shape the pipeline can normalise, validate and fall back to.
pub trait ContentShape: Sized + Clone + Serialize + Send + std::fmt::Debug {
    const KIND: ContentKind;

    /// Coerce an arbitrary decoded value into this shape. Never fails.
    fn normalize(value: &Value, ctx: &ShapeContext) -> Self;

    /// Check minimum structural requirements.
    fn validate(&self, ctx: &ShapeContext) -> ValidationReport;

    /// Minimal valid object returned when every attempt failed.
    fn fallback(ctx: &ShapeContext) -> Self;

    fn into_content(self) -> Content;
}

impl ContentShape for Course {
    const KIND: ContentKind = ContentKind::Course;

    fn normalize(value: &Value, ctx: &ShapeContext) -> Self {
        normalize::course::normalize_course(value, ctx)
    }

    fn validate(&self, ctx: &ShapeContext) -> ValidationReport {
        validate::validate_course(self, ctx)
    }

    fn fallback(ctx: &ShapeContext) -> Self {
        fallback::fallback_course(ctx)
    }

    fn into_content(self) -> Content {
        Content::Course(self)
    }
}

impl ContentShape for ChapterContent {
    const KIND: ContentKind = ContentKind::Chapter;

    fn normalize(value: &Value, ctx: &ShapeContext) -> Self {
        normalize::chapter::normalize_chapter(value, ctx)
    }

    fn validate(&self, ctx: &ShapeContext) -> ValidationReport {
        validate::validate_chapter(self, ctx)
    }

    fn fallback(ctx: &ShapeContext) -> Self {
        fallback::fallback_chapter(ctx)
    }

    fn into_content(self) -> Content {
        Content::Chapter(self)
    }
}

impl ContentShape for Quiz {
    const KIND: ContentKind = ContentKind::Quiz;

    fn normalize(value: &Value, ctx: &ShapeContext) -> Self {
        normalize::quiz::normalize_quiz(value, ctx)
    }

    fn validate(&self, ctx: &ShapeContext) -> ValidationReport {
        validate::validate_quiz(self, ctx)
    }

    fn fallback(ctx: &ShapeContext) -> Self {
        fallback::fallback_quiz(ctx)
    }

    fn into_content(self) -> Content {
        Content::Quiz(self)
    }
}

impl ContentShape for FlashcardSet {
    const KIND: ContentKind = ContentKind::FlashcardSet;

    fn normalize(value: &Value, ctx: &ShapeContext) -> Self {
        normalize::flashcards::normalize_flashcards(value, ctx)
    }

    fn validate(&self, ctx: &ShapeContext) -> ValidationReport {
        validate::validate_flashcards(self, ctx)
    }

    fn fallback(ctx: &ShapeContext) -> Self {
        fallback::fallback_flashcards(ctx)
    }

    fn into_content(self) -> Content {
        Content::FlashcardSet(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_checks_are_case_insensitive() {
        let ctx = ShapeContext::new().with_category(" Health ");
        assert!(ctx.is_health());
        assert!(!ctx.is_programming());
        assert!(!ShapeContext::new().is_health());
    }

    #[test]
    fn blank_topic_has_no_label() {
        assert_eq!(ShapeContext::new().with_topic("  ").topic_label(), None);
        assert_eq!(
            ShapeContext::new().with_topic("Rust").topic_label(),
            Some("Rust")
        );
    }
}
