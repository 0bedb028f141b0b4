//! Strict reading of already-canonical documents.
//!
//! Persisted content was normalised before it was stored, so it is read back without any
//! alias or coercion handling: unknown keys and wrong types are errors.

use crate::{PipelineError, PipelineResult};
use coursegen_types::{ChapterContent, Content, ContentKind, Course, FlashcardSet, Quiz};
use serde::de::DeserializeOwned;

fn strict<T: DeserializeOwned>(kind: ContentKind, json_text: &str) -> PipelineResult<T> {
    let mut deserializer = serde_json::Deserializer::from_str(json_text);

    let parsed = match serde_path_to_error::deserialize::<_, T>(&mut deserializer) {
        Ok(parsed) => parsed,
        Err(err) => {
            let path = err.path().to_string();
            let source = err.into_inner();
            let path = if path.is_empty() || path == "." {
                "<root>"
            } else {
                path.as_str()
            };
            return Err(PipelineError::Canonical(format!(
                "{kind} schema mismatch at {path}: {source}"
            )));
        }
    };

    deserializer
        .end()
        .map_err(|e| PipelineError::Canonical(format!("{kind} has trailing data: {e}")))?;

    Ok(parsed)
}

/// Parse a canonical document of the given kind.
///
/// # Errors
///
/// Returns `PipelineError::Canonical` if:
/// - the text is not JSON of the canonical shape for `kind`,
/// - any unknown keys are present,
/// - a quiz question's `correctAnswer` does not index into its options.
pub fn read_canonical(kind: ContentKind, json_text: &str) -> PipelineResult<Content> {
    let content = match kind {
        ContentKind::Course => Content::Course(strict::<Course>(kind, json_text)?),
        ContentKind::Chapter => Content::Chapter(strict::<ChapterContent>(kind, json_text)?),
        ContentKind::Quiz => {
            let quiz = strict::<Quiz>(kind, json_text)?;
            if let Some(index) = quiz
                .questions
                .iter()
                .position(|q| q.correct_option().is_none())
            {
                return Err(PipelineError::Canonical(format!(
                    "quiz schema mismatch at questions[{index}].correctAnswer: index out of range"
                )));
            }
            Content::Quiz(quiz)
        }
        ContentKind::FlashcardSet => {
            Content::FlashcardSet(strict::<FlashcardSet>(kind, json_text)?)
        }
    };
    Ok(content)
}
