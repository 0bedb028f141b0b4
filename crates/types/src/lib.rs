//! Canonical content shapes for generated course material.
//!
//! These are the stable, persisted forms that the pipeline in `coursegen-core` coerces
//! model output into. Every shape serialises with camelCase keys, which is also the
//! key convention of the documents already stored by the application.
//!
//! The types here carry no validation logic of their own. Bounds such as "exactly four
//! options" are expressed in the type where that is cheap (`[String; 4]`), and otherwise
//! checked by the validator in `coursegen-core`.

pub mod chapter;
pub mod course;
pub mod flashcard;
pub mod quiz;

pub use chapter::{
    CaseStudy, ChapterContent, ClinicalTopic, Diagnosis, GeneralTopic, SubFeature, Topic,
    Treatment,
};
pub use course::{ChapterSummary, Course};
pub use flashcard::{Flashcard, FlashcardSet};
pub use quiz::{Question, Quiz};

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Errors that can occur when parsing the small enumerations in this crate.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TypeError {
    /// The content kind name is not one of the supported kinds
    #[error("unknown content kind '{0}' (expected course, chapter, quiz or flashcard-set)")]
    UnknownContentKind(String),

    /// The difficulty name is not easy, medium or hard
    #[error("unknown difficulty '{0}'")]
    UnknownDifficulty(String),
}

/// Difficulty rating shared by quiz questions and flashcards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(TypeError::UnknownDifficulty(s.to_string())),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four kinds of content the pipeline knows how to produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// Course outline with chapter summaries.
    Course,
    /// Detailed topic list for a single chapter.
    Chapter,
    /// Multiple-choice quiz.
    Quiz,
    /// Set of study flashcards.
    FlashcardSet,
}

impl ContentKind {
    pub const ALL: [ContentKind; 4] = [
        ContentKind::Course,
        ContentKind::Chapter,
        ContentKind::Quiz,
        ContentKind::FlashcardSet,
    ];

    /// Canonical name used on the command line and in log output.
    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Course => "course",
            ContentKind::Chapter => "chapter",
            ContentKind::Quiz => "quiz",
            ContentKind::FlashcardSet => "flashcard-set",
        }
    }
}

impl FromStr for ContentKind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "course" => Ok(ContentKind::Course),
            "chapter" | "chapter-content" => Ok(ContentKind::Chapter),
            "quiz" => Ok(ContentKind::Quiz),
            "flashcard-set" | "flashcards" | "flashcard" => Ok(ContentKind::FlashcardSet),
            _ => Err(TypeError::UnknownContentKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A canonical object of any kind.
///
/// Serialises as the inner shape only, so a `Content` can be handed to the persistence
/// layer as-is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Content {
    Course(Course),
    Chapter(ChapterContent),
    Quiz(Quiz),
    FlashcardSet(FlashcardSet),
}

impl Content {
    pub fn kind(&self) -> ContentKind {
        match self {
            Content::Course(_) => ContentKind::Course,
            Content::Chapter(_) => ContentKind::Chapter,
            Content::Quiz(_) => ContentKind::Quiz,
            Content::FlashcardSet(_) => ContentKind::FlashcardSet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_kind_accepts_known_names_and_aliases() {
        assert_eq!("course".parse::<ContentKind>(), Ok(ContentKind::Course));
        assert_eq!(
            "Chapter-Content".parse::<ContentKind>(),
            Ok(ContentKind::Chapter)
        );
        assert_eq!(" quiz ".parse::<ContentKind>(), Ok(ContentKind::Quiz));
        assert_eq!(
            "flashcards".parse::<ContentKind>(),
            Ok(ContentKind::FlashcardSet)
        );
    }

    #[test]
    fn content_kind_rejects_unknown_names() {
        let err = "syllabus".parse::<ContentKind>().expect_err("should reject");
        assert!(matches!(err, TypeError::UnknownContentKind(name) if name == "syllabus"));
    }

    #[test]
    fn content_kind_names_round_trip() {
        for kind in ContentKind::ALL {
            assert_eq!(kind.as_str().parse::<ContentKind>(), Ok(kind));
        }
    }

    #[test]
    fn difficulty_parses_case_insensitively_and_serialises_lowercase() {
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("impossible".parse::<Difficulty>().is_err());
        assert_eq!(
            serde_json::to_string(&Difficulty::Easy).expect("serialise"),
            "\"easy\""
        );
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }
}
