//! Deterministic minimal objects returned when every generation attempt failed.
//!
//! Each fallback passes validation for its kind, so downstream code never has to
//! special-case a missing object. They are placeholders, not content.

use crate::constants::{
    DEFAULT_DURATION, DEFAULT_FLASHCARD_CATEGORY, DEFAULT_PASSING_SCORE,
    DEFAULT_TIME_LIMIT_MINUTES,
};
use crate::shape::ShapeContext;
use coursegen_types::{
    ChapterContent, ChapterSummary, ClinicalTopic, Course, Difficulty, Flashcard, FlashcardSet,
    GeneralTopic, Question, Quiz, Topic,
};

fn subject(ctx: &ShapeContext) -> &str {
    ctx.topic_label().unwrap_or("this course")
}

pub fn fallback_course(ctx: &ShapeContext) -> Course {
    let name = ctx.topic_label().unwrap_or("Untitled Course");
    Course {
        course_name: name.to_string(),
        course_description: format!(
            "An introductory outline for {}. Content generation did not complete; regenerate to get the full course.",
            subject(ctx)
        ),
        chapters: vec![ChapterSummary {
            chapter_name: "Introduction".to_string(),
            chapter_description: format!("Overview of {}.", subject(ctx)),
            duration: DEFAULT_DURATION.to_string(),
        }],
    }
}

pub fn fallback_chapter(ctx: &ShapeContext) -> ChapterContent {
    let title = "Overview".to_string();
    let description = format!(
        "Content for {} could not be generated. Regenerate this chapter to replace this placeholder.",
        subject(ctx)
    );

    let topic = if ctx.is_health() {
        Topic::Clinical(ClinicalTopic {
            title,
            description,
            ..ClinicalTopic::default()
        })
    } else {
        Topic::General(GeneralTopic {
            title,
            description,
            code_example: None,
            sub_features: Vec::new(),
        })
    };

    ChapterContent {
        topics: vec![topic],
    }
}

pub fn fallback_quiz(ctx: &ShapeContext) -> Quiz {
    let subject = subject(ctx);
    Quiz {
        title: match ctx.topic_label() {
            Some(topic) => format!("{topic} Quiz"),
            None => "Course Quiz".to_string(),
        },
        description: format!("Placeholder quiz for {subject}."),
        questions: vec![Question {
            question: format!("Have you reviewed the material for {subject}?"),
            options: [
                "Yes".to_string(),
                "Partly".to_string(),
                "Not yet".to_string(),
                "Not sure".to_string(),
            ],
            correct_answer: 0,
            explanation: "The quiz could not be generated; regenerate it for real questions."
                .to_string(),
            difficulty: Difficulty::Easy,
            chapter: String::new(),
        }],
        time_limit: DEFAULT_TIME_LIMIT_MINUTES,
        passing_score: DEFAULT_PASSING_SCORE,
    }
}

pub fn fallback_flashcards(ctx: &ShapeContext) -> FlashcardSet {
    let subject = subject(ctx);
    FlashcardSet {
        title: match ctx.topic_label() {
            Some(topic) => format!("{topic} Flashcards"),
            None => "Course Flashcards".to_string(),
        },
        description: format!("Placeholder flashcards for {subject}."),
        flashcards: vec![Flashcard {
            front: format!("What is {subject} about?"),
            back: "Flashcards could not be generated; regenerate the set for real cards."
                .to_string(),
            difficulty: Difficulty::Easy,
            category: DEFAULT_FLASHCARD_CATEGORY.to_string(),
            tags: Vec::new(),
            chapter: String::new(),
        }],
    }
}
