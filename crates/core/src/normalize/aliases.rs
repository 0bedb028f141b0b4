//! Field alias tables.
//!
//! Each canonical field lists, in priority order, every key under which some version of
//! the prompt templates or model has produced it. The canonical key always comes first so
//! that normalising an already-canonical object reads exactly the fields it wrote.

use serde_json::{Map, Value};

pub const COURSE_NAME: &[&str] = &["courseName", "course_name", "name", "title", "courseTitle"];
pub const COURSE_DESCRIPTION: &[&str] = &[
    "courseDescription",
    "course_description",
    "description",
    "summary",
];
pub const CHAPTERS: &[&str] = &["chapters", "chapterList", "chapter_list", "modules"];
pub const COURSE_ENVELOPE: &[&str] = &["course", "courseOutput", "course_output"];

pub const CHAPTER_NAME: &[&str] = &["chapterName", "chapter_name", "name", "title"];
pub const CHAPTER_DESCRIPTION: &[&str] = &[
    "chapterDescription",
    "chapter_description",
    "description",
    "about",
];
pub const DURATION: &[&str] = &["duration", "time", "estimatedTime", "estimated_time"];

pub const TOPICS: &[&str] = &["topics", "sections", "content"];
pub const CHAPTER_ENVELOPE: &[&str] = &["chapter", "chapterContent", "chapter_content"];
pub const TOPIC_TITLE: &[&str] = &["title", "name", "topic", "heading"];
pub const TOPIC_DESCRIPTION: &[&str] = &["description", "desc", "explanation", "details"];
pub const CODE_EXAMPLE: &[&str] = &["codeExample", "code_example", "code", "example"];
pub const SUB_FEATURES: &[&str] = &[
    "subFeatures",
    "sub_features",
    "subFeartures",
    "subTopics",
    "sub_topics",
    "subtopics",
];

pub const SYMPTOMS: &[&str] = &["symptoms", "signs", "signsAndSymptoms"];
pub const DIAGNOSIS: &[&str] = &["diagnosis"];
pub const DIFFERENTIAL: &[&str] = &["differential", "differentialDiagnosis", "differentials"];
pub const DIAGNOSTIC_TESTS: &[&str] = &[
    "diagnosticTests",
    "diagnostic_tests",
    "tests",
    "investigations",
];
pub const RED_FLAGS: &[&str] = &["redFlags", "red_flags", "warningSigns"];
pub const TREATMENT: &[&str] = &["treatment", "management"];
pub const TREATMENT_PRIMARY: &[&str] = &["primary", "firstLine", "first_line"];
pub const TREATMENT_ALTERNATIVES: &[&str] = &["alternatives", "alternative", "secondLine"];
pub const CONTRAINDICATIONS: &[&str] = &["contraindications"];
pub const SIDE_EFFECTS: &[&str] = &["sideEffects", "side_effects", "adverseEffects"];
pub const CASE_STUDY: &[&str] = &["caseStudy", "case_study", "case"];
pub const CASE_PATIENT: &[&str] = &["patientProfile", "patient_profile", "patient"];
pub const CASE_PRESENTATION: &[&str] = &["presentation", "scenario", "history"];
pub const CASE_MANAGEMENT: &[&str] = &["management", "plan"];
pub const CASE_OUTCOME: &[&str] = &["outcome", "result"];
pub const CLINICAL_PEARLS: &[&str] = &["clinicalPearls", "clinical_pearls", "pearls", "keyPoints"];
pub const MNEMONICS: &[&str] = &["mnemonics", "memoryAids"];

pub const QUIZ_ENVELOPE: &[&str] = &["quiz"];
pub const QUIZ_TITLE: &[&str] = &["title", "quizTitle", "quiz_title", "name"];
pub const QUIZ_DESCRIPTION: &[&str] = &["description", "quizDescription", "summary"];
pub const QUESTIONS: &[&str] = &["questions", "quiz", "items", "questionList"];
pub const TIME_LIMIT: &[&str] = &["timeLimit", "time_limit"];
pub const PASSING_SCORE: &[&str] = &["passingScore", "passing_score", "passMark"];
pub const QUESTION_TEXT: &[&str] = &["question", "questionText", "question_text", "text", "prompt"];
pub const OPTIONS: &[&str] = &["options", "choices", "answers"];
pub const CORRECT_ANSWER: &[&str] = &[
    "correctAnswer",
    "correct_answer",
    "correctIndex",
    "correctOption",
    "answer",
];
pub const EXPLANATION: &[&str] = &["explanation", "rationale", "reason"];
pub const DIFFICULTY: &[&str] = &["difficulty", "level"];
pub const CHAPTER_TAG: &[&str] = &["chapter", "chapterName", "chapter_name", "topic"];

pub const FLASHCARD_ENVELOPE: &[&str] = &["flashcardSet", "flashcard_set", "deck"];
pub const SET_TITLE: &[&str] = &["title", "name", "setTitle"];
pub const SET_DESCRIPTION: &[&str] = &["description", "summary"];
pub const FLASHCARDS: &[&str] = &["flashcards", "cards", "flashCards", "flash_cards", "items"];
pub const FRONT: &[&str] = &["front", "question", "term", "prompt"];
pub const BACK: &[&str] = &["back", "answer", "definition", "explanation"];
pub const CARD_CATEGORY: &[&str] = &["category", "type"];
pub const TAGS: &[&str] = &["tags", "keywords"];

/// A value counts as present unless it is null or a blank string.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}

/// Resolve a canonical field: the value under the first alias that is present.
pub fn first_present<'a>(object: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Value> {
    aliases
        .iter()
        .filter_map(|key| object.get(*key))
        .find(|value| is_present(value))
}

/// Unwrap `{ "<envelope>": { ... } }` wrappers around a single object.
pub fn unwrap_envelope<'a>(value: &'a Value, envelopes: &[&str]) -> &'a Value {
    if let Value::Object(object) = value {
        if object.len() == 1 {
            if let Some(inner) = envelopes.iter().find_map(|key| object.get(*key)) {
                if inner.is_object() {
                    return inner;
                }
            }
        }
    }
    value
}
