//! Quiz normalisation.

use super::aliases::{
    unwrap_envelope, CHAPTER_TAG, CORRECT_ANSWER, DIFFICULTY, EXPLANATION, OPTIONS, PASSING_SCORE,
    QUESTIONS, QUESTION_TEXT, QUIZ_DESCRIPTION, QUIZ_ENVELOPE, QUIZ_TITLE, TIME_LIMIT,
};
use super::text::{clean_scalar, clean_text, coerce_u32};
use super::{field, list};
use crate::constants::{DEFAULT_PASSING_SCORE, DEFAULT_TIME_LIMIT_MINUTES, QUIZ_OPTION_COUNT};
use crate::shape::ShapeContext;
use coursegen_types::{Difficulty, Question, Quiz};
use serde_json::{Map, Value};

pub fn normalize_quiz(value: &Value, ctx: &ShapeContext) -> Quiz {
    let value = unwrap_envelope(value, QUIZ_ENVELOPE);

    match value {
        Value::Object(object) => Quiz {
            title: clean_text(field(object, QUIZ_TITLE)),
            description: clean_text(field(object, QUIZ_DESCRIPTION)),
            questions: questions(list(object, QUESTIONS)),
            time_limit: coerce_u32(field(object, TIME_LIMIT))
                .filter(|minutes| *minutes > 0)
                .unwrap_or(DEFAULT_TIME_LIMIT_MINUTES),
            passing_score: coerce_u32(field(object, PASSING_SCORE))
                .map(|score| score.min(100))
                .unwrap_or(DEFAULT_PASSING_SCORE),
        },
        Value::Array(items) => {
            let (title, description) = synthesized_header(ctx);
            Quiz {
                title,
                description,
                questions: questions(items),
                time_limit: DEFAULT_TIME_LIMIT_MINUTES,
                passing_score: DEFAULT_PASSING_SCORE,
            }
        }
        _ => Quiz {
            title: String::new(),
            description: String::new(),
            questions: Vec::new(),
            time_limit: DEFAULT_TIME_LIMIT_MINUTES,
            passing_score: DEFAULT_PASSING_SCORE,
        },
    }
}

fn synthesized_header(ctx: &ShapeContext) -> (String, String) {
    match ctx.topic_label() {
        Some(topic) => (
            format!("{topic} Quiz"),
            format!("Test your knowledge of {topic}."),
        ),
        None => (
            "Course Quiz".to_string(),
            "Test your knowledge of this course.".to_string(),
        ),
    }
}

fn questions(items: &[Value]) -> Vec<Question> {
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let question = item.as_object().and_then(question);
            if question.is_none() {
                tracing::debug!("dropping quiz question {}: structurally invalid", index + 1);
            }
            question
        })
        .collect()
}

fn question(object: &Map<String, Value>) -> Option<Question> {
    let text = clean_text(field(object, QUESTION_TEXT));
    if text.is_empty() {
        return None;
    }

    let options = options(field(object, OPTIONS)?)?;
    let correct_answer = correct_index(field(object, CORRECT_ANSWER)?, &options)?;

    Some(Question {
        question: text,
        options,
        correct_answer,
        explanation: clean_text(field(object, EXPLANATION)),
        difficulty: difficulty(field(object, DIFFICULTY)),
        chapter: clean_text(field(object, CHAPTER_TAG)),
    })
}

fn options(value: &Value) -> Option<[String; 4]> {
    let Value::Array(items) = value else {
        return None;
    };
    if items.len() != QUIZ_OPTION_COUNT {
        return None;
    }
    let cleaned: Vec<String> = items.iter().map(clean_scalar).collect();
    if cleaned.iter().any(String::is_empty) {
        return None;
    }
    cleaned.try_into().ok()
}

/// Resolve the correct answer to an option index.
///
/// Accepts an index, a numeric string, a letter `A`-`D`, or the text of one of the
/// options (case-insensitive).
fn correct_index(value: &Value, options: &[String; 4]) -> Option<u8> {
    let index = match value {
        Value::Number(n) => n.as_u64()?,
        Value::String(raw) => {
            let raw = raw.trim();
            if let Ok(n) = raw.parse::<u64>() {
                n
            } else if let Some(n) = letter_index(raw) {
                n
            } else {
                let wanted = clean_scalar(value);
                options
                    .iter()
                    .position(|option| option.eq_ignore_ascii_case(&wanted))? as u64
            }
        }
        _ => return None,
    };
    u8::try_from(index)
        .ok()
        .filter(|i| usize::from(*i) < QUIZ_OPTION_COUNT)
}

fn letter_index(raw: &str) -> Option<u64> {
    let raw = raw.trim_end_matches([')', '.', ':']);
    let mut chars = raw.chars();
    let letter = chars.next()?.to_ascii_uppercase();
    if chars.next().is_some() {
        return None;
    }
    match letter {
        'A' => Some(0),
        'B' => Some(1),
        'C' => Some(2),
        'D' => Some(3),
        _ => None,
    }
}

pub(crate) fn difficulty(value: Option<&Value>) -> Difficulty {
    match value {
        Some(Value::String(raw)) => raw.parse().unwrap_or_default(),
        _ => Difficulty::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn norm(value: Value) -> Quiz {
        normalize_quiz(&value, &ShapeContext::default())
    }

    fn q(options: Value, answer: Value) -> Value {
        json!({"question": "Which one?", "options": options, "correctAnswer": answer})
    }

    #[test]
    fn wraps_bare_question_array() {
        let ctx = ShapeContext::new().with_topic("Rust");
        let quiz = normalize_quiz(
            &json!([
                {"question": "Q1?", "options": ["a", "b", "c", "d"], "correctAnswer": 1},
                {"question": "Q2?", "options": ["a", "b", "c", "d"], "correctAnswer": 3}
            ]),
            &ctx,
        );
        assert_eq!(quiz.title, "Rust Quiz");
        assert!(!quiz.description.is_empty());
        assert_eq!(quiz.questions.len(), 2);
        assert_eq!(quiz.time_limit, 30);
        assert_eq!(quiz.passing_score, 70);
    }

    #[test]
    fn bare_array_without_topic_gets_generic_title() {
        assert_eq!(norm(json!([])).title, "Course Quiz");
    }

    #[test]
    fn drops_question_with_three_options() {
        let quiz = norm(json!({
            "title": "T",
            "questions": [
                q(json!(["a", "b", "c"]), json!(0)),
                q(json!(["a", "b", "c", "d"]), json!(2))
            ]
        }));
        assert_eq!(quiz.questions.len(), 1);
        assert_eq!(quiz.questions[0].correct_answer, 2);
    }

    #[test]
    fn resolves_answer_forms() {
        let opts = json!(["Paris", "Rome", "Madrid", "Berlin"]);
        let cases = [
            (json!(1), 1),
            (json!("2"), 2),
            (json!("d"), 3),
            (json!("B)"), 1),
            (json!("paris"), 0),
        ];
        for (answer, expected) in cases {
            let quiz = norm(json!({"title": "T", "questions": [q(opts.clone(), answer.clone())]}));
            assert_eq!(quiz.questions.len(), 1, "answer {answer}");
            assert_eq!(quiz.questions[0].correct_answer, expected, "answer {answer}");
        }
    }

    #[test]
    fn drops_unresolvable_answers() {
        let opts = json!(["a", "b", "c", "d"]);
        for answer in [json!(4), json!(-1), json!("E"), json!("zebra"), json!(null)] {
            let quiz = norm(json!({"title": "T", "questions": [q(opts.clone(), answer)]}));
            assert!(quiz.questions.is_empty());
        }
    }

    #[test]
    fn numeric_options_are_rendered() {
        let quiz = norm(json!({"title": "T", "questions": [q(json!([1, 2, 3, 4]), json!(3))]}));
        assert_eq!(quiz.questions[0].options[3], "4");
    }

    #[test]
    fn reads_aliases_and_coerces_numbers() {
        let quiz = norm(json!({
            "quiz": {
                "quizTitle": "Week 1",
                "time_limit": "45",
                "passingScore": 150,
                "questions": [{
                    "questionText": "Pick",
                    "choices": ["a", "b", "c", "d"],
                    "answer": "A",
                    "level": "HARD",
                    "chapterName": "Intro"
                }]
            }
        }));
        assert_eq!(quiz.title, "Week 1");
        assert_eq!(quiz.time_limit, 45);
        assert_eq!(quiz.passing_score, 100);
        let question = &quiz.questions[0];
        assert_eq!(question.difficulty, Difficulty::Hard);
        assert_eq!(question.chapter, "Intro");
    }

    #[test]
    fn questions_nested_under_quiz_key_are_found() {
        let quiz = norm(json!({"quiz": [q(json!(["a", "b", "c", "d"]), json!(0))]}));
        assert_eq!(quiz.questions.len(), 1);
    }

    #[test]
    fn zero_time_limit_uses_default_and_bad_difficulty_is_medium() {
        let quiz = norm(json!({
            "title": "T",
            "timeLimit": 0,
            "questions": [{"question": "Q", "options": ["a","b","c","d"], "correctAnswer": 0, "difficulty": "brutal"}]
        }));
        assert_eq!(quiz.time_limit, 30);
        assert_eq!(quiz.questions[0].difficulty, Difficulty::Medium);
    }
}
