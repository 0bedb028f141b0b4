use coursegen_core::parse::{decode, Strategy as DecodeStrategy};
use coursegen_core::{ChapterContent, ContentShape, Course, FlashcardSet, Quiz, ShapeContext};
use proptest::prelude::*;
use serde_json::{Map, Value};

/// Keys drawn from the alias tables so generated objects hit the normaliser's lookups.
const KEYS: &[&str] = &[
    "title", "name", "description", "desc", "courseName", "course_name", "chapters",
    "chapterName", "chapter_name", "duration", "topics", "content", "codeExample", "code",
    "subFeatures", "subFeartures", "questions", "question", "options", "choices",
    "correctAnswer", "answer", "explanation", "difficulty", "chapter", "timeLimit",
    "passingScore", "flashcards", "cards", "front", "back", "category", "tags", "quiz",
    "course", "symptoms", "diagnosis", "treatment", "caseStudy", "differential", "primary",
];

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        (-5i64..120).prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,16}".prop_map(Value::from),
        prop::sample::select(vec!["A", "b", "2", "easy", "HARD", "1 hour", "45 minutes", "<pre>x</pre>"])
            .prop_map(Value::from),
    ]
}

fn loose_json() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec((prop::sample::select(KEYS), inner), 0..8).prop_map(|pairs| {
                Value::Object(
                    pairs
                        .into_iter()
                        .map(|(k, v)| (k.to_string(), v))
                        .collect::<Map<_, _>>(),
                )
            }),
        ]
    })
}

fn flat_object() -> impl Strategy<Value = Value> {
    prop::collection::btree_map("[a-z]{1,8}", "[a-zA-Z0-9 ]{0,12}", 1..4).prop_map(|map| {
        Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
    })
}

fn contexts() -> impl Strategy<Value = ShapeContext> {
    prop_oneof![
        Just(ShapeContext::default()),
        Just(ShapeContext::new().with_topic("Rust").with_category("programming")),
        Just(ShapeContext::new().with_topic("Asthma").with_category("health")),
    ]
}

fn renormalised<C: ContentShape + PartialEq>(value: &Value, ctx: &ShapeContext) -> (C, C) {
    let first = C::normalize(value, ctx);
    let serialised = serde_json::to_value(&first).expect("canonical shapes serialise");
    let second = C::normalize(&serialised, ctx);
    (first, second)
}

proptest! {
    #[test]
    fn fenced_json_decodes_like_direct_json(
        value in prop::collection::vec(flat_object(), 0..4).prop_map(Value::Array),
        prefix in "[a-zA-Z ,.:]{0,30}",
        suffix in "[a-zA-Z ,.:]{0,30}",
    ) {
        let text = serde_json::to_string(&value).expect("serialise");
        let wrapped = format!("{prefix}\n```json\n{text}\n```\n{suffix}");

        let direct = decode(text.as_str()).expect("direct");
        let fenced = decode(wrapped).expect("fenced");
        prop_assert_eq!(fenced.value, direct.value);
    }

    #[test]
    fn truncated_array_keeps_complete_elements(
        elements in prop::collection::vec(flat_object(), 2..6),
        cut in 1usize..100,
    ) {
        let (last, complete) = elements.split_last().expect("at least two elements");
        let last_text = serde_json::to_string(last).expect("serialise");
        // Cut strictly inside the last element, before its closing brace.
        let cut = 1 + cut % (last_text.len() - 1);
        let body = complete
            .iter()
            .map(|e| serde_json::to_string(e).expect("serialise"))
            .collect::<Vec<_>>()
            .join(",");
        let truncated = format!("[{body},{}", &last_text[..cut]);

        let decoded = decode(truncated).expect("repaired");
        prop_assert_eq!(decoded.strategy, DecodeStrategy::TruncationRepair);
        prop_assert_eq!(decoded.value, Value::Array(complete.to_vec()));
    }

    #[test]
    fn decode_never_panics(text in ".{0,200}") {
        let _ = decode(text);
    }

    #[test]
    fn course_normalisation_is_idempotent(value in loose_json(), ctx in contexts()) {
        let (first, second) = renormalised::<Course>(&value, &ctx);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn chapter_normalisation_is_idempotent(value in loose_json(), ctx in contexts()) {
        let (first, second) = renormalised::<ChapterContent>(&value, &ctx);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn quiz_normalisation_is_idempotent(value in loose_json(), ctx in contexts()) {
        let (first, second) = renormalised::<Quiz>(&value, &ctx);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn flashcard_normalisation_is_idempotent(value in loose_json(), ctx in contexts()) {
        let (first, second) = renormalised::<FlashcardSet>(&value, &ctx);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn normalised_quiz_questions_always_satisfy_invariant(value in loose_json()) {
        let quiz = Quiz::normalize(&value, &ShapeContext::default());
        for question in &quiz.questions {
            prop_assert!(question.correct_option().is_some());
            prop_assert!(!question.question.is_empty());
        }
        prop_assert!(quiz.passing_score <= 100);
        prop_assert!(quiz.time_limit > 0);
    }
}
