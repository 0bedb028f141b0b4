//! Flashcard set normalisation.

use super::aliases::{
    unwrap_envelope, BACK, CARD_CATEGORY, CHAPTER_TAG, DIFFICULTY, FLASHCARDS, FLASHCARD_ENVELOPE,
    FRONT, SET_DESCRIPTION, SET_TITLE, TAGS,
};
use super::quiz::difficulty;
use super::text::{clean_text, string_set};
use super::{field, list};
use crate::constants::{DEFAULT_FLASHCARD_CATEGORY, MAX_TAGS};
use crate::shape::ShapeContext;
use coursegen_types::{Flashcard, FlashcardSet};
use serde_json::{Map, Value};

pub fn normalize_flashcards(value: &Value, ctx: &ShapeContext) -> FlashcardSet {
    let value = unwrap_envelope(value, FLASHCARD_ENVELOPE);

    match value {
        Value::Object(object) => FlashcardSet {
            title: clean_text(field(object, SET_TITLE)),
            description: clean_text(field(object, SET_DESCRIPTION)),
            flashcards: cards(list(object, FLASHCARDS)),
        },
        Value::Array(items) => {
            let topic = ctx.topic_label().unwrap_or("Course");
            FlashcardSet {
                title: format!("{topic} Flashcards"),
                description: format!("Key concepts from {topic}."),
                flashcards: cards(items),
            }
        }
        _ => FlashcardSet {
            title: String::new(),
            description: String::new(),
            flashcards: Vec::new(),
        },
    }
}

fn cards(items: &[Value]) -> Vec<Flashcard> {
    let mut out = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match item.as_object().and_then(card) {
            Some(card) => out.push(card),
            None => tracing::debug!("dropping flashcard {}: missing front or back", index + 1),
        }
    }
    out
}

fn card(object: &Map<String, Value>) -> Option<Flashcard> {
    let front = clean_text(field(object, FRONT));
    let back = clean_text(field(object, BACK));
    if front.is_empty() || back.is_empty() {
        return None;
    }

    let category = clean_text(field(object, CARD_CATEGORY));
    Some(Flashcard {
        front,
        back,
        difficulty: difficulty(field(object, DIFFICULTY)),
        category: if category.is_empty() {
            DEFAULT_FLASHCARD_CATEGORY.to_string()
        } else {
            category
        },
        tags: string_set(field(object, TAGS), MAX_TAGS),
        chapter: clean_text(field(object, CHAPTER_TAG)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursegen_types::Difficulty;
    use serde_json::json;

    fn norm(value: Value) -> FlashcardSet {
        normalize_flashcards(&value, &ShapeContext::default())
    }

    #[test]
    fn drops_card_missing_back() {
        let set = norm(json!({
            "title": "Deck",
            "flashcards": [
                {"front": "Ownership", "back": "Each value has one owner."},
                {"front": "Borrowing"}
            ]
        }));
        assert_eq!(set.flashcards.len(), 1);
        assert_eq!(set.flashcards[0].front, "Ownership");
    }

    #[test]
    fn applies_defaults_and_bounds_tags() {
        let set = norm(json!({
            "title": "Deck",
            "cards": [{
                "term": "Lifetime",
                "definition": "Scope for which a reference is valid.",
                "keywords": ["a", "b", "c", "d", "e", "f", "g"]
            }]
        }));
        let card = &set.flashcards[0];
        assert_eq!(card.category, "general");
        assert_eq!(card.difficulty, Difficulty::Medium);
        assert_eq!(card.tags.len(), 5);
        assert_eq!(card.chapter, "");
    }

    #[test]
    fn wraps_bare_array() {
        let ctx = ShapeContext::new().with_topic("Cardiology");
        let set = normalize_flashcards(&json!([{"front": "MI", "back": "Myocardial infarction"}]), &ctx);
        assert_eq!(set.title, "Cardiology Flashcards");
        assert_eq!(set.flashcards.len(), 1);
    }

    #[test]
    fn unwraps_envelope() {
        let set = norm(json!({"flashcardSet": {"title": "Inner", "flashcards": []}}));
        assert_eq!(set.title, "Inner");
    }

    #[test]
    fn whitespace_only_sides_count_as_missing() {
        let set = norm(json!({"flashcards": [{"front": "   ", "back": "x"}]}));
        assert!(set.flashcards.is_empty());
    }
}
