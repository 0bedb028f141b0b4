//! Chapter content normalisation.
//!
//! Accepts a topic array, an object wrapping one under `topics`, or a single topic
//! object. Health courses produce clinical topics; everything else produces general
//! topics with code examples and sub-features.

use super::aliases::{
    unwrap_envelope, CASE_MANAGEMENT, CASE_OUTCOME, CASE_PATIENT, CASE_PRESENTATION, CASE_STUDY,
    CHAPTER_ENVELOPE, CLINICAL_PEARLS, CODE_EXAMPLE, CONTRAINDICATIONS, DIAGNOSIS,
    DIAGNOSTIC_TESTS, DIFFERENTIAL, MNEMONICS, RED_FLAGS, SIDE_EFFECTS, SUB_FEATURES, SYMPTOMS,
    TOPICS, TOPIC_DESCRIPTION, TOPIC_TITLE, TREATMENT, TREATMENT_ALTERNATIVES, TREATMENT_PRIMARY,
};
use super::text::{clean_code, clean_text, string_set};
use super::{field, list};
use crate::constants::MAX_SUB_FEATURES;
use crate::shape::ShapeContext;
use coursegen_types::{
    CaseStudy, ChapterContent, ClinicalTopic, Diagnosis, GeneralTopic, SubFeature, Topic,
    Treatment,
};
use serde_json::{Map, Value};

const MAX_LIST_ITEMS: usize = 20;

pub fn normalize_chapter(value: &Value, ctx: &ShapeContext) -> ChapterContent {
    let value = unwrap_envelope(value, CHAPTER_ENVELOPE);

    let items: &[Value] = match value {
        Value::Array(items) => items,
        Value::Object(object) => match field(object, TOPICS) {
            Some(Value::Array(items)) => items,
            _ => std::slice::from_ref(value),
        },
        _ => &[],
    };

    let mut topics = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let Value::Object(object) = item else {
            tracing::debug!("dropping topic {}: not an object", index + 1);
            continue;
        };

        let mut title = clean_text(field(object, TOPIC_TITLE));
        let description = clean_text(field(object, TOPIC_DESCRIPTION));
        if title.is_empty() && description.is_empty() {
            tracing::debug!("dropping topic {}: no title or description", index + 1);
            continue;
        }
        if title.is_empty() {
            title = format!("Topic {}", topics.len() + 1);
        }

        let topic = if ctx.is_health() {
            Topic::Clinical(clinical_topic(object, title, description))
        } else {
            Topic::General(GeneralTopic {
                title,
                description,
                code_example: clean_code(field(object, CODE_EXAMPLE)),
                sub_features: sub_features(list(object, SUB_FEATURES)),
            })
        };
        topics.push(topic);
    }

    ChapterContent { topics }
}

fn sub_features(items: &[Value]) -> Vec<SubFeature> {
    let mut out = Vec::new();
    for item in items {
        let Value::Object(object) = item else {
            continue;
        };
        let mut title = clean_text(field(object, TOPIC_TITLE));
        let description = clean_text(field(object, TOPIC_DESCRIPTION));
        if title.is_empty() && description.is_empty() {
            continue;
        }
        if title.is_empty() {
            title = format!("Subtopic {}", out.len() + 1);
        }
        out.push(SubFeature {
            title,
            description,
            code_example: clean_code(field(object, CODE_EXAMPLE)),
        });
        if out.len() == MAX_SUB_FEATURES {
            break;
        }
    }
    out
}

fn clinical_topic(object: &Map<String, Value>, title: String, description: String) -> ClinicalTopic {
    ClinicalTopic {
        title,
        description,
        symptoms: string_set(field(object, SYMPTOMS), MAX_LIST_ITEMS),
        diagnosis: sub_object(object, DIAGNOSIS).and_then(diagnosis),
        treatment: sub_object(object, TREATMENT).and_then(treatment),
        case_study: field(object, CASE_STUDY).and_then(case_study),
        clinical_pearls: string_set(field(object, CLINICAL_PEARLS), MAX_LIST_ITEMS),
        mnemonics: string_set(field(object, MNEMONICS), MAX_LIST_ITEMS),
    }
}

fn sub_object<'a>(object: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Map<String, Value>> {
    field(object, aliases).and_then(Value::as_object)
}

fn diagnosis(object: &Map<String, Value>) -> Option<Diagnosis> {
    let diagnosis = Diagnosis {
        differential: string_set(field(object, DIFFERENTIAL), MAX_LIST_ITEMS),
        diagnostic_tests: string_set(field(object, DIAGNOSTIC_TESTS), MAX_LIST_ITEMS),
        red_flags: string_set(field(object, RED_FLAGS), MAX_LIST_ITEMS),
    };
    (diagnosis != Diagnosis::default()).then_some(diagnosis)
}

fn treatment(object: &Map<String, Value>) -> Option<Treatment> {
    let treatment = Treatment {
        primary: string_set(field(object, TREATMENT_PRIMARY), MAX_LIST_ITEMS),
        alternatives: string_set(field(object, TREATMENT_ALTERNATIVES), MAX_LIST_ITEMS),
        contraindications: string_set(field(object, CONTRAINDICATIONS), MAX_LIST_ITEMS),
        side_effects: string_set(field(object, SIDE_EFFECTS), MAX_LIST_ITEMS),
    };
    (treatment != Treatment::default()).then_some(treatment)
}

fn case_study(value: &Value) -> Option<CaseStudy> {
    let case = match value {
        Value::String(_) => CaseStudy {
            presentation: clean_text(Some(value)),
            ..CaseStudy::default()
        },
        Value::Object(object) => CaseStudy {
            patient_profile: clean_text(field(object, CASE_PATIENT)),
            presentation: clean_text(field(object, CASE_PRESENTATION)),
            management: clean_text(field(object, CASE_MANAGEMENT)),
            outcome: clean_text(field(object, CASE_OUTCOME)),
        },
        _ => return None,
    };
    (case != CaseStudy::default()).then_some(case)
}
