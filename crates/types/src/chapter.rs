//! Chapter content shape.
//!
//! A chapter is an ordered list of topics. Which topic variant is used depends on the
//! category of the course the chapter belongs to: health courses carry clinical detail
//! (symptoms, diagnosis, treatment) instead of code examples and sub-features.

use serde::{Deserialize, Serialize};

/// Detailed content for one chapter. Serialises as a bare JSON array of topics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChapterContent {
    pub topics: Vec<Topic>,
}

impl ChapterContent {
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }
}

/// A chapter topic, selected by course category.
///
/// The wire form is untagged; the variants are told apart by their keys (general topics
/// always carry `codeExample` and `subFeatures`, clinical topics never do).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Topic {
    Clinical(ClinicalTopic),
    General(GeneralTopic),
}

impl Topic {
    pub fn title(&self) -> &str {
        match self {
            Topic::Clinical(t) => &t.title,
            Topic::General(t) => &t.title,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Topic::Clinical(t) => &t.description,
            Topic::General(t) => &t.description,
        }
    }
}

/// Topic for programming and general courses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GeneralTopic {
    pub title: String,
    pub description: String,
    pub code_example: Option<String>,
    /// At most five entries.
    pub sub_features: Vec<SubFeature>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SubFeature {
    pub title: String,
    pub description: String,
    pub code_example: Option<String>,
}

/// Topic for health courses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ClinicalTopic {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<Diagnosis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treatment: Option<Treatment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_study: Option<CaseStudy>,
    #[serde(default)]
    pub clinical_pearls: Vec<String>,
    #[serde(default)]
    pub mnemonics: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Diagnosis {
    #[serde(default)]
    pub differential: Vec<String>,
    #[serde(default)]
    pub diagnostic_tests: Vec<String>,
    #[serde(default)]
    pub red_flags: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Treatment {
    #[serde(default)]
    pub primary: Vec<String>,
    #[serde(default)]
    pub alternatives: Vec<String>,
    #[serde(default)]
    pub contraindications: Vec<String>,
    #[serde(default)]
    pub side_effects: Vec<String>,
}

/// Short patient narrative used to illustrate a clinical topic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CaseStudy {
    #[serde(default)]
    pub patient_profile: String,
    #[serde(default)]
    pub presentation: String,
    #[serde(default)]
    pub management: String,
    #[serde(default)]
    pub outcome: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn general() -> Topic {
        Topic::General(GeneralTopic {
            title: "Closures".into(),
            description: "Anonymous functions that capture their environment.".into(),
            code_example: None,
            sub_features: vec![],
        })
    }

    fn clinical() -> Topic {
        Topic::Clinical(ClinicalTopic {
            title: "Asthma".into(),
            description: "Chronic inflammatory disease of the airways.".into(),
            symptoms: vec!["wheeze".into()],
            ..Default::default()
        })
    }

    #[test]
    fn chapter_serialises_as_bare_array() {
        let chapter = ChapterContent {
            topics: vec![general()],
        };
        let json = serde_json::to_value(&chapter).expect("serialise");
        assert!(json.is_array());
        assert_eq!(json[0]["title"], "Closures");
        assert!(json[0]["codeExample"].is_null());
    }

    #[test]
    fn untagged_topics_keep_their_variant_when_read_back() {
        let chapter = ChapterContent {
            topics: vec![general(), clinical()],
        };
        let json = serde_json::to_string(&chapter).expect("serialise");
        let back: ChapterContent = serde_json::from_str(&json).expect("deserialise");
        assert_eq!(back, chapter);
        assert!(matches!(back.topics[0], Topic::General(_)));
        assert!(matches!(back.topics[1], Topic::Clinical(_)));
    }

    #[test]
    fn clinical_topic_omits_absent_sections() {
        let json = serde_json::to_value(clinical()).expect("serialise");
        assert!(json.get("diagnosis").is_none());
        assert_eq!(json["symptoms"][0], "wheeze");
        assert!(json["clinicalPearls"].as_array().is_some_and(|a| a.is_empty()));
    }
}
