//! Prompt templates for the text generator.
//!
//! Every template asks for bare JSON in the canonical shape. The normaliser still
//! accepts the looser shapes models tend to produce, but asking for the canonical one
//! keeps the repair loop short.

use crate::constants::{DEFAULT_CHAPTER_COUNT, DEFAULT_COURSE_DURATION};
use crate::shape::ShapeContext;
use coursegen_types::{ChapterSummary, ContentKind, Course};

/// What the user asked for when creating a course.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseRequest {
    pub category: String,
    pub topic: String,
    /// Audience level, e.g. `beginner`.
    pub level: String,
    /// Free-text overall length, e.g. `2 Hours`.
    pub duration: String,
    pub chapters: usize,
}

impl CourseRequest {
    pub fn new(
        category: impl Into<String>,
        topic: impl Into<String>,
        level: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            topic: topic.into(),
            level: level.into(),
            duration: DEFAULT_COURSE_DURATION.to_string(),
            chapters: DEFAULT_CHAPTER_COUNT,
        }
    }

    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = duration.into();
        self
    }

    pub fn with_chapters(mut self, chapters: usize) -> Self {
        self.chapters = chapters;
        self
    }

    /// Context for normalising and validating content generated for this request.
    pub fn context(&self) -> ShapeContext {
        ShapeContext::new()
            .with_topic(self.topic.clone())
            .with_category(self.category.clone())
    }

    pub fn is_health(&self) -> bool {
        self.context().is_health()
    }
}

const COURSE_SCHEMA: &str = r#"{
  "courseName": "Course title here",
  "courseDescription": "Brief description (50-200 words)",
  "chapters": [
    {
      "chapterName": "Chapter title",
      "chapterDescription": "Chapter description (20-100 words)",
      "duration": "15 mins"
    }
  ]
}"#;

const GENERAL_CHAPTER_SCHEMA: &str = r#"[
  {
    "title": "Topic title",
    "description": "Detailed explanation (100-500 words)",
    "codeExample": "practical code example or null",
    "subFeatures": [
      {
        "title": "Sub-topic title",
        "description": "Sub-topic explanation (50-200 words)",
        "codeExample": "code snippet or null"
      }
    ]
  }
]"#;

const CLINICAL_CHAPTER_SCHEMA: &str = r#"[
  {
    "title": "Topic title",
    "description": "Detailed explanation (100-500 words)",
    "symptoms": ["symptom"],
    "diagnosis": {
      "differential": ["condition"],
      "diagnosticTests": ["test"],
      "redFlags": ["warning sign"]
    },
    "treatment": {
      "primary": ["first-line treatment"],
      "alternatives": ["alternative"],
      "contraindications": ["contraindication"],
      "sideEffects": ["side effect"]
    },
    "caseStudy": {
      "patientProfile": "Age, sex, relevant history",
      "presentation": "Presenting complaint",
      "management": "What was done",
      "outcome": "What happened"
    },
    "clinicalPearls": ["pearl"],
    "mnemonics": ["mnemonic"]
  }
]"#;

const QUIZ_SCHEMA: &str = r#"{
  "title": "Quiz title",
  "description": "What the quiz covers",
  "timeLimit": 30,
  "passingScore": 70,
  "questions": [
    {
      "question": "Question text",
      "options": ["Option A", "Option B", "Option C", "Option D"],
      "correctAnswer": 0,
      "explanation": "Why the answer is correct",
      "difficulty": "easy | medium | hard",
      "chapter": "Chapter the question belongs to"
    }
  ]
}"#;

const FLASHCARD_SCHEMA: &str = r#"{
  "title": "Flashcard set title",
  "description": "What the set covers",
  "flashcards": [
    {
      "front": "Term or question",
      "back": "Definition or answer",
      "difficulty": "easy | medium | hard",
      "category": "general",
      "tags": ["up to 5 tags"],
      "chapter": "Chapter the card belongs to"
    }
  ]
}"#;

/// JSON layout expected for `kind`, as shown to the model.
pub fn schema_description(kind: ContentKind, ctx: &ShapeContext) -> &'static str {
    match kind {
        ContentKind::Course => COURSE_SCHEMA,
        ContentKind::Chapter if ctx.is_health() => CLINICAL_CHAPTER_SCHEMA,
        ContentKind::Chapter => GENERAL_CHAPTER_SCHEMA,
        ContentKind::Quiz => QUIZ_SCHEMA,
        ContentKind::FlashcardSet => FLASHCARD_SCHEMA,
    }
}

/// Writing guidance for an audience level.
pub fn level_guidelines(level: &str) -> &'static str {
    match level.trim().to_ascii_lowercase().as_str() {
        "beginner" => {
            "- Use simple, clear language\n- Explain fundamental concepts\n- Include step-by-step examples\n- Focus on practical applications"
        }
        "intermediate" => {
            "- Assume basic knowledge\n- Introduce advanced concepts\n- Show real-world use cases\n- Include optimization tips"
        }
        "advanced" => {
            "- Use technical terminology\n- Cover complex scenarios\n- Include performance considerations\n- Show industry best practices"
        }
        _ => "- Adapt content to audience level\n- Provide clear explanations\n- Include practical examples",
    }
}

pub fn course_prompt(request: &CourseRequest) -> String {
    let CourseRequest {
        category,
        topic,
        level,
        duration,
        chapters,
    } = request;
    format!(
        "Create a {level} level course about \"{topic}\" in the {category} category.\n\
         \n\
         STRICT REQUIREMENTS:\n\
         - Course duration: {duration}\n\
         - Number of chapters: EXACTLY {chapters} chapters (no more, no less)\n\
         - Respond with ONLY valid JSON\n\
         \n\
         JSON format (must contain exactly {chapters} chapters):\n\
         {COURSE_SCHEMA}\n\
         \n\
         IMPORTANT: The chapters array must contain exactly {chapters} chapters.\n"
    )
}

pub fn chapter_prompt(request: &CourseRequest, chapter: &ChapterSummary) -> String {
    let level = &request.level;
    let topic = &request.topic;
    let name = &chapter.chapter_name;
    let context = &chapter.chapter_description;

    let include = if request.is_health() {
        "- 4-6 main topics with descriptions\n\
         - Symptoms, diagnosis, treatment and a short case study where relevant\n\
         - Clinical pearls and mnemonics that aid recall"
    } else {
        "- 4-6 main topics with descriptions\n\
         - Code examples where relevant (80% of topics should have code)\n\
         - Sub-topics for complex concepts (at most 5 per topic)"
    };
    let schema = schema_description(ContentKind::Chapter, &request.context());
    let guidelines = level_guidelines(level);

    format!(
        "Create detailed content for the chapter \"{name}\" about {topic} for {level} level students.\n\
         \n\
         Chapter context: {context}\n\
         \n\
         Include:\n\
         {include}\n\
         \n\
         Respond with ONLY valid JSON:\n\
         {schema}\n\
         \n\
         Guidelines for {level} level:\n\
         {guidelines}\n"
    )
}

fn chapter_list(course: &Course) -> String {
    course
        .chapters
        .iter()
        .map(|c| format!("- {}", c.chapter_name))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn quiz_prompt(course: &Course, level: &str, questions: usize) -> String {
    let name = &course.course_name;
    let chapters = chapter_list(course);
    format!(
        "Create a {level} level multiple-choice quiz for the course \"{name}\".\n\
         \n\
         Chapters:\n\
         {chapters}\n\
         \n\
         STRICT REQUIREMENTS:\n\
         - EXACTLY {questions} questions, spread across the chapters\n\
         - Every question has exactly 4 options\n\
         - correctAnswer is the 0-based index of the correct option\n\
         - Respond with ONLY valid JSON\n\
         \n\
         JSON format:\n\
         {QUIZ_SCHEMA}\n"
    )
}

pub fn flashcard_prompt(course: &Course, level: &str, cards: usize) -> String {
    let name = &course.course_name;
    let chapters = chapter_list(course);
    format!(
        "Create {cards} study flashcards for {level} level students of the course \"{name}\".\n\
         \n\
         Chapters:\n\
         {chapters}\n\
         \n\
         STRICT REQUIREMENTS:\n\
         - Every card has a non-empty front and back\n\
         - At most 5 tags per card\n\
         - Respond with ONLY valid JSON\n\
         \n\
         JSON format:\n\
         {FLASHCARD_SCHEMA}\n"
    )
}

/// Follow-up prompt sent after an invalid attempt.
///
/// Triple backticks in the failed output are replaced so the embedded text cannot close
/// the surrounding fence.
pub fn repair_prompt(
    kind: ContentKind,
    ctx: &ShapeContext,
    candidate: &str,
    violations: &[String],
) -> String {
    let safe = candidate.replace("```", "'''");
    let problems = violations
        .iter()
        .map(|v| format!("- {v}"))
        .collect::<Vec<_>>()
        .join("\n");
    let schema = schema_description(kind, ctx);

    format!(
        "Your previous response could not be used as {kind} content.\n\
         \n\
         Problems:\n\
         {problems}\n\
         \n\
         Previous response:\n\
         ```json\n\
         {safe}\n\
         ```\n\
         \n\
         Return a corrected version that follows this JSON format exactly:\n\
         {schema}\n\
         \n\
         Rules:\n\
         - Respond with ONLY valid JSON, no explanation\n\
         - Do not omit required fields\n\
         - Do not put objects where arrays are expected\n"
    )
}
