//! Constants used throughout the coursegen core crate.
//!
//! Bounds and defaults for the canonical shapes live here so the normaliser, the
//! validator and the prompt templates agree on them.

/// Default number of generation attempts before falling back.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Upper bound accepted for the configured attempt count.
pub const MAX_ATTEMPTS_LIMIT: u32 = 10;

/// Base backoff between attempts; attempt `n` waits `n` times this.
pub const DEFAULT_BACKOFF_MS: u64 = 1_000;

/// Pause between items of a multi-chapter generation run.
pub const DEFAULT_INTER_ITEM_DELAY_MS: u64 = 2_000;

/// Duration used when a chapter duration is missing or unparsable.
pub const DEFAULT_DURATION: &str = "30 mins";

pub const DEFAULT_TIME_LIMIT_MINUTES: u32 = 30;
pub const DEFAULT_PASSING_SCORE: u32 = 70;
pub const DEFAULT_FLASHCARD_CATEGORY: &str = "general";

/// Maximum sub-features kept per topic.
pub const MAX_SUB_FEATURES: usize = 5;

/// Maximum tags kept per flashcard.
pub const MAX_TAGS: usize = 5;

/// Number of options every quiz question must have.
pub const QUIZ_OPTION_COUNT: usize = 4;

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_COURSE_DESCRIPTION_LEN: usize = 500;
pub const MIN_COURSE_DESCRIPTION_LEN: usize = 10;
pub const MAX_CHAPTER_DESCRIPTION_LEN: usize = 300;
pub const MIN_TOPIC_DESCRIPTION_LEN: usize = 20;
pub const MAX_TOPIC_DESCRIPTION_LEN: usize = 1_000;
pub const MIN_SUB_FEATURE_DESCRIPTION_LEN: usize = 10;
pub const MAX_SUB_FEATURE_DESCRIPTION_LEN: usize = 500;

/// Course category whose chapters use clinical topics.
pub const HEALTH_CATEGORY: &str = "health";

/// Course category whose topics are expected to carry code examples.
pub const PROGRAMMING_CATEGORY: &str = "programming";

/// Course length requested when the caller does not give one.
pub const DEFAULT_COURSE_DURATION: &str = "2 Hours";

/// Chapter count requested when the caller does not give one.
pub const DEFAULT_CHAPTER_COUNT: usize = 6;

pub const DEFAULT_QUIZ_QUESTIONS: usize = 10;
pub const DEFAULT_FLASHCARD_COUNT: usize = 20;
