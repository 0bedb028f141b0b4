//! # Coursegen Core
//!
//! Turns the output of an unreliable text generator into canonical course content.
//!
//! The pipeline has five stages:
//! - **extract** / **parse**: recover a JSON value from a free-form response
//! - **normalize**: map that value onto one of the canonical shapes
//! - **validate**: check the shape's structural requirements
//! - **generation**: retry with repair prompts, then fall back
//!
//! **No transport concerns**: calling a model, HTTP routes and persistence belong to the
//! caller. The model is reached only through the [`TextGenerator`] trait.

pub mod canonical;
pub mod config;
pub mod constants;
pub mod error;
pub mod extract;
pub mod fallback;
pub mod generation;
pub mod normalize;
pub mod parse;
pub mod prompts;
pub mod shape;
pub mod validate;

pub use canonical::read_canonical;
pub use config::PipelineConfig;
pub use error::{DecodeError, GenerationError, PipelineError, PipelineResult};
pub use generation::{GenerationPipeline, Generated, Outcome, ScriptedGenerator, TextGenerator};
pub use parse::{decode, Decoded, RawResponse, Strategy};
pub use prompts::CourseRequest;
pub use shape::{ContentShape, ShapeContext};
pub use validate::{validate_and_normalize, validate_content, Validation, ValidationReport};

pub use coursegen_types::{
    ChapterContent, Content, ContentKind, Course, Difficulty, FlashcardSet, Quiz,
};
