//! Retry/repair orchestration around the text generator.
//!
//! Each attempt runs the response through decode, normalise and validate. An invalid
//! attempt is followed by a repair prompt carrying the violations; when attempts run
//! out the deterministic fallback for the kind is returned instead. Generator failures
//! are never turned into fallbacks: they surface as [`PipelineError::Generation`].

use crate::config::PipelineConfig;
use crate::prompts::{chapter_prompt, repair_prompt, CourseRequest};
use crate::shape::{ContentShape, ShapeContext};
use crate::validate::check;
use crate::{GenerationError, PipelineResult};
use coursegen_types::{ChapterContent, Course};
use std::collections::VecDeque;
use std::future::Future;
use tokio::sync::Mutex;

/// The external text-generation capability.
pub trait TextGenerator: Send + Sync {
    fn generate(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<String, GenerationError>> + Send;
}

/// Generator that replays a fixed list of responses.
///
/// Used by tests and by the CLI `replay` command. Once the script is used up every
/// further call fails with [`GenerationError::Exhausted`].
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    responses: Mutex<VecDeque<Result<String, GenerationError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new(responses: impl IntoIterator<Item = Result<String, GenerationError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn from_texts<S: Into<String>>(texts: impl IntoIterator<Item = S>) -> Self {
        Self::new(texts.into_iter().map(|t| Ok(t.into())))
    }

    /// Prompts received so far, in call order.
    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }
}

impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().await.push(prompt.to_string());
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or(Err(GenerationError::Exhausted))
    }
}

/// How a generation run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// An attempt produced valid content.
    Valid,
    /// Every attempt was invalid; the content is the fallback for the kind.
    Fallback {
        /// Violations from every attempt, prefixed with the attempt number.
        violations: Vec<String>,
    },
}

/// Content produced by [`GenerationPipeline::generate_validated`].
#[derive(Clone, Debug)]
pub struct Generated<C> {
    pub content: C,
    /// Number of generator calls made.
    pub attempts: u32,
    pub outcome: Outcome,
    /// Warnings from the accepted attempt.
    pub warnings: Vec<String>,
}

impl<C> Generated<C> {
    pub fn is_fallback(&self) -> bool {
        matches!(self.outcome, Outcome::Fallback { .. })
    }
}

/// Drives a [`TextGenerator`] until it yields valid content of the requested shape.
#[derive(Debug)]
pub struct GenerationPipeline<G> {
    config: PipelineConfig,
    generator: G,
}

impl<G: TextGenerator> GenerationPipeline<G> {
    pub fn new(config: PipelineConfig, generator: G) -> Self {
        Self { config, generator }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Generate content of shape `C`, retrying with repair prompts on invalid output.
    ///
    /// # Arguments
    ///
    /// * `prompt` - The initial prompt; repair prompts are appended to it.
    /// * `ctx` - Category, topic and expected count used for normalisation.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::Generation` if the generator itself fails. Invalid output
    /// never produces an error; it ends in [`Outcome::Fallback`].
    pub async fn generate_validated<C: ContentShape>(
        &self,
        prompt: &str,
        ctx: &ShapeContext,
    ) -> PipelineResult<Generated<C>> {
        self.run_attempts(prompt, ctx, self.config.max_attempts()).await
    }

    /// Like [`generate_validated`](Self::generate_validated), with the attempt count for
    /// this call only. Backoff and pacing still come from the pipeline config.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::InvalidInput` if `max_attempts` is outside the bounds
    /// accepted by [`PipelineConfig::new`], and `PipelineError::Generation` if the
    /// generator fails.
    pub async fn generate_validated_with_attempts<C: ContentShape>(
        &self,
        prompt: &str,
        ctx: &ShapeContext,
        max_attempts: u32,
    ) -> PipelineResult<Generated<C>> {
        let config = self.config.clone().with_max_attempts(max_attempts)?;
        self.run_attempts(prompt, ctx, config.max_attempts()).await
    }

    async fn run_attempts<C: ContentShape>(
        &self,
        prompt: &str,
        ctx: &ShapeContext,
        max_attempts: u32,
    ) -> PipelineResult<Generated<C>> {
        let mut next_prompt = prompt.to_string();
        let mut violations = Vec::new();

        for attempt in 1..=max_attempts {
            if attempt > 1 {
                tokio::time::sleep(self.config.backoff_after(attempt - 1)).await;
            }

            let response = self.generator.generate(&next_prompt).await?;
            let checked = check::<C>(response, ctx);

            if checked.is_valid() {
                if let Some(content) = checked.content {
                    tracing::info!("{} generated on attempt {attempt}", C::KIND);
                    return Ok(Generated {
                        content,
                        attempts: attempt,
                        outcome: Outcome::Valid,
                        warnings: checked.report.warnings,
                    });
                }
            }

            tracing::info!(
                "{} attempt {attempt}/{max_attempts} invalid: {}",
                C::KIND,
                checked.report.violations.join("; ")
            );
            violations.extend(
                checked
                    .report
                    .violations
                    .iter()
                    .map(|v| format!("attempt {attempt}: {v}")),
            );
            next_prompt = format!(
                "{prompt}\n\n{}",
                repair_prompt(C::KIND, ctx, &checked.candidate, &checked.report.violations)
            );
        }

        tracing::warn!(
            "{} generation exhausted {max_attempts} attempts; using fallback",
            C::KIND
        );
        Ok(Generated {
            content: C::fallback(ctx),
            attempts: max_attempts,
            outcome: Outcome::Fallback { violations },
            warnings: Vec::new(),
        })
    }

    /// Generate content for every chapter of `course`, one after another.
    ///
    /// Waits the configured inter-item delay between chapters so the external service is
    /// not hit in a burst. Returns one result per chapter, in course order: a generator
    /// failure on one chapter is reported in its slot and the loop moves on to the next.
    pub async fn generate_chapter_contents(
        &self,
        request: &CourseRequest,
        course: &Course,
    ) -> Vec<PipelineResult<Generated<ChapterContent>>> {
        let ctx = request.context();
        let mut chapters = Vec::with_capacity(course.chapters.len());

        for (index, chapter) in course.chapters.iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(self.config.inter_item_delay()).await;
            }
            tracing::info!(
                "generating chapter {}/{}: {}",
                index + 1,
                course.chapters.len(),
                chapter.chapter_name
            );
            let prompt = chapter_prompt(request, chapter);
            let result = self.generate_validated::<ChapterContent>(&prompt, &ctx).await;
            if let Err(e) = &result {
                tracing::warn!("chapter '{}' failed: {e}", chapter.chapter_name);
            }
            chapters.push(result);
        }

        chapters
    }
}
