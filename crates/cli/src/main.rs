use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use coursegen_core::config::config_from_env_values;
use coursegen_core::constants::{DEFAULT_FLASHCARD_COUNT, DEFAULT_QUIZ_QUESTIONS};
use coursegen_core::prompts::{self, CourseRequest};
use coursegen_core::{
    read_canonical, validate_and_normalize, validate_content, ChapterContent, Content,
    ContentKind, ContentShape, Course, FlashcardSet, GenerationPipeline, Outcome, Quiz,
    ScriptedGenerator, ShapeContext,
};
use coursegen_types::ChapterSummary;
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "coursegen")]
#[command(about = "Validate, normalise and repair AI-generated course content")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalise and validate a model response
    Validate {
        /// course, chapter, quiz or flashcard-set
        #[arg(long)]
        kind: ContentKind,
        #[command(flatten)]
        context: ContextArgs,
        /// Response file (reads stdin if omitted)
        file: Option<PathBuf>,
    },
    /// Render a generation prompt
    Prompt {
        #[command(subcommand)]
        prompt: PromptCommand,
    },
    /// Run the retry pipeline against recorded responses, one file per attempt
    Replay {
        #[arg(long)]
        kind: ContentKind,
        #[command(flatten)]
        context: ContextArgs,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print the fallback object for a kind
    Fallback {
        #[arg(long)]
        kind: ContentKind,
        #[command(flatten)]
        context: ContextArgs,
    },
    /// Strictly read an already-canonical document
    Check {
        #[arg(long)]
        kind: ContentKind,
        #[command(flatten)]
        context: ContextArgs,
        file: PathBuf,
    },
}

#[derive(Args, Clone, Debug, Default)]
struct ContextArgs {
    /// Course category; "health" selects clinical chapter topics
    #[arg(long)]
    category: Option<String>,
    /// Course topic, used in synthesised titles
    #[arg(long)]
    topic: Option<String>,
    /// Number of chapters, questions or cards that were requested
    #[arg(long)]
    expected: Option<usize>,
}

impl ContextArgs {
    fn context(&self) -> ShapeContext {
        ShapeContext {
            topic: self.topic.clone(),
            category: self.category.clone(),
            expected_count: self.expected,
        }
    }
}

#[derive(Subcommand)]
enum PromptCommand {
    /// Course outline prompt
    Course {
        #[arg(long)]
        category: String,
        #[arg(long)]
        topic: String,
        #[arg(long, default_value = "beginner")]
        level: String,
        /// Overall course length, e.g. "2 Hours"
        #[arg(long)]
        duration: Option<String>,
        #[arg(long)]
        chapters: Option<usize>,
    },
    /// Chapter content prompt
    Chapter {
        #[arg(long)]
        category: String,
        #[arg(long)]
        topic: String,
        #[arg(long, default_value = "beginner")]
        level: String,
        /// Chapter name
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Quiz prompt for a canonical course document
    Quiz {
        course: PathBuf,
        #[arg(long, default_value = "beginner")]
        level: String,
        #[arg(long, default_value_t = DEFAULT_QUIZ_QUESTIONS)]
        questions: usize,
    },
    /// Flashcard prompt for a canonical course document
    Flashcards {
        course: PathBuf,
        #[arg(long, default_value = "beginner")]
        level: String,
        #[arg(long, default_value_t = DEFAULT_FLASHCARD_COUNT)]
        cards: usize,
    },
}

/// Entry point for the `coursegen` CLI.
///
/// Logs go to stderr; JSON and prompts go to stdout so they can be piped.
///
/// # Environment Variables
/// - `COURSEGEN_MAX_ATTEMPTS`: generation attempts before falling back (default: 3)
/// - `COURSEGEN_BACKOFF_MS`: base backoff between attempts (default: 1000)
/// - `COURSEGEN_INTER_ITEM_DELAY_MS`: pause between chapters (default: 2000)
/// - `RUST_LOG`: log filter, on top of the default `coursegen=info`
#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("coursegen=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    run(cli.command).await
}

async fn run(command: Commands) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Validate {
            kind,
            context,
            file,
        } => {
            let text = read_input(file.as_deref())?;
            let validation = validate_and_normalize(text, kind, &context.context());
            for warning in &validation.warnings {
                tracing::warn!("{warning}");
            }
            print_json(&validation)?;
            Ok(exit_code(validation.is_valid))
        }
        Commands::Prompt { prompt } => {
            println!("{}", render_prompt(prompt)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Replay {
            kind,
            context,
            files,
        } => {
            let responses = files
                .iter()
                .map(|path| read_input(Some(path.as_path())))
                .collect::<anyhow::Result<Vec<_>>>()?;
            replay(kind, &context.context(), responses).await
        }
        Commands::Fallback { kind, context } => {
            print_json(&fallback_content(kind, &context.context()))?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check {
            kind,
            context,
            file,
        } => {
            let text = read_input(Some(file.as_path()))?;
            let content = read_canonical(kind, &text)?;
            let report = validate_content(&content, &context.context());
            for warning in &report.warnings {
                tracing::warn!("{warning}");
            }
            for violation in &report.violations {
                tracing::error!("{violation}");
            }
            print_json(&report)?;
            Ok(exit_code(report.is_valid()))
        }
    }
}

fn exit_code(valid: bool) -> ExitCode {
    if valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn read_course(path: &Path) -> anyhow::Result<Course> {
    match read_canonical(ContentKind::Course, &read_input(Some(path))?)? {
        Content::Course(course) => Ok(course),
        other => anyhow::bail!("expected a course document, found {}", other.kind()),
    }
}

fn render_prompt(prompt: PromptCommand) -> anyhow::Result<String> {
    let rendered = match prompt {
        PromptCommand::Course {
            category,
            topic,
            level,
            duration,
            chapters,
        } => {
            let mut request = CourseRequest::new(category, topic, level);
            if let Some(duration) = duration {
                request = request.with_duration(duration);
            }
            if let Some(chapters) = chapters {
                request = request.with_chapters(chapters);
            }
            prompts::course_prompt(&request)
        }
        PromptCommand::Chapter {
            category,
            topic,
            level,
            name,
            description,
        } => {
            let request = CourseRequest::new(category, topic, level);
            let chapter = ChapterSummary {
                chapter_name: name,
                chapter_description: description,
                ..ChapterSummary::default()
            };
            prompts::chapter_prompt(&request, &chapter)
        }
        PromptCommand::Quiz {
            course,
            level,
            questions,
        } => prompts::quiz_prompt(&read_course(&course)?, &level, questions),
        PromptCommand::Flashcards {
            course,
            level,
            cards,
        } => prompts::flashcard_prompt(&read_course(&course)?, &level, cards),
    };
    Ok(rendered)
}

fn fallback_content(kind: ContentKind, ctx: &ShapeContext) -> Content {
    match kind {
        ContentKind::Course => Course::fallback(ctx).into_content(),
        ContentKind::Chapter => ChapterContent::fallback(ctx).into_content(),
        ContentKind::Quiz => Quiz::fallback(ctx).into_content(),
        ContentKind::FlashcardSet => FlashcardSet::fallback(ctx).into_content(),
    }
}

async fn replay(
    kind: ContentKind,
    ctx: &ShapeContext,
    responses: Vec<String>,
) -> anyhow::Result<ExitCode> {
    let config = config_from_env_values(
        std::env::var("COURSEGEN_MAX_ATTEMPTS").ok(),
        std::env::var("COURSEGEN_BACKOFF_MS").ok(),
        std::env::var("COURSEGEN_INTER_ITEM_DELAY_MS").ok(),
    )?;
    // Never ask the script for more responses than were recorded.
    let attempts = u32::try_from(responses.len())
        .unwrap_or(u32::MAX)
        .min(config.max_attempts());
    let config = config.with_max_attempts(attempts)?;
    let pipeline = GenerationPipeline::new(config, ScriptedGenerator::from_texts(responses));

    match kind {
        ContentKind::Course => replay_as::<Course>(&pipeline, ctx).await,
        ContentKind::Chapter => replay_as::<ChapterContent>(&pipeline, ctx).await,
        ContentKind::Quiz => replay_as::<Quiz>(&pipeline, ctx).await,
        ContentKind::FlashcardSet => replay_as::<FlashcardSet>(&pipeline, ctx).await,
    }
}

async fn replay_as<C: ContentShape>(
    pipeline: &GenerationPipeline<ScriptedGenerator>,
    ctx: &ShapeContext,
) -> anyhow::Result<ExitCode> {
    let generated = pipeline
        .generate_validated::<C>("(recorded response replay)", ctx)
        .await?;

    for warning in &generated.warnings {
        tracing::warn!("{warning}");
    }
    if let Outcome::Fallback { violations } = &generated.outcome {
        for violation in violations {
            tracing::warn!("{violation}");
        }
    }
    tracing::info!(
        "{} after {} attempt(s), fallback: {}",
        C::KIND,
        generated.attempts,
        generated.is_fallback()
    );

    let fallback = generated.is_fallback();
    print_json(&generated.content.into_content())?;
    Ok(if fallback {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_validate_with_context() {
        let cli = Cli::try_parse_from([
            "coursegen",
            "validate",
            "--kind",
            "flashcards",
            "--topic",
            "Rust",
            "--expected",
            "20",
            "response.txt",
        ])
        .expect("parse");

        let Commands::Validate {
            kind,
            context,
            file,
        } = cli.command
        else {
            panic!("expected validate");
        };
        assert_eq!(kind, ContentKind::FlashcardSet);
        assert_eq!(context.context().expected_count, Some(20));
        assert_eq!(file, Some(PathBuf::from("response.txt")));
    }

    #[test]
    fn rejects_unknown_kind() {
        assert!(Cli::try_parse_from(["coursegen", "fallback", "--kind", "essay"]).is_err());
    }

    #[test]
    fn fallback_content_matches_kind_and_validates() {
        let ctx = ShapeContext::new().with_topic("Rust");
        for kind in ContentKind::ALL {
            let content = fallback_content(kind, &ctx);
            assert_eq!(content.kind(), kind);
            assert!(validate_content(&content, &ctx).is_valid());
        }
    }

    #[test]
    fn course_prompt_applies_overrides() {
        let prompt = render_prompt(PromptCommand::Course {
            category: "programming".into(),
            topic: "Rust".into(),
            level: "advanced".into(),
            duration: Some("3 Hours".into()),
            chapters: Some(8),
        })
        .expect("render");
        assert!(prompt.contains("EXACTLY 8 chapters"));
        assert!(prompt.contains("3 Hours"));
    }
}
