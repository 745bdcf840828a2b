mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use dialoguer::Input;

use talentscout_core::{
    DocumentStore, InterviewOutcome, InterviewSession, Interviewer, Speaker, Step,
    INTAKE_FIELDS,
};
use talentscout_llm::GeminiClient;
use talentscout_logging::{init_tracing, LogFormat, Logger};

use crate::config::{AppConfig, ProjectConfig};

#[derive(Parser, Debug)]
#[command(
    name = "talentscout",
    about = "Conversational screening interviews for technical candidates",
    version,
    author
)]
struct Cli {
    /// Path to a config file (default: ./talentscout.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum, default_value = "pretty")]
    log_format: LogFormatChoice,

    /// Diagnostic log level (RUST_LOG overrides)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Also append every log event as JSON to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Number of technical questions to request
    #[arg(short = 'n', long)]
    question_count: Option<usize>,

    /// Output final result as JSON
    #[arg(long)]
    json_output: bool,

    /// Dry run: show the resolved configuration without starting an interview
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatChoice {
    Pretty,
    Json,
    Compact,
}

impl From<LogFormatChoice> for LogFormat {
    fn from(choice: LogFormatChoice) -> Self {
        match choice {
            LogFormatChoice::Pretty => LogFormat::Pretty,
            LogFormatChoice::Json => LogFormat::Json,
            LogFormatChoice::Compact => LogFormat::Compact,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // A missing .env is fine, the variables may already be set
    dotenvy::dotenv().ok();

    let log_format: LogFormat = cli.log_format.into();
    init_tracing(&cli.log_level, log_format);

    let app = AppConfig::from_env()?;

    let project = match cli.config {
        Some(ref path) => ProjectConfig::load_from(path)?,
        None => {
            let working_dir =
                std::env::current_dir().context("Failed to get current directory")?;
            ProjectConfig::load(&working_dir)?.unwrap_or_default()
        }
    };

    let mut settings = project.interview_settings();
    if let Some(count) = cli.question_count {
        settings = settings.with_question_count(count);
    }

    let generator = GeminiClient::new(app.api_url.as_str(), app.api_key.as_str())
        .with_config(project.generation);

    if cli.dry_run {
        let generation = generator.config();
        println!("=== Dry Run ===");
        println!("Endpoint: {}", generator.endpoint());
        println!("API key: {}", app.redacted_key());
        println!("Store: {}", app.store_uri);
        println!(
            "Generation: temperature={} top_k={} top_p={} max_output_tokens={}",
            generation.temperature,
            generation.top_k,
            generation.top_p,
            generation.max_output_tokens
        );
        println!(
            "Interview: questions={} more={} attempts={}",
            settings.question_count, settings.more_question_count, settings.max_generation_attempts
        );
        return Ok(());
    }

    let logger = match cli.log_file {
        Some(ref path) => Logger::with_file(log_format, path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?,
        None => Logger::new(log_format),
    };
    let logger = Arc::new(logger);

    let store = DocumentStore::new(app.store_uri);
    let interviewer = Interviewer::new(&generator, &store, logger).with_settings(settings);

    let mut session = interviewer.start();
    run_console(&interviewer, &mut session).await?;

    let outcome = InterviewOutcome::from_session(&session)
        .context("Interview ended before reaching a final stage")?;

    if cli.json_output {
        let json = serde_json::to_string_pretty(&outcome)?;
        println!("{}", json);
    } else {
        print_outcome(&outcome);
    }

    std::process::exit(outcome.exit_code());
}

/// Prompt for input until the session finishes
async fn run_console(interviewer: &Interviewer<'_>, session: &mut InterviewSession) -> Result<()> {
    let mut shown = 0;
    let mut asked: Option<String> = None;

    loop {
        for (i, entry) in session.transcript()[shown..].iter().enumerate() {
            // dialoguer already left the prompt and the typed answer on screen
            let echoed = match entry.speaker {
                Speaker::Candidate => true,
                Speaker::Assistant => {
                    i == 0 && asked.as_deref().is_some_and(|text| text.starts_with(&entry.text))
                }
            };
            if !echoed {
                eprintln!("{}", entry.text.bright_cyan());
            }
        }
        shown = session.transcript().len();

        let Some(prompt) = session.current_prompt() else {
            break;
        };

        let input: String = Input::new()
            .with_prompt(prompt.text.as_str())
            .allow_empty(true)
            .interact_text()
            .context("Failed to read input")?;

        if let Step::Rejected(reason) = interviewer.submit(session, &input).await {
            tracing::debug!(%reason, "Input rejected");
        }
        asked = Some(prompt.text);
    }

    Ok(())
}

fn print_outcome(outcome: &InterviewOutcome) {
    match outcome {
        InterviewOutcome::Completed {
            record,
            stored,
            store_error,
        } => {
            eprintln!();
            eprintln!("=== COMPLETED ===");
            eprintln!("Session: {}", record.session_id);
            eprintln!("Questions answered: {}", record.answers.len());
            if *stored {
                eprintln!("{} Interview record saved", "✓".bright_green());
            } else {
                eprintln!(
                    "{} Interview record not saved: {}",
                    "⚠".bright_yellow(),
                    store_error.as_deref().unwrap_or("unknown error")
                );
            }
        }
        InterviewOutcome::Exited {
            session_id,
            fields_collected,
        } => {
            eprintln!();
            eprintln!("=== EXITED ===");
            eprintln!("Session: {}", session_id);
            eprintln!(
                "Stopped after {} of {} details",
                fields_collected,
                INTAKE_FIELDS.len()
            );
        }
    }
}
