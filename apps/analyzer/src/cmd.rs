use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use tracing::{info, warn};

use analyzer::config::Config;
use analyzer::input::document::ResumeFile;
use analyzer::presenter::{render_error, render_result, render_state};
use analyzer::service::HttpAnalysisService;
use analyzer::{SubmissionController, SubmissionState, SubmitOutcome};

#[derive(Parser)]
#[command(name = "analyzer", version, about = "analyzes a resume against a job description")]
struct Cmd {
    /// Resume document (.pdf or .docx)
    #[arg(long, short = 'r', value_name = "PATH")]
    resume: PathBuf,

    /// Job description text
    #[arg(long, short = 'j', conflicts_with = "job_file")]
    job: Option<String>,

    /// Read the job description from a file
    #[arg(long, value_name = "PATH")]
    job_file: Option<PathBuf>,

    /// Analysis service base URL (overrides ANALYZER_URL)
    #[arg(long)]
    url: Option<String>,

    /// Request timeout in seconds (overrides ANALYZER_TIMEOUT_SECS)
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Print the canonical result as JSON instead of the text view
    #[arg(long)]
    json: bool,
}

pub async fn run(config: Config) -> Result<ExitCode> {
    let args = Cmd::parse();

    let base_url = args.url.as_deref().unwrap_or(&config.analyzer_url);
    let timeout = args
        .timeout
        .map(Duration::from_secs)
        .unwrap_or(config.timeout);
    let service = HttpAnalysisService::new(base_url, timeout)
        .context("Failed to build HTTP client")?;
    info!("Analysis endpoint: {}", service.endpoint());

    let controller = SubmissionController::new(Arc::new(service), config.policy);

    let resume = ResumeFile::open(&args.resume)
        .await
        .with_context(|| format!("Cannot use '{}' as a resume", args.resume.display()))?;
    controller.select_file(resume);

    let job_description = match (&args.job, &args.job_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read job description from '{}'", path.display()))?,
        (None, None) => String::new(),
    };
    controller.set_job_description(job_description);

    let mut states = controller.subscribe();
    let progress = tokio::spawn(async move {
        while states.changed().await.is_ok() {
            let state = states.borrow_and_update().clone();
            if state == SubmissionState::InFlight {
                eprintln!("{}", render_state(&state));
            }
        }
    });

    let outcome = controller.submit().await;
    drop(controller);
    if let Err(e) = progress.await {
        warn!("Progress reporter stopped abnormally: {e}");
    }

    match outcome {
        SubmitOutcome::Succeeded(result) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", render_result(&result));
            }
            Ok(ExitCode::SUCCESS)
        }
        SubmitOutcome::Failed(kind) => {
            let message = render_error(Some(kind)).unwrap_or_default();
            if args.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({ "error": kind, "message": message }))?
                );
            } else {
                eprintln!("{message}");
            }
            Ok(ExitCode::FAILURE)
        }
        // Single submission per process: neither can happen here.
        SubmitOutcome::Rejected | SubmitOutcome::Superseded => Ok(ExitCode::FAILURE),
    }
}
