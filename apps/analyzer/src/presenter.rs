//! ResultPresenter: plain-text view of a submission. Display only, no decisions.

use crate::errors::ErrorKind;
use crate::models::{AnalysisResult, SubmissionState};

pub fn render_state(state: &SubmissionState) -> String {
    match state {
        SubmissionState::Idle => String::new(),
        SubmissionState::Validating | SubmissionState::InFlight => "Analyzing...".to_string(),
        SubmissionState::Succeeded(result) => render_result(result),
        SubmissionState::Failed(kind) => render_error(Some(*kind)).unwrap_or_default(),
    }
}

pub fn render_error(error: Option<ErrorKind>) -> Option<String> {
    error.map(|kind| kind.user_message().to_string())
}

pub fn render_result(result: &AnalysisResult) -> String {
    let mut sections = vec![
        section("Summary", result.summary()),
        list("Top Skills", result.skills(), "No skills detected."),
        list("Education", result.education(), "No education found."),
        list("Experience", result.experience(), "No experience found."),
        section("Full Resume Text", result.text()),
    ];

    let mut scores = vec![
        format!("ATS Match Score: {}%", number(result.ats_score())),
        format!("TF-IDF Score: {}%", number(result.score())),
        format!("Keyword Match: {}%", number(result.keyword_match_score())),
        format!("Section Bonus: {} pts", number(result.section_bonus())),
    ];
    if let Some(suggestion) = result.suggestion() {
        scores.push(suggestion.to_string());
    }
    sections.push(scores.join("\n"));

    let mut out = sections.join("\n\n");
    out.push('\n');
    out
}

fn section(title: &str, body: &str) -> String {
    let underline = "-".repeat(title.chars().count());
    format!("{title}\n{underline}\n{body}")
}

fn list(title: &str, items: &[String], empty: &str) -> String {
    if items.is_empty() {
        return section(title, empty);
    }
    let body: Vec<String> = items.iter().map(|item| format!("  • {item}")).collect();
    section(title, &body.join("\n"))
}

/// 82.0 prints as "82", 71.25 as "71.25".
fn number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
