use serde::Serialize;
use uuid::Uuid;

use crate::errors::ErrorKind;
use crate::input::document::ResumeFile;
use crate::models::analysis::AnalysisResult;

/// Lifecycle of a submission. Owned and mutated only by `SubmissionController`;
/// everything else observes it through a `watch::Receiver`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", content = "payload", rename_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    InFlight,
    Succeeded(AnalysisResult),
    Failed(ErrorKind),
}

impl SubmissionState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SubmissionState::InFlight)
    }

    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            SubmissionState::Succeeded(_) | SubmissionState::Failed(_)
        )
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            SubmissionState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<ErrorKind> {
        match self {
            SubmissionState::Failed(kind) => Some(*kind),
            _ => None,
        }
    }
}

/// Immutable snapshot of the inputs taken at submit time.
/// Lives for exactly one request; later edits to the inputs never reach it.
#[derive(Debug)]
pub struct UploadRequest {
    id: Uuid,
    file: ResumeFile,
    job_description: String,
}

impl UploadRequest {
    pub fn new(file: ResumeFile, job_description: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            file,
            job_description,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn file(&self) -> &ResumeFile {
        &self.file
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }
}
