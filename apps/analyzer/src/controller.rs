//! SubmissionController: sole owner of the submission lifecycle.
//!
//! ```text
//! Idle ──submit──► Validating ──invalid──► Failed(ValidationError)
//!                      │
//!                      └──valid──► InFlight ──► Succeeded(result) | Failed(kind)
//! Succeeded | Failed ──submit──► Validating
//! ```
//!
//! Every transition runs under one lock and is published through a `watch`
//! channel. Each validated submission gets a new generation; a response is
//! applied only if its generation is still current, so a superseded or
//! cancelled request can never overwrite newer state.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, info, info_span, warn, Instrument};

use crate::errors::{ErrorKind, ServiceError};
use crate::input::document::ResumeFile;
use crate::input::InputCollector;
use crate::models::{AnalysisResult, SubmissionState, UploadRequest};
use crate::normalize::normalize;
use crate::service::{AnalysisService, RawAnalysis};

/// What a submit action does while a request is already in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InFlightPolicy {
    /// Ignore the new submit. The pending request runs to completion.
    #[default]
    Reject,
    /// Retire the pending request and validate the current inputs again.
    /// The pending response is discarded even if the new inputs are invalid.
    Supersede,
}

/// How a single `submit` call ended, from the caller's point of view.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Succeeded(AnalysisResult),
    Failed(ErrorKind),
    /// A request was already in flight under `InFlightPolicy::Reject`.
    Rejected,
    /// A newer submission or a cancel replaced this one; its response was discarded.
    Superseded,
}

struct Core {
    generation: u64,
}

pub struct SubmissionController {
    service: Arc<dyn AnalysisService>,
    inputs: InputCollector,
    policy: InFlightPolicy,
    core: Mutex<Core>,
    state: watch::Sender<SubmissionState>,
    generation: watch::Sender<u64>,
}

impl SubmissionController {
    pub fn new(service: Arc<dyn AnalysisService>, policy: InFlightPolicy) -> Self {
        let (state, _) = watch::channel(SubmissionState::Idle);
        let (generation, _) = watch::channel(0);
        Self {
            service,
            inputs: InputCollector::new(),
            policy,
            core: Mutex::new(Core { generation: 0 }),
            state,
            generation,
        }
    }

    pub fn policy(&self) -> InFlightPolicy {
        self.policy
    }

    /// Read access to the input cells, for observers.
    pub fn inputs(&self) -> &InputCollector {
        &self.inputs
    }

    pub fn state(&self) -> SubmissionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        let in_flight = self.state.borrow().is_in_flight();
        self.inputs.has_file() && (!in_flight || self.policy == InFlightPolicy::Supersede)
    }

    /// Selecting a new file dismisses a settled result or error.
    pub fn select_file(&self, file: ResumeFile) {
        self.inputs.select_file(file);
        self.reset_settled(|state| state.is_settled());
    }

    pub fn clear_file(&self) {
        self.inputs.clear_file();
        self.reset_settled(|state| state.is_settled());
    }

    /// Editing the job description only dismisses a validation failure.
    pub fn set_job_description(&self, text: impl Into<String>) {
        self.inputs.set_job_description(text);
        self.reset_settled(|state| state.error() == Some(ErrorKind::ValidationError));
    }

    /// Runs one submission through the state machine and waits for it to settle.
    pub async fn submit(&self) -> SubmitOutcome {
        let (request, generation) = match self.begin() {
            Ok(started) => started,
            Err(outcome) => return outcome,
        };

        let span = info_span!("submission", request_id = %request.id(), generation);
        self.run(request, generation).instrument(span).await
    }

    /// Abandons the in-flight request, if any, and returns to `Idle`.
    /// Returns whether anything was cancelled.
    pub fn cancel(&self) -> bool {
        let mut core = self.lock_core();
        if !self.state.borrow().is_in_flight() {
            return false;
        }
        core.generation += 1;
        self.generation.send_replace(core.generation);
        self.state.send_replace(SubmissionState::Idle);
        info!("In-flight submission cancelled");
        true
    }

    /// Validates the inputs and, on success, moves to `InFlight` with a fresh
    /// snapshot. Everything here happens under the core lock.
    fn begin(&self) -> Result<(UploadRequest, u64), SubmitOutcome> {
        let mut core = self.lock_core();

        let in_flight = self.state.borrow().is_in_flight();
        if in_flight && self.policy == InFlightPolicy::Reject {
            debug!("Submit ignored: a request is already in flight");
            return Err(SubmitOutcome::Rejected);
        }

        // Under Supersede any submit retires the pending request, valid or not,
        // so its response can no longer land on top of this submission's state.
        if in_flight {
            core.generation += 1;
            self.generation.send_replace(core.generation);
            info!("Superseding the in-flight submission");
        }

        self.state.send_replace(SubmissionState::Validating);

        let (file, job_description) = self.inputs.snapshot();
        let file = match file {
            Some(file) if !job_description.trim().is_empty() => file,
            _ => {
                info!("Validation failed: resume and job description are both required");
                self.state
                    .send_replace(SubmissionState::Failed(ErrorKind::ValidationError));
                return Err(SubmitOutcome::Failed(ErrorKind::ValidationError));
            }
        };

        if !in_flight {
            core.generation += 1;
            self.generation.send_replace(core.generation);
        }

        // Replacing the state drops any previous result or error.
        self.state.send_replace(SubmissionState::InFlight);

        Ok((UploadRequest::new(file, job_description), core.generation))
    }

    async fn run(&self, request: UploadRequest, generation: u64) -> SubmitOutcome {
        info!(
            file = request.file().name(),
            doc_type = %request.file().doc_type(),
            "Submitting resume for analysis"
        );

        let mut current = self.generation.subscribe();
        let response = tokio::select! {
            biased;
            _ = superseded(&mut current, generation) => {
                info!("Submission superseded before the service responded");
                return SubmitOutcome::Superseded;
            }
            response = self.service.analyze(&request) => response,
        };
        drop(request);

        self.settle(generation, response)
    }

    fn settle(
        &self,
        generation: u64,
        response: Result<RawAnalysis, ServiceError>,
    ) -> SubmitOutcome {
        let core = self.lock_core();
        if core.generation != generation {
            info!("Discarding response from a superseded submission");
            return SubmitOutcome::Superseded;
        }

        let (state, outcome) = match response {
            Ok(raw) => {
                let result = normalize(&Value::Object(raw));
                info!(
                    ats_score = result.ats_score(),
                    skills = result.skills().len(),
                    "Analysis succeeded"
                );
                (
                    SubmissionState::Succeeded(result.clone()),
                    SubmitOutcome::Succeeded(result),
                )
            }
            Err(e) => {
                let kind = e.kind();
                warn!("Analysis failed ({kind}): {e}");
                (SubmissionState::Failed(kind), SubmitOutcome::Failed(kind))
            }
        };

        self.state.send_replace(state);
        outcome
    }

    fn reset_settled(&self, should_reset: impl Fn(&SubmissionState) -> bool) {
        let _core = self.lock_core();
        let reset = self.state.send_if_modified(|state| {
            if should_reset(state) {
                *state = SubmissionState::Idle;
                true
            } else {
                false
            }
        });
        if reset {
            debug!("Input edited, submission state reset to idle");
        }
    }

    fn lock_core(&self) -> MutexGuard<'_, Core> {
        // Core holds only a counter; a poisoned lock still holds a valid value.
        self.core.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Resolves once the controller's generation moves past `generation`.
async fn superseded(current: &mut watch::Receiver<u64>, generation: u64) {
    let changed = current.wait_for(|g| *g != generation).await.is_ok();
    if !changed {
        // Controller dropped: nothing can supersede this request any more.
        std::future::pending::<()>().await;
    }
}
