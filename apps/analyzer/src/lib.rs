//! Resume analyzer client: collects a resume and a job description, submits
//! them to the remote analysis service, and normalizes the assessment it returns.

pub mod config;
pub mod controller;
pub mod errors;
pub mod input;
pub mod models;
pub mod normalize;
pub mod presenter;
pub mod service;

pub use controller::{InFlightPolicy, SubmissionController, SubmitOutcome};
pub use errors::{ErrorKind, SelectionError, ServiceError};
pub use models::{AnalysisResult, SubmissionState, UploadRequest};
pub use normalize::normalize;
