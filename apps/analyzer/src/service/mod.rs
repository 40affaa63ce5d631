//! Outbound boundary to the remote analysis service.
//!
//! The controller holds an `Arc<dyn AnalysisService>` so the HTTP backend can
//! be swapped for a scripted one without touching submission logic.

pub mod http;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::errors::ServiceError;
use crate::models::UploadRequest;

pub use self::http::HttpAnalysisService;

/// Raw JSON object returned by a successful analysis, before normalization.
pub type RawAnalysis = Map<String, Value>;

#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Issues exactly one request for the given snapshot. No retries.
    async fn analyze(&self, request: &UploadRequest) -> Result<RawAnalysis, ServiceError>;
}
