use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::ServiceError;
use crate::models::UploadRequest;
use crate::service::{AnalysisService, RawAnalysis};

const ANALYZE_PATH: &str = "/analyze";
const MAX_LOGGED_BODY: usize = 512;

/// Talks to the analysis service over HTTP: `POST {base_url}/analyze` with a
/// multipart body of `file` and `job_description`.
#[derive(Clone)]
pub struct HttpAnalysisService {
    client: Client,
    endpoint: String,
}

impl HttpAnalysisService {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ServiceError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), ANALYZE_PATH),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_form(request: &UploadRequest) -> Result<Form, ServiceError> {
        let file = request.file();
        let file_part = Part::bytes(file.content().to_vec())
            .file_name(file.name().to_string())
            .mime_str(file.mime())?;

        Ok(Form::new()
            .part("file", file_part)
            .text("job_description", request.job_description().to_string()))
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisService {
    async fn analyze(&self, request: &UploadRequest) -> Result<RawAnalysis, ServiceError> {
        let form = Self::build_form(request)?;

        debug!(
            request_id = %request.id(),
            file = request.file().name(),
            bytes = request.file().len(),
            "POST {}",
            self.endpoint
        );

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(
                request_id = %request.id(),
                "Analysis service returned {}: {}",
                status,
                truncate(&body, MAX_LOGGED_BODY)
            );
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        match serde_json::from_str::<Value>(&body)? {
            Value::Object(map) => {
                debug!(
                    request_id = %request.id(),
                    fields = map.len(),
                    "Analysis response received"
                );
                Ok(map)
            }
            other => Err(ServiceError::UnexpectedShape(json_type_name(&other))),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
