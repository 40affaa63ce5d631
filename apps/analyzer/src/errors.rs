use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The failure taxonomy surfaced to the user.
/// Every kind is recoverable: the only way out of `Failed` is a new submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Missing file or job description. Raised locally, no network attempted.
    #[error("validation error")]
    ValidationError,

    /// The request never reached the analysis service.
    #[error("transport error")]
    TransportError,

    /// The service answered with a non-success status.
    #[error("server error")]
    ServerError,

    /// The service answered, but the body was not structured data.
    #[error("parse error")]
    ParseError,
}

impl ErrorKind {
    /// The single message shown for this kind.
    pub fn user_message(self) -> &'static str {
        match self {
            ErrorKind::ValidationError => "Please provide both a resume and a job description.",
            ErrorKind::TransportError => {
                "Could not reach the analysis service. Check your connection and try again."
            }
            ErrorKind::ServerError => {
                "Upload or analysis error. The service could not analyze this resume."
            }
            ErrorKind::ParseError => {
                "Upload or analysis error. The service returned an unreadable response."
            }
        }
    }
}

/// Errors produced by an `AnalysisService` backend.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Analysis service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Response body is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Response body is JSON but not an object (got {0})")]
    UnexpectedShape(&'static str),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Transport(_) => ErrorKind::TransportError,
            ServiceError::Status { .. } => ErrorKind::ServerError,
            ServiceError::Parse(_) | ServiceError::UnexpectedShape(_) => ErrorKind::ParseError,
        }
    }
}

/// Rejections raised by the document selection surface, before anything
/// reaches the submission controller.
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("Unsupported document type '{0}'. Supported: .pdf, .docx")]
    UnsupportedType(String),

    #[error("Document '{0}' is empty")]
    Empty(String),

    #[error("Failed to read document: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_maps_to_server_error() {
        let err = ServiceError::Status {
            status: 500,
            body: "boom".into(),
        };
        assert_eq!(err.kind(), ErrorKind::ServerError);
    }

    #[test]
    fn test_parse_and_shape_map_to_parse_error() {
        let parse = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        assert_eq!(ServiceError::Parse(parse).kind(), ErrorKind::ParseError);
        assert_eq!(
            ServiceError::UnexpectedShape("array").kind(),
            ErrorKind::ParseError
        );
    }

    #[test]
    fn test_every_kind_has_a_message() {
        for kind in [
            ErrorKind::ValidationError,
            ErrorKind::TransportError,
            ErrorKind::ServerError,
            ErrorKind::ParseError,
        ] {
            assert!(!kind.user_message().is_empty());
        }
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorKind::ValidationError).unwrap();
        assert_eq!(json, "\"validation_error\"");
    }
}
