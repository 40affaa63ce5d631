pub mod analysis;
pub mod submission;

pub use analysis::AnalysisResult;
pub use submission::{SubmissionState, UploadRequest};
