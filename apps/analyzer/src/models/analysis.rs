use serde::Serialize;

/// Canonical analysis of one resume against one job description.
///
/// Only `normalize::normalize` constructs this type, so every field is always
/// present and typed. It serializes back to the wire field names, which lets a
/// canonical result be re-fed through the normalizer unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub(crate) summary: String,
    pub(crate) skills: Vec<String>,
    pub(crate) education: Vec<String>,
    pub(crate) experience: Vec<String>,
    pub(crate) text: String,
    pub(crate) score: f64,
    pub(crate) ats_score: f64,
    pub(crate) keyword_match_score: f64,
    pub(crate) section_bonus: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) suggestion: Option<String>,
}

impl AnalysisResult {
    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn education(&self) -> &[String] {
        &self.education
    }

    pub fn experience(&self) -> &[String] {
        &self.experience
    }

    /// Full extracted resume text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// TF-IDF similarity score.
    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn ats_score(&self) -> f64 {
        self.ats_score
    }

    pub fn keyword_match_score(&self) -> f64 {
        self.keyword_match_score
    }

    pub fn section_bonus(&self) -> f64 {
        self.section_bonus
    }

    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.as_deref()
    }
}
