//! ResponseNormalizer: maps whatever the analysis service returned into an `AnalysisResult`.
//!
//! Total: every input, including non-objects, yields a fully populated result.
//! Never branches on which shape of the API responded; each field is looked up
//! independently and coerced or defaulted.
//!
//! | field                 | accepted                         | default          |
//! |-----------------------|----------------------------------|------------------|
//! | summary, text         | string                           | ""               |
//! | skills, education,    | array (scalar items kept as text)| []               |
//! | experience            |                                  |                  |
//! | score                 | number or numeric string         | 0                |
//! | ats_score             | number or numeric string         | score, else 0    |
//! | keyword_match_score   | number or numeric string         | 0                |
//! | section_bonus         | number or numeric string         | 0                |
//! | suggestion            | non-empty string                 | absent           |

use serde_json::{Map, Value};

use crate::models::AnalysisResult;

pub fn normalize(raw: &Value) -> AnalysisResult {
    let empty = Map::new();
    let fields = raw.as_object().unwrap_or(&empty);

    let score = number_field(fields, "score");

    AnalysisResult {
        summary: string_field(fields, "summary"),
        skills: sequence_field(fields, "skills"),
        education: sequence_field(fields, "education"),
        experience: sequence_field(fields, "experience"),
        text: string_field(fields, "text"),
        score: score.unwrap_or(0.0),
        ats_score: number_field(fields, "ats_score").or(score).unwrap_or(0.0),
        keyword_match_score: number_field(fields, "keyword_match_score").unwrap_or(0.0),
        section_bonus: number_field(fields, "section_bonus").unwrap_or(0.0),
        suggestion: fields
            .get("suggestion")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(String::from),
    }
}

fn string_field(fields: &Map<String, Value>, key: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_default()
}

/// Non-arrays count as absent. Scalar items are kept as text; null and
/// nested structures are dropped.
fn sequence_field(fields: &Map<String, Value>, key: &str) -> Vec<String> {
    fields
        .get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(item_text).collect())
        .unwrap_or_default()
}

fn item_text(item: &Value) -> Option<String> {
    match item {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn number_field(fields: &Map<String, Value>, key: &str) -> Option<f64> {
    let value = match fields.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn renormalize(result: &AnalysisResult) -> AnalysisResult {
        normalize(&serde_json::to_value(result).unwrap())
    }

    #[test]
    fn test_empty_object_yields_all_defaults() {
        let result = normalize(&json!({}));
        assert_eq!(result.summary(), "");
        assert!(result.skills().is_empty());
        assert!(result.education().is_empty());
        assert!(result.experience().is_empty());
        assert_eq!(result.text(), "");
        assert_eq!(result.score(), 0.0);
        assert_eq!(result.ats_score(), 0.0);
        assert_eq!(result.keyword_match_score(), 0.0);
        assert_eq!(result.section_bonus(), 0.0);
        assert!(result.suggestion().is_none());
    }

    #[test]
    fn test_non_object_inputs_yield_defaults() {
        let defaults = normalize(&json!({}));
        for raw in [json!(null), json!([1, 2]), json!("text"), json!(42), json!(true)] {
            assert_eq!(normalize(&raw), defaults, "input: {raw}");
        }
    }

    #[test]
    fn test_summary_and_skills_example() {
        let result = normalize(&json!({
            "summary": "Strong backend profile",
            "skills": ["Go", "SQL"]
        }));
        assert_eq!(result.summary(), "Strong backend profile");
        assert_eq!(result.skills(), ["Go", "SQL"]);
        assert!(result.education().is_empty());
        assert!(result.experience().is_empty());
        assert_eq!(result.text(), "");
        assert_eq!(result.score(), 0.0);
        assert_eq!(result.ats_score(), 0.0);
        assert_eq!(result.keyword_match_score(), 0.0);
        assert_eq!(result.section_bonus(), 0.0);
        assert!(result.suggestion().is_none());
    }

    #[test]
    fn test_explicit_ats_score_preferred_over_score() {
        let result = normalize(&json!({
            "score": 82,
            "ats_score": 90,
            "keyword_match_score": 70,
            "section_bonus": 5
        }));
        assert_eq!(result.score(), 82.0);
        assert_eq!(result.ats_score(), 90.0);
        assert_eq!(result.keyword_match_score(), 70.0);
        assert_eq!(result.section_bonus(), 5.0);
    }

    #[test]
    fn test_ats_score_falls_back_to_score() {
        let result = normalize(&json!({ "score": 64.5 }));
        assert_eq!(result.ats_score(), 64.5);

        let result = normalize(&json!({ "score": 64.5, "ats_score": null }));
        assert_eq!(result.ats_score(), 64.5);

        let result = normalize(&json!({ "score": 64.5, "ats_score": "n/a" }));
        assert_eq!(result.ats_score(), 64.5);
    }

    #[test]
    fn test_null_score_from_backend_without_job_description() {
        let result = normalize(&json!({
            "summary": "Resume text...",
            "skills": [],
            "length": 1200,
            "text": "Resume text",
            "score": null
        }));
        assert_eq!(result.score(), 0.0);
        assert_eq!(result.ats_score(), 0.0);
        assert_eq!(result.text(), "Resume text");
    }

    #[test]
    fn test_non_array_sequences_are_treated_as_absent() {
        let result = normalize(&json!({
            "skills": "Rust, Go",
            "education": { "degree": "BSc" },
            "experience": 7
        }));
        assert!(result.skills().is_empty());
        assert!(result.education().is_empty());
        assert!(result.experience().is_empty());
    }

    #[test]
    fn test_sequence_items_are_coerced_in_order() {
        let result = normalize(&json!({
            "skills": ["Rust", null, 3, {"x": 1}, true, ["nested"], "SQL"]
        }));
        assert_eq!(result.skills(), ["Rust", "3", "true", "SQL"]);
    }

    #[test]
    fn test_numeric_strings_are_coerced() {
        let result = normalize(&json!({
            "score": " 71.25 ",
            "keyword_match_score": "40",
            "section_bonus": "ten"
        }));
        assert_eq!(result.score(), 71.25);
        assert_eq!(result.keyword_match_score(), 40.0);
        assert_eq!(result.section_bonus(), 0.0);
    }

    #[test]
    fn test_non_finite_strings_are_rejected() {
        let result = normalize(&json!({ "score": "inf", "section_bonus": "NaN" }));
        assert_eq!(result.score(), 0.0);
        assert_eq!(result.section_bonus(), 0.0);
    }

    #[test]
    fn test_out_of_range_scores_pass_through() {
        let result = normalize(&json!({ "score": 250, "keyword_match_score": -3 }));
        assert_eq!(result.score(), 250.0);
        assert_eq!(result.keyword_match_score(), -3.0);
    }

    #[test]
    fn test_wrong_typed_strings_default() {
        let result = normalize(&json!({ "summary": 12, "text": ["a"] }));
        assert_eq!(result.summary(), "");
        assert_eq!(result.text(), "");
    }

    #[test]
    fn test_suggestion_only_when_non_empty_string() {
        let result = normalize(&json!({ "suggestion": "Add more SQL keywords" }));
        assert_eq!(result.suggestion(), Some("Add more SQL keywords"));

        assert!(normalize(&json!({ "suggestion": "" })).suggestion().is_none());
        assert!(normalize(&json!({ "suggestion": 5 })).suggestion().is_none());
        assert!(normalize(&json!({ "suggestion": null })).suggestion().is_none());
    }

    #[test]
    fn test_serializes_with_wire_names() {
        let result = normalize(&json!({ "ats_score": 10 }));
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["ats_score"], json!(10.0));
        assert!(value.get("keyword_match_score").is_some());
        assert!(value.get("section_bonus").is_some());
        assert!(value.get("suggestion").is_none());
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let fixtures = [
            json!({}),
            json!(null),
            json!({ "summary": "Strong backend profile", "skills": ["Go", "SQL"] }),
            json!({ "score": 82, "ats_score": 90, "keyword_match_score": 70, "section_bonus": 5 }),
            json!({ "score": 55 }),
            json!({ "skills": "not a list", "education": [1, null, "MSc"], "score": "12.5" }),
            json!({ "suggestion": "Tailor your summary", "text": "full text", "extra": {"a": 1} }),
            json!({ "suggestion": "", "ats_score": "bad", "section_bonus": false }),
        ];
        for raw in fixtures {
            let once = normalize(&raw);
            assert_eq!(renormalize(&once), once, "input: {raw}");
        }
    }
}
