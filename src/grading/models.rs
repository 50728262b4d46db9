//! Grading results and the response schema they are validated against

use crate::error::{GraderError, Result, UNKNOWN_ERROR};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const TOTAL_SCORE_KEY: &str = "total_score";
const FEEDBACK_KEY: &str = "feedback";
const MIN_LEVEL: u64 = 1;
const MAX_LEVEL: u64 = 4;
const MIN_TOTAL: f64 = 1.0;
const MAX_TOTAL: f64 = 4.0;

/// Score and average key-point similarity for a single criterion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriterionBreakdown {
    /// Ordinal level, 1..=4
    pub score: u8,
    /// Mean similarity of the essay to the key points, nominally 0.0-1.0
    pub avg_similarity: f64,
}

/// A complete grading result, replaced wholesale on every grading call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradingResult {
    pub total_score: f64,
    pub feedback: String,
    /// Per-criterion breakdown in the order the service sent it
    pub criteria: IndexMap<String, CriterionBreakdown>,
}

/// Success body: `{ "results": { ... } }`
#[derive(Debug, Deserialize)]
pub(crate) struct GradeResponse {
    pub results: IndexMap<String, Value>,
}

/// Failure body: `{ "error": "..." }`
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorResponse {
    /// Server message from a failure body, or the generic fallback
    pub fn message_from(body: &str) -> String {
        serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .and_then(|e| e.error)
            .unwrap_or_else(|| UNKNOWN_ERROR.to_string())
    }
}

impl GradingResult {
    /// Parse and validate a success response body
    pub fn from_response_body(body: &str) -> Result<Self> {
        let response: GradeResponse = serde_json::from_str(body)
            .map_err(|e| GraderError::MalformedResponse(e.to_string()))?;
        Self::from_results(response.results)
    }

    /// Split the flat `results` object into the scalar fields and the
    /// per-criterion entries. Non-object values under other keys are skipped.
    pub fn from_results(results: IndexMap<String, Value>) -> Result<Self> {
        let total_score = results
            .get(TOTAL_SCORE_KEY)
            .and_then(Value::as_f64)
            .filter(|v| (MIN_TOTAL..=MAX_TOTAL).contains(v))
            .ok_or_else(|| malformed("total_score must be a number between 1.0 and 4.0"))?;

        let feedback = results
            .get(FEEDBACK_KEY)
            .and_then(Value::as_str)
            .ok_or_else(|| malformed("feedback must be a string"))?
            .to_string();

        let mut criteria = IndexMap::new();
        for (name, value) in &results {
            if name == TOTAL_SCORE_KEY || name == FEEDBACK_KEY {
                continue;
            }
            if let Value::Object(entry) = value {
                criteria.insert(name.clone(), parse_breakdown(name, entry)?);
            }
        }

        Ok(Self {
            total_score,
            feedback,
            criteria,
        })
    }
}

fn parse_breakdown(
    name: &str,
    entry: &serde_json::Map<String, Value>,
) -> Result<CriterionBreakdown> {
    let score = entry
        .get("score")
        .and_then(Value::as_u64)
        .filter(|s| (MIN_LEVEL..=MAX_LEVEL).contains(s))
        .ok_or_else(|| {
            malformed(&format!("criterion '{}' score must be an integer 1-4", name))
        })?;

    let avg_similarity = entry
        .get("avg_similarity")
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite())
        .ok_or_else(|| {
            malformed(&format!("criterion '{}' avg_similarity must be a number", name))
        })?;

    Ok(CriterionBreakdown {
        score: score as u8,
        avg_similarity,
    })
}

fn malformed(detail: &str) -> GraderError {
    GraderError::MalformedResponse(detail.to_string())
}
