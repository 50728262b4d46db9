//! Grading request payload assembly

use super::key_points::KeyPointSet;
use super::rubric::RubricConfig;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Topic sent when the key point set has none
pub const DEFAULT_TOPIC: &str = "Essay Topic";

/// Key points as they appear on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyPointsPayload {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub points: Vec<String>,
}

impl From<KeyPointsPayload> for KeyPointSet {
    fn from(payload: KeyPointsPayload) -> Self {
        KeyPointSet::from_parts(payload.topic, payload.points)
    }
}

/// Body of `POST /api/grade`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradingRequest {
    pub essay_text: String,
    pub key_points: KeyPointsPayload,
    pub rubric: RubricConfig,
}

pub struct GradingRequestBuilder;

impl GradingRequestBuilder {
    /// Assemble a request. Callers validate the essay and key points first.
    pub fn build(
        essay_text: &str,
        key_points: &KeyPointSet,
        rubric: &RubricConfig,
    ) -> GradingRequest {
        let topic = if key_points.topic().is_empty() {
            DEFAULT_TOPIC.to_string()
        } else {
            key_points.topic().to_string()
        };

        if !rubric.is_normalized() {
            warn!(
                rubric = %rubric.name,
                total_weight = rubric.total_weight(),
                "Rubric weights do not sum to 1.0"
            );
        }

        GradingRequest {
            essay_text: essay_text.to_string(),
            key_points: KeyPointsPayload {
                topic,
                points: key_points.points().to_vec(),
            },
            rubric: rubric.clone(),
        }
    }
}
