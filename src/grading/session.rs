//! Grading session state machine
//!
//! One session per evaluator visit. It owns the essay text, the key points and
//! the last grading outcome, and is the only thing that signals whether a
//! grading request is outstanding.
//!
//! ```text
//! Idle ──submit──▶ Submitting ──ok──▶ Succeeded
//!                      │                  │
//!                      └──err──▶ Failed ◀─┘ (re-submit from either)
//! ```

use super::client::{GradingEngine, SampleDataProvider};
use super::key_points::KeyPointSet;
use super::models::GradingResult;
use super::request::{GradingRequest, GradingRequestBuilder};
use super::rubric::RubricConfig;
use crate::error::{GraderError, Result};
use crate::metrics::METRICS;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Essay loaded together with the sample topic and key points
pub const SAMPLE_ESSAY: &str = "Renewable energy is crucial for our future. It helps us move away from fossil fuels, which are harmful to the environment. Solar and wind energy are great examples of how we can generate clean power. By using these sources, we can significantly reduce our carbon footprint and combat climate change. Furthermore, the renewable energy sector is a growing industry, providing many new jobs and boosting the economy.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

#[derive(Debug)]
pub struct GradingSession {
    id: Uuid,
    essay_text: String,
    key_points: KeyPointSet,
    rubric: RubricConfig,
    status: SessionStatus,
    last_result: Option<GradingResult>,
    last_error: Option<String>,
}

impl Default for GradingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GradingSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            essay_text: String::new(),
            key_points: KeyPointSet::new(),
            rubric: RubricConfig::essay_quality(),
            status: SessionStatus::Idle,
            last_result: None,
            last_error: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn essay_text(&self) -> &str {
        &self.essay_text
    }

    pub fn set_essay_text(&mut self, text: impl Into<String>) {
        self.essay_text = text.into();
    }

    pub fn key_points(&self) -> &KeyPointSet {
        &self.key_points
    }

    /// Key points stay editable in every state, including while submitting
    pub fn key_points_mut(&mut self) -> &mut KeyPointSet {
        &mut self.key_points
    }

    pub fn rubric(&self) -> &RubricConfig {
        &self.rubric
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.status == SessionStatus::Submitting
    }

    pub fn last_result(&self) -> Option<&GradingResult> {
        self.last_result.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether the grade trigger should be enabled
    pub fn can_submit(&self) -> bool {
        !self.is_submitting() && self.validate().is_ok()
    }

    fn validate(&self) -> Result<()> {
        if self.essay_text.trim().is_empty() || self.key_points.is_empty() {
            return Err(GraderError::Validation(
                "Please provide essay text and at least one key point.".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate and move to `Submitting`.
    ///
    /// Returns the request to dispatch, or `None` when a request is already in
    /// flight. A validation failure leaves the session untouched.
    pub fn begin_submit(&mut self) -> Result<Option<GradingRequest>> {
        if self.is_submitting() {
            debug!(session = %self.id, "Submission ignored, request already in flight");
            METRICS.record_rejected_submission("in_flight");
            return Ok(None);
        }

        if let Err(e) = self.validate() {
            METRICS.record_rejected_submission("validation");
            return Err(e);
        }

        let request =
            GradingRequestBuilder::build(&self.essay_text, &self.key_points, &self.rubric);

        self.status = SessionStatus::Submitting;
        self.last_result = None;
        self.last_error = None;

        info!(
            session = %self.id,
            essay_len = self.essay_text.len(),
            key_points = self.key_points.len(),
            "Submitting essay for grading"
        );

        Ok(Some(request))
    }

    /// Apply the outcome of a dispatched request.
    ///
    /// Responses carry no generation tag; whatever arrives is applied.
    pub fn finish_submit(&mut self, outcome: Result<GradingResult>) -> SessionStatus {
        if !self.is_submitting() {
            warn!(
                session = %self.id,
                status = self.status.as_str(),
                "Grading outcome arrived with no request in flight"
            );
        }

        match outcome {
            Ok(result) => {
                info!(session = %self.id, total_score = result.total_score, "Essay graded");
                self.status = SessionStatus::Succeeded;
                self.last_result = Some(result);
                self.last_error = None;
            }
            Err(e) => {
                warn!(session = %self.id, "Error grading essay: {}", e);
                self.status = SessionStatus::Failed;
                self.last_result = None;
                self.last_error = Some(e.user_message());
            }
        }

        self.status
    }

    /// Validate, dispatch to `engine`, and record the outcome.
    ///
    /// Returns the resulting status; `Submitting` means the call was ignored
    /// because another request is outstanding.
    pub async fn submit(&mut self, engine: &dyn GradingEngine) -> Result<SessionStatus> {
        let request = match self.begin_submit()? {
            Some(request) => request,
            None => return Ok(self.status),
        };

        let outcome = engine.grade(&request).await;
        Ok(self.finish_submit(outcome))
    }

    /// Replace essay and key points with the sample set.
    ///
    /// Both sample endpoints must succeed; otherwise the failure is logged and
    /// the session is left as it was. Status and results are never touched.
    pub async fn load_sample(&mut self, provider: &dyn SampleDataProvider) -> bool {
        let fetched = tokio::try_join!(
            provider.sample_rubric_available(),
            provider.sample_key_points()
        );

        match fetched {
            Ok(((), key_points)) => {
                debug!(
                    session = %self.id,
                    topic = %key_points.topic,
                    "Loaded sample data"
                );
                self.key_points = KeyPointSet::from(key_points);
                self.essay_text = SAMPLE_ESSAY.to_string();
                METRICS.record_sample_load(true);
                true
            }
            Err(e) => {
                warn!(session = %self.id, "Error loading sample data: {}", e);
                METRICS.record_sample_load(false);
                false
            }
        }
    }
}
