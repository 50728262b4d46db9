//! Grading service client and the collaborator seams the session talks to

use super::models::{ErrorResponse, GradingResult};
use super::request::{GradingRequest, KeyPointsPayload};
use crate::config::GraderConfig;
use crate::error::{GraderError, Result};
use crate::metrics::METRICS;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use std::time::Instant;
use tracing::{debug, error, warn};

/// External engine that scores an essay against a rubric
#[async_trait]
pub trait GradingEngine: Send + Sync {
    async fn grade(&self, request: &GradingRequest) -> Result<GradingResult>;
}

/// Source of demo topic and key points
#[async_trait]
pub trait SampleDataProvider: Send + Sync {
    /// Succeeds when the sample rubric is being served; its content is unused.
    async fn sample_rubric_available(&self) -> Result<()>;
    async fn sample_key_points(&self) -> Result<KeyPointsPayload>;
}

/// HTTP client for the grading service
pub struct GradingServiceClient {
    http: Client,
    config: GraderConfig,
}

impl GradingServiceClient {
    /// Create a new grading service client
    pub fn new(config: GraderConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| GraderError::Config(e.to_string()))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &GraderConfig {
        &self.config
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.config.api_key {
            Some(api_key) => req.bearer_auth(api_key.expose_secret()),
            None => req,
        }
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response> {
        self.authorized(req).send().await.map_err(|e| {
            if e.is_timeout() {
                GraderError::Transport(format!("request timed out: {}", e))
            } else {
                GraderError::Transport(e.to_string())
            }
        })
    }

    async fn call_grade_api(&self, request: &GradingRequest) -> Result<GradingResult> {
        let url = self.config.endpoint(&self.config.grade_path);

        debug!(
            essay_len = request.essay_text.len(),
            key_points = request.key_points.points.len(),
            "Calling grading API"
        );

        let response = self.send(self.http.post(&url).json(request)).await?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GraderError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(GraderError::Service {
                status: status.as_u16(),
                message: ErrorResponse::message_from(&body),
            });
        }

        GradingResult::from_response_body(&body)
    }

    async fn get_ok(&self, path: &str) -> Result<Response> {
        let url = self.config.endpoint(path);
        let response = self.send(self.http.get(&url)).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GraderError::Service {
                status: status.as_u16(),
                message: ErrorResponse::message_from(&body),
            });
        }

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get_ok(path)
            .await?
            .json()
            .await
            .map_err(|e| GraderError::MalformedResponse(e.to_string()))
    }
}

fn outcome_label(result: &Result<GradingResult>) -> &'static str {
    match result {
        Ok(_) => "success",
        Err(GraderError::Transport(_)) => "transport_error",
        Err(GraderError::MalformedResponse(_)) => "malformed",
        Err(_) => "service_error",
    }
}

#[async_trait]
impl GradingEngine for GradingServiceClient {
    async fn grade(&self, request: &GradingRequest) -> Result<GradingResult> {
        let start = Instant::now();
        let result = self.call_grade_api(request).await;

        METRICS.record_grading(outcome_label(&result), start.elapsed().as_secs_f64());

        match &result {
            Ok(graded) => debug!(
                total_score = graded.total_score,
                criteria = graded.criteria.len(),
                "Grading succeeded"
            ),
            Err(e @ GraderError::Transport(_)) => error!("Grading request failed: {}", e),
            Err(e) => warn!("Grading service rejected request: {}", e),
        }

        result
    }
}

#[async_trait]
impl SampleDataProvider for GradingServiceClient {
    async fn sample_rubric_available(&self) -> Result<()> {
        self.get_ok(&self.config.sample_rubric_path).await.map(|_| ())
    }

    async fn sample_key_points(&self) -> Result<KeyPointsPayload> {
        self.get_json(&self.config.sample_key_points_path).await
    }
}
