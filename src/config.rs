//! Configuration for the grading service client

use crate::error::{GraderError, Result};
use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Grading client configuration
#[derive(Debug, Deserialize)]
pub struct GraderConfig {
    /// Base URL of the grading service
    #[serde(default = "default_service_url")]
    pub service_url: String,

    /// Path of the grading endpoint
    #[serde(default = "default_grade_path")]
    pub grade_path: String,

    #[serde(default = "default_sample_rubric_path")]
    pub sample_rubric_path: String,

    #[serde(default = "default_sample_key_points_path")]
    pub sample_key_points_path: String,

    /// Bearer token (read from env GRADER_API_KEY if not set)
    #[serde(default)]
    pub api_key: Option<SecretString>,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Default tracing filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[serde(default)]
    pub log_json: bool,
}

fn default_service_url() -> String { "http://localhost:5000".to_string() }
fn default_grade_path() -> String { "/api/grade".to_string() }
fn default_sample_rubric_path() -> String { "/api/sample-rubric".to_string() }
fn default_sample_key_points_path() -> String { "/api/sample-keypoints".to_string() }
fn default_timeout_ms() -> u64 { 30_000 }
fn default_log_level() -> String { "info".to_string() }

impl Default for GraderConfig {
    fn default() -> Self {
        Self {
            service_url: default_service_url(),
            grade_path: default_grade_path(),
            sample_rubric_path: default_sample_rubric_path(),
            sample_key_points_path: default_sample_key_points_path(),
            api_key: None,
            timeout_ms: default_timeout_ms(),
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

impl GraderConfig {
    /// Load configuration from a file (format picked by extension)
    pub fn from_file(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()
            .map_err(|e| GraderError::Config(e.to_string()))?;

        settings
            .try_deserialize()
            .map_err(|e| GraderError::Config(e.to_string()))
    }

    /// Read `.env`, then an optional config file, then environment overrides
    pub fn load(path: Option<&str>) -> Result<Self> {
        if let Ok(env_path) = dotenvy::dotenv() {
            debug!("Loaded environment from {}", env_path.display());
        }

        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        Ok(base.from_env())
    }

    /// Override with environment variables if present
    pub fn from_env(mut self) -> Self {
        if let Ok(val) = std::env::var("GRADER_SERVICE_URL") {
            self.service_url = val;
        }

        if let Ok(val) = std::env::var("GRADER_API_KEY") {
            self.api_key = Some(SecretString::new(val));
        }

        if let Ok(val) = std::env::var("GRADER_TIMEOUT_MS") {
            if let Ok(timeout) = val.parse() {
                self.timeout_ms = timeout;
            }
        }

        if let Ok(val) = std::env::var("GRADER_LOG_LEVEL") {
            self.log_level = val;
        }

        if let Ok(val) = std::env::var("GRADER_LOG_JSON") {
            self.log_json = val.to_lowercase() == "true" || val == "1";
        }

        self
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Join the base URL with an endpoint path
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.service_url.trim_end_matches('/'), path)
    }
}
