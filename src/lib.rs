//! Rubric-based essay grading client
//!
//! Manages an evaluator's grading session against an external grading
//! service: key points, submission, and a display-ready score breakdown.

pub mod config;
pub mod error;
pub mod grading;
pub mod metrics;
pub mod telemetry;

pub use config::GraderConfig;
pub use error::{GraderError, Result};
pub use grading::{
    GradingEngine, GradingResult, GradingServiceClient, GradingSession, KeyPointSet,
    PresentableBreakdown, ResultPresenter, RubricConfig, SampleDataProvider, ScoreTier,
    SessionStatus,
};
