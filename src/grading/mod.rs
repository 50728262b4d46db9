//! Essay grading session
//!
//! Client-side workflow around an external grading engine:
//! - Key point editing with trimming and index-checked removal
//! - Request assembly with the fixed essay quality rubric
//! - A session state machine driving one grading request at a time
//! - Score breakdowns with tier classification for display

pub mod client;
pub mod key_points;
pub mod models;
pub mod presenter;
pub mod request;
pub mod rubric;
pub mod session;

pub use client::{GradingEngine, GradingServiceClient, SampleDataProvider};
pub use key_points::KeyPointSet;
pub use models::{CriterionBreakdown, GradingResult};
pub use presenter::{CriterionRow, PresentableBreakdown, ResultPresenter, ScoreTier};
pub use request::{GradingRequest, GradingRequestBuilder, KeyPointsPayload, DEFAULT_TOPIC};
pub use rubric::{Criterion, RubricConfig};
pub use session::{GradingSession, SessionStatus, SAMPLE_ESSAY};
