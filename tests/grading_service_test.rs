//! Integration tests for the grading session against a mock grading service

use essay_grader::grading::{GradingEngine, GradingRequestBuilder, SAMPLE_ESSAY};
use essay_grader::{
    GraderConfig, GraderError, GradingServiceClient, GradingSession, KeyPointSet, ResultPresenter,
    RubricConfig, ScoreTier, SessionStatus,
};
use mockito::{Matcher, Server};
use secrecy::SecretString;
use serde_json::json;

fn client_for(server: &Server) -> GradingServiceClient {
    let mut config = GraderConfig::default();
    config.service_url = server.url();
    config.timeout_ms = 2000;
    GradingServiceClient::new(config).unwrap()
}

fn ready_session() -> GradingSession {
    let mut session = GradingSession::new();
    session.set_essay_text("Solar power reduces emissions.");
    session.key_points_mut().add_point("reduce emissions");
    session
}

const GRADED_BODY: &str = r#"{"success": true, "results": {
    "Content Accuracy": {"score": 3, "avg_similarity": 0.81},
    "total_score": 3.2,
    "feedback": "Good."
}}"#;

#[tokio::test]
async fn test_submit_success() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/grade")
        .match_body(Matcher::PartialJson(json!({
            "essay_text": "Solar power reduces emissions.",
            "key_points": {"topic": "Essay Topic", "points": ["reduce emissions"]},
            "rubric": {"name": "Essay Quality Rubric"}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(GRADED_BODY)
        .create_async()
        .await;

    let client = client_for(&server);
    let mut session = ready_session();

    let status = session.submit(&client).await.unwrap();

    mock.assert_async().await;
    assert_eq!(status, SessionStatus::Succeeded);
    let result = session.last_result().unwrap();
    assert_eq!(result.total_score, 3.2);
    assert_eq!(result.criteria["Content Accuracy"].score, 3);

    let breakdown = ResultPresenter::present(result);
    assert_eq!(breakdown.total_label, "3.20/4.0");
    assert_eq!(breakdown.rows[0].score_percent_label, "81.0%");
    assert_eq!(breakdown.rows[0].tier, ScoreTier::Warning);
}

#[tokio::test]
async fn test_bearer_auth_is_sent() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/grade")
        .match_header("authorization", "Bearer secret-token")
        .with_status(200)
        .with_body(GRADED_BODY)
        .create_async()
        .await;

    let mut config = GraderConfig::default();
    config.service_url = server.url();
    config.api_key = Some(SecretString::new("secret-token".to_string()));
    let client = GradingServiceClient::new(config).unwrap();

    let request = GradingRequestBuilder::build(
        "essay",
        &KeyPointSet::from_parts("", ["point"]),
        &RubricConfig::essay_quality(),
    );
    assert!(client.grade(&request).await.is_ok());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_service_error_message_is_surfaced() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/grade")
        .with_status(400)
        .with_body(r#"{"error": "Key points are required"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let mut session = ready_session();

    let status = session.submit(&client).await.unwrap();
    assert_eq!(status, SessionStatus::Failed);
    assert_eq!(session.last_error(), Some("Key points are required"));
    assert!(session.last_result().is_none());
}

#[tokio::test]
async fn test_service_error_without_message_falls_back() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/grade")
        .with_status(500)
        .with_body("Internal Server Error")
        .create_async()
        .await;

    let client = client_for(&server);
    let request = GradingRequestBuilder::build(
        "essay",
        &KeyPointSet::from_parts("Topic", ["point"]),
        &RubricConfig::essay_quality(),
    );

    match client.grade(&request).await {
        Err(GraderError::Service { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "Unknown error");
        }
        other => panic!("Expected service error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_success_response_fails_session() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/grade")
        .with_status(200)
        .with_body(r#"{"success": true}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let mut session = ready_session();

    let status = session.submit(&client).await.unwrap();
    assert_eq!(status, SessionStatus::Failed);
    assert_eq!(session.last_error(), Some("Unknown error"));
}

#[tokio::test]
async fn test_validation_failure_sends_nothing() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/grade")
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server);
    let mut session = GradingSession::new();
    session.key_points_mut().add_point("reduce emissions");

    let result = session.submit(&client).await;
    assert!(matches!(result, Err(GraderError::Validation(_))));
    assert_eq!(session.status(), SessionStatus::Idle);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_load_sample_overwrites_content_only() {
    let mut server = Server::new_async().await;
    let rubric = server
        .mock("GET", "/api/sample-rubric")
        .with_status(200)
        .with_body(serde_json::to_string(&RubricConfig::essay_quality()).unwrap())
        .create_async()
        .await;
    let key_points = server
        .mock("GET", "/api/sample-keypoints")
        .with_status(200)
        .with_body(
            json!({
                "topic": "The Importance of Renewable Energy",
                "points": [
                    "Renewable energy sources reduce reliance on fossil fuels.",
                    "Solar power and wind power are examples of renewable energy."
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let mut session = GradingSession::new();
    session.set_essay_text("draft");

    assert!(session.load_sample(&client).await);
    rubric.assert_async().await;
    key_points.assert_async().await;

    assert_eq!(session.essay_text(), SAMPLE_ESSAY);
    assert_eq!(session.key_points().topic(), "The Importance of Renewable Energy");
    assert_eq!(session.key_points().len(), 2);
    assert_eq!(session.status(), SessionStatus::Idle);
    assert!(session.last_result().is_none());
}

#[tokio::test]
async fn test_load_sample_requires_both_endpoints() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/sample-rubric")
        .with_status(404)
        .create_async()
        .await;
    server
        .mock("GET", "/api/sample-keypoints")
        .with_status(200)
        .with_body(r#"{"topic": "T", "points": ["p"]}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let mut session = ready_session();

    assert!(!session.load_sample(&client).await);
    assert_eq!(session.essay_text(), "Solar power reduces emissions.");
    assert_eq!(session.key_points().points(), &["reduce emissions".to_string()]);
    assert_eq!(session.status(), SessionStatus::Idle);
}

#[tokio::test]
async fn test_sample_rubric_body_is_not_parsed() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/sample-rubric")
        .with_status(200)
        .with_body(r#"{"name": "R", "rubric": true}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/api/sample-keypoints")
        .with_status(200)
        .with_body(r#"{"topic": "Energy", "points": ["wind"]}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let mut session = GradingSession::new();

    assert!(session.load_sample(&client).await);
    assert_eq!(session.key_points().topic(), "Energy");
    assert_eq!(session.essay_text(), SAMPLE_ESSAY);
}

#[tokio::test]
async fn test_unreachable_service_fails_session() {
    let mut config = GraderConfig::default();
    config.service_url = "http://127.0.0.1:1".to_string();
    config.timeout_ms = 500;
    let client = GradingServiceClient::new(config).unwrap();
    let mut session = ready_session();

    let status = session.submit(&client).await.unwrap();
    assert_eq!(status, SessionStatus::Failed);
    assert!(session.last_error().unwrap().starts_with("Transport error: "));
    assert!(session.last_result().is_none());
}
