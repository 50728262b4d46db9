//! Example: grade the sample essay against a running grading service
//!
//! Usage: cargo run --example grade_sample -- [config.toml]

use essay_grader::{
    telemetry, GraderConfig, GradingServiceClient, GradingSession, ResultPresenter, SessionStatus,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = std::env::args().nth(1);
    let config = GraderConfig::load(path.as_deref())?;
    telemetry::init_tracing(&config)?;

    let client = GradingServiceClient::new(config)?;
    let mut session = GradingSession::new();

    if !session.load_sample(&client).await {
        anyhow::bail!("Could not load sample data from the grading service");
    }

    println!("Topic: {}", session.key_points().topic());
    for (i, point) in session.key_points().points().iter().enumerate() {
        println!("  {}. {}", i + 1, point);
    }
    println!();

    match session.submit(&client).await? {
        SessionStatus::Succeeded => {
            if let Some(result) = session.last_result() {
                print!("{}", ResultPresenter::present(result));
            }
        }
        _ => {
            let message = session.last_error().unwrap_or("Unknown error");
            anyhow::bail!("Error grading essay: {}", message);
        }
    }

    Ok(())
}
