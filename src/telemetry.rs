//! Tracing subscriber setup

use crate::config::GraderConfig;
use crate::error::{GraderError, Result};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init_tracing(config: &GraderConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| GraderError::Config(e.to_string()))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = if config.log_json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| GraderError::Config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_is_rejected() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let mut config = GraderConfig::default();
        config.log_level = "essay_grader=loud".to_string();
        assert!(matches!(init_tracing(&config), Err(GraderError::Config(_))));
    }
}
