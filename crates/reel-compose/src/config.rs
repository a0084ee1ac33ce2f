//! Compose engine configuration.

use std::time::Duration;

use reel_models::EncodingConfig;

/// Configuration for the compositing pipeline.
#[derive(Debug, Clone)]
pub struct ComposeConfig {
    /// Maximum scenes rendered in parallel within one job. Renders are
    /// process-heavy, so this stays small.
    pub max_scene_parallel: usize,
    /// Wall-clock bound for one whole compose job.
    pub job_timeout: Duration,
    /// Root directory for per-job temporary workspaces.
    pub work_dir: String,
    /// Encoding parameters for intermediate clip renders.
    pub encoding: EncodingConfig,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            max_scene_parallel: 3,
            job_timeout: Duration::from_secs(60),
            work_dir: "/tmp/reelforge".to_string(),
            encoding: EncodingConfig::default(),
        }
    }
}

impl ComposeConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            max_scene_parallel: std::env::var("COMPOSE_MAX_SCENE_PARALLEL")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3),
            job_timeout: Duration::from_secs(
                std::env::var("COMPOSE_JOB_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(60),
            ),
            work_dir: std::env::var("COMPOSE_WORK_DIR")
                .unwrap_or_else(|_| "/tmp/reelforge".to_string()),
            encoding: EncodingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ComposeConfig::default();
        assert_eq!(config.max_scene_parallel, 3);
        assert_eq!(config.job_timeout, Duration::from_secs(60));
    }
}
