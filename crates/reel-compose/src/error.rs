//! Compose pipeline error types.

use reel_media::MediaError;
use reel_models::TemplateError;
use thiserror::Error;

pub type ComposeResult<T> = Result<T, ComposeError>;

/// Errors surfaced by the compositing pipeline.
///
/// Every stage failure bubbles up unmodified; the caller always sees
/// either a complete rendered video or exactly one of these. Temp-file
/// cleanup failures are deliberately absent: they are logged and
/// swallowed inside the workspace teardown and never override the job's
/// real outcome.
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("No valid segments after normalization")]
    NoValidSegments,

    #[error("Source footage fetch failed: {source}")]
    SourceFetchFailed {
        #[source]
        source: MediaError,
    },

    #[error("Duration probe failed: {source}")]
    DurationProbeFailed {
        #[source]
        source: MediaError,
    },

    #[error("Scene {scene_index} failed to render: {message}")]
    SceneRenderFailed { scene_index: usize, message: String },

    #[error("Clip assembly failed: {source}")]
    AssemblyFailed {
        #[source]
        source: MediaError,
    },

    #[error("Compose job timed out after {0} seconds")]
    Timeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ComposeError {
    pub fn invalid_template(message: impl Into<String>) -> Self {
        Self::InvalidTemplate(message.into())
    }

    pub fn source_fetch_failed(source: MediaError) -> Self {
        Self::SourceFetchFailed { source }
    }

    pub fn duration_probe_failed(source: MediaError) -> Self {
        Self::DurationProbeFailed { source }
    }

    pub fn scene_render_failed(scene_index: usize, message: impl Into<String>) -> Self {
        Self::SceneRenderFailed {
            scene_index,
            message: message.into(),
        }
    }

    pub fn assembly_failed(source: MediaError) -> Self {
        Self::AssemblyFailed { source }
    }
}

impl From<TemplateError> for ComposeError {
    fn from(e: TemplateError) -> Self {
        Self::InvalidTemplate(e.to_string())
    }
}
