//! The compose pipeline coordinator.

use std::collections::HashMap;
use std::sync::Arc;

use reel_media::Compositor;
use reel_models::{JobId, Template, VideoSegmentRange};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::assemble::assemble_clips;
use crate::config::ComposeConfig;
use crate::error::{ComposeError, ComposeResult};
use crate::mapping::{map_scenes, map_scenes_with_segments};
use crate::render::render_scenes;
use crate::segments::normalize_segments;
use crate::workdir::JobWorkspace;

/// One compose request: a template, one source footage URL, and optional
/// creator-supplied inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposeRequest {
    pub template: Template,
    /// URL of the single source footage file to sample from.
    pub source_url: String,
    /// Values substituted into `{{placeholder}}` overlay text.
    #[serde(default)]
    pub content_variables: HashMap<String, String>,
    /// Footage ranges picked by the creator or an upstream planner, one
    /// per scene in order. Normalized against the probed duration; when
    /// absent, scenes use the passthrough mapping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<VideoSegmentRange>>,
}

/// A finished render: the file bytes plus the container format tag.
/// Persisting or uploading it is the caller's business.
#[derive(Debug, Clone)]
pub struct RenderedVideo {
    pub bytes: Vec<u8>,
    pub format: String,
}

/// Coordinates one compose job end to end.
///
/// The compositor is an injected handle; the coordinator owns nothing
/// global. Every temporary file lives in a job-exclusive workspace that
/// is torn down on every exit path, including timeout.
pub struct Composer {
    compositor: Arc<dyn Compositor>,
    config: ComposeConfig,
}

impl Composer {
    pub fn new(compositor: Arc<dyn Compositor>, config: ComposeConfig) -> Self {
        Self { compositor, config }
    }

    /// Run one compose job: fetch, probe, map, render, assemble.
    pub async fn compose(&self, request: &ComposeRequest) -> ComposeResult<RenderedVideo> {
        // Reject malformed templates before touching the filesystem
        request.template.validate()?;

        let job_id = JobId::new();
        let scene_count = request.template.scenes.len();
        info!(
            job_id = %job_id,
            scenes = scene_count,
            source_url = %request.source_url,
            "Starting compose job"
        );

        let workspace = JobWorkspace::create(&self.config.work_dir, &job_id).await?;

        let timeout_secs = self.config.job_timeout.as_secs();
        let outcome = match tokio::time::timeout(
            self.config.job_timeout,
            self.run(request, &workspace),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(ComposeError::Timeout(timeout_secs)),
        };

        // Teardown runs on every exit path. A timeout abandons in-flight
        // render futures; their processes die with kill_on_drop, and the
        // workspace still sweeps whatever was tracked up to that point.
        workspace.cleanup().await;

        match &outcome {
            Ok(video) => info!(
                job_id = %job_id,
                bytes = video.bytes.len(),
                format = %video.format,
                "Compose job complete"
            ),
            Err(e) => error!(job_id = %job_id, error = %e, "Compose job failed"),
        }

        outcome
    }

    async fn run(
        &self,
        request: &ComposeRequest,
        workspace: &JobWorkspace,
    ) -> ComposeResult<RenderedVideo> {
        let source_path = workspace.tracked_path("source.mp4");
        self.compositor
            .fetch_source(&request.source_url, &source_path)
            .await
            .map_err(ComposeError::source_fetch_failed)?;

        let source_duration = self
            .compositor
            .probe_duration(&source_path)
            .await
            .map_err(ComposeError::duration_probe_failed)?;

        let mappings = match &request.segments {
            Some(candidates) => {
                let anchors = normalize_segments(candidates, source_duration)?;
                map_scenes_with_segments(&request.template.scenes, &anchors)?
            }
            None => map_scenes(&request.template.scenes)?,
        };

        let clips = render_scenes(
            Arc::clone(&self.compositor),
            &mappings,
            &source_path,
            source_duration,
            &request.content_variables,
            workspace,
            self.config.max_scene_parallel,
        )
        .await?;

        let final_path = assemble_clips(
            &self.compositor,
            &clips,
            workspace,
            &self.config.encoding.container,
        )
        .await?;

        let bytes = tokio::fs::read(&final_path).await?;
        Ok(RenderedVideo {
            bytes,
            format: self.config.encoding.container.clone(),
        })
    }
}
