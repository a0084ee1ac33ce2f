//! Per-scene render fan-out.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use reel_media::{Compositor, SegmentRenderRequest};
use reel_models::SceneVideoMapping;
use tokio::sync::Semaphore;
use tracing::{debug, info};

use crate::error::{ComposeError, ComposeResult};
use crate::workdir::JobWorkspace;

const RANGE_EPSILON: f64 = 1e-6;

/// Render every mapped scene into an intermediate clip.
///
/// Scenes render concurrently under a bounded pool; results are keyed by
/// scene index, so the returned clip list is always in scene order no
/// matter which render finishes first. Any single failure fails the
/// whole batch with that scene's index and message, and the remaining
/// in-flight renders are aborted; a silently dropped scene would ship a
/// shorter video than the template promised.
pub async fn render_scenes(
    compositor: Arc<dyn Compositor>,
    mappings: &[SceneVideoMapping],
    source_path: &Path,
    source_duration: f64,
    content_variables: &HashMap<String, String>,
    workspace: &JobWorkspace,
    max_parallel: usize,
) -> ComposeResult<Vec<PathBuf>> {
    // Out-of-range slices are hard per-scene errors, not truncation:
    // trimming would desynchronize burned-in overlay timing from the
    // visible footage.
    for (index, mapping) in mappings.iter().enumerate() {
        let video_end = mapping.resolved_video_end();
        if mapping.video_start >= source_duration || video_end > source_duration + RANGE_EPSILON {
            return Err(ComposeError::scene_render_failed(
                index,
                format!(
                    "source slice {:.3}..{:.3} exceeds footage duration {:.3}",
                    mapping.video_start, video_end, source_duration
                ),
            ));
        }
    }

    let semaphore = Arc::new(Semaphore::new(max_parallel.max(1)));
    // JoinSet aborts everything still running if the job is abandoned
    // (e.g. the overall timeout fires), so renders never outlive the job.
    let mut join_set = tokio::task::JoinSet::new();

    for (index, mapping) in mappings.iter().enumerate() {
        let clip_path = workspace.tracked_path(&format!("clip_{:04}.mp4", index));

        // The renderer composites against a per-call zero origin, so the
        // scene clone is rebased; the overlay is deep-copied with it.
        let request = SegmentRenderRequest {
            scene: mapping.scene.rebase_to_origin(),
            source_path: source_path.to_path_buf(),
            trim_start: mapping.video_start,
            trim_end: mapping.resolved_video_end(),
            content_variables: content_variables.clone(),
            output_path: clip_path.clone(),
        };

        let compositor = Arc::clone(&compositor);
        let semaphore = Arc::clone(&semaphore);

        join_set.spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .expect("render semaphore closed");
            debug!(scene_index = index, "Rendering scene");
            let result = compositor.render_segment(&request).await;
            (index, result.map(|_| clip_path))
        });
    }

    // Index-keyed slots: completion order is arbitrary, clip order is not
    let mut slots: Vec<Option<PathBuf>> = (0..mappings.len()).map(|_| None).collect();
    let mut failure: Option<(usize, String)> = None;

    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((index, Ok(path))) => slots[index] = Some(path),
            Ok((index, Err(e))) => {
                failure = Some((index, e.to_string()));
                break;
            }
            Err(e) if e.is_cancelled() => {}
            Err(e) => {
                let index = slots.iter().position(Option::is_none).unwrap_or(0);
                failure = Some((index, format!("render task panicked: {}", e)));
                break;
            }
        }
    }

    if let Some((scene_index, message)) = failure {
        // Fail fast: abandon the siblings, partial output is never kept
        join_set.shutdown().await;
        return Err(ComposeError::scene_render_failed(scene_index, message));
    }

    let clips: Vec<PathBuf> = slots
        .into_iter()
        .map(|slot| slot.expect("every scene render accounted for"))
        .collect();

    info!(clips = clips.len(), "All scenes rendered");
    Ok(clips)
}
