//! Intermediate clip assembly.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use reel_media::{Compositor, MediaError};
use tracing::{debug, info};

use crate::error::{ComposeError, ComposeResult};
use crate::workdir::JobWorkspace;

/// File name of the concat demuxer manifest inside the job workspace.
pub const CONCAT_MANIFEST_NAME: &str = "concat_list.txt";

/// Escape a clip path for a `file '...'` manifest line.
///
/// Inside single quotes the only dangerous byte is the quote itself:
/// close the quote, emit an escaped quote, reopen. Without this an
/// apostrophe in a path would split it into two tokens.
fn escape_manifest_path(path: &Path) -> String {
    path.to_string_lossy().replace('\'', "'\\''")
}

/// Build the concat demuxer manifest for an ordered clip list.
pub fn build_concat_manifest(clips: &[PathBuf]) -> ComposeResult<String> {
    if clips.is_empty() {
        return Err(ComposeError::assembly_failed(MediaError::invalid_video(
            "refusing to build a concat manifest with zero clips",
        )));
    }
    Ok(clips
        .iter()
        .map(|path| format!("file '{}'\n", escape_manifest_path(path)))
        .collect())
}

/// Join the ordered intermediate clips into one output file.
///
/// A single clip IS the final output: its path is returned untouched, no
/// manifest, no re-encode. Multiple clips go through stream-copy
/// concatenation, keeping cost proportional to clip count rather than
/// total duration.
pub async fn assemble_clips(
    compositor: &Arc<dyn Compositor>,
    clips: &[PathBuf],
    workspace: &JobWorkspace,
    container: &str,
) -> ComposeResult<PathBuf> {
    match clips {
        [] => Err(ComposeError::assembly_failed(MediaError::invalid_video(
            "no clips to assemble",
        ))),
        [single] => {
            debug!(clip = %single.display(), "Single clip, skipping concatenation");
            Ok(single.clone())
        }
        many => {
            let manifest_path = workspace.tracked_path(CONCAT_MANIFEST_NAME);
            let manifest = build_concat_manifest(many)?;
            tokio::fs::write(&manifest_path, &manifest).await?;

            let output = workspace.tracked_path(&format!("joined.{}", container));
            compositor
                .concat_segments(&manifest_path, &output)
                .await
                .map_err(ComposeError::assembly_failed)?;

            info!(clips = many.len(), output = %output.display(), "Clips assembled");
            Ok(output)
        }
    }
}
