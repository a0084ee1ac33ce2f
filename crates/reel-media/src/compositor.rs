//! The external compositing boundary.
//!
//! The engine drives four operations: fetch source footage, probe its
//! duration, render one scene onto a trimmed slice, and join rendered
//! clips. They are grouped behind one trait so the pipeline receives a
//! single injected handle instead of reaching for globals, and so tests
//! can stand in for the whole boundary.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use reel_models::{EncodingConfig, Scene};
use tracing::{debug, info};

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};
use crate::filters::build_overlay_filter;
use crate::{fetch, probe};

/// One single-scene render call.
///
/// The scene is a rebased clone (its window starts at 0); `trim_start` /
/// `trim_end` locate the slice of source footage to composite onto.
#[derive(Debug, Clone)]
pub struct SegmentRenderRequest {
    pub scene: Scene,
    pub source_path: PathBuf,
    pub trim_start: f64,
    pub trim_end: f64,
    pub content_variables: HashMap<String, String>,
    pub output_path: PathBuf,
}

/// External compositing operations consumed by the pipeline.
#[async_trait]
pub trait Compositor: Send + Sync {
    /// Fetch source footage from a URL into `dest`. Returns bytes written.
    async fn fetch_source(&self, url: &str, dest: &Path) -> MediaResult<u64>;

    /// Probe the duration of a local footage file, in seconds.
    async fn probe_duration(&self, path: &Path) -> MediaResult<f64>;

    /// Render one scene over its source slice into `request.output_path`.
    async fn render_segment(&self, request: &SegmentRenderRequest) -> MediaResult<()>;

    /// Stream-copy join the clips listed in a concat manifest.
    async fn concat_segments(&self, manifest: &Path, output: &Path) -> MediaResult<()>;
}

/// Production compositor backed by the FFmpeg CLI.
#[derive(Debug, Clone)]
pub struct FfmpegCompositor {
    encoding: EncodingConfig,
    /// Per-invocation timeout; the pipeline applies its own overall
    /// wall-clock bound on top.
    command_timeout_secs: u64,
}

impl FfmpegCompositor {
    pub fn new(encoding: EncodingConfig) -> Self {
        Self {
            encoding,
            command_timeout_secs: 300,
        }
    }

    pub fn with_command_timeout(mut self, secs: u64) -> Self {
        self.command_timeout_secs = secs;
        self
    }

    fn runner(&self) -> FfmpegRunner {
        FfmpegRunner::new().with_timeout(self.command_timeout_secs)
    }
}

#[async_trait]
impl Compositor for FfmpegCompositor {
    async fn fetch_source(&self, url: &str, dest: &Path) -> MediaResult<u64> {
        fetch::fetch_source(url, dest).await
    }

    async fn probe_duration(&self, path: &Path) -> MediaResult<f64> {
        probe::probe_duration(path).await
    }

    async fn render_segment(&self, request: &SegmentRenderRequest) -> MediaResult<()> {
        let duration = request.trim_end - request.trim_start;
        if duration <= 0.0 {
            return Err(MediaError::invalid_video(format!(
                "Trim window is empty: start={}, end={}",
                request.trim_start, request.trim_end
            )));
        }

        // Two-pass seek: fast input seek to the nearest keyframe, then an
        // accurate output seek for frame-exact trim points.
        let fast_seek = (request.trim_start - 5.0).max(0.0);
        let accurate_seek = request.trim_start - fast_seek;

        let mut cmd = FfmpegCommand::new(&request.source_path, &request.output_path)
            .seek(fast_seek)
            .accurate_seek(accurate_seek)
            .duration(duration)
            .video_codec(&self.encoding.codec)
            .preset(&self.encoding.preset)
            .crf(self.encoding.crf)
            .audio_codec(&self.encoding.audio_codec)
            .audio_bitrate(&self.encoding.audio_bitrate)
            .avoid_negative_ts()
            .faststart();

        if let Some(overlay) = request.scene.overlay() {
            cmd = cmd.video_filter(build_overlay_filter(overlay, &request.content_variables));
        }

        debug!(
            trim_start = request.trim_start,
            trim_end = request.trim_end,
            output = %request.output_path.display(),
            "Rendering segment"
        );

        self.runner().run(&cmd).await?;

        info!(output = %request.output_path.display(), "Segment rendered");
        Ok(())
    }

    async fn concat_segments(&self, manifest: &Path, output: &Path) -> MediaResult<()> {
        if !manifest.exists() {
            return Err(MediaError::FileNotFound(manifest.to_path_buf()));
        }

        let cmd = FfmpegCommand::new(manifest, output)
            .input_format("concat")
            .input_arg("-safe")
            .input_arg("0")
            .codec_copy()
            .faststart();

        self.runner().run(&cmd).await?;

        info!(output = %output.display(), "Segments concatenated");
        Ok(())
    }
}
