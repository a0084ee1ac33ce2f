//! FFmpeg command builder and runner.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncReadExt;
use tokio::process::{Child, Command};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::{MediaError, MediaResult};

/// Builder for FFmpeg invocations.
///
/// Input args go before `-i`, output args after; the builder keeps the
/// two apart so seek/trim flags land on the side FFmpeg expects.
#[derive(Debug, Clone)]
pub struct FfmpegCommand {
    input: PathBuf,
    output: PathBuf,
    input_args: Vec<String>,
    output_args: Vec<String>,
    overwrite: bool,
    log_level: String,
}

impl FfmpegCommand {
    pub fn new(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Self {
        Self {
            input: input.as_ref().to_path_buf(),
            output: output.as_ref().to_path_buf(),
            input_args: Vec::new(),
            output_args: Vec::new(),
            overwrite: true,
            log_level: "error".to_string(),
        }
    }

    /// Add an input argument (before -i).
    pub fn input_arg(mut self, arg: impl Into<String>) -> Self {
        self.input_args.push(arg.into());
        self
    }

    /// Add an output argument (after -i).
    pub fn output_arg(mut self, arg: impl Into<String>) -> Self {
        self.output_args.push(arg.into());
        self
    }

    /// Fast seek before the input (lands on the preceding keyframe).
    pub fn seek(self, seconds: f64) -> Self {
        self.input_arg("-ss").input_arg(format!("{:.3}", seconds))
    }

    /// Accurate seek after the input (decodes up to the exact frame).
    pub fn accurate_seek(self, seconds: f64) -> Self {
        self.output_arg("-ss").output_arg(format!("{:.3}", seconds))
    }

    /// Limit output duration.
    pub fn duration(self, seconds: f64) -> Self {
        self.output_arg("-t").output_arg(format!("{:.3}", seconds))
    }

    /// Set a video filter chain.
    pub fn video_filter(self, filter: impl Into<String>) -> Self {
        self.output_arg("-vf").output_arg(filter)
    }

    pub fn video_codec(self, codec: impl Into<String>) -> Self {
        self.output_arg("-c:v").output_arg(codec)
    }

    pub fn audio_codec(self, codec: impl Into<String>) -> Self {
        self.output_arg("-c:a").output_arg(codec)
    }

    pub fn crf(self, crf: u8) -> Self {
        self.output_arg("-crf").output_arg(crf.to_string())
    }

    pub fn preset(self, preset: impl Into<String>) -> Self {
        self.output_arg("-preset").output_arg(preset)
    }

    pub fn audio_bitrate(self, bitrate: impl Into<String>) -> Self {
        self.output_arg("-b:a").output_arg(bitrate)
    }

    /// Stream copy all streams, no re-encode.
    pub fn codec_copy(self) -> Self {
        self.output_arg("-c").output_arg("copy")
    }

    /// Force an input demuxer (e.g. "concat").
    pub fn input_format(self, format: impl Into<String>) -> Self {
        self.input_arg("-f").input_arg(format)
    }

    /// Shift timestamps so outputs start at zero. Segment renders need
    /// this or stream-copy concatenation stutters at the joins.
    pub fn avoid_negative_ts(self) -> Self {
        self.output_arg("-avoid_negative_ts").output_arg("make_zero")
    }

    /// Put the moov atom up front for streaming playback.
    pub fn faststart(self) -> Self {
        self.output_arg("-movflags").output_arg("+faststart")
    }

    /// Build the full argument list.
    pub fn build_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        if self.overwrite {
            args.push("-y".to_string());
        }

        args.push("-hide_banner".to_string());
        args.push("-loglevel".to_string());
        args.push(self.log_level.clone());

        args.extend(self.input_args.clone());

        args.push("-i".to_string());
        args.push(self.input.to_string_lossy().to_string());

        args.extend(self.output_args.clone());

        args.push(self.output.to_string_lossy().to_string());

        args
    }
}

/// Runner for FFmpeg commands with timeout and cancellation.
pub struct FfmpegRunner {
    cancel_rx: Option<watch::Receiver<bool>>,
    timeout_secs: Option<u64>,
}

impl Default for FfmpegRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl FfmpegRunner {
    pub fn new() -> Self {
        Self {
            cancel_rx: None,
            timeout_secs: None,
        }
    }

    /// Set a cancellation signal.
    pub fn with_cancel(mut self, cancel_rx: watch::Receiver<bool>) -> Self {
        self.cancel_rx = Some(cancel_rx);
        self
    }

    /// Set a per-command timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Run an FFmpeg command to completion.
    ///
    /// Stderr is captured and attached to the error on non-zero exit.
    /// The child is killed on timeout, cancellation, or if the future is
    /// dropped (kill_on_drop), so abandoned jobs don't leak processes.
    pub async fn run(&self, cmd: &FfmpegCommand) -> MediaResult<()> {
        which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound)?;

        let args = cmd.build_args();
        debug!("Running FFmpeg: ffmpeg {}", args.join(" "));

        let mut child = Command::new("ffmpeg")
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let mut stderr_pipe = child.stderr.take();
        let stderr_task = tokio::spawn(async move {
            let mut buf = String::new();
            if let Some(pipe) = stderr_pipe.as_mut() {
                let _ = pipe.read_to_string(&mut buf).await;
            }
            buf
        });

        let status = self.wait_for_completion(&mut child).await?;
        let stderr = stderr_task.await.unwrap_or_default();

        if status.success() {
            Ok(())
        } else {
            Err(MediaError::ffmpeg_failed(
                "FFmpeg exited with non-zero status",
                Some(stderr),
                status.code(),
            ))
        }
    }

    async fn wait_for_completion(&self, child: &mut Child) -> MediaResult<std::process::ExitStatus> {
        let status = if let Some(secs) = self.timeout_secs {
            match tokio::time::timeout(std::time::Duration::from_secs(secs), child.wait()).await {
                Ok(result) => result?,
                Err(_) => {
                    warn!("FFmpeg timed out after {} seconds, killing process", secs);
                    let _ = child.kill().await;
                    return Err(MediaError::Timeout(secs));
                }
            }
        } else {
            child.wait().await?
        };

        if let Some(ref cancel_rx) = self.cancel_rx {
            if *cancel_rx.borrow() {
                info!("FFmpeg run cancelled");
                return Err(MediaError::Cancelled);
            }
        }

        Ok(status)
    }
}

/// Check that FFmpeg is available.
pub fn check_ffmpeg() -> MediaResult<PathBuf> {
    which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound)
}

/// Check that FFprobe is available.
pub fn check_ffprobe() -> MediaResult<PathBuf> {
    which::which("ffprobe").map_err(|_| MediaError::FfprobeNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_builder_orders_args() {
        let cmd = FfmpegCommand::new("input.mp4", "output.mp4")
            .seek(10.0)
            .accurate_seek(0.5)
            .duration(3.0)
            .video_codec("libx264")
            .crf(18);

        let args = cmd.build_args();
        let input_pos = args.iter().position(|a| a == "input.mp4").unwrap();
        let fast_seek_pos = args.iter().position(|a| a == "10.000").unwrap();
        let accurate_seek_pos = args.iter().position(|a| a == "0.500").unwrap();

        // Fast seek before -i, accurate seek after
        assert!(fast_seek_pos < input_pos);
        assert!(accurate_seek_pos > input_pos);
        assert!(args.contains(&"-c:v".to_string()));
        assert!(args.contains(&"18".to_string()));
        assert_eq!(args.last().unwrap(), "output.mp4");
    }

    #[test]
    fn test_codec_copy_and_concat_format() {
        let cmd = FfmpegCommand::new("list.txt", "joined.mp4")
            .input_format("concat")
            .input_arg("-safe")
            .input_arg("0")
            .codec_copy()
            .faststart();

        let args = cmd.build_args();
        let concat_pos = args.iter().position(|a| a == "concat").unwrap();
        let input_pos = args.iter().position(|a| a == "list.txt").unwrap();
        assert!(concat_pos < input_pos);
        assert!(args.windows(2).any(|w| w[0] == "-c" && w[1] == "copy"));
        assert!(args.contains(&"+faststart".to_string()));
    }
}
