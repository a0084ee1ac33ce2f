#![deny(unreachable_patterns)]
//! FFmpeg CLI wrapper for timeline compositing.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building with timeout and cancellation
//! - Source footage fetch over HTTP
//! - FFprobe duration/stream probing
//! - Drawtext overlay filter construction
//! - The [`Compositor`] trait: the external boundary the compositing
//!   engine drives, with [`FfmpegCompositor`] as the production impl

pub mod command;
pub mod compositor;
pub mod error;
pub mod fetch;
pub mod filters;
pub mod probe;

pub use command::{check_ffmpeg, check_ffprobe, FfmpegCommand, FfmpegRunner};
pub use compositor::{Compositor, FfmpegCompositor, SegmentRenderRequest};
pub use error::{MediaError, MediaResult};
pub use fetch::fetch_source;
pub use filters::{build_overlay_filter, escape_drawtext, substitute_variables};
pub use probe::{probe_duration, probe_footage, FootageInfo};
