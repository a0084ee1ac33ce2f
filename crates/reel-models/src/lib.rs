//! Shared data models for the Reelforge backend.
//!
//! This crate provides Serde-serializable types for:
//! - Video templates and their timed scenes
//! - Text overlay content, position and style
//! - Scene-to-footage mappings produced by the compositing engine
//! - Source footage segment ranges
//! - Encoding configuration

pub mod encoding;
pub mod job;
pub mod mapping;
pub mod overlay;
pub mod segment;
pub mod template;

// Re-export common types
pub use encoding::EncodingConfig;
pub use job::JobId;
pub use mapping::SceneVideoMapping;
pub use overlay::{FontWeight, OverlayPosition, OverlayStyle, TextOverlay};
pub use segment::VideoSegmentRange;
pub use template::{Scene, SceneKind, Template, TemplateError};
