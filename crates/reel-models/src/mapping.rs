//! Scene-to-footage mapping output.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::template::Scene;

/// Correspondence between one scene's output window and the slice of
/// source footage it samples from.
///
/// Scenes sample source time 1:1, never stretching or compressing it, so
/// the resolved slice duration always equals the scene's output duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SceneVideoMapping {
    /// The originating scene.
    pub scene: Scene,
    /// Start of the scene on the output timeline, in seconds.
    pub output_start: f64,
    /// End of the scene on the output timeline, in seconds.
    pub output_end: f64,
    /// Offset into the source footage where sampling begins.
    pub video_start: f64,
    /// Explicit end of the source slice. When absent, the slice runs for
    /// the scene's output duration from `video_start`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_end: Option<f64>,
}

impl SceneVideoMapping {
    /// Map a scene onto source footage starting at `video_start`.
    ///
    /// `video_start` below zero is clamped up; the mapper never produces
    /// negative offsets.
    pub fn new(scene: Scene, video_start: f64) -> Self {
        let output_start = scene.output_start;
        let output_end = scene.output_end;
        Self {
            scene,
            output_start,
            output_end,
            video_start: video_start.max(0.0),
            video_end: None,
        }
    }

    /// Override the end of the source slice.
    pub fn with_video_end(mut self, video_end: f64) -> Self {
        self.video_end = Some(video_end);
        self
    }

    /// Duration of the scene on the output timeline.
    pub fn output_duration(&self) -> f64 {
        self.output_end - self.output_start
    }

    /// End of the source slice, computed from the output duration when no
    /// explicit override was supplied.
    pub fn resolved_video_end(&self) -> f64 {
        self.video_end
            .unwrap_or(self.video_start + self.output_duration())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_video_end_matches_output_duration() {
        let scene = Scene::footage(3.0, 3.5).unwrap();
        let mapping = SceneVideoMapping::new(scene, 3.0);
        assert!((mapping.resolved_video_end() - 3.5).abs() < 1e-9);
        assert!(
            (mapping.resolved_video_end() - mapping.video_start - mapping.output_duration()).abs()
                < 1e-9
        );
    }

    #[test]
    fn test_explicit_video_end_override() {
        let scene = Scene::footage(0.0, 2.0).unwrap();
        let mapping = SceneVideoMapping::new(scene, 10.0).with_video_end(12.0);
        assert!((mapping.resolved_video_end() - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_video_start_clamped() {
        let scene = Scene::footage(0.0, 1.0).unwrap();
        let mapping = SceneVideoMapping::new(scene, -0.5);
        assert_eq!(mapping.video_start, 0.0);
    }
}
