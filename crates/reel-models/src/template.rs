//! Video templates and their timed scenes.
//!
//! A template is an ordered list of scenes, each occupying a half-open
//! window `[output_start, output_end)` on the final output timeline.
//! Malformed scenes are rejected at construction time so the compositing
//! engine never has to re-validate timing mid-pipeline.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::overlay::TextOverlay;

/// Errors raised while constructing templates and scenes.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Scene window is empty or inverted: start={start}, end={end}")]
    EmptyWindow { start: f64, end: f64 },

    #[error("Scene window has a negative start: {0}")]
    NegativeStart(f64),

    #[error("Template has no scenes")]
    NoScenes,

    #[error("Overlay content is empty")]
    EmptyOverlay,

    #[error("Overlay position out of range: x={x}, y={y}")]
    OverlayOutOfRange { x: f64, y: f64 },
}

/// What a scene shows: plain footage, or footage with a text overlay
/// burned in. Kind-specific required fields live on the variant, so a
/// "captioned scene without a caption" cannot be represented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SceneKind {
    /// Plain footage slice, nothing burned in.
    Footage,
    /// Footage with a text overlay.
    Overlay { text: TextOverlay },
}

impl Default for SceneKind {
    fn default() -> Self {
        SceneKind::Footage
    }
}

/// One timed entry in a template.
///
/// `output_start` / `output_end` are seconds on the *final* output
/// timeline. The overlay (if any) is owned exclusively by this scene;
/// cloning a scene deep-copies it, so edits to one copy never leak into
/// another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Scene {
    /// Start of this scene on the output timeline, in seconds.
    pub output_start: f64,
    /// End of this scene on the output timeline, in seconds.
    pub output_end: f64,
    /// Footage or overlay payload.
    #[serde(default)]
    pub kind: SceneKind,
}

impl Scene {
    /// Create a plain footage scene.
    pub fn footage(output_start: f64, output_end: f64) -> Result<Self, TemplateError> {
        Self::new(output_start, output_end, SceneKind::Footage)
    }

    /// Create a scene with a text overlay.
    pub fn with_overlay(
        output_start: f64,
        output_end: f64,
        text: TextOverlay,
    ) -> Result<Self, TemplateError> {
        text.validate()?;
        Self::new(output_start, output_end, SceneKind::Overlay { text })
    }

    fn new(output_start: f64, output_end: f64, kind: SceneKind) -> Result<Self, TemplateError> {
        if output_start < 0.0 {
            return Err(TemplateError::NegativeStart(output_start));
        }
        if output_end <= output_start {
            return Err(TemplateError::EmptyWindow {
                start: output_start,
                end: output_end,
            });
        }
        Ok(Self {
            output_start,
            output_end,
            kind,
        })
    }

    /// Validate a deserialized scene against the construction invariants.
    pub fn validate(&self) -> Result<(), TemplateError> {
        if self.output_start < 0.0 {
            return Err(TemplateError::NegativeStart(self.output_start));
        }
        if self.output_end <= self.output_start {
            return Err(TemplateError::EmptyWindow {
                start: self.output_start,
                end: self.output_end,
            });
        }
        if let SceneKind::Overlay { text } = &self.kind {
            text.validate()?;
        }
        Ok(())
    }

    /// Duration of this scene on the output timeline.
    pub fn duration(&self) -> f64 {
        self.output_end - self.output_start
    }

    /// The overlay, if this scene carries one.
    pub fn overlay(&self) -> Option<&TextOverlay> {
        match &self.kind {
            SceneKind::Overlay { text } => Some(text),
            SceneKind::Footage => None,
        }
    }

    /// Clone this scene with its window rebased to a zero origin.
    ///
    /// Single-segment renders composite relative to a per-call zero, not
    /// the global output timeline, so the clone keeps the duration but
    /// starts at 0. The overlay is deep-copied along with the rest.
    pub fn rebase_to_origin(&self) -> Scene {
        Scene {
            output_start: 0.0,
            output_end: self.duration(),
            kind: self.kind.clone(),
        }
    }
}

/// An ordered collection of scenes plus an overall target duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Template {
    /// Display name, free-form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Target duration of the final output, in seconds.
    pub target_duration: f64,
    /// Ordered scene list. Order is meaningful and preserved end to end.
    pub scenes: Vec<Scene>,
}

impl Template {
    /// Build a template from an ordered scene list.
    ///
    /// The target duration is taken from the last scene's end.
    pub fn from_scenes(scenes: Vec<Scene>) -> Result<Self, TemplateError> {
        let target_duration = scenes
            .last()
            .map(|s| s.output_end)
            .ok_or(TemplateError::NoScenes)?;
        Ok(Self {
            name: None,
            target_duration,
            scenes,
        })
    }

    /// Validate every scene against the construction invariants.
    ///
    /// Deserialized payloads bypass the checked constructors, so callers
    /// accepting untrusted JSON run this before handing the template to
    /// the engine.
    pub fn validate(&self) -> Result<(), TemplateError> {
        if self.scenes.is_empty() {
            return Err(TemplateError::NoScenes);
        }
        for scene in &self.scenes {
            scene.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::TextOverlay;

    #[test]
    fn test_scene_rejects_inverted_window() {
        assert!(Scene::footage(3.0, 3.0).is_err());
        assert!(Scene::footage(5.0, 2.0).is_err());
        assert!(Scene::footage(-1.0, 2.0).is_err());
        assert!(Scene::footage(0.0, 3.0).is_ok());
    }

    #[test]
    fn test_rebase_keeps_duration() {
        let scene = Scene::footage(3.0, 3.5).unwrap();
        let rebased = scene.rebase_to_origin();
        assert_eq!(rebased.output_start, 0.0);
        assert!((rebased.output_end - 0.5).abs() < 1e-9);
        // Original is untouched
        assert_eq!(scene.output_start, 3.0);
    }

    #[test]
    fn test_rebase_deep_copies_overlay() {
        let overlay = TextOverlay::new("Hook line", 0.5, 0.2);
        let scene = Scene::with_overlay(0.0, 3.0, overlay).unwrap();
        let mut rebased = scene.rebase_to_origin();

        if let SceneKind::Overlay { text } = &mut rebased.kind {
            text.content = "edited".to_string();
        }
        assert_eq!(scene.overlay().unwrap().content, "Hook line");
    }

    #[test]
    fn test_template_requires_scenes() {
        assert!(matches!(
            Template::from_scenes(vec![]),
            Err(TemplateError::NoScenes)
        ));
    }

    #[test]
    fn test_template_payload_round_trip() {
        let json = r#"{
            "target_duration": 3.5,
            "scenes": [
                {"output_start": 0.0, "output_end": 3.0,
                 "kind": {"kind": "overlay", "text": {"content": "Watch this", "position": {"x": 0.5, "y": 0.1}}}},
                {"output_start": 3.0, "output_end": 3.5, "kind": {"kind": "footage"}}
            ]
        }"#;

        let template: Template = serde_json::from_str(json).unwrap();
        template.validate().unwrap();
        assert_eq!(template.scenes.len(), 2);
        assert!(template.scenes[0].overlay().is_some());
        assert!(template.scenes[1].overlay().is_none());
    }

    #[test]
    fn test_deserialized_invalid_scene_fails_validate() {
        let json = r#"{
            "target_duration": 1.0,
            "scenes": [{"output_start": 2.0, "output_end": 1.0}]
        }"#;
        let template: Template = serde_json::from_str(json).unwrap();
        assert!(template.validate().is_err());
    }
}
