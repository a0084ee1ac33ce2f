//! Scene-to-footage mapping.

use reel_models::{Scene, SceneVideoMapping, VideoSegmentRange};
use tracing::debug;

use crate::error::{ComposeError, ComposeResult};

/// Map scenes onto source footage with the passthrough policy: each
/// scene samples the source at the same offset as its position on the
/// output timeline, so burned-in overlay timing lines up with footage
/// timing 1:1.
///
/// No clamping against source duration happens here; an out-of-range
/// slice surfaces later as that scene's render failure rather than being
/// silently truncated, which would desynchronize overlays from footage.
/// Output order always equals input order.
pub fn map_scenes(scenes: &[Scene]) -> ComposeResult<Vec<SceneVideoMapping>> {
    if scenes.is_empty() {
        return Err(ComposeError::invalid_template(
            "template must declare at least one scene",
        ));
    }

    let mappings = scenes
        .iter()
        .map(|scene| SceneVideoMapping::new(scene.clone(), scene.output_start))
        .collect();

    debug!(scenes = scenes.len(), "Mapped scenes (passthrough)");
    Ok(mappings)
}

/// Map scenes onto user-selected footage anchors.
///
/// Normalized segment `i` anchors scene `i`: the scene samples its own
/// output duration of footage starting at the segment's start (scenes
/// sample 1:1 and never stretch, so the segment picks *where*, the scene
/// picks *how long*). Scenes without a matching segment fall back to the
/// passthrough policy.
pub fn map_scenes_with_segments(
    scenes: &[Scene],
    segments: &[VideoSegmentRange],
) -> ComposeResult<Vec<SceneVideoMapping>> {
    if scenes.is_empty() {
        return Err(ComposeError::invalid_template(
            "template must declare at least one scene",
        ));
    }

    let mappings = scenes
        .iter()
        .enumerate()
        .map(|(index, scene)| match segments.get(index) {
            Some(segment) => {
                let video_start = segment.source_start;
                SceneVideoMapping::new(scene.clone(), video_start)
                    .with_video_end(video_start + scene.duration())
            }
            None => SceneVideoMapping::new(scene.clone(), scene.output_start),
        })
        .collect();

    debug!(
        scenes = scenes.len(),
        segments = segments.len(),
        "Mapped scenes onto segment anchors"
    );
    Ok(mappings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(start: f64, end: f64) -> Scene {
        Scene::footage(start, end).unwrap()
    }

    #[test]
    fn test_empty_scene_list_is_invalid_template() {
        assert!(matches!(
            map_scenes(&[]),
            Err(ComposeError::InvalidTemplate(_))
        ));
    }

    #[test]
    fn test_two_scene_passthrough() {
        // Scenes [0,3) and [3,3.5) against a 10s source
        let mappings = map_scenes(&[scene(0.0, 3.0), scene(3.0, 3.5)]).unwrap();

        assert_eq!(mappings.len(), 2);
        assert!((mappings[0].video_start - 0.0).abs() < 1e-9);
        assert!((mappings[0].resolved_video_end() - 3.0).abs() < 1e-9);
        assert!((mappings[1].video_start - 3.0).abs() < 1e-9);
        assert!((mappings[1].resolved_video_end() - 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_length_order_and_duration_preserved() {
        let scenes: Vec<Scene> = [(0.0, 1.2), (1.2, 2.0), (2.0, 4.5), (4.5, 6.0)]
            .iter()
            .map(|&(s, e)| scene(s, e))
            .collect();

        let mappings = map_scenes(&scenes).unwrap();

        assert_eq!(mappings.len(), scenes.len());
        for (scene, mapping) in scenes.iter().zip(&mappings) {
            assert_eq!(mapping.output_start, scene.output_start);
            assert!(
                (mapping.resolved_video_end() - mapping.video_start - scene.duration()).abs()
                    < 1e-9
            );
        }
    }

    #[test]
    fn test_segment_anchors_override_video_start() {
        let scenes = [scene(0.0, 2.0), scene(2.0, 3.0)];
        let segments = [VideoSegmentRange::new(5.0, 9.0)];

        let mappings = map_scenes_with_segments(&scenes, &segments).unwrap();

        // First scene anchored at 5.0, sampling its own 2s duration
        assert!((mappings[0].video_start - 5.0).abs() < 1e-9);
        assert!((mappings[0].resolved_video_end() - 7.0).abs() < 1e-9);
        // Second scene has no anchor: passthrough
        assert!((mappings[1].video_start - 2.0).abs() < 1e-9);
        assert!((mappings[1].resolved_video_end() - 3.0).abs() < 1e-9);
    }
}
