//! Source footage segment ranges.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A candidate interval of source footage, as selected by a user or an
/// upstream planner.
///
/// Values are raw: the end may exceed the true source duration and the
/// interval may be inverted. The compositing engine normalizes candidates
/// against the probed duration before using them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VideoSegmentRange {
    /// Seconds into the source where the segment begins.
    pub source_start: f64,
    /// Seconds into the source where the segment ends.
    pub source_end: f64,
}

impl VideoSegmentRange {
    pub fn new(source_start: f64, source_end: f64) -> Self {
        Self {
            source_start,
            source_end,
        }
    }

    pub fn duration(&self) -> f64 {
        self.source_end - self.source_start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration() {
        let range = VideoSegmentRange::new(1.5, 4.0);
        assert!((range.duration() - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_inverted_range_has_negative_duration() {
        let range = VideoSegmentRange::new(4.0, 1.0);
        assert!(range.duration() < 0.0);
    }
}
