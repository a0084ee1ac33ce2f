//! Normalization of user-selected footage segment ranges.

use reel_models::VideoSegmentRange;
use tracing::debug;

use crate::error::{ComposeError, ComposeResult};

/// Minimum usable segment length in seconds. Anything at or under this
/// would yield a single-frame or empty clip downstream.
pub const MIN_SEGMENT_SECS: f64 = 0.05;

const RANGE_EPSILON: f64 = 1e-9;

/// Clamp and validate candidate ranges against the true source duration.
///
/// Kept ranges satisfy `0 <= start`, `start + MIN_SEGMENT_SECS <= end`
/// and `end <= source_duration`; everything else is dropped, never
/// silently expanded. Input order is preserved. An empty result is an
/// error: the pipeline never synthesizes placeholder footage.
pub fn normalize_segments(
    candidates: &[VideoSegmentRange],
    source_duration: f64,
) -> ComposeResult<Vec<VideoSegmentRange>> {
    let kept: Vec<VideoSegmentRange> = candidates
        .iter()
        .filter_map(|range| normalize_range(range, source_duration))
        .collect();

    debug!(
        candidates = candidates.len(),
        kept = kept.len(),
        source_duration = source_duration,
        "Normalized segment ranges"
    );

    if kept.is_empty() {
        return Err(ComposeError::NoValidSegments);
    }
    Ok(kept)
}

fn normalize_range(range: &VideoSegmentRange, source_duration: f64) -> Option<VideoSegmentRange> {
    if source_duration <= 0.0 {
        return None;
    }

    let mut safe_start = range.source_start.max(0.0).min(source_duration);
    let safe_end = range.source_end.min(source_duration);

    // A candidate that straddles the source tail gets pinned to the tail
    // with the minimum floor preserved. A candidate entirely past the end,
    // inverted, or under the floor on its own is degenerate and dropped.
    if safe_end - safe_start < MIN_SEGMENT_SECS
        && range.source_end > source_duration
        && range.source_start < source_duration
    {
        safe_start = (safe_end - MIN_SEGMENT_SECS).max(0.0);
    }

    let duration = safe_end - safe_start;
    if duration + RANGE_EPSILON < MIN_SEGMENT_SECS || duration <= 0.0 {
        return None;
    }

    Some(VideoSegmentRange::new(safe_start, safe_end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: f64, end: f64) -> VideoSegmentRange {
        VideoSegmentRange::new(start, end)
    }

    #[test]
    fn test_in_range_candidate_kept_verbatim() {
        let kept = normalize_segments(&[range(1.0, 4.0)], 10.0).unwrap();
        assert_eq!(kept.len(), 1);
        assert!((kept[0].source_start - 1.0).abs() < 1e-9);
        assert!((kept[0].source_end - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_tail_straddling_candidate_pinned_to_floor() {
        // {9.98, 10.5} against a 10s source: the end clamps to 10 and the
        // start pulls back to keep the floor.
        let kept = normalize_segments(&[range(9.98, 10.5)], 10.0).unwrap();
        assert!((kept[0].source_start - 9.95).abs() < 1e-9);
        assert!((kept[0].source_end - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_start_clamped_to_zero() {
        let kept = normalize_segments(&[range(-2.0, 3.0)], 10.0).unwrap();
        assert_eq!(kept[0].source_start, 0.0);
        assert!((kept[0].source_end - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_candidates_dropped_not_expanded() {
        // Inverted, sub-floor, and fully-out-of-range candidates all drop
        let err = normalize_segments(
            &[range(4.0, 1.0), range(0.0, 0.03), range(11.0, 12.0)],
            10.0,
        )
        .unwrap_err();
        assert!(matches!(err, ComposeError::NoValidSegments));
    }

    #[test]
    fn test_kept_ranges_satisfy_invariants() {
        let candidates = [
            range(-1.0, 0.02),
            range(0.5, 2.0),
            range(9.99, 12.0),
            range(5.0, 5.0),
            range(3.0, 20.0),
        ];
        let kept = normalize_segments(&candidates, 10.0).unwrap();

        for r in &kept {
            assert!(r.source_start >= 0.0);
            assert!(r.source_end <= 10.0);
            assert!(r.duration() + 1e-9 >= MIN_SEGMENT_SECS);
        }
        // Dropped: {-1, 0.02} (sub-floor) and {5, 5} (empty)
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn test_order_preserved() {
        let kept = normalize_segments(&[range(6.0, 8.0), range(1.0, 2.0)], 10.0).unwrap();
        assert!(kept[0].source_start > kept[1].source_start);
    }

    #[test]
    fn test_zero_duration_source_yields_no_segments() {
        let err = normalize_segments(&[range(0.0, 1.0)], 0.0).unwrap_err();
        assert!(matches!(err, ComposeError::NoValidSegments));
    }
}
