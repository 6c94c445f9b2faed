use super::types::{Segment, WordRange};

/// Word being spoken at `current_time_ms`, or `None` when no word should be highlighted.
///
/// The first segment whose `[start_ms, end_ms)` interval contains the time wins.
/// Playback past the end of the last segment keeps the last word highlighted,
/// while playback before the first segment yields `None`.
pub fn current_word_index(segments: &[Segment], current_time_ms: f64) -> Option<u32> {
    if let Some(segment) = segments.iter().find(|s| s.contains(current_time_ms)) {
        return Some(segment.word_start);
    }

    // Trailing silence after the last word still highlights that word
    let last = segments.last()?;
    if current_time_ms >= last.start_ms as f64 {
        return Some(last.word_start);
    }

    None
}

/// Word range being spoken at `current_time_ms`.
///
/// Strict interval match: unlike [`current_word_index`] there is no clamp to
/// the last segment once playback runs past the end.
pub fn current_word_range(segments: &[Segment], current_time_ms: f64) -> Option<WordRange> {
    segments
        .iter()
        .find(|s| s.contains(current_time_ms))
        .map(Segment::words)
}

/// Checks the ordering invariant of a verse's segments.
///
/// Returns a description of the first violation found.
pub(crate) fn find_ordering_violation(segments: &[Segment]) -> Option<String> {
    for (i, segment) in segments.iter().enumerate() {
        if segment.start_ms >= segment.end_ms {
            return Some(format!(
                "segment {} has empty interval [{}, {})",
                i, segment.start_ms, segment.end_ms
            ));
        }
        if segment.word_start > segment.word_end {
            return Some(format!(
                "segment {} has inverted word range {}..={}",
                i, segment.word_start, segment.word_end
            ));
        }
        if i > 0 && segments[i - 1].end_ms > segment.start_ms {
            return Some(format!(
                "segment {} starts at {} before previous end {}",
                i,
                segment.start_ms,
                segments[i - 1].end_ms
            ));
        }
    }
    None
}
