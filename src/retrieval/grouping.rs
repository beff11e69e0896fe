//! Interval grouping for timestamped transcript segments.
//!
//! Retrieved segments that sit close together in the lecture are merged into
//! one group so they can be summarized as a single passage.

use super::Ranked;
use crate::corpus::{TimeRange, TranscriptSegment};
use crate::error::Result;
use std::cmp::Ordering;

/// A run of transcript segments that are adjacent in the lecture timeline.
#[derive(Debug, Clone)]
pub struct SegmentGroup {
    /// Member segments in start-time order.
    pub segments: Vec<Ranked<TranscriptSegment>>,
}

impl SegmentGroup {
    /// Transcript texts of the group joined into one passage.
    pub fn combined_transcript(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.item.transcript.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Span from the first segment's start to the last segment's end.
    pub fn time_range(&self) -> TimeRange {
        TimeRange {
            start_time: self
                .segments
                .first()
                .map(|s| s.item.time_stamp.start_time.clone())
                .unwrap_or_default(),
            end_time: self
                .segments
                .last()
                .map(|s| s.item.time_stamp.end_time.clone())
                .unwrap_or_default(),
        }
    }

    /// Similarity scores of the member segments, in group order.
    pub fn cosine_scores(&self) -> Vec<f32> {
        self.segments.iter().map(|s| s.score).collect()
    }
}

/// Group segments by timeline adjacency.
///
/// Segments are sorted by start time, then a segment joins the current group
/// when the gap between the previous segment's end and its own start is at
/// most `gap_seconds`; a larger gap starts a new group. The comparison point
/// is always the previous segment's end, not the group's maximum end.
pub fn group_by_gap(
    segments: Vec<Ranked<TranscriptSegment>>,
    gap_seconds: f64,
) -> Result<Vec<SegmentGroup>> {
    let mut timed = segments
        .into_iter()
        .map(|segment| {
            let start = segment.item.time_stamp.start_seconds()?;
            let end = segment.item.time_stamp.end_seconds()?;
            Ok((start, end, segment))
        })
        .collect::<Result<Vec<_>>>()?;

    timed.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

    let mut groups: Vec<SegmentGroup> = Vec::new();
    let mut current: Vec<Ranked<TranscriptSegment>> = Vec::new();
    let mut last_end: Option<f64> = None;

    for (start, end, segment) in timed {
        if let Some(previous_end) = last_end {
            if start - previous_end > gap_seconds {
                groups.push(SegmentGroup {
                    segments: std::mem::take(&mut current),
                });
            }
        }
        current.push(segment);
        last_end = Some(end);
    }

    if !current.is_empty() {
        groups.push(SegmentGroup { segments: current });
    }

    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(start: &str, end: &str, transcript: &str, score: f32) -> Ranked<TranscriptSegment> {
        Ranked {
            item: TranscriptSegment {
                transcript: transcript.to_string(),
                time_stamp: TimeRange {
                    start_time: start.to_string(),
                    end_time: end.to_string(),
                },
                embeddings: vec![],
            },
            score,
        }
    }

    #[test]
    fn test_merges_within_gap() {
        let segments = vec![
            segment("00:00:00", "00:00:30", "a", 0.9),
            segment("00:01:00", "00:01:30", "b", 0.8),
        ];

        // 30s gap between end and next start
        let groups = group_by_gap(segments, 60.0).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].combined_transcript(), "a b");
    }

    #[test]
    fn test_splits_over_gap() {
        let segments = vec![
            segment("00:00:00", "00:00:30", "a", 0.9),
            segment("00:02:00", "00:02:30", "b", 0.8),
        ];

        let groups = group_by_gap(segments, 60.0).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].combined_transcript(), "a");
        assert_eq!(groups[1].combined_transcript(), "b");
    }

    #[test]
    fn test_gap_exactly_at_threshold_merges() {
        let segments = vec![
            segment("00:00:00", "00:00:30", "a", 0.9),
            segment("00:01:30", "00:01:45", "b", 0.8),
        ];

        let groups = group_by_gap(segments, 60.0).unwrap();
        assert_eq!(groups.len(), 1);
    }

    #[test]
    fn test_sorts_before_grouping() {
        let segments = vec![
            segment("00:05:00", "00:05:30", "later", 0.9),
            segment("00:00:00", "00:00:30", "earlier", 0.8),
        ];

        let groups = group_by_gap(segments, 60.0).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].combined_transcript(), "earlier");
        assert_eq!(groups[1].combined_transcript(), "later");
    }

    #[test]
    fn test_gap_measured_from_previous_segment_end() {
        // The second segment ends later than the first starts after it;
        // the third is compared against the second's end, not the group max.
        let segments = vec![
            segment("00:00:00", "00:02:00", "a", 0.9),
            segment("00:02:10", "00:02:20", "b", 0.8),
            segment("00:03:10", "00:03:20", "c", 0.7),
        ];

        let groups = group_by_gap(segments, 60.0).unwrap();
        assert_eq!(groups.len(), 1);
    }

    #[test]
    fn test_empty_input() {
        let groups = group_by_gap(Vec::new(), 60.0).unwrap();
        assert!(groups.is_empty());
    }

    #[test]
    fn test_invalid_timestamp_is_an_error() {
        let segments = vec![segment("not-a-time", "00:00:30", "a", 0.9)];
        assert!(group_by_gap(segments, 60.0).is_err());
    }

    #[test]
    fn test_group_metadata() {
        let segments = vec![
            segment("00:00:00", "00:00:30", "a", 0.9),
            segment("00:00:40", "00:01:10", "b", 0.8),
        ];

        let groups = group_by_gap(segments, 60.0).unwrap();
        let range = groups[0].time_range();
        assert_eq!(range.start_time, "00:00:00");
        assert_eq!(range.end_time, "00:01:10");
        assert_eq!(groups[0].cosine_scores(), vec![0.9, 0.8]);
    }
}
