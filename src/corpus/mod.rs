//! Pre-embedded corpus records.
//!
//! Corpora are produced by an offline ingestion pipeline and stored as JSON
//! blobs; this module only defines their shapes and the timestamp handling
//! the lecture flow needs.

pub mod text;

use crate::error::{LeseError, Result};
use serde::{Deserialize, Serialize};

/// A timestamped span within the source lecture, as `HH:MM:SS(.fff)` strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start_time: String,
    pub end_time: String,
}

impl TimeRange {
    /// Start of the span in seconds.
    pub fn start_seconds(&self) -> Result<f64> {
        timestamp_to_seconds(&self.start_time)
    }

    /// End of the span in seconds.
    pub fn end_seconds(&self) -> Result<f64> {
        timestamp_to_seconds(&self.end_time)
    }
}

/// Parse a `HH:MM:SS(.fff)` timestamp into seconds.
pub fn timestamp_to_seconds(timestamp: &str) -> Result<f64> {
    let parts: Vec<&str> = timestamp.split(':').collect();
    if parts.len() != 3 {
        return Err(LeseError::Corpus(format!(
            "Invalid timestamp (expected HH:MM:SS): {}",
            timestamp
        )));
    }

    let mut values = [0.0f64; 3];
    for (slot, part) in values.iter_mut().zip(&parts) {
        *slot = part.trim().parse().map_err(|_| {
            LeseError::Corpus(format!("Invalid timestamp component in: {}", timestamp))
        })?;
    }

    Ok(values[0] * 3600.0 + values[1] * 60.0 + values[2])
}

/// One timestamped transcript segment of the lecture corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Transcript text of this segment.
    pub transcript: String,
    /// Span of the segment within the lecture.
    pub time_stamp: TimeRange,
    /// Embedding vector produced by the offline pipeline.
    pub embeddings: Vec<f32>,
}

/// One chunk of the document corpus, with positional metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChunk {
    /// Raw chunk text as extracted from the document.
    pub chunk: String,
    /// Page the chunk was extracted from.
    pub page: u32,
    /// Position of the chunk on the page. Passed through to clients untouched.
    pub coordinates: serde_json::Value,
    /// Embedding vector produced by the offline pipeline.
    pub embeddings: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_to_seconds() {
        assert_eq!(timestamp_to_seconds("00:00:05").unwrap(), 5.0);
        assert_eq!(timestamp_to_seconds("00:02:05").unwrap(), 125.0);
        assert_eq!(timestamp_to_seconds("01:02:03").unwrap(), 3723.0);
        assert_eq!(timestamp_to_seconds("00:00:05.5").unwrap(), 5.5);
    }

    #[test]
    fn test_timestamp_rejects_malformed_input() {
        assert!(timestamp_to_seconds("05").is_err());
        assert!(timestamp_to_seconds("1:02").is_err());
        assert!(timestamp_to_seconds("aa:bb:cc").is_err());
        assert!(timestamp_to_seconds("").is_err());
    }

    #[test]
    fn test_time_range_seconds() {
        let range = TimeRange {
            start_time: "00:01:00".to_string(),
            end_time: "00:01:30".to_string(),
        };
        assert_eq!(range.start_seconds().unwrap(), 60.0);
        assert_eq!(range.end_seconds().unwrap(), 90.0);
    }

    #[test]
    fn test_transcript_segment_from_corpus_json() {
        let raw = r#"{
            "transcript": "Today we cover gradient descent.",
            "time_stamp": {"start_time": "00:10:00", "end_time": "00:10:45"},
            "embeddings": [0.1, 0.2, 0.3]
        }"#;
        let segment: TranscriptSegment = serde_json::from_str(raw).unwrap();
        assert_eq!(segment.embeddings.len(), 3);
        assert_eq!(segment.time_stamp.start_seconds().unwrap(), 600.0);
    }

    #[test]
    fn test_document_chunk_from_corpus_json() {
        let raw = r#"{
            "chunk": "Supervised learning maps inputs to outputs.",
            "page": 3,
            "coordinates": [72.0, 120.5, 540.0, 160.0],
            "embeddings": [0.5, 0.5]
        }"#;
        let chunk: DocumentChunk = serde_json::from_str(raw).unwrap();
        assert_eq!(chunk.page, 3);
        assert!(chunk.coordinates.is_array());
    }
}
