//! Lecture retrieval flow.

use crate::config::Settings;
use crate::corpus::{TimeRange, TranscriptSegment};
use crate::embedding::Embedder;
use crate::error::Result;
use crate::retrieval::{group_by_gap, rank_top_k};
use crate::storage::BlobStore;
use crate::summary::Summarizer;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument};
use url::Url;

/// Answer for a lecture query.
#[derive(Debug, Clone, Serialize)]
pub struct LectureAnswer {
    /// The query as received.
    pub query: String,
    /// Summarized segment groups in lecture order.
    pub results: Vec<GroupSummary>,
    /// Time-limited link to the source lecture video.
    pub video_url: Url,
}

/// One summarized group of adjacent transcript segments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSummary {
    /// Span covered by the group.
    pub time_stamp: TimeRange,
    /// Model-generated explanation of how the group relates to the query.
    pub summary: String,
}

/// Top-k segment persisted to the retrieved-segments blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RetrievedSegment {
    transcript: String,
    time_stamp: TimeRange,
    cosine_score: f32,
}

/// Group record persisted to the final-output blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OutputGroup {
    summary: String,
    time_stamp: TimeRange,
    transcript: String,
    cosine_scores: Vec<f32>,
}

/// Engine for lecture transcript queries.
pub struct LectureEngine {
    store: BlobStore,
    embedder: Arc<dyn Embedder>,
    summarizer: Summarizer,
    settings: Settings,
}

impl LectureEngine {
    /// Create a lecture engine over the given store, embedder and summarizer.
    pub fn new(
        store: BlobStore,
        embedder: Arc<dyn Embedder>,
        summarizer: Summarizer,
        settings: Settings,
    ) -> Self {
        Self {
            store,
            embedder,
            summarizer,
            settings,
        }
    }

    /// Answer a lecture query.
    ///
    /// Ranks the corpus against the query, persists the retrieved set, merges
    /// timeline-adjacent segments, summarizes each group, persists the final
    /// output, and signs a link to the lecture video.
    #[instrument(skip(self), fields(query = %query))]
    pub async fn answer(&self, query: &str) -> Result<LectureAnswer> {
        info!("Processing lecture query");

        let keys = &self.settings.storage.objects;
        let retrieval = &self.settings.retrieval;

        let segments: Vec<TranscriptSegment> = self.store.get_json(&keys.lecture_corpus).await?;
        debug!("Loaded lecture corpus with {} segments", segments.len());

        let query_embedding = self.embedder.embed(query).await?;
        let ranked = rank_top_k(&segments, &query_embedding, retrieval.lecture_top_k, |s| {
            s.embeddings.as_slice()
        });

        let retrieved: Vec<RetrievedSegment> = ranked
            .iter()
            .map(|r| RetrievedSegment {
                transcript: r.item.transcript.clone(),
                time_stamp: r.item.time_stamp.clone(),
                cosine_score: r.score,
            })
            .collect();
        self.store.put_json(&keys.retrieved_segments, &retrieved).await?;

        let groups = group_by_gap(ranked, retrieval.group_gap_seconds)?;
        debug!("Grouped retrieved segments into {} groups", groups.len());

        let mut output: Vec<OutputGroup> = Vec::new();
        for group in groups.into_iter().take(retrieval.max_groups) {
            let transcript = group.combined_transcript();
            let summary = self.summarizer.segment_summary(query, &transcript).await;
            output.push(OutputGroup {
                summary,
                time_stamp: group.time_range(),
                transcript,
                cosine_scores: group.cosine_scores(),
            });
        }
        self.store.put_json(&keys.final_output, &output).await?;

        let video_url = self
            .store
            .signed_url(&keys.lecture_media, self.settings.signed_url_ttl())
            .await?;

        info!("Lecture answer contains {} groups", output.len());

        Ok(LectureAnswer {
            query: query.to_string(),
            results: output
                .into_iter()
                .map(|group| GroupSummary {
                    time_stamp: group.time_stamp,
                    summary: group.summary,
                })
                .collect(),
            video_url,
        })
    }
}
