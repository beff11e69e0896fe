//! Document retrieval flow.

use crate::config::Settings;
use crate::corpus::text::clean_text;
use crate::corpus::DocumentChunk;
use crate::embedding::Embedder;
use crate::error::Result;
use crate::retrieval::rank_top_k;
use crate::storage::BlobStore;
use crate::summary::Summarizer;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use url::Url;

/// Answer for a document query.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentAnswer {
    /// The query as received.
    pub query: String,
    /// Model-generated explanation of how the top excerpts relate to the query.
    pub relation_summary: String,
    /// Ranked document excerpts.
    pub results: Vec<DocumentMatch>,
    /// Time-limited link to the source document.
    pub pdf_url: Url,
}

/// One ranked document excerpt.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentMatch {
    /// Cleaned chunk text.
    pub text: String,
    /// Page the chunk was extracted from.
    pub page_number: u32,
    /// Chunk position on the page, passed through from the corpus.
    pub coordinates: serde_json::Value,
    /// Cosine similarity to the query.
    pub similarity: f32,
}

/// Engine for document chunk queries.
pub struct DocumentEngine {
    store: BlobStore,
    embedder: Arc<dyn Embedder>,
    summarizer: Summarizer,
    settings: Settings,
}

impl DocumentEngine {
    /// Create a document engine over the given store, embedder and summarizer.
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

    /// Answer a document query.
    ///
    /// Ranks the chunk corpus against the query, cleans the matched text,
    /// generates one relation summary over the leading excerpts, and signs a
    /// link to the source document.
    #[instrument(skip(self), fields(query = %query))]
    pub async fn answer(&self, query: &str) -> Result<DocumentAnswer> {
        info!("Processing document query");

        let keys = &self.settings.storage.objects;
        let retrieval = &self.settings.retrieval;

        let chunks: Vec<DocumentChunk> = self.store.get_json(&keys.document_corpus).await?;
        debug!("Loaded document corpus with {} chunks", chunks.len());

        let query_embedding = self.embedder.embed(query).await?;
        let ranked = rank_top_k(&chunks, &query_embedding, retrieval.document_top_k, |c| {
            c.embeddings.as_slice()
        });

        let results: Vec<DocumentMatch> = ranked
            .into_iter()
            .map(|r| DocumentMatch {
                text: clean_text(&r.item.chunk),
                page_number: r.item.page,
                coordinates: r.item.coordinates,
                similarity: r.score,
            })
            .collect();

        let snippets: Vec<String> = results
            .iter()
            .take(retrieval.relation_snippets)
            .map(|m| m.text.clone())
            .collect();
        let relation_summary = self.summarizer.relation_summary(query, &snippets).await;

        let pdf_url = self
            .store
            .signed_url(&keys.document_media, self.settings.signed_url_ttl())
            .await?;

        info!("Document answer contains {} excerpts", results.len());

        Ok(DocumentAnswer {
            query: query.to_string(),
            relation_summary,
            results,
            pdf_url,
        })
    }
}
