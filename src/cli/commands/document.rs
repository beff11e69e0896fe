//! Document query command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::{Prompts, Settings};
use crate::embedding::{Embedder, OpenAIEmbedder};
use crate::engine::DocumentEngine;
use crate::storage::BlobStore;
use crate::summary::Summarizer;
use anyhow::Result;
use std::sync::Arc;

/// Run a one-shot document query.
pub async fn run_document(query: &str, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Query) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let store = BlobStore::from_settings(&settings.storage).await?;
    let prompts = Prompts::load(
        settings.prompts.custom_dir.as_deref(),
        Some(&settings.prompts.variables),
    )?;
    let embedder: Arc<dyn Embedder> = Arc::new(OpenAIEmbedder::from_settings(
        &settings.embedding,
        &settings.generation,
    ));
    let engine = DocumentEngine::new(
        store,
        embedder,
        Summarizer::new(settings.generation.clone(), prompts),
        settings,
    );

    let spinner = Output::spinner("Searching document corpus...");

    match engine.answer(query).await {
        Ok(answer) => {
            spinner.finish_and_clear();

            println!("\n{}\n", answer.relation_summary);

            if answer.results.is_empty() {
                Output::warning("No relevant document excerpts found.");
            } else {
                Output::header("Matching excerpts");
                for result in &answer.results {
                    Output::document_match(result.page_number, result.similarity, &result.text);
                }
            }

            println!();
            Output::kv("Document", answer.pdf_url.as_str());
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Document query failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
