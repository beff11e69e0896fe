//! Lecture query command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::{Prompts, Settings};
use crate::embedding::{Embedder, OpenAIEmbedder};
use crate::engine::LectureEngine;
use crate::storage::BlobStore;
use crate::summary::Summarizer;
use anyhow::Result;
use std::sync::Arc;

/// Run a one-shot lecture query.
pub async fn run_lecture(query: &str, settings: Settings) -> Result<()> {
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
    let engine = LectureEngine::new(
        store,
        embedder,
        Summarizer::new(settings.generation.clone(), prompts),
        settings,
    );

    let spinner = Output::spinner("Searching lecture corpus...");

    match engine.answer(query).await {
        Ok(answer) => {
            spinner.finish_and_clear();

            if answer.results.is_empty() {
                Output::warning("No relevant lecture segments found.");
            } else {
                Output::header("Relevant lecture segments");
                for group in &answer.results {
                    Output::group_summary(
                        &group.time_stamp.start_time,
                        &group.time_stamp.end_time,
                        &group.summary,
                    );
                }
            }

            println!();
            Output::kv("Video", answer.video_url.as_str());
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Lecture query failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
