//! Lese - Retrieval-Augmented Study Assistant
//!
//! A backend for answering study questions from pre-embedded lecture and
//! document corpora.
//!
//! The name "Lese" comes from the Norwegian word for "read."
//!
//! # Overview
//!
//! Lese allows you to:
//! - Retrieve the lecture transcript segments most relevant to a question,
//!   merged into timeline groups with a tutoring summary per group
//! - Retrieve the document excerpts most relevant to a question, with a
//!   relation summary explaining how they connect to it
//! - Serve both flows over HTTP, with signed links to the source media
//! - Render a static mind-map image from a JSON graph description
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management and prompt templates
//! - `corpus` - Pre-embedded corpus record types
//! - `embedding` - Query embedding generation
//! - `retrieval` - Cosine ranking and interval grouping
//! - `storage` - Blob storage and signed URL issuance
//! - `summary` - Generative summaries with fallbacks
//! - `engine` - The lecture and document request pipelines
//! - `mindmap` - Mind-map layout and SVG rendering
//!
//! # Example
//!
//! ```rust,no_run
//! use lese::config::{Prompts, Settings};
//! use lese::embedding::OpenAIEmbedder;
//! use lese::engine::LectureEngine;
//! use lese::storage::BlobStore;
//! use lese::summary::Summarizer;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let store = BlobStore::from_settings(&settings.storage).await?;
//!     let embedder = Arc::new(OpenAIEmbedder::from_settings(
//!         &settings.embedding,
//!         &settings.generation,
//!     ));
//!     let summarizer = Summarizer::new(settings.generation.clone(), Prompts::default());
//!
//!     let engine = LectureEngine::new(store, embedder, summarizer, settings);
//!     let answer = engine.answer("what is gradient descent?").await?;
//!     println!("{} groups", answer.results.len());
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod corpus;
pub mod embedding;
pub mod engine;
pub mod error;
pub mod mindmap;
pub mod openai;
pub mod retrieval;
pub mod storage;
pub mod summary;

pub use error::{LeseError, Result};
