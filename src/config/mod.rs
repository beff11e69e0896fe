//! Configuration module for Lese.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{Prompts, RelationPrompts, SegmentPrompts};
pub use settings::{
    EmbeddingSettings, GeneralSettings, GenerationSettings, ObjectKeys, PromptSettings,
    RetrievalSettings, Settings, StorageBackend, StorageSettings,
};
