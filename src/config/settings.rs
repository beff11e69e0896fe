//! Configuration settings for Lese.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub embedding: EmbeddingSettings,
    pub generation: GenerationSettings,
    pub retrieval: RetrievalSettings,
    pub storage: StorageSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level used when no `-v` flag is given (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

/// Embedding generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Embedding provider (openai).
    pub provider: String,
    /// Embedding model to use.
    pub model: String,
    /// Embedding dimensions. Must match the dimensionality of the corpus vectors.
    pub dimensions: u32,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "text-embedding-3-small".to_string(),
            dimensions: 768,
        }
    }
}

/// Generative model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Chat model used for summaries.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Token cap for per-group segment summaries.
    pub segment_max_tokens: u32,
    /// Token cap for the document relation summary.
    pub relation_max_tokens: u32,
    /// Timeout for a single model call, in seconds.
    pub request_timeout_seconds: u64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            segment_max_tokens: 150,
            relation_max_tokens: 250,
            request_timeout_seconds: 300,
        }
    }
}

/// Retrieval and grouping settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalSettings {
    /// Number of transcript segments kept after ranking.
    pub lecture_top_k: usize,
    /// Number of document chunks kept after ranking.
    pub document_top_k: usize,
    /// Maximum gap between a segment's end and the next segment's start
    /// for the two to share a group, in seconds.
    pub group_gap_seconds: f64,
    /// Number of groups summarized and returned for the lecture flow.
    pub max_groups: usize,
    /// Number of leading chunks fed to the relation summary for the document flow.
    pub relation_snippets: usize,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            lecture_top_k: 14,
            document_top_k: 20,
            group_gap_seconds: 60.0,
            max_groups: 7,
            relation_snippets: 5,
        }
    }
}

/// Storage backend selector.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Local filesystem under `data_dir` (default).
    #[default]
    Local,
    /// In-memory store, for tests.
    Memory,
    /// Amazon S3, configured from the standard AWS environment variables.
    S3,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::Local => write!(f, "local"),
            StorageBackend::Memory => write!(f, "memory"),
            StorageBackend::S3 => write!(f, "s3"),
        }
    }
}

/// Object storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Storage backend (local, memory, s3).
    pub backend: StorageBackend,
    /// Base directory for the local backend.
    pub data_dir: String,
    /// Bucket name, required for the s3 backend.
    pub bucket: Option<String>,
    /// Lifetime of signed media URLs, in minutes.
    pub signed_url_ttl_minutes: u64,
    /// Fixed object keys read and written by the engines.
    pub objects: ObjectKeys,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Local,
            data_dir: "~/.lese/objects".to_string(),
            bucket: None,
            signed_url_ttl_minutes: 15,
            objects: ObjectKeys::default(),
        }
    }
}

/// Fixed-name blobs used by the request cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectKeys {
    /// Pre-embedded lecture transcript corpus.
    pub lecture_corpus: String,
    /// Top-k segments persisted after ranking.
    pub retrieved_segments: String,
    /// Grouped and summarized lecture output.
    pub final_output: String,
    /// Source lecture media served via signed URL.
    pub lecture_media: String,
    /// Pre-embedded document chunk corpus.
    pub document_corpus: String,
    /// Source document served via signed URL.
    pub document_media: String,
}

impl Default for ObjectKeys {
    fn default() -> Self {
        Self {
            lecture_corpus: "transcription_embeddings.json".to_string(),
            retrieved_segments: "retrieved_segments.json".to_string(),
            final_output: "final_output.json".to_string(),
            lecture_media: "lecture.mp4".to_string(),
            document_corpus: "document_embeddings.json".to_string(),
            document_media: "document.pdf".to_string(),
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lese")
            .join("config.toml")
    }

    /// Signed URL lifetime as a duration.
    pub fn signed_url_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.storage.signed_url_ttl_minutes * 60)
    }
}
