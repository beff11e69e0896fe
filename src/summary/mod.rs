//! Generative summaries over retrieved material.
//!
//! A model failure never fails the request: summaries degrade to a fixed
//! placeholder string and the error is logged.

use crate::config::{GenerationSettings, Prompts};
use crate::error::{LeseError, Result};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Placeholder returned when a segment summary cannot be generated.
pub const SEGMENT_SUMMARY_FALLBACK: &str = "Summary unavailable due to a model error.";

/// Placeholder returned when the relation summary cannot be generated.
pub const RELATION_SUMMARY_FALLBACK: &str =
    "Unable to generate a relation summary due to a model error.";

/// Summary generator backed by a hosted chat model.
pub struct Summarizer {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    settings: GenerationSettings,
    prompts: Prompts,
}

impl Summarizer {
    /// Create a summarizer from generation settings and prompt templates.
    pub fn new(settings: GenerationSettings, prompts: Prompts) -> Self {
        Self {
            client: create_client(Duration::from_secs(settings.request_timeout_seconds)),
            settings,
            prompts,
        }
    }

    /// Summarize how one lecture passage relates to the query.
    ///
    /// Falls back to [`SEGMENT_SUMMARY_FALLBACK`] when the model call fails.
    #[instrument(skip(self, snippet), fields(query = %query))]
    pub async fn segment_summary(&self, query: &str, snippet: &str) -> String {
        let mut vars = HashMap::new();
        vars.insert("query".to_string(), query.to_string());
        vars.insert("snippet".to_string(), snippet.to_string());

        let user_prompt = self
            .prompts
            .render_with_custom(&self.prompts.segment.user, &vars);

        match self
            .complete(
                &self.prompts.segment.system,
                &user_prompt,
                self.settings.segment_max_tokens,
            )
            .await
        {
            Ok(summary) => summary,
            Err(e) => {
                error!("Segment summary failed: {}", e);
                SEGMENT_SUMMARY_FALLBACK.to_string()
            }
        }
    }

    /// Summarize how a set of document excerpts relates to the query.
    ///
    /// Falls back to [`RELATION_SUMMARY_FALLBACK`] when the model call fails.
    #[instrument(skip(self, snippets), fields(query = %query, count = snippets.len()))]
    pub async fn relation_summary(&self, query: &str, snippets: &[String]) -> String {
        let mut vars = HashMap::new();
        vars.insert("query".to_string(), query.to_string());
        vars.insert("snippets".to_string(), format_snippets(snippets));

        let user_prompt = self
            .prompts
            .render_with_custom(&self.prompts.relation.user, &vars);

        match self
            .complete(
                &self.prompts.relation.system,
                &user_prompt,
                self.settings.relation_max_tokens,
            )
            .await
        {
            Ok(summary) => summary,
            Err(e) => {
                error!("Relation summary failed: {}", e);
                RELATION_SUMMARY_FALLBACK.to_string()
            }
        }
    }

    /// Run one chat completion and return the trimmed response text.
    async fn complete(&self, system: &str, user: &str, max_tokens: u32) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system.to_string())
                .build()
                .map_err(|e| LeseError::Generation(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user.to_string())
                .build()
                .map_err(|e| LeseError::Generation(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.settings.model)
            .messages(messages)
            .temperature(self.settings.temperature)
            .max_completion_tokens(max_tokens)
            .build()
            .map_err(|e| LeseError::Generation(e.to_string()))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            LeseError::OpenAI(format!("Failed to generate summary: {}", e))
        })?;

        let answer = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| LeseError::Generation("Empty response from model".to_string()))?
            .trim()
            .to_string();

        debug!("Generated summary with {} characters", answer.len());
        Ok(answer)
    }
}

/// Number the snippets for the relation prompt.
fn format_snippets(snippets: &[String]) -> String {
    snippets
        .iter()
        .enumerate()
        .map(|(i, snippet)| format!("Excerpt {}: {}", i + 1, snippet))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_snippets() {
        let snippets = vec!["first".to_string(), "second".to_string()];
        let formatted = format_snippets(&snippets);
        assert_eq!(formatted, "Excerpt 1: first\n\nExcerpt 2: second");
    }

    #[test]
    fn test_format_snippets_empty() {
        assert_eq!(format_snippets(&[]), "");
    }
}
