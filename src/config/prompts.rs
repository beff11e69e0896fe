//! Prompt templates for Lese.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    /// Prompts for per-group lecture segment summaries.
    pub segment: SegmentPrompts,
    /// Prompts for the document relation summary.
    pub relation: RelationPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: std::collections::HashMap<String, String>,
}

/// Prompts for summarizing a group of lecture transcript segments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentPrompts {
    pub system: String,
    pub user: String,
}

impl Default for SegmentPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are a study assistant helping college students work through lecture material. You explain how a retrieved part of a lecture relates to a student's question, without revealing the answer itself. The excerpt is never unrelated to the question: when it does not address the question directly, connect the concepts it covers to the question instead."#.to_string(),

            user: r#"A student asked: {{query}}

Lecture excerpt:
{{snippet}}

Write two sentences explaining how this part of the lecture helps the student understand their question. Do not reveal specific answers or key details; guide the student toward why this section is worth studying."#.to_string(),
        }
    }
}

/// Prompts for explaining how document chunks relate to a query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationPrompts {
    pub system: String,
    pub user: String,
}

impl Default for RelationPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are a study assistant helping college students with their research. You explain how retrieved document excerpts relate to a student's question. Do not answer the question directly; guide the student toward understanding how the excerpts are relevant to it."#.to_string(),

            user: r#"Student's question: {{query}}

{{snippets}}

Provide a concise explanation (about 3-4 sentences) of how these excerpts relate to the question. Focus on the relevance of the information and how it might help answer the question, without giving away the answer."#.to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from defaults, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&std::collections::HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let segment_path = custom_path.join("segment.toml");
            if segment_path.exists() {
                let content = std::fs::read_to_string(&segment_path)?;
                prompts.segment = toml::from_str(&content)?;
            }

            let relation_path = custom_path.join("relation.toml");
            if relation_path.exists() {
                let content = std::fs::read_to_string(&relation_path)?;
                prompts.relation = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &std::collections::HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(
        &self,
        template: &str,
        vars: &std::collections::HashMap<String, String>,
    ) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(!prompts.segment.system.is_empty());
        assert!(prompts.segment.user.contains("{{query}}"));
        assert!(prompts.relation.user.contains("{{snippets}}"));
    }

    #[test]
    fn test_render_template() {
        let template = "Question: {{query}} ({{count}} excerpts)";
        let mut vars = std::collections::HashMap::new();
        vars.insert("query".to_string(), "what is backprop".to_string());
        vars.insert("count".to_string(), "5".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Question: what is backprop (5 excerpts)");
    }

    #[test]
    fn test_custom_variables_yield_to_call_site() {
        let mut prompts = Prompts::default();
        prompts
            .variables
            .insert("query".to_string(), "from config".to_string());

        let mut vars = std::collections::HashMap::new();
        vars.insert("query".to_string(), "from call".to_string());

        let result = prompts.render_with_custom("{{query}}", &vars);
        assert_eq!(result, "from call");
    }
}
