//! Embedding configuration
//!
//! Configuration arrives through the embedding script tag's `data-*`
//! attributes and can later be patched through the host API. A resolved
//! [`Config`] is immutable for a given render; patches are merged into a
//! fresh object that replaces it wholesale.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Built-in prompt template used when the embedding page supplies none
pub const DEFAULT_PROMPT_TEMPLATE: &str = "I have used a widget that has linked me to you from ${webpage_url}, please read this page. ${text_selection_context} Here is my question: ${question}";

/// Built-in question input placeholder
pub const DEFAULT_PLACEHOLDER: &str = "Type your question...";

/// Built-in default service id
pub const DEFAULT_SERVICE_ID: &str = "chatgpt";

/// Embedding directive attribute carrying the prompt template override
pub const ATTR_AGENT_PROMPT: &str = "data-agent-prompt";

/// Embedding directive attribute carrying the default service id
pub const ATTR_DEFAULT_AI: &str = "data-default-ai";

/// Embedding directive attribute carrying the input placeholder text
pub const ATTR_PLACEHOLDER: &str = "data-placeholder";

/// Attributes of the embedding script tag
#[derive(Debug, Clone, Default)]
pub struct EmbedDirective {
    attrs: HashMap<String, String>,
}

impl EmbedDirective {
    /// A directive with no attributes (all defaults)
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the script tag's attribute list
    pub fn from_attrs<I, K, V>(attrs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            attrs: attrs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Get a raw attribute value
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

/// Resolved widget configuration for one mount
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Prompt template interpolated on submit
    pub prompt_template: String,

    /// Service id used when no valid preference is persisted
    pub default_service: String,

    /// Question input placeholder text
    pub placeholder: String,
}

impl Config {
    /// Resolve a config from the embedding directive, falling back to the
    /// built-in defaults for absent attributes
    pub fn resolve(directive: &EmbedDirective) -> Self {
        Self {
            prompt_template: directive
                .get(ATTR_AGENT_PROMPT)
                .unwrap_or(DEFAULT_PROMPT_TEMPLATE)
                .to_string(),
            default_service: directive
                .get(ATTR_DEFAULT_AI)
                .unwrap_or(DEFAULT_SERVICE_ID)
                .to_string(),
            placeholder: directive
                .get(ATTR_PLACEHOLDER)
                .unwrap_or(DEFAULT_PLACEHOLDER)
                .to_string(),
        }
    }

    /// Merge a patch: supplied fields overwrite, absent fields are retained.
    /// Returns the replacement object.
    pub fn merged(&self, patch: &ConfigPatch) -> Self {
        Self {
            prompt_template: patch
                .prompt_template
                .clone()
                .unwrap_or_else(|| self.prompt_template.clone()),
            default_service: patch
                .default_service
                .clone()
                .unwrap_or_else(|| self.default_service.clone()),
            placeholder: patch
                .placeholder
                .clone()
                .unwrap_or_else(|| self.placeholder.clone()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::resolve(&EmbedDirective::new())
    }
}

/// Partial configuration accepted by the host `update` API
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConfigPatch {
    /// New prompt template, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_template: Option<String>,

    /// New default service id, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_service: Option<String>,

    /// New placeholder text, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let config = Config::resolve(&EmbedDirective::new());

        assert_eq!(config.prompt_template, DEFAULT_PROMPT_TEMPLATE);
        assert_eq!(config.default_service, "chatgpt");
        assert_eq!(config.placeholder, "Type your question...");
    }

    #[test]
    fn test_resolve_from_attrs() {
        let directive = EmbedDirective::from_attrs([
            (ATTR_AGENT_PROMPT, "Answer about ${webpage_url}: ${question}"),
            (ATTR_DEFAULT_AI, "claude"),
            (ATTR_PLACEHOLDER, "Ask away"),
        ]);
        let config = Config::resolve(&directive);

        assert_eq!(config.prompt_template, "Answer about ${webpage_url}: ${question}");
        assert_eq!(config.default_service, "claude");
        assert_eq!(config.placeholder, "Ask away");
    }

    #[test]
    fn test_resolve_ignores_unrelated_attrs() {
        let directive = EmbedDirective::from_attrs([("src", "https://cdn.example/v1.js")]);
        let config = Config::resolve(&directive);

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_merge_retains_unspecified_fields() {
        let base = Config::default();
        let patch = ConfigPatch {
            placeholder: Some("What would you like to know?".to_string()),
            ..Default::default()
        };

        let merged = base.merged(&patch);
        assert_eq!(merged.placeholder, "What would you like to know?");
        assert_eq!(merged.prompt_template, base.prompt_template);
        assert_eq!(merged.default_service, base.default_service);
    }

    #[test]
    fn test_patch_from_json() {
        let patch: ConfigPatch =
            serde_json::from_str(r#"{"default_service": "grok"}"#).unwrap();

        assert_eq!(patch.default_service.as_deref(), Some("grok"));
        assert!(patch.prompt_template.is_none());
        assert!(patch.placeholder.is_none());
    }
}
