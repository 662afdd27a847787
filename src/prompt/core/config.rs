//! Configuration for prompt rendering.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::prompt::core::errors::{PromptError, PromptResult};
use crate::prompt::core::kinds::TemplateKind;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_PATH_ENV: &str = "ENROLLMENT_DESK_CONFIG";

/// Message the validation prompt substitutes for an irrelevant response.
pub const DEFAULT_FALLBACK_MESSAGE: &str =
    "I don't have enough information on that, Please contact the office or provide more details.";

/// Upper bound given to the model for conversation summaries.
pub const DEFAULT_SUMMARY_MAX_CHARS: usize = 1000;

/// Literal answer the summary prompt requests for empty conversation data.
pub const DEFAULT_EMPTY_HISTORY_MARKER: &str = "History Empty";

/// Top-level prompt configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// Fallback answer for irrelevant responses.
    pub fallback_message: String,
    /// Max summary size in characters.
    pub summary_max_chars: usize,
    /// Answer requested when there is nothing to summarize.
    pub empty_history_marker: String,
    /// Replacement template sources, keyed by kind.
    pub overrides: BTreeMap<TemplateKind, String>,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            fallback_message: DEFAULT_FALLBACK_MESSAGE.to_string(),
            summary_max_chars: DEFAULT_SUMMARY_MAX_CHARS,
            empty_history_marker: DEFAULT_EMPTY_HISTORY_MARKER.to_string(),
            overrides: BTreeMap::new(),
        }
    }
}

impl PromptConfig {
    /// Validate configuration invariants.
    ///
    /// Template sources themselves are checked when the registry parses them.
    ///
    /// # Errors
    /// Returns an error if any values are out of range or invalid.
    pub fn validate(&self) -> PromptResult<()> {
        check_literal("fallback_message", &self.fallback_message)?;
        check_literal("empty_history_marker", &self.empty_history_marker)?;

        if self.summary_max_chars == 0 {
            return Err(PromptError::InvalidConfig(
                "summary_max_chars must be > 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Load and validate a config from a JSON file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed, or fails validation.
    pub fn from_json_file(path: impl AsRef<Path>) -> PromptResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        info!(
            path = %path.as_ref().display(),
            overrides = config.overrides.len(),
            "loaded prompt config"
        );
        Ok(config)
    }

    /// Load from the file named by `ENROLLMENT_DESK_CONFIG`, or defaults when unset.
    ///
    /// # Errors
    /// Returns an error if the named file cannot be loaded.
    pub fn from_env() -> PromptResult<Self> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_json_file(path.trim()),
            _ => Ok(Self::default()),
        }
    }

    /// Set the fallback message.
    #[must_use]
    pub fn with_fallback_message(mut self, message: impl Into<String>) -> Self {
        self.fallback_message = message.into();
        self
    }

    /// Set the summary character limit.
    #[must_use]
    pub const fn with_summary_max_chars(mut self, max_chars: usize) -> Self {
        self.summary_max_chars = max_chars;
        self
    }

    /// Replace the source of one template.
    #[must_use]
    pub fn with_override(mut self, kind: TemplateKind, source: impl Into<String>) -> Self {
        self.overrides.insert(kind, source.into());
        self
    }

    /// Whether a validated model answer is the fallback message.
    #[must_use]
    pub fn is_fallback_answer(&self, answer: &str) -> bool {
        strip_answer(answer) == self.fallback_message
    }
}

/// Trim whitespace, quotes and emphasis markers a model wraps around a literal answer.
pub(crate) fn strip_answer(answer: &str) -> &str {
    answer.trim_matches(|c: char| matches!(c, '"' | '*' | '`') || c.is_whitespace())
}

// Values embedded into default template text must not look like placeholders.
fn check_literal(field: &str, value: &str) -> PromptResult<()> {
    if value.trim().is_empty() {
        return Err(PromptError::InvalidConfig(format!("{field} must not be empty")));
    }
    if value.contains(['{', '}']) {
        return Err(PromptError::InvalidConfig(format!(
            "{field} must not contain braces"
        )));
    }
    Ok(())
}
