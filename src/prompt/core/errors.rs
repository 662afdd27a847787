//! Error types for prompt construction.

use thiserror::Error;

use crate::prompt::core::kinds::{TemplateKind, TemplateVariable};

/// Prompt subsystem error type.
#[derive(Debug, Error)]
pub enum PromptError {
    /// Template references a name that is not a known variable.
    #[error("template {template}: unknown placeholder {{{name}}}")]
    UnknownPlaceholder {
        /// Template being parsed.
        template: TemplateKind,
        /// Raw placeholder name.
        name: String,
    },
    /// Template references a known variable it does not declare.
    #[error("template {template}: placeholder {{{variable}}} is not an input of this template")]
    UnexpectedPlaceholder {
        /// Template being parsed.
        template: TemplateKind,
        /// Offending variable.
        variable: TemplateVariable,
    },
    /// Lone `{` or `}` in template source.
    #[error("template {template}: unbalanced brace at byte {offset}")]
    UnbalancedBrace {
        /// Template being parsed.
        template: TemplateKind,
        /// Byte offset of the brace.
        offset: usize,
    },
    /// No value was bound for a placeholder at render time.
    #[error("template {template}: no value bound for {{{variable}}}")]
    MissingVariable {
        /// Template being rendered.
        template: TemplateKind,
        /// Unbound variable.
        variable: TemplateVariable,
    },
    /// Invalid configuration or unsupported values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Placeholder pattern failed to compile.
    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),
    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience result alias for prompt operations.
pub type PromptResult<T> = Result<T, PromptError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_show_braces() {
        let err = PromptError::MissingVariable {
            template: TemplateKind::Login,
            variable: TemplateVariable::LatestChat,
        };
        assert_eq!(
            err.to_string(),
            "template login: no value bound for {latest_chat}"
        );

        let err = PromptError::UnknownPlaceholder {
            template: TemplateKind::Summary,
            name: "transcript".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "template summary: unknown placeholder {transcript}"
        );
    }
}
