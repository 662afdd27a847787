//! Core prompt types: configuration, errors and identifiers.

pub mod config;
pub mod errors;
pub mod kinds;

pub use config::{
    CONFIG_PATH_ENV, DEFAULT_EMPTY_HISTORY_MARKER, DEFAULT_FALLBACK_MESSAGE,
    DEFAULT_SUMMARY_MAX_CHARS, PromptConfig,
};
pub use errors::{PromptError, PromptResult};
pub use kinds::{KindParseError, QueryCategory, TemplateKind, TemplateVariable};
