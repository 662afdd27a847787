//! Prompt subsystem for the enrollment help desk.
//!
//! This module turns caller text into model prompts, organized into:
//! - `core`: Configuration, errors, and template/variable/category identifiers
//! - `template`: Named-placeholder parsing and rendering
//! - `templates`: Built-in template sources
//! - `registry`: Configured templates parsed once at startup
//! - `prompt_builder`: One builder per prompt over the built-in templates
//! - `transcript`: Conversation turns flattened into prompt inputs

pub mod core;
pub mod prompt_builder;
pub mod registry;
pub mod template;
pub mod templates;
pub mod transcript;

// Re-export commonly used types for convenience
pub use self::core::{
    KindParseError, PromptConfig, PromptError, PromptResult, QueryCategory, TemplateKind,
    TemplateVariable,
};
pub use prompt_builder::{
    build_category_prompt, build_enrollment_prompt, build_login_prompt, build_summary_prompt,
    build_validation_prompt,
};
pub use registry::TemplateRegistry;
pub use template::{PromptTemplate, PromptValues};
pub use transcript::{
    TranscriptRole, TranscriptTurn, format_latest_chat, format_transcript, is_empty_history,
};
