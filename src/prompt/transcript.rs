//! Conversation turns and their text form for the summary and answer prompts.

use serde::{Deserialize, Serialize};

use crate::prompt::core::config::{PromptConfig, strip_answer};

/// Literal callers pass as `data` when there is no conversation yet.
pub const EMPTY_TRANSCRIPT: &str = "Empty";

/// Who produced a turn.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscriptRole {
    /// End user.
    User,
    /// Chatbot reply.
    Assistant,
}

impl TranscriptRole {
    /// Label written in front of each line.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Assistant => "Assistant",
        }
    }
}

/// A single conversational turn.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TranscriptTurn {
    /// Speaker.
    pub role: TranscriptRole,
    /// Turn text.
    pub content: String,
}

impl TranscriptTurn {
    /// User turn.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TranscriptRole::User,
            content: content.into(),
        }
    }

    /// Assistant turn.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: TranscriptRole::Assistant,
            content: content.into(),
        }
    }
}

/// Flatten turns into summary `data`, or [`EMPTY_TRANSCRIPT`] when there are none.
#[must_use]
pub fn format_transcript(turns: &[TranscriptTurn]) -> String {
    if turns.is_empty() {
        return EMPTY_TRANSCRIPT.to_string();
    }
    render_turns(turns)
}

/// Turns from the last user turn onward; empty when the user has not spoken.
#[must_use]
pub fn format_latest_chat(turns: &[TranscriptTurn]) -> String {
    turns
        .iter()
        .rposition(|turn| turn.role == TranscriptRole::User)
        .map(|start| render_turns(&turns[start..]))
        .unwrap_or_default()
}

/// Whether a model's summary answer is the empty-history marker.
#[must_use]
pub fn is_empty_history(answer: &str, config: &PromptConfig) -> bool {
    strip_answer(answer) == config.empty_history_marker
}

fn render_turns(turns: &[TranscriptTurn]) -> String {
    let mut out = String::new();
    for turn in turns {
        out.push_str(turn.role.label());
        out.push_str(": ");
        out.push_str(&turn.content);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_transcript() {
        let turns = vec![
            TranscriptTurn::user("Hello"),
            TranscriptTurn::assistant("Hi there!"),
        ];
        assert_eq!(format_transcript(&turns), "User: Hello\nAssistant: Hi there!\n");
    }

    #[test]
    fn test_format_transcript_empty() {
        assert_eq!(format_transcript(&[]), "Empty");
    }

    #[test]
    fn test_latest_chat_starts_at_last_user_turn() {
        let turns = vec![
            TranscriptTurn::user("What plans exist?"),
            TranscriptTurn::assistant("Gold and Silver."),
            TranscriptTurn::user("Which covers dental?"),
            TranscriptTurn::assistant("Gold."),
        ];
        assert_eq!(
            format_latest_chat(&turns),
            "User: Which covers dental?\nAssistant: Gold.\n"
        );
    }

    #[test]
    fn test_latest_chat_without_user_turn() {
        assert_eq!(format_latest_chat(&[]), "");
        assert_eq!(
            format_latest_chat(&[TranscriptTurn::assistant("Welcome!")]),
            ""
        );
    }

    #[test]
    fn test_is_empty_history() {
        let config = PromptConfig::default();
        assert!(is_empty_history("History Empty", &config));
        assert!(is_empty_history(" \"History Empty\"\n", &config));
        assert!(!is_empty_history("The user asked about dental plans.", &config));
    }

    #[test]
    fn test_turn_serde() {
        let turn: TranscriptTurn =
            serde_json::from_str(r#"{"role":"assistant","content":"ok"}"#).unwrap();
        assert_eq!(turn, TranscriptTurn::assistant("ok"));
    }
}
