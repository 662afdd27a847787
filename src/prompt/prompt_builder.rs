//! Prompt builders over the built-in templates.
//!
//! Each builder parses its template fresh and returns the rendered text. Inputs are
//! inserted verbatim; nothing is trimmed or escaped. Use
//! [`TemplateRegistry`](crate::prompt::registry::TemplateRegistry) to render
//! configured templates without re-parsing.

use tracing::debug;

use crate::prompt::core::config::PromptConfig;
use crate::prompt::core::errors::PromptResult;
use crate::prompt::core::kinds::{TemplateKind, TemplateVariable};
use crate::prompt::template::{PromptTemplate, PromptValues};
use crate::prompt::templates::default_source;

/// Build the login answer prompt.
///
/// Sources are ranked: `contexts` first, then `history`, then `latest_chat`.
///
/// # Errors
/// Returns an error only if the built-in template is malformed.
pub fn build_login_prompt(
    contexts: &str,
    history: &str,
    latest_chat: &str,
    query: &str,
) -> PromptResult<String> {
    render_default(
        TemplateKind::Login,
        &answer_values(contexts, history, latest_chat, query),
    )
}

/// Build the enrollment answer prompt.
///
/// # Errors
/// Returns an error only if the built-in template is malformed.
pub fn build_enrollment_prompt(
    contexts: &str,
    history: &str,
    latest_chat: &str,
    query: &str,
) -> PromptResult<String> {
    render_default(
        TemplateKind::Enrollment,
        &answer_values(contexts, history, latest_chat, query),
    )
}

/// Build the prompt that checks `response` against `query`.
///
/// The model decides between `response` and the fallback message; this only
/// writes the instructions.
///
/// # Errors
/// Returns an error only if the built-in template is malformed.
pub fn build_validation_prompt(response: &str, query: &str) -> PromptResult<String> {
    render_default(TemplateKind::Validation, &validation_values(response, query))
}

/// Build the login/enrollment classification prompt.
///
/// # Errors
/// Returns an error only if the built-in template is malformed.
pub fn build_category_prompt(query: &str) -> PromptResult<String> {
    render_default(TemplateKind::Category, &category_values(query))
}

/// Build the conversation summary prompt.
///
/// Empty `data` is not special-cased here; the prompt tells the model what to
/// answer in that case.
///
/// # Errors
/// Returns an error only if the built-in template is malformed.
pub fn build_summary_prompt(data: &str) -> PromptResult<String> {
    render_default(TemplateKind::Summary, &summary_values(data))
}

fn render_default(kind: TemplateKind, values: &PromptValues<'_>) -> PromptResult<String> {
    let template = PromptTemplate::new(kind, default_source(kind, &PromptConfig::default()))?;
    let prompt = template.format(values)?;
    trace_prompt(kind, &prompt);
    Ok(prompt)
}

pub(crate) fn trace_prompt(kind: TemplateKind, prompt: &str) {
    if kind.traces_prompt() {
        debug!(template = %kind, "formatted prompt: {prompt}");
    }
}

pub(crate) fn answer_values<'a>(
    contexts: &'a str,
    history: &'a str,
    latest_chat: &'a str,
    query: &'a str,
) -> PromptValues<'a> {
    PromptValues::new()
        .with(TemplateVariable::Contexts, contexts)
        .with(TemplateVariable::History, history)
        .with(TemplateVariable::LatestChat, latest_chat)
        .with(TemplateVariable::Query, query)
}

pub(crate) fn validation_values<'a>(response: &'a str, query: &'a str) -> PromptValues<'a> {
    PromptValues::new()
        .with(TemplateVariable::Response, response)
        .with(TemplateVariable::Query, query)
}

pub(crate) fn category_values(query: &str) -> PromptValues<'_> {
    PromptValues::new().with(TemplateVariable::Query, query)
}

pub(crate) fn summary_values(data: &str) -> PromptValues<'_> {
    PromptValues::new().with(TemplateVariable::Data, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::core::config::{DEFAULT_EMPTY_HISTORY_MARKER, DEFAULT_FALLBACK_MESSAGE};

    #[test]
    fn test_login_prompt_contains_inputs() {
        let prompt = build_login_prompt("CTX", "HIST", "CHAT", "Q").unwrap();
        assert!(prompt.contains("\nCTX\n"));
        assert!(prompt.contains("\nHIST\n"));
        assert!(prompt.contains("\nCHAT\n"));
        assert!(prompt.ends_with("\nQ\n"));
        assert!(prompt.contains("expert in login systems"));
        assert!(!prompt.contains("{contexts}"));
    }

    #[test]
    fn test_login_prompt_ranks_sources() {
        let prompt = build_login_prompt("CTX", "HIST", "CHAT", "Q").unwrap();
        assert!(prompt.contains("Primary Source"));
        assert!(prompt.contains("Do not use **History Summary** or **Latest Chat** if **Context** provides a complete answer."));
        let ctx = prompt.find("CTX").unwrap();
        let hist = prompt.find("HIST").unwrap();
        let chat = prompt.find("CHAT").unwrap();
        assert!(ctx < hist && hist < chat);
    }

    #[test]
    fn test_enrollment_prompt_layout() {
        let prompt =
            build_enrollment_prompt("plans A and B", "asked about dental", "hi", "When is open enrollment?")
                .unwrap();
        let background = prompt.find("plans A and B").unwrap();
        let latest = prompt.find("\nhi\n").unwrap();
        let history = prompt.find("asked about dental").unwrap();
        let query = prompt.find("When is open enrollment?").unwrap();
        assert!(background < latest && latest < history && history < query);
        assert!(prompt.contains("**Do NOT** reference the source text"));
        assert!(prompt.contains("**honestly state** that the answer is unclear"));
    }

    #[test]
    fn test_inputs_are_verbatim() {
        let contexts = "  padded\n\t<b>markup</b> {braces} \"quotes\"  ";
        let prompt = build_enrollment_prompt(contexts, "", "", "q").unwrap();
        assert!(prompt.contains(contexts));
    }

    #[test]
    fn test_empty_inputs() {
        let prompt = build_login_prompt("", "", "", "").unwrap();
        assert!(prompt.contains("**Context (Knowledge Base - Primary Source):**\n\n"));
    }

    #[test]
    fn test_validation_prompt_contains_fallback_and_response() {
        let prompt =
            build_validation_prompt("irrelevant answer", "What is the login URL?").unwrap();
        assert!(prompt.contains(DEFAULT_FALLBACK_MESSAGE));
        assert!(prompt.contains("irrelevant answer"));
        assert!(prompt.contains("What is the login URL?"));
        let question = prompt.find("What is the login URL?").unwrap();
        let response = prompt.find("irrelevant answer").unwrap();
        assert!(question < response);
    }

    #[test]
    fn test_category_prompt_labels() {
        for query in ["I forgot my password", "How do I enroll my child?"] {
            let prompt = build_category_prompt(query).unwrap();
            assert!(prompt.contains(query));
            assert!(prompt.contains(
                "If the query is related to login, username, password, or account access, return **\"login\"**."
            ));
            assert!(prompt.contains("For all other queries, return **\"enrollment\"**."));
            assert!(prompt.contains("Don't generate any additional explanations."));
        }
    }

    #[test]
    fn test_summary_prompt_for_empty_data() {
        let prompt = build_summary_prompt("").unwrap();
        assert!(prompt.contains(&format!(
            "If **Conversation Data** is **Empty** return \"{DEFAULT_EMPTY_HISTORY_MARKER}\"."
        )));
        assert!(prompt.contains("Limit the summary to 1000 characters"));
        assert!(prompt.ends_with("**Conversation Data:**\n\n"));
    }

    #[test]
    fn test_summary_prompt_passes_empty_marker_through() {
        let prompt = build_summary_prompt("Empty").unwrap();
        assert!(prompt.ends_with("**Conversation Data:**\nEmpty\n"));
    }

    #[test]
    fn test_builders_are_idempotent() {
        assert_eq!(
            build_login_prompt("a", "b", "c", "d").unwrap(),
            build_login_prompt("a", "b", "c", "d").unwrap()
        );
        assert_eq!(
            build_enrollment_prompt("a", "b", "c", "d").unwrap(),
            build_enrollment_prompt("a", "b", "c", "d").unwrap()
        );
        assert_eq!(
            build_validation_prompt("r", "q").unwrap(),
            build_validation_prompt("r", "q").unwrap()
        );
        assert_eq!(
            build_category_prompt("q").unwrap(),
            build_category_prompt("q").unwrap()
        );
        assert_eq!(
            build_summary_prompt("d").unwrap(),
            build_summary_prompt("d").unwrap()
        );
    }
}
