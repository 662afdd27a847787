//! Startup helpers for the `enrollment-desk` binary.
//!
//! Reads one JSON render request from stdin and writes the prompt to stdout.
//! Logs go to stderr so the prompt can be piped straight to a model client.

use std::io::{Read, Write};
use std::process::ExitCode;

use anyhow::Context;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use crate::prompt::core::config::PromptConfig;
use crate::prompt::core::errors::PromptResult;
use crate::prompt::core::kinds::TemplateKind;
use crate::prompt::registry::TemplateRegistry;
use crate::prompt::transcript::{TranscriptTurn, format_latest_chat, format_transcript};

/// Inputs shared by the login and enrollment prompts.
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    /// Knowledge-base excerpt.
    #[serde(default)]
    pub contexts: String,
    /// History summary.
    #[serde(default)]
    pub history: String,
    /// Latest exchange; derived from `turns` when absent.
    pub latest_chat: Option<String>,
    /// Raw turns, used only to derive `latest_chat`.
    #[serde(default)]
    pub turns: Vec<TranscriptTurn>,
    /// User question.
    pub query: String,
}

impl AnswerRequest {
    fn latest_chat(&self) -> String {
        self.latest_chat
            .clone()
            .unwrap_or_else(|| format_latest_chat(&self.turns))
    }
}

/// Inputs for the validation prompt.
#[derive(Debug, Deserialize)]
pub struct ValidationRequest {
    /// Candidate answer.
    pub response: String,
    /// User question.
    pub query: String,
}

/// Inputs for the category prompt.
#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    /// User question.
    pub query: String,
}

/// Inputs for the summary prompt.
#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    /// Conversation text; derived from `turns` when absent, which yields the
    /// literal `"Empty"` if there are no turns either.
    pub data: Option<String>,
    /// Raw turns, used only to derive `data`.
    #[serde(default)]
    pub turns: Vec<TranscriptTurn>,
}

/// A render request, tagged by template name.
#[derive(Debug, Deserialize)]
#[serde(tag = "template", rename_all = "snake_case")]
pub enum RenderRequest {
    /// Login answer prompt.
    Login(AnswerRequest),
    /// Enrollment answer prompt.
    Enrollment(AnswerRequest),
    /// Response validation prompt.
    Validation(ValidationRequest),
    /// Query category prompt.
    Category(CategoryRequest),
    /// Conversation summary prompt.
    Summary(SummaryRequest),
}

impl RenderRequest {
    /// Template this request renders.
    #[must_use]
    pub const fn kind(&self) -> TemplateKind {
        match self {
            Self::Login(_) => TemplateKind::Login,
            Self::Enrollment(_) => TemplateKind::Enrollment,
            Self::Validation(_) => TemplateKind::Validation,
            Self::Category(_) => TemplateKind::Category,
            Self::Summary(_) => TemplateKind::Summary,
        }
    }

    /// Render the request against `registry`.
    ///
    /// # Errors
    /// Returns an error if the registry cannot render the template.
    pub fn render(&self, registry: &TemplateRegistry) -> PromptResult<String> {
        match self {
            Self::Login(req) => {
                registry.login_prompt(&req.contexts, &req.history, &req.latest_chat(), &req.query)
            }
            Self::Enrollment(req) => registry.enrollment_prompt(
                &req.contexts,
                &req.history,
                &req.latest_chat(),
                &req.query,
            ),
            Self::Validation(req) => registry.validation_prompt(&req.response, &req.query),
            Self::Category(req) => registry.category_prompt(&req.query),
            Self::Summary(req) => {
                let data = req
                    .data
                    .clone()
                    .unwrap_or_else(|| format_transcript(&req.turns));
                registry.summary_prompt(&data)
            }
        }
    }
}

/// Run the renderer (used by the `enrollment-desk` binary).
///
/// # Returns
/// `ExitCode::SUCCESS` when a prompt was written, `1` on failure.
#[must_use]
pub fn run() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .with_writer(std::io::stderr)
        .try_init();

    tracing::debug!("Starting enrollment-desk v{}", env!("CARGO_PKG_VERSION"));

    match execute() {
        Ok(kind) => {
            tracing::info!(template = %kind, "prompt rendered");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Render failed: {e:#}");
            ExitCode::from(1)
        }
    }
}

/// `RUST_LOG` directives when set and valid, `info` otherwise.
///
/// A fixed `info` directive is not layered on top, so `RUST_LOG=debug` still
/// surfaces the formatted prompt traces.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn execute() -> anyhow::Result<TemplateKind> {
    let config = PromptConfig::from_env().context("failed to load prompt config")?;
    let registry =
        TemplateRegistry::from_config(&config).context("failed to build template registry")?;

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read request from stdin")?;
    let request = parse_request(&input)?;

    let prompt = request.render(&registry)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(prompt.as_bytes())?;
    stdout.flush()?;

    Ok(request.kind())
}

/// Parse a JSON render request.
///
/// # Errors
/// Returns an error if the JSON is malformed or names an unknown template.
pub fn parse_request(input: &str) -> anyhow::Result<RenderRequest> {
    serde_json::from_str(input).context("invalid render request")
}
