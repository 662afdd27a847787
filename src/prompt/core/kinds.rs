//! Template, variable and query category identifiers.
//!
//! All three enums share one convention:
//! - a stable `snake_case` identifier via `as_str` (also used by serde),
//! - a strict `FromStr` with a dedicated parse error,
//! - an `ALL` list for iteration.
//!
//! `QueryCategory` additionally offers a lenient parser for raw model answers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the fixed prompt templates.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    /// Answer a login or account-access question.
    Login,
    /// Answer an insurance enrollment question.
    Enrollment,
    /// Check a candidate response against the query.
    Validation,
    /// Classify a query as login or enrollment.
    Category,
    /// Summarize raw conversation data.
    Summary,
}

impl TemplateKind {
    /// All template kinds, in registry order.
    pub const ALL: &'static [Self] = &[
        Self::Login,
        Self::Enrollment,
        Self::Validation,
        Self::Category,
        Self::Summary,
    ];

    /// Stable string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Enrollment => "enrollment",
            Self::Validation => "validation",
            Self::Category => "category",
            Self::Summary => "summary",
        }
    }

    /// Variables a caller binds when rendering this template.
    #[must_use]
    pub const fn input_variables(self) -> &'static [TemplateVariable] {
        match self {
            Self::Login | Self::Enrollment => &[
                TemplateVariable::Contexts,
                TemplateVariable::History,
                TemplateVariable::LatestChat,
                TemplateVariable::Query,
            ],
            Self::Validation => &[TemplateVariable::Response, TemplateVariable::Query],
            Self::Category => &[TemplateVariable::Query],
            Self::Summary => &[TemplateVariable::Data],
        }
    }

    /// Whether `var` is declared by this template.
    #[must_use]
    pub fn declares(self, var: TemplateVariable) -> bool {
        self.input_variables().contains(&var)
    }

    /// Whether the formatted prompt is emitted as a debug trace.
    #[must_use]
    pub const fn traces_prompt(self) -> bool {
        matches!(self, Self::Validation | Self::Category)
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TemplateKind {
    type Err = KindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(raw))
            .ok_or_else(|| KindParseError::new("template kind", raw))
    }
}

/// A named placeholder that can appear in a template.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateVariable {
    /// Knowledge-base excerpt (primary source).
    Contexts,
    /// Summary of prior conversation (secondary source).
    History,
    /// Most recent conversational turn (tertiary source).
    LatestChat,
    /// The user's current question.
    Query,
    /// Candidate answer under validation.
    Response,
    /// Raw conversation transcript to summarize.
    Data,
}

impl TemplateVariable {
    /// All known variables.
    pub const ALL: &'static [Self] = &[
        Self::Contexts,
        Self::History,
        Self::LatestChat,
        Self::Query,
        Self::Response,
        Self::Data,
    ];

    /// Placeholder name as written between braces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Contexts => "contexts",
            Self::History => "history",
            Self::LatestChat => "latest_chat",
            Self::Query => "query",
            Self::Response => "response",
            Self::Data => "data",
        }
    }
}

impl fmt::Display for TemplateVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TemplateVariable {
    type Err = KindParseError;

    // Placeholder names are exact: no trimming, no case folding.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|var| var.as_str() == s)
            .ok_or_else(|| KindParseError::new("template variable", s))
    }
}

/// Label the category prompt asks the model to produce.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryCategory {
    /// Login, username, password or account access.
    Login,
    /// Everything else.
    #[default]
    Enrollment,
}

impl QueryCategory {
    /// Both categories.
    pub const ALL: &'static [Self] = &[Self::Login, Self::Enrollment];

    /// Stable string representation (the literal label the model returns).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Enrollment => "enrollment",
        }
    }

    /// Template used to answer a query of this category.
    #[must_use]
    pub const fn answer_template(self) -> TemplateKind {
        match self {
            Self::Login => TemplateKind::Login,
            Self::Enrollment => TemplateKind::Enrollment,
        }
    }

    /// Interpret a raw model answer to the category prompt.
    ///
    /// Models tend to wrap the label in quotes or markdown emphasis, so those are
    /// stripped first. Anything that is not `login` falls back to `Enrollment`.
    #[must_use]
    pub fn from_model_answer(answer: &str) -> Self {
        let label = answer
            .trim_matches(|c: char| matches!(c, '"' | '\'' | '*' | '`' | '.') || c.is_whitespace());
        if label.eq_ignore_ascii_case(Self::Login.as_str()) {
            Self::Login
        } else {
            Self::Enrollment
        }
    }
}

impl fmt::Display for QueryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for QueryCategory {
    type Err = KindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|category| category.as_str().eq_ignore_ascii_case(raw))
            .ok_or_else(|| KindParseError::new("query category", raw))
    }
}

/// Error returned when parsing an identifier fails.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KindParseError {
    what: &'static str,
    value: String,
}

impl KindParseError {
    fn new(what: &'static str, value: &str) -> Self {
        Self {
            what,
            value: value.to_string(),
        }
    }

    /// The raw value that failed parsing.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for KindParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {}", self.what, self.value)
    }
}

impl std::error::Error for KindParseError {}
