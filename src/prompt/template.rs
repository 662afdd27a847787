//! Named-placeholder templates.
//!
//! Syntax:
//! - `{name}` is a placeholder for a [`TemplateVariable`].
//! - `{{` and `}}` render as literal braces.
//! - A lone `{` or `}` is rejected at parse time.
//!
//! Templates are parsed once into segments. Rendering concatenates literal segments
//! with bound values verbatim; values are never re-parsed, so braces or markup in
//! caller text pass through untouched.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::prompt::core::errors::{PromptError, PromptResult};
use crate::prompt::core::kinds::{TemplateKind, TemplateVariable};

/// Escapes first so `{{name}}` stays literal.
const PLACEHOLDER_PATTERN: &str = r"\{\{|\}\}|\{([^{}]*)\}|[{}]";

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Variable(TemplateVariable),
}

/// Values bound to template variables for a single render.
#[derive(Clone, Debug, Default)]
pub struct PromptValues<'a> {
    bindings: Vec<(TemplateVariable, &'a str)>,
}

impl<'a> PromptValues<'a> {
    /// Create an empty binding set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Bind `var`, builder style.
    #[must_use]
    pub fn with(mut self, var: TemplateVariable, value: &'a str) -> Self {
        self.bind(var, value);
        self
    }

    /// Bind `var`, replacing any earlier binding.
    pub fn bind(&mut self, var: TemplateVariable, value: &'a str) {
        if let Some(slot) = self.bindings.iter_mut().find(|(bound, _)| *bound == var) {
            slot.1 = value;
        } else {
            self.bindings.push((var, value));
        }
    }

    /// Value bound to `var`, if any.
    #[must_use]
    pub fn get(&self, var: TemplateVariable) -> Option<&'a str> {
        self.bindings
            .iter()
            .find(|(bound, _)| *bound == var)
            .map(|(_, value)| *value)
    }

    /// Number of bound variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// A parsed template for one [`TemplateKind`].
#[derive(Clone, Debug)]
pub struct PromptTemplate {
    kind: TemplateKind,
    source: String,
    segments: Vec<Segment>,
}

impl PromptTemplate {
    /// Parse `source` as the template for `kind`.
    ///
    /// # Errors
    /// Returns an error on unbalanced braces, unknown placeholder names, or
    /// placeholders that `kind` does not declare.
    pub fn new(kind: TemplateKind, source: impl Into<String>) -> PromptResult<Self> {
        let source = source.into();
        let segments = parse_segments(kind, &source)?;

        let template = Self {
            kind,
            source,
            segments,
        };

        let used = template.variables();
        for var in kind.input_variables() {
            if !used.contains(var) {
                debug!(template = %kind, variable = %var, "template leaves input unused");
            }
        }

        Ok(template)
    }

    /// Template kind.
    #[must_use]
    pub const fn kind(&self) -> TemplateKind {
        self.kind
    }

    /// Raw template source.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Placeholders in order of first use.
    #[must_use]
    pub fn variables(&self) -> Vec<TemplateVariable> {
        let mut vars = Vec::new();
        for segment in &self.segments {
            if let Segment::Variable(var) = segment {
                if !vars.contains(var) {
                    vars.push(*var);
                }
            }
        }
        vars
    }

    /// Render the template with `values`.
    ///
    /// Bindings the template does not use are ignored.
    ///
    /// # Errors
    /// Returns [`PromptError::MissingVariable`] if a placeholder has no binding.
    pub fn format(&self, values: &PromptValues<'_>) -> PromptResult<String> {
        let mut out = String::with_capacity(self.estimate_len(values));
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Variable(var) => {
                    let value = values.get(*var).ok_or(PromptError::MissingVariable {
                        template: self.kind,
                        variable: *var,
                    })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }

    fn estimate_len(&self, values: &PromptValues<'_>) -> usize {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.len(),
                Segment::Variable(var) => values.get(*var).map_or(0, str::len),
            })
            .sum()
    }
}

/// Compiled placeholder pattern, shared by every template.
fn placeholder_regex() -> PromptResult<&'static Regex> {
    if let Some(pattern) = PLACEHOLDER_REGEX.get() {
        return Ok(pattern);
    }
    let pattern = Regex::new(PLACEHOLDER_PATTERN)?;
    Ok(PLACEHOLDER_REGEX.get_or_init(|| pattern))
}

fn parse_segments(kind: TemplateKind, source: &str) -> PromptResult<Vec<Segment>> {
    let pattern = placeholder_regex()?;
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut last_end = 0;

    for caps in pattern.captures_iter(source) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        literal.push_str(&source[last_end..whole.start()]);
        last_end = whole.end();

        match (whole.as_str(), caps.get(1)) {
            ("{{", _) => literal.push('{'),
            ("}}", _) => literal.push('}'),
            (_, Some(name)) => {
                let var = resolve_placeholder(kind, name.as_str())?;
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Variable(var));
            }
            _ => {
                return Err(PromptError::UnbalancedBrace {
                    template: kind,
                    offset: whole.start(),
                });
            }
        }
    }

    literal.push_str(&source[last_end..]);
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    Ok(segments)
}

fn resolve_placeholder(kind: TemplateKind, name: &str) -> PromptResult<TemplateVariable> {
    let var: TemplateVariable = name
        .parse()
        .map_err(|_| PromptError::UnknownPlaceholder {
            template: kind,
            name: name.to_string(),
        })?;
    if !kind.declares(var) {
        return Err(PromptError::UnexpectedPlaceholder {
            template: kind,
            variable: var,
        });
    }
    Ok(var)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_substitutes_values() {
        let template = PromptTemplate::new(TemplateKind::Category, "Q: {query}!").unwrap();
        let values = PromptValues::new().with(TemplateVariable::Query, "reset password");
        assert_eq!(template.format(&values).unwrap(), "Q: reset password!");
    }

    #[test]
    fn test_repeated_placeholder() {
        let template =
            PromptTemplate::new(TemplateKind::Category, "{query} / {query}").unwrap();
        let values = PromptValues::new().with(TemplateVariable::Query, "x");
        assert_eq!(template.format(&values).unwrap(), "x / x");
        assert_eq!(template.variables(), vec![TemplateVariable::Query]);
    }

    #[test]
    fn test_escaped_braces() {
        let template =
            PromptTemplate::new(TemplateKind::Category, "{{query}} is {query}").unwrap();
        let values = PromptValues::new().with(TemplateVariable::Query, "q");
        assert_eq!(template.format(&values).unwrap(), "{query} is q");
    }

    #[test]
    fn test_values_are_not_reparsed() {
        let template = PromptTemplate::new(TemplateKind::Summary, "[{data}]").unwrap();
        let values = PromptValues::new().with(TemplateVariable::Data, "{query} }} {");
        assert_eq!(template.format(&values).unwrap(), "[{query} }} {]");
    }

    #[test]
    fn test_empty_value_is_kept() {
        let template = PromptTemplate::new(TemplateKind::Summary, "a{data}b").unwrap();
        let values = PromptValues::new().with(TemplateVariable::Data, "");
        assert_eq!(template.format(&values).unwrap(), "ab");
    }

    #[test]
    fn test_unbalanced_brace() {
        let err = PromptTemplate::new(TemplateKind::Summary, "oops { {data}").unwrap_err();
        assert!(matches!(
            err,
            PromptError::UnbalancedBrace {
                template: TemplateKind::Summary,
                offset: 5
            }
        ));
        assert!(PromptTemplate::new(TemplateKind::Summary, "{data} }").is_err());
    }

    #[test]
    fn test_unknown_placeholder() {
        let err = PromptTemplate::new(TemplateKind::Summary, "{transcript}").unwrap_err();
        assert!(matches!(err, PromptError::UnknownPlaceholder { ref name, .. } if name == "transcript"));
    }

    #[test]
    fn test_undeclared_placeholder() {
        let err = PromptTemplate::new(TemplateKind::Category, "{query} {contexts}").unwrap_err();
        assert!(matches!(
            err,
            PromptError::UnexpectedPlaceholder {
                variable: TemplateVariable::Contexts,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_binding() {
        let template =
            PromptTemplate::new(TemplateKind::Validation, "{response} for {query}").unwrap();
        let values = PromptValues::new().with(TemplateVariable::Query, "q");
        assert!(matches!(
            template.format(&values),
            Err(PromptError::MissingVariable {
                variable: TemplateVariable::Response,
                ..
            })
        ));
    }

    #[test]
    fn test_unused_declared_variable_is_allowed() {
        let template = PromptTemplate::new(
            TemplateKind::Enrollment,
            "{contexts} {latest_chat} {query}",
        )
        .unwrap();
        assert!(!template.variables().contains(&TemplateVariable::History));
    }

    #[test]
    fn test_extra_bindings_ignored() {
        let template = PromptTemplate::new(TemplateKind::Category, "{query}").unwrap();
        let values = PromptValues::new()
            .with(TemplateVariable::Query, "q")
            .with(TemplateVariable::Data, "unused");
        assert_eq!(template.format(&values).unwrap(), "q");
    }

    #[test]
    fn test_rebind_replaces_value() {
        let mut values = PromptValues::new().with(TemplateVariable::Query, "first");
        values.bind(TemplateVariable::Query, "second");
        assert_eq!(values.len(), 1);
        assert_eq!(values.get(TemplateVariable::Query), Some("second"));
    }

    #[test]
    fn test_placeholder_regex_is_compiled_once() {
        let first = placeholder_regex().unwrap();
        PromptTemplate::new(TemplateKind::Category, "{query}").unwrap();
        PromptTemplate::new(TemplateKind::Summary, "{data}").unwrap();
        let second = placeholder_regex().unwrap();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_source_is_kept() {
        let template = PromptTemplate::new(TemplateKind::Category, "{{x}} {query}").unwrap();
        assert_eq!(template.source(), "{{x}} {query}");
        assert_eq!(template.kind(), TemplateKind::Category);
    }
}
