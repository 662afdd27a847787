//! Template registry built once from configuration.

use tracing::{debug, info};

use crate::prompt::core::config::PromptConfig;
use crate::prompt::core::errors::PromptResult;
use crate::prompt::core::kinds::TemplateKind;
use crate::prompt::prompt_builder::{
    answer_values, category_values, summary_values, trace_prompt, validation_values,
};
use crate::prompt::template::{PromptTemplate, PromptValues};
use crate::prompt::templates::default_source;

/// Immutable set of parsed templates, one per kind.
#[derive(Clone, Debug)]
pub struct TemplateRegistry {
    login: PromptTemplate,
    enrollment: PromptTemplate,
    validation: PromptTemplate,
    category: PromptTemplate,
    summary: PromptTemplate,
}

impl TemplateRegistry {
    /// Build a registry of the built-in templates.
    ///
    /// # Errors
    /// Returns an error if a built-in template fails to parse.
    pub fn with_defaults() -> PromptResult<Self> {
        Self::from_config(&PromptConfig::default())
    }

    /// Validate `config` and parse one template per kind, preferring overrides.
    ///
    /// # Errors
    /// Returns an error if the config is invalid or any template fails to parse.
    pub fn from_config(config: &PromptConfig) -> PromptResult<Self> {
        config.validate()?;

        let registry = Self {
            login: load_template(TemplateKind::Login, config)?,
            enrollment: load_template(TemplateKind::Enrollment, config)?,
            validation: load_template(TemplateKind::Validation, config)?,
            category: load_template(TemplateKind::Category, config)?,
            summary: load_template(TemplateKind::Summary, config)?,
        };

        info!(
            templates = TemplateKind::ALL.len(),
            overrides = config.overrides.len(),
            "template registry ready"
        );
        Ok(registry)
    }

    /// Template registered for `kind`.
    #[must_use]
    pub const fn get(&self, kind: TemplateKind) -> &PromptTemplate {
        match kind {
            TemplateKind::Login => &self.login,
            TemplateKind::Enrollment => &self.enrollment,
            TemplateKind::Validation => &self.validation,
            TemplateKind::Category => &self.category,
            TemplateKind::Summary => &self.summary,
        }
    }

    /// Render `kind` with arbitrary bindings.
    ///
    /// # Errors
    /// Returns an error if a placeholder of the template is unbound.
    pub fn render(&self, kind: TemplateKind, values: &PromptValues<'_>) -> PromptResult<String> {
        let prompt = self.get(kind).format(values)?;
        trace_prompt(kind, &prompt);
        Ok(prompt)
    }

    /// Render the login answer prompt.
    ///
    /// # Errors
    /// Returns an error if the login template cannot be rendered.
    pub fn login_prompt(
        &self,
        contexts: &str,
        history: &str,
        latest_chat: &str,
        query: &str,
    ) -> PromptResult<String> {
        self.render(
            TemplateKind::Login,
            &answer_values(contexts, history, latest_chat, query),
        )
    }

    /// Render the enrollment answer prompt.
    ///
    /// # Errors
    /// Returns an error if the enrollment template cannot be rendered.
    pub fn enrollment_prompt(
        &self,
        contexts: &str,
        history: &str,
        latest_chat: &str,
        query: &str,
    ) -> PromptResult<String> {
        self.render(
            TemplateKind::Enrollment,
            &answer_values(contexts, history, latest_chat, query),
        )
    }

    /// Render the response validation prompt.
    ///
    /// # Errors
    /// Returns an error if the validation template cannot be rendered.
    pub fn validation_prompt(&self, response: &str, query: &str) -> PromptResult<String> {
        self.render(TemplateKind::Validation, &validation_values(response, query))
    }

    /// Render the query category prompt.
    ///
    /// # Errors
    /// Returns an error if the category template cannot be rendered.
    pub fn category_prompt(&self, query: &str) -> PromptResult<String> {
        self.render(TemplateKind::Category, &category_values(query))
    }

    /// Render the conversation summary prompt.
    ///
    /// # Errors
    /// Returns an error if the summary template cannot be rendered.
    pub fn summary_prompt(&self, data: &str) -> PromptResult<String> {
        self.render(TemplateKind::Summary, &summary_values(data))
    }
}

fn load_template(kind: TemplateKind, config: &PromptConfig) -> PromptResult<PromptTemplate> {
    let source = config.overrides.get(&kind).map_or_else(
        || default_source(kind, config),
        |source| {
            debug!(template = %kind, "using template override");
            source.clone()
        },
    );
    PromptTemplate::new(kind, source)
}
