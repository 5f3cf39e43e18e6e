use crate::adapters::memory::{MemoryField, MemoryForm};
use crate::core::engine::{MaskEngine, ResolveMode};
use crate::domain::model::{MaskKind, TriggerBinding};
use crate::domain::ports::FieldResolver;
use crate::utils::error::{MaskError, Result};
use crate::utils::validation::{
    validate_event_name, validate_non_empty_string, validate_unique, Validate,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_EVENT: &str = "input";

static ENV_VAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaskConfig {
    pub form: Option<FormInfo>,
    pub logging: Option<LoggingConfig>,
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormInfo {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    pub selector: String,
    pub kind: MaskKind,
    pub event: Option<String>,
    /// Leave the mask inert instead of failing when the selector matches nothing.
    pub tolerant: Option<bool>,
    pub initial_value: Option<String>,
}

impl FieldConfig {
    pub fn event(&self) -> &str {
        self.event.as_deref().unwrap_or(DEFAULT_EVENT)
    }

    pub fn resolve_mode(&self) -> ResolveMode {
        if self.tolerant.unwrap_or(false) {
            ResolveMode::Tolerant
        } else {
            ResolveMode::Strict
        }
    }
}

impl MaskConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MaskError::Io)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| MaskError::ConfigValidation {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Expands `${VAR}` from the environment; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        for (index, field) in self.fields.iter().enumerate() {
            validate_non_empty_string(&format!("fields[{}].selector", index), &field.selector)?;
            validate_event_name(&format!("fields[{}].event", index), field.event())?;
        }

        validate_unique(
            "fields.selector",
            self.fields.iter().map(|f| f.selector.trim()),
        )
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    /// Builds an in-memory form with one field per configured selector.
    pub fn build_form(&self) -> MemoryForm {
        let mut form = MemoryForm::new();
        for field in &self.fields {
            let value = field.initial_value.as_deref().unwrap_or("");
            form.add_field(MemoryField::for_selector(&field.selector, value));
        }
        form
    }

    /// Attaches every configured mask to the fields `resolver` knows about.
    pub fn bind_all<R: FieldResolver + ?Sized>(&self, resolver: &R) -> Result<Vec<TriggerBinding>> {
        self.fields
            .iter()
            .map(|field| {
                MaskEngine::create(resolver, &field.selector, field.resolve_mode())?
                    .with_kind(field.kind)
                    .add_event(field.event())
            })
            .collect()
    }
}

impl Validate for MaskConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
