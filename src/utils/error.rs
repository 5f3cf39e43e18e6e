use thiserror::Error;

#[derive(Error, Debug)]
pub enum MaskError {
    #[error("No field matches selector '{selector}'")]
    TargetNotFound { selector: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown mask kind: {name}")]
    UnknownMaskKind { name: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Binding,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code for a CLI run that failed at this severity.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl MaskError {
    pub fn configuration(message: impl Into<String>) -> Self {
        MaskError::Configuration {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            MaskError::TargetNotFound { .. } | MaskError::Configuration { .. } => {
                ErrorCategory::Binding
            }
            MaskError::ConfigValidation { .. }
            | MaskError::InvalidConfigValue { .. }
            | MaskError::UnknownMaskKind { .. } => ErrorCategory::Configuration,
            MaskError::Io(_) | MaskError::Serialization(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // a missing field only disables its mask
            MaskError::TargetNotFound { .. } => ErrorSeverity::Medium,
            MaskError::Configuration { .. }
            | MaskError::ConfigValidation { .. }
            | MaskError::InvalidConfigValue { .. }
            | MaskError::UnknownMaskKind { .. } => ErrorSeverity::High,
            MaskError::Io(_) | MaskError::Serialization(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            MaskError::TargetNotFound { selector } => format!(
                "Check that a field matching '{}' exists, or enable tolerant mode for it",
                selector
            ),
            MaskError::Configuration { .. } => {
                "Select a mask kind and give a non-empty event name before binding".to_string()
            }
            MaskError::ConfigValidation { field, .. }
            | MaskError::InvalidConfigValue { field, .. } => {
                format!("Fix the '{}' setting", field)
            }
            MaskError::UnknownMaskKind { .. } => {
                "Use one of: cpf, cnpj, cpfcnpj, cep, tel, databr".to_string()
            }
            MaskError::Io(_) => "Check the file path and its permissions".to_string(),
            MaskError::Serialization(_) => "Report this output failure".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Binding => format!("Could not attach mask: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, MaskError>;
