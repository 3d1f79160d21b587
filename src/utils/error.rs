use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Destination '{city}' not found")]
    DestinationNotFound { city: String },

    #[error("Destination '{city}' already exists")]
    DuplicateCity { city: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Unsupported format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Invalid selection: {selection} (available: {available})")]
    InvalidSelection { selection: String, available: usize },

    #[error("Failed to load itinerary {}: {source}", .path.display())]
    ArtifactLoadError {
        path: PathBuf,
        #[source]
        source: Box<PlannerError>,
    },

    #[error("Credential missing: {variable} is not set")]
    CredentialMissing { variable: String },

    #[error("Itinerary generation failed: {message}")]
    GenerationError { message: String },
}

pub type Result<T> = std::result::Result<T, PlannerError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NotFound,
    Validation,
    Storage,
    ExternalService,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PlannerError {
    pub fn validation(message: impl Into<String>) -> Self {
        PlannerError::ValidationError {
            message: message.into(),
        }
    }

    pub fn generation(message: impl Into<String>) -> Self {
        PlannerError::GenerationError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            PlannerError::DestinationNotFound { .. } | PlannerError::InvalidSelection { .. } => {
                ErrorCategory::NotFound
            }
            PlannerError::DuplicateCity { .. }
            | PlannerError::ValidationError { .. }
            | PlannerError::UnsupportedFormat { .. } => ErrorCategory::Validation,
            PlannerError::IoError(_)
            | PlannerError::SerializationError(_)
            | PlannerError::ArtifactLoadError { .. } => ErrorCategory::Storage,
            PlannerError::ApiError(_)
            | PlannerError::CredentialMissing { .. }
            | PlannerError::GenerationError { .. } => ErrorCategory::ExternalService,
            PlannerError::ConfigError { .. }
            | PlannerError::ConfigValidationError { .. }
            | PlannerError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::NotFound | ErrorCategory::Validation => ErrorSeverity::Low,
            ErrorCategory::ExternalService => ErrorSeverity::Medium,
            ErrorCategory::Storage => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PlannerError::DestinationNotFound { .. } => "Destination not found!".to_string(),
            PlannerError::DuplicateCity { city } => {
                format!("A destination for '{}' already exists.", city)
            }
            PlannerError::ValidationError { message } => message.clone(),
            PlannerError::UnsupportedFormat { .. } => "Unsupported format.".to_string(),
            PlannerError::InvalidSelection { .. } => "Invalid selection.".to_string(),
            PlannerError::ArtifactLoadError { source, .. } => {
                format!("Error loading file: {}", source)
            }
            PlannerError::CredentialMissing { variable } => format!(
                "OpenAI API key not found. Please set the {} environment variable.",
                variable
            ),
            PlannerError::GenerationError { message } => format!("An error occurred: {}", message),
            PlannerError::ApiError(e) => format!("An error occurred: {}", e),
            PlannerError::IoError(e) => format!("File error: {}", e),
            PlannerError::SerializationError(e) => format!("Invalid data file: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::NotFound => "Check the spelling or list entries first",
            ErrorCategory::Validation => "Correct the input and try again",
            ErrorCategory::Storage => "Check file permissions and that the file is valid JSON",
            ErrorCategory::ExternalService => {
                "Check the API key, network connection and quota, then retry"
            }
            ErrorCategory::Configuration => "Review the command line flags or TOML config file",
        }
    }
}
