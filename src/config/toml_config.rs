use crate::adapters::http::{DEFAULT_API_ENDPOINT, DEFAULT_MODEL};
use crate::adapters::storage::DEFAULT_DATA_FILE;
use crate::core::archive::DEFAULT_ITINERARY_DIR;
use crate::core::ConfigProvider;
use crate::utils::error::{PlannerError, Result};
use crate::utils::validation::{
    validate_finite, validate_non_empty_string, validate_path, validate_range, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub storage: StorageConfig,
    pub store: StoreConfig,
    pub assistant: AssistantConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_file: String,
    pub itinerary_dir: String,
    pub atomic_writes: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: DEFAULT_DATA_FILE.to_string(),
            itinerary_dir: DEFAULT_ITINERARY_DIR.to_string(),
            atomic_writes: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub reject_duplicate_city: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_seconds: Option<u64>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_API_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            temperature: 0.7,
            max_tokens: 1000,
            timeout_seconds: None,
        }
    }
}

impl TomlConfig {
    /// Loads and parses a TOML config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PlannerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are
    /// left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PlannerError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_path("storage.data_file", &self.storage.data_file)?;
        validate_path("storage.itinerary_dir", &self.storage.itinerary_dir)?;
        validate_url("assistant.endpoint", &self.assistant.endpoint)?;
        validate_non_empty_string("assistant.model", &self.assistant.model)?;
        validate_finite("assistant.temperature", self.assistant.temperature)?;
        validate_range("assistant.temperature", self.assistant.temperature, 0.0, 2.0)?;
        validate_range("assistant.max_tokens", self.assistant.max_tokens, 1, u32::MAX)?;
        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn data_file(&self) -> &str {
        &self.storage.data_file
    }

    fn itinerary_dir(&self) -> &str {
        &self.storage.itinerary_dir
    }

    fn api_endpoint(&self) -> &str {
        &self.assistant.endpoint
    }

    fn model(&self) -> &str {
        &self.assistant.model
    }

    // An unresolved `${VAR}` placeholder counts as no key.
    fn api_key(&self) -> Option<&str> {
        self.assistant
            .api_key
            .as_deref()
            .filter(|key| !key.starts_with("${"))
    }

    fn temperature(&self) -> f32 {
        self.assistant.temperature
    }

    fn max_tokens(&self) -> u32 {
        self.assistant.max_tokens
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.assistant.timeout_seconds
    }

    fn reject_duplicate_city(&self) -> bool {
        self.store.reject_duplicate_city
    }

    fn atomic_writes(&self) -> bool {
        self.storage.atomic_writes
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
