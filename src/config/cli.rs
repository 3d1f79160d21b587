use crate::adapters::http::{DEFAULT_API_ENDPOINT, DEFAULT_MODEL};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_finite, validate_non_empty_string, validate_path, validate_range, validate_url, Validate,
};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "trip-planner")]
#[command(about = "Record trip destinations and generate AI travel itineraries")]
pub struct CliConfig {
    /// File the destination list is loaded from and saved to
    #[arg(long, default_value = "destinations.json")]
    pub data_file: String,

    /// Directory saved itineraries are written to
    #[arg(long, default_value = "itineraries")]
    pub itinerary_dir: String,

    /// Base URL of an OpenAI-compatible API
    #[arg(long, default_value = DEFAULT_API_ENDPOINT)]
    pub api_endpoint: String,

    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, default_value = "0.7")]
    pub temperature: f32,

    #[arg(long, default_value = "1000")]
    pub max_tokens: u32,

    /// Abort the itinerary request after this many seconds
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Refuse to add a city that is already stored
    #[arg(long)]
    pub reject_duplicate_city: bool,

    /// Write files to a temp file and rename them into place
    #[arg(long)]
    pub atomic_writes: bool,

    /// Load settings from a TOML file instead of flags
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn data_file(&self) -> &str {
        &self.data_file
    }

    fn itinerary_dir(&self) -> &str {
        &self.itinerary_dir
    }

    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn temperature(&self) -> f32 {
        self.temperature
    }

    fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }

    fn reject_duplicate_city(&self) -> bool {
        self.reject_duplicate_city
    }

    fn atomic_writes(&self) -> bool {
        self.atomic_writes
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("data_file", &self.data_file)?;
        validate_path("itinerary_dir", &self.itinerary_dir)?;
        validate_url("api_endpoint", &self.api_endpoint)?;
        validate_non_empty_string("model", &self.model)?;
        validate_finite("temperature", self.temperature)?;
        validate_range("temperature", self.temperature, 0.0, 2.0)?;
        validate_range("max_tokens", self.max_tokens, 1, u32::MAX)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::PlannerError;

    #[test]
    fn test_defaults() {
        let config = CliConfig::parse_from(["trip-planner"]);

        assert_eq!(config.data_file(), "destinations.json");
        assert_eq!(config.itinerary_dir(), "itineraries");
        assert_eq!(config.api_endpoint(), DEFAULT_API_ENDPOINT);
        assert_eq!(config.model(), "gpt-4");
        assert_eq!(config.max_tokens(), 1000);
        assert!(!config.reject_duplicate_city());
        assert!(!config.atomic_writes());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = CliConfig::parse_from([
            "trip-planner",
            "--data-file",
            "trips.json",
            "--api-key",
            "sk-test",
            "--reject-duplicate-city",
            "--timeout-seconds",
            "30",
        ]);

        assert_eq!(config.data_file(), "trips.json");
        assert_eq!(config.api_key(), Some("sk-test"));
        assert!(config.reject_duplicate_city());
        assert_eq!(config.timeout_seconds(), Some(30));
    }

    #[test]
    fn test_invalid_endpoint_fails_validation() {
        let config = CliConfig::parse_from(["trip-planner", "--api-endpoint", "not a url"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nan_temperature_fails_validation() {
        let config = CliConfig::parse_from(["trip-planner", "--temperature", "NaN"]);
        assert!(config.temperature().is_nan());
        assert!(matches!(
            config.validate(),
            Err(PlannerError::InvalidConfigValueError { .. })
        ));
    }
}
