use crate::utils::error::{PlannerError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(PlannerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(PlannerError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(PlannerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(PlannerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(PlannerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PlannerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(PlannerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// NaN and infinities fail every range comparison, so reject them up front.
pub fn validate_finite(field_name: &str, value: f32) -> Result<()> {
    if !value.is_finite() {
        return Err(PlannerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("assistant.endpoint", "https://api.openai.com/v1").is_ok());
        assert!(validate_url("assistant.endpoint", "http://localhost:8080").is_ok());
        assert!(validate_url("assistant.endpoint", "").is_err());
        assert!(validate_url("assistant.endpoint", "invalid-url").is_err());
        assert!(validate_url("assistant.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("storage.data_file", "destinations.json").is_ok());
        assert!(validate_path("storage.data_file", "").is_err());
        assert!(validate_path("storage.data_file", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("assistant.temperature", 0.7, 0.0, 2.0).is_ok());
        assert!(validate_range("assistant.temperature", 2.5, 0.0, 2.0).is_err());
        assert!(validate_non_empty_string("assistant.model", "  ").is_err());
    }

    #[test]
    fn test_validate_finite() {
        assert!(validate_finite("assistant.temperature", 0.7).is_ok());
        assert!(validate_finite("assistant.temperature", f32::NAN).is_err());
        assert!(validate_finite("assistant.temperature", f32::INFINITY).is_err());
    }
}
