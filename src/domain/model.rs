use crate::utils::error::PlannerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationRecord {
    pub city: String,
    pub country: String,
    pub start_date: String,
    pub end_date: String,
    pub budget: String,
    pub activities: Vec<String>,
}

impl DestinationRecord {
    pub fn new(
        city: &str,
        country: &str,
        start_date: &str,
        end_date: &str,
        budget: &str,
        activities_text: &str,
    ) -> Self {
        Self {
            city: city.to_string(),
            country: country.to_string(),
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
            budget: budget.to_string(),
            activities: parse_activities(activities_text),
        }
    }

    /// Case-insensitive identity check used by update and remove.
    pub fn matches_city(&self, city: &str) -> bool {
        self.city.to_lowercase() == city.to_lowercase()
    }

    /// `query` must already be lower-cased.
    pub(crate) fn matches_query(&self, query: &str) -> bool {
        self.city.to_lowercase().contains(query)
            || self.country.to_lowercase().contains(query)
            || self
                .activities
                .iter()
                .any(|activity| activity.to_lowercase().contains(query))
    }
}

impl fmt::Display for DestinationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {} from {} to {} | Budget: {} | Activities: {}",
            self.city,
            self.country,
            self.start_date,
            self.end_date,
            self.budget,
            self.activities.join(", ")
        )
    }
}

/// Splits comma-separated input and trims each token. Blank input yields no
/// activities; interior empty tokens (`"a,,b"`) are kept as empty strings.
pub fn parse_activities(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    text.split(',').map(|token| token.trim().to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryArtifact {
    pub destination: String,
    pub itinerary: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    Txt,
    Json,
}

impl ArtifactFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ArtifactFormat::Txt => "txt",
            ArtifactFormat::Json => "json",
        }
    }
}

impl FromStr for ArtifactFormat {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "txt" => Ok(ArtifactFormat::Txt),
            "json" => Ok(ArtifactFormat::Json),
            other => Err(PlannerError::UnsupportedFormat {
                format: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ArtifactFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
