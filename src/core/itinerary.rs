use crate::domain::ports::ItineraryGenerator;
use crate::utils::error::{PlannerError, Result};

pub const SYSTEM_PROMPT: &str = "You are a professional travel planner.";
const DEFAULT_INTERESTS: &str = "general attractions";

/// A generation request whose inputs have already been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItineraryRequest {
    destination: String,
    days: u32,
    interests: String,
}

impl ItineraryRequest {
    pub fn new(destination: &str, days: u32, interests: &str) -> Result<Self> {
        let destination = destination.trim();
        if destination.is_empty() {
            return Err(PlannerError::validation("Destination cannot be empty."));
        }
        if days == 0 {
            return Err(PlannerError::validation("Number of days must be at least 1."));
        }

        Ok(Self {
            destination: destination.to_string(),
            days,
            interests: interests.trim().to_string(),
        })
    }

    /// Builds a request from raw console text.
    pub fn parse(destination: &str, days: &str, interests: &str) -> Result<Self> {
        if destination.trim().is_empty() {
            return Err(PlannerError::validation("Destination cannot be empty."));
        }

        let days: i64 = days
            .trim()
            .parse()
            .map_err(|_| PlannerError::validation("Please enter a valid number for days."))?;
        if days <= 0 {
            return Err(PlannerError::validation("Number of days must be at least 1."));
        }
        let days = u32::try_from(days)
            .map_err(|_| PlannerError::validation("Please enter a valid number for days."))?;

        Self::new(destination, days, interests)
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn interests(&self) -> &str {
        &self.interests
    }

    pub fn prompt(&self) -> String {
        let interests = if self.interests.is_empty() {
            DEFAULT_INTERESTS
        } else {
            self.interests.as_str()
        };

        format!(
            "Create a {}-day travel itinerary for {}. \
             The traveler is interested in {}. \
             Each day should include a morning, afternoon, and evening plan. \
             Be detailed but concise.",
            self.days, self.destination, interests
        )
    }
}

/// Validates raw input and only then asks the generator for text.
pub async fn request_itinerary<G: ItineraryGenerator + ?Sized>(
    generator: &G,
    destination: &str,
    days: &str,
    interests: &str,
) -> Result<(ItineraryRequest, String)> {
    let request = ItineraryRequest::parse(destination, days, interests)?;
    tracing::info!(
        "Requesting {}-day itinerary for {}",
        request.days(),
        request.destination()
    );

    let text = generator.generate(&request).await?;
    Ok((request, text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingGenerator {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ItineraryGenerator for CountingGenerator {
        async fn generate(&self, request: &ItineraryRequest) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("Day 1 in {}", request.destination()))
        }
    }

    #[test]
    fn test_parse_valid_request() {
        let request = ItineraryRequest::parse("  Lisbon ", " 3 ", " food ").unwrap();
        assert_eq!(request.destination(), "Lisbon");
        assert_eq!(request.days(), 3);
        assert_eq!(request.interests(), "food");
    }

    #[test]
    fn test_parse_rejects_bad_days() {
        for days in ["0", "-2", "three", "", "1.5"] {
            let err = ItineraryRequest::parse("Lisbon", days, "").unwrap_err();
            assert!(
                matches!(err, PlannerError::ValidationError { .. }),
                "days={:?} should be rejected",
                days
            );
        }
    }

    #[test]
    fn test_parse_rejects_empty_destination() {
        assert!(ItineraryRequest::parse("   ", "2", "art").is_err());
        assert!(ItineraryRequest::new("", 2, "art").is_err());
    }

    #[test]
    fn test_prompt_defaults_interests() {
        let request = ItineraryRequest::new("Cairo", 2, "").unwrap();
        let prompt = request.prompt();
        assert!(prompt.starts_with("Create a 2-day travel itinerary for Cairo."));
        assert!(prompt.contains("interested in general attractions."));
        assert!(prompt.contains("morning, afternoon, and evening"));
    }

    #[tokio::test]
    async fn test_invalid_days_never_reach_generator() {
        let generator = CountingGenerator {
            calls: AtomicUsize::new(0),
        };

        assert!(request_itinerary(&generator, "Cairo", "0", "").await.is_err());
        assert!(request_itinerary(&generator, "Cairo", "abc", "").await.is_err());
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);

        let (request, text) = request_itinerary(&generator, "Cairo", "2", "").await.unwrap();
        assert_eq!(request.days(), 2);
        assert_eq!(text, "Day 1 in Cairo");
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }
}
