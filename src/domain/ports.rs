use crate::core::itinerary::ItineraryRequest;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Produces itinerary text for a validated request.
#[async_trait]
pub trait ItineraryGenerator: Send + Sync {
    async fn generate(&self, request: &ItineraryRequest) -> Result<String>;
}

pub trait ConfigProvider: Send + Sync {
    fn data_file(&self) -> &str;
    fn itinerary_dir(&self) -> &str;
    fn api_endpoint(&self) -> &str;
    fn model(&self) -> &str;
    fn api_key(&self) -> Option<&str>;
    fn temperature(&self) -> f32;
    fn max_tokens(&self) -> u32;
    fn timeout_seconds(&self) -> Option<u64>;
    fn reject_duplicate_city(&self) -> bool;
    fn atomic_writes(&self) -> bool;
}
