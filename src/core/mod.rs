pub mod archive;
pub mod itinerary;
pub mod store;

pub use crate::domain::model::{ArtifactFormat, DestinationRecord, ItineraryArtifact};
pub use crate::domain::ports::{ConfigProvider, ItineraryGenerator};
pub use crate::utils::error::Result;
