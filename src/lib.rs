pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::http::OpenAiGenerator;
pub use adapters::storage::{LoadOutcome, PersistenceAdapter, WriteMode};
pub use app::MenuShell;
pub use crate::core::archive::{ArchiveListing, ItineraryArchive};
pub use crate::core::itinerary::ItineraryRequest;
pub use crate::core::store::{DestinationStore, StorePolicy};
pub use domain::model::{ArtifactFormat, DestinationRecord, ItineraryArtifact};
pub use domain::ports::{ConfigProvider, ItineraryGenerator};
pub use utils::error::{PlannerError, Result};
