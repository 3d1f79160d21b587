use crate::adapters::storage::PersistenceAdapter;
use crate::domain::model::{ArtifactFormat, ItineraryArtifact};
use crate::utils::error::{PlannerError, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_ITINERARY_DIR: &str = "itineraries";
const FILE_SUFFIX: &str = "_itinerary";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveListing {
    NoDirectory,
    Empty,
    Files(Vec<String>),
}

/// Saved itineraries on disk. Holds no in-memory state beyond its directory.
#[derive(Debug, Clone)]
pub struct ItineraryArchive {
    dir: PathBuf,
    persistence: PersistenceAdapter,
}

/// `"New York"` + json -> `new_york_itinerary.json`. Path separators become
/// underscores so the file always lands directly in the archive directory.
pub fn artifact_file_name(destination: &str, format: ArtifactFormat) -> String {
    let stem: String = destination
        .to_lowercase()
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            other => other,
        })
        .collect();
    format!("{}{}.{}", stem, FILE_SUFFIX, format.extension())
}

impl ItineraryArchive {
    pub fn new(dir: impl Into<PathBuf>, persistence: PersistenceAdapter) -> Self {
        Self {
            dir: dir.into(),
            persistence,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes the itinerary as plain text or as a `{destination, itinerary}`
    /// object. An unknown format is rejected before anything touches disk.
    pub fn save_artifact(&self, text: &str, destination: &str, format: &str) -> Result<PathBuf> {
        let format: ArtifactFormat = format.parse()?;
        let path = self.dir.join(artifact_file_name(destination, format));
        if path.parent() != Some(self.dir.as_path()) {
            return Err(PlannerError::validation(format!(
                "Destination '{}' does not map to a file in {}",
                destination,
                self.dir.display()
            )));
        }

        fs::create_dir_all(&self.dir)?;
        match format {
            ArtifactFormat::Txt => self.persistence.write_file(&path, text.as_bytes())?,
            ArtifactFormat::Json => {
                let artifact = ItineraryArtifact {
                    destination: destination.to_string(),
                    itinerary: text.to_string(),
                };
                self.persistence.write_json(&path, &artifact)?;
            }
        }

        tracing::info!("Itinerary for {} saved to {}", destination, path.display());
        Ok(path)
    }

    /// JSON artifacts only, sorted by file name so selections are stable.
    pub fn list_saved(&self) -> Result<ArchiveListing> {
        if !self.dir.is_dir() {
            return Ok(ArchiveListing::NoDirectory);
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if name.ends_with(".json") {
                    files.push(name.to_string());
                }
            }
        }
        files.sort();

        if files.is_empty() {
            Ok(ArchiveListing::Empty)
        } else {
            Ok(ArchiveListing::Files(files))
        }
    }

    /// `selection` is 1-based against [`list_saved`](Self::list_saved).
    pub fn load_artifact(&self, selection: usize) -> Result<ItineraryArtifact> {
        let files = match self.list_saved()? {
            ArchiveListing::Files(files) => files,
            ArchiveListing::NoDirectory | ArchiveListing::Empty => Vec::new(),
        };

        let name = selection
            .checked_sub(1)
            .and_then(|index| files.get(index))
            .ok_or_else(|| PlannerError::InvalidSelection {
                selection: selection.to_string(),
                available: files.len(),
            })?;

        let path = self.dir.join(name);
        tracing::debug!("Loading itinerary from {}", path.display());
        self.persistence
            .read_json(&path)
            .map_err(|e| PlannerError::ArtifactLoadError {
                path,
                source: Box::new(e),
            })
    }
}
