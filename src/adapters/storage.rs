use crate::domain::model::DestinationRecord;
use crate::utils::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_FILE: &str = "destinations.json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Truncate and rewrite the target in place. A crash mid-write can leave
    /// a partial file.
    #[default]
    Overwrite,
    /// Write a sibling `.tmp` file, then rename it over the target.
    AtomicRename,
}

#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(Vec<DestinationRecord>),
    NoFile,
}

/// Stateless file I/O for the destination list and itinerary artifacts.
#[derive(Debug, Clone, Copy, Default)]
pub struct PersistenceAdapter {
    write_mode: WriteMode,
}

impl PersistenceAdapter {
    pub fn new(write_mode: WriteMode) -> Self {
        Self { write_mode }
    }

    pub fn write_mode(&self) -> WriteMode {
        self.write_mode
    }

    pub fn save(&self, records: &[DestinationRecord], path: &Path) -> Result<()> {
        self.write_json(path, records)?;
        tracing::info!("Saved {} destinations to {}", records.len(), path.display());
        Ok(())
    }

    pub fn load(&self, path: &Path) -> Result<LoadOutcome> {
        if !path.exists() {
            tracing::info!("No destination file at {}", path.display());
            return Ok(LoadOutcome::NoFile);
        }

        let records: Vec<DestinationRecord> = self.read_json(path)?;
        tracing::info!("Loaded {} destinations from {}", records.len(), path.display());
        Ok(LoadOutcome::Loaded(records))
    }

    pub fn write_json<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> Result<()> {
        let data = serde_json::to_vec_pretty(value)?;
        self.write_file(path, &data)
    }

    pub fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let data = fs::read(path)?;
        Ok(serde_json::from_slice(&data)?)
    }

    pub fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        tracing::debug!("Writing {} bytes to {}", data.len(), path.display());
        match self.write_mode {
            WriteMode::Overwrite => fs::write(path, data)?,
            WriteMode::AtomicRename => {
                let tmp = temp_path(path);
                fs::write(&tmp, data)?;
                fs::rename(&tmp, path)?;
            }
        }
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn sample_records() -> Vec<DestinationRecord> {
        vec![
            DestinationRecord::new(
                "Rome",
                "Italy",
                "2025-05-01",
                "2025-05-07",
                "1500",
                "food tour, colosseum",
            ),
            DestinationRecord::new("Lima", "Peru", "2025-08-10", "2025-08-20", "900", "hiking"),
            DestinationRecord::new("Kyoto", "Japan", "", "", "", ""),
        ]
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_DATA_FILE);
        let adapter = PersistenceAdapter::default();
        let records = sample_records();

        adapter.save(&records, &path).unwrap();

        match adapter.load(&path).unwrap() {
            LoadOutcome::Loaded(loaded) => assert_eq!(loaded, records),
            LoadOutcome::NoFile => panic!("expected a loaded file"),
        }
    }

    #[test]
    fn test_saved_file_uses_field_names() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_DATA_FILE);
        PersistenceAdapter::default()
            .save(&sample_records()[..1], &path)
            .unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let first = &raw[0];
        assert_eq!(first["city"], "Rome");
        assert_eq!(first["start_date"], "2025-05-01");
        assert_eq!(first["budget"], "1500");
        assert_eq!(first["activities"], serde_json::json!(["food tour", "colosseum"]));
    }

    #[test]
    fn test_load_missing_file_is_informational() {
        let temp_dir = TempDir::new().unwrap();
        let outcome = PersistenceAdapter::default()
            .load(&temp_dir.path().join("missing.json"))
            .unwrap();
        assert!(matches!(outcome, LoadOutcome::NoFile));
    }

    #[test]
    fn test_load_malformed_file_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[{\"city\": ").unwrap();

        assert!(PersistenceAdapter::default().load(file.path()).is_err());
    }

    #[test]
    fn test_save_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_DATA_FILE);
        let adapter = PersistenceAdapter::default();

        adapter.save(&sample_records(), &path).unwrap();
        adapter.save(&[], &path).unwrap();

        match adapter.load(&path).unwrap() {
            LoadOutcome::Loaded(loaded) => assert!(loaded.is_empty()),
            LoadOutcome::NoFile => panic!("expected a loaded file"),
        }
    }

    #[test]
    fn test_atomic_rename_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join(DEFAULT_DATA_FILE);
        let adapter = PersistenceAdapter::new(WriteMode::AtomicRename);
        assert_eq!(adapter.write_mode(), WriteMode::AtomicRename);

        adapter.save(&sample_records(), &path).unwrap();

        assert!(path.exists());
        assert!(!temp_path(&path).exists());
        assert!(matches!(adapter.load(&path).unwrap(), LoadOutcome::Loaded(r) if r.len() == 3));
    }
}
