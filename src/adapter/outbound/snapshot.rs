//! JSON file holding the last fetched spot price.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::SpotPrice;
use crate::error::StoreError;
use crate::port::SpotStore;

/// Stores the spot price as a small JSON document.
///
/// Writes go to a sibling temp file that is renamed over the target, so a
/// reader never sees a half-written snapshot.
#[derive(Debug, Clone)]
pub struct JsonFileSpotStore {
    path: PathBuf,
}

impl JsonFileSpotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SpotStore for JsonFileSpotStore {
    fn load(&self) -> Result<Option<SpotPrice>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save(&self, spot: &SpotPrice) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let temp = self.temp_path();
        fs::write(&temp, serde_json::to_vec_pretty(spot)?)?;
        fs::rename(&temp, &self.path)?;
        Ok(())
    }
}
