//! Photo Capture - Configuration
//!
//! Directory layout, encode quality and history depth, persisted as JSON.

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use crate::capture::LensFacing;
use crate::error::{PhotoError, PhotoResult};

/// Default name of the record document
pub const RECORDS_FILE_NAME: &str = "photos_list.json";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the record document
    pub documents_dir: PathBuf,
    /// Directory receiving captured images
    pub pictures_dir: PathBuf,
    /// Record document file name
    pub records_file_name: String,
    /// JPEG quality used when committing edits (1-100)
    pub jpeg_quality: u8,
    /// Maximum undo depth, anchor excluded
    pub max_history: usize,
    /// Lens selected when a capture session is created
    pub default_lens: LensFacing,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_root(Path::new("./photo_capture_data"))
    }
}

impl AppConfig {
    /// Configuration with the standard layout under `root`
    pub fn for_root(root: &Path) -> Self {
        Self {
            documents_dir: root.join("documents"),
            pictures_dir: root.join("pictures"),
            records_file_name: RECORDS_FILE_NAME.into(),
            jpeg_quality: 100,
            max_history: 32,
            default_lens: LensFacing::Back,
        }
    }

    /// Load configuration from a JSON file, falling back to `for_root(root)` when absent
    pub fn load(path: &Path, root: &Path) -> PhotoResult<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::for_root(root));
        }

        let data = std::fs::read(path)?;
        let config: AppConfig = serde_json::from_slice(&data)
            .map_err(|e| PhotoError::InvalidConfig(format!("{}: {}", path.display(), e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self, path: &Path) -> PhotoResult<()> {
        self.validate()?;
        let data = serde_json::to_vec_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, data)?;
        Ok(())
    }

    pub fn validate(&self) -> PhotoResult<()> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(PhotoError::InvalidConfig(format!(
                "jpeg_quality must be within 1..=100, got {}",
                self.jpeg_quality
            )));
        }

        if self.max_history == 0 {
            return Err(PhotoError::InvalidConfig("max_history must be at least 1".into()));
        }

        if self.records_file_name.is_empty() {
            return Err(PhotoError::InvalidConfig("records_file_name is empty".into()));
        }

        Ok(())
    }

    /// Full path of the record document
    pub fn records_path(&self) -> PathBuf {
        self.documents_dir.join(&self.records_file_name)
    }
}
