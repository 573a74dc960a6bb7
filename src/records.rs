//! Photo Capture - Photo Record Store
//!
//! Keeps the list of captured photos in a single JSON document
//! (`photos_list.json`). Every mutation is a full read-modify-write of the
//! document, serialised by an in-process mutex.

use std::path::{Path, PathBuf};
use chrono::{Local, NaiveDateTime};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::{PhotoError, PhotoResult};
use crate::media_fs;

/// Capture date format stored in the document
pub const CAPTURE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Metadata of one captured photo. Identity is the uri string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoRecord {
    /// `file://` uri of the image
    #[serde(rename = "imageUri")]
    pub uri: String,
    /// Capture time, `yyyy-MM-dd HH:mm:ss`
    #[serde(rename = "captureDate")]
    pub capture_date: String,
    /// File size in bytes at capture time
    #[serde(rename = "imageSize")]
    pub size_bytes: i64,
}

impl PhotoRecord {
    pub fn new(uri: impl Into<String>, capture_date: impl Into<String>, size_bytes: i64) -> Self {
        Self {
            uri: uri.into(),
            capture_date: capture_date.into(),
            size_bytes,
        }
    }

    /// Record stamped with the current local time
    pub fn captured_now(uri: impl Into<String>, size_bytes: i64) -> Self {
        Self::new(uri, Local::now().format(CAPTURE_DATE_FORMAT).to_string(), size_bytes)
    }

    /// Parsed capture date, if well-formed
    pub fn captured_at(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.capture_date, CAPTURE_DATE_FORMAT).ok()
    }
}

/// Photo Record Store - the JSON document holding every photo record
pub struct PhotoRecordStore {
    /// Document path
    path: PathBuf,
    /// Serialises read-modify-write cycles
    lock: Mutex<()>,
}

impl PhotoRecordStore {
    /// Open the store in `documents_dir`, creating the directory if needed.
    /// The document itself is created on first write.
    pub fn open(documents_dir: &Path, file_name: &str) -> PhotoResult<Self> {
        std::fs::create_dir_all(documents_dir)?;
        let path = documents_dir.join(file_name);

        log::debug!("Record store opened at {}", path.display());

        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a record. Returns `false` when a record with the same uri
    /// already exists; the document is then left untouched.
    pub fn append(&self, record: PhotoRecord) -> PhotoResult<bool> {
        let _guard = self.lock.lock();

        let mut records = self.read_document()?;
        if records.iter().any(|r| r.uri == record.uri) {
            log::warn!("Record for {} already present, not appending", record.uri);
            return Ok(false);
        }

        log::debug!("Appending record {}", record.uri);
        records.push(record);
        self.write_document(&records)?;

        Ok(true)
    }

    /// All records in capture order. A malformed document is an error.
    pub fn list(&self) -> PhotoResult<Vec<PhotoRecord>> {
        let _guard = self.lock.lock();
        self.read_document()
    }

    /// All records, degrading to an empty list when the document cannot be read
    pub fn list_or_empty(&self) -> Vec<PhotoRecord> {
        match self.list() {
            Ok(records) => records,
            Err(e) => {
                log::warn!("Record document unreadable, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Remove every record with this uri. Returns `false` when nothing
    /// matched; the document is then not rewritten.
    pub fn remove(&self, uri: &str) -> PhotoResult<bool> {
        let _guard = self.lock.lock();

        let mut records = self.read_document()?;
        let before = records.len();
        records.retain(|r| r.uri != uri);

        if records.len() == before {
            log::debug!("No record for {}, nothing removed", uri);
            return Ok(false);
        }

        self.write_document(&records)?;
        log::info!("Removed {} record(s) for {}", before - records.len(), uri);

        Ok(true)
    }

    /// Record for a uri
    pub fn get(&self, uri: &str) -> PhotoResult<Option<PhotoRecord>> {
        Ok(self.list()?.into_iter().find(|r| r.uri == uri))
    }

    /// Most recently captured record
    pub fn last(&self) -> PhotoResult<Option<PhotoRecord>> {
        Ok(self.list()?.pop())
    }

    /// Number of records
    pub fn len(&self) -> PhotoResult<usize> {
        Ok(self.list()?.len())
    }

    pub fn is_empty(&self) -> PhotoResult<bool> {
        Ok(self.len()? == 0)
    }

    fn read_document(&self) -> PhotoResult<Vec<PhotoRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let data = media_fs::read_file(&self.path)?;
        serde_json::from_slice(&data)
            .map_err(|e| PhotoError::RecordsCorrupted(format!("{}: {}", self.path.display(), e)))
    }

    fn write_document(&self, records: &[PhotoRecord]) -> PhotoResult<()> {
        let data = serde_json::to_vec(records)?;
        media_fs::write_atomic(&self.path, &data)
    }
}
