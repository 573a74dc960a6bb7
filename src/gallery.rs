//! Photo Capture - Gallery Index
//!
//! Display-ordered, de-duplicated view over the record store, plus photo
//! deletion and consistency checks between records and the pictures
//! directory.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use serde::Serialize;

use crate::error::{PhotoError, PhotoResult};
use crate::media_fs;
use crate::records::{PhotoRecord, PhotoRecordStore};
use crate::uri::PhotoUri;

/// Gallery - read side of the photo records
pub struct Gallery {
    store: Arc<PhotoRecordStore>,
    pictures_dir: PathBuf,
}

impl Gallery {
    pub fn new(store: Arc<PhotoRecordStore>, pictures_dir: PathBuf) -> Self {
        Self { store, pictures_dir }
    }

    /// Distinct image uris in first-capture order. An unreadable record
    /// document yields an empty gallery.
    pub fn index(&self) -> Vec<String> {
        distinct_uris(&self.store.list_or_empty())
    }

    /// Record behind a uri
    pub fn details(&self, uri: &str) -> Option<PhotoRecord> {
        self.store
            .list_or_empty()
            .into_iter()
            .find(|r| r.uri == uri)
    }

    /// Uri of the most recent capture
    pub fn last_photo_uri(&self) -> Option<String> {
        let last = self.store.list_or_empty().pop().map(|r| r.uri);
        match &last {
            Some(uri) => log::debug!("Last image: {}", uri),
            None => log::debug!("No images captured yet"),
        }
        last
    }

    // ═══════════════════════════════════════════════════════════════════════
    // DELETE
    // ═══════════════════════════════════════════════════════════════════════

    /// Delete the image file, then its record. Returns `false` if either
    /// step fails; a failed file delete leaves the record untouched.
    pub fn delete(&self, uri: &str) -> bool {
        match self.try_delete(uri) {
            Ok(()) => true,
            Err(e) => {
                log::error!("Failed to delete {}: {}", uri, e);
                false
            }
        }
    }

    pub fn try_delete(&self, uri: &str) -> PhotoResult<()> {
        if !self.store.list()?.iter().any(|r| r.uri == uri) {
            return Err(PhotoError::PhotoNotFound(uri.to_string()));
        }

        let path = PhotoUri::parse(uri)?.to_path();
        media_fs::delete_file(&path)?;
        log::debug!("File deleted: {}", path.display());

        // Not atomic with the file delete; reconcile() finds what a crash here leaves
        self.store.remove(uri)?;
        log::info!("Photo deleted: {}", uri);

        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // CONSISTENCY
    // ═══════════════════════════════════════════════════════════════════════

    /// Compare records against the files on disk
    pub fn reconcile(&self) -> PhotoResult<ReconcileReport> {
        let records = self.store.list()?;
        let mut report = ReconcileReport::default();

        let mut recorded_paths = HashSet::new();
        for uri in distinct_uris(&records) {
            let path = match PhotoUri::parse(&uri) {
                Ok(parsed) => parsed.to_path(),
                Err(_) => {
                    report.dangling_records.push(uri);
                    continue;
                }
            };

            if !path.is_file() {
                report.dangling_records.push(uri);
            }
            recorded_paths.insert(path);
        }

        for file in media_fs::list_images(&self.pictures_dir)? {
            let known = recorded_paths.contains(&file)
                || std::fs::canonicalize(&file)
                    .map(|canonical| recorded_paths.contains(&canonical))
                    .unwrap_or(false);

            if !known {
                report.orphan_files.push(file);
            }
        }

        if !report.is_clean() {
            log::warn!(
                "Gallery inconsistent: {} dangling record(s), {} orphan file(s)",
                report.dangling_records.len(),
                report.orphan_files.len()
            );
        }

        Ok(report)
    }

    /// Remove records whose image file no longer exists
    pub fn prune_dangling(&self) -> PhotoResult<usize> {
        let report = self.reconcile()?;
        let mut removed = 0;

        for uri in &report.dangling_records {
            if self.store.remove(uri)? {
                removed += 1;
            }
        }

        if removed > 0 {
            log::info!("Pruned {} dangling record(s)", removed);
        }

        Ok(removed)
    }
}

/// Distinct uris, first occurrence wins
pub fn distinct_uris(records: &[PhotoRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| seen.insert(r.uri.as_str()))
        .map(|r| r.uri.clone())
        .collect()
}

/// Differences between the record document and the pictures directory
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReconcileReport {
    /// Records whose image file is missing
    pub dangling_records: Vec<String>,
    /// Images in the pictures directory without a record
    pub orphan_files: Vec<PathBuf>,
}

impl ReconcileReport {
    pub fn is_clean(&self) -> bool {
        self.dangling_records.is_empty() && self.orphan_files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::{tempdir, TempDir};

    struct Fixture {
        _dir: TempDir,
        pictures: PathBuf,
        store: Arc<PhotoRecordStore>,
        gallery: Gallery,
    }

    fn fixture() -> Fixture {
        let dir = tempdir().unwrap();
        let pictures = dir.path().join("pictures");
        std::fs::create_dir_all(&pictures).unwrap();
        let store = Arc::new(
            PhotoRecordStore::open(&dir.path().join("documents"), "photos_list.json").unwrap(),
        );
        let gallery = Gallery::new(Arc::clone(&store), pictures.clone());
        Fixture { _dir: dir, pictures, store, gallery }
    }

    /// Write an image file and return its uri
    fn photo(dir: &Path, name: &str) -> String {
        let path = dir.join(name);
        std::fs::write(&path, b"jpeg").unwrap();
        PhotoUri::from_path(&path).to_string()
    }

    fn record(uri: &str) -> PhotoRecord {
        PhotoRecord::new(uri, "2024-01-01 10:00:00", 4)
    }

    #[test]
    fn test_distinct_uris_keeps_first_order() {
        let records = vec![record("file:/a.jpg"), record("file:/b.jpg"), record("file:/a.jpg")];
        assert_eq!(distinct_uris(&records), vec!["file:/a.jpg", "file:/b.jpg"]);
    }

    #[test]
    fn test_index_dedups_stored_duplicates() {
        let f = fixture();
        // A document written by an older build can carry repeated entries
        let doc = serde_json::to_vec(&vec![
            record("file:/a.jpg"),
            record("file:/b.jpg"),
            record("file:/a.jpg"),
        ])
        .unwrap();
        std::fs::write(f.store.path(), doc).unwrap();

        assert_eq!(f.gallery.index(), vec!["file:/a.jpg", "file:/b.jpg"]);
    }

    #[test]
    fn test_index_of_corrupted_document_is_empty() {
        let f = fixture();
        std::fs::write(f.store.path(), b"[{").unwrap();
        assert!(f.gallery.index().is_empty());
        assert!(f.gallery.last_photo_uri().is_none());
    }

    #[test]
    fn test_details_and_last() {
        let f = fixture();
        f.store.append(record("file:/a.jpg")).unwrap();
        f.store.append(record("file:/b.jpg")).unwrap();

        assert_eq!(f.gallery.details("file:/a.jpg").unwrap().size_bytes, 4);
        assert!(f.gallery.details("file:/c.jpg").is_none());
        assert_eq!(f.gallery.last_photo_uri().as_deref(), Some("file:/b.jpg"));
    }

    #[test]
    fn test_delete_removes_file_and_record() {
        let f = fixture();
        let uri = photo(&f.pictures, "a.jpg");
        f.store.append(record(&uri)).unwrap();

        assert!(f.gallery.delete(&uri));
        assert!(!f.pictures.join("a.jpg").exists());
        assert!(f.gallery.index().is_empty());
    }

    #[test]
    fn test_delete_unknown_uri_fails_without_change() {
        let f = fixture();
        let kept = photo(&f.pictures, "kept.jpg");
        f.store.append(record(&kept)).unwrap();
        let stray = photo(&f.pictures, "stray.jpg");

        let before = std::fs::read(f.store.path()).unwrap();
        assert!(!f.gallery.delete(&stray));
        assert!(matches!(f.gallery.try_delete(&stray), Err(PhotoError::PhotoNotFound(_))));

        assert_eq!(std::fs::read(f.store.path()).unwrap(), before);
        assert!(f.pictures.join("stray.jpg").exists());
    }

    #[test]
    fn test_delete_missing_file_keeps_record() {
        let f = fixture();
        let uri = PhotoUri::from_path(&f.pictures.join("gone.jpg")).to_string();
        f.store.append(record(&uri)).unwrap();

        assert!(!f.gallery.delete(&uri));
        assert_eq!(f.gallery.index(), vec![uri]);
    }

    #[test]
    fn test_reconcile_and_prune() {
        let f = fixture();
        let present = photo(&f.pictures, "present.jpg");
        let dangling = PhotoUri::from_path(&f.pictures.join("gone.jpg")).to_string();
        photo(&f.pictures, "orphan.jpg");

        f.store.append(record(&present)).unwrap();
        f.store.append(record(&dangling)).unwrap();

        let report = f.gallery.reconcile().unwrap();
        assert_eq!(report.dangling_records, vec![dangling.clone()]);
        assert_eq!(report.orphan_files, vec![f.pictures.join("orphan.jpg")]);
        assert!(!report.is_clean());

        assert_eq!(f.gallery.prune_dangling().unwrap(), 1);
        assert_eq!(f.gallery.index(), vec![present]);
        assert_eq!(f.gallery.prune_dangling().unwrap(), 0);
    }
}
