//! Photo Capture - Unified Public API
//!
//! Opened once at startup from an [`AppConfig`]. Owns the record store and
//! hands out the gallery, capture sessions and edit sessions that share it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::capture::{record_saved_capture, CameraBackend, CaptureNamer, CaptureSession};
use crate::config::AppConfig;
use crate::editor::EditSession;
use crate::error::PhotoResult;
use crate::gallery::Gallery;
use crate::records::{PhotoRecord, PhotoRecordStore};
use crate::uri::PhotoUri;

/// Photo Capture API
///
/// # Example
///
/// ```rust,ignore
/// use photo_capture::{AppConfig, PhotoCaptureApi, Transform};
///
/// let api = PhotoCaptureApi::open(AppConfig::for_root(data_dir))?;
///
/// for uri in api.gallery().index() {
///     println!("{}", uri);
/// }
///
/// let mut edit = api.edit(&uri)?;
/// edit.apply(Transform::RotateRight);
/// edit.commit();
///
/// api.close();
/// ```
pub struct PhotoCaptureApi {
    config: AppConfig,
    store: Arc<PhotoRecordStore>,
    namer: Arc<CaptureNamer>,
}

impl PhotoCaptureApi {
    // ═══════════════════════════════════════════════════════════════════════
    // LIFECYCLE
    // ═══════════════════════════════════════════════════════════════════════

    /// Open the record store and prepare the pictures directory
    pub fn open(config: AppConfig) -> PhotoResult<Self> {
        config.validate()?;
        std::fs::create_dir_all(&config.pictures_dir)?;

        let store = PhotoRecordStore::open(&config.documents_dir, &config.records_file_name)?;
        let namer = CaptureNamer::new(&config.pictures_dir);

        log::info!(
            "Photo Capture {} opened (records: {}, pictures: {})",
            crate::VERSION,
            store.path().display(),
            config.pictures_dir.display()
        );

        Ok(Self {
            config,
            store: Arc::new(store),
            namer: Arc::new(namer),
        })
    }

    /// Open with the standard layout under `root`
    pub fn open_at<P: AsRef<Path>>(root: P) -> PhotoResult<Self> {
        Self::open(AppConfig::for_root(root.as_ref()))
    }

    /// End the API's lifecycle. Outstanding sessions keep their own handles.
    pub fn close(self) {
        log::info!("Photo Capture closed");
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<PhotoRecordStore> {
        &self.store
    }

    // ═══════════════════════════════════════════════════════════════════════
    // COMPONENTS
    // ═══════════════════════════════════════════════════════════════════════

    pub fn gallery(&self) -> Gallery {
        Gallery::new(Arc::clone(&self.store), self.config.pictures_dir.clone())
    }

    /// Capture session over a camera backend, starting on the configured lens
    pub fn capture_session<B: CameraBackend>(&self, backend: B) -> CaptureSession<B> {
        CaptureSession::new(
            backend,
            Arc::clone(&self.store),
            Arc::clone(&self.namer),
            self.config.default_lens,
        )
    }

    /// Open an edit session on a photo
    pub fn edit(&self, uri: &str) -> PhotoResult<EditSession> {
        EditSession::open(&PhotoUri::parse(uri)?, &self.config)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // PLATFORM-DRIVEN CAPTURE
    // ═══════════════════════════════════════════════════════════════════════

    /// Target path for a capture performed by the platform camera directly
    pub fn next_capture_path(&self) -> PhotoResult<PathBuf> {
        self.namer.next_path()
    }

    /// Record a capture the platform camera has saved
    pub fn on_capture_saved(&self, path: &Path) -> PhotoResult<PhotoRecord> {
        record_saved_capture(&self.store, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::StillFileCamera;
    use crate::editor::Transform;
    use image::{DynamicImage, GenericImageView};
    use tempfile::tempdir;

    #[test]
    fn test_open_creates_layout() {
        let dir = tempdir().unwrap();
        let api = PhotoCaptureApi::open_at(dir.path()).unwrap();

        assert!(dir.path().join("pictures").is_dir());
        assert!(dir.path().join("documents").is_dir());
        assert!(api.gallery().index().is_empty());
        api.close();
    }

    #[test]
    fn test_open_rejects_invalid_config() {
        let dir = tempdir().unwrap();
        let mut config = AppConfig::for_root(dir.path());
        config.jpeg_quality = 0;
        assert!(PhotoCaptureApi::open(config).is_err());
    }

    #[test]
    fn test_platform_capture_flow() {
        let dir = tempdir().unwrap();
        let api = PhotoCaptureApi::open_at(dir.path()).unwrap();

        let path = api.next_capture_path().unwrap();
        std::fs::write(&path, b"\xFF\xD8\xFF").unwrap();
        let record = api.on_capture_saved(&path).unwrap();

        assert_eq!(record.size_bytes, 3);
        assert_eq!(api.gallery().index(), vec![record.uri.clone()]);
        assert_eq!(api.gallery().last_photo_uri(), Some(record.uri));
    }

    #[tokio::test]
    async fn test_capture_edit_delete_flow() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("source.png");
        DynamicImage::new_rgb8(6, 4).save(&source).unwrap();

        let api = PhotoCaptureApi::open_at(dir.path().join("data")).unwrap();

        // Capture -> record store
        let mut session = api.capture_session(StillFileCamera::new(&source));
        session.start(&()).unwrap();
        let record = session.capture().await.unwrap();
        session.stop();

        // Record store -> gallery
        let gallery = api.gallery();
        assert_eq!(gallery.index(), vec![record.uri.clone()]);

        // Gallery -> editor -> record store
        let mut edit = api.edit(&record.uri).unwrap();
        edit.apply(Transform::RotateRight);
        assert!(edit.commit());
        let saved = image::open(PhotoUri::parse(&record.uri).unwrap().to_path()).unwrap();
        assert_eq!(saved.dimensions(), (4, 6));

        assert!(gallery.delete(&record.uri));
        assert!(gallery.index().is_empty());
    }
}
