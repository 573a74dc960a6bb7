//! Photo Capture - Edit Session
//!
//! One editing screen's state: the orientation-corrected anchor image and a
//! history of transformed copies. Nothing is persisted until `commit`.

use std::path::{Path, PathBuf};
use image::DynamicImage;

use super::codec;
use super::history::EditHistory;
use super::transform::Transform;
use crate::config::AppConfig;
use crate::error::PhotoResult;
use crate::uri::PhotoUri;

/// Edit Session - undoable rotate/flip edits over one photo
pub struct EditSession {
    uri: PhotoUri,
    path: PathBuf,
    history: EditHistory<DynamicImage>,
    jpeg_quality: u8,
}

impl EditSession {
    /// Load the photo at `uri`, correcting its orientation once
    pub fn open(uri: &PhotoUri, config: &AppConfig) -> PhotoResult<Self> {
        let path = uri.to_path();
        let anchor = codec::decode_oriented(&path)?;

        log::info!(
            "Edit session opened for {} ({}x{})",
            uri,
            anchor.width(),
            anchor.height()
        );

        Ok(Self::from_image(uri.clone(), anchor, config))
    }

    /// Session over an already decoded image
    pub fn from_image(uri: PhotoUri, anchor: DynamicImage, config: &AppConfig) -> Self {
        let path = uri.to_path();
        Self {
            uri,
            path,
            history: EditHistory::new(anchor, config.max_history),
            jpeg_quality: config.jpeg_quality,
        }
    }

    pub fn uri(&self) -> &PhotoUri {
        &self.uri
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // ═══════════════════════════════════════════════════════════════════════
    // EDITING
    // ═══════════════════════════════════════════════════════════════════════

    /// Transform the current image and make the result current
    pub fn apply(&mut self, transform: Transform) -> &DynamicImage {
        let next = transform.apply(self.history.current());
        self.history.push(next);
        log::debug!("Applied {:?}, history depth {}", transform, self.history.depth());
        self.history.current()
    }

    /// Step back one edit; at the anchor the anchor is returned unchanged
    pub fn undo(&mut self) -> &DynamicImage {
        if !self.history.can_undo() {
            log::debug!("Undo: already at the original image");
        }
        self.history.undo()
    }

    /// Re-apply the last undone edit, if any
    pub fn redo(&mut self) -> Option<&DynamicImage> {
        if !self.history.can_redo() {
            log::debug!("Redo: nothing to redo");
        }
        self.history.redo()
    }

    /// Image currently shown
    pub fn current(&self) -> &DynamicImage {
        self.history.current()
    }

    /// Image as loaded, after orientation correction
    pub fn anchor(&self) -> &DynamicImage {
        self.history.anchor()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Whether leaving now would discard edits
    pub fn has_changes(&self) -> bool {
        self.history.can_undo()
    }

    pub fn depth(&self) -> usize {
        self.history.depth()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // COMMIT
    // ═══════════════════════════════════════════════════════════════════════

    /// Overwrite the original file with the current image.
    /// Failures are logged; the session keeps its state so the user can retry.
    pub fn commit(&self) -> bool {
        commit_image(self.current(), &self.uri, self.jpeg_quality)
    }

    /// Like [`commit`](Self::commit) but returns the error
    pub fn try_commit(&self) -> PhotoResult<()> {
        codec::save_jpeg(self.current(), &self.path, self.jpeg_quality)?;
        log::info!("Edited image saved to {}", self.uri);
        Ok(())
    }
}

/// Encode `image` as JPEG over the file at `uri`. Returns `false` on failure.
pub fn commit_image(image: &DynamicImage, uri: &PhotoUri, quality: u8) -> bool {
    match codec::save_jpeg(image, &uri.to_path(), quality) {
        Ok(()) => {
            log::info!("Image saved successfully to {}", uri);
            true
        }
        Err(e) => {
            log::error!("Failed to save image to {}: {}", uri, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba, RgbaImage};
    use tempfile::tempdir;

    fn quad() -> DynamicImage {
        let mut img = RgbaImage::new(2, 2);
        img.put_pixel(0, 0, Rgba([10, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([20, 0, 0, 255]));
        img.put_pixel(0, 1, Rgba([30, 0, 0, 255]));
        img.put_pixel(1, 1, Rgba([40, 0, 0, 255]));
        DynamicImage::ImageRgba8(img)
    }

    fn session_over(image: DynamicImage) -> EditSession {
        let uri = PhotoUri::parse("file:/tmp/photo-capture-test/never-written.jpg").unwrap();
        EditSession::from_image(uri, image, &AppConfig::default())
    }

    #[test]
    fn test_rotate_flip_then_undo_twice() {
        let original = DynamicImage::new_rgb8(3, 2);
        let mut session = session_over(original.clone());

        assert_eq!(session.apply(Transform::RotateRight).dimensions(), (2, 3));
        session.apply(Transform::FlipHorizontal);

        session.undo();
        assert_eq!(*session.undo(), original);
        assert!(!session.has_changes());
    }

    #[test]
    fn test_flip_reverses_column_order() {
        let mut session = session_over(quad());
        let flipped = session.apply(Transform::FlipHorizontal);

        assert_eq!(flipped.get_pixel(0, 0).0[0], 20);
        assert_eq!(flipped.get_pixel(1, 0).0[0], 10);
    }

    #[test]
    fn test_apply_sequence_undone_is_anchor() {
        let edits = [
            Transform::RotateRight,
            Transform::FlipHorizontal,
            Transform::RotateRight,
            Transform::RotateRight,
            Transform::FlipHorizontal,
        ];

        for n in 0..=edits.len() {
            let mut session = session_over(quad());
            for t in &edits[..n] {
                session.apply(*t);
            }
            for _ in 0..n {
                session.undo();
            }
            assert_eq!(session.current(), session.anchor());
            assert_eq!(*session.current(), quad());
        }
    }

    #[test]
    fn test_redo_after_apply_is_noop() {
        let mut session = session_over(quad());
        session.apply(Transform::RotateRight);
        session.undo();
        session.apply(Transform::FlipHorizontal);

        assert!(session.redo().is_none());
        assert_eq!(*session.current(), Transform::FlipHorizontal.apply(&quad()));
    }

    #[test]
    fn test_undo_redo_roundtrip() {
        let mut session = session_over(quad());
        session.apply(Transform::RotateRight);
        session.apply(Transform::FlipHorizontal);

        let before = session.current().clone();
        session.undo();
        assert_eq!(session.redo(), Some(&before));
    }

    #[test]
    fn test_undo_at_floor_returns_anchor() {
        let mut session = session_over(quad());
        assert_eq!(*session.undo(), quad());
        assert!(!session.can_undo());
    }

    #[test]
    fn test_open_and_commit() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("photo.png");
        quad().save(&path).unwrap();

        let uri = PhotoUri::from_path(&path);
        let mut session = EditSession::open(&uri, &AppConfig::for_root(dir.path())).unwrap();
        assert_eq!(*session.anchor(), quad());

        session.apply(Transform::RotateRight);
        let target = dir.path().join("photo.jpg");
        assert!(commit_image(session.current(), &PhotoUri::from_path(&target), 100));

        let saved = image::open(&target).unwrap();
        assert_eq!(saved.dimensions(), (2, 2));

        // Commit does not reset the history
        assert!(session.has_changes());
    }

    #[test]
    fn test_open_corrects_orientation_into_anchor() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("portrait.jpg");
        std::fs::write(&path, codec::fixtures::oriented_jpeg(6)).unwrap();

        let uri = PhotoUri::from_path(&path);
        let config = AppConfig::for_root(dir.path());
        let mut session = EditSession::open(&uri, &config).unwrap();
        assert_eq!(session.anchor().dimensions(), (8, 16));
        assert!(!session.has_changes());

        session.apply(Transform::RotateRight);
        assert_eq!(session.current().dimensions(), (16, 8));

        assert_eq!(session.undo().dimensions(), (8, 16));
        assert_eq!(session.undo().dimensions(), (8, 16));
        assert_eq!(session.current(), session.anchor());

        // Committed pixels carry no tag, so reopening does not rotate again
        assert!(session.commit());
        let reopened = EditSession::open(&uri, &config).unwrap();
        assert_eq!(reopened.anchor().dimensions(), (8, 16));
    }

    #[test]
    fn test_commit_overwrites_original() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wide.jpg");
        codec::save_jpeg(&DynamicImage::new_rgb8(4, 2), &path, 90).unwrap();

        let uri = PhotoUri::from_path(&path);
        let mut session = EditSession::open(&uri, &AppConfig::for_root(dir.path())).unwrap();
        session.apply(Transform::RotateRight);
        assert!(session.commit());

        assert_eq!(image::open(&path).unwrap().dimensions(), (2, 4));
    }

    #[test]
    fn test_commit_failure_keeps_state() {
        let dir = tempdir().unwrap();
        // Parent is a file, so the write cannot succeed
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();
        let uri = PhotoUri::from_path(&blocker.join("photo.jpg"));

        let mut session = EditSession::from_image(uri, quad(), &AppConfig::default());
        session.apply(Transform::FlipHorizontal);

        assert!(!session.commit());
        assert!(session.try_commit().is_err());
        assert!(session.has_changes());
        assert_eq!(*session.current(), Transform::FlipHorizontal.apply(&quad()));
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempdir().unwrap();
        let uri = PhotoUri::from_path(&dir.path().join("missing.jpg"));
        assert!(EditSession::open(&uri, &AppConfig::default()).is_err());
    }
}
