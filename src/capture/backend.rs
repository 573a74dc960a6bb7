//! Photo Capture - Camera Backends
//!
//! The camera capability consumed by a capture session, plus a still-file
//! backend used on desktop and by the CLI.

use std::path::{Path, PathBuf};
use tokio::sync::oneshot;

use super::LensFacing;
use crate::editor::codec;
use crate::error::{PhotoError, PhotoResult};

/// Whether the camera can be used at all
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraAvailability {
    Available,
    PermissionDenied,
    NoDevice,
}

/// Completion handle for one take-picture request.
///
/// Consumed on use, so a request completes at most once. If the session
/// has gone away the result is dropped.
#[derive(Debug)]
pub struct CaptureReply {
    tx: oneshot::Sender<PhotoResult<()>>,
}

impl CaptureReply {
    pub(crate) fn channel() -> (Self, oneshot::Receiver<PhotoResult<()>>) {
        let (tx, rx) = oneshot::channel();
        (Self { tx }, rx)
    }

    /// The image was written to the target path
    pub fn succeed(self) {
        self.complete(Ok(()));
    }

    /// The platform reported a failure
    pub fn fail(self, error: PhotoError) {
        self.complete(Err(error));
    }

    pub fn complete(self, result: PhotoResult<()>) {
        if self.tx.send(result).is_err() {
            log::debug!("Capture completed after its session was disposed; result dropped");
        }
    }

    /// True once the waiting session has been disposed
    pub fn is_abandoned(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Platform camera capability
pub trait CameraBackend {
    /// Preview surface the camera renders into
    type Surface;

    /// Whether a camera exists and may be used
    fn availability(&self) -> CameraAvailability;

    /// Bind preview and still capture to the given lens
    fn bind(&mut self, lens: LensFacing, surface: &Self::Surface) -> PhotoResult<()>;

    /// Release every binding
    fn unbind_all(&mut self);

    /// Write one picture to `target`, completing `reply` when done.
    /// May complete before returning or later from the platform's executor.
    fn take_picture(&mut self, target: &Path, reply: CaptureReply);
}

/// Camera that "captures" by re-encoding a still image file as JPEG
pub struct StillFileCamera {
    source: PathBuf,
    quality: u8,
    bound: Option<LensFacing>,
}

impl StillFileCamera {
    pub fn new(source: &Path) -> Self {
        Self {
            source: source.to_path_buf(),
            quality: 95,
            bound: None,
        }
    }

    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    /// Lens currently bound
    pub fn bound_lens(&self) -> Option<LensFacing> {
        self.bound
    }
}

impl CameraBackend for StillFileCamera {
    type Surface = ();

    fn availability(&self) -> CameraAvailability {
        if self.source.is_file() {
            CameraAvailability::Available
        } else {
            CameraAvailability::NoDevice
        }
    }

    fn bind(&mut self, lens: LensFacing, _surface: &()) -> PhotoResult<()> {
        log::debug!("Still camera bound ({} lens) to {}", lens, self.source.display());
        self.bound = Some(lens);
        Ok(())
    }

    fn unbind_all(&mut self) {
        self.bound = None;
    }

    fn take_picture(&mut self, target: &Path, reply: CaptureReply) {
        if self.bound.is_none() {
            reply.fail(PhotoError::NotBound);
            return;
        }

        let result = image::open(&self.source)
            .map_err(|e| PhotoError::CaptureFailed(format!("{}: {}", self.source.display(), e)))
            .and_then(|img| codec::save_jpeg(&img, target, self.quality))
            .map_err(|e| match e {
                failed @ PhotoError::CaptureFailed(_) => failed,
                other => PhotoError::CaptureFailed(other.to_string()),
            });

        reply.complete(result);
    }
}
