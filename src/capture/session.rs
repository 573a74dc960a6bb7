//! Photo Capture - Capture Session
//!
//! State machine over a camera binding:
//!
//! ```text
//! Unbound ──start──▶ Binding ──▶ Bound(lens) ──begin_capture──▶ Capturing(lens)
//!    ▲                              │  ▲                              │
//!    └──────────────stop────────────┘  └──────────completion──────────┘
//! ```
//!
//! At most one capture is pending. Its completion arrives through a
//! single-slot channel; stopping the session drops the slot, so a late
//! completion is discarded rather than recorded.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::oneshot::{self, error::TryRecvError};

use super::backend::{CameraAvailability, CameraBackend, CaptureReply};
use super::naming::CaptureNamer;
use super::LensFacing;
use crate::error::{PhotoError, PhotoResult};
use crate::media_fs;
use crate::records::{PhotoRecord, PhotoRecordStore};
use crate::uri::PhotoUri;

/// Capture session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unbound,
    Binding,
    Bound(LensFacing),
    Capturing(LensFacing),
}

/// Result of a finished capture
#[derive(Debug)]
pub enum CaptureOutcome {
    /// File written and recorded
    Saved(PhotoRecord),
    /// Capture dropped; nothing was recorded
    Failed(PhotoError),
}

struct PendingCapture {
    path: PathBuf,
    rx: oneshot::Receiver<PhotoResult<()>>,
}

/// Capture Session - owns the live camera binding
pub struct CaptureSession<B: CameraBackend> {
    backend: B,
    store: Arc<PhotoRecordStore>,
    namer: Arc<CaptureNamer>,
    lens: LensFacing,
    state: SessionState,
    pending: Option<PendingCapture>,
}

impl<B: CameraBackend> CaptureSession<B> {
    pub fn new(
        backend: B,
        store: Arc<PhotoRecordStore>,
        namer: Arc<CaptureNamer>,
        lens: LensFacing,
    ) -> Self {
        Self {
            backend,
            store,
            namer,
            lens,
            state: SessionState::Unbound,
            pending: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Currently selected lens
    pub fn selector(&self) -> LensFacing {
        self.lens
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    // ═══════════════════════════════════════════════════════════════════════
    // BINDING
    // ═══════════════════════════════════════════════════════════════════════

    /// Bind the camera to `surface` with the current lens. Any previous
    /// binding is released first.
    pub fn start(&mut self, surface: &B::Surface) -> PhotoResult<()> {
        match self.backend.availability() {
            CameraAvailability::Available => {}
            CameraAvailability::PermissionDenied => {
                self.release();
                return Err(PhotoError::CameraUnavailable("camera permission denied".into()));
            }
            CameraAvailability::NoDevice => {
                self.release();
                return Err(PhotoError::CameraUnavailable("no camera device".into()));
            }
        }

        self.release();
        self.state = SessionState::Binding;

        match self.backend.bind(self.lens, surface) {
            Ok(()) => {
                log::info!("Camera bound ({} lens)", self.lens);
                self.state = SessionState::Bound(self.lens);
                Ok(())
            }
            Err(e) => {
                log::error!("Camera binding failed: {}", e);
                self.state = SessionState::Unbound;
                Err(e)
            }
        }
    }

    /// Toggle between front and back lens and rebind
    pub fn switch(&mut self, surface: &B::Surface) -> PhotoResult<()> {
        self.stop();
        self.lens = self.lens.toggled();
        log::debug!("Switching camera to {} lens", self.lens);
        self.start(surface)
    }

    /// Release the camera. A pending capture is abandoned.
    pub fn stop(&mut self) {
        self.release();
        log::debug!("Camera stopped");
    }

    fn release(&mut self) {
        if let Some(pending) = self.pending.take() {
            log::info!("Abandoning pending capture {}", pending.path.display());
        }

        if self.state != SessionState::Unbound {
            self.backend.unbind_all();
        }

        self.state = SessionState::Unbound;
    }

    // ═══════════════════════════════════════════════════════════════════════
    // CAPTURE
    // ═══════════════════════════════════════════════════════════════════════

    /// Issue a take-picture request. Returns the target file path; the
    /// outcome is collected with [`poll_capture`](Self::poll_capture).
    pub fn begin_capture(&mut self) -> PhotoResult<PathBuf> {
        let lens = match self.state {
            SessionState::Bound(lens) => lens,
            SessionState::Capturing(_) => return Err(PhotoError::CaptureInProgress),
            SessionState::Unbound | SessionState::Binding => return Err(PhotoError::NotBound),
        };

        let path = self.namer.next_path()?;
        let (reply, rx) = CaptureReply::channel();

        self.state = SessionState::Capturing(lens);
        self.pending = Some(PendingCapture { path: path.clone(), rx });

        log::debug!("Taking picture into {}", path.display());
        self.backend.take_picture(&path, reply);

        Ok(path)
    }

    /// Collect the pending capture if it has completed
    pub fn poll_capture(&mut self) -> Option<CaptureOutcome> {
        let pending = self.pending.as_mut()?;

        let result = match pending.rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Closed) => Err(PhotoError::CaptureCancelled),
        };

        let pending = self.pending.take()?;
        Some(self.finish(&pending.path, result))
    }

    /// Take a picture and wait for it to be saved and recorded.
    ///
    /// The request stays in the pending slot while waiting. If this future
    /// is dropped early the capture is still collected by
    /// [`poll_capture`](Self::poll_capture).
    pub async fn capture(&mut self) -> PhotoResult<PhotoRecord> {
        self.begin_capture()?;

        let pending = self.pending.as_mut().ok_or(PhotoError::CaptureCancelled)?;
        let result = (&mut pending.rx)
            .await
            .unwrap_or(Err(PhotoError::CaptureCancelled));
        let path = pending.path.clone();
        self.pending = None;

        match self.finish(&path, result) {
            CaptureOutcome::Saved(record) => Ok(record),
            CaptureOutcome::Failed(e) => Err(e),
        }
    }

    fn finish(&mut self, path: &Path, result: PhotoResult<()>) -> CaptureOutcome {
        if let SessionState::Capturing(lens) = self.state {
            self.state = SessionState::Bound(lens);
        }

        let outcome = result.and_then(|()| record_saved_capture(&self.store, path));

        match outcome {
            Ok(record) => {
                log::info!("Photo saved: {} ({} bytes)", record.uri, record.size_bytes);
                CaptureOutcome::Saved(record)
            }
            Err(e) => {
                log::error!("Capture into {} failed: {}", path.display(), e);
                CaptureOutcome::Failed(e)
            }
        }
    }
}

impl<B: CameraBackend> Drop for CaptureSession<B> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Build the record for a freshly written capture file and append it
pub fn record_saved_capture(store: &PhotoRecordStore, path: &Path) -> PhotoResult<PhotoRecord> {
    let size = media_fs::file_size(path)?;
    let uri = PhotoUri::from_path(path);
    let record = PhotoRecord::captured_now(uri, i64::try_from(size).unwrap_or(i64::MAX));

    if !store.append(record.clone())? {
        log::warn!("Capture {} was already recorded", record.uri);
    }

    Ok(record)
}
