//! Photo Capture - Camera Capture
//!
//! The camera itself is a platform capability behind [`CameraBackend`].
//! [`CaptureSession`] drives it through bind / switch / capture / stop and
//! turns each saved file into a [`PhotoRecord`](crate::records::PhotoRecord).

pub mod backend;
pub mod naming;
pub mod session;

#[cfg(test)]
pub(crate) mod scripted;

use serde::{Deserialize, Serialize};

pub use backend::{CameraAvailability, CameraBackend, CaptureReply, StillFileCamera};
pub use naming::CaptureNamer;
pub use session::{record_saved_capture, CaptureOutcome, CaptureSession, SessionState};

/// Front- or back-facing capture device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LensFacing {
    #[default]
    Back,
    Front,
}

impl LensFacing {
    /// The other lens
    pub fn toggled(self) -> Self {
        match self {
            LensFacing::Back => LensFacing::Front,
            LensFacing::Front => LensFacing::Back,
        }
    }
}

impl std::fmt::Display for LensFacing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LensFacing::Back => f.write_str("back"),
            LensFacing::Front => f.write_str("front"),
        }
    }
}
