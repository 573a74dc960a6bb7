//! Scripted camera for driving capture sessions in tests.

use std::path::{Path, PathBuf};

use super::backend::{CameraAvailability, CameraBackend, CaptureReply};
use super::LensFacing;
use crate::error::{PhotoError, PhotoResult};

/// What a take-picture request does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotMode {
    /// Write the file and complete immediately
    Complete,
    /// Complete immediately with a platform error
    Fail,
    /// Keep the reply in `held` for the test to complete
    Hold,
}

pub struct ScriptedCamera {
    pub availability: CameraAvailability,
    pub bind_fails: bool,
    pub mode: ShotMode,
    pub binds: Vec<LensFacing>,
    pub unbinds: usize,
    pub held: Vec<(PathBuf, CaptureReply)>,
}

impl ScriptedCamera {
    pub const SHOT_BYTES: &'static [u8] = b"\xFF\xD8\xFF\xE0 scripted jpeg";
}

impl Default for ScriptedCamera {
    fn default() -> Self {
        Self {
            availability: CameraAvailability::Available,
            bind_fails: false,
            mode: ShotMode::Complete,
            binds: Vec::new(),
            unbinds: 0,
            held: Vec::new(),
        }
    }
}

impl CameraBackend for ScriptedCamera {
    type Surface = ();

    fn availability(&self) -> CameraAvailability {
        self.availability
    }

    fn bind(&mut self, lens: LensFacing, _surface: &()) -> PhotoResult<()> {
        if self.bind_fails {
            return Err(PhotoError::BindFailed("scripted bind failure".into()));
        }
        self.binds.push(lens);
        Ok(())
    }

    fn unbind_all(&mut self) {
        self.unbinds += 1;
    }

    fn take_picture(&mut self, target: &Path, reply: CaptureReply) {
        match self.mode {
            ShotMode::Complete => {
                let result = std::fs::write(target, Self::SHOT_BYTES).map_err(PhotoError::from);
                reply.complete(result);
            }
            ShotMode::Fail => reply.fail(PhotoError::CaptureFailed("scripted failure".into())),
            ShotMode::Hold => self.held.push((target.to_path_buf(), reply)),
        }
    }
}
