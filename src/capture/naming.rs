//! Photo Capture - Capture File Naming
//!
//! Files are named `yyyy-MM-dd-HH-mm-ss-SSS.jpg` in local time. Issued
//! timestamps strictly increase, so two captures inside the same
//! millisecond still get distinct names.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};
use chrono::{DateTime, Duration, Local};

use crate::error::PhotoResult;

/// Capture file name format (without extension)
pub const CAPTURE_FILE_FORMAT: &str = "%Y-%m-%d-%H-%M-%S-%3f";

/// Capture file extension
pub const CAPTURE_FILE_EXTENSION: &str = "jpg";

/// Hands out unique capture file paths inside the pictures directory
#[derive(Debug)]
pub struct CaptureNamer {
    dir: PathBuf,
    /// Last issued timestamp in epoch milliseconds
    last_millis: AtomicI64,
}

impl CaptureNamer {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            last_millis: AtomicI64::new(i64::MIN),
        }
    }

    /// Path for the next capture, creating the pictures directory if needed
    pub fn next_path(&self) -> PhotoResult<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        Ok(self.next_path_at(Local::now()))
    }

    pub(crate) fn next_path_at(&self, now: DateTime<Local>) -> PathBuf {
        let now_millis = now.timestamp_millis();

        loop {
            let millis = self.reserve(now_millis);
            let stamp = now + Duration::milliseconds(millis - now_millis);
            let path = self.dir.join(format!(
                "{}.{}",
                stamp.format(CAPTURE_FILE_FORMAT),
                CAPTURE_FILE_EXTENSION
            ));

            // A file left by an earlier run can already hold this name
            if !path.exists() {
                return path;
            }
        }
    }

    /// Claim a timestamp strictly after every previously issued one
    fn reserve(&self, now_millis: i64) -> i64 {
        let mut last = self.last_millis.load(Ordering::Relaxed);
        loop {
            let next = if last == i64::MIN { now_millis } else { now_millis.max(last + 1) };
            match self
                .last_millis
                .compare_exchange_weak(last, next, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return next,
                Err(actual) => last = actual,
            }
        }
    }
}
