//! Photo Capture - Photo URIs
//!
//! Records identify photos by a `file://` uri string. This maps them to and
//! from filesystem paths.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{PhotoError, PhotoResult};

const FILE_SCHEME: &str = "file:";

/// A `file://` reference to an image on the device filesystem
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhotoUri(String);

impl PhotoUri {
    /// Build the uri for a filesystem path (`file://` + absolute path)
    pub fn from_path(path: &Path) -> Self {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(path))
                .unwrap_or_else(|_| path.to_path_buf())
        };

        let mut text = absolute.to_string_lossy().replace('\\', "/");
        if !text.starts_with('/') {
            text.insert(0, '/');
        }

        Self(format!("file://{}", text))
    }

    /// Parse a uri string. Accepts `file:///p`, `file:/p` and bare paths.
    pub fn parse(text: &str) -> PhotoResult<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(PhotoError::InvalidUri("empty uri".into()));
        }

        if let Some((scheme, _)) = trimmed.split_once("://") {
            if !scheme.eq_ignore_ascii_case("file") {
                return Err(PhotoError::InvalidUri(format!("unsupported scheme: {}", trimmed)));
            }
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Filesystem path this uri refers to
    pub fn to_path(&self) -> PathBuf {
        let text = self.0.as_str();
        let rest = match text.get(..FILE_SCHEME.len()) {
            Some(prefix) if prefix.eq_ignore_ascii_case(FILE_SCHEME) => &text[FILE_SCHEME.len()..],
            _ => return PathBuf::from(text),
        };

        // file://host/path and file:///path both carry the path after the authority
        let path = match rest.strip_prefix("//") {
            Some(after) => match after.find('/') {
                Some(idx) => &after[idx..],
                None => after,
            },
            None => rest,
        };

        PathBuf::from(path)
    }
}

impl fmt::Display for PhotoUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<PhotoUri> for String {
    fn from(uri: PhotoUri) -> Self {
        uri.0
    }
}
