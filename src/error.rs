//! Photo Capture - Error Types

use thiserror::Error;

/// Result type for photo capture operations
pub type PhotoResult<T> = Result<T, PhotoError>;

/// Photo capture error types
#[derive(Error, Debug)]
pub enum PhotoError {
    // ═══════════════════════════════════════════════════════════════
    // CAMERA ERRORS
    // ═══════════════════════════════════════════════════════════════

    #[error("Camera unavailable: {0}")]
    CameraUnavailable(String),

    #[error("Camera binding failed: {0}")]
    BindFailed(String),

    #[error("Camera not bound")]
    NotBound,

    // ═══════════════════════════════════════════════════════════════
    // CAPTURE ERRORS
    // ═══════════════════════════════════════════════════════════════

    #[error("Capture failed: {0}")]
    CaptureFailed(String),

    #[error("A capture is already in progress")]
    CaptureInProgress,

    #[error("Capture cancelled before completion")]
    CaptureCancelled,

    // ═══════════════════════════════════════════════════════════════
    // RECORD STORE ERRORS
    // ═══════════════════════════════════════════════════════════════

    #[error("Record document corrupted: {0}")]
    RecordsCorrupted(String),

    #[error("Photo not found in records: {0}")]
    PhotoNotFound(String),

    // ═══════════════════════════════════════════════════════════════
    // FILE ERRORS
    // ═══════════════════════════════════════════════════════════════

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid photo uri: {0}")]
    InvalidUri(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    // ═══════════════════════════════════════════════════════════════
    // EDITOR ERRORS
    // ═══════════════════════════════════════════════════════════════

    #[error("Image decode failed: {0}")]
    DecodeFailed(String),

    #[error("Image encode failed: {0}")]
    EncodeFailed(String),

    #[error("Image processing error: {0}")]
    ImageError(String),

    // ═══════════════════════════════════════════════════════════════
    // CONFIG / SERIALIZATION ERRORS
    // ═══════════════════════════════════════════════════════════════

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl PhotoError {
    /// Camera is absent or permission was denied; the UI shows a fallback state
    pub fn is_capability_unavailable(&self) -> bool {
        matches!(self, PhotoError::CameraUnavailable(_))
    }

    /// Check if the caller may simply retry the operation
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PhotoError::CaptureFailed(_)
                | PhotoError::CaptureCancelled
                | PhotoError::CaptureInProgress
                | PhotoError::EncodeFailed(_)
                | PhotoError::IoError(_)
        )
    }
}

impl From<serde_json::Error> for PhotoError {
    fn from(e: serde_json::Error) -> Self {
        PhotoError::SerializationError(e.to_string())
    }
}

impl From<image::ImageError> for PhotoError {
    fn from(e: image::ImageError) -> Self {
        PhotoError::ImageError(e.to_string())
    }
}
