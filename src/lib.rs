//! # Photo Capture
//!
//! Capture, browse and lightly edit photos on a handheld device.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      PHOTO CAPTURE                        │
//! │  ┌─────────────┐   on save   ┌──────────────────────────┐ │
//! │  │  CAPTURE    │ ──────────▶ │  PHOTO RECORD STORE      │ │
//! │  │  SESSION    │             │  photos_list.json        │ │
//! │  └─────────────┘             └────────────┬─────────────┘ │
//! │         ▲                        on read  │   ▲ on commit │
//! │   CameraBackend                           ▼   │           │
//! │  (platform camera)   ┌─────────────┐   ┌──────┴─────────┐ │
//! │                      │  GALLERY    │──▶│  EDIT SESSION  │ │
//! │                      │  INDEX      │   │  undo / redo   │ │
//! │                      └─────────────┘   └────────────────┘ │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Threading
//!
//! Everything runs on the caller's thread. Camera completions arrive
//! through a single-slot channel polled (or awaited) by the capture
//! session; the record document is guarded by one in-process mutex.

pub mod api;
pub mod capture;
pub mod config;
pub mod editor;
pub mod error;
pub mod gallery;
pub mod media_fs;
pub mod records;
pub mod uri;

#[cfg(feature = "android")]
pub mod android;

pub use api::PhotoCaptureApi;
pub use capture::{CameraBackend, CaptureSession, LensFacing, StillFileCamera};
pub use config::AppConfig;
pub use editor::{EditSession, Transform};
pub use error::{PhotoError, PhotoResult};
pub use gallery::{Gallery, ReconcileReport};
pub use records::{PhotoRecord, PhotoRecordStore};
pub use uri::PhotoUri;

/// Photo Capture version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
