//! Photo Capture - Android JNI Bindings
//!
//! Exposes the record store, gallery and editor to Kotlin via JNI. The
//! camera itself stays on the Kotlin side (CameraX); it asks for a target
//! path and reports saved files back.

#![cfg(feature = "android")]

use jni::JNIEnv;
use jni::objects::{JClass, JString};
use jni::sys::{jboolean, jbyteArray, jint, jstring, JNI_FALSE, JNI_TRUE};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use crate::editor::{codec, EditSession, Transform};
use crate::PhotoCaptureApi;

// Global instances (singletons for Android)
static API: Mutex<Option<PhotoCaptureApi>> = Mutex::new(None);
static EDIT: Mutex<Option<EditSession>> = Mutex::new(None);

/// JPEG quality of editor previews handed to the UI
const PREVIEW_QUALITY: u8 = 85;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn read_string(env: &mut JNIEnv, value: &JString) -> Option<String> {
    env.get_string(value).ok().map(Into::into)
}

fn new_string(env: &mut JNIEnv, value: &str) -> jstring {
    match env.new_string(value) {
        Ok(s) => s.into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

fn to_jboolean(value: bool) -> jboolean {
    if value { JNI_TRUE } else { JNI_FALSE }
}

// ═══════════════════════════════════════════════════════════════════════════
// LIFECYCLE
// ═══════════════════════════════════════════════════════════════════════════

/// Open the store under the app's private files directory
#[no_mangle]
pub extern "system" fn Java_dev_photocapture_NativePhotos_open(
    mut env: JNIEnv,
    _class: JClass,
    root: JString,
) -> jboolean {
    let root = match read_string(&mut env, &root) {
        Some(s) => s,
        None => return JNI_FALSE,
    };

    match PhotoCaptureApi::open_at(PathBuf::from(root)) {
        Ok(api) => {
            *lock(&API) = Some(api);
            JNI_TRUE
        }
        Err(e) => {
            log::error!("Failed to open photo store: {}", e);
            JNI_FALSE
        }
    }
}

/// Close the store and drop any edit session
#[no_mangle]
pub extern "system" fn Java_dev_photocapture_NativePhotos_close(
    _env: JNIEnv,
    _class: JClass,
) {
    *lock(&EDIT) = None;
    if let Some(api) = lock(&API).take() {
        api.close();
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// GALLERY
// ═══════════════════════════════════════════════════════════════════════════

/// Gallery uris as a JSON array
#[no_mangle]
pub extern "system" fn Java_dev_photocapture_NativePhotos_listPhotos(
    mut env: JNIEnv,
    _class: JClass,
) -> jstring {
    let uris = match lock(&API).as_ref() {
        Some(api) => api.gallery().index(),
        None => return std::ptr::null_mut(),
    };

    match serde_json::to_string(&uris) {
        Ok(json) => new_string(&mut env, &json),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Number of photos in the gallery
#[no_mangle]
pub extern "system" fn Java_dev_photocapture_NativePhotos_getPhotoCount(
    _env: JNIEnv,
    _class: JClass,
) -> jint {
    match lock(&API).as_ref() {
        Some(api) => api.gallery().index().len() as jint,
        None => 0,
    }
}

/// Record of one photo as JSON, or null
#[no_mangle]
pub extern "system" fn Java_dev_photocapture_NativePhotos_photoDetails(
    mut env: JNIEnv,
    _class: JClass,
    uri: JString,
) -> jstring {
    let uri = match read_string(&mut env, &uri) {
        Some(s) => s,
        None => return std::ptr::null_mut(),
    };

    let record = match lock(&API).as_ref() {
        Some(api) => api.gallery().details(&uri),
        None => None,
    };

    match record.and_then(|r| serde_json::to_string(&r).ok()) {
        Some(json) => new_string(&mut env, &json),
        None => std::ptr::null_mut(),
    }
}

/// Uri of the most recent capture, or null
#[no_mangle]
pub extern "system" fn Java_dev_photocapture_NativePhotos_lastPhotoUri(
    mut env: JNIEnv,
    _class: JClass,
) -> jstring {
    let last = lock(&API).as_ref().and_then(|api| api.gallery().last_photo_uri());

    match last {
        Some(uri) => new_string(&mut env, &uri),
        None => std::ptr::null_mut(),
    }
}

/// Delete a photo file and its record
#[no_mangle]
pub extern "system" fn Java_dev_photocapture_NativePhotos_deletePhoto(
    mut env: JNIEnv,
    _class: JClass,
    uri: JString,
) -> jboolean {
    let uri = match read_string(&mut env, &uri) {
        Some(s) => s,
        None => return JNI_FALSE,
    };

    match lock(&API).as_ref() {
        Some(api) => to_jboolean(api.gallery().delete(&uri)),
        None => JNI_FALSE,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// CAPTURE
// ═══════════════════════════════════════════════════════════════════════════

/// File path the camera should write the next picture to
#[no_mangle]
pub extern "system" fn Java_dev_photocapture_NativePhotos_nextCapturePath(
    mut env: JNIEnv,
    _class: JClass,
) -> jstring {
    let path = match lock(&API).as_ref() {
        Some(api) => api.next_capture_path(),
        None => return std::ptr::null_mut(),
    };

    match path {
        Ok(path) => new_string(&mut env, &path.to_string_lossy()),
        Err(e) => {
            log::error!("No capture path available: {}", e);
            std::ptr::null_mut()
        }
    }
}

/// Record a picture the camera saved; returns its uri or null
#[no_mangle]
pub extern "system" fn Java_dev_photocapture_NativePhotos_onCaptureSaved(
    mut env: JNIEnv,
    _class: JClass,
    path: JString,
) -> jstring {
    let path = match read_string(&mut env, &path) {
        Some(s) => PathBuf::from(s),
        None => return std::ptr::null_mut(),
    };

    let record = match lock(&API).as_ref() {
        Some(api) => api.on_capture_saved(&path),
        None => return std::ptr::null_mut(),
    };

    match record {
        Ok(record) => new_string(&mut env, &record.uri),
        Err(e) => {
            log::error!("Failed to record capture {}: {}", path.display(), e);
            std::ptr::null_mut()
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// EDITOR
// ═══════════════════════════════════════════════════════════════════════════

/// Start editing a photo, replacing any open edit session
#[no_mangle]
pub extern "system" fn Java_dev_photocapture_NativePhotos_editOpen(
    mut env: JNIEnv,
    _class: JClass,
    uri: JString,
) -> jboolean {
    let uri = match read_string(&mut env, &uri) {
        Some(s) => s,
        None => return JNI_FALSE,
    };

    let session = match lock(&API).as_ref() {
        Some(api) => api.edit(&uri),
        None => return JNI_FALSE,
    };

    match session {
        Ok(session) => {
            *lock(&EDIT) = Some(session);
            JNI_TRUE
        }
        Err(e) => {
            log::error!("Failed to open {} for editing: {}", uri, e);
            JNI_FALSE
        }
    }
}

fn edit_apply(transform: Transform) -> jboolean {
    match lock(&EDIT).as_mut() {
        Some(session) => {
            session.apply(transform);
            JNI_TRUE
        }
        None => JNI_FALSE,
    }
}

#[no_mangle]
pub extern "system" fn Java_dev_photocapture_NativePhotos_editRotate(
    _env: JNIEnv,
    _class: JClass,
) -> jboolean {
    edit_apply(Transform::RotateRight)
}

#[no_mangle]
pub extern "system" fn Java_dev_photocapture_NativePhotos_editFlip(
    _env: JNIEnv,
    _class: JClass,
) -> jboolean {
    edit_apply(Transform::FlipHorizontal)
}

/// Undo one edit; false when already at the original image
#[no_mangle]
pub extern "system" fn Java_dev_photocapture_NativePhotos_editUndo(
    _env: JNIEnv,
    _class: JClass,
) -> jboolean {
    match lock(&EDIT).as_mut() {
        Some(session) => {
            let moved = session.can_undo();
            session.undo();
            to_jboolean(moved)
        }
        None => JNI_FALSE,
    }
}

/// Redo one edit; false when there is nothing to redo
#[no_mangle]
pub extern "system" fn Java_dev_photocapture_NativePhotos_editRedo(
    _env: JNIEnv,
    _class: JClass,
) -> jboolean {
    match lock(&EDIT).as_mut() {
        Some(session) => to_jboolean(session.redo().is_some()),
        None => JNI_FALSE,
    }
}

/// Whether closing the editor now would discard edits
#[no_mangle]
pub extern "system" fn Java_dev_photocapture_NativePhotos_editHasChanges(
    _env: JNIEnv,
    _class: JClass,
) -> jboolean {
    match lock(&EDIT).as_ref() {
        Some(session) => to_jboolean(session.has_changes()),
        None => JNI_FALSE,
    }
}

/// Current edited image as JPEG bytes for display
#[no_mangle]
pub extern "system" fn Java_dev_photocapture_NativePhotos_editPreview(
    mut env: JNIEnv,
    _class: JClass,
) -> jbyteArray {
    let data = match lock(&EDIT).as_ref() {
        Some(session) => codec::encode_jpeg(session.current(), PREVIEW_QUALITY),
        None => return std::ptr::null_mut(),
    };

    match data {
        Ok(data) => match env.byte_array_from_slice(&data) {
            Ok(arr) => arr.into_raw(),
            Err(_) => std::ptr::null_mut(),
        },
        Err(e) => {
            log::error!("Preview encode failed: {}", e);
            std::ptr::null_mut()
        }
    }
}

/// Write the current image over the original file
#[no_mangle]
pub extern "system" fn Java_dev_photocapture_NativePhotos_editCommit(
    _env: JNIEnv,
    _class: JClass,
) -> jboolean {
    match lock(&EDIT).as_ref() {
        Some(session) => to_jboolean(session.commit()),
        None => JNI_FALSE,
    }
}

/// Discard the edit session
#[no_mangle]
pub extern "system" fn Java_dev_photocapture_NativePhotos_editClose(
    _env: JNIEnv,
    _class: JClass,
) {
    *lock(&EDIT) = None;
}
