//! Photo Capture - Media Filesystem Operations
//!
//! Plain file I/O for the record document and image files. Writes go through
//! a temp file and a rename so a reader never sees a half-written document.

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{PhotoError, PhotoResult};

/// Image extensions recognised when scanning the pictures directory
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Write `data` to `path` atomically
pub fn write_atomic(path: &Path, data: &[u8]) -> PhotoResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = temp_path_for(path);

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)?;

    file.write_all(data)?;
    file.sync_all()?;
    drop(file);

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }

    Ok(())
}

/// Read a whole file
pub fn read_file(path: &Path) -> PhotoResult<Vec<u8>> {
    if !path.exists() {
        return Err(PhotoError::FileNotFound(path.display().to_string()));
    }

    let mut file = File::open(path)?;
    let mut data = Vec::new();
    file.read_to_end(&mut data)?;

    Ok(data)
}

/// Delete a file. Missing files are an error.
pub fn delete_file(path: &Path) -> PhotoResult<()> {
    if !path.is_file() {
        return Err(PhotoError::FileNotFound(path.display().to_string()));
    }

    fs::remove_file(path)?;
    Ok(())
}

/// File size in bytes
pub fn file_size(path: &Path) -> PhotoResult<u64> {
    let metadata = fs::metadata(path)
        .map_err(|_| PhotoError::FileNotFound(path.display().to_string()))?;
    Ok(metadata.len())
}

/// Image files directly inside `dir`, sorted by name
pub fn list_images(dir: &Path) -> PhotoResult<Vec<PathBuf>> {
    let mut files = Vec::new();

    if !dir.exists() {
        return Ok(files);
    }

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| PhotoError::IoError(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let is_image = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| IMAGE_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
            .unwrap_or(false);

        if is_image {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
