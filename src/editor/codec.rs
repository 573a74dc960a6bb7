//! Photo Capture - Image Codec
//!
//! Decoding with orientation correction, and JPEG encoding for commits and
//! captures.

use std::io::Cursor;
use std::path::Path;
use image::codecs::jpeg::JpegEncoder;
use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageReader};

use super::transform::Transform;
use crate::error::{PhotoError, PhotoResult};
use crate::media_fs;

/// Corrective rotation for an orientation tag. Only pure rotations are
/// corrected; mirrored orientations are left as decoded.
pub fn orientation_correction(orientation: Orientation) -> Option<Transform> {
    match orientation {
        Orientation::Rotate90 => Some(Transform::RotateRight),
        Orientation::Rotate180 => Some(Transform::Rotate180),
        Orientation::Rotate270 => Some(Transform::RotateLeft),
        _ => None,
    }
}

/// Decode an image file and apply its orientation correction once
pub fn decode_oriented(path: &Path) -> PhotoResult<DynamicImage> {
    if !path.is_file() {
        return Err(PhotoError::FileNotFound(path.display().to_string()));
    }

    let decode_err =
        |e: image::ImageError| PhotoError::DecodeFailed(format!("{}: {}", path.display(), e));

    let mut decoder = ImageReader::open(path)?
        .with_guessed_format()?
        .into_decoder()
        .map_err(decode_err)?;

    let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);
    let image = DynamicImage::from_decoder(decoder).map_err(decode_err)?;

    Ok(match orientation_correction(orientation) {
        Some(correction) => {
            log::debug!("Correcting orientation of {} ({:?})", path.display(), orientation);
            correction.apply(&image)
        }
        None => image,
    })
}

/// Encode as baseline JPEG
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> PhotoResult<Vec<u8>> {
    let mut output = Vec::new();
    let encoder = JpegEncoder::new_with_quality(Cursor::new(&mut output), quality);

    // JPEG carries no alpha channel
    DynamicImage::ImageRgb8(image.to_rgb8())
        .write_with_encoder(encoder)
        .map_err(|e| PhotoError::EncodeFailed(e.to_string()))?;

    Ok(output)
}

/// Encode as JPEG and atomically replace the file at `path`
pub fn save_jpeg(image: &DynamicImage, path: &Path, quality: u8) -> PhotoResult<()> {
    let data = encode_jpeg(image, quality)?;
    media_fs::write_atomic(path, &data)
        .map_err(|e| PhotoError::EncodeFailed(format!("{}: {}", path.display(), e)))
}
