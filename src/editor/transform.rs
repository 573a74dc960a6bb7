//! Photo Capture - Bitmap Transforms

use image::DynamicImage;
use serde::{Deserialize, Serialize};

/// A whole-image geometric transform. Each produces a new buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    /// 90° clockwise
    RotateRight,
    /// 180°
    Rotate180,
    /// 90° counter-clockwise (270° clockwise)
    RotateLeft,
    /// Mirror left to right
    FlipHorizontal,
}

impl Transform {
    pub fn apply(self, image: &DynamicImage) -> DynamicImage {
        match self {
            Transform::RotateRight => image.rotate90(),
            Transform::Rotate180 => image.rotate180(),
            Transform::RotateLeft => image.rotate270(),
            Transform::FlipHorizontal => image.fliph(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba, RgbaImage};

    /// 2x2 image with a distinct color per pixel
    fn quad() -> DynamicImage {
        let mut img = RgbaImage::new(2, 2);
        img.put_pixel(0, 0, Rgba([1, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([2, 0, 0, 255]));
        img.put_pixel(0, 1, Rgba([3, 0, 0, 255]));
        img.put_pixel(1, 1, Rgba([4, 0, 0, 255]));
        DynamicImage::ImageRgba8(img)
    }

    fn red(img: &DynamicImage, x: u32, y: u32) -> u8 {
        img.get_pixel(x, y).0[0]
    }

    #[test]
    fn test_rotate_right() {
        let rotated = Transform::RotateRight.apply(&quad());
        // Left column (1 over 3) becomes the top row, read right to left
        assert_eq!(red(&rotated, 0, 0), 3);
        assert_eq!(red(&rotated, 1, 0), 1);
        assert_eq!(red(&rotated, 0, 1), 4);
        assert_eq!(red(&rotated, 1, 1), 2);
    }

    #[test]
    fn test_rotate_swaps_dimensions() {
        let img = DynamicImage::new_rgb8(3, 2);
        assert_eq!(Transform::RotateRight.apply(&img).dimensions(), (2, 3));
        assert_eq!(Transform::RotateLeft.apply(&img).dimensions(), (2, 3));
        assert_eq!(Transform::Rotate180.apply(&img).dimensions(), (3, 2));
        assert_eq!(Transform::FlipHorizontal.apply(&img).dimensions(), (3, 2));
    }

    #[test]
    fn test_flip_reverses_columns() {
        let flipped = Transform::FlipHorizontal.apply(&quad());
        assert_eq!(red(&flipped, 0, 0), 2);
        assert_eq!(red(&flipped, 1, 0), 1);
        assert_eq!(red(&flipped, 0, 1), 4);
        assert_eq!(red(&flipped, 1, 1), 3);
    }

    #[test]
    fn test_inverse_pairs() {
        let img = quad();
        let back = Transform::RotateLeft.apply(&Transform::RotateRight.apply(&img));
        assert_eq!(back, img);

        let back = Transform::FlipHorizontal.apply(&Transform::FlipHorizontal.apply(&img));
        assert_eq!(back, img);
    }
}
