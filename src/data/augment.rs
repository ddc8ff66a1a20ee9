// ============================================================
// Layer 4 — Geometric Augmentation
// ============================================================
// Applies one of the square symmetries from the domain layer to a
// decoded tile. Flips and quarter turns never resample pixels, so
// augmented targets stay exact.

use image::{imageops, RgbImage};

use crate::domain::aug_mode::Transform;

pub fn apply(img: &RgbImage, transform: Transform) -> RgbImage {
    match transform {
        Transform::Identity => img.clone(),
        Transform::FlipH => imageops::flip_horizontal(img),
        Transform::FlipV => imageops::flip_vertical(img),
        Transform::Rot90 => imageops::rotate90(img),
        Transform::Rot180 => imageops::rotate180(img),
        Transform::Rot270 => imageops::rotate270(img),
        Transform::FlipHRot90 => imageops::rotate90(&imageops::flip_horizontal(img)),
        Transform::FlipHRot180 => imageops::rotate180(&imageops::flip_horizontal(img)),
        Transform::FlipHRot270 => imageops::rotate270(&imageops::flip_horizontal(img)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn marked() -> RgbImage {
        // 2x2 image with a single red pixel in the top-left corner
        let mut img = RgbImage::new(2, 2);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img
    }

    #[test]
    fn test_flips_move_the_corner() {
        assert_eq!(apply(&marked(), Transform::FlipH).get_pixel(1, 0), &Rgb([255, 0, 0]));
        assert_eq!(apply(&marked(), Transform::FlipV).get_pixel(0, 1), &Rgb([255, 0, 0]));
    }

    #[test]
    fn test_rot90_is_clockwise() {
        assert_eq!(apply(&marked(), Transform::Rot90).get_pixel(1, 0), &Rgb([255, 0, 0]));
    }

    #[test]
    fn test_dihedral_images_are_distinct() {
        let mut seen: Vec<Vec<u8>> = Vec::new();
        let mut img = RgbImage::new(3, 3);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(1, 0, Rgb([0, 255, 0]));
        for t in Transform::DIHEDRAL {
            let raw = apply(&img, t).into_raw();
            assert!(!seen.contains(&raw), "{t:?} duplicates another transform");
            seen.push(raw);
        }
    }
}
