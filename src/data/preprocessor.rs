// ============================================================
// Layer 4 — Tile Preprocessor
// ============================================================
// Turns one decoded image into a (low-res input, high-res target)
// pair:
//
//   1. Crop a square tile of the valid crop size
//   2. Apply the augmentation transform (if any)
//   3. Downsample the tile by the upscale factor → input
//   4. Project both tiles into the band mode's channels, CHW order
//
// The valid crop size is the largest multiple of the upscale
// factor not exceeding the requested crop, so the target is always
// exactly `factor ×` the input on both axes.

use image::{imageops, imageops::FilterType, RgbImage};

use crate::data::{augment, dataset::SrSample};
use crate::domain::{aug_mode::Transform, band_mode::BandMode};

/// Largest multiple of `factor` not exceeding `crop`.
pub fn valid_crop_size(crop: usize, factor: usize) -> usize {
    crop - crop % factor.max(1)
}

#[derive(Debug, Clone, Copy)]
pub struct TilePreprocessor {
    band:   BandMode,
    crop:   u32,
    factor: u32,
}

impl TilePreprocessor {
    pub fn new(band: BandMode, crop_size: usize, upscale_factor: usize) -> Self {
        let crop = valid_crop_size(crop_size, upscale_factor) as u32;
        Self { band, crop, factor: upscale_factor.max(1) as u32 }
    }

    /// Side length of every target tile.
    pub fn crop(&self) -> u32 {
        self.crop
    }

    /// Whether an image of `(width, height)` is large enough to yield a tile.
    pub fn fits(&self, (width, height): (u32, u32)) -> bool {
        self.crop > 0 && width >= self.crop && height >= self.crop
    }

    /// Top-left corner of the centred crop.
    pub fn centre_origin(&self, (width, height): (u32, u32)) -> (u32, u32) {
        ((width - self.crop) / 2, (height - self.crop) / 2)
    }

    /// Largest valid crop origin on each axis (inclusive).
    pub fn max_origin(&self, (width, height): (u32, u32)) -> (u32, u32) {
        (width - self.crop, height - self.crop)
    }

    /// Build one training pair. The caller must have checked `fits`.
    pub fn make_pair(&self, img: &RgbImage, origin: (u32, u32), transform: Transform) -> SrSample {
        let tile   = imageops::crop_imm(img, origin.0, origin.1, self.crop, self.crop).to_image();
        let target = augment::apply(&tile, transform);

        let low  = self.crop / self.factor;
        let input = if self.factor == 1 {
            target.clone()
        } else {
            imageops::resize(&target, low, low, FilterType::CatmullRom)
        };

        SrSample {
            channels:    self.band.channels(),
            input_size:  low as usize,
            target_size: self.crop as usize,
            input:       to_chw(&input, self.band),
            target:      to_chw(&target, self.band),
        }
    }
}

/// Flatten an RGB image into channel-major floats for `band`.
pub fn to_chw(img: &RgbImage, band: BandMode) -> Vec<f32> {
    let channels = band.channels();
    let plane    = (img.width() * img.height()) as usize;
    let mut out  = vec![0.0f32; channels * plane];

    for (i, px) in img.pixels().enumerate() {
        let values = band.project(px.0);
        for (c, v) in values.iter().take(channels).enumerate() {
            out[c * plane + i] = *v;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn gradient(w: u32, h: u32) -> RgbImage {
        RgbImage::from_fn(w, h, |x, y| Rgb([(x * 7 % 256) as u8, (y * 5 % 256) as u8, 90]))
    }

    #[test]
    fn test_valid_crop_size() {
        assert_eq!(valid_crop_size(224, 2), 224);
        assert_eq!(valid_crop_size(225, 2), 224);
        assert_eq!(valid_crop_size(100, 3), 99);
    }

    #[test]
    fn test_target_is_factor_times_input() {
        for factor in [1usize, 2, 3, 4] {
            let prep = TilePreprocessor::new(BandMode::Y, 24, factor);
            let img  = gradient(40, 32);
            let pair = prep.make_pair(&img, prep.centre_origin(img.dimensions()), Transform::Identity);
            assert_eq!(pair.target_size, pair.input_size * factor);
            assert_eq!(pair.input.len(),  pair.input_size * pair.input_size);
            assert_eq!(pair.target.len(), pair.target_size * pair.target_size);
        }
    }

    #[test]
    fn test_band_mode_changes_channel_dimension() {
        let img = gradient(16, 16);
        let y   = TilePreprocessor::new(BandMode::Y, 8, 2);
        let rgb = TilePreprocessor::new(BandMode::Rgb, 8, 2);
        let py  = y.make_pair(&img, (0, 0), Transform::Identity);
        let prgb = rgb.make_pair(&img, (0, 0), Transform::Identity);
        assert_eq!(py.channels, 1);
        assert_eq!(prgb.channels, 3);
        assert_eq!(prgb.target.len(), 3 * py.target.len());
    }

    #[test]
    fn test_small_images_do_not_fit() {
        let prep = TilePreprocessor::new(BandMode::Y, 32, 2);
        assert!(!prep.fits((31, 64)));
        assert!(prep.fits((32, 32)));
    }

    #[test]
    fn test_chw_layout() {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(1, 0, Rgb([0, 0, 255]));
        let chw = to_chw(&img, BandMode::Rgb);
        // R plane, then G plane, then B plane
        assert_eq!(chw, vec![1.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
    }
}
