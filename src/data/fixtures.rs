// Synthetic imagery shared by the unit tests of the data and ml layers.

use image::{Rgb, RgbImage};
use std::path::Path;

use crate::data::dataset::LoaderOptions;
use crate::domain::{aug_mode::AugMode, band_mode::BandMode, split::Split};

/// Write `count` small textured images into each split folder.
pub fn write_split_dirs(root: &Path, count: usize, size: u32) {
    for split in Split::ALL {
        let dir = root.join(split.name());
        std::fs::create_dir_all(&dir).unwrap();
        for i in 0..count {
            let img = RgbImage::from_fn(size, size, |x, y| {
                Rgb([
                    ((x * 13 + i as u32 * 31) % 256) as u8,
                    ((y * 11 + x * 3) % 256) as u8,
                    ((x + y + i as u32 * 17) % 256) as u8,
                ])
            });
            img.save(dir.join(format!("tile_{i:02}.png"))).unwrap();
        }
    }
}

/// Y band, crop 8, factor 2, no augmentation.
pub fn loader_options(root: &Path) -> LoaderOptions {
    LoaderOptions {
        band_mode:      BandMode::Y,
        data_dir:       root.to_path_buf(),
        aug:            false,
        aug_mode:       AugMode::C,
        crop_size:      8,
        upscale_factor: 2,
        seed:           123,
    }
}
