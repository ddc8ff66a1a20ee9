use geosr::TrainConfig;
use image::{Rgb, RgbImage};
use std::path::Path;

/// Write `count` synthetic textured tiles into train/, val/ and test/.
pub fn write_split_dirs(root: &Path, count: usize, size: u32) {
    for split in ["train", "val", "test"] {
        let dir = root.join(split);
        std::fs::create_dir_all(&dir).unwrap();
        for i in 0..count as u32 {
            let img = RgbImage::from_fn(size, size, |x, y| {
                Rgb([
                    ((x * 29 + y * 7 + i * 41) % 256) as u8,
                    ((x * y + i * 13) % 256) as u8,
                    ((y * 23 + i * 5) % 256) as u8,
                ])
            });
            img.save(dir.join(format!("scene_{i:02}.png"))).unwrap();
        }
    }
}

/// A CPU config small enough to train in well under a second.
#[allow(dead_code)]
pub fn small_config(data_dir: &Path, out_dir: &Path) -> TrainConfig {
    TrainConfig {
        data_dir:       data_dir.display().to_string(),
        out_dir:        out_dir.display().to_string(),
        crop_size:      8,
        upscale_factor: 2,
        base_kernel:    4,
        batch_size:     64,
        testbatch_size: 4,
        n_epochs:       1,
        interval:       1,
        cuda:           false,
        threads:        1,
        ..TrainConfig::default()
    }
}
