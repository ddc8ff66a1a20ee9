// ============================================================
// Layer 4 — Super-Resolution Dataset
// ============================================================
// Builds the three splits and exposes them through Burn's
// Dataset trait. A split only stores where each sample comes
// from (file, crop origin, transform); pixels are decoded and cut
// on demand, so memory stays flat whatever the dataset size and
// reading the same index twice yields exactly the same pair.

use anyhow::{bail, Context, Result};
use burn::data::dataset::Dataset;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::{path::PathBuf, sync::Arc};

use crate::data::{loader::ImageDirectory, preprocessor::TilePreprocessor};
use crate::domain::{
    aug_mode::{AugMode, Transform},
    band_mode::BandMode,
    split::Split,
    traits::ImageSource,
};

/// One (low-res input, high-res target) pair, channel-major.
#[derive(Debug, Clone, PartialEq)]
pub struct SrSample {
    pub channels:    usize,
    /// Side length of the square input tile
    pub input_size:  usize,
    /// Side length of the square target tile
    pub target_size: usize,
    pub input:       Vec<f32>,
    pub target:      Vec<f32>,
}

impl SrSample {
    pub fn input_dims(&self) -> [usize; 3] {
        [self.channels, self.input_size, self.input_size]
    }

    pub fn target_dims(&self) -> [usize; 3] {
        [self.channels, self.target_size, self.target_size]
    }
}

/// Recipe for one sample.
#[derive(Debug, Clone, PartialEq)]
pub struct TileRef {
    pub path:      PathBuf,
    /// Top-left corner of the crop in the source image
    pub origin:    (u32, u32),
    pub transform: Transform,
}

/// An ordered, restartable split. Cloning shares the tile list.
#[derive(Debug, Clone)]
pub struct SrDataset {
    split: Split,
    prep:  TilePreprocessor,
    tiles: Arc<Vec<TileRef>>,
}

impl SrDataset {
    pub fn new(split: Split, prep: TilePreprocessor, tiles: Vec<TileRef>) -> Self {
        Self { split, prep, tiles: Arc::new(tiles) }
    }

    /// Decode and cut sample `index`.
    pub fn load(&self, index: usize) -> Result<SrSample> {
        let tile = self
            .tiles
            .get(index)
            .with_context(|| format!("{} split has no sample {index}", self.split))?;
        let img = image::open(&tile.path)
            .with_context(|| format!("Cannot decode image '{}'", tile.path.display()))?
            .to_rgb8();
        Ok(self.prep.make_pair(&img, tile.origin, tile.transform))
    }
}

impl Dataset<SrSample> for SrDataset {
    fn get(&self, index: usize) -> Option<SrSample> {
        if index >= self.tiles.len() {
            return None;
        }
        match self.load(index) {
            Ok(sample) => Some(sample),
            Err(e) => {
                tracing::error!("{e:#}");
                None
            }
        }
    }

    fn len(&self) -> usize {
        self.tiles.len()
    }
}

// ─── Loader Options ───────────────────────────────────────────────────────────
/// Everything the loader needs to know to build a split.
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    pub band_mode:      BandMode,
    pub data_dir:       PathBuf,
    pub aug:            bool,
    pub aug_mode:       AugMode,
    pub crop_size:      usize,
    pub upscale_factor: usize,
    pub seed:           u64,
}

pub fn get_training_set(opts: &LoaderOptions) -> Result<SrDataset> {
    build_split(opts, Split::Train)
}

pub fn get_val_set(opts: &LoaderOptions) -> Result<SrDataset> {
    build_split(opts, Split::Val)
}

pub fn get_test_set(opts: &LoaderOptions) -> Result<SrDataset> {
    build_split(opts, Split::Test)
}

/// List the crops (and, for the training split, augmentations) of every
/// image. Only image headers are read here.
pub fn build_split(opts: &LoaderOptions, split: Split) -> Result<SrDataset> {
    let source  = ImageDirectory::new(&opts.data_dir, opts.seed);
    let files   = source.list(split)?;
    let prep    = TilePreprocessor::new(opts.band_mode, opts.crop_size, opts.upscale_factor);
    let augment = opts.aug && split == Split::Train;

    let mut tiles = Vec::with_capacity(files.len() * opts.aug_mode.expansion());
    for (index, path) in files.iter().enumerate() {
        let dims = image::image_dimensions(path)
            .with_context(|| format!("Cannot read image '{}'", path.display()))?;

        if !prep.fits(dims) {
            tracing::warn!(
                "Skipping '{}': {}x{} is smaller than crop {}",
                path.display(),
                dims.0,
                dims.1,
                prep.crop(),
            );
            continue;
        }

        let tile = |origin, transform| TileRef { path: path.clone(), origin, transform };

        if !augment {
            tiles.push(tile(prep.centre_origin(dims), Transform::Identity));
            continue;
        }

        match opts.aug_mode.fixed_transforms() {
            Some(transforms) => {
                let origin = prep.centre_origin(dims);
                tiles.extend(transforms.iter().map(|&t| tile(origin, t)));
            }
            None => {
                let mut rng = StdRng::seed_from_u64(sample_seed(opts.seed, index));
                let (max_x, max_y) = prep.max_origin(dims);
                let origin = (rng.gen_range(0..=max_x), rng.gen_range(0..=max_y));
                let t = Transform::DIHEDRAL[rng.gen_range(0..Transform::DIHEDRAL.len())];
                tiles.push(tile(origin, t));
            }
        }
    }

    if tiles.is_empty() {
        bail!(
            "no usable images found for split '{}' under '{}'",
            split,
            opts.data_dir.display()
        );
    }

    tracing::info!("{} split: {} samples from {} images", split, tiles.len(), files.len());
    Ok(SrDataset::new(split, prep, tiles))
}

/// Per-image seed so stochastic augmentation does not depend on
/// how many samples earlier images produced.
fn sample_seed(seed: u64, index: usize) -> u64 {
    seed ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}
