// ============================================================
// Layer 4 — Image Directory
// ============================================================
// Lists the image files each split reads.
//
// Two layouts are accepted:
//
//   data_dir/train/*.png        data_dir/*.png
//   data_dir/val/*.png    or    (one flat folder, partitioned
//   data_dir/test/*.png          60/20/20 with the run seed)
//
// Files are sorted by path before anything else touches them so
// the listing does not depend on read_dir order.

use anyhow::{bail, Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::data::splitter::{split_three_way, TRAIN_FRACTION, VAL_FRACTION};
use crate::domain::split::Split;
use crate::domain::traits::ImageSource;

const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "tif", "tiff", "bmp"];

/// A directory of source imagery.
pub struct ImageDirectory {
    root: PathBuf,
    seed: u64,
}

impl ImageDirectory {
    pub fn new(root: impl Into<PathBuf>, seed: u64) -> Self {
        Self { root: root.into(), seed }
    }

    /// True when the root holds one subdirectory per split.
    pub fn has_split_folders(&self) -> bool {
        Split::ALL.iter().all(|s| self.root.join(s.name()).is_dir())
    }
}

impl ImageSource for ImageDirectory {
    fn list(&self, split: Split) -> Result<Vec<PathBuf>> {
        if !self.root.is_dir() {
            bail!("Data directory '{}' does not exist", self.root.display());
        }

        if self.has_split_folders() {
            return list_images(&self.root.join(split.name()));
        }

        let all = list_images(&self.root)?;
        let (train, val, test) = split_three_way(all, TRAIN_FRACTION, VAL_FRACTION, self.seed);
        let mut files = match split {
            Split::Train => train,
            Split::Val => val,
            Split::Test => test,
        };
        // Keep per-split order stable regardless of the shuffle
        files.sort();
        Ok(files)
    }
}

/// Sorted image files directly inside `dir` (not recursive).
fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)
        .with_context(|| format!("Cannot read directory '{}'", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() && is_image(&path) {
            files.push(path);
        }
    }
    files.sort();
    tracing::debug!("Found {} images in '{}'", files.len(), dir.display());
    Ok(files)
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
