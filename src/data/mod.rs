// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from image files on disk to tensor batches.
//
//   data_dir/
//       │
//       ▼
//   ImageDirectory    → lists image files per split
//       │
//       ▼
//   TilePreprocessor  → crop, augment, downsample, band conversion
//       │
//       ▼
//   SrDataset         → per-sample recipes; implements Burn's Dataset
//       │
//       ▼
//   SrLoader          → decodes each batch on a rayon pool, in order
//       │
//       ▼
//   SrBatcher         → stacks samples into [N, C, H, W] tensors
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Finds image files and assigns them to train/val/test
pub mod loader;

/// Seeded three-way partitioning of a flat file list
pub mod splitter;

/// Geometric transforms used by the augmentation modes
pub mod augment;

/// Turns one decoded image into a (low-res, high-res) tensor pair
pub mod preprocessor;

/// Implements Burn's Dataset trait for super-resolution pairs
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Seed-ordered batch iteration with parallel decoding
pub mod batch_iter;

#[cfg(test)]
pub(crate) mod fixtures;
