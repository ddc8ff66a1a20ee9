// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Persistence for a run:
//
//   checkpoint.rs — model weights (CompactRecorder) + run config JSON
//   metrics.rs    — run log: validation rows (CSV), split results (JSON)
//   plot.rs       — learning-curve PNG

/// Model checkpoint saving and loading
pub mod checkpoint;

/// Training metrics log
pub mod metrics;

/// Learning-curve rendering
pub mod plot;
