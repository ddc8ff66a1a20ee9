// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================

use anyhow::Result;
use std::path::PathBuf;

use crate::domain::split::Split;

// ─── ImageSource ──────────────────────────────────────────────────────────────
/// Anything that can list the image files belonging to a split.
///
/// Implementations:
///   - ImageDirectory → a directory with train/val/test subfolders,
///                      or one flat folder partitioned by seed
pub trait ImageSource {
    /// Image paths for `split`, in a stable order.
    fn list(&self, split: Split) -> Result<Vec<PathBuf>>;
}

// ─── MetricSink ───────────────────────────────────────────────────────────────
/// Anything that can persist the state of a run to disk.
///
/// Implementations:
///   - RunLog → log.csv + eval.json
pub trait MetricSink {
    fn flush(&self) -> Result<()>;
}
