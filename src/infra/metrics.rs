// ============================================================
// Layer 6 — Run Log
// ============================================================
// Accumulates the metrics of one training run.
//
//   entries  one row per validation trigger point → log.csv
//   results  one record per evaluated split      → eval.json
//
// Example log.csv:
//   epoch,iteration,train_loss,val_loss,val_psnr,val_ssim
//   2,38,0.012345,0.011002,19.585000,0.612000
//   4,76,0.008100,0.007950,21.000000,0.701000

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use crate::domain::traits::MetricSink;

const CSV_HEADER: &str = "epoch,iteration,train_loss,val_loss,val_psnr,val_ssim";

/// Metrics recorded at one validation trigger point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub epoch:      usize,
    pub iteration:  usize,
    /// Mean training loss since the previous entry
    pub train_loss: f64,
    pub val_loss:   f64,
    pub val_psnr:   f64,
    pub val_ssim:   f64,
}

/// Averaged metrics of one model over one split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalResult {
    pub name:    String,
    pub loss:    f64,
    pub psnr:    f64,
    pub ssim:    f64,
    pub samples: usize,
}

pub struct RunLog {
    csv_path:  PathBuf,
    json_path: PathBuf,
    entries:   Vec<LogEntry>,
    results:   Vec<EvalResult>,
}

impl RunLog {
    pub fn new(dir: &Path) -> Self {
        Self {
            csv_path:  dir.join("log.csv"),
            json_path: dir.join("eval.json"),
            entries:   Vec::new(),
            results:   Vec::new(),
        }
    }

    pub fn push(&mut self, entry: LogEntry) {
        tracing::debug!(
            "Logged epoch {} iter {}: train_loss={:.6}, val_loss={:.6}",
            entry.epoch,
            entry.iteration,
            entry.train_loss,
            entry.val_loss,
        );
        self.entries.push(entry);
    }

    /// Store an evaluation, replacing an earlier one with the same name.
    pub fn record(&mut self, result: EvalResult) {
        match self.results.iter_mut().find(|r| r.name == result.name) {
            Some(slot) => *slot = result,
            None => self.results.push(result),
        }
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn results(&self) -> &[EvalResult] {
        &self.results
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }

    pub fn write_csv(&self) -> Result<()> {
        let mut f = fs::File::create(&self.csv_path)
            .with_context(|| format!("Cannot create '{}'", self.csv_path.display()))?;
        writeln!(f, "{CSV_HEADER}")?;
        for e in &self.entries {
            writeln!(
                f,
                "{},{},{:.6},{:.6},{:.6},{:.6}",
                e.epoch, e.iteration, e.train_loss, e.val_loss, e.val_psnr, e.val_ssim,
            )?;
        }
        Ok(())
    }

    pub fn write_results(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.results)?;
        fs::write(&self.json_path, json)
            .with_context(|| format!("Cannot write '{}'", self.json_path.display()))?;
        Ok(())
    }
}

impl MetricSink for RunLog {
    fn flush(&self) -> Result<()> {
        self.write_csv()?;
        self.write_results()
    }
}

// ─── Running Loss ─────────────────────────────────────────────────────────────
/// Mean of the batch losses seen since the last `take`.
#[derive(Debug, Default)]
pub struct RunningLoss {
    sum:   f64,
    count: usize,
}

impl RunningLoss {
    pub fn push(&mut self, loss: f64) {
        self.sum   += loss;
        self.count += 1;
    }

    /// Return the mean and reset. NaN when nothing was pushed.
    pub fn take(&mut self) -> f64 {
        let mean = if self.count > 0 { self.sum / self.count as f64 } else { f64::NAN };
        *self = Self::default();
        mean
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn entry(epoch: usize) -> LogEntry {
        LogEntry {
            epoch,
            iteration:  epoch * 10,
            train_loss: 0.5,
            val_loss:   0.25,
            val_psnr:   20.0,
            val_ssim:   0.5,
        }
    }

    fn result(name: &str, psnr: f64) -> EvalResult {
        EvalResult { name: name.to_string(), loss: 0.1, psnr, ssim: 0.9, samples: 4 }
    }

    #[test]
    fn test_csv_has_one_row_per_entry() {
        let tmp = tempfile::tempdir().unwrap();
        let mut log = RunLog::new(tmp.path());
        log.push(entry(2));
        log.push(entry(4));
        log.write_csv().unwrap();

        let text = fs::read_to_string(log.csv_path()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("2,20,0.500000"));
    }

    #[test]
    fn test_record_replaces_same_name() {
        let tmp = tempfile::tempdir().unwrap();
        let mut log = RunLog::new(tmp.path());
        log.record(result("val", 20.0));
        log.record(result("test", 18.0));
        log.record(result("val", 22.0));
        assert_eq!(log.results().len(), 2);
        assert_eq!(log.results()[0], result("val", 22.0));
    }

    #[test]
    fn test_flush_writes_both_files() {
        let tmp = tempfile::tempdir().unwrap();
        let mut log = RunLog::new(tmp.path());
        log.record(result("train", 25.0));
        log.flush().unwrap();
        assert!(log.csv_path().exists());
        let saved: Vec<EvalResult> =
            serde_json::from_str(&fs::read_to_string(tmp.path().join("eval.json")).unwrap()).unwrap();
        assert_eq!(saved, vec![result("train", 25.0)]);
    }

    #[test]
    fn test_running_loss_resets() {
        let mut r = RunningLoss::default();
        r.push(1.0);
        r.push(3.0);
        assert_eq!(r.take(), 2.0);
        assert!(r.take().is_nan());
    }
}
