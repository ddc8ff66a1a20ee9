// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores model weights using Burn's CompactRecorder
// (named MessagePack, half precision), next to the JSON run
// configuration that describes the architecture.
//
//   <run_dir>/
//     model.mpk           ← final weights
//     train_config.json   ← everything needed to rebuild the model
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{Context, Result};
use burn::{
    prelude::*,
    record::{CompactRecorder, FileRecorder, Recorder},
};
use std::{
    fs,
    path::PathBuf,
};

use crate::application::train_use_case::TrainConfig;
use crate::ml::model::Espcn;

const MODEL_STEM:  &str = "model";
const CONFIG_FILE: &str = "train_config.json";

pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    /// Does not touch the filesystem; directories are created on save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the weights file as written by the recorder.
    pub fn model_path<B: Backend>(&self) -> PathBuf {
        self.dir
            .join(MODEL_STEM)
            .with_extension(<CompactRecorder as FileRecorder<B>>::file_extension())
    }

    pub fn save_model<B: Backend>(&self, model: &Espcn<B>) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;

        // Without extension; the recorder appends its own
        let path = self.dir.join(MODEL_STEM);
        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| format!("Failed to save checkpoint to '{}'", path.display()))?;

        let written = self.model_path::<B>();
        tracing::debug!("Saved checkpoint: '{}'", written.display());
        Ok(written)
    }

    /// Restore weights into `model`, which must have the saved architecture.
    pub fn load_model<B: Backend>(&self, model: Espcn<B>, device: &B::Device) -> Result<Espcn<B>> {
        let record = CompactRecorder::new()
            .load(self.dir.join(MODEL_STEM), device)
            .with_context(|| {
                format!(
                    "Cannot load checkpoint '{}'. Have you trained the model first?",
                    self.model_path::<B>().display()
                )
            })?;
        Ok(model.load_record(record))
    }

    pub fn save_config(&self, cfg: &TrainConfig) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;
        let path = self.dir.join(CONFIG_FILE);
        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;
        tracing::debug!("Saved training config to '{}'", path.display());
        Ok(())
    }

    pub fn load_config(&self) -> Result<TrainConfig> {
        let path = self.dir.join(CONFIG_FILE);
        let json = fs::read_to_string(&path).with_context(|| {
            format!(
                "Cannot read config from '{}'. Make sure you have run 'train' before 'eval'.",
                path.display()
            )
        })?;
        Ok(serde_json::from_str(&json)?)
    }
}
