// ============================================================
// Layer 2 — EvalUseCase
// ============================================================
// Re-evaluates a finished run:
//
//   Step 1: Read train_config.json from the run directory
//   Step 2: Pick the device (same rules as training)
//   Step 3: Rebuild the model and load the checkpoint
//   Step 4: Rebuild train / val / test without augmentation
//   Step 5: Evaluate each split and print one line per split

use anyhow::Result;
use burn::tensor::backend::Backend;
use std::path::PathBuf;

use crate::data::dataset::build_split;
use crate::domain::{
    device::ComputeDevice,
    split::Split,
};
use crate::infra::{checkpoint::CheckpointManager, metrics::EvalResult};
use crate::ml::{accelerator_available, model::Espcn, trainer::evaluate, CpuBackend};

use super::train_use_case::TrainConfig;

pub struct EvalUseCase {
    run_dir:  PathBuf,
    cuda:     bool,
    data_dir: Option<String>,
}

impl EvalUseCase {
    pub fn new(run_dir: impl Into<PathBuf>, cuda: bool, data_dir: Option<String>) -> Self {
        Self { run_dir: run_dir.into(), cuda, data_dir }
    }

    pub fn execute(&self) -> Result<Vec<EvalResult>> {
        let ckpt    = CheckpointManager::new(&self.run_dir);
        let mut cfg = ckpt.load_config()?;
        if let Some(dir) = &self.data_dir {
            cfg.data_dir = dir.clone();
        }
        cfg.aug = false;

        match ComputeDevice::select(self.cuda, accelerator_available)? {
            ComputeDevice::Cpu => self.run::<CpuBackend>(&cfg, &ckpt, &Default::default()),
            ComputeDevice::Accelerator => self.run_accelerated(&cfg, &ckpt),
        }
    }

    #[cfg(feature = "wgpu")]
    fn run_accelerated(&self, cfg: &TrainConfig, ckpt: &CheckpointManager) -> Result<Vec<EvalResult>> {
        self.run::<crate::ml::AcceleratorBackend>(cfg, ckpt, &Default::default())
    }

    #[cfg(not(feature = "wgpu"))]
    fn run_accelerated(&self, _cfg: &TrainConfig, _ckpt: &CheckpointManager) -> Result<Vec<EvalResult>> {
        Err(crate::domain::error::ConfigError::AcceleratorUnavailable.into())
    }

    fn run<B: Backend>(
        &self,
        cfg:    &TrainConfig,
        ckpt:   &CheckpointManager,
        device: &B::Device,
    ) -> Result<Vec<EvalResult>> {
        let model: Espcn<B> = cfg.model_config().init(device);
        let model = ckpt.load_model(model, device)?;
        tracing::info!("Model loaded from '{}'", ckpt.model_path::<B>().display());

        let opts = cfg.loader_options();
        let mut results = Vec::with_capacity(Split::ALL.len());
        for split in Split::ALL {
            let dataset = build_split(&opts, split)?;
            let result  = evaluate(
                &model,
                &dataset,
                split.name(),
                cfg.testbatch_size,
                cfg.threads,
                device,
            )?;
            println!(
                "{:<5} | loss={:.6} | psnr={:.3} dB | ssim={:.4} | samples={}",
                result.name, result.loss, result.psnr, result.ssim, result.samples,
            );
            results.push(result);
        }
        Ok(results)
    }
}
