// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates a full training run, strictly in this order:
//
//   Step 1: Validate config, pick the device   (Layer 3 - domain)
//   Step 2: Seed backend + host RNGs
//   Step 3: Build train / val / test splits     (Layer 4 - data)
//   Step 4: Build ESPCN + Adam optimiser        (Layer 5 - ml)
//   Step 5: Train, validating at trigger points (Layer 5 - ml)
//   Step 6: Save the metrics log                (Layer 6 - infra)
//   Step 7: Render the learning curve           (Layer 6 - infra)
//   Step 8: Evaluate on train, val, test
//   Step 9: Save the final checkpoint           (Layer 6 - infra)
//
// Any failure aborts the run; nothing is retried.

use anyhow::Result;
use burn::{
    module::AutodiffModule,
    optim::AdamConfig,
    tensor::backend::{AutodiffBackend, Backend},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::data::dataset::{get_test_set, get_training_set, get_val_set, LoaderOptions};
use crate::domain::{
    aug_mode::AugMode,
    band_mode::BandMode,
    device::ComputeDevice,
    error::ConfigError,
    trigger::{EvalSchedule, Trigger},
};
use crate::infra::metrics::EvalResult;
use crate::ml::{
    model::{Espcn, EspcnConfig},
    trainer::Trainer,
    accelerator_available, CpuTrainBackend,
};

/// Name of the method; outputs land in `<out_dir>/<METHOD>/`.
pub const METHOD: &str = "espcn";

// ─── Training Configuration ──────────────────────────────────────────────────
// Immutable for the duration of a run. Saved next to the checkpoint
// so `eval` can rebuild the same model and splits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub band_mode:      BandMode,
    pub data_dir:       String,
    pub crop_size:      usize,
    pub nb_channel:     usize,
    pub upscale_factor: usize,
    pub aug:            bool,
    pub aug_mode:       AugMode,
    pub base_kernel:    usize,
    pub batch_size:     usize,
    pub testbatch_size: usize,
    pub n_epochs:       usize,
    pub lr:             f64,
    pub trigger:        Trigger,
    pub interval:       usize,
    pub cuda:           bool,
    pub threads:        usize,
    pub seed:           u64,
    pub out_dir:        String,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            band_mode:      BandMode::Y,
            data_dir:       "dataset/map-rand".to_string(),
            crop_size:      224,
            nb_channel:     1,
            upscale_factor: 2,
            aug:            true,
            aug_mode:       AugMode::C,
            base_kernel:    64,
            batch_size:     64,
            testbatch_size: 10,
            n_epochs:       10,
            lr:             0.01,
            trigger:        Trigger::Epoch,
            interval:       2,
            cuda:           true,
            threads:        6,
            seed:           123,
            out_dir:        "result".to_string(),
        }
    }
}

impl TrainConfig {
    /// Reject choices that cannot produce a working run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.upscale_factor == 0 {
            return Err(ConfigError::InvalidUpscaleFactor(self.upscale_factor));
        }
        if self.crop_size < self.upscale_factor {
            return Err(ConfigError::CropTooSmall {
                crop:   self.crop_size,
                factor: self.upscale_factor,
            });
        }
        if self.nb_channel != self.band_mode.channels() {
            return Err(ConfigError::ChannelMismatch {
                band:     self.band_mode.to_string(),
                expected: self.band_mode.channels(),
                got:      self.nb_channel,
            });
        }
        if self.interval == 0 {
            return Err(ConfigError::InvalidInterval);
        }
        if self.batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize { name: "batch_size" });
        }
        if self.testbatch_size == 0 {
            return Err(ConfigError::InvalidBatchSize { name: "testbatch_size" });
        }
        if self.base_kernel < 2 {
            return Err(ConfigError::InvalidBaseKernel(self.base_kernel));
        }
        Ok(())
    }

    pub fn loader_options(&self) -> LoaderOptions {
        LoaderOptions {
            band_mode:      self.band_mode,
            data_dir:       PathBuf::from(&self.data_dir),
            aug:            self.aug,
            aug_mode:       self.aug_mode,
            crop_size:      self.crop_size,
            upscale_factor: self.upscale_factor,
            seed:           self.seed,
        }
    }

    pub fn model_config(&self) -> EspcnConfig {
        EspcnConfig::new(self.nb_channel, self.upscale_factor).with_base_kernel(self.base_kernel)
    }

    pub fn schedule(&self) -> EvalSchedule {
        EvalSchedule::new(self.trigger, self.interval)
    }

    pub fn run_dir(&self, method: &str) -> PathBuf {
        PathBuf::from(&self.out_dir).join(method)
    }
}

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub run_dir:        PathBuf,
    pub log_entries:    usize,
    pub learning_curve: PathBuf,
    pub checkpoint:     PathBuf,
    pub results:        Vec<EvalResult>,
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config:      TrainConfig,
    /// `None` checks the real device when `cuda` is requested
    accelerator: Option<bool>,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config, accelerator: None }
    }

    /// Override accelerator detection (e.g. to exercise the CPU-only path).
    pub fn with_accelerator_available(mut self, available: bool) -> Self {
        self.accelerator = Some(available);
        self
    }

    pub fn execute(&self) -> Result<RunSummary> {
        let cfg = &self.config;
        println!("{cfg:?}");

        // ── Step 1: Preconditions, before any data or output is touched ──────
        cfg.validate()?;
        let available = || self.accelerator.unwrap_or_else(accelerator_available);
        match ComputeDevice::select(cfg.cuda, available)? {
            ComputeDevice::Cpu => {
                tracing::info!("Using CPU (ndarray) backend");
                self.run::<CpuTrainBackend>(&Default::default())
            }
            ComputeDevice::Accelerator => self.run_accelerated(),
        }
    }

    #[cfg(feature = "wgpu")]
    fn run_accelerated(&self) -> Result<RunSummary> {
        let device = burn::backend::wgpu::WgpuDevice::default();
        tracing::info!("Using WGPU device: {:?}", device);
        self.run::<crate::ml::AcceleratorTrainBackend>(&device)
    }

    #[cfg(not(feature = "wgpu"))]
    fn run_accelerated(&self) -> Result<RunSummary> {
        Err(ConfigError::AcceleratorUnavailable.into())
    }

    fn run<B: AutodiffBackend>(&self, device: &B::Device) -> Result<RunSummary> {
        let cfg = &self.config;

        // ── Step 2: Reproducibility ──────────────────────────────────────────
        // Host-side randomness is seeded from cfg.seed inside the loader
        <B as Backend>::seed(cfg.seed);

        // ── Step 3: Datasets ─────────────────────────────────────────────────
        println!("===> Loading datasets");
        let opts      = cfg.loader_options();
        let train_set = get_training_set(&opts)?;
        let val_set   = get_val_set(&opts)?;
        let test_set  = get_test_set(&opts)?;

        // ── Step 4: Model + optimiser ────────────────────────────────────────
        println!("===> Building model");
        let model: Espcn<B> = cfg.model_config().init(device);
        let mut optim = AdamConfig::new().init::<B, Espcn<B>>();

        // ── Step 5–7: Train, save the log, plot it ───────────────────────────
        let mut run = Trainer::new(cfg, METHOD)?;
        let model = run.training(model, &mut optim, [&train_set, &val_set], device)?;
        run.save_log()?;
        let learning_curve = run.learning_curve()?;

        // ── Step 8: Evaluate on every split ──────────────────────────────────
        let model = model.valid();
        run.evaluating(&model, &train_set, "train", device)?;
        run.evaluating(&model, &val_set, "val", device)?;
        run.evaluating(&model, &test_set, "test", device)?;
        println!("===> Complete training");

        // ── Step 9: Checkpoint ───────────────────────────────────────────────
        let checkpoint = run.save_checkpoint(&model)?;

        Ok(RunSummary {
            run_dir: run.run_dir().to_path_buf(),
            log_entries: run.log().entries().len(),
            learning_curve,
            checkpoint,
            results: run.log().results().to_vec(),
        })
    }
}
