// ============================================================
// Layer 5 — Trainer
// ============================================================
// Drives one run:
//
//   training()        epochs over the train split, Adam steps,
//                     validation at every trigger point
//   evaluating()      averaged metrics of a model on one split
//   save_log()        log.csv
//   learning_curve()  learning_curve.png
//   save_checkpoint() model.mpk + train_config.json, then the
//                     final log.csv + eval.json
//
// Training runs on the autodiff backend; every evaluation runs on
// model.valid(), i.e. the inner backend without gradient tracking.
// The training order is reshuffled every epoch from one RNG seeded
// with cfg.seed; `threads` only parallelises decoding inside a batch.

use anyhow::{anyhow, Result};
use burn::{
    data::dataset::Dataset,
    module::AutodiffModule,
    optim::{GradientsParams, Optimizer},
    prelude::*,
    tensor::{backend::AutodiffBackend, ElementConversion},
};
use rand::{rngs::StdRng, SeedableRng};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{batch_iter::SrLoader, dataset::SrDataset};
use crate::domain::{traits::MetricSink, trigger::EvalSchedule};
use crate::infra::{
    checkpoint::CheckpointManager,
    metrics::{EvalResult, LogEntry, RunLog, RunningLoss},
    plot,
};
use crate::ml::{model::Espcn, quality};

pub struct Trainer {
    cfg:      TrainConfig,
    schedule: EvalSchedule,
    run_dir:  PathBuf,
    ckpt:     CheckpointManager,
    log:      RunLog,
}

impl Trainer {
    /// Outputs go to `<out_dir>/<method>/`, created here.
    pub fn new(cfg: &TrainConfig, method: &str) -> Result<Self> {
        let run_dir = cfg.run_dir(method);
        fs::create_dir_all(&run_dir)?;
        Ok(Self {
            cfg:      cfg.clone(),
            schedule: cfg.schedule(),
            ckpt:     CheckpointManager::new(&run_dir),
            log:      RunLog::new(&run_dir),
            run_dir,
        })
    }

    pub fn run_dir(&self) -> &Path {
        &self.run_dir
    }

    pub fn log(&self) -> &RunLog {
        &self.log
    }

    pub fn training<B, O>(
        &mut self,
        mut model: Espcn<B>,
        optim:     &mut O,
        datasets:  [&SrDataset; 2],
        device:    &B::Device,
    ) -> Result<Espcn<B>>
    where
        B: AutodiffBackend,
        O: Optimizer<Espcn<B>, B>,
    {
        let [train_set, val_set] = datasets;

        let train_loader = SrLoader::<B>::new(
            train_set.clone(),
            self.cfg.batch_size,
            self.cfg.threads,
            device.clone(),
        )?;
        tracing::info!(
            "Training on {} samples, {} batches per epoch",
            train_set.len(),
            train_loader.num_batches()
        );

        let mut rng       = StdRng::seed_from_u64(self.cfg.seed);
        let mut iteration = 0usize;
        let mut running   = RunningLoss::default();

        for epoch in 1..=self.cfg.n_epochs {
            let mut epoch_loss = RunningLoss::default();

            for batch in train_loader.shuffled(&mut rng) {
                let batch = batch?;
                let (loss, _) = model.forward_loss(batch.inputs, batch.targets);
                let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
                running.push(loss_val);
                epoch_loss.push(loss_val);

                let grads = GradientsParams::from_grads(loss.backward(), &model);
                model = optim.step(self.cfg.lr, model, grads);
                iteration += 1;

                if self.schedule.after_iteration(iteration) {
                    self.validate(&model, val_set, epoch, iteration, &mut running, device)?;
                }
            }

            println!(
                "Epoch {:>3}/{} | iter={} | train_loss={:.6}",
                epoch,
                self.cfg.n_epochs,
                iteration,
                epoch_loss.take(),
            );

            if self.schedule.after_epoch(epoch) {
                self.validate(&model, val_set, epoch, iteration, &mut running, device)?;
            }
        }

        tracing::info!("Training finished after {} iterations", iteration);
        Ok(model)
    }

    fn validate<B: AutodiffBackend>(
        &mut self,
        model:     &Espcn<B>,
        val_set:   &SrDataset,
        epoch:     usize,
        iteration: usize,
        running:   &mut RunningLoss,
        device:    &B::Device,
    ) -> Result<()> {
        let result = evaluate(
            &model.valid(),
            val_set,
            "val",
            self.cfg.testbatch_size,
            self.cfg.threads,
            device,
        )?;
        let entry  = LogEntry {
            epoch,
            iteration,
            train_loss: running.take(),
            val_loss:   result.loss,
            val_psnr:   result.psnr,
            val_ssim:   result.ssim,
        };
        println!(
            "===> Validation epoch {} iter {} | val_loss={:.6} | psnr={:.3} dB | ssim={:.4}",
            epoch, iteration, entry.val_loss, entry.val_psnr, entry.val_ssim,
        );
        self.log.push(entry);
        Ok(())
    }

    /// Evaluate `model` on `split` and store the result under `name`.
    pub fn evaluating<B: Backend>(
        &mut self,
        model:  &Espcn<B>,
        split:  &SrDataset,
        name:   &str,
        device: &B::Device,
    ) -> Result<EvalResult> {
        let result = evaluate(model, split, name, self.cfg.testbatch_size, self.cfg.threads, device)?;
        println!(
            "===> {:<5} | loss={:.6} | psnr={:.3} dB | ssim={:.4} | samples={}",
            name, result.loss, result.psnr, result.ssim, result.samples,
        );
        self.log.record(result.clone());
        Ok(result)
    }

    pub fn save_log(&self) -> Result<()> {
        self.log.write_csv()?;
        tracing::info!("Metrics log saved to '{}'", self.log.csv_path().display());
        Ok(())
    }

    pub fn learning_curve(&self) -> Result<PathBuf> {
        let path = self.run_dir.join("learning_curve.png");
        plot::render_learning_curve(self.log.entries(), &path)?;
        Ok(path)
    }

    pub fn save_checkpoint<B: Backend>(&self, model: &Espcn<B>) -> Result<PathBuf> {
        let path = self.ckpt.save_model(model)?;
        self.ckpt.save_config(&self.cfg)?;
        self.log.flush()?;
        tracing::info!("Checkpoint saved to '{}'", path.display());
        Ok(path)
    }
}

/// Averaged per-image MSE, PSNR and SSIM of `model` over `split`.
///
/// Batches are read in dataset order, so repeated calls on the same
/// model and split return identical numbers.
pub fn evaluate<B: Backend>(
    model:      &Espcn<B>,
    split:      &SrDataset,
    name:       &str,
    batch_size: usize,
    threads:    usize,
    device:     &B::Device,
) -> Result<EvalResult> {
    let loader = SrLoader::<B>::new(split.clone(), batch_size, threads, device.clone())?;

    let (mut loss, mut psnr, mut ssim) = (0.0f64, 0.0f64, 0.0f64);
    let mut samples = 0usize;

    for batch in loader.sequential() {
        let batch = batch?;
        let [n, c, h, w] = batch.targets.dims();
        let output = model
            .forward(batch.inputs)
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| anyhow!("Cannot read model output: {e:?}"))?;
        let target = batch
            .targets
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| anyhow!("Cannot read target batch: {e:?}"))?;

        let per_image = c * h * w;
        for i in 0..n {
            let range = i * per_image..(i + 1) * per_image;
            let score = quality::score(&output[range.clone()], &target[range], c);
            loss += score.mse;
            psnr += score.psnr;
            ssim += score.ssim;
            samples += 1;
        }
    }

    let mean = |v: f64| if samples > 0 { v / samples as f64 } else { f64::NAN };
    Ok(EvalResult {
        name: name.to_string(),
        loss: mean(loss),
        psnr: mean(psnr),
        ssim: mean(ssim),
        samples,
    })
}
