// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Two subcommands: `train` and `eval`.
//
// Flags are kebab-case; the historical snake_case spellings
// (--band_mode, --nEpochs, ...) are accepted as aliases.
// Boolean options take an explicit value: --aug false, --cuda true.

use clap::{ArgAction, Args, Subcommand};

use crate::application::train_use_case::TrainConfig;
use crate::domain::{aug_mode::AugMode, band_mode::BandMode, trigger::Trigger};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train ESPCN on an image directory
    Train(TrainArgs),

    /// Re-evaluate a finished run on train, val and test
    Eval(EvalArgs),
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Channel representation of the imagery
    #[arg(long, alias = "band_mode", value_enum, default_value_t = BandMode::Y)]
    pub band_mode: BandMode,

    /// Root of the training imagery (train/ val/ test/ subfolders, or flat)
    #[arg(long, alias = "data_dir", default_value = "dataset/map-rand")]
    pub data_dir: String,

    /// Side of the high-resolution tile cut from each image
    #[arg(long, alias = "crop_size", default_value_t = 224)]
    pub crop_size: usize,

    /// Model input/output channels; must match the band mode
    #[arg(long, alias = "nb_channel", default_value_t = 1)]
    pub nb_channel: usize,

    /// Super-resolution upscale factor
    #[arg(long, alias = "upscale_factor", default_value_t = 2)]
    pub upscale_factor: usize,

    /// Data augmentation on the training split
    #[arg(long, action = ArgAction::Set, default_value_t = true)]
    pub aug: bool,

    /// Augmentation mode: a, b, c, d, e
    #[arg(long, alias = "aug_mode", value_enum, default_value_t = AugMode::C)]
    pub aug_mode: AugMode,

    /// Width of the first convolution; controls capacity
    #[arg(long, alias = "base_kernel", default_value_t = 64)]
    pub base_kernel: usize,

    /// Training batch size
    #[arg(long, alias = "batch_size", default_value_t = 64)]
    pub batch_size: usize,

    /// Evaluation batch size
    #[arg(long, alias = "testbatch_size", default_value_t = 10)]
    pub testbatch_size: usize,

    /// Number of epochs to train for
    #[arg(long = "n-epochs", alias = "nEpochs", default_value_t = 10)]
    pub n_epochs: usize,

    /// Learning rate
    #[arg(long, default_value_t = 0.01)]
    pub lr: f64,

    /// Unit of the validation cadence
    #[arg(long, value_enum, default_value_t = Trigger::Epoch)]
    pub trigger: Trigger,

    /// Validate every `interval` epochs or iterations
    #[arg(long, default_value_t = 2)]
    pub interval: usize,

    /// Use the GPU backend
    #[arg(long, action = ArgAction::Set, default_value_t = true)]
    pub cuda: bool,

    /// Worker threads for decoding and cutting tiles
    #[arg(long, default_value_t = 6)]
    pub threads: usize,

    /// Random seed
    #[arg(long, default_value_t = 123)]
    pub seed: u64,

    /// Where run directories are written
    #[arg(long, alias = "out_dir", default_value = "result")]
    pub out_dir: String,
}

/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            band_mode:      a.band_mode,
            data_dir:       a.data_dir,
            crop_size:      a.crop_size,
            nb_channel:     a.nb_channel,
            upscale_factor: a.upscale_factor,
            aug:            a.aug,
            aug_mode:       a.aug_mode,
            base_kernel:    a.base_kernel,
            batch_size:     a.batch_size,
            testbatch_size: a.testbatch_size,
            n_epochs:       a.n_epochs,
            lr:             a.lr,
            trigger:        a.trigger,
            interval:       a.interval,
            cuda:           a.cuda,
            threads:        a.threads,
            seed:           a.seed,
            out_dir:        a.out_dir,
        }
    }
}

#[derive(Args, Debug)]
pub struct EvalArgs {
    /// Run directory written by `train` (e.g. result/espcn)
    #[arg(long, alias = "run_dir", default_value = "result/espcn")]
    pub run_dir: String,

    /// Use the GPU backend
    #[arg(long, action = ArgAction::Set, default_value_t = true)]
    pub cuda: bool,

    /// Override the data directory stored in the run config
    #[arg(long, alias = "data_dir")]
    pub data_dir: Option<String>,
}
