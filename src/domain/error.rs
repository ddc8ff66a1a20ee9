// ============================================================
// Layer 3 — Configuration Errors
// ============================================================
// Every variant is a precondition checked before any dataset or
// model work starts. None of them is recoverable.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("No GPU found, please run without --cuda")]
    AcceleratorUnavailable,
    #[error("band mode {band} yields {expected} channel(s) but nb_channel is {got}")]
    ChannelMismatch {
        band:     String,
        expected: usize,
        got:      usize,
    },
    #[error("upscale_factor must be at least 1, got {0}")]
    InvalidUpscaleFactor(usize),
    #[error("crop_size {crop} is smaller than upscale_factor {factor}")]
    CropTooSmall { crop: usize, factor: usize },
    #[error("logging interval must be at least 1")]
    InvalidInterval,
    #[error("{name} must be at least 1")]
    InvalidBatchSize { name: &'static str },
    #[error("base_kernel must be at least 2, got {0}")]
    InvalidBaseKernel(usize),
}
