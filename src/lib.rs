#![recursion_limit = "256"]

//! ESPCN super-resolution training for remote-sensing imagery.
//!
//! Layers, outermost first: [`cli`] → [`application`] → [`domain`],
//! [`data`], [`ml`], [`infra`].

pub mod application;
pub mod cli;
pub mod data;
pub mod domain;
pub mod infra;
pub mod ml;

pub use application::train_use_case::{RunSummary, TrainConfig, TrainUseCase};
pub use domain::error::ConfigError;
