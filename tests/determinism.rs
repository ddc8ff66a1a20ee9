mod common;

use burn::tensor::{Tensor, TensorData};
use geosr::{
    infra::checkpoint::CheckpointManager,
    ml::{model::Espcn, CpuBackend},
    TrainConfig, TrainUseCase,
};
use std::path::Path;

fn reload(cfg: &TrainConfig, run_dir: &Path) -> Espcn<CpuBackend> {
    let device = Default::default();
    let model: Espcn<CpuBackend> = cfg.model_config().init(&device);
    CheckpointManager::new(run_dir).load_model(model, &device).unwrap()
}

// The backend RNG is process-global, so this file holds a single test.
#[test]
fn same_seed_same_checkpoint() {
    let data = tempfile::tempdir().unwrap();
    common::write_split_dirs(data.path(), 8, 12);

    let out_a = tempfile::tempdir().unwrap();
    let out_b = tempfile::tempdir().unwrap();
    // Several decode threads must not change the batch order
    let cfg_a = TrainConfig {
        aug:        false,
        n_epochs:   2,
        batch_size: 2,
        threads:    6,
        ..common::small_config(data.path(), out_a.path())
    };
    let cfg_b = TrainConfig { out_dir: out_b.path().display().to_string(), ..cfg_a.clone() };

    let run_a = TrainUseCase::new(cfg_a.clone()).execute().unwrap();
    let run_b = TrainUseCase::new(cfg_b).execute().unwrap();
    assert_eq!(run_a.results, run_b.results);

    let device = Default::default();
    let pattern: Vec<f32> = (0..36).map(|i| i as f32 / 36.0).collect();
    let x = Tensor::<CpuBackend, 4>::from_data(TensorData::new(pattern, [1, 1, 6, 6]), &device);

    let a = reload(&cfg_a, &run_a.run_dir).forward(x.clone()).into_data().to_vec::<f32>().unwrap();
    let b = reload(&cfg_a, &run_b.run_dir).forward(x).into_data().to_vec::<f32>().unwrap();
    assert_eq!(a, b);
}
