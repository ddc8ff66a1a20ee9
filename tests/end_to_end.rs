mod common;

use std::fs;

use geosr::{
    application::eval_use_case::EvalUseCase,
    infra::metrics::EvalResult,
    TrainConfig, TrainUseCase,
};

#[test]
fn one_epoch_run_writes_log_plot_and_checkpoint() {
    let data = tempfile::tempdir().unwrap();
    let out  = tempfile::tempdir().unwrap();
    common::write_split_dirs(data.path(), 3, 16);

    let cfg     = common::small_config(data.path(), out.path());
    let summary = TrainUseCase::new(cfg).execute().unwrap();

    // nEpochs=1 with an epoch trigger every epoch → one validation row
    assert_eq!(summary.log_entries, 1);
    let csv = fs::read_to_string(summary.run_dir.join("log.csv")).unwrap();
    assert_eq!(csv.lines().count(), 2);

    assert!(summary.learning_curve.exists());
    assert!(summary.checkpoint.exists());
    assert!(summary.run_dir.join("train_config.json").exists());

    let names: Vec<&str> = summary.results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["train", "val", "test"]);

    let saved: Vec<EvalResult> =
        serde_json::from_str(&fs::read_to_string(summary.run_dir.join("eval.json")).unwrap())
            .unwrap();
    assert_eq!(saved, summary.results);
    // Default aug mode c quadruples the training split only
    assert_eq!(saved[0].samples, 12);
    assert_eq!(saved[2].samples, 3);
}

#[test]
fn eval_reloads_a_run_and_matches_its_saved_metrics() {
    let data = tempfile::tempdir().unwrap();
    let out  = tempfile::tempdir().unwrap();
    common::write_split_dirs(data.path(), 3, 16);

    // No augmentation, so eval sees the same training split
    let cfg     = TrainConfig { aug: false, ..common::small_config(data.path(), out.path()) };
    let summary = TrainUseCase::new(cfg).execute().unwrap();

    let results = EvalUseCase::new(summary.run_dir.clone(), false, None).execute().unwrap();
    let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["train", "val", "test"]);

    let saved: Vec<EvalResult> =
        serde_json::from_str(&fs::read_to_string(summary.run_dir.join("eval.json")).unwrap())
            .unwrap();
    for (got, want) in results.iter().zip(&saved) {
        assert_eq!(got.name, want.name);
        assert_eq!(got.samples, want.samples);
        // The checkpoint holds half-precision weights
        assert!((got.loss - want.loss).abs() < 1e-3, "{got:?} vs {want:?}");
        assert!((got.psnr - want.psnr).abs() < 0.5, "{got:?} vs {want:?}");
        assert!((got.ssim - want.ssim).abs() < 2e-2, "{got:?} vs {want:?}");
    }
}

#[test]
fn eval_of_a_missing_run_is_an_error() {
    let out = tempfile::tempdir().unwrap();
    assert!(EvalUseCase::new(out.path().join("espcn"), false, None).execute().is_err());
}
