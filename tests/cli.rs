mod common;

use std::process::Command;

#[test]
fn train_prints_each_stage_banner_once_in_order() {
    let data = tempfile::tempdir().unwrap();
    let out  = tempfile::tempdir().unwrap();
    common::write_split_dirs(data.path(), 3, 16);

    let output = Command::new(env!("CARGO_BIN_EXE_geosr"))
        .args([
            "train",
            "--data-dir", data.path().to_str().unwrap(),
            "--out-dir", out.path().to_str().unwrap(),
            "--crop-size", "8",
            "--base-kernel", "4",
            "--testbatch-size", "4",
            "--n-epochs", "1",
            "--interval", "1",
            "--cuda", "false",
            "--threads", "2",
        ])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout).unwrap();
    for banner in ["===> Loading datasets", "===> Building model", "===> Complete training"] {
        assert_eq!(stdout.matches(banner).count(), 1, "{banner}\n{stdout}");
    }
    let at = |banner: &str| stdout.find(banner).unwrap();
    assert!(at("===> Loading datasets") < at("===> Building model"));
    assert!(at("===> Building model") < at("===> Complete training"));
    assert!(out.path().join("espcn").join("model.mpk").exists());
}

#[test]
fn train_rejects_a_channel_mismatch_before_writing_anything() {
    let data = tempfile::tempdir().unwrap();
    let out  = tempfile::tempdir().unwrap();
    common::write_split_dirs(data.path(), 3, 16);

    let output = Command::new(env!("CARGO_BIN_EXE_geosr"))
        .args([
            "train",
            "--data-dir", data.path().to_str().unwrap(),
            "--out-dir", out.path().join("run").to_str().unwrap(),
            "--band-mode", "RGB",
            "--nb-channel", "1",
            "--cuda", "false",
        ])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(!String::from_utf8_lossy(&output.stdout).contains("===> Loading datasets"));
    assert!(!out.path().join("run").exists());
}
