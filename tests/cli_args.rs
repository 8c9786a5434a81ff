//! CLI behavior through the built binary.

#![allow(deprecated)] // cargo_bin deprecation

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

fn tiff2png() -> Command {
    Command::cargo_bin("tiff2png").unwrap()
}

#[test]
fn test_missing_argument_shows_usage() {
    tiff2png()
        .assert()
        .failure()
        .stderr(predicate::str::contains("INPUT").or(predicate::str::contains("required")));
}

#[test]
fn test_quality_out_of_range_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_rgb8(&dir.path().join("photo.tif"), 2, 2);

    tiff2png()
        .arg(&input)
        .args(["-q", "96"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("96"));

    assert!(!dir.path().join("photo.png").exists());
}

#[test]
fn test_single_file_default_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_rgb8(&dir.path().join("photo.tif"), 4, 4);

    tiff2png().arg(&input).assert().success();

    common::read_png(&dir.path().join("photo.png"));
}

#[test]
fn test_single_file_explicit_output_and_quality() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_gray8(&dir.path().join("scan.tiff"), 4, 4);
    let output = dir.path().join("result.png");

    tiff2png()
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .args(["--quality", "10", "--no-optimize"])
        .assert()
        .success();

    common::read_png(&output);
}

#[test]
fn test_corrupt_single_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_corrupt(&dir.path().join("broken.tif"));

    tiff2png()
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.tif"));
}

#[test]
fn test_nonexistent_input_fails() {
    let dir = tempfile::tempdir().unwrap();

    tiff2png()
        .arg(dir.path().join("nothing.tif"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_directory_with_no_tiffs_warns() {
    let dir = tempfile::tempdir().unwrap();

    tiff2png()
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("No TIFF files found"));
}

#[test]
fn test_directory_batch_survives_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    common::write_corrupt(&dir.path().join("a.tif"));
    common::write_rgb8(&dir.path().join("b.tif"), 4, 4);
    let out = dir.path().join("pngs");

    tiff2png()
        .arg(dir.path())
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Failed to convert"));

    common::read_png(&out.join("b.png"));
    assert!(!out.join("a.png").exists());
}
