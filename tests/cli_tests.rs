//! End-to-end CLI tests over the five request/response contracts

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;

fn uqt() -> Command {
    Command::cargo_bin("uqt").unwrap()
}

fn write_request(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, body).unwrap();
    path
}

fn stdout_json(output: std::process::Output) -> Value {
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_monte_carlo_contract() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_request(
        &tmp,
        "mc.json",
        r#"{"num_samples": 20, "num_freq_points": 11, "seed": 7}"#,
    );

    let output = uqt()
        .args(["monte-carlo", "--input"])
        .arg(&input)
        .output()
        .unwrap();
    let json = stdout_json(output);

    assert_eq!(json["frequencies"].as_array().unwrap().len(), 11);
    assert_eq!(json["mean_transfer_function"].as_array().unwrap().len(), 11);
    assert_eq!(json["std_transfer_function"].as_array().unwrap().len(), 11);
    assert_eq!(json["upper_bound"].as_array().unwrap().len(), 11);
    assert_eq!(json["lower_bound"].as_array().unwrap().len(), 11);
    assert_eq!(json["num_samples"], 20);
    assert!(json["computation_time_s"].as_f64().unwrap() >= 0.0);
    // Defaults fill the omitted physical parameters
    assert_eq!(json["E0"].as_f64().unwrap(), 2.1e11);
}

#[test]
fn test_chaos_contract() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_request(&tmp, "chaos.json", r#"{"num_freq_points": 11}"#);

    let output = uqt()
        .args(["chaos", "--input"])
        .arg(&input)
        .output()
        .unwrap();
    let json = stdout_json(output);

    assert_eq!(json["chaos_order"], 2);
    assert_eq!(json["mean_transfer_function"].as_array().unwrap().len(), 11);
    assert_eq!(json["first_order_correction"].as_array().unwrap().len(), 11);
}

#[test]
fn test_taguchi_default_design() {
    let output = uqt().arg("taguchi").output().unwrap();
    let json = stdout_json(output);

    assert_eq!(json["num_experiments"], 9);
    assert_eq!(json["experiments"].as_array().unwrap().len(), 9);
    assert_eq!(
        json["factor_names"],
        serde_json::json!(["E_modulus", "damping", "density"])
    );
    assert_eq!(json["orthogonal_array"][0].as_array().unwrap().len(), 3);
    assert!(json["sn_analysis"]["damping"].as_array().unwrap().len() == 3);
}

#[test]
fn test_taguchi_rejects_five_factors() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_request(
        &tmp,
        "factors.json",
        r#"{"factors": {
            "a": [1, 2, 3], "b": [1, 2, 3], "c": [1, 2, 3],
            "d": [1, 2, 3], "e": [1, 2, 3]
        }}"#,
    );

    uqt()
        .args(["taguchi", "--input"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("at most 4"));
}

#[test]
fn test_oscillator_contract() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_request(
        &tmp,
        "osc.json",
        r#"{"mc_samples": 50, "num_freq_points": 20, "seed": 3}"#,
    );

    let output = uqt()
        .args(["oscillator", "--input"])
        .arg(&input)
        .output()
        .unwrap();
    let json = stdout_json(output);

    assert_eq!(json["frequencies"].as_array().unwrap().len(), 20);
    assert_eq!(json["deterministic_response"].as_array().unwrap().len(), 20);
    assert_eq!(json["monte_carlo"]["samples"], 50);
    assert_eq!(json["taguchi"]["points"], 9);
    assert_eq!(json["parameters"]["omega0"].as_f64().unwrap(), 1.0);
}

#[test]
fn test_pca_from_stdin() {
    let output = uqt()
        .args(["pca", "--input", "-"])
        .write_stdin(r#"{"data_matrix": [[1, 2], [2, 4.1], [3, 5.9], [4, 8.2]]}"#)
        .output()
        .unwrap();
    let json = stdout_json(output);

    assert_eq!(json["n_observations"], 4);
    assert_eq!(json["n_variables"], 2);
    assert_eq!(json["eigenvalues"].as_array().unwrap().len(), 2);
    let ratios: Vec<f64> = json["explained_variance_ratio"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_f64().unwrap())
        .collect();
    assert!((ratios.iter().sum::<f64>() - 1.0).abs() < 1e-9);
}

#[test]
fn test_pca_rejects_single_observation() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_request(&tmp, "pca.json", r#"{"data_matrix": [[1, 2, 3]]}"#);

    uqt()
        .args(["pca", "--input"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 2 observations"));
}

#[test]
fn test_pca_without_input_is_a_validation_error() {
    // No default exists for the data matrix
    uqt()
        .arg("pca")
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 2 observations"));
}

#[test]
fn test_output_file_and_pretty() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_request(
        &tmp,
        "mc.json",
        r#"{"num_samples": 5, "num_freq_points": 4, "seed": 1}"#,
    );
    let out_path = tmp.path().join("response.json");

    uqt()
        .args(["monte-carlo", "--pretty", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(&out_path)
        .assert()
        .success();

    let written = fs::read_to_string(&out_path).unwrap();
    let json: Value = serde_json::from_str(&written).unwrap();
    assert_eq!(json["num_samples"], 5);
    // Pretty output spans multiple lines
    assert!(written.lines().count() > 1);
}

#[test]
fn test_malformed_request_fails_cleanly() {
    uqt()
        .args(["monte-carlo", "--input", "-"])
        .write_stdin("{not json")
        .assert()
        .failure();
}

#[test]
fn test_seeded_runs_identical_across_invocations() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_request(
        &tmp,
        "mc.json",
        r#"{"num_samples": 30, "num_freq_points": 8, "seed": 42}"#,
    );

    let first = uqt()
        .args(["monte-carlo", "--input"])
        .arg(&input)
        .output()
        .unwrap();
    let second = uqt()
        .args(["monte-carlo", "--input"])
        .arg(&input)
        .output()
        .unwrap();
    let a = stdout_json(first);
    let b = stdout_json(second);
    assert_eq!(a["mean_transfer_function"], b["mean_transfer_function"]);
    assert_eq!(a["std_transfer_function"], b["std_transfer_function"]);
}
