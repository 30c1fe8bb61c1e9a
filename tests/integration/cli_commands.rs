//! Integration tests for the metamerge binary.

use super::test_utils::{
    default_baseline, default_delta, metamerge, read_json, stderr, stdout, write_file, write_json,
};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

const PLATFORMS: [&str; 3] = ["linux-x86_64", "macos-aarch64", "windows-x86_64"];

fn seed_workspace(workspace: &std::path::Path) {
    for platform in PLATFORMS {
        write_json(
            &default_baseline(workspace, platform),
            &json!({"reflection": [{"type": "A"}]}),
        );
    }
    write_json(
        &default_delta(workspace),
        &json!({"reflection": [{"type": "A"}, {"type": "B"}], "resources": [{"glob": "x/*"}]}),
    );
}

#[test]
fn test_default_command_merges_every_platform() {
    let temp_dir = TempDir::new().unwrap();
    seed_workspace(temp_dir.path());

    let output = metamerge(temp_dir.path()).output().unwrap();

    assert!(output.status.success(), "stderr={}", stderr(&output));
    assert!(stdout(&output)
        .contains("Merged 3 of 3 platforms (0 unchanged, 0 skipped, 0 failed)"));
    for platform in PLATFORMS {
        assert_eq!(
            read_json(&default_baseline(temp_dir.path(), platform)),
            json!({"reflection": [{"type": "A"}, {"type": "B"}], "resources": [{"glob": "x/*"}]})
        );
    }

    let rerun = metamerge(temp_dir.path()).arg("merge").output().unwrap();
    assert!(rerun.status.success());
    assert!(stdout(&rerun).contains("Merged 0 of 3 platforms (3 unchanged, 0 skipped, 0 failed)"));
}

#[test]
fn test_check_reports_without_writing() {
    let temp_dir = TempDir::new().unwrap();
    seed_workspace(temp_dir.path());
    let linux = default_baseline(temp_dir.path(), "linux-x86_64");
    let before = fs::read(&linux).unwrap();

    let output = metamerge(temp_dir.path())
        .args(["check", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr={}", stderr(&output));
    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["dry_run"], true);
    assert_eq!(report["updated"], 3);
    assert_eq!(report["platforms"][0]["added_types"], json!(["B"]));
    assert_eq!(fs::read(&linux).unwrap(), before);
}

#[test]
fn test_malformed_platform_fails_run_but_others_merge() {
    let temp_dir = TempDir::new().unwrap();
    seed_workspace(temp_dir.path());
    write_file(
        &default_baseline(temp_dir.path(), "macos-aarch64"),
        "{ this is not json",
    );

    let output = metamerge(temp_dir.path()).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    assert!(text.contains("Merged 2 of 3 platforms (0 unchanged, 0 skipped, 1 failed)"));
    assert!(text.contains("Malformed metadata document"));
    assert_eq!(
        read_json(&default_baseline(temp_dir.path(), "windows-x86_64"))["reflection"],
        json!([{"type": "A"}, {"type": "B"}])
    );
}

#[test]
fn test_missing_baseline_is_skipped_with_success() {
    let temp_dir = TempDir::new().unwrap();
    seed_workspace(temp_dir.path());
    fs::remove_file(default_baseline(temp_dir.path(), "linux-x86_64")).unwrap();

    let output = metamerge(temp_dir.path()).output().unwrap();

    assert!(output.status.success(), "stderr={}", stderr(&output));
    assert!(stdout(&output).contains("(0 unchanged, 1 skipped, 0 failed)"));
}

#[test]
fn test_environment_overrides_layout() {
    let temp_dir = TempDir::new().unwrap();
    let meta = temp_dir.path().join("meta");
    write_json(
        &meta.join("arm").join("reachability-metadata.json"),
        &json!({"reflection": []}),
    );
    let delta = temp_dir.path().join("captured.json");
    write_json(&delta, &json!({"reflection": [{"type": "Z"}]}));

    let output = metamerge(temp_dir.path())
        .env("BASELINE_DIR", &meta)
        .env("DELTA_FILE", &delta)
        .env("PLATFORMS", "arm")
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr={}", stderr(&output));
    assert!(stdout(&output).contains("Merged 1 of 1 platforms"));
    assert_eq!(
        read_json(&meta.join("arm").join("reachability-metadata.json")),
        json!({"reflection": [{"type": "Z"}]})
    );
}

#[test]
fn test_cli_flags_override_workspace_config() {
    let temp_dir = TempDir::new().unwrap();
    write_file(
        &temp_dir.path().join("metamerge.toml"),
        "baseline_dir = \"from-file\"\nplatforms = [\"one\", \"two\"]\n",
    );

    let output = metamerge(temp_dir.path())
        .args(["--platform", "three", "config"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr={}", stderr(&output));
    let config: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(config["platforms"], json!(["three"]));
    assert!(config["baseline_dir"]
        .as_str()
        .unwrap()
        .ends_with("from-file"));
}

#[test]
fn test_invalid_configuration_exits_non_zero() {
    let temp_dir = TempDir::new().unwrap();
    write_file(&temp_dir.path().join("metamerge.toml"), "platforms = [\"a\", \"a\"]\n");

    let output = metamerge(temp_dir.path()).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Duplicate platform 'a'"));
}

#[test]
fn test_merge_file_command() {
    let temp_dir = TempDir::new().unwrap();
    let baseline = temp_dir.path().join("b.json");
    let delta = temp_dir.path().join("d.json");
    let merged = temp_dir.path().join("m.json");
    write_json(&baseline, &json!({"reflection": [{"type": "A"}]}));
    write_json(&delta, &json!({"reflection": [{"type": "B"}]}));

    let output = metamerge(temp_dir.path())
        .arg("merge-file")
        .arg("--baseline")
        .arg(&baseline)
        .arg("--delta")
        .arg(&delta)
        .arg("--output")
        .arg(&merged)
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr={}", stderr(&output));
    assert!(stdout(&output).contains("Added 1 reflection entries and 0 resource patterns"));
    assert_eq!(
        read_json(&merged),
        json!({"reflection": [{"type": "A"}, {"type": "B"}]})
    );

    let missing = metamerge(temp_dir.path())
        .arg("merge-file")
        .arg("--baseline")
        .arg(temp_dir.path().join("absent.json"))
        .arg("--delta")
        .arg(&delta)
        .output()
        .unwrap();
    assert_eq!(missing.status.code(), Some(1));
    assert!(stderr(&missing).contains("does not exist"));
}

#[test]
fn test_merge_file_ignores_platform_layout_problems() {
    let temp_dir = TempDir::new().unwrap();
    write_file(&temp_dir.path().join("metamerge.toml"), "platforms = [\"a\", \"a\"]\n");
    let baseline = temp_dir.path().join("b.json");
    let delta = temp_dir.path().join("d.json");
    write_json(&baseline, &json!({"reflection": []}));
    write_json(&delta, &json!({"reflection": [{"type": "B"}]}));

    let output = metamerge(temp_dir.path())
        .arg("merge-file")
        .arg("--baseline")
        .arg(&baseline)
        .arg("--delta")
        .arg(&delta)
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr={}", stderr(&output));
    assert_eq!(read_json(&baseline), json!({"reflection": [{"type": "B"}]}));
}
