//! File-level merge behavior: persistence, idempotence and error kinds.

use super::test_utils::{read_json, write_file, write_json};
use metamerge::error::MergeError;
use metamerge::merge::{merge, MetadataMerger};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_example_scenario_on_disk() {
    let temp_dir = TempDir::new().unwrap();
    let baseline = temp_dir.path().join("baseline.json");
    let delta = temp_dir.path().join("delta.json");
    write_json(&baseline, &json!({"reflection": [{"type": "A"}, {"type": "B"}]}));
    write_json(
        &delta,
        &json!({
            "reflection": [{"type": "B"}, {"type": "C"}],
            "resources": [{"glob": "x/*"}]
        }),
    );

    let changed = merge(&baseline, &delta, &baseline).unwrap();

    assert!(changed);
    assert_eq!(
        read_json(&baseline),
        json!({
            "reflection": [{"type": "A"}, {"type": "B"}, {"type": "C"}],
            "resources": [{"glob": "x/*"}]
        })
    );
}

#[test]
fn test_second_merge_is_a_no_op() {
    let temp_dir = TempDir::new().unwrap();
    let baseline = temp_dir.path().join("baseline.json");
    let delta = temp_dir.path().join("delta.json");
    write_json(
        &baseline,
        &json!({"reflection": [{"type": "A"}], "resources": {"includes": [{"pattern": "p"}]}}),
    );
    write_json(
        &delta,
        &json!({"reflection": [{"type": "N"}], "resources": [{"pattern": "q"}]}),
    );

    assert!(merge(&baseline, &delta, &baseline).unwrap());
    let after_first = fs::read(&baseline).unwrap();

    assert!(!merge(&baseline, &delta, &baseline).unwrap());
    assert_eq!(fs::read(&baseline).unwrap(), after_first);
    assert_eq!(
        read_json(&baseline)["resources"],
        json!({"includes": [{"pattern": "p"}, {"pattern": "q"}]})
    );
}

#[test]
fn test_unchanged_baseline_is_not_rewritten() {
    let temp_dir = TempDir::new().unwrap();
    let baseline = temp_dir.path().join("baseline.json");
    let delta = temp_dir.path().join("delta.json");
    // Deliberately not in canonical formatting: a rewrite would be visible.
    let original = "{\"reflection\":[{\"type\":\"A\"}]}";
    write_file(&baseline, original);
    write_json(&delta, &json!({"reflection": []}));

    assert!(!merge(&baseline, &delta, &baseline).unwrap());
    assert_eq!(fs::read_to_string(&baseline).unwrap(), original);
}

#[test]
fn test_separate_output_leaves_baseline_alone() {
    let temp_dir = TempDir::new().unwrap();
    let baseline = temp_dir.path().join("baseline.json");
    let delta = temp_dir.path().join("delta.json");
    let output = temp_dir.path().join("out").join("merged.json");
    write_json(&baseline, &json!({"reflection": [{"type": "A"}]}));
    write_json(&delta, &json!({"reflection": [{"type": "B"}]}));
    let original = fs::read(&baseline).unwrap();

    let report = MetadataMerger::new()
        .merge_with_report(&baseline, &delta, &output)
        .unwrap();

    assert_eq!(report.added_types, vec!["B"]);
    assert_eq!(fs::read(&baseline).unwrap(), original);
    assert_eq!(
        read_json(&output),
        json!({"reflection": [{"type": "A"}, {"type": "B"}]})
    );
}

#[test]
fn test_dry_run_never_writes() {
    let temp_dir = TempDir::new().unwrap();
    let baseline = temp_dir.path().join("baseline.json");
    let delta = temp_dir.path().join("delta.json");
    write_json(&baseline, &json!({"reflection": []}));
    write_json(&delta, &json!({"reflection": [{"type": "B"}]}));
    let original = fs::read(&baseline).unwrap();

    let changed = MetadataMerger::new()
        .with_dry_run(true)
        .merge(&baseline, &delta, &baseline)
        .unwrap();

    assert!(changed);
    assert_eq!(fs::read(&baseline).unwrap(), original);
}

#[test]
fn test_missing_documents_are_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let baseline = temp_dir.path().join("baseline.json");
    let delta = temp_dir.path().join("delta.json");
    write_json(&baseline, &json!({"reflection": []}));

    match merge(&baseline, &delta, &baseline) {
        Err(MergeError::NotFound { path }) => assert_eq!(path, delta),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[test]
fn test_baseline_without_reflection_is_malformed() {
    let temp_dir = TempDir::new().unwrap();
    let baseline = temp_dir.path().join("baseline.json");
    let delta = temp_dir.path().join("delta.json");
    write_json(&baseline, &json!({"resources": []}));
    write_json(&delta, &json!({"reflection": [{"type": "A"}]}));

    let err = merge(&baseline, &delta, &baseline).unwrap_err();

    assert_eq!(err.kind(), "malformed_document");
    assert!(err.to_string().contains("reflection"), "got: {}", err);
}

#[test]
fn test_unwritable_output_is_write_failure() {
    let temp_dir = TempDir::new().unwrap();
    let baseline = temp_dir.path().join("baseline.json");
    let delta = temp_dir.path().join("delta.json");
    let output = temp_dir.path().join("occupied");
    fs::create_dir_all(output.join("child")).unwrap();
    write_json(&baseline, &json!({"reflection": []}));
    write_json(&delta, &json!({"reflection": [{"type": "A"}]}));

    let err = merge(&baseline, &delta, &output).unwrap_err();

    assert!(matches!(err, MergeError::WriteFailure { .. }), "got: {:?}", err);
    assert!(!temp_dir.path().join("occupied.tmp").exists());
}
