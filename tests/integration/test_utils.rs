//! Shared test utilities for integration tests
//!
//! Writes metadata fixtures into temporary workspaces and runs the CLI binary
//! with a scrubbed environment so host settings never leak into assertions.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Environment variables the CLI reads; removed before every binary run.
const SCRUBBED_ENV: [&str; 7] = [
    "BASELINE_DIR",
    "DELTA_FILE",
    "PLATFORMS",
    "BASELINE_FILE_NAME",
    "METAMERGE_LOG",
    "METAMERGE_LOG_FORMAT",
    "METAMERGE_LOG_OUTPUT",
];

/// Write `content` to `path`, creating parent directories.
pub fn write_file(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Write a JSON value to `path`.
pub fn write_json(path: &Path, value: &serde_json::Value) {
    write_file(path, &serde_json::to_string_pretty(value).unwrap());
}

/// Read `path` back as a JSON value.
pub fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

/// Baseline path for `platform` under the default layout of a workspace.
pub fn default_baseline(workspace: &Path, platform: &str) -> PathBuf {
    workspace
        .join("src/main/resources/META-INF/native-image")
        .join(platform)
        .join("reachability-metadata.json")
}

/// Delta path under the default layout of a workspace.
pub fn default_delta(workspace: &Path) -> PathBuf {
    workspace.join("target/native-agent/reachability-metadata.json")
}

/// Base command for the CLI binary with a clean environment.
pub fn metamerge(workspace: &Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_metamerge"));
    for key in SCRUBBED_ENV {
        command.env_remove(key);
    }
    command.arg("--workspace").arg(workspace).arg("--quiet");
    command
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
