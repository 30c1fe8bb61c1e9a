//! Configuration System
//!
//! Layered settings for the platform merge: built-in defaults, an optional
//! `metamerge.toml`, environment overrides (`BASELINE_DIR`, `DELTA_FILE`,
//! `PLATFORMS`, `BASELINE_FILE_NAME`) and finally CLI flags.

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergerConfig {
    /// Directory holding one subdirectory per platform
    #[serde(default = "default_baseline_dir")]
    pub baseline_dir: PathBuf,

    /// File name of the baseline document inside each platform directory
    #[serde(default = "default_baseline_file_name")]
    pub baseline_file_name: String,

    /// Agent-captured delta document merged into every platform
    #[serde(default = "default_delta_file")]
    pub delta_file: PathBuf,

    /// Platform identifiers, processed in order
    #[serde(default = "default_platforms")]
    pub platforms: Vec<String>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

pub(crate) const DEFAULT_BASELINE_DIR: &str = "src/main/resources/META-INF/native-image";
pub(crate) const DEFAULT_BASELINE_FILE_NAME: &str = "reachability-metadata.json";
pub(crate) const DEFAULT_DELTA_FILE: &str = "target/native-agent/reachability-metadata.json";
pub(crate) const DEFAULT_PLATFORMS: [&str; 3] = ["linux-x86_64", "macos-aarch64", "windows-x86_64"];

fn default_baseline_dir() -> PathBuf {
    PathBuf::from(DEFAULT_BASELINE_DIR)
}

fn default_baseline_file_name() -> String {
    DEFAULT_BASELINE_FILE_NAME.to_string()
}

fn default_delta_file() -> PathBuf {
    PathBuf::from(DEFAULT_DELTA_FILE)
}

fn default_platforms() -> Vec<String> {
    DEFAULT_PLATFORMS.iter().map(|p| p.to_string()).collect()
}

impl Default for MergerConfig {
    fn default() -> Self {
        Self {
            baseline_dir: default_baseline_dir(),
            baseline_file_name: default_baseline_file_name(),
            delta_file: default_delta_file(),
            platforms: default_platforms(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    Platforms(String),
    Paths(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Platforms(msg) => write!(f, "Platforms: {}", msg),
            ValidationError::Paths(msg) => write!(f, "Paths: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Values taken from CLI flags; `None`/empty leaves the loaded value alone.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub baseline_dir: Option<PathBuf>,
    pub baseline_file_name: Option<String>,
    pub delta_file: Option<PathBuf>,
    pub platforms: Vec<String>,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut MergerConfig) {
        if let Some(ref dir) = self.baseline_dir {
            config.baseline_dir = dir.clone();
        }
        if let Some(ref name) = self.baseline_file_name {
            config.baseline_file_name = name.clone();
        }
        if let Some(ref delta) = self.delta_file {
            config.delta_file = delta.clone();
        }
        if !self.platforms.is_empty() {
            config.platforms = self.platforms.clone();
        }
    }
}

impl MergerConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.platforms.is_empty() {
            errors.push(ValidationError::Platforms(
                "At least one platform is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for platform in &self.platforms {
            if platform.trim().is_empty() {
                errors.push(ValidationError::Platforms(
                    "Platform identifiers cannot be empty".to_string(),
                ));
            } else if !seen.insert(platform.as_str()) {
                errors.push(ValidationError::Platforms(format!(
                    "Duplicate platform '{}'",
                    platform
                )));
            }
        }

        if self.baseline_file_name.trim().is_empty() {
            errors.push(ValidationError::Paths(
                "Baseline file name cannot be empty".to_string(),
            ));
        }
        if self.delta_file.as_os_str().is_empty() {
            errors.push(ValidationError::Paths(
                "Delta file path cannot be empty".to_string(),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Copy of this config with relative paths anchored at `workspace_root`.
    pub fn resolved(&self, workspace_root: &Path) -> MergerConfig {
        let anchor = |path: &Path| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                workspace_root.join(path)
            }
        };

        MergerConfig {
            baseline_dir: anchor(&self.baseline_dir),
            delta_file: anchor(&self.delta_file),
            ..self.clone()
        }
    }

    /// Baseline document path for one platform.
    pub fn baseline_path(&self, platform: &str) -> PathBuf {
        self.baseline_dir
            .join(platform)
            .join(&self.baseline_file_name)
    }
}
