//! Workspace config file source: <workspace>/metamerge.toml, or an explicit --config file.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::{Path, PathBuf};

/// Name of the per-workspace config file.
pub const CONFIG_FILE_NAME: &str = "metamerge.toml";

/// Path to the workspace config file.
pub fn workspace_config_path(workspace_root: &Path) -> PathBuf {
    workspace_root.join(CONFIG_FILE_NAME)
}

/// Add the workspace config file to builder if it exists.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let config_path = workspace_config_path(workspace_root);
    if config_path.exists() {
        Ok(builder.add_source(File::from(config_path).required(false)))
    } else {
        Ok(builder)
    }
}

/// Add an explicitly requested config file; a missing file is an error.
pub fn add_explicit_to_builder(
    builder: ConfigBuilder<DefaultState>,
    config_path: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if !config_path.exists() {
        return Err(ConfigError::NotFound(config_path.display().to_string()));
    }
    Ok(builder.add_source(File::from(config_path).required(true)))
}
