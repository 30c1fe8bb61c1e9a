//! Config loader facade: assembles sources in precedence order.

use super::merge::merge_policy;
use super::sources::{env_overrides, workspace_file};
use super::MergerConfig;
use config::ConfigError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads [`MergerConfig`] from defaults, config file and environment.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    /// Precedence: defaults, then <workspace>/metamerge.toml, then environment.
    pub fn load(workspace_root: &Path) -> Result<MergerConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = env_overrides::add_to_builder(builder)?;
        let config: MergerConfig = builder.build()?.try_deserialize()?;
        debug!(workspace = %workspace_root.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load configuration from an explicit file (environment still applies).
    pub fn load_from_file(config_path: &Path) -> Result<MergerConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = workspace_file::add_explicit_to_builder(builder, config_path)?;
        let builder = env_overrides::add_to_builder(builder)?;
        let config: MergerConfig = builder.build()?.try_deserialize()?;
        debug!(config = %config_path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Path of the workspace config file.
    pub fn workspace_config_path(workspace_root: &Path) -> PathBuf {
        workspace_file::workspace_config_path(workspace_root)
    }
}
