//! Merge rules: defaults, override order, conflict handling.

use crate::config::{
    DEFAULT_BASELINE_DIR, DEFAULT_BASELINE_FILE_NAME, DEFAULT_DELTA_FILE, DEFAULT_PLATFORMS,
};
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("baseline_dir", DEFAULT_BASELINE_DIR)?
        .set_default("baseline_file_name", DEFAULT_BASELINE_FILE_NAME)?
        .set_default("delta_file", DEFAULT_DELTA_FILE)?
        .set_default(
            "platforms",
            DEFAULT_PLATFORMS
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<String>>(),
        )
}
