//! Environment overrides: BASELINE_DIR, DELTA_FILE, PLATFORMS, BASELINE_FILE_NAME.
//!
//! These names are unprefixed so existing build scripts can export them as-is.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use tracing::debug;

/// Apply environment overrides on top of file and default sources.
/// Empty values are ignored.
pub fn add_to_builder(
    mut builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    for (var, key) in [
        ("BASELINE_DIR", "baseline_dir"),
        ("DELTA_FILE", "delta_file"),
        ("BASELINE_FILE_NAME", "baseline_file_name"),
    ] {
        if let Some(value) = non_empty_var(var) {
            debug!(var, value = %value, "Applying environment override");
            builder = builder.set_override(key, value)?;
        }
    }

    if let Some(value) = non_empty_var("PLATFORMS") {
        let platforms = split_platforms(&value);
        debug!(?platforms, "Applying PLATFORMS override");
        builder = builder.set_override("platforms", platforms)?;
    }

    Ok(builder)
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

/// Split a comma-separated platform list, dropping blanks.
pub fn split_platforms(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}
