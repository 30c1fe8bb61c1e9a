//! Configuration sources, lowest precedence first.

pub mod env_overrides;
pub mod workspace_file;
