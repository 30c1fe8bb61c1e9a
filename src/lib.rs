//! Metamerge: native-image reachability metadata merging
//!
//! Folds reflection entries and resource patterns captured by a tracing agent
//! into the checked-in, per-platform baseline metadata documents without
//! introducing duplicates.

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod logging;
pub mod merge;
pub mod runner;
