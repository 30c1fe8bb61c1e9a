//! Metadata Documents
//!
//! Typed view over native-image reachability metadata (`reachability-metadata.json`
//! style documents). Only the fields the merge needs are interpreted: the `type`
//! of a reflection entry and the `glob`/`pattern` of a resource pattern. Every
//! other field, and every unknown top-level section, round-trips untouched.

mod resources;

pub use resources::{ResourcePattern, ResourceShape, Resources};

use crate::error::MergeError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A baseline or agent-captured metadata document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataDocument {
    /// Classes (and their members) kept reachable for reflection
    pub reflection: Vec<ReflectionEntry>,

    /// Resource patterns, normalized from either accepted shape
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Resources>,

    /// Sections the merge does not touch (`bundles`, `jni`, `serialization`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One reflection record. Only `type` is interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReflectionEntry(Map<String, Value>);

impl ReflectionEntry {
    /// Deduplication key for this entry.
    ///
    /// String types key as themselves; structured types (proxy descriptors and
    /// the like) key as their compact JSON encoding. `None` when the entry has
    /// no usable `type`.
    pub fn type_key(&self) -> Option<String> {
        match self.0.get("type")? {
            Value::Null => None,
            Value::String(name) => Some(name.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl MetadataDocument {
    /// Parse a document from JSON text.
    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Render with sorted keys, two-space indentation and a trailing newline.
    ///
    /// Going through `Value` sorts every object's keys, so output stays
    /// byte-stable across runs and diffs cleanly.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        let value = serde_json::to_value(self)?;
        let mut rendered = serde_json::to_string_pretty(&value)?;
        rendered.push('\n');
        Ok(rendered)
    }

    /// Load a document from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MergeError> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(MergeError::NotFound {
                    path: path.to_path_buf(),
                })
            }
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                return Err(MergeError::MalformedDocument {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
            Err(e) => {
                return Err(MergeError::Io {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };

        Self::from_json_str(&content).map_err(|e| MergeError::MalformedDocument {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Save the document atomically (temporary file + rename).
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), MergeError> {
        let path = path.as_ref();
        let write_failure = |source: std::io::Error| MergeError::WriteFailure {
            path: path.to_path_buf(),
            source,
        };

        let rendered = self.to_json_string().map_err(|e| {
            write_failure(std::io::Error::new(ErrorKind::InvalidData, e.to_string()))
        })?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_failure)?;
            }
        }

        let temp_path = temp_path_for(path);
        fs::write(&temp_path, rendered.as_bytes()).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            write_failure(e)
        })?;
        fs::rename(&temp_path, path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            write_failure(e)
        })?;

        Ok(())
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "metadata.json".into());
    name.push(".tmp");
    path.with_file_name(name)
}
