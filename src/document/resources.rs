//! Resource section normalization.
//!
//! Metadata in the wild stores resources either as a bare array of patterns or
//! as an object with an `includes` array (older `resource-config.json` layout).
//! Both are read into one flat pattern list plus the shape they came in, and
//! written back in that same shape.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One resource pattern, identified by `glob` or, failing that, `pattern`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourcePattern(Map<String, Value>);

impl ResourcePattern {
    /// Identifying key: the `glob` value, else the `pattern` value.
    pub fn key(&self) -> Option<&str> {
        self.0
            .get("glob")
            .and_then(Value::as_str)
            .or_else(|| self.0.get("pattern").and_then(Value::as_str))
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Shape the resources section was read in.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceShape {
    /// `"resources": [ ... ]`
    Flat,
    /// `"resources": { "includes": [ ... ], ... }` with the other wrapper fields
    Wrapped(Map<String, Value>),
}

/// Canonical resources section: a flat pattern list plus its original shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawResources", into = "RawResources")]
pub struct Resources {
    shape: ResourceShape,
    patterns: Vec<ResourcePattern>,
}

impl Resources {
    pub fn new(shape: ResourceShape, patterns: Vec<ResourcePattern>) -> Self {
        Self { shape, patterns }
    }

    /// An empty section with the same shape as `other`, without its extra wrapper fields.
    pub fn empty_like(other: &Resources) -> Self {
        let shape = match other.shape {
            ResourceShape::Flat => ResourceShape::Flat,
            ResourceShape::Wrapped(_) => ResourceShape::Wrapped(Map::new()),
        };
        Self::new(shape, Vec::new())
    }

    pub fn shape(&self) -> &ResourceShape {
        &self.shape
    }

    pub fn patterns(&self) -> &[ResourcePattern] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn push(&mut self, pattern: ResourcePattern) {
        self.patterns.push(pattern);
    }
}

#[derive(Serialize, Deserialize)]
#[serde(
    untagged,
    expecting = "an array of resource patterns or an object with an `includes` array"
)]
enum RawResources {
    Flat(Vec<ResourcePattern>),
    Wrapped(WrappedResources),
}

#[derive(Serialize, Deserialize)]
struct WrappedResources {
    #[serde(default)]
    includes: Vec<ResourcePattern>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<RawResources> for Resources {
    fn from(raw: RawResources) -> Self {
        match raw {
            RawResources::Flat(patterns) => Resources::new(ResourceShape::Flat, patterns),
            RawResources::Wrapped(wrapped) => {
                Resources::new(ResourceShape::Wrapped(wrapped.extra), wrapped.includes)
            }
        }
    }
}

impl From<Resources> for RawResources {
    fn from(resources: Resources) -> Self {
        match resources.shape {
            ResourceShape::Flat => RawResources::Flat(resources.patterns),
            ResourceShape::Wrapped(extra) => RawResources::Wrapped(WrappedResources {
                includes: resources.patterns,
                extra,
            }),
        }
    }
}
