use std::{fs, path::Path};

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::json_format::to_ascii_json;

/// Ordered mapping used for every level of a resource document.
pub type ResourceMap = IndexMap<String, ResourceNode>;

/// A single node of a resource document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceNode {
    /// Translated text.
    Text(String),
    /// Nested group of keys.
    Branch(ResourceMap),
    /// Any other JSON value (numbers, booleans, arrays, null), kept verbatim.
    Other(Value),
}

impl ResourceNode {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResourceNode::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// An intermediate segment of a key path already holds a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot set \"{path}\": \"{segment}\" already holds a value, not a group of keys")]
pub struct PathConflict {
    pub path: String,
    /// Prefix of `path` that holds the value.
    pub segment: String,
}

/// A nested translation resource, one per language.
///
/// Key order is preserved both on load and on save, so rewriting a file
/// only changes the entries that were actually touched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceDocument {
    root: ResourceMap,
}

impl ResourceDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a document from JSON text. The root must be an object.
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    pub fn root(&self) -> &ResourceMap {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Resolve a dot-path key.
    ///
    /// Returns `None` when a segment is missing, when an intermediate segment
    /// is not a group of keys, or when the leaf is JSON `null`. A path that
    /// stops at a group returns that group.
    pub fn get(&self, key_path: &str) -> Option<&ResourceNode> {
        let mut parts = key_path.split('.');
        let mut current = self.root.get(parts.next()?)?;

        for part in parts {
            match current {
                ResourceNode::Branch(map) => current = map.get(part)?,
                _ => return None,
            }
        }

        match current {
            ResourceNode::Other(Value::Null) => None,
            node => Some(node),
        }
    }

    pub fn contains(&self, key_path: &str) -> bool {
        self.get(key_path).is_some()
    }

    /// Set the leaf at a dot-path key, creating intermediate groups as needed.
    ///
    /// An existing leaf (or group) at the final segment is overwritten.
    /// Descending through a segment that holds a value fails with
    /// [`PathConflict`] and leaves the document untouched.
    pub fn set(
        &mut self,
        key_path: &str,
        value: impl Into<String>,
    ) -> Result<(), PathConflict> {
        let (parent_path, leaf) = match key_path.rsplit_once('.') {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, key_path),
        };

        let mut current = &mut self.root;
        if let Some(parent_path) = parent_path {
            let mut consumed = 0;
            for part in parent_path.split('.') {
                consumed += part.len();
                let node = current
                    .entry(part.to_string())
                    .or_insert_with(|| ResourceNode::Branch(ResourceMap::new()));
                current = match node {
                    ResourceNode::Branch(map) => map,
                    _ => {
                        return Err(PathConflict {
                            path: key_path.to_string(),
                            segment: parent_path[..consumed].to_string(),
                        });
                    }
                };
                consumed += 1;
            }
        }

        current.insert(leaf.to_string(), ResourceNode::Text(value.into()));
        Ok(())
    }

    /// Number of leaves (text or other values) in the document.
    pub fn leaf_count(&self) -> usize {
        fn count(map: &ResourceMap) -> usize {
            map.values()
                .map(|node| match node {
                    ResourceNode::Branch(children) => count(children),
                    _ => 1,
                })
                .sum()
        }
        count(&self.root)
    }

    /// Pretty JSON with 2-space indentation, non-ASCII text kept as is.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Pretty JSON with the given indentation, every non-ASCII character escaped.
    pub fn to_ascii_json(&self, indent: usize) -> serde_json::Result<String> {
        to_ascii_json(self, indent)
    }

    /// Write the document as UTF-8 JSON with a trailing newline.
    pub fn write_pretty(&self, path: &Path) -> Result<()> {
        let content = self
            .to_pretty_json()
            .with_context(|| format!("Failed to serialize {}", path.display()))?;
        fs::write(path, format!("{}\n", content))
            .with_context(|| format!("Failed to write file: {}", path.display()))
    }
}
