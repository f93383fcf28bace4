//! `Info.plist` manifest generation.
//!
//! [`build_manifest`] turns a validated [`ProjectConfig`](crate::config::ProjectConfig)
//! into a flat [`Manifest`]. The manifest is key-sorted, so serializing the
//! same configuration twice yields byte-identical XML.

mod builder;

#[cfg(test)]
mod tests;

use crate::error::{DizmoError, Result};
use crate::fs::atomic_write;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

pub use builder::build_manifest;

/// File name of the manifest inside a dizmo bundle.
pub const MANIFEST_FILE: &str = "Info.plist";

/// A flat mapping from manifest field name to value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    fields: BTreeMap<String, Value>,
}

impl Manifest {
    pub(crate) fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Field names in output order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Serialize as an Apple XML property list.
    ///
    /// JSON `null` has no plist counterpart; null entries inside nested
    /// values are dropped.
    pub fn to_plist_xml(&self) -> Result<Vec<u8>> {
        let mut root = plist::Dictionary::new();
        for (key, value) in &self.fields {
            if let Some(value) = to_plist_value(value) {
                root.insert(key.clone(), value);
            }
        }

        let mut buffer = Vec::new();
        plist::Value::Dictionary(root)
            .to_writer_xml(&mut buffer)
            .map_err(|e| {
                DizmoError::FileNotWritable(format!("could not serialize {}: {}", MANIFEST_FILE, e))
            })?;
        Ok(buffer)
    }

    /// Write the XML property list to `path`, replacing any existing file.
    pub fn write(&self, path: &Path) -> Result<()> {
        let xml = self.to_plist_xml()?;
        atomic_write(path, &xml).map_err(|e| {
            DizmoError::FileNotWritable(format!(
                "Could not write plist to target location '{}': {}",
                path.display(),
                e
            ))
        })?;
        tracing::debug!(path = %path.display(), fields = self.len(), "wrote manifest");
        Ok(())
    }
}

fn to_plist_value(value: &Value) -> Option<plist::Value> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(plist::Value::Boolean(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(plist::Value::from(i))
            } else if let Some(u) = n.as_u64() {
                Some(plist::Value::from(u))
            } else {
                n.as_f64().map(plist::Value::Real)
            }
        }
        Value::String(s) => Some(plist::Value::String(s.clone())),
        Value::Array(items) => Some(plist::Value::Array(
            items.iter().filter_map(to_plist_value).collect(),
        )),
        Value::Object(map) => {
            let mut dict = plist::Dictionary::new();
            for (key, value) in map {
                if let Some(value) = to_plist_value(value) {
                    dict.insert(key.clone(), value);
                }
            }
            Some(plist::Value::Dictionary(dict))
        }
    }
}
