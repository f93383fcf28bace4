//! Layered configuration loading.
//!
//! A project's configuration is the global `~/.grace/grace.cfg` with the local
//! `project.cfg` deep-merged over it, followed by any `-o section:key=value`
//! overrides. Both files are JSON objects. Each layer is pre-parsed first so
//! store URLs and credentials may also be written under `dizmo_settings`.

use super::types::{BOOLEAN_SETTING_DEFAULTS, DIZMO_SETTINGS_KEY, REQUIRED_SETTINGS, Requirement};
use super::validator::{RawConfig, check_update_keys};
use crate::error::{DizmoError, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the per-project configuration file.
pub const LOCAL_CONFIG_FILE: &str = "project.cfg";

/// Directory under the home directory holding the global configuration.
pub const GLOBAL_CONFIG_DIR: &str = ".grace";

/// Name of the global configuration file.
pub const GLOBAL_CONFIG_FILE: &str = "grace.cfg";

/// Environment variable overriding the home directory used to find
/// `.grace/grace.cfg`.
pub const GRACE_HOME_VAR: &str = "GRACE_HOME";

/// Home directory used for the global configuration.
///
/// `GRACE_HOME` wins over the platform home directory so tests and CI can
/// isolate the global layer.
pub fn grace_home_dir() -> Option<PathBuf> {
    std::env::var(GRACE_HOME_VAR)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
}

/// Path of the global configuration file, if a home directory is known.
pub fn global_config_path() -> Option<PathBuf> {
    grace_home_dir().map(|home| home.join(GLOBAL_CONFIG_DIR).join(GLOBAL_CONFIG_FILE))
}

/// Load and merge the global and local layers for the project at `project_root`.
///
/// `global_path` is usually [`global_config_path`]. A missing global file is
/// skipped; a missing `project.cfg` is an error.
pub fn load_layers(project_root: &Path, global_path: Option<&Path>) -> Result<RawConfig> {
    let mut merged = RawConfig::new();

    if let Some(global_path) = global_path
        && let Some(mut global) = read_layer(global_path)?
    {
        tracing::debug!(path = %global_path.display(), "loaded global config");
        preparse(&mut global);
        merge(&mut merged, global);
    }

    let local_path = project_root.join(LOCAL_CONFIG_FILE);
    let mut local = read_layer(&local_path)?.ok_or_else(|| {
        DizmoError::FileNotFound(format!(
            "could not find '{}'; run grace-dizmo from a dizmo project directory",
            local_path.display()
        ))
    })?;
    tracing::debug!(path = %local_path.display(), "loaded project config");
    preparse(&mut local);
    merge(&mut merged, local);

    Ok(merged)
}

/// Read one configuration layer. Returns `Ok(None)` when the file does not exist.
pub fn read_layer(path: &Path) -> Result<Option<RawConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path).map_err(|e| {
        DizmoError::UserError(format!(
            "failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;

    parse_layer(&content)
        .map(Some)
        .map_err(|e| match e {
            DizmoError::UserError(msg) => {
                DizmoError::UserError(format!("{} ({})", msg, path.display()))
            }
            other => other,
        })
}

/// Parse a configuration layer from JSON text.
pub fn parse_layer(content: &str) -> Result<RawConfig> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| DizmoError::UserError(format!("failed to parse config JSON: {}", e)))?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(DizmoError::wrong_format(
            "config",
            "the configuration has to be a JSON object",
        )),
    }
}

/// Hoist store settings written under `dizmo_settings` to the top level.
///
/// `dizmo_settings.urls.dizmo_store` becomes `urls.dizmo_store`, and
/// `dizmo_settings.credentials.{username,password}` become
/// `credentials.{username,password}`.
pub fn preparse(layer: &mut RawConfig) {
    let Some(Value::Object(settings)) = layer.get_mut(DIZMO_SETTINGS_KEY) else {
        return;
    };

    let store_url = match settings.remove("urls") {
        Some(Value::Object(mut urls)) => urls.remove("dizmo_store"),
        _ => None,
    };

    let mut hoisted_credentials = Map::new();
    if let Some(Value::Object(credentials)) = settings.get("credentials") {
        for key in ["username", "password"] {
            if let Some(value) = credentials.get(key) {
                hoisted_credentials.insert(key.to_string(), value.clone());
            }
        }
    }

    if let Some(url) = store_url {
        merge(
            layer,
            Map::from_iter([(
                "urls".to_string(),
                Value::Object(Map::from_iter([("dizmo_store".to_string(), url)])),
            )]),
        );
    }

    if !hoisted_credentials.is_empty() {
        merge(
            layer,
            Map::from_iter([(
                "credentials".to_string(),
                Value::Object(hoisted_credentials),
            )]),
        );
    }
}

/// Deep-merge `overlay` into `base`. Nested objects merge key by key; any
/// other value in `overlay` replaces the one in `base`.
pub fn merge(base: &mut RawConfig, overlay: RawConfig) {
    for (key, value) in overlay {
        let incoming = match value {
            Value::Object(incoming) => incoming,
            other => {
                base.insert(key, other);
                continue;
            }
        };

        if let Some(Value::Object(existing)) = base.get_mut(&key) {
            merge(existing, incoming);
            continue;
        }

        base.insert(key, Value::Object(incoming));
    }
}

/// Parse one `section:key=value` override into a nested map.
///
/// Values aimed at integer, boolean or list settings are read as JSON
/// (`400`, `true`). Every other value is kept as the raw text, so
/// `version=1.3` stays the string `"1.3"`.
pub fn parse_override(spec: &str) -> Result<RawConfig> {
    let (path, raw_value) = spec.split_once('=').ok_or_else(|| {
        DizmoError::UserError(format!(
            "invalid override '{}': expected section:key=value",
            spec
        ))
    })?;

    let segments: Vec<&str> = path.split(':').map(str::trim).collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(DizmoError::UserError(format!(
            "invalid override '{}': empty key segment",
            spec
        )));
    }

    let mut value = if takes_typed_value(&segments) {
        serde_json::from_str(raw_value).unwrap_or_else(|_| Value::String(raw_value.to_string()))
    } else {
        Value::String(raw_value.to_string())
    };
    for segment in segments.iter().skip(1).rev() {
        value = Value::Object(Map::from_iter([(segment.to_string(), value)]));
    }

    Ok(Map::from_iter([(segments[0].to_string(), value)]))
}

/// Whether the override path names a setting whose value is not a string.
fn takes_typed_value(segments: &[&str]) -> bool {
    match segments {
        ["verify_ssl"] => true,
        [DIZMO_SETTINGS_KEY, key] => {
            REQUIRED_SETTINGS.iter().any(|(name, requirement)| {
                name == key && matches!(requirement, Requirement::Integer | Requirement::List)
            }) || BOOLEAN_SETTING_DEFAULTS.iter().any(|(name, _)| name == key)
        }
        _ => false,
    }
}

/// Apply command-line overrides on top of a loaded configuration.
///
/// Overrides are combined, checked with [`check_update_keys`], and merged.
pub fn apply_overrides(config: &mut RawConfig, overrides: &[String]) -> Result<()> {
    if overrides.is_empty() {
        return Ok(());
    }

    let mut updates = RawConfig::new();
    for spec in overrides {
        merge(&mut updates, parse_override(spec)?);
    }

    check_update_keys(&mut updates)?;
    tracing::debug!(?updates, "applying config overrides");
    merge(config, updates);
    Ok(())
}
