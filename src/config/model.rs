//! Typed view of a validated project configuration.
//!
//! The validator works on the raw JSON map so it can name any offending key;
//! once it passes, [`ProjectConfig::from_validated`] turns the map into these
//! structs for the manifest builder, the packaging steps, and the store client.

use super::types::{Category, DIZMO_SETTINGS_KEY};
use super::validator::RawConfig;
use crate::error::{DizmoError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Settings found under `dizmo_settings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DizmoSettings {
    pub display_name: String,
    pub bundle_name: String,
    pub bundle_identifier: String,
    pub description: String,
    pub min_space_version: String,
    pub change_log: String,
    pub api_version: String,
    pub main_html: String,
    pub category: Category,
    pub width: i64,
    pub height: i64,
    pub box_inset_x: i64,
    pub box_inset_y: i64,
    pub tags: Vec<Value>,
    pub hidden_dizmo: bool,
    pub allow_resize: bool,
    pub title_editable: bool,
    pub force_update: bool,
    #[serde(default)]
    pub elements_version: Option<String>,
    #[serde(default)]
    pub helper_version: Option<String>,
    #[serde(default)]
    pub tree_values: Option<TreeValues>,
    /// Extra manifest entries copied verbatim into `Info.plist`.
    #[serde(default)]
    pub additional_plist_values: Map<String, Value>,
}

/// Initial data-tree values shipped with the dizmo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeValues {
    #[serde(default)]
    pub attributes: Option<Map<String, Value>>,
    #[serde(default)]
    pub private: Option<Map<String, Value>>,
    #[serde(default)]
    pub public: Option<Map<String, Value>>,
}

/// A dizmo bundled inside the parent dizmo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedProject {
    pub bundle_identifier: String,
}

/// Store endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Urls {
    #[serde(default)]
    pub dizmo_store: Option<String>,
}

/// Store credentials. Missing values are asked for interactively.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// A merged, validated project configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name; names the build folder and the archive.
    pub name: String,

    /// Dizmo version, written to `BundleVersion`.
    pub version: String,

    /// Build output folder, relative to the project root (default: `build/<name>`).
    #[serde(default)]
    pub build_path: Option<PathBuf>,

    /// Folder the dizmo viewer loads installed dizmos from.
    #[serde(default)]
    pub deployment_path: Option<PathBuf>,

    /// Archive file name (default: `<name>-<version>.dzm`).
    #[serde(default)]
    pub zip_name: Option<String>,

    pub dizmo_settings: DizmoSettings,

    #[serde(default)]
    pub embedded_projects: Vec<EmbeddedProject>,

    #[serde(default)]
    pub urls: Urls,

    #[serde(default)]
    pub credentials: Credentials,

    /// Verify the store's TLS certificate. Off by default for legacy stores
    /// running self-signed certificates.
    #[serde(default)]
    pub verify_ssl: bool,
}

impl ProjectConfig {
    /// Build the typed configuration from a map that already passed
    /// [`validate`](super::validate).
    ///
    /// Checks the top-level `name` and `version` keys, which the manifest and
    /// archive naming depend on.
    pub fn from_validated(raw: &RawConfig) -> Result<Self> {
        for key in ["name", "version"] {
            match raw.get(key) {
                None | Some(Value::Null) => {
                    return Err(DizmoError::missing(
                        key,
                        format!("specify a {} in your project.cfg", key),
                    ));
                }
                Some(Value::String(s)) if s.is_empty() => {
                    return Err(DizmoError::wrong_format(
                        key,
                        "has to consist of at least one character",
                    ));
                }
                Some(Value::String(_)) => {}
                Some(_) => return Err(DizmoError::wrong_format(key, "needs to be a string")),
            }
        }

        if !raw.contains_key(DIZMO_SETTINGS_KEY) {
            return Err(DizmoError::missing(
                DIZMO_SETTINGS_KEY,
                "could not find settings for dizmo",
            ));
        }

        serde_json::from_value(Value::Object(raw.clone()))
            .map_err(|e| DizmoError::wrong_format("project.cfg", e.to_string()))
    }

    /// Store base URL, without a trailing slash.
    pub fn store_url(&self) -> Result<String> {
        self.urls
            .dizmo_store
            .as_deref()
            .map(|url| url.trim_end_matches('/').to_string())
            .ok_or_else(|| {
                DizmoError::missing(
                    "urls.dizmo_store",
                    "could not find the dizmo_store key in either the global or local config file",
                )
            })
    }

    /// Archive file name (`zip_name`, or `<name>-<version>.dzm`).
    pub fn archive_name(&self) -> String {
        self.zip_name
            .clone()
            .unwrap_or_else(|| format!("{}-{}.dzm", self.name, self.version))
    }

    /// Bundle identifiers of all embedded projects, in configuration order.
    pub fn embedded_bundle_identifiers(&self) -> Vec<String> {
        self.embedded_projects
            .iter()
            .map(|p| p.bundle_identifier.clone())
            .collect()
    }
}
