//! Validation of the `dizmo_settings` section.
//!
//! [`validate`] walks the merged configuration map, stops at the first rule
//! that is violated, and fills in defaults for optional settings in place.
//! [`check_update_keys`] guards the overrides a parent project may apply to an
//! embedded sub-project.

use super::types::{
    BOOLEAN_SETTING_DEFAULTS, Category, DIZMO_SETTINGS_KEY, OPTIONAL_STRING_SETTINGS,
    OVERRIDABLE_SETTINGS, REQUIRED_SETTINGS, Requirement, SUBPROJECT_IDENTIFIER_KEY,
    TREE_VALUE_KEYS,
};
use crate::error::{DizmoError, Result};
use serde_json::{Map, Value};

/// A raw, merged configuration: string keys to arbitrary JSON values.
pub type RawConfig = Map<String, Value>;

/// Validate a merged configuration and inject defaults for optional settings.
///
/// After a successful call every required setting is present and well typed,
/// the optional booleans hold a value, and absent optional strings and tree
/// values are set to `null`. Running it again on its own output succeeds and
/// changes nothing.
pub fn validate(config: &mut RawConfig) -> Result<()> {
    let settings = match config.get_mut(DIZMO_SETTINGS_KEY) {
        Some(Value::Object(settings)) => settings,
        Some(_) => {
            return Err(DizmoError::wrong_format(
                DIZMO_SETTINGS_KEY,
                "has to be an object",
            ));
        }
        None => {
            return Err(DizmoError::missing(
                DIZMO_SETTINGS_KEY,
                "could not find settings for dizmo",
            ));
        }
    };

    for &(key, requirement) in REQUIRED_SETTINGS {
        check_required(settings, key, requirement)?;
    }

    for &(key, default) in BOOLEAN_SETTING_DEFAULTS {
        match settings.get(key) {
            None | Some(Value::Null) => {
                settings.insert(key.to_string(), Value::Bool(default));
            }
            Some(Value::Bool(_)) => {}
            Some(_) => {
                return Err(DizmoError::wrong_format(
                    key,
                    format!("the provided value for {} needs to be a boolean", key),
                ));
            }
        }
    }

    for &key in OPTIONAL_STRING_SETTINGS {
        match settings.get(key) {
            None => {
                settings.insert(key.to_string(), Value::Null);
            }
            Some(Value::Null) | Some(Value::String(_)) => {}
            Some(_) => {
                return Err(DizmoError::wrong_format(
                    key,
                    format!("the {} key needs to be a string", key),
                ));
            }
        }
    }

    validate_tree_values(settings)?;

    if let Some(extra) = settings.get("additional_plist_values")
        && !extra.is_object()
    {
        return Err(DizmoError::wrong_format(
            "additional_plist_values",
            "has to be an object of manifest keys and values",
        ));
    }

    validate_embedded_projects(config)
}

/// Check and rewrite an override destined for an embedded sub-project.
///
/// Under `dizmo_settings` only `width`, `height`, `allow_resize` and
/// `title_editable` may be overridden. A `bundle_identifier_subproject` entry
/// is accepted and renamed to `bundle_identifier`.
pub fn check_update_keys(updates: &mut RawConfig) -> Result<()> {
    let Some(settings) = updates.get_mut(DIZMO_SETTINGS_KEY) else {
        return Ok(());
    };

    let Some(settings) = settings.as_object_mut() else {
        return Err(DizmoError::wrong_format(
            DIZMO_SETTINGS_KEY,
            "overrides have to be an object",
        ));
    };

    let rejected: Vec<&str> = settings
        .keys()
        .map(String::as_str)
        .filter(|k| !OVERRIDABLE_SETTINGS.contains(k) && *k != SUBPROJECT_IDENTIFIER_KEY)
        .collect();

    if !rejected.is_empty() {
        return Err(DizmoError::KeyNotAllowed(format!(
            "Only \"width\", \"height\", \"allow_resize\" and \"title_editable\" are allowed under \"dizmo_settings\" (found {})",
            rejected
                .iter()
                .map(|k| format!("\"{}\"", k))
                .collect::<Vec<_>>()
                .join(", ")
        )));
    }

    if let Some(identifier) = settings.remove(SUBPROJECT_IDENTIFIER_KEY) {
        settings.insert("bundle_identifier".to_string(), identifier);
    }

    Ok(())
}

fn check_required(settings: &Map<String, Value>, key: &str, requirement: Requirement) -> Result<()> {
    let value = settings.get(key).ok_or_else(|| {
        DizmoError::missing(
            key,
            format!("specify {} in your config file under `dizmo_settings`", key),
        )
    })?;

    match requirement {
        Requirement::NonEmptyString | Requirement::CategoryName => {
            let text = value
                .as_str()
                .ok_or_else(|| DizmoError::wrong_format(key, "needs to be a string"))?;

            if text.is_empty() {
                return Err(DizmoError::wrong_format(
                    key,
                    "has to consist of at least one character",
                ));
            }

            if requirement == Requirement::CategoryName && Category::from_str(text).is_none() {
                return Err(DizmoError::wrong_format(
                    key,
                    format!(
                        "'{}' is not a category; use one of the following: {}",
                        text,
                        Category::names_for_display()
                    ),
                ));
            }
        }
        Requirement::Integer => {
            if value.as_i64().is_none() {
                return Err(DizmoError::wrong_format(key, "needs to be a whole number"));
            }
        }
        Requirement::List => {
            if !value.is_array() {
                return Err(DizmoError::wrong_format(
                    key,
                    "needs to be a list [\"...\", \"...\"]",
                ));
            }
        }
    }

    Ok(())
}

fn validate_tree_values(settings: &mut Map<String, Value>) -> Result<()> {
    if !settings.contains_key("tree_values") {
        settings.insert("tree_values".to_string(), Value::Null);
        return Ok(());
    }

    let tree = match settings.get_mut("tree_values") {
        None | Some(Value::Null) => return Ok(()),
        Some(Value::Object(tree)) => tree,
        Some(_) => {
            return Err(DizmoError::wrong_format(
                "tree_values",
                "the provided tree_values key has to be an object",
            ));
        }
    };

    for &key in TREE_VALUE_KEYS {
        match tree.get(key) {
            None => {
                tree.insert(key.to_string(), Value::Null);
            }
            Some(Value::Null) | Some(Value::Object(_)) => {}
            Some(_) => {
                return Err(DizmoError::wrong_format(
                    format!("tree_values.{}", key),
                    format!("the provided {} key in tree_values has to be an object", key),
                ));
            }
        }
    }

    Ok(())
}

fn validate_embedded_projects(config: &RawConfig) -> Result<()> {
    let projects = match config.get("embedded_projects") {
        None | Some(Value::Null) => return Ok(()),
        Some(Value::Array(projects)) => projects,
        Some(_) => {
            return Err(DizmoError::wrong_format(
                "embedded_projects",
                "needs to be a list of project objects",
            ));
        }
    };

    for (index, project) in projects.iter().enumerate() {
        match project.get("bundle_identifier") {
            Some(Value::String(id)) if !id.is_empty() => {}
            Some(Value::String(_)) | None | Some(Value::Null) => {
                return Err(DizmoError::missing(
                    format!("embedded_projects[{}].bundle_identifier", index),
                    "the bundle_identifier of the embedded project has not been set",
                ));
            }
            Some(_) => {
                return Err(DizmoError::wrong_format(
                    format!("embedded_projects[{}].bundle_identifier", index),
                    "needs to be a string",
                ));
            }
        }
    }

    Ok(())
}
