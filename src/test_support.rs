use crate::config::{ProjectConfig, RawConfig, validate};
use serde_json::{Value, json};
use std::path::Path;

/// A complete, valid project configuration.
pub(crate) fn sample_config_json() -> Value {
    json!({
        "name": "Widget",
        "version": "1.2.0",
        "dizmo_settings": {
            "display_name": "Widget",
            "bundle_name": "Widget",
            "bundle_identifier": "com.acme.widget",
            "description": "A small widget.",
            "min_space_version": "1.3",
            "change_log": "Initial release.",
            "api_version": "1.3",
            "main_html": "index.html",
            "category": "tools",
            "width": 400,
            "height": 300,
            "box_inset_x": 0,
            "box_inset_y": 0,
            "tags": ["widget", "demo"]
        }
    })
}

/// [`sample_config_json`] as a raw map.
pub(crate) fn sample_raw_config() -> RawConfig {
    match sample_config_json() {
        Value::Object(map) => map,
        _ => unreachable!("sample config is an object"),
    }
}

/// Mutable access to the `dizmo_settings` of a raw config.
pub(crate) fn settings_mut(raw: &mut RawConfig) -> &mut serde_json::Map<String, Value> {
    raw.get_mut("dizmo_settings")
        .and_then(Value::as_object_mut)
        .expect("dizmo_settings object")
}

/// Validate a raw config and return its typed view.
pub(crate) fn validated(mut raw: RawConfig) -> ProjectConfig {
    validate(&mut raw).unwrap();
    ProjectConfig::from_validated(&raw).unwrap()
}

/// The sample configuration, validated.
pub(crate) fn sample_project_config() -> ProjectConfig {
    validated(sample_raw_config())
}

/// Write `config` as `project.cfg` in `dir`.
pub(crate) fn write_project_cfg(dir: &Path, config: &Value) {
    std::fs::write(
        dir.join("project.cfg"),
        serde_json::to_string_pretty(config).unwrap(),
    )
    .unwrap();
}
