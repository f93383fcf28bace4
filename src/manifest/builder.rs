use super::Manifest;
use crate::config::ProjectConfig;
use serde_json::{Value, json};

/// Build the manifest for a project.
///
/// With a `suffix` (a test name) the display name gains `" <suffix>"`, the
/// bundle identifier gains `".<lowercase suffix>"`, and embedded bundles are
/// left out. Without one, `EmbeddedBundles` lists the embedded projects'
/// identifiers when there are any.
///
/// `additional_plist_values` are applied over the fixed fields. The optional
/// version and tree-value fields are applied after them, and only when set.
pub fn build_manifest(config: &ProjectConfig, suffix: Option<&str>) -> Manifest {
    let settings = &config.dizmo_settings;

    let (display_name, identifier) = match suffix {
        Some(suffix) => (
            format!("{} {}", settings.display_name, suffix),
            format!("{}.{}", settings.bundle_identifier, suffix.to_lowercase()),
        ),
        None => (
            settings.display_name.clone(),
            settings.bundle_identifier.clone(),
        ),
    };

    let mut manifest = Manifest::default();
    manifest.insert("BundleDisplayName", json!(display_name));
    manifest.insert("BundleIdentifier", json!(identifier));
    manifest.insert("BundleName", json!(settings.bundle_name));
    manifest.insert("BundleShortVersionString", json!(config.version));
    manifest.insert("BundleVersion", json!(config.version));
    manifest.insert("CloseBoxInsetX", json!(settings.box_inset_x));
    manifest.insert("CloseBoxInsetY", json!(settings.box_inset_y));
    manifest.insert("MainHTML", json!(settings.main_html));
    manifest.insert("Width", json!(settings.width));
    manifest.insert("Height", json!(settings.height));
    manifest.insert("ApiVersion", json!(settings.api_version));
    manifest.insert("Description", json!(settings.description));
    manifest.insert("ChangeLog", json!(settings.change_log));
    manifest.insert("MinSpaceVersion", json!(settings.min_space_version));
    manifest.insert("Tags", Value::Array(settings.tags.clone()));
    manifest.insert("Category", json!(settings.category.as_str()));
    manifest.insert("HiddenDizmo", json!(settings.hidden_dizmo));
    manifest.insert("AllowResize", json!(settings.allow_resize));
    manifest.insert("TitleEditable", json!(settings.title_editable));
    manifest.insert("ForceUpdate", json!(settings.force_update));

    for (key, value) in &settings.additional_plist_values {
        manifest.insert(key.clone(), value.clone());
    }

    if let Some(version) = &settings.helper_version {
        manifest.insert("HelperVersion", json!(version));
    }
    if let Some(version) = &settings.elements_version {
        manifest.insert("ElementsVersion", json!(version));
    }

    if let Some(tree) = &settings.tree_values {
        for (key, values) in [
            ("Attributes", &tree.attributes),
            ("Private", &tree.private),
            ("Public", &tree.public),
        ] {
            if let Some(values) = values {
                manifest.insert(key, Value::Object(values.clone()));
            }
        }
    }

    if suffix.is_none() {
        let embedded = config.embedded_bundle_identifiers();
        if !embedded.is_empty() {
            manifest.insert("EmbeddedBundles", json!(embedded));
        }
    }

    manifest
}
