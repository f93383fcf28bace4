use super::*;
use crate::config::EmbeddedProject;
use crate::test_support::{sample_project_config, sample_raw_config, settings_mut, validated};
use serde_json::json;
use tempfile::TempDir;

#[test]
fn test_production_manifest_fields() {
    let config = sample_project_config();
    let manifest = build_manifest(&config, None);

    assert_eq!(manifest.get("BundleDisplayName"), Some(&json!("Widget")));
    assert_eq!(manifest.get("BundleIdentifier"), Some(&json!("com.acme.widget")));
    assert_eq!(manifest.get("BundleVersion"), Some(&json!("1.2.0")));
    assert_eq!(manifest.get("BundleShortVersionString"), Some(&json!("1.2.0")));
    assert_eq!(manifest.get("Width"), Some(&json!(400)));
    assert_eq!(manifest.get("CloseBoxInsetX"), Some(&json!(0)));
    assert_eq!(manifest.get("Category"), Some(&json!("tools")));
    assert_eq!(manifest.get("Tags"), Some(&json!(["widget", "demo"])));
    assert_eq!(manifest.get("TitleEditable"), Some(&json!(true)));
    assert_eq!(manifest.get("HiddenDizmo"), Some(&json!(false)));
    assert_eq!(manifest.get("ForceUpdate"), Some(&json!(false)));
}

#[test]
fn test_unset_optional_fields_are_absent() {
    let manifest = build_manifest(&sample_project_config(), None);

    for key in [
        "ElementsVersion",
        "HelperVersion",
        "Attributes",
        "Private",
        "Public",
        "EmbeddedBundles",
    ] {
        assert!(!manifest.contains_key(key), "{} should be absent", key);
    }
}

#[test]
fn test_suffix_changes_name_and_identifier() {
    let mut config = sample_project_config();
    config.embedded_projects = vec![EmbeddedProject {
        bundle_identifier: "com.a".to_string(),
    }];

    let manifest = build_manifest(&config, Some("T1"));

    assert_eq!(manifest.get("BundleDisplayName"), Some(&json!("Widget T1")));
    assert_eq!(
        manifest.get("BundleIdentifier"),
        Some(&json!("com.acme.widget.t1"))
    );
    assert!(!manifest.contains_key("EmbeddedBundles"));
}

#[test]
fn test_embedded_bundles_listed_in_order() {
    let mut config = sample_project_config();
    config.embedded_projects = ["com.a", "com.b"]
        .into_iter()
        .map(|id| EmbeddedProject {
            bundle_identifier: id.to_string(),
        })
        .collect();

    let manifest = build_manifest(&config, None);
    assert_eq!(manifest.get("EmbeddedBundles"), Some(&json!(["com.a", "com.b"])));
}

#[test]
fn test_additional_values_overwrite_fixed_fields() {
    let mut raw = sample_raw_config();
    settings_mut(&mut raw).insert(
        "additional_plist_values".to_string(),
        json!({"Width": 999, "CustomKey": "custom"}),
    );
    let manifest = build_manifest(&validated(raw), None);

    assert_eq!(manifest.get("Width"), Some(&json!(999)));
    assert_eq!(manifest.get("CustomKey"), Some(&json!("custom")));
}

#[test]
fn test_optional_fields_win_over_additional_values() {
    let mut raw = sample_raw_config();
    let settings = settings_mut(&mut raw);
    settings.insert("elements_version".to_string(), json!("2.0"));
    settings.insert("helper_version".to_string(), json!("1.1"));
    settings.insert(
        "additional_plist_values".to_string(),
        json!({"ElementsVersion": "0.9"}),
    );
    let manifest = build_manifest(&validated(raw), None);

    assert_eq!(manifest.get("ElementsVersion"), Some(&json!("2.0")));
    assert_eq!(manifest.get("HelperVersion"), Some(&json!("1.1")));
}

#[test]
fn test_tree_values_become_top_level_fields() {
    let mut raw = sample_raw_config();
    settings_mut(&mut raw).insert(
        "tree_values".to_string(),
        json!({"attributes": {"geometry": {"width": 10}}, "public": {"count": 1}}),
    );
    let manifest = build_manifest(&validated(raw), None);

    assert_eq!(
        manifest.get("Attributes"),
        Some(&json!({"geometry": {"width": 10}}))
    );
    assert_eq!(manifest.get("Public"), Some(&json!({"count": 1})));
    assert!(!manifest.contains_key("Private"));
}

#[test]
fn test_keys_are_sorted() {
    let manifest = build_manifest(&sample_project_config(), None);
    let keys: Vec<&str> = manifest.keys().collect();
    let mut sorted = keys.clone();
    sorted.sort_unstable();
    assert_eq!(keys, sorted);
}

#[test]
fn test_plist_output_is_deterministic() {
    let config = sample_project_config();
    let first = build_manifest(&config, None).to_plist_xml().unwrap();
    let second = build_manifest(&config, None).to_plist_xml().unwrap();
    assert_eq!(first, second);

    let xml = String::from_utf8(first).unwrap();
    assert!(xml.starts_with("<?xml"));
    assert!(xml.contains("<key>BundleIdentifier</key>"));
    assert!(xml.contains("<string>com.acme.widget</string>"));
    assert!(xml.contains("<integer>400</integer>"));
    assert!(xml.contains("<true/>"));
    assert!(xml.find("<key>AllowResize</key>") < xml.find("<key>Width</key>"));
}

#[test]
fn test_plist_drops_nested_nulls() {
    let mut raw = sample_raw_config();
    settings_mut(&mut raw).insert(
        "additional_plist_values".to_string(),
        json!({"Nothing": null, "Nested": {"a": null, "b": 1.5}}),
    );
    let manifest = build_manifest(&validated(raw), None);

    let xml = String::from_utf8(manifest.to_plist_xml().unwrap()).unwrap();
    assert!(!xml.contains("<key>Nothing</key>"));
    assert!(!xml.contains("<key>a</key>"));

    let parsed = plist::Value::from_reader_xml(xml.as_bytes()).unwrap();
    let nested = parsed
        .as_dictionary()
        .and_then(|d| d.get("Nested"))
        .and_then(plist::Value::as_dictionary)
        .unwrap();
    assert_eq!(nested.get("b").and_then(plist::Value::as_real), Some(1.5));
}

#[test]
fn test_write_creates_info_plist() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("build").join("Widget").join(MANIFEST_FILE);

    let manifest = build_manifest(&sample_project_config(), None);
    manifest.write(&path).unwrap();

    let parsed = plist::Value::from_file(&path).unwrap();
    let dict = parsed.as_dictionary().unwrap();
    assert_eq!(
        dict.get("BundleName").and_then(plist::Value::as_string),
        Some("Widget")
    );
    assert_eq!(
        dict.get("Height").and_then(plist::Value::as_signed_integer),
        Some(300)
    );
}
