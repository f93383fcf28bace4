use super::*;
use crate::error::DizmoError;
use crate::test_support::sample_project_config;
use std::fs::File;
use tempfile::TempDir;

fn project() -> (TempDir, ProjectConfig, ProjectLayout) {
    let temp = TempDir::new().unwrap();
    let mut config = sample_project_config();
    config.deployment_path = Some(temp.path().join("viewer"));
    let layout = ProjectLayout::resolve(temp.path(), &config);
    (temp, config, layout)
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn zip_names(path: &Path) -> Vec<String> {
    let archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();
    names
}

#[test]
fn test_build_writes_manifest_and_sources() {
    let (_temp, config, layout) = project();
    write(&layout.project_root.join("src/index.html"), "<html></html>");

    let report = build(&layout, &config).unwrap();

    assert_eq!(report.build_dir, layout.build_dir);
    assert!(layout.build_dir.join("index.html").is_file());
    let manifest = plist::Value::from_file(layout.build_dir.join(MANIFEST_FILE)).unwrap();
    assert_eq!(
        manifest
            .as_dictionary()
            .and_then(|d| d.get("BundleIdentifier"))
            .and_then(plist::Value::as_string),
        Some("com.acme.widget")
    );
    assert_eq!(report.help, HelpOutcome::NoHelpFolder);
}

#[test]
fn test_rebuild_drops_stale_files() {
    let (_temp, config, layout) = project();
    write(&layout.project_root.join("src/old.js"), "old");
    build(&layout, &config).unwrap();
    assert!(layout.build_dir.join("old.js").is_file());

    fs::remove_file(layout.project_root.join("src/old.js")).unwrap();
    write(&layout.project_root.join("src/new.js"), "new");
    build(&layout, &config).unwrap();

    assert!(!layout.build_dir.join("old.js").exists());
    assert!(layout.build_dir.join("new.js").is_file());
    assert!(layout.build_dir.join(MANIFEST_FILE).is_file());
}

#[test]
fn test_build_refuses_project_root_as_build_dir() {
    let temp = TempDir::new().unwrap();
    let mut config = sample_project_config();
    config.build_path = Some(PathBuf::from("."));
    let layout = ProjectLayout::resolve(temp.path(), &config);
    write(&layout.project_root.join("src/index.html"), "<html></html>");

    let err = build(&layout, &config).unwrap_err();
    assert_eq!(err.key(), Some("build_path"));
    assert!(layout.project_root.join("src/index.html").is_file());
}

#[test]
fn test_build_copies_icons_with_assets_fallback() {
    let (_temp, config, layout) = project();
    write(&layout.project_root.join("Icon.png"), "png");
    write(&layout.project_root.join("src/assets/Icon.svg"), "svg");

    let report = build(&layout, &config).unwrap();

    assert_eq!(report.icons.copied, vec!["Icon.png", "Icon.svg"]);
    assert!(report.icons.failed.is_empty());
    assert_eq!(fs::read_to_string(layout.build_dir.join("Icon.svg")).unwrap(), "svg");
    assert!(!layout.build_dir.join("Preview.png").exists());
}

#[test]
fn test_help_zip_requires_language_help() {
    let (temp, _config, layout) = project();
    let build_dir = temp.path().join("out");
    fs::create_dir_all(&build_dir).unwrap();

    write(&layout.help_dir.join("english/help.md"), "# Help");
    assert_eq!(
        build_help(&layout.help_dir, &build_dir).unwrap(),
        HelpOutcome::NoHelpFile
    );
    assert!(!build_dir.join(HELP_ARCHIVE).exists());

    write(&layout.help_dir.join("en/help.md"), "# Help");
    write(&layout.help_dir.join("en/images/shot.png"), "img");
    let outcome = build_help(&layout.help_dir, &build_dir).unwrap();

    assert_eq!(outcome, HelpOutcome::Packaged { files: 3 });
    let names = zip_names(&build_dir.join(HELP_ARCHIVE));
    assert!(names.contains(&"help/en/help.md".to_string()));
    assert!(names.contains(&"help/en/images/shot.png".to_string()));
    assert!(names.contains(&"help/english/help.md".to_string()));
}

#[test]
fn test_build_test_suffixes_manifest() {
    let (_temp, config, layout) = project();
    write(&layout.project_root.join("assets/Icon.png"), "png");
    write(&layout.project_root.join("Icon.svg"), "svg");

    let report = build_test(&layout, &config, "T1").unwrap();

    assert_eq!(report.build_dir, layout.test_build_dir("T1"));
    assert_eq!(report.icon.as_deref(), Some("Icon.svg"));
    assert!(report.build_dir.join("Icon.svg").is_file());

    let manifest = plist::Value::from_file(report.build_dir.join(MANIFEST_FILE)).unwrap();
    let dict = manifest.as_dictionary().unwrap();
    assert_eq!(
        dict.get("BundleIdentifier").and_then(plist::Value::as_string),
        Some("com.acme.widget.t1")
    );
    assert_eq!(
        dict.get("BundleDisplayName").and_then(plist::Value::as_string),
        Some("Widget T1")
    );
}

#[test]
fn test_build_test_without_icon() {
    let (_temp, config, layout) = project();
    let report = build_test(&layout, &config, "smoke").unwrap();
    assert_eq!(report.icon, None);
}

#[test]
fn test_archive_contains_bundle_folder() {
    let (_temp, config, layout) = project();
    write(&layout.project_root.join("src/index.html"), "<html></html>");
    build(&layout, &config).unwrap();

    let files = create_archive(&layout.build_dir, &layout.archive_path).unwrap();

    assert_eq!(files, 2);
    let names = zip_names(&layout.archive_path);
    assert!(names.contains(&"Widget/Info.plist".to_string()));
    assert!(names.contains(&"Widget/index.html".to_string()));
}

#[test]
fn test_archive_is_deterministic() {
    let (temp, config, layout) = project();
    build(&layout, &config).unwrap();

    let second = temp.path().join("second.dzm");
    create_archive(&layout.build_dir, &layout.archive_path).unwrap();
    create_archive(&layout.build_dir, &second).unwrap();

    assert_eq!(zip_names(&layout.archive_path), zip_names(&second));
}

#[test]
fn test_archive_requires_build() {
    let (_temp, _config, layout) = project();
    let err = create_archive(&layout.build_dir, &layout.archive_path).unwrap_err();
    assert!(matches!(err, DizmoError::FileNotFound(_)));
}

#[test]
fn test_first_deploy_then_replace() {
    let (_temp, config, layout) = project();
    build(&layout, &config).unwrap();
    let viewer = layout.deployment_path.clone().unwrap();

    let first = deploy(&layout, None).unwrap();
    assert!(matches!(first, DeployOutcome::FirstDeploy { .. }));
    assert_eq!(first.target(), viewer.join("com.acme.widget"));
    assert!(viewer.join("com.acme.widget").join(MANIFEST_FILE).is_file());
    assert!(!viewer.join("Widget").exists());

    let second = deploy(&layout, None).unwrap();
    assert!(matches!(second, DeployOutcome::Replaced { .. }));
    assert!(viewer.join("com.acme.widget").join(MANIFEST_FILE).is_file());
}

#[test]
fn test_deploy_when_name_matches_bundle_identifier() {
    let temp = TempDir::new().unwrap();
    let mut config = sample_project_config();
    config.name = "Com.Acme.Widget".to_string();
    config.deployment_path = Some(temp.path().join("viewer"));
    let layout = ProjectLayout::resolve(temp.path(), &config);
    build(&layout, &config).unwrap();
    let viewer = layout.deployment_path.clone().unwrap();

    let first = deploy(&layout, None).unwrap();
    assert_eq!(first.target(), viewer.join("com.acme.widget"));
    assert!(viewer.join("com.acme.widget").join(MANIFEST_FILE).is_file());

    let second = deploy(&layout, None).unwrap();
    assert!(matches!(second, DeployOutcome::Replaced { .. }));
    assert!(viewer.join("com.acme.widget").join(MANIFEST_FILE).is_file());
    assert!(!viewer.join("Com.Acme.Widget.staging").exists());
}

#[test]
fn test_deploy_test_build() {
    let (_temp, config, layout) = project();
    build_test(&layout, &config, "T1").unwrap();
    let viewer = layout.deployment_path.clone().unwrap();

    let outcome = deploy(&layout, Some("T1")).unwrap();
    assert_eq!(outcome.target(), viewer.join("com.acme.widget.t1"));
    assert!(!viewer.join("Widget_T1").exists());
}

#[test]
fn test_deploy_requires_deployment_path() {
    let temp = TempDir::new().unwrap();
    let config = sample_project_config();
    let layout = ProjectLayout::resolve(temp.path(), &config);

    let err = deploy(&layout, None).unwrap_err();
    assert_eq!(err.key(), Some("deployment_path"));
}

#[test]
fn test_deploy_requires_build() {
    let (_temp, _config, layout) = project();
    let err = deploy(&layout, None).unwrap_err();
    assert!(matches!(err, DizmoError::FileNotFound(_)));
}
