use crate::context::ProjectLayout;
use crate::error::{DizmoError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Images copied into a production build, when present.
pub const PRODUCTION_ICONS: &[&str] = &[
    "Icon.png",
    "Icon-dark.png",
    "Icon.svg",
    "Icon-dark.svg",
    "Preview.png",
];

/// Candidate icons for a test build, in order of preference.
const TEST_ICON_CANDIDATES: &[(&str, &str)] = &[
    ("assets", "Icon.svg"),
    ("", "Icon.svg"),
    ("assets", "Icon.png"),
    ("", "Icon.png"),
];

/// Result of copying the production images.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct IconReport {
    pub copied: Vec<String>,
    /// Images that were found but could not be copied, with the reason.
    pub failed: Vec<(String, String)>,
}

/// Copy the production images into the build directory.
///
/// Each image is taken from the project root, or else from `assets/` inside
/// the build directory. Missing images are skipped and failed copies are
/// reported, neither stops the build.
pub fn copy_icons(layout: &ProjectLayout) -> IconReport {
    let mut report = IconReport::default();
    let staged_assets = layout.build_dir.join("assets");

    for &name in PRODUCTION_ICONS {
        let mut source = layout.project_root.join(name);
        if !source.is_file() {
            source = staged_assets.join(name);
        }
        if !source.is_file() {
            continue;
        }

        match fs::copy(&source, layout.build_dir.join(name)) {
            Ok(_) => report.copied.push(name.to_string()),
            Err(e) => {
                tracing::warn!(icon = name, error = %e, "could not copy image");
                report.failed.push((name.to_string(), e.to_string()));
            }
        }
    }

    report
}

/// Copy the preferred icon into a test build directory.
///
/// Returns the copied file name, or `None` when the project has no icon.
pub fn copy_test_icon(layout: &ProjectLayout, test_dir: &Path) -> Result<Option<String>> {
    let Some((source, name)) = find_test_icon(&layout.project_root) else {
        tracing::warn!("no icon found for test dizmo");
        return Ok(None);
    };

    fs::copy(&source, test_dir.join(name)).map_err(|e| {
        DizmoError::FileNotWritable(format!(
            "Could not write the icon \"{}\" to its target location: {}",
            name, e
        ))
    })?;
    Ok(Some(name.to_string()))
}

fn find_test_icon(project_root: &Path) -> Option<(PathBuf, &'static str)> {
    TEST_ICON_CANDIDATES.iter().find_map(|&(dir, name)| {
        let path = project_root.join(dir).join(name);
        path.is_file().then_some((path, name))
    })
}
