//! Build steps around the fixed dizmo directory layout.
//!
//! A production build stages `src/` into the build directory, copies the
//! icons, packages the help, and writes `Info.plist`. A test build does the
//! same for `build/<name>_<test>` with a suffixed manifest and one icon.
//! [`create_archive`] turns a build into a `.dzm`, and [`deploy`] installs it
//! into the viewer's deployment folder.

mod archive;
mod deploy;
mod help;
mod icons;

#[cfg(test)]
mod tests;

use crate::config::ProjectConfig;
use crate::context::ProjectLayout;
use crate::error::{DizmoError, Result};
use crate::fs::copy_tree;
use crate::manifest::{MANIFEST_FILE, build_manifest};
use std::fs;
use std::path::{Path, PathBuf};

pub use archive::{create_archive, zip_directory};
pub use deploy::{DeployOutcome, deploy, move_deploy};
pub use help::{HELP_ARCHIVE, HelpOutcome, build_help};
pub use icons::{IconReport, PRODUCTION_ICONS, copy_icons, copy_test_icon};

/// Project sources copied into every build.
pub const SOURCE_DIR: &str = "src";

/// Summary of a production build.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildReport {
    pub build_dir: PathBuf,
    pub icons: IconReport,
    pub help: HelpOutcome,
}

/// Summary of a test build.
#[derive(Debug, Clone, PartialEq)]
pub struct TestBuildReport {
    pub build_dir: PathBuf,
    /// The icon copied, if the project has one.
    pub icon: Option<String>,
}

/// Run a production build. The build directory is cleared first.
pub fn build(layout: &ProjectLayout, config: &ProjectConfig) -> Result<BuildReport> {
    check_build_dir(layout, &layout.build_dir)?;
    prepare_dir(&layout.build_dir)?;
    stage_sources(layout, &layout.build_dir)?;

    let icons = copy_icons(layout);
    let help = build_help(&layout.help_dir, &layout.build_dir)?;
    build_manifest(config, None).write(&layout.build_dir.join(MANIFEST_FILE))?;

    tracing::info!(build_dir = %layout.build_dir.display(), "built dizmo");
    Ok(BuildReport {
        build_dir: layout.build_dir.clone(),
        icons,
        help,
    })
}

/// Build the test dizmo `test`.
pub fn build_test(
    layout: &ProjectLayout,
    config: &ProjectConfig,
    test: &str,
) -> Result<TestBuildReport> {
    let build_dir = layout.test_build_dir(test);
    check_build_dir(layout, &build_dir)?;
    prepare_dir(&build_dir)?;
    stage_sources(layout, &build_dir)?;

    build_manifest(config, Some(test)).write(&build_dir.join(MANIFEST_FILE))?;
    let icon = copy_test_icon(layout, &build_dir)?;

    tracing::info!(build_dir = %build_dir.display(), test, "built test dizmo");
    Ok(TestBuildReport { build_dir, icon })
}

/// A build directory must not hold the project or its sources, since it is
/// cleared before every build.
fn check_build_dir(layout: &ProjectLayout, dir: &Path) -> Result<()> {
    let sources = layout.project_root.join(SOURCE_DIR);
    if layout.project_root.starts_with(dir) || sources.starts_with(dir) {
        return Err(DizmoError::wrong_format(
            "build_path",
            format!(
                "'{}' contains the project sources and cannot be used as build directory",
                dir.display()
            ),
        ));
    }
    Ok(())
}

/// Start a build from an empty directory so earlier outputs do not leak
/// into the archive.
fn prepare_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        let removed = if dir.is_dir() {
            fs::remove_dir_all(dir)
        } else {
            fs::remove_file(dir)
        };
        removed.map_err(|e| {
            DizmoError::RemoveFolder(format!(
                "failed to clear build directory '{}': {}",
                dir.display(),
                e
            ))
        })?;
    }

    fs::create_dir_all(dir).map_err(|e| {
        DizmoError::FileNotWritable(format!(
            "failed to create build directory '{}': {}",
            dir.display(),
            e
        ))
    })
}

fn stage_sources(layout: &ProjectLayout, build_dir: &Path) -> Result<()> {
    let sources = layout.project_root.join(SOURCE_DIR);
    if sources.is_dir() {
        copy_tree(&sources, build_dir)?;
    } else {
        tracing::debug!(path = %sources.display(), "no sources to stage");
    }
    Ok(())
}
