//! Project layout resolution.
//!
//! Finds the dizmo project root (the nearest directory holding `project.cfg`)
//! from any working directory and resolves the fixed build, help, archive
//! and deployment paths from the project configuration.

use crate::config::ProjectConfig;
use crate::config::loader::LOCAL_CONFIG_FILE;
use crate::error::{DizmoError, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Build output directory relative to the project root.
pub const BUILD_DIR: &str = "build";

/// Help sources relative to the project root.
pub const HELP_DIR: &str = "help";

/// Assets directory relative to the project root.
pub const ASSETS_DIR: &str = "assets";

/// Locate the project root from the current working directory.
pub fn find_project_root_from_cwd() -> Result<PathBuf> {
    let cwd = env::current_dir().map_err(|e| {
        DizmoError::UserError(format!("failed to get current working directory: {}", e))
    })?;
    find_project_root(&cwd)
}

/// Walk up from `start` to the first directory containing `project.cfg`.
pub fn find_project_root(start: &Path) -> Result<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(LOCAL_CONFIG_FILE).is_file())
        .map(Path::to_path_buf)
        .ok_or_else(|| {
            DizmoError::FileNotFound(format!(
                "no {} found in '{}' or any parent directory",
                LOCAL_CONFIG_FILE,
                start.display()
            ))
        })
}

/// Resolved paths for one dizmo project. All paths are absolute when the
/// project root is.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectLayout {
    pub project_root: PathBuf,

    /// `<root>/build`, holding all build outputs and the archive.
    pub build_root: PathBuf,

    /// Production build directory (`build_path`, default `build/<name>`).
    pub build_dir: PathBuf,

    pub help_dir: PathBuf,

    pub assets_dir: PathBuf,

    /// Archive written by `zip` and sent by `upload`.
    pub archive_path: PathBuf,

    /// Folder the dizmo viewer loads installed dizmos from, if configured.
    pub deployment_path: Option<PathBuf>,

    name: String,
    bundle_identifier: String,
}

impl ProjectLayout {
    pub fn resolve(project_root: &Path, config: &ProjectConfig) -> Self {
        let build_root = project_root.join(BUILD_DIR);
        let build_dir = match &config.build_path {
            Some(path) => project_root.join(path),
            None => build_root.join(&config.name),
        };
        let deployment_path = config
            .deployment_path
            .as_ref()
            .map(|path| project_root.join(path));

        Self {
            project_root: project_root.to_path_buf(),
            archive_path: build_root.join(config.archive_name()),
            build_root,
            build_dir,
            help_dir: project_root.join(HELP_DIR),
            assets_dir: project_root.join(ASSETS_DIR),
            deployment_path,
            name: config.name.clone(),
            bundle_identifier: config.dizmo_settings.bundle_identifier.clone(),
        }
    }

    /// Build directory of the test dizmo `test` (`build/<name>_<test>`).
    pub fn test_build_dir(&self, test: &str) -> PathBuf {
        self.build_root.join(format!("{}_{}", self.name, test))
    }

    /// Build output for a production (`None`) or test build.
    pub fn output_dir(&self, test: Option<&str>) -> PathBuf {
        match test {
            Some(test) => self.test_build_dir(test),
            None => self.build_dir.clone(),
        }
    }

    /// Folder name a build is first staged under in the deployment path.
    pub fn staged_name(&self, test: Option<&str>) -> String {
        match test {
            Some(test) => format!("{}_{}", self.name, test),
            None => self.name.clone(),
        }
    }

    /// Folder name the viewer expects: the lowercase bundle identifier,
    /// with `.<lowercase test>` for test dizmos.
    pub fn deployed_name(&self, test: Option<&str>) -> String {
        let identifier = self.bundle_identifier.to_lowercase();
        match test {
            Some(test) => format!("{}.{}", identifier, test.to_lowercase()),
            None => identifier,
        }
    }

    /// The configured deployment path.
    pub fn require_deployment_path(&self) -> Result<&Path> {
        self.deployment_path.as_deref().ok_or_else(|| {
            DizmoError::missing(
                "deployment_path",
                "specify the deployment_path of your dizmo viewer in grace.cfg or project.cfg",
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_project_config;
    use tempfile::TempDir;

    #[test]
    fn test_default_paths() {
        let config = sample_project_config();
        let layout = ProjectLayout::resolve(Path::new("/work/widget"), &config);

        assert_eq!(layout.build_root, Path::new("/work/widget/build"));
        assert_eq!(layout.build_dir, Path::new("/work/widget/build/Widget"));
        assert_eq!(layout.help_dir, Path::new("/work/widget/help"));
        assert_eq!(
            layout.archive_path,
            Path::new("/work/widget/build/Widget-1.2.0.dzm")
        );
        assert_eq!(layout.deployment_path, None);
    }

    #[test]
    fn test_configured_paths() {
        let mut config = sample_project_config();
        config.build_path = Some(PathBuf::from("out/widget"));
        config.zip_name = Some("widget.zip".to_string());
        config.deployment_path = Some(PathBuf::from("/opt/dizmos"));

        let layout = ProjectLayout::resolve(Path::new("/work/widget"), &config);

        assert_eq!(layout.build_dir, Path::new("/work/widget/out/widget"));
        assert_eq!(layout.archive_path, Path::new("/work/widget/build/widget.zip"));
        assert_eq!(layout.require_deployment_path().unwrap(), Path::new("/opt/dizmos"));
    }

    #[test]
    fn test_test_build_names() {
        let mut config = sample_project_config();
        config.dizmo_settings.bundle_identifier = "com.Acme.Widget".to_string();
        let layout = ProjectLayout::resolve(Path::new("/work"), &config);

        assert_eq!(layout.test_build_dir("T1"), Path::new("/work/build/Widget_T1"));
        assert_eq!(layout.output_dir(None), layout.build_dir);
        assert_eq!(layout.staged_name(Some("T1")), "Widget_T1");
        assert_eq!(layout.deployed_name(None), "com.acme.widget");
        assert_eq!(layout.deployed_name(Some("T1")), "com.acme.widget.t1");
    }

    #[test]
    fn test_missing_deployment_path() {
        let layout = ProjectLayout::resolve(Path::new("/work"), &sample_project_config());
        let err = layout.require_deployment_path().unwrap_err();
        assert_eq!(err.key(), Some("deployment_path"));
    }

    #[test]
    fn test_find_project_root_from_subdirectory() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(LOCAL_CONFIG_FILE), "{}").unwrap();
        let nested = temp.path().join("src").join("javascript");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_project_root(&nested).unwrap(), temp.path());
    }

    #[test]
    fn test_find_project_root_outside_project() {
        let temp = TempDir::new().unwrap();
        let err = find_project_root(temp.path()).unwrap_err();
        assert!(matches!(err, DizmoError::FileNotFound(_)));
    }
}
