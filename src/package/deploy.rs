use crate::context::ProjectLayout;
use crate::error::{DizmoError, Result};
use crate::fs::{copy_tree, move_path};
use std::fs;
use std::path::{Path, PathBuf};

/// What a deployment replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    /// An earlier deployment of the dizmo was replaced.
    Replaced { target: PathBuf },
    /// Nothing was deployed under this identifier before; the viewer has
    /// to be associated with the dizmo once by hand.
    FirstDeploy { target: PathBuf },
}

impl DeployOutcome {
    pub fn target(&self) -> &Path {
        match self {
            DeployOutcome::Replaced { target } | DeployOutcome::FirstDeploy { target } => target,
        }
    }
}

/// Appended to the staging folder when its name would collide with the
/// deployed folder, ignoring case.
const STAGING_SUFFIX: &str = ".staging";

/// Install a production (`test == None`) or test build into the viewer's
/// deployment folder.
///
/// The build is staged as `<deployment_path>/<name>[_<test>]` and then moved
/// to `<deployment_path>/<lowercase bundle id>[.<lowercase test>]`, replacing
/// any earlier deployment. When both names match ignoring case the build is
/// staged under `<name>.staging` instead.
pub fn deploy(layout: &ProjectLayout, test: Option<&str>) -> Result<DeployOutcome> {
    let deployment_path = layout.require_deployment_path()?;
    let build = layout.output_dir(test);
    if !build.is_dir() {
        return Err(DizmoError::FileNotFound(format!(
            "build directory '{}' does not exist; build the dizmo first",
            build.display()
        )));
    }

    let target_name = layout.deployed_name(test);
    let mut staged_name = layout.staged_name(test);
    if staged_name.eq_ignore_ascii_case(&target_name) {
        staged_name.push_str(STAGING_SUFFIX);
    }

    let staged = deployment_path.join(staged_name);
    if staged.exists() {
        remove_folder(&staged)?;
    }
    copy_tree(&build, &staged)?;

    move_deploy(&staged, deployment_path.join(target_name))
}

/// Move a staged deployment over `target`.
pub fn move_deploy(source: &Path, target: PathBuf) -> Result<DeployOutcome> {
    let replaced = target.exists();
    if replaced {
        remove_folder(&target)?;
    }

    move_path(source, &target).map_err(|e| {
        DizmoError::FileNotWritable(format!(
            "Could not move the deploy target to the dizmo path: {}",
            e
        ))
    })?;
    tracing::info!(target = %target.display(), replaced, "deployed dizmo");

    Ok(if replaced {
        DeployOutcome::Replaced { target }
    } else {
        DeployOutcome::FirstDeploy { target }
    })
}

fn remove_folder(path: &Path) -> Result<()> {
    let removed = if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    removed.map_err(|e| {
        DizmoError::RemoveFolder(format!(
            "Could not remove the deploy folder '{}': {}",
            path.display(),
            e
        ))
    })
}
