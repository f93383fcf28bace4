//! Command implementations for grace-dizmo.
//!
//! [`dispatch`] resolves the project, loads its configuration once, and
//! routes the parsed command to its handler.

mod build;
mod deploy;
mod manifest;
mod publish;
mod test_build;
mod upload;
mod validate;
mod zip_cmd;

use crate::cli::{Cli, Command};
use crate::config::loader::global_config_path;
use crate::config::{ProjectConfig, load_project_config};
use crate::context::{ProjectLayout, find_project_root, find_project_root_from_cwd};
use crate::error::Result;
use crate::store::StoreTask;
use std::path::PathBuf;

/// A loaded project: its configuration and resolved paths.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    pub config: ProjectConfig,
    pub layout: ProjectLayout,
}

/// Load the project the CLI points at.
pub fn load_context(cli: &Cli) -> Result<ProjectContext> {
    let project_root = match &cli.project {
        Some(dir) => find_project_root(dir)?,
        None => find_project_root_from_cwd()?,
    };
    let global_config: Option<PathBuf> = cli.global_config.clone().or_else(global_config_path);

    let mut config = load_project_config(&project_root, global_config.as_deref(), &cli.overrides)?;
    if cli.verify_ssl {
        config.verify_ssl = true;
    }

    tracing::debug!(
        root = %project_root.display(),
        name = %config.name,
        version = %config.version,
        "loaded project"
    );
    let layout = ProjectLayout::resolve(&project_root, &config);
    Ok(ProjectContext { config, layout })
}

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    let ctx = load_context(&cli)?;

    match cli.command {
        Command::Validate => validate::cmd_validate(&ctx),
        Command::Manifest(args) => manifest::cmd_manifest(&ctx, args),
        Command::Build => build::cmd_build(&ctx),
        Command::Test(args) => test_build::cmd_test(&ctx, args),
        Command::Zip => zip_cmd::cmd_zip(&ctx),
        Command::Deploy(args) => deploy::cmd_deploy(&ctx, args),
        Command::Upload => upload::cmd_upload(&ctx),
        Command::Publish(args) => {
            let task = match args.target {
                Some(target) => StoreTask::parse(&format!("publish:{}", target))?,
                None => StoreTask::Publish { version: None },
            };
            publish::cmd_store_task(&ctx, task)
        }
        Command::Unpublish(args) => {
            let task = match args.version {
                Some(version) => StoreTask::parse(&format!("unpublish:{}", version))?,
                None => StoreTask::Unpublish { version: None },
            };
            publish::cmd_store_task(&ctx, task)
        }
    }
}
