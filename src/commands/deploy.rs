//! Implementation of the `grace-dizmo deploy` command.

use super::ProjectContext;
use crate::cli::DeployArgs;
use crate::error::Result;
use crate::package::{DeployOutcome, deploy};

pub fn cmd_deploy(ctx: &ProjectContext, args: DeployArgs) -> Result<()> {
    let outcome = deploy(&ctx.layout, args.test.as_deref())?;

    if let DeployOutcome::FirstDeploy { .. } = outcome {
        println!(
            "The dizmo will be deployed, but you need to drag & drop the folder \"{}\" from the build directory \
             into dizmospace once to allow association with it. Otherwise your dizmo will not show up as installed.",
            ctx.config.name
        );
    }

    println!("Deployed to {}", outcome.target().display());
    Ok(())
}
