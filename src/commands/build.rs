//! Implementation of the `grace-dizmo build` command.

use super::ProjectContext;
use crate::error::Result;
use crate::package::{self, HelpOutcome};

pub fn cmd_build(ctx: &ProjectContext) -> Result<()> {
    let report = package::build(&ctx.layout, &ctx.config)?;

    for (icon, reason) in &report.icons.failed {
        println!("Could not copy your {} file: {}", icon, reason);
    }

    match report.help {
        HelpOutcome::Packaged { files } => {
            println!("Packaged help ({} files).", files);
        }
        HelpOutcome::NoHelpFolder => println!(
            "There is no help folder. Please refer to the dizmo documentation on how to create one."
        ),
        HelpOutcome::NoHelpFile => println!(
            "Could not find any help.md file in any language directory under help. \
             Please refer to the dizmo documentation for more information about how to set up the help directory."
        ),
    }

    println!("Built {} into {}", ctx.config.name, report.build_dir.display());
    Ok(())
}
