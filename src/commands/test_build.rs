//! Implementation of the `grace-dizmo test` command.

use super::ProjectContext;
use crate::cli::TestArgs;
use crate::error::Result;
use crate::package;

pub fn cmd_test(ctx: &ProjectContext, args: TestArgs) -> Result<()> {
    let report = package::build_test(&ctx.layout, &ctx.config, &args.name)?;

    if report.icon.is_none() {
        println!(
            "Could not find an Icon for your test dizmo. It is strongly recommended to add \"Icon.svg\" in the assets folder."
        );
    }

    println!(
        "Built test dizmo '{}' into {}",
        args.name,
        report.build_dir.display()
    );
    Ok(())
}
