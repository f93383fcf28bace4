//! Implementation of the `grace-dizmo zip` command.

use super::ProjectContext;
use crate::error::Result;
use crate::package::create_archive;

pub fn cmd_zip(ctx: &ProjectContext) -> Result<()> {
    let layout = &ctx.layout;
    let files = create_archive(&layout.build_dir, &layout.archive_path)?;
    println!(
        "Wrote {} ({} files)",
        layout.archive_path.display(),
        files
    );
    Ok(())
}
