//! Implementation of the `grace-dizmo manifest` command.

use super::ProjectContext;
use crate::cli::ManifestArgs;
use crate::error::{DizmoError, Result};
use crate::manifest::build_manifest;
use std::io::Write;

/// Print the manifest as XML, or write it to `--output`.
pub fn cmd_manifest(ctx: &ProjectContext, args: ManifestArgs) -> Result<()> {
    let manifest = build_manifest(&ctx.config, args.test.as_deref());

    match args.output {
        Some(path) => {
            let path = ctx.layout.project_root.join(path);
            manifest.write(&path)?;
            println!("Wrote {}", path.display());
        }
        None => {
            let xml = manifest.to_plist_xml()?;
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(&xml)
                .and_then(|()| stdout.write_all(b"\n"))
                .map_err(|e| DizmoError::UserError(format!("failed to write manifest: {}", e)))?;
        }
    }

    Ok(())
}
