//! Implementation of the `grace-dizmo validate` command.

use super::ProjectContext;
use crate::error::Result;

/// Print a short summary of the validated configuration.
///
/// Loading the context already ran validation; reaching this point means
/// the configuration is valid.
pub fn cmd_validate(ctx: &ProjectContext) -> Result<()> {
    let config = &ctx.config;
    let settings = &config.dizmo_settings;

    println!("Configuration of '{}' is valid.", config.name);
    println!();
    println!("  {:18} {}", "Bundle identifier", settings.bundle_identifier);
    println!("  {:18} {}", "Version", config.version);
    println!("  {:18} {}", "Category", settings.category);
    println!("  {:18} {}x{}", "Size", settings.width, settings.height);

    let embedded = config.embedded_bundle_identifiers();
    if !embedded.is_empty() {
        println!("  {:18} {}", "Embedded bundles", embedded.join(", "));
    }

    Ok(())
}
