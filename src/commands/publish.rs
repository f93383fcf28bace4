//! Implementation of the `grace-dizmo publish` and `unpublish` commands.

use super::ProjectContext;
use crate::error::Result;
use crate::store::{StoreClient, StoreTask, TerminalPrompt, resolve_credentials};

/// Build a store client for the project and log in, prompting for any
/// credentials the configuration lacks.
pub fn logged_in_client(ctx: &ProjectContext) -> Result<StoreClient> {
    let config = &ctx.config;
    let mut client = StoreClient::new(
        &config.store_url()?,
        &config.dizmo_settings.bundle_identifier,
        config.verify_ssl,
    )?;

    let (username, password) = resolve_credentials(&config.credentials, &mut TerminalPrompt)?;
    client.login(&username, &password)?;
    Ok(client)
}

/// Run a publish-related store task.
pub fn cmd_store_task(ctx: &ProjectContext, task: StoreTask) -> Result<()> {
    let mut client = logged_in_client(ctx)?;
    let dizmo_id = client.dizmo_id().to_string();

    match &task {
        StoreTask::DisplayPublishState => {
            println!("{}", client.query_publish_state()?);
        }
        StoreTask::Publish { .. } => {
            let version = task.version(&ctx.config.version).unwrap_or_default();
            println!(
                "Publishing dizmo with id \"{}\" and version \"{}\".",
                dizmo_id, version
            );
            client.set_publish_state(version, true)?;
            println!("Successfully published the dizmo.");
        }
        StoreTask::Unpublish { .. } => {
            let version = task.version(&ctx.config.version).unwrap_or_default();
            println!(
                "Unpublishing dizmo with id \"{}\" and version \"{}\".",
                dizmo_id, version
            );
            client.set_publish_state(version, false)?;
            println!("Successfully removed publish status.");
        }
    }

    Ok(())
}
