//! Implementation of the `grace-dizmo upload` command.

use super::ProjectContext;
use super::publish::logged_in_client;
use crate::error::Result;
use crate::store::{UploadOutcome, upload_archive};

pub fn cmd_upload(ctx: &ProjectContext) -> Result<()> {
    let client = logged_in_client(ctx)?;

    match upload_archive(&client, &ctx.layout.archive_path)? {
        UploadOutcome::Created => println!(
            "Uploaded new dizmo \"{}\" to {}",
            client.dizmo_id(),
            client.base_url()
        ),
        UploadOutcome::Updated => println!(
            "Uploaded version {} of \"{}\" to {}",
            ctx.config.version,
            client.dizmo_id(),
            client.base_url()
        ),
    }

    Ok(())
}
