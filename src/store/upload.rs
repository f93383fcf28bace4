use super::client::{StoreClient, read_error_body};
use crate::error::{DizmoError, Result};
use reqwest::StatusCode;
use reqwest::blocking::multipart::{Form, Part};
use std::fs;
use std::path::Path;

/// What an upload did on the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The dizmo was new to the store.
    Created,
    /// A new archive replaced the dizmo's existing one.
    Updated,
}

/// Upload a `.dzm` archive with a logged-in client.
///
/// The store is asked for the dizmo's latest published version first: a 404
/// creates the dizmo with `POST /dizmo`, a 200 updates it with
/// `PUT /dizmo/<id>`. Any other answer is a store error.
pub fn upload_archive(client: &StoreClient, archive: &Path) -> Result<UploadOutcome> {
    if !archive.is_file() {
        return Err(DizmoError::FileNotFound(format!(
            "Could not find the zip file. Please check if \"{}\" exists.",
            archive.display()
        )));
    }

    let latest_url = format!(
        "{}/dizmo/{}/publish/latest",
        client.base_url(),
        client.dizmo_id()
    );
    let response = client.authorized(client.http().get(&latest_url))?.send()?;

    let (request, outcome) = match response.status() {
        StatusCode::NOT_FOUND => {
            let url = format!("{}/dizmo", client.base_url());
            tracing::info!(url = %url, "uploading new dizmo");
            (client.http().post(url), UploadOutcome::Created)
        }
        StatusCode::OK => {
            let url = format!("{}/dizmo/{}", client.base_url(), client.dizmo_id());
            tracing::info!(url = %url, "uploading new version of existing dizmo");
            (client.http().put(url), UploadOutcome::Updated)
        }
        _ => return Err(client.remote_error(response)),
    };

    let content = fs::read(archive).map_err(|e| {
        DizmoError::UserError(format!(
            "Something went wrong while opening the zip file '{}': {}",
            archive.display(),
            e
        ))
    })?;
    let file_name = archive
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dizmo.dzm".to_string());
    let form = Form::new().part("file", Part::bytes(content).file_name(file_name));

    let response = client.authorized(request)?.multipart(form).send()?;
    if !response.status().is_success() {
        let (message, number) = read_error_body(response);
        return Err(DizmoError::FileUpload {
            base_url: client.base_url().to_string(),
            message,
            number,
        });
    }

    tracing::debug!(?outcome, "upload finished");
    Ok(outcome)
}
