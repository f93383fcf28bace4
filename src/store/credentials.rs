use crate::config::Credentials;
use crate::error::{DizmoError, Result};
use dialoguer::{Input, Password};

const USERNAME_PROMPT: &str =
    "Please provide the username for your upload server (or leave blank if none is required)";
const PASSWORD_PROMPT: &str =
    "Please provide the password for your upload server (or leave blank if none is required)";

/// Source of store credentials the configuration does not provide.
pub trait CredentialPrompt {
    fn username(&mut self, prompt: &str) -> Result<String>;

    /// Ask for a password without echoing it.
    fn password(&mut self, prompt: &str) -> Result<String>;
}

/// Prompts on the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl CredentialPrompt for TerminalPrompt {
    fn username(&mut self, prompt: &str) -> Result<String> {
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| DizmoError::UserError(format!("failed to read username: {}", e)))
    }

    fn password(&mut self, prompt: &str) -> Result<String> {
        Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .map_err(|e| DizmoError::UserError(format!("failed to read password: {}", e)))
    }
}

/// Username and password from the configuration, prompting for whichever
/// is missing.
pub fn resolve_credentials(
    configured: &Credentials,
    prompt: &mut dyn CredentialPrompt,
) -> Result<(String, String)> {
    let username = match &configured.username {
        Some(username) => username.clone(),
        None => prompt.username(USERNAME_PROMPT)?,
    };
    let password = match &configured.password {
        Some(password) => password.clone(),
        None => prompt.password(PASSWORD_PROMPT)?,
    };
    Ok((username, password))
}
