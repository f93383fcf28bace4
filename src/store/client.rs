use crate::error::{DizmoError, Result};
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{COOKIE, SET_COOKIE};
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;

/// Where a [`StoreClient`] is in its session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No successful login yet.
    Unauthenticated,
    /// Logged in; holds a session cookie.
    Authenticated,
    /// The given version was published.
    Published { version: String },
    /// The given version was unpublished.
    Unpublished { version: String },
    /// The publish state was queried.
    Queried,
}

/// Error body returned by the store on failure.
#[derive(Debug, Deserialize)]
struct StoreErrorBody {
    errormessage: Option<String>,
    errornumber: Option<Value>,
}

/// Blocking client for one dizmo on one store.
#[derive(Debug)]
pub struct StoreClient {
    http: Client,
    base_url: String,
    dizmo_id: String,
    session: Option<String>,
    state: SessionState,
}

impl StoreClient {
    /// Create a client for `dizmo_id` on the store at `base_url`.
    ///
    /// With `verify_ssl` off, invalid and self-signed certificates are
    /// accepted. No request timeout is set.
    pub fn new(base_url: &str, dizmo_id: &str, verify_ssl: bool) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("grace-dizmo/", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(!verify_ssl)
            .timeout(None::<Duration>)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            dizmo_id: dizmo_id.to_string(),
            session: None,
            state: SessionState::Unauthenticated,
        })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn dizmo_id(&self) -> &str {
        &self.dizmo_id
    }

    /// Log in and keep the session cookie for later requests.
    ///
    /// A 401 or 403 answer is [`DizmoError::WrongLoginCredentials`] and leaves
    /// the client unauthenticated.
    pub fn login(&mut self, username: &str, password: &str) -> Result<()> {
        let url = format!("{}/oauth/login", self.base_url);
        tracing::info!(url = %url, "logging in to store");

        let response = self
            .http
            .post(&url)
            .json(&json!({"username": username, "password": password}))
            .send()?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::warn!(status = status.as_u16(), "store rejected credentials");
            return Err(DizmoError::WrongLoginCredentials(
                "Could not log in with the given credentials.".to_string(),
            ));
        }
        if !status.is_success() {
            return Err(self.remote_error(response));
        }

        let cookies: Vec<&str> = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(|v| v.split(';').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .collect();
        tracing::debug!(cookies = cookies.len(), "login succeeded");

        self.session = Some(cookies.join("; "));
        self.state = SessionState::Authenticated;
        Ok(())
    }

    /// Publish (`true`) or unpublish (`false`) a version of the dizmo.
    pub fn set_publish_state(&mut self, version: &str, published: bool) -> Result<()> {
        let url = format!(
            "{}/dizmo/{}/publish/{}",
            self.base_url, self.dizmo_id, version
        );
        tracing::info!(url = %url, published, "setting publish state");

        let response = self
            .authorized(self.http.put(&url))?
            .json(&json!({"publish": published}))
            .send()?;

        if !response.status().is_success() {
            return Err(self.remote_error(response));
        }

        let version = version.to_string();
        self.state = if published {
            SessionState::Published { version }
        } else {
            SessionState::Unpublished { version }
        };
        Ok(())
    }

    /// Fetch the publish information of the dizmo as returned by the store.
    pub fn query_publish_state(&mut self) -> Result<String> {
        let url = format!("{}/dizmo/{}/publish", self.base_url, self.dizmo_id);
        tracing::info!(url = %url, "querying publish state");

        let response = self.authorized(self.http.get(&url))?.send()?;
        if !response.status().is_success() {
            return Err(self.remote_error(response));
        }

        let body = response.text()?;
        self.state = SessionState::Queried;
        Ok(body)
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// Attach the session cookie, failing when not logged in.
    pub(crate) fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let Some(session) = &self.session else {
            return Err(DizmoError::UserError(
                "not logged in to the store; log in first".to_string(),
            ));
        };

        if session.is_empty() {
            Ok(request)
        } else {
            Ok(request.header(COOKIE, session.as_str()))
        }
    }

    pub(crate) fn remote_error(&self, response: Response) -> DizmoError {
        let (message, number) = read_error_body(response);
        DizmoError::RemoteServer {
            base_url: self.base_url.clone(),
            message,
            number,
        }
    }
}

/// Extract the store's error message and number from a failed response.
///
/// Falls back to the body text (or the status reason) and the HTTP status
/// code when the body is not the store's JSON error shape.
pub(crate) fn read_error_body(response: Response) -> (String, i64) {
    let status = response.status();
    let text = response.text().unwrap_or_default();
    tracing::debug!(status = status.as_u16(), body = %text, "store returned an error");

    let parsed = serde_json::from_str::<StoreErrorBody>(&text).ok();
    let message = parsed
        .as_ref()
        .and_then(|b| b.errormessage.clone())
        .unwrap_or_else(|| {
            if text.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            } else {
                text.trim().to_string()
            }
        });
    let number = parsed
        .and_then(|b| b.errornumber)
        .and_then(|n| match n {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
        .unwrap_or_else(|| i64::from(status.as_u16()));

    (message, number)
}
