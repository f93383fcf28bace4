//! Dizmo store client.
//!
//! [`StoreClient`] logs in against the store's REST API and then publishes,
//! unpublishes, queries, or uploads a dizmo. Every request is blocking and is
//! tried exactly once.

mod client;
mod credentials;
mod task;
mod upload;


pub use client::{SessionState, StoreClient};
pub use credentials::{CredentialPrompt, TerminalPrompt, resolve_credentials};
pub use task::StoreTask;
pub use upload::{UploadOutcome, upload_archive};
