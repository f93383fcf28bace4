//! grace-dizmo: packaging conventions for dizmo projects.
//!
//! The library exposes the pieces the `grace-dizmo` binary is built from:
//! - [`config`]: layered loading and validation of `project.cfg`
//! - [`manifest`]: `Info.plist` generation
//! - [`package`]: build, archive, and deployment steps
//! - [`store`]: the dizmo store client

pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod logging;
pub mod manifest;
pub mod package;
pub mod store;

#[cfg(test)]
mod test_support;

pub use config::{ProjectConfig, RawConfig, check_update_keys, load_project_config, validate};
pub use error::{DizmoError, Result};
pub use manifest::{Manifest, build_manifest};
pub use store::{SessionState, StoreClient};
