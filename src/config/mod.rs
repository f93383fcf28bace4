//! Project configuration for dizmo packaging.
//!
//! Configuration flows through three steps:
//! 1. [`loader`] merges `~/.grace/grace.cfg`, `project.cfg` and `-o` overrides
//!    into one raw JSON map.
//! 2. [`validate`] checks the `dizmo_settings` section and injects defaults.
//! 3. [`ProjectConfig::from_validated`] produces the typed view used by the
//!    manifest builder, the packaging steps and the store client.

pub mod loader;
mod model;
pub mod types;
mod validator;


use crate::error::Result;
use std::path::Path;

pub use model::{Credentials, DizmoSettings, EmbeddedProject, ProjectConfig, TreeValues, Urls};
pub use types::Category;
pub use validator::{RawConfig, check_update_keys, validate};

/// Load, override, and validate the configuration of the project at `project_root`.
pub fn load_project_config(
    project_root: &Path,
    global_config: Option<&Path>,
    overrides: &[String],
) -> Result<ProjectConfig> {
    let mut raw = loader::load_layers(project_root, global_config)?;
    loader::apply_overrides(&mut raw, overrides)?;
    validate(&mut raw)?;
    ProjectConfig::from_validated(&raw)
}
