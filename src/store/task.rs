use crate::error::{DizmoError, Result};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+\.?)*[0-9]+$").expect("Invalid version regex"));

/// A publish-related store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreTask {
    /// Publish the given version, or the configured version when `None`.
    Publish { version: Option<String> },
    /// Print the store's publish information.
    DisplayPublishState,
    /// Unpublish the given version, or the configured version when `None`.
    Unpublish { version: Option<String> },
}

impl StoreTask {
    /// Parse `publish`, `publish:display`, `publish:<version>`, `unpublish`
    /// or `unpublish:<version>`.
    pub fn parse(spec: &str) -> Result<Self> {
        let (name, argument) = match spec.split_once(':') {
            Some((name, argument)) => (name, Some(argument)),
            None => (spec, None),
        };

        match (name, argument) {
            ("publish", None) => Ok(StoreTask::Publish { version: None }),
            ("publish", Some("display")) => Ok(StoreTask::DisplayPublishState),
            ("publish", Some(version)) => Ok(StoreTask::Publish {
                version: Some(parse_version(spec, version)?),
            }),
            ("unpublish", None) => Ok(StoreTask::Unpublish { version: None }),
            ("unpublish", Some(version)) => Ok(StoreTask::Unpublish {
                version: Some(parse_version(spec, version)?),
            }),
            _ => Err(DizmoError::UnknownCommand(format!(
                "unknown store task '{}'; use publish, publish:display, publish:<version>, unpublish or unpublish:<version>",
                spec
            ))),
        }
    }

    /// The version this task acts on, falling back to `configured`.
    pub fn version<'a>(&'a self, configured: &'a str) -> Option<&'a str> {
        match self {
            StoreTask::Publish { version } | StoreTask::Unpublish { version } => {
                Some(version.as_deref().unwrap_or(configured))
            }
            StoreTask::DisplayPublishState => None,
        }
    }
}

impl fmt::Display for StoreTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreTask::Publish { version: None } => write!(f, "publish"),
            StoreTask::Publish { version: Some(v) } => write!(f, "publish:{}", v),
            StoreTask::DisplayPublishState => write!(f, "publish:display"),
            StoreTask::Unpublish { version: None } => write!(f, "unpublish"),
            StoreTask::Unpublish { version: Some(v) } => write!(f, "unpublish:{}", v),
        }
    }
}

fn parse_version(spec: &str, version: &str) -> Result<String> {
    if VERSION_REGEX.is_match(version) {
        Ok(version.to_string())
    } else {
        Err(DizmoError::UnknownCommand(format!(
            "'{}' in '{}' is not a version; expected something like 1.2.0",
            version, spec
        )))
    }
}
