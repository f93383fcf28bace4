//! CLI argument parsing for grace-dizmo.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use crate::logging::LogLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// grace-dizmo: validate, package, and publish dizmos.
///
/// Reads `project.cfg` (merged over `~/.grace/grace.cfg`), generates the
/// `Info.plist` manifest, builds and archives the bundle, and talks to the
/// dizmo store.
#[derive(Parser, Debug)]
#[command(name = "grace-dizmo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity of diagnostics written to stderr.
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    pub log_level: LogLevel,

    /// Project directory (default: the nearest directory holding project.cfg).
    #[arg(long, global = true, value_name = "DIR")]
    pub project: Option<PathBuf>,

    /// Global configuration file (default: ~/.grace/grace.cfg).
    #[arg(long, global = true, value_name = "FILE")]
    pub global_config: Option<PathBuf>,

    /// Override a setting, e.g. `-o dizmo_settings:width=400`.
    #[arg(short = 'o', long = "override", global = true, value_name = "KEY=VALUE")]
    pub overrides: Vec<String>,

    /// Verify the store's TLS certificate.
    #[arg(long, global = true)]
    pub verify_ssl: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for grace-dizmo.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate the merged project configuration.
    Validate,

    /// Print or write the Info.plist manifest.
    Manifest(ManifestArgs),

    /// Build the dizmo into its build directory.
    ///
    /// Stages src/, copies the icons, zips the help folder, and writes
    /// Info.plist.
    Build,

    /// Build a test dizmo into build/<name>_<test>.
    Test(TestArgs),

    /// Archive the build directory into a .dzm file.
    Zip,

    /// Install a build into the viewer's deployment folder.
    Deploy(DeployArgs),

    /// Upload the .dzm archive to the dizmo store.
    Upload,

    /// Publish a version on the store, or display the publish state.
    ///
    /// Without an argument the configured version is published.
    Publish(PublishArgs),

    /// Remove the publish state of a version on the store.
    Unpublish(UnpublishArgs),
}

#[derive(Parser, Debug)]
pub struct ManifestArgs {
    /// Generate the manifest of this test dizmo.
    #[arg(long)]
    pub test: Option<String>,

    /// Write to this file instead of stdout.
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct TestArgs {
    /// Name of the test dizmo.
    pub name: String,
}

#[derive(Parser, Debug)]
pub struct DeployArgs {
    /// Deploy the test dizmo with this name instead of the production build.
    #[arg(long)]
    pub test: Option<String>,
}

#[derive(Parser, Debug)]
pub struct PublishArgs {
    /// `display`, or the version to publish (e.g. 1.2.0).
    pub target: Option<String>,
}

#[derive(Parser, Debug)]
pub struct UnpublishArgs {
    /// Version to unpublish (e.g. 1.2.0).
    #[arg(id = "unpublish_version", value_name = "VERSION")]
    pub version: Option<String>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
