use super::archive::zip_directory;
use crate::error::Result;
use std::fs;
use std::path::Path;

/// File name of the packaged help inside the build directory.
pub const HELP_ARCHIVE: &str = "help.zip";

/// What [`build_help`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpOutcome {
    /// `help.zip` was written with this many files.
    Packaged { files: usize },
    NoHelpFolder,
    /// The help folder has no language directory holding a `help.md`.
    NoHelpFile,
}

/// Zip the help folder into `<build_dir>/help.zip`.
///
/// Language directories are the sub-directories of `help_dir` whose name is
/// at most two characters long. At least one of them must contain `help.md`;
/// otherwise nothing is written. Entries are stored under `help/`.
pub fn build_help(help_dir: &Path, build_dir: &Path) -> Result<HelpOutcome> {
    if !help_dir.is_dir() {
        tracing::warn!(path = %help_dir.display(), "no help folder");
        return Ok(HelpOutcome::NoHelpFolder);
    }

    if !has_language_help(help_dir) {
        tracing::warn!(path = %help_dir.display(), "no help.md in any language directory");
        return Ok(HelpOutcome::NoHelpFile);
    }

    let files = zip_directory(help_dir, &build_dir.join(HELP_ARCHIVE), "help")?;
    Ok(HelpOutcome::Packaged { files })
}

fn has_language_help(help_dir: &Path) -> bool {
    let Ok(entries) = fs::read_dir(help_dir) else {
        return false;
    };

    entries.filter_map(|entry| entry.ok()).any(|entry| {
        let name = entry.file_name();
        entry.path().is_dir()
            && name.to_string_lossy().chars().count() <= 2
            && entry.path().join("help.md").is_file()
    })
}
