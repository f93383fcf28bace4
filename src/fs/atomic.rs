//! Atomic file writes.
//!
//! Content is written to `.{filename}.tmp` next to the target, synced, and
//! renamed over the target. `rename` replaces existing files on both POSIX and
//! Windows, so the target is either the old or the new content, never partial.

use crate::error::{DizmoError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically write bytes to a file, creating parent directories.
///
/// # Returns
///
/// * `Ok(())` - On successful atomic write
/// * `Err(DizmoError::FileNotWritable)` - On create, write, sync or rename failure
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            DizmoError::FileNotWritable(format!(
                "failed to create parent directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = temp_path_for(path)?;
    write_and_sync(&temp_path, content)?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        DizmoError::FileNotWritable(format!(
            "failed to replace '{}': {}",
            path.display(),
            e
        ))
    })
}

fn temp_path_for(target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            DizmoError::FileNotWritable(format!("invalid file path '{}'", target.display()))
        })?;

    Ok(parent.join(format!(".{}.tmp", filename)))
}

fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| {
        DizmoError::FileNotWritable(format!(
            "failed to create temporary file '{}': {}",
            path.display(),
            e
        ))
    })?;

    file.write_all(content)
        .and_then(|()| file.sync_all())
        .map_err(|e| {
            let _ = fs::remove_file(path);
            DizmoError::FileNotWritable(format!(
                "failed to write temporary file '{}': {}",
                path.display(),
                e
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_new_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("Info.plist");

        atomic_write(&file_path, b"<plist/>").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "<plist/>");
    }

    #[test]
    fn replaces_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("Info.plist");
        fs::write(&file_path, "old").unwrap();

        atomic_write(&file_path, b"new").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "new");
    }

    #[test]
    fn creates_parent_dirs_and_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("build").join("widget").join("Info.plist");

        atomic_write(&file_path, b"content").unwrap();

        assert!(file_path.exists());
        assert!(!file_path.with_file_name(".Info.plist.tmp").exists());
    }

    #[test]
    fn temp_path_is_hidden_sibling() {
        let temp = temp_path_for(Path::new("/some/build/Info.plist")).unwrap();
        assert_eq!(temp, Path::new("/some/build/.Info.plist.tmp"));
    }

    #[test]
    fn unwritable_target_is_file_not_writable() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "file, not a dir").unwrap();

        let err = atomic_write(blocker.join("Info.plist"), b"x").unwrap_err();
        assert!(matches!(err, DizmoError::FileNotWritable(_)));
    }
}
