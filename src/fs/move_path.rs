//! Moving and copying build folders.
//!
//! Deployment renames a whole build directory into the deployment folder. On
//! most setups that is a single `rename(2)`; when the deployment folder lives
//! on another volume the kernel reports `EXDEV` and we copy the tree instead,
//! then delete the source.

use crate::error::{DizmoError, Result};
use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// Move a file or directory from `source` to `destination`.
///
/// The destination must not exist. Failures map to `FileNotWritable`.
pub fn move_path<P: AsRef<Path>, Q: AsRef<Path>>(source: P, destination: Q) -> Result<()> {
    let source = source.as_ref();
    let destination = destination.as_ref();

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            DizmoError::FileNotWritable(format!(
                "failed to create destination directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    match fs::rename(source, destination) {
        Ok(()) => Ok(()),
        Err(e) if is_cross_device_rename(&e) => {
            tracing::debug!(
                source = %source.display(),
                destination = %destination.display(),
                "rename crosses devices, copying instead"
            );
            copy_tree(source, destination)?;
            remove_source(source)
        }
        Err(e) => Err(DizmoError::FileNotWritable(format!(
            "failed to move '{}' to '{}': {}",
            source.display(),
            destination.display(),
            e
        ))),
    }
}

/// Recursively copy `source` (file or directory) to `destination`.
pub fn copy_tree<P: AsRef<Path>, Q: AsRef<Path>>(source: P, destination: Q) -> Result<()> {
    let source = source.as_ref();
    let destination = destination.as_ref();

    if source.is_file() {
        return copy_one(source, destination);
    }

    for entry in WalkDir::new(source) {
        let entry = entry.map_err(|e| {
            DizmoError::FileNotWritable(format!("failed to walk '{}': {}", source.display(), e))
        })?;
        let relative = entry.path().strip_prefix(source).unwrap_or(entry.path());
        let target = destination.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| {
                DizmoError::FileNotWritable(format!(
                    "failed to create directory '{}': {}",
                    target.display(),
                    e
                ))
            })?;
        } else {
            copy_one(entry.path(), &target)?;
        }
    }

    Ok(())
}

fn copy_one(source: &Path, destination: &Path) -> Result<()> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            DizmoError::FileNotWritable(format!(
                "failed to create directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    fs::copy(source, destination).map(|_| ()).map_err(|e| {
        DizmoError::FileNotWritable(format!(
            "failed to copy '{}' to '{}': {}",
            source.display(),
            destination.display(),
            e
        ))
    })
}

fn remove_source(source: &Path) -> Result<()> {
    let result = if source.is_dir() {
        fs::remove_dir_all(source)
    } else {
        fs::remove_file(source)
    };

    result.map_err(|e| {
        DizmoError::RemoveFolder(format!(
            "copied '{}' across devices but failed to delete it: {}",
            source.display(),
            e
        ))
    })
}

fn is_cross_device_rename(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::CrossesDevices || err.raw_os_error() == Some(18)
}
