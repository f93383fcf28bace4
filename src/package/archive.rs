use crate::error::{DizmoError, Result};
use crate::fs::atomic_write;
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Component, Path};
use walkdir::WalkDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Zip every file under `source` into `destination`, stored under `prefix/`.
///
/// Entries are written in file-name order and `destination` itself is
/// skipped if it lies inside `source`. Returns the number of files written.
pub fn zip_directory(source: &Path, destination: &Path, prefix: &str) -> Result<usize> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    let mut files = 0;

    for entry in WalkDir::new(source).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            DizmoError::FileNotWritable(format!("failed to walk '{}': {}", source.display(), e))
        })?;
        let path = entry.path();
        if path == destination {
            continue;
        }

        let relative = path.strip_prefix(source).unwrap_or(path);
        let name = entry_name(prefix, relative);

        if entry.file_type().is_dir() {
            if !relative.as_os_str().is_empty() {
                zip.add_directory(name, options).map_err(zip_error(destination))?;
            }
            continue;
        }

        let content = fs::read(path).map_err(|e| {
            DizmoError::FileNotWritable(format!("failed to read '{}': {}", path.display(), e))
        })?;
        zip.start_file(name, options).map_err(zip_error(destination))?;
        zip.write_all(&content).map_err(|e| {
            DizmoError::FileNotWritable(format!(
                "Could not write to the zip file '{}': {}",
                destination.display(),
                e
            ))
        })?;
        files += 1;
    }

    let buffer = zip.finish().map_err(zip_error(destination))?.into_inner();
    atomic_write(destination, &buffer)?;
    tracing::debug!(archive = %destination.display(), files, "wrote zip archive");
    Ok(files)
}

/// Archive a build directory into a `.dzm` file.
///
/// The bundle is stored under a folder named after the build directory.
pub fn create_archive(build_dir: &Path, archive_path: &Path) -> Result<usize> {
    if !build_dir.is_dir() {
        return Err(DizmoError::FileNotFound(format!(
            "build directory '{}' does not exist; run `grace-dizmo build` first",
            build_dir.display()
        )));
    }

    let prefix = build_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    zip_directory(build_dir, archive_path, &prefix)
}

fn entry_name(prefix: &str, relative: &Path) -> String {
    prefix
        .split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .chain(relative.components().filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        }))
        .collect::<Vec<_>>()
        .join("/")
}

fn zip_error(destination: &Path) -> impl Fn(zip::result::ZipError) -> DizmoError + '_ {
    move |e| {
        DizmoError::FileNotWritable(format!(
            "Could not write to the zip file '{}': {}",
            destination.display(),
            e
        ))
    }
}
