// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

/// Blob-store boundary for templates, ASCII art, and the rendered document.
///
/// Provides utilities for reading the input blobs and writing the final SVG
/// artifact, keyed by filesystem path.
use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::Path
};

use tracing::debug;

use crate::error::{Error, io_error};

/// Loads the required SVG template blob.
///
/// # Errors
///
/// Returns [`Error::Precondition`] when the template does not exist — a
/// missing required input blob is a precondition failure, reported before
/// anything is rendered — and [`Error::Io`] for any other read failure.
pub fn load_template(path: &Path) -> Result<String, Error> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(contents),
        Err(source) if source.kind() == io::ErrorKind::NotFound => Err(Error::precondition(
            format!("template not found at {}", path.display())
        )),
        Err(source) => Err(io_error(path, source))
    }
}

/// Loads the optional decorative ASCII art override.
///
/// Returns `Ok(None)` when no path was configured or the file does not
/// exist; the renderer falls back to its built-in banner in that case.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file exists but cannot be read.
pub fn load_ascii_art(path: Option<&Path>) -> Result<Option<String>, Error> {
    let Some(path) = path else {
        return Ok(None);
    };

    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(source) if source.kind() == io::ErrorKind::NotFound => {
            debug!("no ASCII art at {}, using built-in banner", path.display());
            Ok(None)
        }
        Err(source) => Err(io_error(path, source))
    }
}

/// Writes the rendered document blob, overwriting any previous run's output.
///
/// Parent directories are created when missing. The write is buffered and
/// flushed before returning.
///
/// # Errors
///
/// Returns [`Error::Io`] when directories or the file cannot be created or
/// written.
pub fn write_rendered_svg(path: &Path, contents: &str) -> Result<(), Error> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|source| io_error(parent, source))?;
    }

    let file = File::create(path).map_err(|source| io_error(path, source))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(contents.as_bytes())
        .map_err(|source| io_error(path, source))?;
    writer.flush().map_err(|source| io_error(path, source))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn load_template_returns_contents() {
        let temp = tempdir().expect("failed to create tempdir");
        let path = temp.path().join("template.svg");
        fs::write(&path, "<svg>{{REPOS}}</svg>").expect("failed to write template");

        let contents = load_template(&path).expect("template should load");
        assert_eq!(contents, "<svg>{{REPOS}}</svg>");
    }

    #[test]
    fn load_template_reports_missing_blob_as_precondition() {
        let temp = tempdir().expect("failed to create tempdir");
        let path = temp.path().join("missing.svg");

        let error = load_template(&path).expect_err("expected precondition error");
        match error {
            Error::Precondition {
                message
            } => {
                assert!(message.contains("template not found"));
            }
            other => panic!("unexpected error variant: {other:?}")
        }
    }

    #[test]
    fn load_ascii_art_without_configured_path() {
        let result = load_ascii_art(None).expect("no path should succeed");
        assert!(result.is_none());
    }

    #[test]
    fn load_ascii_art_falls_back_when_file_is_absent() {
        let temp = tempdir().expect("failed to create tempdir");
        let path = temp.path().join("ascii.txt");

        let result = load_ascii_art(Some(&path)).expect("absent file should fall back");
        assert!(result.is_none());
    }

    #[test]
    fn load_ascii_art_returns_override_contents() {
        let temp = tempdir().expect("failed to create tempdir");
        let path = temp.path().join("ascii.txt");
        fs::write(&path, "banner\nart").expect("failed to write art");

        let result = load_ascii_art(Some(&path)).expect("present file should load");
        assert_eq!(result.as_deref(), Some("banner\nart"));
    }

    #[test]
    fn write_rendered_svg_creates_parent_directories() {
        let temp = tempdir().expect("failed to create tempdir");
        let path = temp.path().join("nested/out/profile.svg");

        write_rendered_svg(&path, "<svg/>").expect("write should succeed");

        let contents = fs::read_to_string(&path).expect("output should be readable");
        assert_eq!(contents, "<svg/>");
    }

    #[test]
    fn write_rendered_svg_overwrites_previous_output() {
        let temp = tempdir().expect("failed to create tempdir");
        let path = temp.path().join("profile.svg");

        write_rendered_svg(&path, "first run").expect("first write should succeed");
        write_rendered_svg(&path, "second run").expect("second write should succeed");

        let contents = fs::read_to_string(&path).expect("output should be readable");
        assert_eq!(contents, "second run");
    }
}
