#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the generator crate."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint. The lint is disabled for
//! the module to keep the generated implementations warning-free while still
//! exposing a thoroughly documented error surface for library consumers.

use std::path::{Path, PathBuf};

/// Unified error type returned by the stats pipeline and CLI.
///
/// Each variant captures sufficient context for diagnostics while avoiding
/// accidental exposure of the access credential. Instances are typically
/// constructed through the helper constructors or by converting from service
/// error types via the provided `From` implementations.
#[derive(Debug, masterror::Error)]
pub enum Error {
    /// Required configuration or input blob is missing before the run starts.
    #[error("precondition failed: {message}")]
    Precondition {
        /// Human readable message naming the missing prerequisite.
        message: String
    },
    /// Non-success response or malformed payload from an essential GitHub
    /// query.
    #[error("GitHub API error: {message}")]
    Remote {
        /// HTTP status reported by the service, when one was received.
        status:  Option<u16>,
        /// Human readable message describing the remote failure.
        message: String
    },
    /// Wraps I/O errors that occur while reading or writing artifact blobs.
    #[error("failed to access artifact at {path:?}: {source}")]
    Io {
        /// Location of the artifact being processed.
        path:   PathBuf,
        /// Underlying I/O error reported by the operating system.
        source: std::io::Error
    },
    /// Internal invariant violation inside the renderer.
    #[error("render invariant violated: {message}")]
    Render {
        /// Human readable message describing the violated invariant.
        message: String
    },
    /// Wraps serialization errors when emitting the aggregated stats dump.
    #[error("failed to serialize stats: {source}")]
    Serialize {
        /// Underlying serialization error.
        source: serde_json::Error
    }
}

impl Error {
    /// Constructs a precondition error from the provided displayable value.
    ///
    /// # Parameters
    ///
    /// * `message` - Human-readable description of the missing prerequisite.
    pub fn precondition<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Precondition {
            message: message.into()
        }
    }

    /// Constructs a remote error carrying the optional HTTP status.
    ///
    /// # Parameters
    ///
    /// * `status` - HTTP status reported by the service, if any.
    /// * `message` - Human-readable description of the remote failure.
    pub fn remote<M>(status: Option<u16>, message: M) -> Self
    where
        M: Into<String>
    {
        Self::Remote {
            status,
            message: message.into()
        }
    }

    /// Constructs a render invariant error from the provided value.
    ///
    /// # Parameters
    ///
    /// * `message` - Human-readable description of the violated invariant.
    pub fn render<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Render {
            message: message.into()
        }
    }

    /// Formats the error for diagnostics without the variant name.
    ///
    /// This method is primarily intended for CLI contexts where the variant
    /// name does not add value to end users. The returned string matches the
    /// [`std::fmt::Display`] implementation.
    pub fn to_display_string(&self) -> String {
        format!("{self}")
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Self::Serialize {
            source
        }
    }
}

impl From<masterror::AppError> for Error {
    fn from(error: masterror::AppError) -> Self {
        Self::Remote {
            status:  None,
            message: error.to_string()
        }
    }
}

/// Creates an [`Error::Io`] variant capturing the failing path and source.
///
/// # Parameters
///
/// * `path` - Location of the artifact blob that triggered the error.
/// * `source` - I/O error reported by the operating system.
pub fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn precondition_constructor_populates_message() {
        let error = Error::precondition("GITHUB_TOKEN is not set");
        match error {
            Error::Precondition {
                ref message
            } => {
                assert_eq!(message, "GITHUB_TOKEN is not set");
            }
            other => panic!("expected precondition error, got {other:?}")
        }
    }

    #[test]
    fn remote_constructor_keeps_status() {
        let error = Error::remote(Some(404), "user not found");
        match error {
            Error::Remote {
                status,
                ref message
            } => {
                assert_eq!(status, Some(404));
                assert_eq!(message, "user not found");
            }
            other => panic!("expected remote error, got {other:?}")
        }
    }

    #[test]
    fn to_display_string_matches_display() {
        let error = Error::render("display me");
        assert_eq!(error.to_string(), error.to_display_string());
    }

    #[test]
    fn io_error_helper_wraps_path_and_source() {
        let path = std::path::Path::new("/tmp/template.svg");
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error = super::io_error(path, io_error);

        match error {
            Error::Io {
                path: ref stored_path,
                ref source
            } => {
                assert_eq!(stored_path, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected io error, got {other:?}")
        }
    }

    #[test]
    fn serde_json_conversion_maps_to_serialize_variant() {
        let invalid = serde_json::from_str::<serde_json::Value>("not-json").unwrap_err();
        let mapped: Error = invalid.into();
        assert!(matches!(mapped, Error::Serialize { .. }));
    }

    #[test]
    fn app_error_conversion_maps_to_remote_without_status() {
        let source = masterror::AppError::unauthorized("bad credentials");
        let mapped: Error = source.into();
        match mapped {
            Error::Remote {
                status,
                ref message
            } => {
                assert_eq!(status, None);
                assert!(message.contains("bad credentials"));
            }
            other => panic!("expected remote error, got {other:?}")
        }
    }
}
