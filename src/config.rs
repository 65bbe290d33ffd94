//! Run configuration for the profile card generator.
//!
//! The configuration names the single subject whose statistics are computed,
//! the credential used against the GitHub API, and the artifact locations for
//! the template, the optional ASCII art override, and the rendered output.
//! Everything is passed explicitly into the pipeline so multiple subjects can
//! in principle run in the same process without interference.

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::error::Error;

/// Default epoch date used for the uptime metric when no override is given.
pub const DEFAULT_EPOCH: &str = "2005-05-11";

/// Validated configuration for a single generator run.
///
/// Instances are immutable for the duration of the run. Construction through
/// [`GeneratorConfig::new`] enforces the preconditions that must hold before
/// the pipeline issues its first remote call.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// GitHub login of the subject whose statistics are computed.
    pub user:          String,
    /// Bearer credential for the GitHub API.
    pub token:         String,
    /// Epoch date the uptime metric counts from.
    pub since:         NaiveDate,
    /// Location of the SVG template blob. Required.
    pub template_path: PathBuf,
    /// Optional location of the decorative ASCII art override.
    pub ascii_path:    Option<PathBuf>,
    /// Location the rendered document is written to, overwritten each run.
    pub output_path:   PathBuf
}

impl GeneratorConfig {
    /// Validates the raw inputs and assembles a run configuration.
    ///
    /// # Parameters
    ///
    /// * `user` - GitHub login of the subject.
    /// * `token` - Access credential, typically sourced from `GITHUB_TOKEN`.
    /// * `since` - Epoch date for the uptime metric.
    /// * `template_path` - Location of the SVG template.
    /// * `ascii_path` - Optional ASCII art override location.
    /// * `output_path` - Destination of the rendered document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Precondition`] when the user is empty or no credential
    /// was supplied. These failures are reported before any remote call is
    /// issued and never produce output.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use octoprofile::GeneratorConfig;
    ///
    /// let since = NaiveDate::from_ymd_opt(2005, 5, 11).expect("valid date");
    /// let config = GeneratorConfig::new(
    ///     "octocat".to_owned(),
    ///     Some("ghp_example".to_owned()),
    ///     since,
    ///     "template.svg".into(),
    ///     None,
    ///     "profile.svg".into()
    /// )
    /// .expect("valid configuration");
    /// assert_eq!(config.user, "octocat");
    /// ```
    pub fn new(
        user: String,
        token: Option<String>,
        since: NaiveDate,
        template_path: PathBuf,
        ascii_path: Option<PathBuf>,
        output_path: PathBuf
    ) -> Result<Self, Error> {
        let user = user.trim().to_owned();
        if user.is_empty() {
            return Err(Error::precondition("GitHub user must be provided"));
        }

        let token = token
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                Error::precondition(
                    "GitHub token must be provided (set GITHUB_TOKEN or pass --token)"
                )
            })?;

        Ok(Self {
            user,
            token,
            since,
            template_path,
            ascii_path,
            output_path
        })
    }
}
