// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Derivation of the published profile metrics.
//!
//! The aggregator consumes the raw records fetched from the GitHub API and
//! produces the values substituted into the SVG template: the uptime label,
//! repository count, star sum, commit metric, and language ranking. All
//! functions here are pure; every run recomputes from scratch and nothing is
//! shared across runs.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::github::{ActivityEvent, PUSH_EVENT, RepositorySummary, UserProfile};

/// Sentinel reported when a metric has no usable data.
///
/// The renderer receives this explicit value instead of an empty string so
/// "no languages found" stays distinguishable from an omitted field.
pub const NO_DATA_SENTINEL: &str = "N/A";

/// Maximum number of languages kept in the ranking.
const MAX_TOP_LANGUAGES: usize = 5;

const DAYS_PER_YEAR: u64 = 365;
const DAYS_PER_MONTH: u64 = 30;

/// Strategy-selected commit metric.
///
/// The variant is chosen by which data source answered: the exact GraphQL
/// contribution total when available, otherwise the push-event estimate, and
/// finally the degraded sentinel when the activity fetch failed or carried no
/// usable push events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CommitMetric {
    /// Exact contribution count from the richer query, rendered verbatim.
    Exact(u64),
    /// Lower-bound estimate summed from recent push events.
    Estimated(u64),
    /// No commit source answered; rendered as [`NO_DATA_SENTINEL`].
    Unavailable
}

impl fmt::Display for CommitMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(total) => write!(f, "{total}"),
            Self::Estimated(estimate) => write!(f, "{estimate}+ recent"),
            Self::Unavailable => f.write_str(NO_DATA_SENTINEL)
        }
    }
}

/// Aggregated statistics for one subject, derived and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileStats {
    /// Elapsed-time label in `"{years}y {months}m {days}d"` form.
    pub uptime:        String,
    /// Number of owned non-fork repositories collected after pagination.
    pub repo_count:    usize,
    /// Sum of stargazer counts across all collected repositories.
    pub star_count:    u64,
    /// Commit metric selected by data-source availability.
    pub commit_metric: CommitMetric,
    /// At most five language names, descending by repository count, ties in
    /// first-encountered order.
    pub top_languages: Vec<String>
}

impl ProfileStats {
    /// Joins the language ranking with `", "`, or reports the sentinel.
    ///
    /// # Examples
    ///
    /// ```
    /// use octoprofile::{CommitMetric, NO_DATA_SENTINEL, ProfileStats};
    ///
    /// let mut stats = ProfileStats {
    ///     uptime:        "1y 0m 0d".to_owned(),
    ///     repo_count:    0,
    ///     star_count:    0,
    ///     commit_metric: CommitMetric::Unavailable,
    ///     top_languages: vec!["Rust".to_owned(), "C".to_owned()]
    /// };
    /// assert_eq!(stats.top_languages_label(), "Rust, C");
    ///
    /// stats.top_languages.clear();
    /// assert_eq!(stats.top_languages_label(), NO_DATA_SENTINEL);
    /// ```
    pub fn top_languages_label(&self) -> String {
        if self.top_languages.is_empty() {
            NO_DATA_SENTINEL.to_owned()
        } else {
            self.top_languages.join(", ")
        }
    }
}

/// Computes the whole days elapsed between the epoch and `today`.
///
/// An epoch in the future clamps to zero rather than producing a negative
/// count.
pub fn elapsed_days(since: NaiveDate, today: NaiveDate) -> u64 {
    (today - since).num_days().max(0) as u64
}

/// Decomposes an elapsed day count into the uptime label.
///
/// Months are treated as exactly 30 days and years as exactly 365. This is a
/// deliberate calendar approximation preserved from the upstream formula, not
/// calendar-accurate month arithmetic.
///
/// # Examples
///
/// ```
/// use octoprofile::uptime_label;
///
/// assert_eq!(uptime_label(0), "0y 0m 0d");
/// assert_eq!(uptime_label(400), "1y 1m 5d");
/// ```
pub fn uptime_label(days: u64) -> String {
    let years = days / DAYS_PER_YEAR;
    let remainder = days % DAYS_PER_YEAR;
    let months = remainder / DAYS_PER_MONTH;
    let rest = remainder % DAYS_PER_MONTH;

    format!("{years}y {months}m {rest}d")
}

/// Sums stargazer counts across the collected repositories.
///
/// The sum is invariant under reordering of the sequence and never silently
/// truncates.
pub fn star_sum(repositories: &[RepositorySummary]) -> u64 {
    repositories.iter().map(|repo| repo.stars).sum()
}

/// Ranks primary languages by repository count.
///
/// Repositories without a detected primary language are excluded. Languages
/// are sorted by descending count; ties keep the order in which a language
/// was first encountered while scanning. At most five entries are returned.
pub fn top_languages(repositories: &[RepositorySummary]) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();

    for repo in repositories {
        let Some(language) = repo.language.as_deref().filter(|value| !value.is_empty()) else {
            continue;
        };

        match counts.iter_mut().find(|(name, _)| *name == language) {
            Some((_, count)) => *count += 1,
            None => counts.push((language.to_owned(), 1))
        }
    }

    // sort_by is stable, so equal counts keep first-encountered order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(MAX_TOP_LANGUAGES);
    counts.into_iter().map(|(name, _)| name).collect()
}

/// Sums commit counts across the push events of the most recent activity
/// page.
///
/// The result is a lower bound, not a total; events without a commits array
/// contribute zero.
pub fn estimate_recent_commits(events: &[ActivityEvent]) -> u64 {
    events
        .iter()
        .filter(|event| event.kind == PUSH_EVENT)
        .map(|event| event.payload.commits.len() as u64)
        .sum()
}

/// Derives the published statistics from the fetched records.
///
/// # Parameters
///
/// * `profile` - Subject profile, used for diagnostics only.
/// * `repositories` - Fully drained repository sequence.
/// * `commit_metric` - Metric resolved by the orchestrator's strategy.
/// * `uptime` - Precomputed uptime label.
pub fn aggregate(
    profile: &UserProfile,
    repositories: &[RepositorySummary],
    commit_metric: CommitMetric,
    uptime: String
) -> ProfileStats {
    if usize::try_from(profile.public_repos).ok() != Some(repositories.len()) {
        debug!(
            "profile for {} reports {} public repos, collected {} non-fork entries",
            profile.login,
            profile.public_repos,
            repositories.len()
        );
    }

    ProfileStats {
        uptime,
        repo_count: repositories.len(),
        star_count: star_sum(repositories),
        commit_metric,
        top_languages: top_languages(repositories)
    }
}
