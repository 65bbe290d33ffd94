//! Profile statistics aggregation and SVG card rendering for a GitHub user.
//!
//! The library fetches a user's public profile, owned repositories, and
//! recent activity from the GitHub API, derives a small set of display
//! metrics (uptime, repository count, star sum, commit metric, dominant
//! languages), and substitutes them into `{{NAME}}` placeholders of an SVG
//! template. All public APIs are documented with invariants, error semantics,
//! and minimal examples to facilitate integration in automation tooling.

mod artifact;
mod config;
mod error;
mod github;
mod pipeline;
mod render;
mod stats;

pub use artifact::{load_ascii_art, load_template, write_rendered_svg};
pub use config::{DEFAULT_EPOCH, GeneratorConfig};
pub use error::{Error, io_error};
pub use github::{
    ActivityEvent, CommitRef, EventPayload, PUSH_EVENT, RepositorySummary, UserProfile,
    build_client, fetch_commit_contributions, fetch_profile, fetch_recent_events,
    fetch_repositories,
};
pub use pipeline::{GeneratedProfile, generate_profile};
pub use render::{DEFAULT_ASCII_ART, Placeholder, escape_xml, render_profile};
pub use stats::{
    CommitMetric, NO_DATA_SENTINEL, ProfileStats, aggregate, elapsed_days,
    estimate_recent_commits, star_sum, top_languages, uptime_label,
};
