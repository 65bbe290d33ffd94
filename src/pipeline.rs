// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Sequences one full generator run.
///
/// Fetches the remote records, aggregates the metrics, loads the template
/// and optional ASCII art blobs, renders, and writes the final document.
/// Strictly sequential: no two remote calls are in flight at once, no step
/// is retried, and the first fatal failure aborts the run with nothing
/// written.
use std::path::PathBuf;

use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use octocrab::Octocrab;
use tracing::{info, warn};

use crate::{
    artifact::{load_ascii_art, load_template, write_rendered_svg},
    config::GeneratorConfig,
    error::Error,
    github::{
        RepositorySummary, UserProfile, fetch_commit_contributions, fetch_profile,
        fetch_recent_events, fetch_repositories,
    },
    render::render_profile,
    stats::{CommitMetric, ProfileStats, aggregate, elapsed_days, estimate_recent_commits,
            uptime_label},
};

/// Result of a completed generator run.
#[derive(Debug, Clone,)]
pub struct GeneratedProfile
{
    /// Location of the written document.
    pub output_path: PathBuf,
    /// Statistics substituted into the template.
    pub stats:       ProfileStats,
}

/// Runs the full stats pipeline for the configured subject.
///
/// # Arguments
///
/// * `octocrab` - Authenticated Octocrab client
/// * `config` - Validated run configuration
///
/// # Errors
///
/// Returns [`Error`] when an essential fetch fails, the template blob is
/// missing, or the output cannot be written. The activity-based commit
/// metric is the only degradable data point; its failure lowers the metric
/// to a sentinel instead of aborting. No partial output is ever written on
/// a fatal path.
///
/// # Example
///
/// ```no_run
/// use chrono::NaiveDate;
/// use octoprofile::{GeneratorConfig, build_client, generate_profile};
///
/// # async fn example() -> Result<(), octoprofile::Error> {
/// let config = GeneratorConfig::new(
///     "octocat".to_owned(),
///     std::env::var("GITHUB_TOKEN",).ok(),
///     NaiveDate::from_ymd_opt(2005, 5, 11,).unwrap(),
///     "template.svg".into(),
///     None,
///     "profile.svg".into(),
/// )?;
/// let octocrab = build_client(&config.token,)?;
/// let generated = generate_profile(&octocrab, &config,).await?;
/// println!("wrote {}", generated.output_path.display());
/// # Ok(())
/// # }
/// ```
pub async fn generate_profile(
    octocrab: &Octocrab,
    config: &GeneratorConfig,
) -> Result<GeneratedProfile, Error,>
{
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}",)
            .expect("valid template",),
    );

    pb.set_message(format!("Fetching user data for {}...", config.user),);
    info!("Fetching user data for {}", config.user);
    let profile = fetch_profile(octocrab, &config.user,).await?;

    pb.set_message("Fetching repositories...",);
    info!("Fetching repositories for {}", config.user);
    let repositories = fetch_repositories(octocrab, &config.user,).await?;
    info!("Collected {} repositories after pagination", repositories.len());

    pb.set_message("Resolving commit metric...",);
    let commit_metric = resolve_commit_metric(octocrab, &config.user,).await;

    pb.set_message("Building SVG...",);
    let generated = assemble_profile_card(config, &profile, &repositories, commit_metric,)?;

    pb.finish_with_message(format!("Profile card written to {}", config.output_path.display()),);

    Ok(generated,)
}

/// Aggregates the fetched records and writes the rendered card.
///
/// The fetch phase is complete by the time this runs, so everything below
/// is local: aggregation, template and ASCII blob loading, rendering, and
/// the output write.
///
/// # Errors
///
/// Returns [`Error`] when the template blob is missing or the output cannot
/// be written; nothing is written on the failure path.
fn assemble_profile_card(
    config: &GeneratorConfig,
    profile: &UserProfile,
    repositories: &[RepositorySummary],
    commit_metric: CommitMetric,
) -> Result<GeneratedProfile, Error,>
{
    let today = Utc::now().date_naive();
    let uptime = uptime_label(elapsed_days(config.since, today,),);
    info!("Uptime calculated: {}", uptime);

    let stats = aggregate(profile, repositories, commit_metric, uptime,);

    info!("Loading template from {}", config.template_path.display());
    let template = load_template(&config.template_path,)?;
    let ascii = load_ascii_art(config.ascii_path.as_deref(),)?;

    let rendered = render_profile(&template, &stats, ascii.as_deref(),);

    write_rendered_svg(&config.output_path, &rendered,)?;
    info!("Profile card written to {}", config.output_path.display());

    Ok(GeneratedProfile {
        output_path: config.output_path.clone(),
        stats,
    },)
}

/// Selects the commit metric by data-source availability.
///
/// Tries the exact GraphQL contribution total first, then the push-event
/// estimate. Both sources are best-effort: every failure degrades to the
/// next strategy with a warning instead of aborting the run.
async fn resolve_commit_metric(octocrab: &Octocrab, user: &str,) -> CommitMetric
{
    match fetch_commit_contributions(octocrab, user,).await {
        Ok(total,) => return CommitMetric::Exact(total,),
        Err(error,) => {
            warn!("contribution query unavailable, falling back to event estimate: {error}");
        }
    }

    match fetch_recent_events(octocrab, user,).await {
        Ok(events,) => {
            let estimate = estimate_recent_commits(&events,);
            if estimate == 0 {
                warn!("no usable push events for {}, commit metric degraded", user);
                CommitMetric::Unavailable
            } else {
                CommitMetric::Estimated(estimate,)
            }
        }
        Err(error,) => {
            warn!("events fetch failed, commit metric degraded: {error}");
            CommitMetric::Unavailable
        }
    }
}
