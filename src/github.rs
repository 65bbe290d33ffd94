// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// GitHub API access for the stats pipeline.
///
/// Exposes the three query shapes the pipeline depends on (profile,
/// paginated repository list, recent public events) plus the optional
/// GraphQL contribution total used by the exact commit-metric strategy.
use masterror::AppError;
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Error;

/// Page size used while draining the repository list.
const REPO_PAGE_SIZE: u8 = 100;
/// Page size for the single best-effort events request.
const EVENT_PAGE_SIZE: u8 = 100;
/// Event type contributing to the recent-commit estimate.
pub const PUSH_EVENT: &str = "PushEvent";

const CONTRIBUTIONS_QUERY: &str = "query($login: String!) { user(login: $login) \
     { contributionsCollection { totalCommitContributions } } }";

/// Minimal slice of the `GET /users/{login}` payload used by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize,)]
pub struct UserProfile
{
    /// Login the service resolved the subject to.
    pub login:        String,
    /// Number of public repositories reported by the profile.
    pub public_repos: u64,
}

/// One owned, non-fork repository collected during pagination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
pub struct RepositorySummary
{
    /// Repository name.
    pub name:     String,
    /// Stargazer count, never negative.
    pub stars:    u64,
    /// Primary language detected by the service, when any.
    pub language: Option<String,>,
}

/// One entry of the `GET /users/{login}/events/public` payload.
#[derive(Debug, Clone, Deserialize,)]
pub struct ActivityEvent
{
    /// Event type; only [`PUSH_EVENT`] is relevant to aggregation.
    #[serde(rename = "type")]
    pub kind:    String,
    /// Event payload; commits are absent for non-push events.
    #[serde(default)]
    pub payload: EventPayload,
}

/// Payload fragment of an activity event.
#[derive(Debug, Clone, Default, Deserialize,)]
pub struct EventPayload
{
    /// Commits carried by a push event, capped by the service.
    #[serde(default)]
    pub commits: Vec<CommitRef,>,
}

/// Reference to a single pushed commit.
#[derive(Debug, Clone, Deserialize,)]
pub struct CommitRef
{
    /// Commit object id.
    pub sha: String,
}

/// Raw entry of the `GET /users/{login}/repos` payload.
#[derive(Debug, Clone, Deserialize,)]
struct RawRepository
{
    name:             String,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    language:         Option<String,>,
    #[serde(default)]
    fork:             bool,
}

/// Builds an authenticated GitHub client for the supplied token.
///
/// # Arguments
///
/// * `token` - GitHub personal access token for API authentication
///
/// # Errors
///
/// Returns [`AppError`] when the client cannot be initialized.
///
/// # Example
///
/// ```no_run
/// use octoprofile::build_client;
///
/// # fn example() -> Result<(), masterror::AppError> {
/// let token = std::env::var("GITHUB_TOKEN",).unwrap();
/// let octocrab = build_client(&token,)?;
/// # Ok(())
/// # }
/// ```
pub fn build_client(token: &str,) -> Result<Octocrab, AppError,>
{
    Octocrab::builder().personal_token(token.to_owned(),).build().map_err(|e| {
        AppError::unauthorized(format!("failed to initialize GitHub client: {e}"),)
    },)
}

/// Fetches the subject's public profile.
///
/// # Arguments
///
/// * `octocrab` - Authenticated Octocrab client
/// * `user` - GitHub login of the subject
///
/// # Errors
///
/// Returns [`Error::Remote`] when the service responds with a non-success
/// status or a malformed payload. Callers must treat the failure as fatal.
///
/// # Example
///
/// ```no_run
/// use octoprofile::{build_client, fetch_profile};
///
/// # async fn example() -> Result<(), octoprofile::Error> {
/// let octocrab = build_client("token",)?;
/// let profile = fetch_profile(&octocrab, "octocat",).await?;
/// println!("{} public repos", profile.public_repos);
/// # Ok(())
/// # }
/// ```
pub async fn fetch_profile(octocrab: &Octocrab, user: &str,) -> Result<UserProfile, Error,>
{
    debug!("Fetching profile for {}", user);

    octocrab
        .get(format!("/users/{user}"), None::<&(),>,)
        .await
        .map_err(remote_error,)
}

/// Drains the paginated repository list for the subject.
///
/// Pages are requested one at a time because each page depends on the
/// previous cursor; the sequence is finite, never restartable mid-stream,
/// and never yields an entry twice. Forks are filtered out while draining.
///
/// # Arguments
///
/// * `octocrab` - Authenticated Octocrab client
/// * `user` - GitHub login of the subject
///
/// # Errors
///
/// Returns [`Error::Remote`] when any page request fails; a mid-pagination
/// failure aborts the whole fetch.
pub async fn fetch_repositories(
    octocrab: &Octocrab,
    user: &str,
) -> Result<Vec<RepositorySummary,>, Error,>
{
    let mut collected = Vec::with_capacity(usize::from(REPO_PAGE_SIZE,),);
    let mut page_number = 1u32;

    loop {
        debug!("Fetching repository page {} for {}", page_number, user);

        let page: Vec<RawRepository,> = octocrab
            .get(
                format!("/users/{user}/repos?per_page={REPO_PAGE_SIZE}&page={page_number}"),
                None::<&(),>,
            )
            .await
            .map_err(remote_error,)?;

        if !drain_page(page, &mut collected,) {
            break;
        }

        page_number += 1;
    }

    debug!("Collected {} non-fork repositories for {}", collected.len(), user);

    Ok(collected,)
}

/// Folds one page of raw entries into the collected summaries.
///
/// Forks are dropped and blank language strings are normalized to `None`.
/// The return value reports whether the cursor must advance to another page:
/// a page shorter than the requested size (forks included) is the last one.
fn drain_page(page: Vec<RawRepository,>, collected: &mut Vec<RepositorySummary,>) -> bool
{
    let fetched = page.len();

    for repo in page {
        if repo.fork {
            continue;
        }

        collected.push(RepositorySummary {
            name:     repo.name,
            stars:    repo.stargazers_count,
            language: repo.language.filter(|language| !language.is_empty(),),
        },);
    }

    fetched == usize::from(REPO_PAGE_SIZE,)
}

/// Fetches the most recent page of public activity events.
///
/// Single page, best-effort: callers degrade the commit metric instead of
/// aborting the run when this query fails.
///
/// # Arguments
///
/// * `octocrab` - Authenticated Octocrab client
/// * `user` - GitHub login of the subject
///
/// # Errors
///
/// Returns [`Error::Remote`] when the service responds with a non-success
/// status or a malformed payload.
pub async fn fetch_recent_events(
    octocrab: &Octocrab,
    user: &str,
) -> Result<Vec<ActivityEvent,>, Error,>
{
    debug!("Fetching recent public events for {}", user);

    octocrab
        .get(
            format!("/users/{user}/events/public?per_page={EVENT_PAGE_SIZE}"),
            None::<&(),>,
        )
        .await
        .map_err(remote_error,)
}

/// Fetches the exact commit contribution total through the GraphQL API.
///
/// The richer query powers the exact commit-metric strategy; when it is
/// unavailable (insufficient token scope, service outage) callers fall back
/// to the push-event estimate.
///
/// # Arguments
///
/// * `octocrab` - Authenticated Octocrab client
/// * `user` - GitHub login of the subject
///
/// # Errors
///
/// Returns [`Error::Remote`] when the query fails or the response payload
/// lacks the contribution total.
pub async fn fetch_commit_contributions(octocrab: &Octocrab, user: &str,) -> Result<u64, Error,>
{
    debug!("Fetching commit contribution total for {}", user);

    let payload = serde_json::json!({
        "query": CONTRIBUTIONS_QUERY,
        "variables": { "login": user }
    });

    let response: serde_json::Value =
        octocrab.graphql(&payload,).await.map_err(remote_error,)?;

    response
        .pointer("/data/user/contributionsCollection/totalCommitContributions",)
        .and_then(serde_json::Value::as_u64,)
        .ok_or_else(|| {
            Error::remote(None, "contributions payload missing totalCommitContributions",)
        },)
}

fn remote_error(error: octocrab::Error,) -> Error
{
    match error {
        octocrab::Error::GitHub {
            source, ..
        } => Error::remote(
            Some(source.status_code.as_u16(),),
            format!("{} (status {})", source.message, source.status_code),
        ),
        other => Error::remote(None, other.to_string(),),
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn user_profile_deserializes_from_api_payload()
    {
        let json = r#"{"login":"octocat","id":583231,"public_repos":8,"followers":4000}"#;
        let profile: UserProfile = serde_json::from_str(json,).expect("deserialization failed",);

        assert_eq!(profile.login, "octocat");
        assert_eq!(profile.public_repos, 8);
    }

    #[test]
    fn repository_summary_accepts_missing_language()
    {
        let json = r#"{"name":"dotfiles","stars":3,"language":null}"#;
        let summary: RepositorySummary =
            serde_json::from_str(json,).expect("deserialization failed",);

        assert_eq!(summary.name, "dotfiles");
        assert_eq!(summary.stars, 3);
        assert!(summary.language.is_none());
    }

    #[test]
    fn activity_event_defaults_absent_payload()
    {
        let json = r#"{"type":"WatchEvent"}"#;
        let event: ActivityEvent = serde_json::from_str(json,).expect("deserialization failed",);

        assert_eq!(event.kind, "WatchEvent");
        assert!(event.payload.commits.is_empty());
    }

    #[test]
    fn activity_event_carries_push_commits()
    {
        let json = r#"{
            "type": "PushEvent",
            "payload": {
                "commits": [
                    {"sha": "aaa111", "message": "first"},
                    {"sha": "bbb222", "message": "second"}
                ]
            }
        }"#;
        let event: ActivityEvent = serde_json::from_str(json,).expect("deserialization failed",);

        assert_eq!(event.kind, PUSH_EVENT);
        assert_eq!(event.payload.commits.len(), 2);
        assert_eq!(event.payload.commits[0].sha, "aaa111");
    }

    fn raw(name: &str, fork: bool, language: Option<&str,>,) -> RawRepository
    {
        RawRepository {
            name:             name.to_owned(),
            stargazers_count: 0,
            language:         language.map(str::to_owned,),
            fork,
        }
    }

    fn full_page(prefix: &str,) -> Vec<RawRepository,>
    {
        (0..usize::from(REPO_PAGE_SIZE,))
            .map(|index| raw(&format!("{prefix}-{index}"), false, Some("Rust",),),)
            .collect()
    }

    #[test]
    fn raw_repository_deserializes_with_defaults()
    {
        let json = r#"{"name":"dotfiles"}"#;
        let repo: RawRepository = serde_json::from_str(json,).expect("deserialization failed",);

        assert_eq!(repo.name, "dotfiles");
        assert_eq!(repo.stargazers_count, 0);
        assert!(repo.language.is_none());
        assert!(!repo.fork);
    }

    #[test]
    fn drain_page_collects_three_pages_without_duplicates()
    {
        let mut collected = Vec::new();

        assert!(drain_page(full_page("a",), &mut collected,));
        assert!(drain_page(full_page("b",), &mut collected,));

        let last: Vec<RawRepository,> =
            (0..7).map(|index| raw(&format!("c-{index}"), false, None,),).collect();
        assert!(!drain_page(last, &mut collected,));

        assert_eq!(collected.len(), 207);

        let unique: std::collections::HashSet<&str,> =
            collected.iter().map(|repo| repo.name.as_str(),).collect();
        assert_eq!(unique.len(), 207, "no entry may be yielded twice",);
    }

    #[test]
    fn drain_page_stops_after_short_page()
    {
        let mut collected = Vec::new();
        let page = vec![raw("only", false, Some("Rust",),)];

        assert!(!drain_page(page, &mut collected,));
        assert_eq!(collected.len(), 1);
    }

    #[test]
    fn drain_page_stops_after_empty_page()
    {
        let mut collected = Vec::new();

        assert!(!drain_page(Vec::new(), &mut collected,));
        assert!(collected.is_empty());
    }

    #[test]
    fn drain_page_filters_forks_without_breaking_termination()
    {
        let mut collected = Vec::new();
        let page: Vec<RawRepository,> = (0..usize::from(REPO_PAGE_SIZE,))
            .map(|index| raw(&format!("r{index}"), index % 2 == 0, None,),)
            .collect();

        // A full page of which half are forks still signals another page.
        assert!(drain_page(page, &mut collected,));
        assert_eq!(collected.len(), 50);
        assert!(collected.iter().all(|repo| !repo.name.is_empty()));
    }

    #[test]
    fn drain_page_normalizes_blank_language()
    {
        let mut collected = Vec::new();
        let page = vec![raw("blank", false, Some("",),), raw("typed", false, Some("Rust",),)];

        drain_page(page, &mut collected,);

        assert!(collected[0].language.is_none());
        assert_eq!(collected[1].language.as_deref(), Some("Rust"));
    }

    #[tokio::test]
    async fn fetch_profile_fails_with_invalid_token()
    {
        let octocrab = build_client("invalid_token",).expect("client should build",);
        let result = fetch_profile(&octocrab, "octocat",).await;
        assert!(result.is_err(), "should fail with invalid token",);
    }

    #[tokio::test]
    async fn fetch_commit_contributions_fails_with_invalid_token()
    {
        let octocrab = build_client("invalid_token",).expect("client should build",);
        let result = fetch_commit_contributions(&octocrab, "octocat",).await;
        assert!(result.is_err(), "should fail with invalid token",);
    }
}
