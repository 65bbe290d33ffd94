//! Command-line interface for the octoprofile binary.
//!
//! Parses the run configuration from arguments and the environment, builds
//! the authenticated GitHub client, and executes the stats pipeline. Fatal
//! errors are reported on stderr and set a non-zero exit status.

use std::{path::PathBuf, process};

use chrono::NaiveDate;
use clap::{ArgAction, Parser};
use octoprofile::{
    DEFAULT_EPOCH, Error, GeneratorConfig, build_client, generate_profile,
};
use tracing_subscriber::EnvFilter;

/// Command line interface for rendering a profile statistics card.
#[derive(Debug, Parser,)]
#[command(
    name = "octoprofile",
    version,
    about = "Render GitHub profile statistics into a templated SVG card"
)]
struct Cli
{
    /// GitHub login of the subject whose statistics are rendered.
    #[arg(long = "user", value_name = "LOGIN")]
    user: String,

    /// GitHub access token; falls back to the GITHUB_TOKEN environment
    /// variable.
    #[arg(long = "token", value_name = "TOKEN", env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String,>,

    /// Path to the SVG template containing the placeholder tokens.
    #[arg(long = "template", value_name = "PATH", default_value = "template.svg")]
    template: PathBuf,

    /// Optional path to a decorative ASCII art override.
    #[arg(long = "ascii", value_name = "PATH")]
    ascii: Option<PathBuf,>,

    /// Destination path of the rendered document, overwritten each run.
    #[arg(long = "output", value_name = "PATH", default_value = "profile.svg")]
    output: PathBuf,

    /// Epoch date the uptime metric counts from.
    #[arg(long = "since", value_name = "DATE", default_value = DEFAULT_EPOCH)]
    since: NaiveDate,

    /// Print the aggregated statistics as JSON after a successful run.
    #[arg(long = "stats-json", action = ArgAction::SetTrue)]
    stats_json: bool,
}

/// Entry point that reports errors and sets the appropriate exit status.
#[tokio::main]
async fn main()
{
    init_tracing();

    if let Err(error,) = run().await {
        eprintln!("{}", error.to_display_string());
        process::exit(1,);
    }
}

fn init_tracing()
{
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("octoprofile=info",),),
        )
        .init();
}

/// Executes the pipeline using parsed arguments.
///
/// # Errors
///
/// Propagates precondition failures from configuration validation and fatal
/// errors originating from the pipeline.
async fn run() -> Result<(), Error,>
{
    let cli = Cli::parse();

    let config = GeneratorConfig::new(
        cli.user,
        cli.token,
        cli.since,
        cli.template,
        cli.ascii,
        cli.output,
    )?;

    let octocrab = build_client(&config.token,)?;
    let generated = generate_profile(&octocrab, &config,).await?;

    if cli.stats_json {
        let dump = serde_json::to_string_pretty(&generated.stats,)?;
        println!("{dump}");
    }

    Ok((),)
}

#[cfg(test)]
mod tests
{
    use std::path::Path;

    use chrono::NaiveDate;
    use clap::Parser;

    use super::Cli;

    #[test]
    fn cli_parses_minimal_invocation()
    {
        let cli = Cli::try_parse_from([
            env!("CARGO_PKG_NAME"),
            "--user",
            "octocat",
            "--token",
            "ghp_example",
        ],)
        .expect("failed to parse CLI",);

        assert_eq!(cli.user, "octocat");
        assert_eq!(cli.token.as_deref(), Some("ghp_example"));
        assert_eq!(cli.template, Path::new("template.svg"));
        assert_eq!(cli.output, Path::new("profile.svg"));
        assert!(cli.ascii.is_none());
        assert!(!cli.stats_json);
    }

    #[test]
    fn cli_default_epoch_matches_constant()
    {
        let cli = Cli::try_parse_from([
            env!("CARGO_PKG_NAME"),
            "--user",
            "octocat",
            "--token",
            "ghp_example",
        ],)
        .expect("failed to parse CLI",);

        let expected = NaiveDate::from_ymd_opt(2005, 5, 11,).expect("valid date",);
        assert_eq!(cli.since, expected);
    }

    #[test]
    fn cli_accepts_overrides()
    {
        let cli = Cli::try_parse_from([
            env!("CARGO_PKG_NAME"),
            "--user",
            "octocat",
            "--token",
            "ghp_example",
            "--template",
            "cards/template.svg",
            "--ascii",
            "cards/ascii.txt",
            "--output",
            "cards/profile.svg",
            "--since",
            "2010-01-01",
            "--stats-json",
        ],)
        .expect("failed to parse CLI",);

        assert_eq!(cli.template, Path::new("cards/template.svg"));
        assert_eq!(cli.ascii.as_deref(), Some(Path::new("cards/ascii.txt")));
        assert_eq!(cli.output, Path::new("cards/profile.svg"));
        assert_eq!(cli.since, NaiveDate::from_ymd_opt(2010, 1, 1,).expect("valid date",));
        assert!(cli.stats_json);
    }

    #[test]
    fn cli_requires_user()
    {
        let result = Cli::try_parse_from([env!("CARGO_PKG_NAME"), "--token", "ghp_example",],);
        assert!(result.is_err(), "missing --user must fail parsing",);
    }

    #[test]
    fn cli_rejects_invalid_epoch_date()
    {
        let result = Cli::try_parse_from([
            env!("CARGO_PKG_NAME"),
            "--user",
            "octocat",
            "--token",
            "ghp_example",
            "--since",
            "not-a-date",
        ],);
        assert!(result.is_err(), "invalid --since must fail parsing",);
    }
}
