//! smush command-line entry point

mod cli;

use clap::Parser;
use cli::merge::{MergeOptions, run_merge};
use smush::config::ConfigOverrides;
use tracing_subscriber::EnvFilter;

/// Automate merging of topic branches
#[derive(Debug, Parser)]
#[command(name = "smush", version, about = "Automate merging of topic branches")]
struct Cli {
    /// Topic branch to merge (defaults to the current branch)
    topic_branch: Option<String>,

    /// Create the topic branch from the base branch and push it
    #[arg(short, long, requires = "topic_branch")]
    new: bool,

    /// Run the checks only, without merging
    #[arg(short, long)]
    check: bool,

    /// Also delete the local topic branch after merging
    #[arg(short, long)]
    delete_local: bool,

    /// Use ~/.smush-<PROFILE>.yml instead of ~/.smush.yml
    #[arg(short, long)]
    profile: Option<String>,

    /// Base branch (overrides "base branch" in the config file)
    #[arg(short, long, value_name = "BRANCH")]
    base_branch: Option<String>,

    /// Repository owner (overrides "github owner")
    #[arg(short = 'o', long, value_name = "OWNER")]
    github_owner: Option<String>,

    /// Repository name (overrides "github repo")
    #[arg(short = 'r', long, value_name = "REPO")]
    github_repo: Option<String>,

    /// Skip the commit message style check
    #[arg(long)]
    skip_style_check: bool,

    /// Skip the pull request check
    #[arg(long)]
    skip_pr_check: bool,

    /// Merge without asking for confirmation
    #[arg(short, long)]
    yes: bool,

    /// Show debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

impl From<Cli> for MergeOptions {
    fn from(cli: Cli) -> Self {
        Self {
            overrides: ConfigOverrides {
                profile: cli.profile,
                base_branch: cli.base_branch,
                owner: cli.github_owner,
                repo: cli.github_repo,
            },
            topic_branch: cli.topic_branch,
            new: cli.new,
            check_only: cli.check,
            delete_local: cli.delete_local,
            skip_style_check: cli.skip_style_check,
            skip_pr_check: cli.skip_pr_check,
            assume_yes: cli.yes,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never mix with the unmerged log on stdout
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    run_merge(cli.into()).await?;
    Ok(())
}
