//! Merge command - check and merge a topic branch

use crate::cli::CliProgress;
use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, check, cross, hyperlink, spinner_style};
use anstream::{eprintln, print, println};
use dialoguer::Confirm;
use indicatif::ProgressBar;
use smush::config::ConfigOverrides;
use smush::error::{Error, Result};
use smush::git::GitOps;
use smush::lint;
use smush::merge::{
    MergePlanOptions, PlanExecutionResult, count_unmerged, create_merge_plan, create_topic_plan,
    create_update_plan, execute_plan, select_topic_branch,
};
use smush::platform::verify_pull_request;
use smush::syntax::run_syntax_checks;
use smush::types::BranchPair;
use std::time::Duration;
use tracing::debug;

/// Options for the merge command
#[derive(Debug, Clone, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct MergeOptions {
    /// Config file selection and overrides
    pub overrides: ConfigOverrides,
    /// Topic branch (None = current branch)
    pub topic_branch: Option<String>,
    /// Create the topic branch instead of merging it
    pub new: bool,
    /// Stop after the checks
    pub check_only: bool,
    /// Delete the local topic branch after merging
    pub delete_local: bool,
    /// Skip the commit message style check
    pub skip_style_check: bool,
    /// Skip the PR/MR check
    pub skip_pr_check: bool,
    /// Do not prompt before merging
    pub assume_yes: bool,
}

/// Run the merge command
pub async fn run_merge(options: MergeOptions) -> Result<()> {
    // =========================================================================
    // Phase 1: GATHER - config, repository, branches
    // =========================================================================

    let ctx = CommandContext::new(&options.overrides)?;
    let git: &dyn GitOps = &ctx.git;

    if options.new {
        return create_topic_branch(&ctx, options.topic_branch.as_deref());
    }

    let selection = select_topic_branch(git, ctx.base_branch(), options.topic_branch.as_deref())?;
    let branches = selection.branches;

    if selection.from_current_branch {
        println!(
            "Using active branch '{}' for topic branch.",
            branches.topic.accent()
        );
    }
    if selection.needs_remote_checkout {
        println!(
            "Checking out {} from {}...",
            branches.topic.accent(),
            branches.remote.emphasis()
        );
        git.checkout_from_remote(&branches.topic, &branches.remote)?;
    }

    println!(
        "{} {} {} {}",
        "Updating".emphasis(),
        branches.topic.accent(),
        "with work from".emphasis(),
        branches.base.accent()
    );
    execute_plan(&create_update_plan(&branches), git, &CliProgress::compact()).into_result()?;

    // =========================================================================
    // Phase 2: CHECK - commits, style, syntax, pull request
    // =========================================================================

    check_topic_branch_commits(&ctx, &branches, &options)?;

    if options.skip_pr_check {
        println!("{}", "Skipping pull request check.".muted());
    } else {
        check_for_pull_request(&ctx, &branches).await?;
    }

    if options.check_only {
        println!("{} Check complete.", check());
        return Ok(());
    }

    // =========================================================================
    // Phase 3: MERGE - fast-forward base and clean up
    // =========================================================================

    let prompt = format!("Merge '{}' into '{}'?", branches.topic, branches.base);
    if !options.assume_yes && !confirm(&prompt)? {
        println!("{}", "Aborted".muted());
        return Err(Error::Aborted);
    }

    let plan = create_merge_plan(
        &branches,
        &MergePlanOptions {
            delete_local: options.delete_local,
        },
    );

    println!(
        "{} {} {} {}",
        "Merging".emphasis(),
        branches.topic.accent(),
        "into".emphasis(),
        branches.base.accent()
    );
    let result = execute_plan(&plan, git, &CliProgress::compact());
    print_merge_summary(&result, &branches);
    result.into_result().map(drop)
}

/// `--new`: branch off base and publish the topic branch
fn create_topic_branch(ctx: &CommandContext, topic: Option<&str>) -> Result<()> {
    let git: &dyn GitOps = &ctx.git;
    let topic = topic.ok_or_else(|| Error::Internal("--new requires a topic branch".to_string()))?;
    let base = ctx.base_branch();

    if !git.local_branch_exists(base)? {
        return Err(Error::BaseBranchNotFound(base.to_string()));
    }
    if topic == base {
        return Err(Error::SameBranch);
    }
    if git.local_branch_exists(topic)? {
        return Err(Error::BranchExists(topic.to_string()));
    }

    let branches = BranchPair {
        base: base.to_string(),
        topic: topic.to_string(),
        remote: git.branch_remote(base)?,
    };

    println!("{} {}", "Creating topic branch".emphasis(), topic.accent());
    execute_plan(&create_topic_plan(&branches), git, &CliProgress::compact()).into_result()?;
    println!("{} Created {}", check(), topic.accent());
    Ok(())
}

/// Count, optionally squash, display and lint the unmerged commits
fn check_topic_branch_commits(
    ctx: &CommandContext,
    branches: &BranchPair,
    options: &MergeOptions,
) -> Result<()> {
    let git: &dyn GitOps = &ctx.git;
    let starting_branch = git.current_branch()?;
    let count = count_unmerged(git, branches)?;

    if count > 1 {
        display_unmerged_commits(git, branches)?;
        println!(
            "{}",
            "There is more than one new commit present in topic branch.".warn()
        );
        debug!(count, "multiple unmerged commits");

        if confirm("Would you like to interactively rebase?")? {
            git.checkout(&branches.topic)?;
            git.rebase_interactive(count)?;
            println!("{}", "Updating topic branch...".muted());
            git.push(true)?;
            git.checkout(&starting_branch)?;
        }
    }

    display_unmerged_commits(git, branches)?;

    if !options.skip_style_check {
        let log = git.unmerged_log(&branches.base, &branches.topic)?;
        print!("{}", lint::check_log(&log));
    }

    if !ctx.config.syntax_check_scripts.is_empty() {
        println!("{}", "Checking unmerged files...".muted());
        let files = git.unmerged_files(&branches.base, &branches.topic)?;
        let report = run_syntax_checks(&files, &ctx.config.syntax_check_scripts)?;
        for error in &report.errors {
            println!("{} {}", cross(), error.error());
        }
        println!(
            "{}",
            format!("Check complete ({} file(s) checked).", report.checked.len()).muted()
        );
    }

    Ok(())
}

/// Print unmerged commits with a blank line above and below
fn display_unmerged_commits(git: &dyn GitOps, branches: &BranchPair) -> Result<()> {
    let log = git.unmerged_log(&branches.base, &branches.topic)?;
    println!();
    println!("{}", log.trim_end());
    println!();
    Ok(())
}

/// Verify an open PR/MR exists for topic and targets base
async fn check_for_pull_request(ctx: &CommandContext, branches: &BranchPair) -> Result<()> {
    let Some(platform) = ctx.platform()? else {
        println!(
            "{}",
            "No repository owner/name configured; skipping pull request check.".muted()
        );
        return Ok(());
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message(format!(
        "Looking for a pull request on {}...",
        platform.config().slug().emphasis()
    ));
    spinner.enable_steady_tick(Duration::from_millis(80));

    match verify_pull_request(platform.as_ref(), &branches.topic, &branches.base).await {
        Ok(pr) => {
            spinner.finish_with_message(format!(
                "{} Found {} targeting {}",
                check(),
                hyperlink(&format!("PR #{}", pr.number), &pr.html_url).accent(),
                pr.base_ref.accent()
            ));
            Ok(())
        }
        Err(e) => {
            spinner.finish_and_clear();
            Err(e)
        }
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| Error::Internal(format!("Failed to read confirmation: {e}")))
}

/// Print merge summary
fn print_merge_summary(result: &PlanExecutionResult, branches: &BranchPair) {
    println!();
    if result.is_success() {
        println!(
            "{} Merged {} into {}",
            check(),
            branches.topic.accent(),
            branches.base.accent()
        );
        return;
    }

    eprintln!("{} Merge incomplete", cross());
    if result.has_progress() {
        for step in &result.completed_steps {
            eprintln!("   {} {}", "Done:".muted(), step);
        }
    }
    if let Some(ref failed) = result.failed_step {
        eprintln!("   {} {}", "Failed:".warn(), failed.to_string().warn());
    }
}
