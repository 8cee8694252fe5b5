//! CLI definition and pipeline orchestration

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use console::style;
use tracing::info;

use mergelog_changelog::{
    read_changelog, render_blocks, write_changelog, ChangelogDocument, MarkdownSanitizer,
};
use mergelog_core::{load_config_or_default, MergelogError, Result, Version};
use mergelog_git::{collect_buckets, GitCliProvider, MessageResolver, ResolveOptions};

/// Mergelog - prepend merged merge-request messages to a changelog
#[derive(Debug, Parser)]
#[command(name = "mergelog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Branch to scan (defaults to the checked-out branch)
    #[arg(short, long)]
    pub branch: Option<String>,

    /// Include every commit, not just merge-request commits
    #[arg(short, long)]
    pub all: bool,

    /// Changelog file to update (defaults to the configured file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Collect history down to this version instead of the most recent
    /// version found in the changelog
    #[arg(short = 'u', long, value_name = "VERSION")]
    pub until: Option<String>,

    /// Discard the existing changelog and write only the new blocks
    #[arg(long)]
    pub overwrite: bool,

    /// Keep only the first line of each message
    #[arg(short, long)]
    pub short: bool,

    /// Print the rendered blocks instead of writing the file
    #[arg(long)]
    pub dry_run: bool,

    /// Working directory
    #[arg(short = 'C', long)]
    pub directory: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Run the four-stage pipeline: read history, segment versions, resolve
    /// messages, render and store the changelog.
    pub async fn execute(self) -> Result<()> {
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        let cwd = std::env::current_dir()?;
        let (config, _) = load_config_or_default(&cwd);

        let branch = self.branch.clone().or(config.branch);
        let all_commits = self.all || config.all_commits;
        let short = self.short || config.short;
        let output = self
            .output
            .clone()
            .unwrap_or_else(|| cwd.join(&config.file));

        // An explicit --until must be a valid version; a malformed version in
        // the changelog itself just means there is no resume point.
        let override_version = match &self.until {
            Some(raw) => match Version::parse(raw) {
                Some(v) => Some(v),
                None => {
                    return Err(MergelogError::other(format!(
                        "invalid version '{raw}': expected 2-4 numeric segments"
                    )))
                }
            },
            None => None,
        };

        let existing = if self.overwrite {
            String::new()
        } else {
            read_changelog(&output)?
        };
        let document = ChangelogDocument::parse(&existing);
        let until = override_version.or_else(|| document.known_version().cloned());

        info!(
            branch = branch.as_deref().unwrap_or("<HEAD>"),
            all_commits,
            short,
            until = until.as_ref().map(|v| v.as_str()),
            output = %output.display(),
            "starting changelog run"
        );

        let provider = Arc::new(GitCliProvider::new(&cwd));
        let buckets =
            collect_buckets(provider.as_ref(), branch.as_deref(), all_commits, until.clone())
                .await?;

        if self.verbose && !self.quiet {
            println!(
                "Found {} version(s) since {}",
                buckets.len(),
                until
                    .as_ref()
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "the beginning of history".to_string())
            );
        }

        let resolver = MessageResolver::new(
            provider,
            Arc::new(MarkdownSanitizer::new()),
            ResolveOptions {
                include_all: all_commits,
                short,
            },
        );
        let logs = resolver.resolve(buckets).await?;

        let blocks = render_blocks(&logs, until.as_ref());

        if blocks.is_empty() {
            if !self.quiet {
                println!("{}", style("No new versions to record.").yellow());
            }
            return Ok(());
        }

        if self.dry_run {
            print!("{}", blocks);
            return Ok(());
        }

        let merged = document.merge(&blocks);
        write_changelog(&output, &merged)?;

        if !self.quiet {
            println!(
                "{} Changelog written to {}",
                style("✓").green().bold(),
                style(output.display()).cyan()
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "mergelog",
            "--branch",
            "release",
            "--all",
            "--short",
            "--until",
            "1.2.0",
            "--dry-run",
        ]);
        assert_eq!(cli.branch.as_deref(), Some("release"));
        assert!(cli.all);
        assert!(cli.short);
        assert_eq!(cli.until.as_deref(), Some("1.2.0"));
        assert!(cli.dry_run);
        assert!(!cli.overwrite);
    }
}
