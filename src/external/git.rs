//! Git command abstractions
//!
//! Wraps the git CLI behind a narrow trait so the sweep engine stays
//! testable and all listing-output parsing lives in one place.

use super::command::{CommandError, CommandExecutor, CommandOutput};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

pub type BranchName = String;

#[derive(Debug, Error)]
pub enum GitError {
    #[error("git executable not found on PATH")]
    GitNotFound,
    #[error("HEAD is detached; cannot determine current branch")]
    DetachedHead,
    #[error("Command execution error: {source}")]
    Command {
        #[from]
        source: CommandError,
    },
    #[error("git {command} failed: {message}")]
    GitCommandFailed { command: String, message: String },
}

/// Narrow interface over the git CLI used by the sweep engine.
///
/// This abstraction enables testing the engine without a real repository,
/// while keeping every invocation and every line of output parsing in the
/// one `GitClient` implementation.
pub trait GitBackend {
    /// Probe that git is installed and runnable (`git --version`).
    fn version(&self) -> Result<String, GitError>;

    /// True when the working directory is inside a git work tree.
    fn is_inside_work_tree(&self) -> Result<bool, GitError>;

    /// Name of the currently checked-out branch.
    fn current_branch(&self) -> Result<BranchName, GitError>;

    /// Local and remote branches whose history is fully merged into
    /// `master`, deduplicated, in listing order.
    fn merged_branches(&self, remote: &str, master: &str) -> Result<Vec<BranchName>, GitError>;

    /// Check if a branch exists locally.
    fn branch_exists(&self, branch: &str) -> Result<bool, GitError>;

    /// Check if a branch exists on the given remote.
    fn remote_branch_exists(&self, remote: &str, branch: &str) -> Result<bool, GitError>;

    /// Check if `ancestor` is an ancestor commit of `descendant`.
    fn is_ancestor(&self, ancestor: &str, descendant: &str) -> Result<bool, GitError>;

    /// Checkout a branch.
    fn checkout(&self, branch: &str) -> Result<(), GitError>;

    /// Fetch from a remote.
    fn fetch(&self, remote: &str) -> Result<(), GitError>;

    /// Drop remote-tracking refs that no longer exist on the remote.
    fn prune_remote(&self, remote: &str) -> Result<(), GitError>;

    /// Delete a local branch (`git branch -d`).
    fn delete_local(&self, branch: &str) -> Result<(), GitError>;

    /// Delete a branch on the remote (`git push <remote> --delete`).
    fn delete_remote(&self, remote: &str, branch: &str) -> Result<(), GitError>;
}

/// Strip the decorations `git branch` puts on a listing line: the
/// current-branch marker (`* `), the linked-worktree marker (`+ `), and an
/// optional `remotes/<remote>/` prefix. Already-bare names pass through
/// unchanged.
pub fn strip_branch_name(raw: &str, remote: &str) -> String {
    let line = raw.trim();
    let line = line
        .strip_prefix("* ")
        .or_else(|| line.strip_prefix("+ "))
        .unwrap_or(line)
        .trim_start();
    let remote_prefix = format!("remotes/{remote}/");
    line.strip_prefix(remote_prefix.as_str())
        .unwrap_or(line)
        .trim()
        .to_string()
}

/// Real git implementation shelling out through a `CommandExecutor`.
pub struct GitClient {
    executor: Arc<dyn CommandExecutor>,
}

impl GitClient {
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self { executor }
    }

    fn capture_git(&self, args: &[&str]) -> Result<CommandOutput, GitError> {
        self.executor.capture("git", args).map_err(|e| match e {
            CommandError::CommandNotFound { .. } => GitError::GitNotFound,
            other => GitError::Command { source: other },
        })
    }

    fn capture_git_ok(&self, args: &[&str]) -> Result<String, GitError> {
        let output = self.capture_git(args)?;
        if !output.success() {
            return Err(GitError::GitCommandFailed {
                command: args.join(" "),
                message: output.stderr.trim().to_string(),
            });
        }
        Ok(output.stdout.trim().to_string())
    }

    /// Passthrough invocation: git's own output goes straight to the
    /// terminal, only the exit status comes back.
    fn run_git(&self, args: &[&str]) -> Result<(), GitError> {
        let code = self.executor.run("git", args).map_err(|e| match e {
            CommandError::CommandNotFound { .. } => GitError::GitNotFound,
            other => GitError::Command { source: other },
        })?;
        if code != 0 {
            return Err(GitError::GitCommandFailed {
                command: args.join(" "),
                message: format!("exited with status {code}"),
            });
        }
        Ok(())
    }

    /// Existence and containment probes: a non-zero exit means "no",
    /// never a propagated error.
    fn probe_git(&self, args: &[&str]) -> Result<bool, GitError> {
        Ok(self.capture_git(args)?.success())
    }
}

impl GitBackend for GitClient {
    fn version(&self) -> Result<String, GitError> {
        self.capture_git_ok(&["--version"])
    }

    fn is_inside_work_tree(&self) -> Result<bool, GitError> {
        let output = self.capture_git(&["rev-parse", "--is-inside-work-tree"])?;
        Ok(output.success() && output.stdout.trim() == "true")
    }

    fn current_branch(&self) -> Result<BranchName, GitError> {
        // Try the newer command first
        if let Ok(branch) = self.capture_git_ok(&["branch", "--show-current"]) {
            if !branch.is_empty() {
                return Ok(branch);
            }
        }

        // Fallback to the older method
        let output = self.capture_git_ok(&["rev-parse", "--abbrev-ref", "HEAD"])?;
        if output == "HEAD" {
            return Err(GitError::DetachedHead);
        }
        Ok(output)
    }

    fn merged_branches(&self, remote: &str, master: &str) -> Result<Vec<BranchName>, GitError> {
        // The one porcelain listing we still parse; every other query goes
        // through show-ref / merge-base plumbing.
        let output =
            self.capture_git_ok(&["branch", "--no-color", "--all", "--merged", master])?;

        let mut branches: Vec<BranchName> = Vec::new();
        for line in output.lines() {
            // Symref decorations like `remotes/origin/HEAD -> origin/master`
            // carry `->` as a standalone token; `>` is legal inside a branch
            // name, so a bare substring match would eat real branches.
            if line.trim().is_empty() || line.split_whitespace().nth(1) == Some("->") {
                continue;
            }
            let name = strip_branch_name(line, remote);
            if name.is_empty() || branches.iter().any(|b| b == &name) {
                continue;
            }
            branches.push(name);
        }
        debug!(master, count = branches.len(), "merged branch candidates");
        Ok(branches)
    }

    fn branch_exists(&self, branch: &str) -> Result<bool, GitError> {
        self.probe_git(&[
            "show-ref",
            "--verify",
            "--quiet",
            &format!("refs/heads/{branch}"),
        ])
    }

    fn remote_branch_exists(&self, remote: &str, branch: &str) -> Result<bool, GitError> {
        self.probe_git(&[
            "show-ref",
            "--verify",
            "--quiet",
            &format!("refs/remotes/{remote}/{branch}"),
        ])
    }

    fn is_ancestor(&self, ancestor: &str, descendant: &str) -> Result<bool, GitError> {
        self.probe_git(&["merge-base", "--is-ancestor", ancestor, descendant])
    }

    fn checkout(&self, branch: &str) -> Result<(), GitError> {
        self.run_git(&["checkout", branch])
    }

    fn fetch(&self, remote: &str) -> Result<(), GitError> {
        self.run_git(&["fetch", remote])
    }

    fn prune_remote(&self, remote: &str) -> Result<(), GitError> {
        self.run_git(&["remote", "prune", remote])
    }

    fn delete_local(&self, branch: &str) -> Result<(), GitError> {
        self.run_git(&["branch", "-d", branch])
    }

    fn delete_remote(&self, remote: &str, branch: &str) -> Result<(), GitError> {
        self.run_git(&["push", remote, "--delete", branch])
    }
}
