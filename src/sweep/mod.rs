//! The sweep itself: candidate selection, per-branch disposition, and the
//! session bookkeeping around it.

use anyhow::{bail, Context, Result};
use tracing::debug;

use crate::config::SweepConfig;
use crate::external::GitBackend;
use crate::prompt::Confirm;
use crate::report;

/// Counters reported at the end of a run. Deletions count branches cleaned,
/// not delete operations issued: a branch removed both locally and remotely
/// still counts once.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub deleted: u32,
    pub skipped: u32,
}

pub struct Sweeper<'a> {
    config: &'a SweepConfig,
    git: &'a dyn GitBackend,
    confirm: &'a mut dyn Confirm,
    summary: RunSummary,
}

impl<'a> Sweeper<'a> {
    pub fn new(
        config: &'a SweepConfig,
        git: &'a dyn GitBackend,
        confirm: &'a mut dyn Confirm,
    ) -> Self {
        Self {
            config,
            git,
            confirm,
            summary: RunSummary::default(),
        }
    }

    /// Run the whole session: preconditions, fetch, switch to master, sweep
    /// every merged candidate, prune, switch back, report.
    pub fn run(mut self) -> Result<RunSummary> {
        self.check_preconditions()?;

        if self.config.dry_run() {
            report::info("Dry run: nothing will be deleted (pass -D to delete branches)");
        }

        if let Err(err) = self.git.fetch(&self.config.remote) {
            report::warn(format!(
                "fetch from '{}' failed: {err}",
                self.config.remote
            ));
        }

        let starting_branch = self
            .git
            .current_branch()
            .context("failed to determine the current branch")?;
        if starting_branch != self.config.master {
            self.git
                .checkout(&self.config.master)
                .with_context(|| format!("failed to switch to '{}'", self.config.master))?;
        }

        let candidates = self
            .git
            .merged_branches(&self.config.remote, &self.config.master)
            .with_context(|| {
                format!(
                    "failed to list branches merged into '{}'",
                    self.config.master
                )
            })?;
        debug!(count = candidates.len(), "sweep candidates");

        for branch in &candidates {
            if branch == &self.config.master {
                // master is never a deletion candidate
                continue;
            }
            self.sweep_branch(branch)?;
        }

        if let Err(err) = self.git.prune_remote(&self.config.remote) {
            report::warn(format!(
                "pruning remote '{}' failed: {err}",
                self.config.remote
            ));
        }

        self.restore_starting_branch(&starting_branch)?;

        report::info(format!(
            "Done: {} deleted, {} skipped",
            self.summary.deleted, self.summary.skipped
        ));
        Ok(self.summary)
    }

    fn check_preconditions(&self) -> Result<()> {
        let version = self.git.version().context("git is not available")?;
        debug!(%version, "git found");
        if !self.git.is_inside_work_tree()? {
            bail!("not inside a git repository");
        }
        Ok(())
    }

    /// Decide and apply the disposition for one merged candidate.
    fn sweep_branch(&mut self, branch: &str) -> Result<()> {
        let remote_ref = self.config.remote_ref(branch);
        let local_exists = self.git.branch_exists(branch)?;

        if local_exists && self.git.is_ancestor(branch, &remote_ref)? {
            // Local copy fully folded into the remote branch: drop both.
            // The two deletes are independent operations, not atomic.
            if !self.confirm_deletion(branch, &format!("local and '{remote_ref}'"))? {
                return Ok(());
            }
            self.delete_local(branch)?;
            self.delete_remote(branch)?;
            if !self.config.dry_run() {
                self.summary.deleted += 1;
            }
        } else if local_exists {
            report::info(format!(
                "Skipping '{branch}': local branch is not contained in '{remote_ref}'"
            ));
            self.summary.skipped += 1;
        } else if self.git.remote_branch_exists(&self.config.remote, branch)? {
            if !self.confirm_deletion(branch, &format!("'{remote_ref}' only"))? {
                return Ok(());
            }
            self.delete_remote(branch)?;
            if !self.config.dry_run() {
                self.summary.deleted += 1;
            }
        }
        // Neither copy left: nothing to do, nothing to count.
        Ok(())
    }

    /// Dry runs never prompt; declining counts the branch as skipped.
    fn confirm_deletion(&mut self, branch: &str, scope: &str) -> Result<bool> {
        if self.config.dry_run() {
            return Ok(true);
        }
        let question = format!("Delete branch '{branch}' ({scope})?");
        let confirmed = self
            .confirm
            .confirm(&question)
            .context("failed to read confirmation")?;
        if !confirmed {
            report::info(format!("Skipping '{branch}'"));
            self.summary.skipped += 1;
        }
        Ok(confirmed)
    }

    fn delete_local(&mut self, branch: &str) -> Result<()> {
        if self.config.dry_run() {
            report::info(format!("Would delete local branch '{branch}'"));
            return Ok(());
        }
        report::info(format!("Deleting local branch '{branch}'"));
        self.git
            .delete_local(branch)
            .with_context(|| format!("failed to delete local branch '{branch}'"))
    }

    fn delete_remote(&mut self, branch: &str) -> Result<()> {
        let remote_ref = self.config.remote_ref(branch);
        if self.config.dry_run() {
            report::info(format!("Would delete remote branch '{remote_ref}'"));
            return Ok(());
        }
        report::info(format!("Deleting remote branch '{remote_ref}'"));
        self.git
            .delete_remote(&self.config.remote, branch)
            .with_context(|| format!("failed to delete remote branch '{remote_ref}'"))
    }

    fn restore_starting_branch(&self, starting_branch: &str) -> Result<()> {
        if starting_branch == self.config.master {
            return Ok(());
        }
        if self.git.branch_exists(starting_branch)? {
            self.git
                .checkout(starting_branch)
                .with_context(|| format!("failed to switch back to '{starting_branch}'"))?;
        } else {
            report::info(format!(
                "Starting branch '{starting_branch}' was deleted; staying on '{}'",
                self.config.master
            ));
        }
        Ok(())
    }
}
