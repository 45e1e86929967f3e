use crate::cli::Cli;

/// Run configuration, threaded explicitly through every component instead
/// of living in ambient globals.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Remote that swept branches are deleted from.
    pub remote: String,
    /// Long-lived integration branch that merge status is evaluated against.
    pub master: String,
    /// True for a real run; false announces actions without executing them.
    pub delete: bool,
}

impl SweepConfig {
    pub fn dry_run(&self) -> bool {
        !self.delete
    }

    /// Remote-qualified name, e.g. `origin/feature-a`.
    pub fn remote_ref(&self, branch: &str) -> String {
        format!("{}/{}", self.remote, branch)
    }
}

impl From<Cli> for SweepConfig {
    fn from(cli: Cli) -> Self {
        Self {
            remote: cli.remote,
            master: cli.master,
            delete: cli.delete,
        }
    }
}
