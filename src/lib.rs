// git-sweep library surface
// Exposed so integration tests can drive the engine and its seams directly.

pub mod cli;
pub mod config;
pub mod external;
pub mod prompt;
pub mod report;
pub mod sweep;

// Re-export key types for easy access
pub use cli::Cli;
pub use config::SweepConfig;
pub use external::{
    strip_branch_name, CommandError, CommandExecutor, CommandOutput, GitBackend, GitClient,
    GitError, ProcessCommandExecutor,
};
pub use prompt::{Confirm, TerminalPrompt};
pub use sweep::{RunSummary, Sweeper};
