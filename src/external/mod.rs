//! External tool abstractions
//!
//! Trait-based wrappers around the git CLI, enabling testable code through
//! dependency injection and mock implementations.

pub mod command;
pub mod git;

pub use command::{CommandError, CommandExecutor, CommandOutput, ProcessCommandExecutor};
pub use git::{strip_branch_name, BranchName, GitBackend, GitClient, GitError};
