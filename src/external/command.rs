//! Base command execution abstraction
//!
//! Provides the foundational trait for executing external commands, enabling
//! dependency injection for testing.

use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub status_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status_code == 0
    }
}

#[derive(Debug, Error, Clone)]
pub enum CommandError {
    #[error("Command not found: {command}")]
    CommandNotFound { command: String },
    #[error("IO error: {message}")]
    Io { message: String },
}

/// Trait for executing external commands
///
/// This abstraction allows the rest of the codebase to execute commands
/// without directly depending on std::process::Command, enabling testing
/// with mock implementations.
pub trait CommandExecutor: Send + Sync {
    /// Run a command and capture its stdout/stderr.
    fn capture(&self, program: &str, args: &[&str]) -> Result<CommandOutput, CommandError>;

    /// Run a command with inherited stdio so its output reaches the
    /// terminal directly. Returns the exit status code.
    fn run(&self, program: &str, args: &[&str]) -> Result<i32, CommandError>;
}

/// Real implementation using std::process::Command
pub struct ProcessCommandExecutor;

impl ProcessCommandExecutor {
    fn map_spawn_error(program: &str, e: std::io::Error) -> CommandError {
        if e.kind() == std::io::ErrorKind::NotFound {
            CommandError::CommandNotFound {
                command: program.to_string(),
            }
        } else {
            CommandError::Io {
                message: e.to_string(),
            }
        }
    }
}

impl CommandExecutor for ProcessCommandExecutor {
    fn capture(&self, program: &str, args: &[&str]) -> Result<CommandOutput, CommandError> {
        debug!(program, ?args, "executing (captured)");
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| Self::map_spawn_error(program, e))?;

        Ok(CommandOutput {
            status_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    fn run(&self, program: &str, args: &[&str]) -> Result<i32, CommandError> {
        debug!(program, ?args, "executing (passthrough)");
        let status = Command::new(program)
            .args(args)
            .status()
            .map_err(|e| Self::map_spawn_error(program, e))?;

        Ok(status.code().unwrap_or(-1))
    }
}
