//! Shell-free process execution for the history backend.
//!
//! Commands are spawned directly from an argv array and waited on; there is
//! no shell, no timeout and no retry.

use crate::DeskforgeError;
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::{Command as ProcessCommand, Stdio};
use tracing::debug;

/// A single program invocation
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    /// Program to execute (must be in PATH or absolute path)
    pub program: String,
    /// Arguments to pass to the program
    pub args: Vec<String>,
    /// Working directory for execution
    pub working_dir: Option<PathBuf>,
    /// Environment variables (extends system environment)
    pub env_vars: HashMap<String, String>,
}

impl Command {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
            env_vars: HashMap::new(),
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn env(mut self, name: &str, value: &str) -> Self {
        self.env_vars.insert(name.to_string(), value.to_string());
        self
    }

    /// Human-readable form for logs and error messages
    pub fn display(&self) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.args.iter().cloned());
        shell_words::join(parts)
    }
}

/// Result of command execution
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Exit code, -1 when the process was killed by a signal
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

/// Errors that can occur during command execution
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("Process spawn failed for `{command}`: {source}")]
    ProcessSpawn {
        command: String,
        source: std::io::Error,
    },

    #[error("`{command}` exited with code {exit_code}: {stderr}")]
    NonZeroExit {
        command: String,
        exit_code: i32,
        stderr: String,
    },
}

impl From<ExecutionError> for DeskforgeError {
    fn from(err: ExecutionError) -> Self {
        DeskforgeError::Backend(err.to_string())
    }
}

/// Run a command to completion and capture its output
pub fn run(command: &Command) -> Result<ExecutionResult, ExecutionError> {
    let rendered = command.display();
    debug!("Running {}", rendered);

    let mut process = ProcessCommand::new(&command.program);
    process
        .args(&command.args)
        .envs(&command.env_vars)
        .stdin(Stdio::null());
    if let Some(dir) = &command.working_dir {
        process.current_dir(dir);
    }

    let output = process.output().map_err(|source| ExecutionError::ProcessSpawn {
        command: rendered.clone(),
        source,
    })?;

    Ok(ExecutionResult {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        success: output.status.success(),
    })
}

/// Run a command and turn a non-zero exit into an error
pub fn run_checked(command: &Command) -> Result<ExecutionResult, ExecutionError> {
    let result = run(command)?;
    if !result.success {
        return Err(ExecutionError::NonZeroExit {
            command: command.display(),
            exit_code: result.exit_code,
            stderr: result.stderr.trim().to_string(),
        });
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_builder() {
        let cmd = Command::new("git")
            .args(["commit", "-m", "Save profile 'work'"])
            .current_dir("/tmp")
            .env("GIT_TERMINAL_PROMPT", "0");

        assert_eq!(cmd.program, "git");
        assert_eq!(cmd.args.len(), 3);
        assert_eq!(cmd.working_dir, Some(PathBuf::from("/tmp")));
        assert_eq!(cmd.env_vars.get("GIT_TERMINAL_PROMPT"), Some(&"0".to_string()));
        assert!(cmd.display().starts_with("git commit -m "));
        assert_eq!(Command::new("git").args(["status", "--short"]).display(), "git status --short");
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let cmd = Command::new("deskforge-no-such-program-xyz");
        let err = run(&cmd).unwrap_err();
        assert!(matches!(err, ExecutionError::ProcessSpawn { .. }));
    }
}
