//! `git` executable as the history backend.

use super::backend::{BranchInfo, BranchOp, HistoryBackend, HistoryEntry};
use super::command::{self, Command, ExecutionResult};
use crate::config::Settings;
use crate::{DeskforgeError, Result};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Branch created by `init`
pub const DEFAULT_BRANCH: &str = "main";

const FIELD_SEPARATOR: char = '\u{1f}';

/// Drives `git` in a work tree, one child process per call
#[derive(Debug, Clone)]
pub struct GitBackend {
    work_tree: PathBuf,
    program: String,
    /// Extra arguments placed before every subcommand
    base_args: Vec<String>,
    identity: Option<(String, String)>,
}

impl GitBackend {
    pub fn new(work_tree: impl Into<PathBuf>) -> Self {
        Self {
            work_tree: work_tree.into(),
            program: "git".to_string(),
            base_args: Vec::new(),
            identity: None,
        }
    }

    /// Build from settings: `git_command` is split shell-style so wrappers
    /// such as `git --no-pager` work.
    pub fn from_settings(work_tree: impl Into<PathBuf>, settings: &Settings) -> Result<Self> {
        let mut words = shell_words::split(&settings.git_command).map_err(|e| {
            DeskforgeError::Config(format!(
                "Invalid git_command '{}': {}",
                settings.git_command, e
            ))
        })?;
        if words.is_empty() {
            return Err(DeskforgeError::Config("git_command is empty".to_string()));
        }
        let program = words.remove(0);

        Ok(Self {
            work_tree: work_tree.into(),
            program,
            base_args: words,
            identity: None,
        }
        .with_identity(&settings.author_name, &settings.author_email))
    }

    /// Commit identity passed on the command line, so commits work without
    /// a global git config
    pub fn with_identity(mut self, name: &str, email: &str) -> Self {
        self.identity = Some((name.to_string(), email.to_string()));
        self
    }

    pub fn work_tree(&self) -> &Path {
        &self.work_tree
    }

    fn command<I, S>(&self, args: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cmd = Command::new(&self.program)
            .args(self.base_args.iter().cloned())
            .current_dir(&self.work_tree)
            .env("GIT_TERMINAL_PROMPT", "0");
        if let Some((name, email)) = &self.identity {
            cmd = cmd.args([
                "-c".to_string(),
                format!("user.name={name}"),
                "-c".to_string(),
                format!("user.email={email}"),
            ]);
        }
        cmd.args(args)
    }

    fn git<I, S>(&self, args: I) -> Result<ExecutionResult>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(command::run_checked(&self.command(args))?)
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Parse `git log` output written with [`LOG_FORMAT`]
pub(crate) fn parse_log(stdout: &str) -> Vec<HistoryEntry> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let mut fields = line.splitn(3, FIELD_SEPARATOR);
            let revision = fields.next()?.trim().to_string();
            let raw_time = fields.next()?;
            let message = fields.next().unwrap_or_default().to_string();
            match DateTime::parse_from_rfc3339(raw_time.trim()) {
                Ok(time) => Some(HistoryEntry {
                    revision,
                    timestamp: time.with_timezone(&Utc),
                    message,
                }),
                Err(e) => {
                    warn!("Skipping log line with bad timestamp '{}': {}", raw_time, e);
                    None
                }
            }
        })
        .collect()
}

/// Parse `git branch --list --format='%(HEAD) %(refname:short)'`
pub(crate) fn parse_branches(stdout: &str) -> Vec<BranchInfo> {
    stdout
        .lines()
        .filter(|line| line.len() > 2)
        .map(|line| BranchInfo {
            current: line.starts_with('*'),
            name: line[2..].trim().to_string(),
        })
        .collect()
}

const LOG_FORMAT: &str = "--format=%H%x1f%cI%x1f%s";

impl HistoryBackend for GitBackend {
    fn is_initialized(&self) -> bool {
        self.work_tree.join(".git").exists()
    }

    fn init(&self) -> Result<()> {
        self.git([
            "-c".to_string(),
            format!("init.defaultBranch={DEFAULT_BRANCH}"),
            "init".to_string(),
            "-q".to_string(),
        ])?;
        // init.defaultBranch is ignored by older git; pin HEAD explicitly
        self.git([
            "symbolic-ref".to_string(),
            "HEAD".to_string(),
            format!("refs/heads/{DEFAULT_BRANCH}"),
        ])?;
        Ok(())
    }

    fn add(&self) -> Result<()> {
        self.git(["add", "-A"])?;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.git(["commit", "-q", "--allow-empty", "-m", message])?;
        Ok(())
    }

    fn log(&self, max_count: usize) -> Result<Vec<HistoryEntry>> {
        let result = self.git([
            "log".to_string(),
            format!("--max-count={max_count}"),
            LOG_FORMAT.to_string(),
        ])?;
        Ok(parse_log(&result.stdout))
    }

    fn checkout(&self, revision: &str, path: &Path) -> Result<()> {
        self.git(["checkout".to_string(), revision.to_string(), "--".to_string(), path_arg(path)])?;
        Ok(())
    }

    fn show(&self, revision: &str, path: &Path) -> Result<String> {
        let result = self.git(["show".to_string(), format!("{revision}:{}", path_arg(path))])?;
        Ok(result.stdout)
    }

    fn branch(&self, op: BranchOp<'_>) -> Result<Vec<BranchInfo>> {
        match op {
            BranchOp::Create(name) => {
                self.git(["branch", name])?;
                Ok(Vec::new())
            }
            BranchOp::Switch(name) => {
                self.git(["checkout", "-q", name])?;
                Ok(Vec::new())
            }
            BranchOp::List => {
                let result = self.git(["branch", "--list", "--format=%(HEAD) %(refname:short)"])?;
                Ok(parse_branches(&result.stdout))
            }
        }
    }

    fn remote_add(&self, name: &str, url: &str) -> Result<()> {
        self.git(["remote", "add", name, url])?;
        Ok(())
    }

    fn push(&self, remote: &str, branch: &str) -> Result<()> {
        self.git(["push", "-q", remote, branch])?;
        Ok(())
    }

    fn pull(&self, remote: &str, branch: &str) -> Result<()> {
        self.git(["pull", "-q", "--no-rebase", "--no-edit", remote, branch])?;
        Ok(())
    }
}
