use crate::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

/// One committed revision
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub revision: String,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchInfo {
    pub name: String,
    pub current: bool,
}

/// Branch sub-operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchOp<'a> {
    Create(&'a str),
    List,
    Switch(&'a str),
}

/// Commit-oriented history over a file tree.
///
/// Paths are relative to the tree the backend manages. Implementations run
/// each call to completion; none of them lock, time out or retry.
pub trait HistoryBackend {
    /// Whether the history root already exists
    fn is_initialized(&self) -> bool;

    fn init(&self) -> Result<()>;

    /// Stage every change in the tree, including deletions
    fn add(&self) -> Result<()>;

    /// Record staged changes; commits even when nothing changed
    fn commit(&self, message: &str) -> Result<()>;

    /// Up to `max_count` entries, newest first
    fn log(&self, max_count: usize) -> Result<Vec<HistoryEntry>>;

    /// Overwrite `path` in the tree with its content at `revision`
    fn checkout(&self, revision: &str, path: &Path) -> Result<()>;

    /// Content of `path` at `revision`, without touching the tree
    fn show(&self, revision: &str, path: &Path) -> Result<String>;

    /// Create, list or switch branches. Only `List` returns entries.
    fn branch(&self, op: BranchOp<'_>) -> Result<Vec<BranchInfo>>;

    fn remote_add(&self, name: &str, url: &str) -> Result<()>;

    fn push(&self, remote: &str, branch: &str) -> Result<()>;

    fn pull(&self, remote: &str, branch: &str) -> Result<()>;
}
