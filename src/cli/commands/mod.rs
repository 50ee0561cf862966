pub mod history;
pub mod profile;
pub mod remote;
pub mod tree;

use super::context::Workspace;
use anyhow::Result;

/// Common trait for all command handlers
pub trait CommandHandler {
    /// Execute the command
    fn execute(&self, workspace: &Workspace) -> Result<()>;

    /// Get command name for logging
    fn name(&self) -> &'static str;
}
