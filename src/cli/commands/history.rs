use super::CommandHandler;
use crate::cli::app::{BranchAction, OutputFormat};
use crate::cli::context::{ensure, Workspace};
use anyhow::Result;

/// Handler for the `history` command
pub struct HistoryCommand {
    pub limit: usize,
    pub format: OutputFormat,
}

impl HistoryCommand {
    pub fn new(limit: usize, format: OutputFormat) -> Self {
        Self { limit, format }
    }
}

impl CommandHandler for HistoryCommand {
    fn execute(&self, workspace: &Workspace) -> Result<()> {
        let entries = workspace.store.history(self.limit);

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
            OutputFormat::Text => {
                for entry in &entries {
                    let short: String = entry.revision.chars().take(8).collect();
                    println!(
                        "{short}  {}  {}",
                        entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                        entry.message
                    );
                }
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "history"
    }
}

/// Handler for the `diff` command
pub struct DiffCommand {
    pub from: Option<String>,
    pub to: String,
}

impl DiffCommand {
    pub fn new(from: Option<String>, to: String) -> Self {
        Self { from, to }
    }
}

impl CommandHandler for DiffCommand {
    fn execute(&self, workspace: &Workspace) -> Result<()> {
        let diff = workspace.store.diff(self.from.as_deref(), &self.to)?;
        if diff.is_empty() {
            println!("No differences");
        } else {
            print!("{diff}");
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "diff"
    }
}

/// Handler for the `restore` command
pub struct RestoreCommand {
    pub revision: String,
}

impl RestoreCommand {
    pub fn new(revision: String) -> Self {
        Self { revision }
    }
}

impl CommandHandler for RestoreCommand {
    fn execute(&self, workspace: &Workspace) -> Result<()> {
        ensure(
            workspace.store.restore_from(&self.revision),
            &format!("Restore from {}", self.revision),
        )?;
        println!("Restored current profile from {}", self.revision);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "restore"
    }
}

/// Handler for the `branch` subcommands
pub struct BranchCommand<'a> {
    pub action: &'a BranchAction,
}

impl<'a> BranchCommand<'a> {
    pub fn new(action: &'a BranchAction) -> Self {
        Self { action }
    }
}

impl CommandHandler for BranchCommand<'_> {
    fn execute(&self, workspace: &Workspace) -> Result<()> {
        match self.action {
            BranchAction::Create { name } => {
                ensure(workspace.store.branch(name), &format!("Creating branch {name}"))?;
                println!("Created branch {name}");
            }
            BranchAction::Switch { name } => {
                ensure(
                    workspace.store.switch_branch(name),
                    &format!("Switching to branch {name}"),
                )?;
                println!("Switched to branch {name}");
            }
            BranchAction::List => {
                for branch in workspace.store.list_branches() {
                    let marker = if branch.current { "*" } else { " " };
                    println!("{marker} {}", branch.name);
                }
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "branch"
    }
}
