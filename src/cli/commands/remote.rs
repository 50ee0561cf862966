use super::CommandHandler;
use crate::cli::app::RemoteAction;
use crate::cli::context::{ensure, Workspace};
use anyhow::Result;

/// Handler for the `remote` subcommands
pub struct RemoteCommand<'a> {
    pub action: &'a RemoteAction,
}

impl<'a> RemoteCommand<'a> {
    pub fn new(action: &'a RemoteAction) -> Self {
        Self { action }
    }
}

impl CommandHandler for RemoteCommand<'_> {
    fn execute(&self, workspace: &Workspace) -> Result<()> {
        match self.action {
            RemoteAction::Add { url, name } => {
                let name = workspace.remote_or_default(name.as_deref());
                ensure(
                    workspace.store.add_named_remote(name, url),
                    &format!("Adding remote {name}"),
                )?;
                println!("Added remote {name} -> {url}");
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}

/// Handler for `push` and `pull`
pub struct SyncCommand {
    pub remote: Option<String>,
    pub branch: Option<String>,
    pub push: bool,
}

impl SyncCommand {
    pub fn push(remote: Option<String>, branch: Option<String>) -> Self {
        Self {
            remote,
            branch,
            push: true,
        }
    }

    pub fn pull(remote: Option<String>, branch: Option<String>) -> Self {
        Self {
            remote,
            branch,
            push: false,
        }
    }
}

impl CommandHandler for SyncCommand {
    fn execute(&self, workspace: &Workspace) -> Result<()> {
        let remote = workspace.remote_or_default(self.remote.as_deref());
        let branch = self.branch.as_deref();

        if self.push {
            ensure(workspace.store.push(remote, branch), &format!("Push to {remote}"))?;
            println!("Pushed to {remote}");
        } else {
            ensure(workspace.store.pull(remote, branch), &format!("Pull from {remote}"))?;
            println!("Pulled from {remote}");
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        if self.push {
            "push"
        } else {
            "pull"
        }
    }
}
