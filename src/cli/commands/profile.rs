use super::CommandHandler;
use crate::catalog::PRESETS;
use crate::cli::app::OutputFormat;
use crate::cli::context::Workspace;
use crate::engine::SelectionTree;
use crate::profile::Profile;
use anyhow::{bail, Result};
use std::sync::Arc;
use tracing::warn;

/// Handler for the `save` command
pub struct SaveCommand {
    pub name: Option<String>,
    pub message: Option<String>,
}

impl SaveCommand {
    pub fn new(name: Option<String>, message: Option<String>) -> Self {
        Self { name, message }
    }
}

impl CommandHandler for SaveCommand {
    fn execute(&self, workspace: &Workspace) -> Result<()> {
        let tree = workspace.current_tree()?;
        let receipt = workspace.store.save(
            &Profile::capture(&tree),
            self.name.as_deref(),
            self.message.as_deref(),
        )?;

        println!("Saved {}", receipt.location().display());
        if !receipt.committed {
            println!("Warning: the change was not committed to history");
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "save"
    }
}

/// Handler for the `load` command
pub struct LoadCommand {
    pub name: Option<String>,
    pub backup: bool,
    pub apply: bool,
}

impl LoadCommand {
    pub fn new(name: Option<String>, backup: bool, apply: bool) -> Self {
        Self {
            name,
            backup,
            apply,
        }
    }
}

impl CommandHandler for LoadCommand {
    fn execute(&self, workspace: &Workspace) -> Result<()> {
        let profile = match (&self.name, self.backup) {
            (Some(name), true) => workspace.store.load_backup(name)?,
            (_, true) => bail!("--backup needs a backup name"),
            (name, false) => workspace.store.load(name.as_deref())?,
        };

        if !self.apply {
            print!("{}", profile.to_yaml()?);
            return Ok(());
        }

        // Round-trip through a tree so unknown ids and bad values are dropped
        let mut tree = SelectionTree::new(Arc::clone(&workspace.catalog));
        let report = tree.apply_profile(&profile);
        for id in &report.skipped_items {
            warn!("Skipping unknown item '{}'", id);
        }
        for (id, reason) in &report.rejected_values {
            warn!("Rejected value for '{}': {}", id, reason);
        }

        let label = self.name.as_deref().unwrap_or("current");
        workspace.commit_tree(&tree, &format!("Load {label}"))?;
        println!("Applied {label} ({} items selected)", tree.selected_items().len());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "load"
    }
}

/// Handler for the `list` command
pub struct ListCommand {
    pub format: OutputFormat,
}

impl ListCommand {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

impl CommandHandler for ListCommand {
    fn execute(&self, workspace: &Workspace) -> Result<()> {
        let listing = workspace.store.list()?;

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&listing)?),
            OutputFormat::Text => {
                for (title, names) in [
                    ("Saved", &listing.saved),
                    ("Presets", &listing.presets),
                    ("Backups", &listing.backups),
                ] {
                    println!("{title}:");
                    if names.is_empty() {
                        println!("  (none)");
                    }
                    for name in names {
                        match PRESETS.iter().find(|p| p.name == name.as_str()) {
                            Some(preset) if title == "Presets" => {
                                println!("  {name}\t{}", preset.description)
                            }
                            _ => println!("  {name}"),
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "list"
    }
}
