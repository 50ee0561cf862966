use super::CommandHandler;
use crate::catalog::ConfigValue;
use crate::cli::app::OutputFormat;
use crate::cli::context::Workspace;
use crate::engine::{CategoryStatus, NodeStatus, SelectionTree};
use anyhow::Result;
use std::collections::BTreeMap;

fn status_label(status: NodeStatus) -> &'static str {
    match status {
        NodeStatus::Selected => "selected",
        NodeStatus::Unselected => "unselected",
        NodeStatus::Category(CategoryStatus::All) => "all",
        NodeStatus::Category(CategoryStatus::Partial) => "partial",
        NodeStatus::Category(CategoryStatus::None) => "none",
    }
}

/// Handler for the `status` command
pub struct StatusCommand {
    pub id: Option<String>,
    pub deep: bool,
    pub format: OutputFormat,
}

impl StatusCommand {
    pub fn new(id: Option<String>, deep: bool, format: OutputFormat) -> Self {
        Self { id, deep, format }
    }

    fn status(&self, tree: &SelectionTree, id: &str) -> Result<NodeStatus> {
        Ok(if self.deep {
            tree.aggregate_status(id)?
        } else {
            tree.status_of(id)?
        })
    }
}

impl CommandHandler for StatusCommand {
    fn execute(&self, workspace: &Workspace) -> Result<()> {
        let tree = workspace.current_tree()?;

        let ids: Vec<String> = match &self.id {
            Some(id) => vec![id.clone()],
            None => tree
                .catalog()
                .children(tree.catalog().root_id())
                .map(|n| n.id.clone())
                .collect(),
        };

        let mut statuses = BTreeMap::new();
        for id in &ids {
            statuses.insert(id.clone(), self.status(&tree, id)?);
        }

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&statuses)?),
            OutputFormat::Text => {
                for id in &ids {
                    if let Some(status) = statuses.get(id) {
                        println!("{id}: {}", status_label(*status));
                    }
                }
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "status"
    }
}

/// Handler for the `toggle` command
pub struct ToggleCommand {
    pub id: String,
}

impl ToggleCommand {
    pub fn new(id: String) -> Self {
        Self { id }
    }
}

impl CommandHandler for ToggleCommand {
    fn execute(&self, workspace: &Workspace) -> Result<()> {
        let mut tree = workspace.current_tree()?;

        let status = if tree.catalog().category(&self.id).is_ok() {
            tree.toggle_category(&self.id)?
        } else {
            tree.toggle_leaf(&self.id)?;
            tree.status_of(&self.id)?
        };

        workspace.commit_tree(&tree, &format!("Toggle {}", self.id))?;
        println!("{}: {}", self.id, status_label(status));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "toggle"
    }
}

/// Handler for `select-all` and `clear-all`
pub struct BulkCommand {
    pub scope: String,
    pub select: bool,
}

impl BulkCommand {
    pub fn select_all(scope: String) -> Self {
        Self { scope, select: true }
    }

    pub fn clear_all(scope: String) -> Self {
        Self {
            scope,
            select: false,
        }
    }
}

impl CommandHandler for BulkCommand {
    fn execute(&self, workspace: &Workspace) -> Result<()> {
        let mut tree = workspace.current_tree()?;
        let changed = if self.select {
            tree.select_all(&self.scope)?
        } else {
            tree.clear_all(&self.scope)?
        };

        if changed > 0 {
            let verb = if self.select { "Select" } else { "Clear" };
            workspace.commit_tree(&tree, &format!("{verb} all in {}", self.scope))?;
        }
        let status = tree.status_of(&self.scope)?;
        println!("{}: {} changed, now {}", self.scope, changed, status_label(status));
        Ok(())
    }

    fn name(&self) -> &'static str {
        if self.select {
            "select-all"
        } else {
            "clear-all"
        }
    }
}

/// Handler for the `set` command
pub struct SetCommand {
    pub id: String,
    pub value: String,
}

impl SetCommand {
    pub fn new(id: String, value: String) -> Self {
        Self { id, value }
    }
}

impl CommandHandler for SetCommand {
    fn execute(&self, workspace: &Workspace) -> Result<()> {
        let mut tree = workspace.current_tree()?;
        let value = ConfigValue::parse(&self.value);
        tree.set_configured_value(&self.id, value.clone())?;

        workspace.commit_tree(&tree, &format!("Set {} to {}", self.id, value))?;
        println!("{} = {}", self.id, value);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "set"
    }
}

/// Handler for the `options` command
pub struct OptionsCommand {
    pub id: String,
}

impl OptionsCommand {
    pub fn new(id: String) -> Self {
        Self { id }
    }
}

impl CommandHandler for OptionsCommand {
    fn execute(&self, workspace: &Workspace) -> Result<()> {
        let tree = workspace.current_tree()?;
        let current = tree.effective_value(&self.id)?;

        for (key, label) in tree.options_for(&self.id)? {
            let marker = if current.as_key() == Some(key.as_str()) { "*" } else { " " };
            println!("{marker} {key}\t{label}");
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "options"
    }
}

/// Handler for the `selected` command
pub struct SelectedCommand;

impl CommandHandler for SelectedCommand {
    fn execute(&self, workspace: &Workspace) -> Result<()> {
        let tree = workspace.current_tree()?;
        for id in tree.selected_items() {
            println!("{id}");
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "selected"
    }
}
