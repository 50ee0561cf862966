use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// deskforge: pick desktop software and settings, keep versioned profiles
#[derive(Parser, Debug)]
#[command(name = "deskforge")]
#[command(version)]
#[command(about = "Selection tree and versioned profile store for desktop setup")]
#[command(
    long_about = "deskforge tracks which catalog options are selected, derives category status, and stores profiles in a git-backed history with diff, restore, branches and remotes."
)]
pub struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Profile store directory (overrides the settings file)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for listing commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the status of a node, or of every top-level category
    Status {
        /// Catalog node id
        id: Option<String>,

        /// Count leaves at any depth instead of direct children
        #[arg(long)]
        deep: bool,

        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Toggle a leaf, or bulk-toggle a category's direct leaves
    Toggle {
        id: String,
    },

    /// Select every direct, non-configurable leaf of a category
    SelectAll {
        scope: String,
    },

    /// Clear every direct, non-configurable leaf of a category
    ClearAll {
        scope: String,
    },

    /// Set a configurable value
    Set {
        id: String,
        value: String,
    },

    /// List the currently legal options of a dropdown
    Options {
        id: String,
    },

    /// Print the selected leaves in install order
    Selected,

    /// Commit the current profile, optionally under a name
    Save {
        /// Name of the saved slot
        #[arg(short, long)]
        name: Option<String>,

        /// Commit message
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Print a profile; with --apply make it the current one
    Load {
        /// Saved or preset name (current profile if omitted)
        name: Option<String>,

        /// Treat the name as a backup slot
        #[arg(long, requires = "name")]
        backup: bool,

        #[arg(long)]
        apply: bool,
    },

    /// List saved profiles, presets and backups
    List {
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show recent revisions, newest first
    History {
        #[arg(short, long, default_value_t = 20)]
        limit: usize,

        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Diff the current profile between two revisions
    Diff {
        /// Older side (working copy if omitted)
        #[arg(long)]
        from: Option<String>,

        /// Newer side
        to: String,
    },

    /// Restore the current profile from a revision
    Restore {
        revision: String,
    },

    /// Manage branches
    Branch {
        #[command(subcommand)]
        action: BranchAction,
    },

    /// Manage remotes
    Remote {
        #[command(subcommand)]
        action: RemoteAction,
    },

    /// Push history to a remote
    Push {
        #[arg(long)]
        remote: Option<String>,

        /// Branch to push (current branch if omitted)
        #[arg(long)]
        branch: Option<String>,
    },

    /// Pull history from a remote
    Pull {
        #[arg(long)]
        remote: Option<String>,

        /// Branch to pull (current branch if omitted)
        #[arg(long)]
        branch: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum BranchAction {
    /// Create a branch at the current revision
    Create { name: String },
    /// List branches
    List,
    /// Switch to a branch
    Switch { name: String },
}

#[derive(Subcommand, Debug)]
pub enum RemoteAction {
    /// Register a remote
    Add {
        url: String,

        /// Remote name (default from settings)
        #[arg(long)]
        name: Option<String>,
    },
}

impl Commands {
    /// Get the command name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Status { .. } => "status",
            Commands::Toggle { .. } => "toggle",
            Commands::SelectAll { .. } => "select-all",
            Commands::ClearAll { .. } => "clear-all",
            Commands::Set { .. } => "set",
            Commands::Options { .. } => "options",
            Commands::Selected => "selected",
            Commands::Save { .. } => "save",
            Commands::Load { .. } => "load",
            Commands::List { .. } => "list",
            Commands::History { .. } => "history",
            Commands::Diff { .. } => "diff",
            Commands::Restore { .. } => "restore",
            Commands::Branch { .. } => "branch",
            Commands::Remote { .. } => "remote",
            Commands::Push { .. } => "push",
            Commands::Pull { .. } => "pull",
        }
    }

    /// Check if this command writes to the profile store
    pub fn modifies_store(&self) -> bool {
        match self {
            Commands::Toggle { .. }
            | Commands::SelectAll { .. }
            | Commands::ClearAll { .. }
            | Commands::Set { .. }
            | Commands::Save { .. }
            | Commands::Restore { .. }
            | Commands::Pull { .. } => true,
            Commands::Load { apply, .. } => *apply,
            Commands::Branch { action } => !matches!(action, BranchAction::List),
            _ => false,
        }
    }
}
