use anyhow::Result;
use clap::Parser;
use deskforge::cli::commands::{
    history::{BranchCommand, DiffCommand, HistoryCommand, RestoreCommand},
    profile::{ListCommand, LoadCommand, SaveCommand},
    remote::{RemoteCommand, SyncCommand},
    tree::{
        BulkCommand, OptionsCommand, SelectedCommand, SetCommand, StatusCommand, ToggleCommand,
    },
    CommandHandler,
};
use deskforge::cli::{Cli, Commands, Workspace};
use tracing_subscriber::EnvFilter;

fn initialize_tracing(verbose: u8) {
    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        EnvFilter::new(format!("deskforge={level}"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr) // stdout is reserved for command output
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_tracing(cli.verbose);

    let workspace = Workspace::open(cli.config.as_deref(), cli.store.as_deref())?;

    let handler: Box<dyn CommandHandler + '_> = match &cli.command {
        Commands::Status { id, deep, format } => {
            Box::new(StatusCommand::new(id.clone(), *deep, *format))
        }
        Commands::Toggle { id } => Box::new(ToggleCommand::new(id.clone())),
        Commands::SelectAll { scope } => Box::new(BulkCommand::select_all(scope.clone())),
        Commands::ClearAll { scope } => Box::new(BulkCommand::clear_all(scope.clone())),
        Commands::Set { id, value } => Box::new(SetCommand::new(id.clone(), value.clone())),
        Commands::Options { id } => Box::new(OptionsCommand::new(id.clone())),
        Commands::Selected => Box::new(SelectedCommand),
        Commands::Save { name, message } => {
            Box::new(SaveCommand::new(name.clone(), message.clone()))
        }
        Commands::Load {
            name,
            backup,
            apply,
        } => Box::new(LoadCommand::new(name.clone(), *backup, *apply)),
        Commands::List { format } => Box::new(ListCommand::new(*format)),
        Commands::History { limit, format } => Box::new(HistoryCommand::new(*limit, *format)),
        Commands::Diff { from, to } => Box::new(DiffCommand::new(from.clone(), to.clone())),
        Commands::Restore { revision } => Box::new(RestoreCommand::new(revision.clone())),
        Commands::Branch { action } => Box::new(BranchCommand::new(action)),
        Commands::Remote { action } => Box::new(RemoteCommand::new(action)),
        Commands::Push { remote, branch } => {
            Box::new(SyncCommand::push(remote.clone(), branch.clone()))
        }
        Commands::Pull { remote, branch } => {
            Box::new(SyncCommand::pull(remote.clone(), branch.clone()))
        }
    };

    tracing::debug!(
        command = handler.name(),
        modifies_store = cli.command.modifies_store(),
        "Running command"
    );
    handler.execute(&workspace)
}
