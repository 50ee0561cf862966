pub mod app;
pub mod commands;
pub mod context;

pub use app::{BranchAction, Cli, Commands, OutputFormat, RemoteAction};
pub use context::Workspace;
