use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Remote name used when none is given
pub const DEFAULT_REMOTE: &str = "origin";

/// User settings, read from `deskforge.yaml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Profile store directory; defaults to the platform data directory
    pub store_dir: Option<PathBuf>,

    /// Program (plus leading arguments) used for history commands
    pub git_command: String,

    /// Commit author name
    pub author_name: String,

    /// Commit author email
    pub author_email: String,

    /// Remote used by push/pull when none is given
    pub default_remote: String,

    /// Catalog file replacing the built-in catalog
    pub catalog: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_dir: None,
            git_command: "git".to_string(),
            author_name: "deskforge".to_string(),
            author_email: "deskforge@localhost".to_string(),
            default_remote: DEFAULT_REMOTE.to_string(),
            catalog: None,
        }
    }
}
