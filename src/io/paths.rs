use crate::{DeskforgeError, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

/// File extension of every profile document
pub const PROFILE_EXTENSION: &str = "yaml";

/// Platform locations for deskforge files
#[derive(Debug, Clone)]
pub struct DeskforgePaths {
    /// Configuration directory (holds deskforge.yaml)
    pub config_dir: PathBuf,
    /// Data directory (holds the default profile store)
    pub data_dir: PathBuf,
}

impl DeskforgePaths {
    /// Create new paths instance using standard directories
    pub fn new() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "deskforge").ok_or_else(|| {
            DeskforgeError::Path("Failed to determine project directories".to_string())
        })?;

        Ok(Self {
            config_dir: dirs.config_dir().to_path_buf(),
            data_dir: dirs.data_dir().to_path_buf(),
        })
    }

    /// Settings file path
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("deskforge.yaml")
    }

    /// Default profile store directory
    pub fn default_store_dir(&self) -> PathBuf {
        self.data_dir.join("profiles")
    }
}

/// Layout of a profile store directory.
///
/// ```text
/// <base>/
///   current.yaml
///   saved/<name>.yaml
///   templates/<name>.yaml
///   backups/backup_<timestamp>.yaml
///   .git/
/// ```
#[derive(Debug, Clone)]
pub struct StoreLayout {
    pub base: PathBuf,
}

impl StoreLayout {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Path of the current document, relative to the base
    pub fn current_relative() -> PathBuf {
        PathBuf::from(format!("current.{PROFILE_EXTENSION}"))
    }

    pub fn current(&self) -> PathBuf {
        self.base.join(Self::current_relative())
    }

    pub fn saved_dir(&self) -> PathBuf {
        self.base.join("saved")
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.base.join("templates")
    }

    pub fn backups_dir(&self) -> PathBuf {
        self.base.join("backups")
    }

    pub fn saved(&self, name: &str) -> PathBuf {
        self.saved_dir().join(format!("{name}.{PROFILE_EXTENSION}"))
    }

    pub fn template(&self, name: &str) -> PathBuf {
        self.templates_dir().join(format!("{name}.{PROFILE_EXTENSION}"))
    }

    pub fn backup(&self, stamp: &str) -> PathBuf {
        self.backups_dir()
            .join(format!("backup_{stamp}.{PROFILE_EXTENSION}"))
    }

    /// Ensure all directories exist
    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.base)?;
        std::fs::create_dir_all(self.saved_dir())?;
        std::fs::create_dir_all(self.templates_dir())?;
        std::fs::create_dir_all(self.backups_dir())?;
        Ok(())
    }
}

static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("name pattern is a valid regex")
});

/// Utilities for working with paths
pub struct PathUtils;

impl PathUtils {
    /// Whether `name` can be used as a profile, branch or remote name.
    /// Rejects separators, leading dots and anything else that could escape
    /// the store directory.
    pub fn is_valid_name(name: &str) -> bool {
        NAME_PATTERN.is_match(name) && !name.contains("..")
    }

    /// Fail with InvalidValue unless `name` is valid
    pub fn check_name(kind: &str, name: &str) -> Result<()> {
        if Self::is_valid_name(name) {
            Ok(())
        } else {
            Err(DeskforgeError::invalid(format!("invalid {kind} name '{name}'")))
        }
    }

    /// File stems of `*.yaml` files directly inside `dir`, sorted
    pub fn profile_stems(dir: &Path) -> Result<Vec<String>> {
        let mut stems = Vec::new();
        if !dir.exists() {
            return Ok(stems);
        }

        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some(PROFILE_EXTENSION) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    stems.push(stem.to_string());
                }
            }
        }

        stems.sort();
        Ok(stems)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_deskforge_paths_creation() {
        let paths = DeskforgePaths::new();
        assert!(paths.is_ok());

        let paths = paths.unwrap();
        assert!(paths.settings_file().ends_with("deskforge.yaml"));
        assert!(paths.default_store_dir().ends_with("profiles"));
    }

    #[test]
    fn test_store_layout() {
        let layout = StoreLayout::new("/tmp/store");
        assert_eq!(layout.current(), PathBuf::from("/tmp/store/current.yaml"));
        assert_eq!(layout.saved("work"), PathBuf::from("/tmp/store/saved/work.yaml"));
        assert_eq!(
            layout.backup("20260101_000000_000000"),
            PathBuf::from("/tmp/store/backups/backup_20260101_000000_000000.yaml")
        );
    }

    #[test]
    fn test_name_validation() {
        assert!(PathUtils::is_valid_name("work"));
        assert!(PathUtils::is_valid_name("laptop-2026.v1"));
        assert!(!PathUtils::is_valid_name(""));
        assert!(!PathUtils::is_valid_name(".hidden"));
        assert!(!PathUtils::is_valid_name("../etc/passwd"));
        assert!(!PathUtils::is_valid_name("a/b"));
        assert!(!PathUtils::is_valid_name("a..b"));
        assert!(PathUtils::check_name("profile", "with space").is_err());
    }

    #[test]
    fn test_profile_stems() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("b.yaml"), "").unwrap();
        std::fs::write(dir.path().join("a.yaml"), "").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();

        let stems = PathUtils::profile_stems(dir.path()).unwrap();
        assert_eq!(stems, vec!["a".to_string(), "b".to_string()]);
        assert!(PathUtils::profile_stems(&dir.path().join("missing")).unwrap().is_empty());
    }
}
