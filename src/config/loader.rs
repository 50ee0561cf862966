use super::types::Settings;
use crate::io::paths::PathUtils;
use crate::{DeskforgeError, Result};
use std::path::Path;
use tracing::debug;

/// Loads and validates `deskforge.yaml`
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load settings from an explicit path; the file must exist
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Settings> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            DeskforgeError::Config(format!(
                "Failed to read settings file {}: {}",
                path.display(),
                e
            ))
        })?;

        let settings = Self::from_yaml(&contents).map_err(|e| {
            DeskforgeError::Config(format!("{}: {}", path.display(), e))
        })?;
        debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings from the default location, falling back to defaults
    /// when the file does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Settings> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No settings file at {}, using defaults", path.display());
            return Ok(Settings::default());
        }
        Self::load_file(path)
    }

    /// Parse and validate settings from YAML text
    pub fn from_yaml(contents: &str) -> Result<Settings> {
        let settings: Settings = if contents.trim().is_empty() {
            Settings::default()
        } else {
            serde_yaml_ng::from_str(contents)
                .map_err(|e| DeskforgeError::Config(format!("Failed to parse settings: {e}")))?
        };

        Self::validate(&settings)?;
        Ok(settings)
    }

    fn validate(settings: &Settings) -> Result<()> {
        if settings.git_command.trim().is_empty() {
            return Err(DeskforgeError::Config("git_command must not be empty".to_string()));
        }
        if !PathUtils::is_valid_name(&settings.default_remote) {
            return Err(DeskforgeError::Config(format!(
                "Invalid default_remote '{}'",
                settings.default_remote
            )));
        }
        if settings.author_email.trim().is_empty() || settings.author_name.trim().is_empty() {
            return Err(DeskforgeError::Config(
                "author_name and author_email must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_partial_settings_keep_defaults() {
        let settings = SettingsLoader::from_yaml("store_dir: /srv/profiles\n").unwrap();
        assert_eq!(settings.store_dir, Some(PathBuf::from("/srv/profiles")));
        assert_eq!(settings.git_command, "git");
        assert_eq!(settings.default_remote, "origin");
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = SettingsLoader::from_yaml("colour: blue\n").unwrap_err();
        assert!(matches!(err, DeskforgeError::Config(_)));
    }

    #[test]
    fn test_invalid_remote_rejected() {
        assert!(SettingsLoader::from_yaml("default_remote: ../up\n").is_err());
    }

    #[test]
    fn test_missing_default_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let settings = SettingsLoader::load_or_default(dir.path().join("deskforge.yaml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_explicit_file_must_exist() {
        let dir = tempdir().unwrap();
        assert!(SettingsLoader::load_file(dir.path().join("missing.yaml")).is_err());
    }

    #[test]
    fn test_load_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deskforge.yaml");
        std::fs::write(&path, "author_name: Sam\nauthor_email: sam@example.com\n").unwrap();

        let settings = SettingsLoader::load_file(&path).unwrap();
        assert_eq!(settings.author_name, "Sam");
        assert_eq!(settings.author_email, "sam@example.com");
    }
}
