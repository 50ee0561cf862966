use super::backend::{BranchInfo, BranchOp, HistoryBackend, HistoryEntry};
use super::diff::unified_diff;
use crate::catalog::PRESETS;
use crate::config::DEFAULT_REMOTE;
use crate::io::paths::{PathUtils, StoreLayout};
use crate::profile::Profile;
use crate::{DeskforgeError, Result};
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Named slots in the store, by kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileListing {
    pub saved: Vec<String>,
    pub presets: Vec<String>,
    /// Newest first
    pub backups: Vec<String>,
}

/// Outcome of a save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReceipt {
    /// Where the current document was written
    pub current: PathBuf,
    /// Where the named slot was written, if any
    pub named: Option<PathBuf>,
    /// Whether the change reached history; the files are written either way
    pub committed: bool,
}

impl SaveReceipt {
    /// The most specific location written
    pub fn location(&self) -> &PathBuf {
        self.named.as_ref().unwrap_or(&self.current)
    }
}

/// History-tracked store of profile documents.
///
/// Routine operations (save's commit, restore, branch, remote sync) report
/// backend failures as `false` and log them; reads of missing profiles and
/// revisions fail with NotFound.
pub struct ProfileStore<B: HistoryBackend> {
    layout: StoreLayout,
    backend: B,
}

impl<B: HistoryBackend> ProfileStore<B> {
    /// Open a store, creating the layout, presets and history on first use
    pub fn open(layout: StoreLayout, backend: B) -> Result<Self> {
        layout.ensure_directories()?;
        let store = Self { layout, backend };
        store.seed_presets()?;

        if !store.backend.is_initialized() {
            info!("Initializing profile history in {}", store.layout.base.display());
            store.backend.init()?;
            // An empty current document makes the first revision readable
            let current = store.layout.current();
            if !current.exists() {
                fs::write(&current, "")?;
            }
            store.backend.add()?;
            store.backend.commit("Initialize profile store")?;
        }

        Ok(store)
    }

    fn seed_presets(&self) -> Result<()> {
        for preset in PRESETS {
            let path = self.layout.template(preset.name);
            if !path.exists() {
                debug!("Writing preset {}", path.display());
                fs::write(&path, Profile::from_preset(preset).to_yaml()?)?;
            }
        }
        Ok(())
    }

    pub fn layout(&self) -> &StoreLayout {
        &self.layout
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Write `profile` as the current document (and as `name` if given) and
    /// commit the change. The previous current document is copied to a
    /// backup slot first.
    pub fn save(
        &self,
        profile: &Profile,
        name: Option<&str>,
        message: Option<&str>,
    ) -> Result<SaveReceipt> {
        if let Some(name) = name {
            PathUtils::check_name("profile", name)?;
        }

        let document = profile.clone().stamped().to_yaml()?;
        self.backup_current()?;

        let current = self.layout.current();
        fs::write(&current, &document)?;

        let named = match name {
            Some(name) => {
                let path = self.layout.saved(name);
                fs::write(&path, &document)?;
                Some(path)
            }
            None => None,
        };

        let message = match (message, name) {
            (Some(message), _) => message.to_string(),
            (None, Some(name)) => format!("Save profile '{name}'"),
            (None, None) => "Save current profile".to_string(),
        };
        let committed = self.commit_all(&message);
        info!("Saved profile to {} (committed: {})", current.display(), committed);

        Ok(SaveReceipt {
            current,
            named,
            committed,
        })
    }

    fn backup_current(&self) -> Result<Option<PathBuf>> {
        let current = self.layout.current();
        if !current.exists() || fs::read_to_string(&current)?.trim().is_empty() {
            return Ok(None);
        }

        let stamp = Utc::now().format("%Y%m%d_%H%M%S_%6f").to_string();
        let mut target = self.layout.backup(&stamp);
        let mut suffix = 1;
        while target.exists() {
            target = self.layout.backup(&format!("{stamp}_{suffix}"));
            suffix += 1;
        }

        fs::copy(&current, &target)?;
        debug!("Backed up current profile to {}", target.display());
        Ok(Some(target))
    }

    fn commit_all(&self, message: &str) -> bool {
        let result = self
            .backend
            .add()
            .and_then(|_| self.backend.commit(message));
        match result {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to commit '{}': {}", message, e);
                false
            }
        }
    }

    /// Load the current document, or a named one from saved slots then presets
    pub fn load(&self, name: Option<&str>) -> Result<Profile> {
        let Some(name) = name else {
            let current = self.layout.current();
            if !current.exists() {
                return Ok(Profile::default());
            }
            return Profile::from_yaml(&fs::read_to_string(current)?);
        };

        PathUtils::check_name("profile", name)?;
        for path in [self.layout.saved(name), self.layout.template(name)] {
            if path.exists() {
                return Profile::from_yaml(&fs::read_to_string(path)?);
            }
        }

        Err(DeskforgeError::not_found(format!("profile '{name}'")))
    }

    /// Load a backup slot by name as listed in [`ProfileListing::backups`]
    pub fn load_backup(&self, name: &str) -> Result<Profile> {
        PathUtils::check_name("backup", name)?;
        let path = self
            .layout
            .backups_dir()
            .join(format!("{name}.{}", crate::io::paths::PROFILE_EXTENSION));
        if !path.exists() {
            return Err(DeskforgeError::not_found(format!("backup '{name}'")));
        }
        Profile::from_yaml(&fs::read_to_string(path)?)
    }

    pub fn list(&self) -> Result<ProfileListing> {
        let mut backups = PathUtils::profile_stems(&self.layout.backups_dir())?;
        backups.reverse();

        Ok(ProfileListing {
            saved: PathUtils::profile_stems(&self.layout.saved_dir())?,
            presets: PathUtils::profile_stems(&self.layout.templates_dir())?,
            backups,
        })
    }

    /// Up to `limit` most recent revisions, newest first
    pub fn history(&self, limit: usize) -> Vec<HistoryEntry> {
        match self.backend.log(limit) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Failed to read history: {}", e);
                Vec::new()
            }
        }
    }

    /// Current document as stored at `revision`
    pub fn profile_at(&self, revision: &str) -> Result<Profile> {
        check_revision(revision)?;
        let contents = self
            .backend
            .show(revision, &StoreLayout::current_relative())
            .map_err(|e| DeskforgeError::not_found(format!("revision '{revision}': {e}")))?;
        Profile::from_yaml(&contents)
    }

    /// Unified diff between the current document at two revisions.
    /// `from` of `None` means the working copy. Both sides are normalized
    /// first, so key order never shows up as a change.
    pub fn diff(&self, from: Option<&str>, to: &str) -> Result<String> {
        let (old, old_label) = match from {
            Some(revision) => (self.profile_at(revision)?, revision.to_string()),
            None => (self.load(None)?, "current".to_string()),
        };
        let new = self.profile_at(to)?;

        Ok(unified_diff(
            &old.canonical()?,
            &new.canonical()?,
            &old_label,
            to,
        ))
    }

    /// Replace the current document with its content at `revision`.
    ///
    /// The present state is saved first so the restore can itself be undone.
    /// History is never rewritten.
    pub fn restore_from(&self, revision: &str) -> bool {
        if let Err(e) = self.profile_at(revision) {
            warn!("Cannot restore from {}: {}", revision, e);
            return false;
        }

        let snapshot = match self.load(None) {
            Ok(profile) => profile,
            Err(e) => {
                warn!("Cannot read current profile before restore: {}", e);
                return false;
            }
        };

        let message = format!("Backup before restoring {revision}");
        match self.save(&snapshot, None, Some(&message)) {
            Ok(receipt) if receipt.committed => {}
            Ok(_) => {
                warn!("Pre-restore backup was not committed; aborting restore");
                return false;
            }
            Err(e) => {
                warn!("Pre-restore backup failed: {}", e);
                return false;
            }
        }

        if let Err(e) = self
            .backend
            .checkout(revision, &StoreLayout::current_relative())
        {
            warn!("Failed to restore {}: {}", revision, e);
            return false;
        }

        let restored = self.commit_all(&format!("Restore profile from {revision}"));
        if restored {
            info!("Restored current profile from {}", revision);
        }
        restored
    }

    /// Create a branch at the current revision
    pub fn branch(&self, name: &str) -> bool {
        self.branch_op(name, BranchOp::Create(name))
    }

    /// Make `name` the branch later saves and restores act on
    pub fn switch_branch(&self, name: &str) -> bool {
        let switched = self.branch_op(name, BranchOp::Switch(name));
        if switched {
            info!("Switched to branch {}", name);
        }
        switched
    }

    fn branch_op(&self, name: &str, op: BranchOp<'_>) -> bool {
        if let Err(e) = PathUtils::check_name("branch", name) {
            warn!("{}", e);
            return false;
        }
        match self.backend.branch(op) {
            Ok(_) => true,
            Err(e) => {
                warn!("Branch operation {:?} failed: {}", op, e);
                false
            }
        }
    }

    pub fn list_branches(&self) -> Vec<BranchInfo> {
        match self.backend.branch(BranchOp::List) {
            Ok(branches) => branches,
            Err(e) => {
                warn!("Failed to list branches: {}", e);
                Vec::new()
            }
        }
    }

    pub fn current_branch(&self) -> Option<String> {
        self.list_branches()
            .into_iter()
            .find(|b| b.current)
            .map(|b| b.name)
    }

    /// Register `url` as the default remote
    pub fn add_remote(&self, url: &str) -> bool {
        self.add_named_remote(DEFAULT_REMOTE, url)
    }

    pub fn add_named_remote(&self, name: &str, url: &str) -> bool {
        if let Err(e) = PathUtils::check_name("remote", name) {
            warn!("{}", e);
            return false;
        }
        match self.backend.remote_add(name, url) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to add remote {}: {}", name, e);
                false
            }
        }
    }

    /// Push the branch's full history. A failure leaves local history as is.
    pub fn push(&self, remote: &str, branch: Option<&str>) -> bool {
        self.sync("push", remote, branch, |r, b| self.backend.push(r, b))
    }

    pub fn pull(&self, remote: &str, branch: Option<&str>) -> bool {
        self.sync("pull", remote, branch, |r, b| self.backend.pull(r, b))
    }

    fn sync<F>(&self, what: &str, remote: &str, branch: Option<&str>, op: F) -> bool
    where
        F: FnOnce(&str, &str) -> Result<()>,
    {
        let branch = match branch {
            Some(branch) => branch.to_string(),
            None => match self.current_branch() {
                Some(branch) => branch,
                None => {
                    warn!("Cannot {} without a current branch", what);
                    return false;
                }
            },
        };

        match op(remote, &branch) {
            Ok(()) => {
                info!("{} {} {} succeeded", what, remote, branch);
                true
            }
            Err(e) => {
                warn!("{} {} {} failed: {}", what, remote, branch, e);
                false
            }
        }
    }
}

/// Revisions are handed to the backend as positional arguments
fn check_revision(revision: &str) -> Result<()> {
    if revision.trim().is_empty() || revision.starts_with('-') {
        return Err(DeskforgeError::invalid(format!(
            "'{revision}' is not a revision"
        )));
    }
    Ok(())
}
