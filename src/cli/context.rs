use crate::catalog::{builtin_catalog, Catalog, CatalogLoader};
use crate::config::{Settings, SettingsLoader};
use crate::engine::SelectionTree;
use crate::io::paths::{DeskforgePaths, StoreLayout};
use crate::profile::Profile;
use crate::store::{GitBackend, ProfileStore, SaveReceipt};
use anyhow::{bail, Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Everything a command needs: settings, catalog and an open store
pub struct Workspace {
    pub settings: Settings,
    pub catalog: Arc<Catalog>,
    pub store: ProfileStore<GitBackend>,
}

impl Workspace {
    /// Resolve settings and paths, then open the catalog and the store
    pub fn open(config: Option<&Path>, store_dir: Option<&Path>) -> Result<Self> {
        let paths = DeskforgePaths::new()?;

        let settings = match config {
            Some(path) => SettingsLoader::load_file(path)?,
            None => SettingsLoader::load_or_default(paths.settings_file())?,
        };

        let catalog = match &settings.catalog {
            Some(path) => CatalogLoader::load_file(path)?,
            None => builtin_catalog()?,
        };

        let base = store_dir
            .map(Path::to_path_buf)
            .or_else(|| settings.store_dir.clone())
            .unwrap_or_else(|| paths.default_store_dir());
        debug!("Using profile store at {}", base.display());

        let backend = GitBackend::from_settings(&base, &settings)?;
        let store = ProfileStore::open(StoreLayout::new(&base), backend)
            .with_context(|| format!("Failed to open profile store at {}", base.display()))?;

        Ok(Self {
            settings,
            catalog: Arc::new(catalog),
            store,
        })
    }

    /// A tree holding the current profile
    pub fn current_tree(&self) -> Result<SelectionTree> {
        let profile = self.store.load(None)?;
        let mut tree = SelectionTree::new(Arc::clone(&self.catalog));
        if profile != Profile::default() {
            let report = tree.apply_profile(&profile);
            if !report.is_clean() {
                warn!(
                    "Current profile has {} unknown items and {} rejected values",
                    report.skipped_items.len(),
                    report.rejected_values.len()
                );
            }
        }
        Ok(tree)
    }

    /// Save the tree as the current profile
    pub fn commit_tree(&self, tree: &SelectionTree, message: &str) -> Result<SaveReceipt> {
        let receipt = self.store.save(&Profile::capture(tree), None, Some(message))?;
        if !receipt.committed {
            warn!("Profile written to {} but not committed", receipt.current.display());
        }
        Ok(receipt)
    }

    /// Remote to use when the caller gave none
    pub fn remote_or_default<'a>(&'a self, remote: Option<&'a str>) -> &'a str {
        remote.unwrap_or(&self.settings.default_remote)
    }
}

/// Fail the command when a routine store operation reported failure
pub fn ensure(ok: bool, what: &str) -> Result<()> {
    if !ok {
        bail!("{what} failed (run with -v for details)");
    }
    Ok(())
}
