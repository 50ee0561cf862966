use super::registry::Catalog;
use super::types::NodeDef;
use crate::{DeskforgeError, Result};
use std::path::Path;
use tracing::debug;

/// Loads a catalog from a nested YAML definition
pub struct CatalogLoader;

impl CatalogLoader {
    /// Parse and validate a catalog from YAML text
    pub fn from_yaml(contents: &str) -> Result<Catalog> {
        let def: NodeDef = serde_yaml_ng::from_str(contents)
            .map_err(|e| DeskforgeError::Catalog(format!("Failed to parse catalog: {e}")))?;
        Catalog::from_def(def)
    }

    /// Load a catalog file
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Catalog> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            DeskforgeError::Config(format!(
                "Failed to read catalog file {}: {}",
                path.display(),
                e
            ))
        })?;

        let catalog = Self::from_yaml(&contents)?;
        debug!(
            "Loaded catalog with {} nodes from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }
}
