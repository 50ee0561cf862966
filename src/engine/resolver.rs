//! Derived option lists for dropdowns whose choices depend on other leaves.
//!
//! Results are computed from the selection passed in and never cached: the
//! legal set shrinks as soon as a dependency leaf is deselected.

use crate::catalog::{Catalog, ConfigurableKind};
use crate::{DeskforgeError, Result};
use std::collections::BTreeSet;

/// Legal `(key, display name)` pairs of a dropdown, in declared order
pub fn resolve(
    catalog: &Catalog,
    configurable_id: &str,
    selection: &BTreeSet<String>,
) -> Result<Vec<(String, String)>> {
    let node = catalog.get(configurable_id)?;
    let options = match node.configurable.as_ref().map(|c| &c.kind) {
        Some(ConfigurableKind::Dropdown { options }) => options,
        _ => {
            return Err(DeskforgeError::not_found(format!(
                "dropdown '{configurable_id}'"
            )))
        }
    };

    Ok(options
        .iter()
        .filter(|option| match &option.requires {
            Some(leaf) => selection.contains(leaf),
            None => true,
        })
        .map(|option| (option.key.clone(), option.label.clone()))
        .collect())
}

/// Whether `key` is currently a legal choice for the dropdown
pub fn is_available(
    catalog: &Catalog,
    configurable_id: &str,
    key: &str,
    selection: &BTreeSet<String>,
) -> Result<bool> {
    Ok(resolve(catalog, configurable_id, selection)?
        .iter()
        .any(|(k, _)| k == key))
}
