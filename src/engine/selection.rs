use super::resolver;
use crate::catalog::{Catalog, CatalogNode, ConfigValue, ConfigurableKind};
use crate::{DeskforgeError, Result};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use tracing::trace;

/// Aggregate state of a category's selectable children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryStatus {
    None,
    All,
    Partial,
}

/// Result of a status query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    Selected,
    Unselected,
    Category(CategoryStatus),
}

impl NodeStatus {
    fn from_counts(selected: usize, total: usize) -> Self {
        let status = if selected == 0 {
            CategoryStatus::None
        } else if selected == total {
            CategoryStatus::All
        } else {
            CategoryStatus::Partial
        };
        NodeStatus::Category(status)
    }
}

/// Leaves that bulk operations and category status act on
fn is_selectable(node: &CatalogNode) -> bool {
    node.is_leaf() && !node.is_configurable()
}

/// Selection and configuration state over one catalog.
///
/// Each leaf's flag is authoritative; `selected` is an index over those flags
/// and is updated in the same step as every flag change. Categories hold no
/// state and are always derived from their children.
#[derive(Debug, Clone)]
pub struct SelectionTree {
    catalog: Arc<Catalog>,
    flags: HashMap<String, bool>,
    selected: BTreeSet<String>,
    values: BTreeMap<String, ConfigValue>,
}

impl SelectionTree {
    /// Create a tree with every leaf at its catalog default
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let mut tree = Self {
            catalog,
            flags: HashMap::new(),
            selected: BTreeSet::new(),
            values: BTreeMap::new(),
        };
        tree.reset();
        tree
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Return every leaf and configurable value to its catalog default
    pub fn reset(&mut self) {
        self.flags.clear();
        self.selected.clear();
        self.values.clear();

        let catalog = Arc::clone(&self.catalog);
        for leaf in catalog.leaves() {
            self.set_flag(&leaf.id, leaf.default_selected);
            if let Some(configurable) = &leaf.configurable {
                self.values
                    .insert(leaf.id.clone(), configurable.default.clone());
            }
        }
    }

    /// Deselect every leaf, leaving configured values alone
    pub fn clear_selection(&mut self) {
        for flag in self.flags.values_mut() {
            *flag = false;
        }
        self.selected.clear();
    }

    fn set_flag(&mut self, id: &str, on: bool) {
        self.flags.insert(id.to_string(), on);
        if on {
            self.selected.insert(id.to_string());
        } else {
            self.selected.remove(id);
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.flags.get(id).copied().unwrap_or(false)
    }

    /// Flip one leaf. Returns the new flag.
    pub fn toggle_leaf(&mut self, id: &str) -> Result<bool> {
        self.catalog.leaf(id)?;
        let next = !self.is_selected(id);
        self.set_flag(id, next);
        trace!(leaf = id, selected = next, "toggled leaf");
        Ok(next)
    }

    /// Bulk toggle over the category's direct selectable leaves.
    ///
    /// All selected ⇒ clear all; anything else (none or partial) ⇒ select all.
    /// Nested categories are not descended into.
    pub fn toggle_category(&mut self, id: &str) -> Result<NodeStatus> {
        let catalog = Arc::clone(&self.catalog);
        let category = catalog.category(id)?;
        let leaves: Vec<&CatalogNode> = catalog
            .children(&category.id)
            .filter(|c| is_selectable(c))
            .collect();

        let all_selected = leaves.iter().all(|leaf| self.is_selected(&leaf.id));
        for leaf in &leaves {
            self.set_flag(&leaf.id, !all_selected);
        }
        trace!(category = id, selected = !all_selected, "toggled category");

        self.status_of(id)
    }

    /// Select every direct, non-configurable leaf of `scope`
    pub fn select_all(&mut self, scope: &str) -> Result<usize> {
        self.force_scope(scope, true)
    }

    /// Clear every direct, non-configurable leaf of `scope`
    pub fn clear_all(&mut self, scope: &str) -> Result<usize> {
        self.force_scope(scope, false)
    }

    fn force_scope(&mut self, scope: &str, on: bool) -> Result<usize> {
        let catalog = Arc::clone(&self.catalog);
        let category = catalog.category(scope)?;

        let mut changed = 0;
        for child in catalog.children(&category.id).filter(|c| is_selectable(c)) {
            if self.is_selected(&child.id) != on {
                changed += 1;
            }
            self.set_flag(&child.id, on);
        }
        trace!(scope, selected = on, changed, "forced scope");
        Ok(changed)
    }

    /// Validate and store a configurable value.
    ///
    /// Sliders check the declared range. Dropdowns check the options that are
    /// legal for the current selection. On failure nothing changes.
    pub fn set_configured_value(&mut self, id: &str, value: ConfigValue) -> Result<()> {
        let node = self.catalog.get(id)?;
        let configurable = node
            .configurable
            .as_ref()
            .ok_or_else(|| DeskforgeError::not_found(format!("configurable '{id}'")))?;

        configurable.check_declared(id, &value)?;
        if let (ConfigurableKind::Dropdown { .. }, ConfigValue::Key(key)) = (&configurable.kind, &value) {
            if !resolver::is_available(&self.catalog, id, key, &self.selected)? {
                return Err(DeskforgeError::invalid(format!(
                    "{id}: '{key}' is not available with the current selection"
                )));
            }
        }

        trace!(configurable = id, %value, "set value");
        self.values.insert(id.to_string(), value);
        Ok(())
    }

    /// Store a previously saved value, checking only the declared range or
    /// option keys. A saved dropdown key whose dependency is not selected is
    /// kept as a stale value.
    pub(crate) fn restore_value(&mut self, id: &str, value: ConfigValue) -> Result<()> {
        let node = self.catalog.get(id)?;
        let configurable = node
            .configurable
            .as_ref()
            .ok_or_else(|| DeskforgeError::not_found(format!("configurable '{id}'")))?;

        configurable.check_declared(id, &value)?;
        self.values.insert(id.to_string(), value);
        Ok(())
    }

    /// Stored value, as last written
    pub fn configured_value(&self, id: &str) -> Option<&ConfigValue> {
        self.values.get(id)
    }

    /// Stored value if still legal, otherwise the catalog default.
    ///
    /// A dropdown value can become orphaned when the leaf its option depends
    /// on is deselected. The stored value is kept so it comes back when the
    /// leaf is reselected; readers get the default meanwhile.
    pub fn effective_value(&self, id: &str) -> Result<ConfigValue> {
        let node = self.catalog.get(id)?;
        let configurable = node
            .configurable
            .as_ref()
            .ok_or_else(|| DeskforgeError::not_found(format!("configurable '{id}'")))?;

        match self.values.get(id) {
            Some(value) if self.is_legal(id, value)? => Ok(value.clone()),
            _ => Ok(configurable.default.clone()),
        }
    }

    /// Stored values that are no longer legal for the current selection
    pub fn stale_values(&self) -> Vec<(String, ConfigValue)> {
        self.values
            .iter()
            .filter(|(id, value)| !self.is_legal(id, value).unwrap_or(false))
            .map(|(id, value)| (id.clone(), value.clone()))
            .collect()
    }

    fn is_legal(&self, id: &str, value: &ConfigValue) -> Result<bool> {
        let node = self.catalog.get(id)?;
        let Some(configurable) = &node.configurable else {
            return Ok(false);
        };
        if configurable.check_declared(id, value).is_err() {
            return Ok(false);
        }
        match (&configurable.kind, value) {
            (ConfigurableKind::Dropdown { .. }, ConfigValue::Key(key)) => {
                resolver::is_available(&self.catalog, id, key, &self.selected)
            }
            _ => Ok(true),
        }
    }

    /// Currently legal options of a dropdown
    pub fn options_for(&self, id: &str) -> Result<Vec<(String, String)>> {
        resolver::resolve(&self.catalog, id, &self.selected)
    }

    /// Leaf ⇒ selected/unselected; category ⇒ status over its direct
    /// selectable leaves. Configurables carry a value, not a selection, and
    /// are not counted.
    pub fn status_of(&self, id: &str) -> Result<NodeStatus> {
        let node = self.catalog.get(id)?;
        if node.is_leaf() {
            return Ok(if self.is_selected(id) {
                NodeStatus::Selected
            } else {
                NodeStatus::Unselected
            });
        }

        let (selected, total) = self
            .catalog
            .children(id)
            .filter(|c| is_selectable(c))
            .fold((0, 0), |(s, t), c| (s + usize::from(self.is_selected(&c.id)), t + 1));

        Ok(NodeStatus::from_counts(selected, total))
    }

    /// Like [`status_of`](Self::status_of) but counts leaves at any depth
    pub fn aggregate_status(&self, id: &str) -> Result<NodeStatus> {
        let node = self.catalog.get(id)?;
        if node.is_leaf() {
            return self.status_of(id);
        }

        let leaves: Vec<&CatalogNode> = self
            .catalog
            .leaf_descendants(id)
            .into_iter()
            .filter(|l| is_selectable(l))
            .collect();
        let selected = leaves.iter().filter(|l| self.is_selected(&l.id)).count();
        Ok(NodeStatus::from_counts(selected, leaves.len()))
    }

    /// Selected leaf ids in catalog order, as handed to the installer
    pub fn selected_items(&self) -> Vec<String> {
        self.catalog
            .leaves()
            .filter(|leaf| self.is_selected(&leaf.id))
            .map(|leaf| leaf.id.clone())
            .collect()
    }

    /// The materialized selected set
    pub fn selection(&self) -> &BTreeSet<String> {
        &self.selected
    }

    /// All stored configurable values
    pub fn values(&self) -> &BTreeMap<String, ConfigValue> {
        &self.values
    }
}
