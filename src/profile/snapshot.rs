use super::{ConfigurableEntry, Profile, ProfileMetadata};
use crate::engine::SelectionTree;
use tracing::warn;

/// Entries of a profile that could not be applied to a tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Selected ids that are unknown or not leaves
    pub skipped_items: Vec<String>,
    /// Configurable ids whose value was rejected, with the reason
    pub rejected_values: Vec<(String, String)>,
}

impl ApplyReport {
    pub fn is_clean(&self) -> bool {
        self.skipped_items.is_empty() && self.rejected_values.is_empty()
    }
}

impl Profile {
    /// Snapshot the tree's current state
    pub fn capture(tree: &SelectionTree) -> Self {
        let configurable_items = tree
            .values()
            .iter()
            .map(|(id, value)| {
                (
                    id.clone(),
                    ConfigurableEntry {
                        id: id.clone(),
                        value: value.clone(),
                    },
                )
            })
            .collect();

        Self {
            selected_items: tree.selected_items(),
            configurable_items,
            metadata: Some(ProfileMetadata::now()),
        }
    }
}

impl SelectionTree {
    /// Replace the tree's state with the profile's.
    ///
    /// Starts from catalog defaults with nothing selected, selects the listed
    /// leaves, then writes values checked against their declared range or
    /// options. A dropdown key whose dependency is not selected is kept as a
    /// stale value, as it was when captured. Entries that do not fit the
    /// catalog are skipped and reported.
    pub fn apply_profile(&mut self, profile: &Profile) -> ApplyReport {
        let mut report = ApplyReport::default();

        self.reset();
        self.clear_selection();

        for id in &profile.selected_items {
            if self.is_selected(id) {
                continue;
            }
            if let Err(e) = self.toggle_leaf(id) {
                warn!("Skipping selected item '{}': {}", id, e);
                report.skipped_items.push(id.clone());
            }
        }

        for (id, entry) in &profile.configurable_items {
            if let Err(e) = self.restore_value(id, entry.value.clone()) {
                warn!("Skipping value for '{}': {}", id, e);
                report.rejected_values.push((id.clone(), e.to_string()));
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{builtin_catalog, ConfigValue};
    use std::sync::Arc;

    #[test]
    fn test_capture_then_apply_restores_state() {
        let catalog = Arc::new(builtin_catalog().unwrap());
        let mut tree = SelectionTree::new(Arc::clone(&catalog));
        tree.toggle_leaf("nf-jetbrains").unwrap();
        tree.toggle_leaf("firefox").unwrap();
        tree.set_configured_value("font-monospace", ConfigValue::Key("jetbrains-mono-nerd".into()))
            .unwrap();
        tree.set_configured_value("swappiness", ConfigValue::Number(60))
            .unwrap();

        let profile = Profile::capture(&tree);

        let mut other = SelectionTree::new(catalog);
        let report = other.apply_profile(&profile);
        assert!(report.is_clean());
        assert_eq!(other.selection(), tree.selection());
        assert_eq!(other.values(), tree.values());
    }

    #[test]
    fn test_unknown_entries_are_reported() {
        let catalog = Arc::new(builtin_catalog().unwrap());
        let mut tree = SelectionTree::new(catalog);

        let mut profile = Profile {
            selected_items: vec!["noto".into(), "retired-package".into(), "fonts".into()],
            ..Profile::default()
        };
        profile.configurable_items.insert(
            "swappiness".into(),
            ConfigurableEntry {
                id: "swappiness".into(),
                value: ConfigValue::Number(500),
            },
        );

        let report = tree.apply_profile(&profile);
        assert_eq!(report.skipped_items, vec!["retired-package".to_string(), "fonts".to_string()]);
        assert_eq!(report.rejected_values.len(), 1);
        assert_eq!(tree.selected_items(), vec!["noto".to_string()]);
        assert_eq!(tree.configured_value("swappiness"), Some(&ConfigValue::Number(10)));
    }

    #[test]
    fn test_orphaned_value_survives_capture_and_apply() {
        let catalog = Arc::new(builtin_catalog().unwrap());
        let nerd = ConfigValue::Key("jetbrains-mono-nerd".into());

        let mut tree = SelectionTree::new(Arc::clone(&catalog));
        tree.toggle_leaf("nf-jetbrains").unwrap();
        tree.set_configured_value("font-monospace", nerd.clone())
            .unwrap();
        tree.toggle_leaf("nf-jetbrains").unwrap();

        let mut restored = SelectionTree::new(catalog);
        let report = restored.apply_profile(&Profile::capture(&tree));
        assert!(report.is_clean(), "{report:?}");
        assert_eq!(restored.configured_value("font-monospace"), Some(&nerd));
        assert_eq!(
            restored.effective_value("font-monospace").unwrap(),
            ConfigValue::Key("dejavu-sans-mono".into())
        );

        restored.toggle_leaf("nf-jetbrains").unwrap();
        assert_eq!(restored.effective_value("font-monospace").unwrap(), nerd);
    }

    #[test]
    fn test_undeclared_dropdown_key_is_rejected() {
        let catalog = Arc::new(builtin_catalog().unwrap());
        let mut tree = SelectionTree::new(catalog);
        let mut profile = Profile::default();
        profile.configurable_items.insert(
            "font-monospace".into(),
            ConfigurableEntry {
                id: "font-monospace".into(),
                value: ConfigValue::Key("comic-sans".into()),
            },
        );

        let report = tree.apply_profile(&profile);
        assert_eq!(report.rejected_values.len(), 1);
        assert_eq!(
            tree.effective_value("font-monospace").unwrap(),
            ConfigValue::Key("dejavu-sans-mono".into())
        );
    }
}
