//! Profile documents: persistable snapshots of a selection tree.
//!
//! A profile lists the selected leaves and the stored configurable values.
//! The on-disk form is YAML:
//!
//! ```yaml
//! selected_items:
//!   - zram
//!   - firefox
//! configurable_items:
//!   swappiness:
//!     id: swappiness
//!     value: 10
//! metadata:
//!   version: "1.0"
//!   created_at: 2026-01-01T00:00:00Z
//! ```

mod snapshot;

pub use snapshot::ApplyReport;

use crate::catalog::{ConfigValue, Preset};
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Document schema version written into metadata
pub const SCHEMA_VERSION: &str = "1.0";

/// One stored configurable value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurableEntry {
    pub id: String,
    pub value: ConfigValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileMetadata {
    pub version: String,
    pub created_at: DateTime<Utc>,
}

impl ProfileMetadata {
    pub fn now() -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            created_at: Utc::now(),
        }
    }
}

/// A saved configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub selected_items: Vec<String>,
    #[serde(default)]
    pub configurable_items: BTreeMap<String, ConfigurableEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ProfileMetadata>,
}

impl Profile {
    /// Build a profile from a built-in preset
    pub fn from_preset(preset: &Preset) -> Self {
        let configurable_items = preset
            .values
            .iter()
            .map(|(id, raw)| {
                (
                    id.to_string(),
                    ConfigurableEntry {
                        id: id.to_string(),
                        value: ConfigValue::parse(raw),
                    },
                )
            })
            .collect();

        Self {
            selected_items: preset.items.iter().map(|s| s.to_string()).collect(),
            configurable_items,
            metadata: None,
        }
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(contents)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Fill in metadata if the document has none yet
    pub fn stamped(mut self) -> Self {
        if self.metadata.is_none() {
            self.metadata = Some(ProfileMetadata::now());
        }
        self
    }

    /// Selected ids as a set, ignoring order and duplicates
    pub fn selected_set(&self) -> BTreeSet<String> {
        self.selected_items.iter().cloned().collect()
    }

    pub fn value_of(&self, id: &str) -> Option<&ConfigValue> {
        self.configurable_items.get(id).map(|e| &e.value)
    }

    /// Normalized text used for comparisons: selected ids sorted and
    /// deduplicated, configurable keys sorted, fields in a fixed order.
    /// Metadata is left out so two saves of the same content compare equal.
    pub fn canonical(&self) -> Result<String> {
        let normalized = Profile {
            selected_items: self.selected_set().into_iter().collect(),
            configurable_items: self.configurable_items.clone(),
            metadata: None,
        };
        normalized.to_yaml()
    }
}
