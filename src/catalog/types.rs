use crate::{DeskforgeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Current value of a configurable leaf
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// Slider position
    Number(i64),
    /// Dropdown option key
    Key(String),
}

impl ConfigValue {
    /// Parse user input: integers become numbers, everything else a key
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<i64>() {
            Ok(n) => ConfigValue::Number(n),
            Err(_) => ConfigValue::Key(raw.trim().to_string()),
        }
    }

    pub fn as_key(&self) -> Option<&str> {
        match self {
            ConfigValue::Number(_) => None,
            ConfigValue::Key(k) => Some(k),
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Number(n) => write!(f, "{n}"),
            ConfigValue::Key(k) => f.write_str(k),
        }
    }
}

/// One entry of a dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownOption {
    pub key: String,
    pub label: String,
    /// Leaf that must be selected for this option to be offered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires: Option<String>,
}

impl DropdownOption {
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            requires: None,
        }
    }

    pub fn requiring(key: &str, label: &str, leaf: &str) -> Self {
        Self {
            requires: Some(leaf.to_string()),
            ..Self::new(key, label)
        }
    }
}

/// Shape of a configurable leaf
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigurableKind {
    Slider {
        min: i64,
        max: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        unit: Option<String>,
    },
    Dropdown { options: Vec<DropdownOption> },
}

/// Configurable metadata attached to a leaf
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configurable {
    #[serde(flatten)]
    pub kind: ConfigurableKind,
    pub default: ConfigValue,
}

impl Configurable {
    pub fn slider(min: i64, max: i64, unit: Option<&str>, default: i64) -> Self {
        Self {
            kind: ConfigurableKind::Slider {
                min,
                max,
                unit: unit.map(str::to_string),
            },
            default: ConfigValue::Number(default),
        }
    }

    pub fn dropdown(options: Vec<DropdownOption>, default: &str) -> Self {
        Self {
            kind: ConfigurableKind::Dropdown { options },
            default: ConfigValue::Key(default.to_string()),
        }
    }

    /// Check a value against the declared range or the full declared option set.
    ///
    /// Dropdown values that depend on other leaves are narrowed further by
    /// the resolver; this only rejects values that can never be legal.
    pub fn check_declared(&self, id: &str, value: &ConfigValue) -> Result<()> {
        match (&self.kind, value) {
            (ConfigurableKind::Slider { min, max, .. }, ConfigValue::Number(n)) => {
                if n < min || n > max {
                    return Err(DeskforgeError::invalid(format!(
                        "{id}: {n} is outside the range {min}..={max}"
                    )));
                }
                Ok(())
            }
            (ConfigurableKind::Dropdown { options }, ConfigValue::Key(key)) => {
                if options.iter().any(|o| &o.key == key) {
                    Ok(())
                } else {
                    Err(DeskforgeError::invalid(format!(
                        "{id}: '{key}' is not one of the declared options"
                    )))
                }
            }
            (ConfigurableKind::Slider { .. }, ConfigValue::Key(key)) => Err(
                DeskforgeError::invalid(format!("{id}: expected a number, got '{key}'")),
            ),
            (ConfigurableKind::Dropdown { .. }, ConfigValue::Number(n)) => Err(
                DeskforgeError::invalid(format!("{id}: expected an option key, got {n}")),
            ),
        }
    }
}

/// A node of the catalog tree.
///
/// Links to parent and children are ids into the owning [`super::Catalog`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogNode {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub children: Vec<String>,
    #[serde(default)]
    pub is_category: bool,
    #[serde(default)]
    pub default_selected: bool,
    #[serde(default)]
    pub configurable: Option<Configurable>,
}

impl CatalogNode {
    pub fn is_leaf(&self) -> bool {
        !self.is_category
    }

    pub fn is_configurable(&self) -> bool {
        self.configurable.is_some()
    }
}

/// Nested authoring form of the catalog, used by the built-in data and by
/// catalog files. A node with `children` (even empty) is a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDef {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub default_selected: bool,
    #[serde(default)]
    pub configurable: Option<Configurable>,
    #[serde(default)]
    pub children: Option<Vec<NodeDef>>,
}

impl NodeDef {
    pub fn category(id: &str, label: &str, children: Vec<NodeDef>) -> Self {
        Self {
            id: id.to_string(),
            label: Some(label.to_string()),
            description: String::new(),
            default_selected: false,
            configurable: None,
            children: Some(children),
        }
    }

    pub fn leaf(id: &str, label: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            label: Some(label.to_string()),
            description: description.to_string(),
            default_selected: false,
            configurable: None,
            children: None,
        }
    }

    pub fn selected(mut self) -> Self {
        self.default_selected = true;
        self
    }

    pub fn with_configurable(mut self, configurable: Configurable) -> Self {
        self.configurable = Some(configurable);
        self
    }

    /// Flatten into registry nodes, parents before children
    pub fn flatten(self) -> Vec<CatalogNode> {
        let mut out = Vec::new();
        self.flatten_into(None, &mut out);
        out
    }

    fn flatten_into(self, parent: Option<&str>, out: &mut Vec<CatalogNode>) {
        let NodeDef {
            id,
            label,
            description,
            default_selected,
            configurable,
            children,
        } = self;

        let is_category = children.is_some();
        let children = children.unwrap_or_default();
        let child_ids = children.iter().map(|c| c.id.clone()).collect();

        out.push(CatalogNode {
            label: label.unwrap_or_else(|| id.clone()),
            id: id.clone(),
            description,
            parent: parent.map(str::to_string),
            children: child_ids,
            is_category,
            default_selected,
            configurable,
        });

        for child in children {
            child.flatten_into(Some(&id), out);
        }
    }
}
