//! Flat, id-keyed catalog registry.
//!
//! Nodes reference each other by id only. [`Catalog::from_nodes`] is the
//! single constructor and checks referential integrity before anything else
//! can observe the tree.

use super::types::{CatalogNode, ConfigurableKind, NodeDef};
use crate::{DeskforgeError, Result};
use std::collections::{HashMap, HashSet};

/// Immutable catalog of categories and leaves
#[derive(Debug, Clone)]
pub struct Catalog {
    root: String,
    nodes: HashMap<String, CatalogNode>,
    /// Every id in depth-first order starting at the root
    order: Vec<String>,
}

impl Catalog {
    /// Build a catalog from a nested definition
    pub fn from_def(def: NodeDef) -> Result<Self> {
        let root = def.id.clone();
        Self::from_nodes(&root, def.flatten())
    }

    /// Build a catalog from flat nodes, validating every structural invariant
    pub fn from_nodes(root: &str, nodes: Vec<CatalogNode>) -> Result<Self> {
        let mut map: HashMap<String, CatalogNode> = HashMap::with_capacity(nodes.len());
        for node in nodes {
            if node.id.trim().is_empty() {
                return Err(DeskforgeError::Catalog("node with empty id".to_string()));
            }
            if map.contains_key(&node.id) {
                return Err(DeskforgeError::Catalog(format!(
                    "duplicate node id '{}'",
                    node.id
                )));
            }
            map.insert(node.id.clone(), node);
        }

        let root_node = map
            .get(root)
            .ok_or_else(|| DeskforgeError::Catalog(format!("root '{root}' is not defined")))?;
        if root_node.parent.is_some() {
            return Err(DeskforgeError::Catalog(format!(
                "root '{root}' must not have a parent"
            )));
        }
        if !root_node.is_category {
            return Err(DeskforgeError::Catalog(format!(
                "root '{root}' must be a category"
            )));
        }

        for node in map.values() {
            Self::check_node(node, root, &map)?;
        }

        let order = Self::walk(root, &map)?;
        if order.len() != map.len() {
            let reached: HashSet<&String> = order.iter().collect();
            let mut orphans: Vec<&str> = map
                .keys()
                .filter(|id| !reached.contains(id))
                .map(String::as_str)
                .collect();
            orphans.sort_unstable();
            return Err(DeskforgeError::Catalog(format!(
                "nodes not reachable from root: {}",
                orphans.join(", ")
            )));
        }

        Ok(Self {
            root: root.to_string(),
            nodes: map,
            order,
        })
    }

    fn check_node(node: &CatalogNode, root: &str, map: &HashMap<String, CatalogNode>) -> Result<()> {
        let id = &node.id;

        for child_id in &node.children {
            let child = map.get(child_id).ok_or_else(|| {
                DeskforgeError::Catalog(format!("'{id}' lists unknown child '{child_id}'"))
            })?;
            if child.parent.as_deref() != Some(id.as_str()) {
                return Err(DeskforgeError::Catalog(format!(
                    "'{child_id}' is listed under '{id}' but its parent is {:?}",
                    child.parent
                )));
            }
        }

        if id != root {
            let parent_id = node.parent.as_ref().ok_or_else(|| {
                DeskforgeError::Catalog(format!("'{id}' has no parent"))
            })?;
            let parent = map.get(parent_id).ok_or_else(|| {
                DeskforgeError::Catalog(format!("'{id}' has unknown parent '{parent_id}'"))
            })?;
            if !parent.children.iter().any(|c| c == id) {
                return Err(DeskforgeError::Catalog(format!(
                    "'{id}' names '{parent_id}' as parent but is not among its children"
                )));
            }
        }

        if node.is_category {
            if node.configurable.is_some() {
                return Err(DeskforgeError::Catalog(format!(
                    "category '{id}' cannot be configurable"
                )));
            }
            if node.default_selected {
                return Err(DeskforgeError::Catalog(format!(
                    "category '{id}' cannot carry a selection default"
                )));
            }
        } else if !node.children.is_empty() {
            return Err(DeskforgeError::Catalog(format!("leaf '{id}' has children")));
        }

        if let Some(configurable) = &node.configurable {
            if let ConfigurableKind::Slider { min, max, .. } = &configurable.kind {
                if min > max {
                    return Err(DeskforgeError::Catalog(format!(
                        "'{id}' has an empty range {min}..={max}"
                    )));
                }
            }
            configurable
                .check_declared(id, &configurable.default)
                .map_err(|e| DeskforgeError::Catalog(format!("bad default: {e}")))?;

            if let ConfigurableKind::Dropdown { options } = &configurable.kind {
                for option in options {
                    if let Some(required) = &option.requires {
                        match map.get(required) {
                            Some(leaf) if leaf.is_leaf() => {}
                            _ => {
                                return Err(DeskforgeError::Catalog(format!(
                                    "option '{}' of '{id}' requires unknown leaf '{required}'",
                                    option.key
                                )))
                            }
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Depth-first walk; a node reached twice means a cycle or a shared child
    fn walk(root: &str, map: &HashMap<String, CatalogNode>) -> Result<Vec<String>> {
        let mut order = Vec::with_capacity(map.len());
        let mut seen = HashSet::with_capacity(map.len());
        let mut stack = vec![root.to_string()];

        while let Some(id) = stack.pop() {
            if !seen.insert(id.clone()) {
                return Err(DeskforgeError::Catalog(format!(
                    "'{id}' is reachable through more than one path"
                )));
            }
            if let Some(node) = map.get(&id) {
                stack.extend(node.children.iter().rev().cloned());
            }
            order.push(id);
        }

        Ok(order)
    }

    pub fn root_id(&self) -> &str {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&CatalogNode> {
        self.nodes.get(id)
    }

    /// Look up a node, failing with NotFound
    pub fn get(&self, id: &str) -> Result<&CatalogNode> {
        self.nodes
            .get(id)
            .ok_or_else(|| DeskforgeError::not_found(format!("catalog node '{id}'")))
    }

    /// Look up a category, failing with NotFound for unknown ids and leaves
    pub fn category(&self, id: &str) -> Result<&CatalogNode> {
        match self.nodes.get(id) {
            Some(node) if node.is_category => Ok(node),
            _ => Err(DeskforgeError::not_found(format!("category '{id}'"))),
        }
    }

    /// Look up a leaf, failing with NotFound for unknown ids and categories
    pub fn leaf(&self, id: &str) -> Result<&CatalogNode> {
        match self.nodes.get(id) {
            Some(node) if node.is_leaf() => Ok(node),
            _ => Err(DeskforgeError::not_found(format!("leaf '{id}'"))),
        }
    }

    /// Direct children of a node in declared order
    pub fn children<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a CatalogNode> + 'a {
        let ids: &'a [String] = self
            .nodes
            .get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[]);
        ids.iter().filter_map(move |c| self.nodes.get(c))
    }

    /// All nodes in depth-first order
    pub fn depth_first(&self) -> impl Iterator<Item = &CatalogNode> {
        self.order.iter().filter_map(move |id| self.nodes.get(id))
    }

    /// All leaves in depth-first order
    pub fn leaves(&self) -> impl Iterator<Item = &CatalogNode> {
        self.depth_first().filter(|n| n.is_leaf())
    }

    /// Leaf descendants of `id` at any depth, in depth-first order
    pub fn leaf_descendants(&self, id: &str) -> Vec<&CatalogNode> {
        let mut out = Vec::new();
        let mut stack: Vec<&str> = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(current) else {
                continue;
            };
            if node.is_leaf() && current != id {
                out.push(node);
            }
            stack.extend(node.children.iter().rev().map(String::as_str));
        }
        out
    }
}
