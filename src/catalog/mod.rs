//! Catalog registry: the static option tree.
//!
//! The catalog is authored as a nested [`NodeDef`] (built in, or loaded from
//! YAML) and flattened into an id-keyed [`Catalog`]. Parent and child links
//! are ids, never references, and are checked once when the catalog is built.

pub mod builtin;
pub mod loader;
pub mod registry;
pub mod types;

pub use builtin::{builtin_catalog, Preset, PRESETS};
pub use loader::CatalogLoader;
pub use registry::Catalog;
pub use types::{
    CatalogNode, ConfigValue, Configurable, ConfigurableKind, DropdownOption, NodeDef,
};
