//! Selection tree engine and derived option resolver

pub mod resolver;
pub mod selection;

pub use resolver::resolve;
pub use selection::{CategoryStatus, NodeStatus, SelectionTree};
