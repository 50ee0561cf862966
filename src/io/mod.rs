pub mod paths;

pub use paths::{DeskforgePaths, PathUtils, StoreLayout};
