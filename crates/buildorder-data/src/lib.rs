//! Data-driven action catalogs.
//!
//! Loads action definitions from `actions.ron`, `actions.toml`, or
//! `actions.json`, resolves name references, and builds an immutable
//! [`ActionCatalog`](buildorder_core::catalog::ActionCatalog).

pub mod loader;
pub mod schema;

pub use loader::{DataLoadError, load_catalog, load_catalog_dir};
