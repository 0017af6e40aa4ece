//! File-backed stores for the merchant core.
//!
//! The catalog is a read-only JSON file loaded on every call; the
//! order ledger is a JSON array rewritten wholesale on every append,
//! with the whole load-append-rewrite cycle held under a write lock so
//! sequential order ids cannot collide within a process.

pub mod catalog;
pub mod ledger;
pub mod memory;

use std::path::PathBuf;

use thiserror::Error;

pub use catalog::{CatalogStore, JsonCatalogStore};
pub use ledger::{JsonOrderLedger, OrderLedger};
pub use memory::{InMemoryCatalogStore, InMemoryOrderLedger};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not read `{path}`: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("could not write `{path}`: {source}")]
    Write { path: PathBuf, source: std::io::Error },
    #[error("could not parse `{path}`: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },
    #[error("could not encode `{path}`: {source}")]
    Encode { path: PathBuf, source: serde_json::Error },
}
