use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use lyra_core::{Catalog, Product};

use crate::StoreError;

#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Returns the full catalog in storage order. Callers reload on
    /// every operation; there is no cache to invalidate.
    async fn load(&self) -> Result<Catalog, StoreError>;
}

pub struct JsonCatalogStore {
    path: PathBuf,
}

impl JsonCatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl CatalogStore for JsonCatalogStore {
    async fn load(&self) -> Result<Catalog, StoreError> {
        let raw = fs::read(&self.path)
            .await
            .map_err(|source| StoreError::Read { path: self.path.clone(), source })?;

        let products: Vec<Product> = serde_json::from_slice(&raw)
            .map_err(|source| StoreError::Parse { path: self.path.clone(), source })?;

        Ok(Catalog::new(products))
    }
}
