use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use lyra_core::{Catalog, Order, OrderDraft, OrderId};

use crate::{CatalogStore, OrderLedger, StoreError};

/// Fixed catalog for tests and wiring without a data file.
#[derive(Default)]
pub struct InMemoryCatalogStore {
    catalog: Catalog,
}

impl InMemoryCatalogStore {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn load(&self) -> Result<Catalog, StoreError> {
        Ok(self.catalog.clone())
    }
}

#[derive(Default)]
pub struct InMemoryOrderLedger {
    orders: RwLock<Vec<Order>>,
}

impl InMemoryOrderLedger {
    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }
}

#[async_trait]
impl OrderLedger for InMemoryOrderLedger {
    async fn append(&self, draft: OrderDraft) -> Result<Order, StoreError> {
        let mut orders = self.orders.write().await;
        let id = OrderId::from_sequence(orders.len() as u64 + 1);
        let order = draft.into_order(id, Utc::now());
        orders.push(order.clone());
        Ok(order)
    }

    async fn last(&self) -> Result<Option<Order>, StoreError> {
        let orders = self.orders.read().await;
        Ok(orders.last().cloned())
    }
}
