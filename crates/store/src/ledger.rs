use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use tokio::fs;
use tokio::sync::Mutex;

use lyra_core::{Order, OrderDraft, OrderId};

use crate::StoreError;

#[async_trait]
pub trait OrderLedger: Send + Sync {
    /// Numbers the draft, stamps it, and persists it. The ledger owns
    /// id assignment so the sequence number is read and written under
    /// the same critical section.
    async fn append(&self, draft: OrderDraft) -> Result<Order, StoreError>;

    /// The most recently appended order, or `None` while the ledger is
    /// empty.
    async fn last(&self) -> Result<Option<Order>, StoreError>;
}

/// Orders persisted as one pretty-printed JSON array, rewritten
/// wholesale on every append. A missing file reads as an empty ledger
/// and is created on first append.
pub struct JsonOrderLedger {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonOrderLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    async fn load_all(&self) -> Result<Vec<Order>, StoreError> {
        let raw = match fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(StoreError::Read { path: self.path.clone(), source }),
        };

        serde_json::from_slice(&raw)
            .map_err(|source| StoreError::Parse { path: self.path.clone(), source })
    }

    async fn save_all(&self, orders: &[Order]) -> Result<(), StoreError> {
        let encoded = serde_json::to_vec_pretty(orders)
            .map_err(|source| StoreError::Encode { path: self.path.clone(), source })?;

        fs::write(&self.path, encoded)
            .await
            .map_err(|source| StoreError::Write { path: self.path.clone(), source })
    }
}

#[async_trait]
impl OrderLedger for JsonOrderLedger {
    async fn append(&self, draft: OrderDraft) -> Result<Order, StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut orders = self.load_all().await?;
        let id = OrderId::from_sequence(orders.len() as u64 + 1);
        let order = draft.into_order(id, Utc::now());

        orders.push(order.clone());
        self.save_all(&orders).await?;

        tracing::debug!(
            event_name = "store.ledger.appended",
            order_id = %order.id.0,
            ledger_len = orders.len(),
            "order appended to ledger"
        );

        Ok(order)
    }

    async fn last(&self) -> Result<Option<Order>, StoreError> {
        let orders = self.load_all().await?;
        Ok(orders.into_iter().last())
    }
}
