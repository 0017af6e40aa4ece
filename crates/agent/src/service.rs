use std::sync::Arc;

use lyra_core::resolution::{resolve_order, OrderLine, ResolutionError};
use lyra_core::{Order, Product};
use lyra_store::{CatalogStore, OrderLedger, StoreError};

/// Outcome of a place-order call. Resolution failures are ordinary
/// values here so the caller can speak them back; only storage
/// failures surface as errors.
#[derive(Clone, Debug, PartialEq)]
pub enum OrderOutcome {
    Placed(Order),
    Rejected(ResolutionError),
}

/// Stateless orchestration over the catalog store and the order
/// ledger. Every operation reloads from its store; nothing is cached
/// between calls.
pub struct MerchantService {
    catalog: Arc<dyn CatalogStore>,
    ledger: Arc<dyn OrderLedger>,
    currency: String,
}

impl MerchantService {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        ledger: Arc<dyn OrderLedger>,
        currency: impl Into<String>,
    ) -> Self {
        Self { catalog, ledger, currency: currency.into() }
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub async fn search_products(&self, query: &str) -> Result<Vec<Product>, StoreError> {
        let catalog = self.catalog.load().await?;
        let results: Vec<Product> = catalog.search(query).into_iter().cloned().collect();

        tracing::debug!(
            event_name = "merchant.catalog.searched",
            query = query,
            result_count = results.len(),
            "catalog search completed"
        );

        Ok(results)
    }

    pub async fn place_order(&self, lines: Vec<OrderLine>) -> Result<OrderOutcome, StoreError> {
        let catalog = self.catalog.load().await?;

        let draft = match resolve_order(&catalog, &lines, &self.currency) {
            Ok(draft) => draft,
            Err(error) => {
                tracing::warn!(
                    event_name = "merchant.order.rejected",
                    reason = %error,
                    line_count = lines.len(),
                    "order rejected during resolution"
                );
                return Ok(OrderOutcome::Rejected(error));
            }
        };

        let order = self.ledger.append(draft).await?;
        tracing::info!(
            event_name = "merchant.order.placed",
            order_id = %order.id.0,
            item_count = order.items.len(),
            total_amount = %order.total_amount,
            "order placed"
        );

        Ok(OrderOutcome::Placed(order))
    }

    pub async fn last_order(&self) -> Result<Option<Order>, StoreError> {
        self.ledger.last().await
    }
}
