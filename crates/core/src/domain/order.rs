use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::product::ProductId;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub String);

impl OrderId {
    /// Sequential scheme used by the ledger: `ord-1`, `ord-2`, ...
    pub fn from_sequence(n: u64) -> Self {
        Self(format!("ord-{n}"))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl OrderItem {
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// A resolved order that has not been numbered yet. The ledger assigns
/// the id and timestamp when it appends, so the sequence number is
/// taken under the same lock that persists it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub items: Vec<OrderItem>,
    pub total_amount: Decimal,
    pub currency: String,
}

impl OrderDraft {
    pub fn new(items: Vec<OrderItem>, currency: impl Into<String>) -> Self {
        let total_amount = items.iter().map(OrderItem::subtotal).sum();
        Self { items, total_amount, currency: currency.into() }
    }

    pub fn into_order(self, id: OrderId, created_at: DateTime<Utc>) -> Order {
        Order {
            id,
            created_at,
            items: self.items,
            total_amount: self.total_amount,
            currency: self.currency,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItem>,
    pub total_amount: Decimal,
    pub currency: String,
}
