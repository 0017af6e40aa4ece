use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{bail, Result};
use async_trait::async_trait;
use serde_json::Value;

use lyra_core::resolution::{OrderLine, ProductRef};
use lyra_core::{Order, ProductId};

use crate::service::{MerchantService, OrderOutcome};

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    async fn execute(&self, input: Value) -> Result<Value>;
}

#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn register<T>(&mut self, tool: T)
    where
        T: Tool + 'static,
    {
        self.tools.insert(tool.name().to_string(), Box::new(tool));
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(Box::as_ref)
    }

    pub async fn execute(&self, name: &str, input: Value) -> Result<Value> {
        let Some(tool) = self.get(name) else {
            bail!("unknown tool `{name}`");
        };
        tool.execute(input).await
    }

    /// The full shopping toolset wired to one service.
    pub fn merchant_tools(service: Arc<MerchantService>) -> Self {
        let mut registry = Self::default();
        registry.register(SearchProductsTool::new(service.clone()));
        registry.register(PlaceOrderTool::new(service.clone()));
        registry.register(GetLastOrderTool::new(service));
        registry
    }
}

/// `search_products` - `{"query": "mug"}`; an absent or empty query
/// lists the whole catalog.
pub struct SearchProductsTool {
    service: Arc<MerchantService>,
}

impl SearchProductsTool {
    pub fn new(service: Arc<MerchantService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for SearchProductsTool {
    fn name(&self) -> &'static str {
        "search_products"
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let query = input.get("query").and_then(Value::as_str).unwrap_or("");
        let products = self.service.search_products(query).await?;

        if products.is_empty() {
            return Ok(Value::String(
                "No products found matching your search.".to_string(),
            ));
        }

        let mut reply = String::from("Here are some products:\n");
        for product in &products {
            reply.push_str(&format!(
                "- {} (ID: {}): {} {}\n",
                product.name,
                product.id.0,
                product.price,
                self.service.currency(),
            ));
        }
        Ok(Value::String(reply))
    }
}

/// `place_order` - `{"items": [{"product_id": "p1", "quantity": 2}]}`.
/// Each item may carry its reference under `product_id`, `id`, or
/// `name`; an item with none of those is reported back by content, and
/// the whole order is dropped.
pub struct PlaceOrderTool {
    service: Arc<MerchantService>,
}

impl PlaceOrderTool {
    pub fn new(service: Arc<MerchantService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for PlaceOrderTool {
    fn name(&self) -> &'static str {
        "place_order"
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let Some(items) = input.get("items").and_then(Value::as_array) else {
            bail!("place_order input must carry an `items` array");
        };

        let lines = match parse_order_items(items) {
            Ok(lines) => lines,
            Err(reason) => return Ok(Value::String(format!("Order failed: {reason}"))),
        };

        let reply = match self.service.place_order(lines).await? {
            OrderOutcome::Placed(order) => format!(
                "Order placed! ID: {}. Total: {} {}.",
                order.id.0, order.total_amount, order.currency
            ),
            OrderOutcome::Rejected(error) => format!("Order failed: {error}"),
        };
        Ok(Value::String(reply))
    }
}

/// `get_last_order` - no arguments.
pub struct GetLastOrderTool {
    service: Arc<MerchantService>,
}

impl GetLastOrderTool {
    pub fn new(service: Arc<MerchantService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for GetLastOrderTool {
    fn name(&self) -> &'static str {
        "get_last_order"
    }

    async fn execute(&self, _input: Value) -> Result<Value> {
        let Some(order) = self.service.last_order().await? else {
            return Ok(Value::String(
                "You haven't placed any orders yet.".to_string(),
            ));
        };
        Ok(Value::String(summarize_order(&order)))
    }
}

fn summarize_order(order: &Order) -> String {
    let items = order
        .items
        .iter()
        .map(|item| format!("{}x {}", item.quantity, item.name))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Your last order ({}) totals {} {} with: {}.",
        order.id.0, order.total_amount, order.currency, items
    )
}

/// Accepts the identifier under whichever of `product_id`, `id`, or
/// `name` the model used, tagging it for resolution. Quantity defaults
/// to 1 and is otherwise taken at face value.
pub fn parse_order_items(items: &[Value]) -> Result<Vec<OrderLine>, String> {
    let mut lines = Vec::with_capacity(items.len());

    for item in items {
        let by_id = item
            .get("product_id")
            .or_else(|| item.get("id"))
            .and_then(Value::as_str)
            .filter(|value| !value.trim().is_empty());
        let by_name = item
            .get("name")
            .and_then(Value::as_str)
            .filter(|value| !value.trim().is_empty());

        let product = match (by_id, by_name) {
            (Some(id), _) => ProductRef::Id(ProductId(id.to_string())),
            (None, Some(name)) => ProductRef::Name(name.to_string()),
            (None, None) => {
                return Err(format!(
                    "invalid item format: {item}. Must contain product_id, id, or name."
                ));
            }
        };

        let quantity = item
            .get("quantity")
            .and_then(Value::as_u64)
            .and_then(|value| u32::try_from(value).ok())
            .unwrap_or(1);

        lines.push(OrderLine::new(product, quantity));
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rust_decimal::Decimal;
    use serde_json::{json, Value};

    use lyra_core::{Catalog, Product, ProductId};
    use lyra_store::{InMemoryCatalogStore, InMemoryOrderLedger};

    use crate::service::MerchantService;

    use super::ToolRegistry;

    fn product(id: &str, name: &str, price: i64) -> Product {
        Product {
            id: ProductId(id.to_string()),
            name: name.to_string(),
            description: "Ceramic mug".to_string(),
            category: "kitchen".to_string(),
            color: None,
            price: Decimal::from(price),
        }
    }

    fn registry() -> ToolRegistry {
        let catalog = Catalog::new(vec![
            product("p1", "Blue Mug", 10),
            product("p2", "Red Mug", 12),
        ]);
        let service = MerchantService::new(
            Arc::new(InMemoryCatalogStore::new(catalog)),
            Arc::new(InMemoryOrderLedger::default()),
            "INR",
        );
        ToolRegistry::merchant_tools(Arc::new(service))
    }

    fn reply_text(value: Value) -> String {
        match value {
            Value::String(text) => text,
            other => panic!("expected string reply, got {other:?}"),
        }
    }

    #[test]
    fn registry_holds_the_three_shopping_tools() {
        let registry = registry();

        assert_eq!(registry.len(), 3);
        assert!(registry.get("search_products").is_some());
        assert!(registry.get("place_order").is_some());
        assert!(registry.get("get_last_order").is_some());
    }

    #[tokio::test]
    async fn unknown_tool_is_an_error() {
        let registry = registry();

        let result = registry.execute("refund_order", json!({})).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn search_lists_matches_with_id_and_price() {
        let registry = registry();

        let reply = reply_text(
            registry.execute("search_products", json!({"query": "blue"})).await.expect("search"),
        );
        assert_eq!(reply, "Here are some products:\n- Blue Mug (ID: p1): 10 INR\n");

        let reply = reply_text(
            registry.execute("search_products", json!({"query": "mug"})).await.expect("search"),
        );
        assert!(reply.contains("Blue Mug"));
        assert!(reply.contains("Red Mug"));
    }

    #[tokio::test]
    async fn search_without_matches_says_so() {
        let registry = registry();

        let reply = reply_text(
            registry
                .execute("search_products", json!({"query": "toaster"}))
                .await
                .expect("search"),
        );
        assert_eq!(reply, "No products found matching your search.");
    }

    #[tokio::test]
    async fn place_order_confirms_with_id_and_total() {
        let registry = registry();

        let reply = reply_text(
            registry
                .execute("place_order", json!({"items": [{"product_id": "p1", "quantity": 2}]}))
                .await
                .expect("place"),
        );
        assert_eq!(reply, "Order placed! ID: ord-1. Total: 20 INR.");
    }

    #[tokio::test]
    async fn ambiguous_name_reply_names_every_candidate() {
        let registry = registry();

        let reply = reply_text(
            registry
                .execute("place_order", json!({"items": [{"name": "mug"}]}))
                .await
                .expect("place"),
        );
        assert_eq!(
            reply,
            "Order failed: product 'mug' is ambiguous. Found: Blue Mug, Red Mug"
        );
    }

    #[tokio::test]
    async fn unknown_product_reply_names_the_identifier() {
        let registry = registry();

        let reply = reply_text(
            registry
                .execute("place_order", json!({"items": [{"id": "p9"}]}))
                .await
                .expect("place"),
        );
        assert_eq!(reply, "Order failed: product 'p9' not found");
    }

    #[tokio::test]
    async fn item_without_any_identifier_is_reported_by_content() {
        let registry = registry();

        let reply = reply_text(
            registry
                .execute("place_order", json!({"items": [{"quantity": 2}]}))
                .await
                .expect("place"),
        );
        assert_eq!(
            reply,
            "Order failed: invalid item format: {\"quantity\":2}. Must contain product_id, id, or name."
        );
    }

    #[tokio::test]
    async fn missing_items_array_is_a_contract_error() {
        let registry = registry();

        let result = registry.execute("place_order", json!({"order": []})).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn last_order_flows_from_empty_to_summary() {
        let registry = registry();

        let reply =
            reply_text(registry.execute("get_last_order", json!({})).await.expect("last"));
        assert_eq!(reply, "You haven't placed any orders yet.");

        registry
            .execute(
                "place_order",
                json!({"items": [{"product_id": "p1", "quantity": 2}, {"name": "red"}]}),
            )
            .await
            .expect("place");

        let reply =
            reply_text(registry.execute("get_last_order", json!({})).await.expect("last"));
        assert_eq!(
            reply,
            "Your last order (ord-1) totals 32 INR with: 2x Blue Mug, 1x Red Mug."
        );
    }
}
