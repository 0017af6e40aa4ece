use serde_json::Value;

use lyra_agent::{parse_order_items, OrderOutcome};
use lyra_core::config::{AppConfig, LoadOptions};

use crate::commands::{current_thread_runtime, merchant_service, CommandResult};

pub fn run(options: LoadOptions, items_json: &str) -> CommandResult {
    let config = match AppConfig::load(options) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "order",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let items: Value = match serde_json::from_str(items_json) {
        Ok(items) => items,
        Err(error) => {
            return CommandResult::failure(
                "order",
                "invalid_items",
                format!("items must be a JSON array: {error}"),
                2,
            );
        }
    };
    let Some(items) = items.as_array() else {
        return CommandResult::failure(
            "order",
            "invalid_items",
            "items must be a JSON array of objects",
            2,
        );
    };

    let lines = match parse_order_items(items) {
        Ok(lines) => lines,
        Err(reason) => {
            return CommandResult::failure("order", "invalid_items", reason, 2);
        }
    };

    let runtime = match current_thread_runtime("order") {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };

    let service = merchant_service(&config);
    match runtime.block_on(service.place_order(lines)) {
        Ok(OrderOutcome::Placed(order)) => CommandResult::success(
            "order",
            format!(
                "Order placed! ID: {}. Total: {} {}.",
                order.id.0, order.total_amount, order.currency
            ),
        ),
        Ok(OrderOutcome::Rejected(error)) => {
            CommandResult::failure("order", "order_rejected", format!("Order failed: {error}"), 1)
        }
        Err(error) => CommandResult::failure("order", "store", error.to_string(), 4),
    }
}
