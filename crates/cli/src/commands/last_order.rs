use std::sync::Arc;

use serde_json::json;

use lyra_agent::ToolRegistry;
use lyra_core::config::{AppConfig, LoadOptions};

use crate::commands::{current_thread_runtime, merchant_service, CommandResult};

pub fn run(options: LoadOptions) -> CommandResult {
    let config = match AppConfig::load(options) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "last-order",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let runtime = match current_thread_runtime("last-order") {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };

    let registry = ToolRegistry::merchant_tools(Arc::new(merchant_service(&config)));
    match runtime.block_on(registry.execute("get_last_order", json!({}))) {
        Ok(serde_json::Value::String(message)) => CommandResult::success("last-order", message),
        Ok(other) => CommandResult::failure(
            "last-order",
            "unexpected_reply",
            format!("last-order tool returned a non-text reply: {other}"),
            4,
        ),
        Err(error) => CommandResult::failure("last-order", "store", error.to_string(), 4),
    }
}
