use std::sync::Arc;

use serde_json::json;

use lyra_agent::ToolRegistry;
use lyra_core::config::{AppConfig, LoadOptions};

use crate::commands::{current_thread_runtime, merchant_service, CommandResult};

pub fn run(options: LoadOptions, query: Option<&str>) -> CommandResult {
    let config = match AppConfig::load(options) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "search",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let runtime = match current_thread_runtime("search") {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };

    let registry = ToolRegistry::merchant_tools(Arc::new(merchant_service(&config)));
    let reply = runtime.block_on(
        registry.execute("search_products", json!({"query": query.unwrap_or("")})),
    );

    match reply {
        Ok(serde_json::Value::String(message)) => CommandResult::success("search", message),
        Ok(other) => CommandResult::failure(
            "search",
            "unexpected_reply",
            format!("search tool returned a non-text reply: {other}"),
            4,
        ),
        Err(error) => CommandResult::failure("search", "store", error.to_string(), 4),
    }
}
