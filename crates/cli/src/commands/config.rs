use serde::Serialize;

use lyra_core::config::{AppConfig, LoadOptions, LogFormat};

#[derive(Debug, Serialize)]
struct EffectiveConfig {
    catalog_path: String,
    orders_path: String,
    currency: String,
    log_level: String,
    log_format: LogFormat,
}

pub fn run(options: LoadOptions) -> String {
    let config = match AppConfig::load(options) {
        Ok(config) => config,
        Err(error) => {
            return format!("{{\"status\":\"error\",\"message\":\"{error}\"}}");
        }
    };

    let effective = EffectiveConfig {
        catalog_path: config.store.catalog_path.display().to_string(),
        orders_path: config.store.orders_path.display().to_string(),
        currency: config.currency,
        log_level: config.logging.level,
        log_format: config.logging.format,
    };

    serde_json::to_string_pretty(&effective)
        .unwrap_or_else(|error| format!("{{\"status\":\"error\",\"message\":\"{error}\"}}"))
}
