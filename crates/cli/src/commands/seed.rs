use std::fs;

use rust_decimal::Decimal;

use lyra_core::config::{AppConfig, LoadOptions};
use lyra_core::{Product, ProductId};

use crate::commands::CommandResult;

pub fn run(options: LoadOptions) -> CommandResult {
    let config = match AppConfig::load(options) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "seed",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let mut actions = Vec::new();

    if config.store.catalog_path.exists() {
        actions.push(format!("catalog already present at {}", config.store.catalog_path.display()));
    } else {
        let catalog = demo_catalog();
        let encoded = match serde_json::to_vec_pretty(&catalog) {
            Ok(encoded) => encoded,
            Err(error) => {
                return CommandResult::failure("seed", "encode", error.to_string(), 4);
            }
        };
        if let Err(error) = fs::write(&config.store.catalog_path, encoded) {
            return CommandResult::failure(
                "seed",
                "catalog_write",
                format!("could not write {}: {error}", config.store.catalog_path.display()),
                4,
            );
        }
        actions.push(format!(
            "wrote {} demo products to {}",
            catalog.len(),
            config.store.catalog_path.display()
        ));
    }

    if config.store.orders_path.exists() {
        actions.push(format!("ledger already present at {}", config.store.orders_path.display()));
    } else {
        if let Err(error) = fs::write(&config.store.orders_path, b"[]") {
            return CommandResult::failure(
                "seed",
                "ledger_write",
                format!("could not write {}: {error}", config.store.orders_path.display()),
                4,
            );
        }
        actions.push(format!("wrote empty ledger to {}", config.store.orders_path.display()));
    }

    CommandResult::success("seed", actions.join("; "))
}

fn demo_catalog() -> Vec<Product> {
    vec![
        demo_product("p1", "Aurora Mug", "Hand-glazed ceramic mug", "kitchen", Some("blue"), 499),
        demo_product("p2", "Crimson Mug", "Hand-glazed ceramic mug", "kitchen", Some("red"), 549),
        demo_product("p3", "Halo Desk Lamp", "Dimmable LED desk lamp", "lighting", Some("white"), 1999),
        demo_product("p4", "Drift Notebook", "A5 dotted notebook", "stationery", None, 299),
        demo_product("p5", "Slate Backpack", "Water-resistant daypack", "bags", Some("grey"), 2499),
        demo_product("p6", "Echo Earbuds", "Wireless earbuds with case", "audio", Some("black"), 3999),
    ]
}

fn demo_product(
    id: &str,
    name: &str,
    description: &str,
    category: &str,
    color: Option<&str>,
    price: i64,
) -> Product {
    Product {
        id: ProductId(id.to_string()),
        name: name.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        color: color.map(str::to_string),
        price: Decimal::from(price),
    }
}
