pub mod catalog;
pub mod config;
pub mod domain;
pub mod resolution;

pub use catalog::Catalog;
pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions};
pub use domain::order::{Order, OrderDraft, OrderId, OrderItem};
pub use domain::product::{Product, ProductId};
pub use resolution::{resolve_order, OrderLine, ProductRef, ResolutionError};
