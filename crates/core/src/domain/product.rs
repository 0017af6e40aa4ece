use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub price: Decimal,
}

impl Product {
    /// Lower-cased concatenation of every field substring search runs over.
    pub fn searchable_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.name,
            self.description,
            self.category,
            self.color.as_deref().unwrap_or(""),
        )
        .to_lowercase()
    }
}
