use crate::domain::product::{Product, ProductId};

/// Read-only view over the product list, in storage order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn all(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn find(&self, product_id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == product_id)
    }

    /// Case-insensitive substring match over name, description,
    /// category, and color. An empty or whitespace query returns the
    /// whole catalog. Results keep storage order; there is no ranking.
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.products.iter().collect();
        }

        self.products
            .iter()
            .filter(|product| product.searchable_text().contains(&query))
            .collect()
    }
}
