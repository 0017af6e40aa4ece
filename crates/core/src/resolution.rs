use thiserror::Error;

use crate::catalog::Catalog;
use crate::domain::order::{OrderDraft, OrderItem};
use crate::domain::product::{Product, ProductId};

/// A purchase reference as the caller tagged it. The loose
/// "product_id or id or name, whichever is present" parsing lives at
/// the tool boundary; by the time resolution runs the reference is
/// explicit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProductRef {
    Id(ProductId),
    Name(String),
}

impl ProductRef {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Id(id) => &id.0,
            Self::Name(name) => name,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderLine {
    pub product: ProductRef,
    pub quantity: u32,
}

impl OrderLine {
    pub fn new(product: ProductRef, quantity: u32) -> Self {
        Self { product, quantity }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("order must contain at least one item")]
    EmptyOrder,
    #[error("product '{query}' is ambiguous. Found: {}", .candidates.join(", "))]
    Ambiguous { query: String, candidates: Vec<String> },
    #[error("product '{0}' not found")]
    NotFound(String),
}

/// Resolves every line against the catalog and prices the order.
/// All-or-nothing: the first line that fails aborts the whole order.
pub fn resolve_order(
    catalog: &Catalog,
    lines: &[OrderLine],
    currency: &str,
) -> Result<OrderDraft, ResolutionError> {
    if lines.is_empty() {
        return Err(ResolutionError::EmptyOrder);
    }

    let mut items = Vec::with_capacity(lines.len());
    for line in lines {
        let product = resolve_line(catalog, &line.product)?;
        items.push(OrderItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            quantity: line.quantity,
            unit_price: product.price,
        });
    }

    Ok(OrderDraft::new(items, currency))
}

/// Exact id lookup first, then substring search as the fallback. Both
/// reference kinds take the same path: a spoken identifier that
/// happens to equal a catalog id still resolves exactly.
fn resolve_line<'a>(
    catalog: &'a Catalog,
    reference: &ProductRef,
) -> Result<&'a Product, ResolutionError> {
    let query = reference.as_str();

    if let Some(product) = catalog.find(&ProductId(query.to_string())) {
        return Ok(product);
    }

    let candidates = catalog.search(query);
    match candidates.as_slice() {
        [single] => Ok(*single),
        [] => Err(ResolutionError::NotFound(query.to_string())),
        many => Err(ResolutionError::Ambiguous {
            query: query.to_string(),
            candidates: many.iter().map(|product| product.name.clone()).collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::catalog::Catalog;
    use crate::domain::product::{Product, ProductId};

    use super::{resolve_order, OrderLine, ProductRef, ResolutionError};

    fn catalog() -> Catalog {
        Catalog::new(vec![
            product("p1", "Blue Mug", Decimal::from(10)),
            product("p2", "Red Mug", Decimal::from(12)),
            product("p3", "Desk Lamp", Decimal::from(35)),
        ])
    }

    fn product(id: &str, name: &str, price: Decimal) -> Product {
        Product {
            id: ProductId(id.to_string()),
            name: name.to_string(),
            description: String::new(),
            category: "home".to_string(),
            color: None,
            price,
        }
    }

    fn id_line(id: &str, quantity: u32) -> OrderLine {
        OrderLine::new(ProductRef::Id(ProductId(id.to_string())), quantity)
    }

    fn name_line(name: &str, quantity: u32) -> OrderLine {
        OrderLine::new(ProductRef::Name(name.to_string()), quantity)
    }

    #[test]
    fn exact_id_resolves_and_snapshots_the_product() {
        let draft = resolve_order(&catalog(), &[id_line("p1", 2)], "INR").expect("resolve p1");

        assert_eq!(draft.items.len(), 1);
        assert_eq!(draft.items[0].product_id, ProductId("p1".to_string()));
        assert_eq!(draft.items[0].name, "Blue Mug");
        assert_eq!(draft.items[0].quantity, 2);
        assert_eq!(draft.items[0].unit_price, Decimal::from(10));
        assert_eq!(draft.total_amount, Decimal::from(20));
        assert_eq!(draft.currency, "INR");
    }

    #[test]
    fn unique_name_match_falls_back_to_search() {
        let draft = resolve_order(&catalog(), &[name_line("lamp", 1)], "INR").expect("resolve");

        assert_eq!(draft.items[0].product_id, ProductId("p3".to_string()));
        assert_eq!(draft.total_amount, Decimal::from(35));
    }

    #[test]
    fn ambiguous_name_lists_every_candidate() {
        let error = resolve_order(&catalog(), &[name_line("mug", 1)], "INR")
            .expect_err("mug matches two products");

        match &error {
            ResolutionError::Ambiguous { query, candidates } => {
                assert_eq!(query, "mug");
                assert_eq!(candidates, &["Blue Mug".to_string(), "Red Mug".to_string()]);
            }
            other => panic!("expected ambiguous error, got {other:?}"),
        }
        assert_eq!(
            error.to_string(),
            "product 'mug' is ambiguous. Found: Blue Mug, Red Mug"
        );
    }

    #[test]
    fn unknown_reference_is_not_found() {
        let error = resolve_order(&catalog(), &[id_line("p9", 1)], "INR")
            .expect_err("p9 is not in the catalog");

        assert_eq!(error, ResolutionError::NotFound("p9".to_string()));
        assert_eq!(error.to_string(), "product 'p9' not found");
    }

    #[test]
    fn first_failing_line_aborts_the_whole_order() {
        let error = resolve_order(
            &catalog(),
            &[id_line("p1", 1), name_line("mug", 1), id_line("p9", 1)],
            "INR",
        )
        .expect_err("second line is ambiguous");

        assert!(matches!(error, ResolutionError::Ambiguous { .. }));
    }

    #[test]
    fn empty_order_is_rejected() {
        let error = resolve_order(&catalog(), &[], "INR").expect_err("no items");

        assert_eq!(error, ResolutionError::EmptyOrder);
    }

    #[test]
    fn multi_line_total_sums_subtotals() {
        let draft = resolve_order(&catalog(), &[id_line("p1", 2), id_line("p2", 1)], "INR")
            .expect("resolve both");

        assert_eq!(draft.total_amount, Decimal::from(32));
    }
}
