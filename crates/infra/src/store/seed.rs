//! Sample catalog for fresh stores.

use quickbasket_core::{DomainResult, Money};
use quickbasket_products::{Catalog, Product, ProductDraft};

/// (name, price in cents, stock)
pub const SEED_PRODUCTS: &[(&str, u64, u32)] = &[
    ("Rice 5kg", 35_000, 20),
    ("Wheat 5kg", 30_000, 15),
    ("Sugar 1kg", 4_500, 50),
    ("Milk 1L", 3_500, 100),
];

pub fn seed_catalog<C>(catalog: &mut C) -> DomainResult<Vec<Product>>
where
    C: Catalog + ?Sized,
{
    SEED_PRODUCTS
        .iter()
        .map(|(name, cents, stock)| {
            catalog.create(ProductDraft::new(*name, Money::from_cents(*cents), *stock)?)
        })
        .collect()
}
