//! Shopping cart and its compact `id:qty` transport encoding.

use serde::{Deserialize, Serialize};

use quickbasket_core::{DomainError, DomainResult, Entity, Money, ProductId};
use quickbasket_products::{Catalog, Product};

/// One pending cart entry. `quantity` is always positive.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// A cart entry priced against the current catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
    pub line_total: Money,
}

/// Rendered cart: live lines plus the running total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    pub lines: Vec<CartLine>,
    pub total: Money,
}

/// Pending order scoped to one session (web) or one process run (CLI).
///
/// Entries keep insertion order; a product appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn quantity_of(&self, product_id: ProductId) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.product_id == product_id)
            .map(|e| e.quantity)
    }

    /// Add `qty` units of a product, accumulating onto an existing entry.
    ///
    /// Rejects unknown products, non-positive quantities and quantities above
    /// current stock. On error the cart is unchanged. Returns the product so
    /// callers can report what was added.
    pub fn add<C>(&mut self, catalog: &C, product_id: ProductId, qty: i64) -> DomainResult<Product>
    where
        C: Catalog + ?Sized,
    {
        let product = catalog
            .get(product_id)
            .ok_or_else(|| DomainError::not_found(format!("product {product_id}")))?;

        if qty <= 0 {
            return Err(DomainError::invalid_quantity("quantity must be at least 1"));
        }
        let qty = u32::try_from(qty)
            .ok()
            .filter(|q| product.has_stock_for(*q))
            .ok_or_else(|| {
                DomainError::invalid_quantity(format!(
                    "not enough stock for {}: requested {qty}, available {}",
                    product.name(),
                    product.stock()
                ))
            })?;

        match self.entries.iter_mut().find(|e| e.product_id == product_id) {
            Some(entry) => {
                entry.quantity = entry
                    .quantity
                    .checked_add(qty)
                    .ok_or_else(|| DomainError::invalid_quantity("quantity too large"))?;
            }
            None => self.entries.push(CartEntry {
                product_id,
                quantity: qty,
            }),
        }
        Ok(product)
    }

    /// Remove a product's entry. Returns `false` when it was not in the cart.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.product_id != product_id);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Lazily price each entry against the catalog, skipping entries whose
    /// product no longer exists.
    pub fn lines<C>(&self, catalog: &C) -> impl Iterator<Item = CartLine>
    where
        C: Catalog + ?Sized,
    {
        self.entries.iter().filter_map(move |entry| {
            let product = catalog.get(entry.product_id)?;
            Some(CartLine {
                product_id: product.id(),
                name: product.name().to_string(),
                unit_price: product.price(),
                quantity: entry.quantity,
                line_total: product.price().saturating_mul(entry.quantity),
            })
        })
    }

    /// Collect the priced lines and their total. Empty carts report `EmptyCart`.
    pub fn view<C>(&self, catalog: &C) -> DomainResult<CartSummary>
    where
        C: Catalog + ?Sized,
    {
        if self.is_empty() {
            return Err(DomainError::EmptyCart);
        }
        let mut total = Money::ZERO;
        let lines = self
            .lines(catalog)
            .inspect(|line| total = total.saturating_add(line.line_total))
            .collect();
        Ok(CartSummary { lines, total })
    }

    /// Encode as comma-joined `id:qty` pairs in insertion order.
    pub fn encode(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{}:{}", e.product_id, e.quantity))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Decode the `id:qty` form.
    ///
    /// Segments are split on the first colon; segments without a colon, with a
    /// non-numeric id, or with a non-numeric or zero quantity are dropped. A
    /// repeated id takes the last quantity seen and keeps its first position.
    pub fn parse(encoded: &str) -> Self {
        let mut cart = Cart::new();
        for segment in encoded.split(',') {
            let Some((id, qty)) = segment.split_once(':') else {
                continue;
            };
            let Ok(product_id) = id.parse::<ProductId>() else {
                continue;
            };
            let Some(quantity) = qty.trim().parse::<u32>().ok().filter(|q| *q > 0) else {
                continue;
            };

            match cart.entries.iter_mut().find(|e| e.product_id == product_id) {
                Some(entry) => entry.quantity = quantity,
                None => cart.entries.push(CartEntry {
                    product_id,
                    quantity,
                }),
            }
        }
        cart
    }
}
