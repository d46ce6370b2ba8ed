//! Checkout: validate the cart against live stock, then commit stock
//! decrements and the sale record as one unit.

use chrono::{DateTime, Utc};

use quickbasket_core::{DomainError, DomainResult, Entity, Money, ProductId, SaleId};
use quickbasket_products::{Catalog, Product};

use crate::cart::Cart;
use crate::sale::{Sale, SaleLedger, SaleLine};

/// Stock change for one product, computed during planning.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StockDecrement {
    pub product_id: ProductId,
    pub quantity: u32,
    /// Stock left once `quantity` has been taken.
    pub remaining: u32,
}

/// Fully validated checkout, ready to be committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutPlan {
    pub lines: Vec<SaleLine>,
    pub total: Money,
    pub decrements: Vec<StockDecrement>,
}

/// Store able to commit a checkout.
///
/// The default commit checks that every decremented product still exists,
/// then applies each decrement and appends the sale. Stores with a durable
/// backend override it so that both land in a single write.
pub trait CheckoutStore: Catalog + SaleLedger {
    fn commit_checkout(&mut self, decrements: &[StockDecrement], sale: Sale) -> DomainResult<()> {
        if let Some(d) = decrements.iter().find(|d| self.get(d.product_id).is_none()) {
            return Err(DomainError::not_found(format!("product {}", d.product_id)));
        }
        for d in decrements {
            self.set_stock(d.product_id, d.remaining)?;
        }
        self.append(sale)
    }
}

impl<S> CheckoutStore for Box<S>
where
    S: CheckoutStore + ?Sized,
{
    fn commit_checkout(&mut self, decrements: &[StockDecrement], sale: Sale) -> DomainResult<()> {
        (**self).commit_checkout(decrements, sale)
    }
}

/// Validate every cart entry against the live catalog and price the result.
///
/// Pure: reads the catalog, mutates nothing. Entries whose product has been
/// deleted are skipped. The stock check covers all entries before any line is
/// priced, and the first shortfall aborts the whole plan.
pub fn plan_checkout<C>(cart: &Cart, catalog: &C) -> DomainResult<CheckoutPlan>
where
    C: Catalog + ?Sized,
{
    if cart.is_empty() {
        return Err(DomainError::EmptyCart);
    }

    let mut live: Vec<(Product, u32)> = Vec::with_capacity(cart.len());
    for entry in cart.entries() {
        let Some(product) = catalog.get(entry.product_id) else {
            continue;
        };
        if !product.has_stock_for(entry.quantity) {
            return Err(DomainError::invalid_quantity(format!(
                "not enough stock for {}: requested {}, available {}",
                product.name(),
                entry.quantity,
                product.stock()
            )));
        }
        live.push((product, entry.quantity));
    }

    if live.is_empty() {
        return Err(DomainError::EmptyCart);
    }

    let overflow = || DomainError::validation("checkout total out of range");
    let mut total = Money::ZERO;
    let mut lines = Vec::with_capacity(live.len());
    let mut decrements = Vec::with_capacity(live.len());

    for (product, quantity) in live {
        let line_total = product.price().checked_mul(quantity).ok_or_else(overflow)?;
        total = total.checked_add(line_total).ok_or_else(overflow)?;

        decrements.push(StockDecrement {
            product_id: product.id(),
            quantity,
            remaining: product.stock() - quantity,
        });
        lines.push(SaleLine {
            product_id: product.id(),
            name: product.name().to_string(),
            quantity,
            unit_price: product.price(),
            line_total,
        });
    }

    Ok(CheckoutPlan {
        lines,
        total,
        decrements,
    })
}

/// Convert the cart into a recorded sale.
///
/// On success stock has been decremented, exactly one sale appended and the
/// cart cleared. On any error the store and the cart are untouched.
pub fn checkout<S>(store: &mut S, cart: &mut Cart, occurred_at: DateTime<Utc>) -> DomainResult<Sale>
where
    S: CheckoutStore + ?Sized,
{
    let plan = plan_checkout(cart, &*store)?;
    let sale = Sale::new(SaleId::new(), occurred_at, plan.lines, plan.total);

    store.commit_checkout(&plan.decrements, sale.clone())?;
    cart.clear();
    Ok(sale)
}
