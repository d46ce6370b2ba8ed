//! Completed sales and the append-only ledger that records them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use quickbasket_core::{DomainResult, Money, ProductId, SaleId, ValueObject};

/// Line of a completed sale. Name and price are snapshots taken at checkout,
/// independent of later catalog edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleLine {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub line_total: Money,
}

impl ValueObject for SaleLine {}

/// Immutable record of a completed purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    id: SaleId,
    occurred_at: DateTime<Utc>,
    lines: Vec<SaleLine>,
    total: Money,
}

impl Sale {
    pub(crate) fn new(
        id: SaleId,
        occurred_at: DateTime<Utc>,
        lines: Vec<SaleLine>,
        total: Money,
    ) -> Self {
        Self {
            id,
            occurred_at,
            lines,
            total,
        }
    }

    pub fn id(&self) -> SaleId {
        self.id
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn lines(&self) -> &[SaleLine] {
        &self.lines
    }

    pub fn total(&self) -> Money {
        self.total
    }

    /// Total number of units sold.
    pub fn units(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }
}

/// Append-only sale persistence.
pub trait SaleLedger {
    fn append(&mut self, sale: Sale) -> DomainResult<()>;

    /// Recorded sales, oldest first.
    fn sales(&self) -> Vec<Sale>;
}

impl<L> SaleLedger for Box<L>
where
    L: SaleLedger + ?Sized,
{
    fn append(&mut self, sale: Sale) -> DomainResult<()> {
        (**self).append(sale)
    }

    fn sales(&self) -> Vec<Sale> {
        (**self).sales()
    }
}

/// In-memory ledger for tests/dev, and the working state behind file stores.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    sales: Vec<Sale>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_sales(sales: Vec<Sale>) -> Self {
        Self { sales }
    }

    pub fn len(&self) -> usize {
        self.sales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }
}

impl SaleLedger for InMemoryLedger {
    fn append(&mut self, sale: Sale) -> DomainResult<()> {
        self.sales.push(sale);
        Ok(())
    }

    fn sales(&self) -> Vec<Sale> {
        self.sales.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: u64, qty: u32, cents: u64) -> SaleLine {
        let unit_price = Money::from_cents(cents);
        SaleLine {
            product_id: ProductId::new(id),
            name: format!("item-{id}"),
            quantity: qty,
            unit_price,
            line_total: unit_price.saturating_mul(qty),
        }
    }

    #[test]
    fn ledger_appends_in_order() {
        let mut ledger = InMemoryLedger::new();
        let first = Sale::new(SaleId::new(), Utc::now(), vec![line(1, 1, 100)], Money::from_cents(100));
        let second = Sale::new(SaleId::new(), Utc::now(), vec![line(2, 2, 50)], Money::from_cents(100));

        ledger.append(first.clone()).unwrap();
        ledger.append(second.clone()).unwrap();

        assert_eq!(ledger.sales(), vec![first, second]);
    }

    #[test]
    fn units_sums_line_quantities() {
        let sale = Sale::new(
            SaleId::new(),
            Utc::now(),
            vec![line(1, 3, 10), line(2, 4, 10)],
            Money::from_cents(70),
        );
        assert_eq!(sale.units(), 7);
    }

    #[test]
    fn sale_serializes_with_snapshots() {
        let sale = Sale::new(SaleId::new(), Utc::now(), vec![line(1, 5, 35000)], Money::from_cents(175000));
        let json = serde_json::to_value(&sale).unwrap();

        assert_eq!(json["lines"][0]["name"], "item-1");
        assert_eq!(json["lines"][0]["unit_price"], 35000);
        assert_eq!(json["total"], 175000);

        let back: Sale = serde_json::from_value(json).unwrap();
        assert_eq!(back, sale);
    }
}
