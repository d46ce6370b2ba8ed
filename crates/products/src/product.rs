use serde::{Deserialize, Serialize};

use quickbasket_core::{DomainError, DomainResult, Entity, Money, ProductId};

/// Validated admin input for creating or updating a product.
///
/// Construction enforces the admin rules, so every store receiving a draft can
/// trust it: the name is non-blank (trimmed), price and stock are non-negative
/// by type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    name: String,
    price: Money,
    stock: u32,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, price: Money, stock: u32) -> DomainResult<Self> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::required("name"));
        }
        Ok(Self {
            name: name.to_string(),
            price,
            stock,
        })
    }

    /// Build a draft from raw text fields (form or prompt input).
    ///
    /// Blank price or stock default to zero. Negative or malformed numbers are
    /// rejected rather than clamped.
    pub fn parse(name: &str, price: &str, stock: &str) -> DomainResult<Self> {
        if name.trim().is_empty() {
            return Err(DomainError::required("name"));
        }

        let price = match price.trim() {
            "" => Money::ZERO,
            text => text.parse::<Money>()?,
        };

        let stock = match stock.trim() {
            "" => 0,
            text if text.starts_with('-') => {
                return Err(DomainError::validation("stock must not be negative"));
            }
            text => text
                .parse::<u32>()
                .map_err(|_| DomainError::validation(format!("invalid stock: {text:?}")))?,
        };

        Self::new(name, price, stock)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }
}

/// A purchasable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Money,
    stock: u32,
}

impl Product {
    pub fn new(id: ProductId, draft: ProductDraft) -> Self {
        Self {
            id,
            name: draft.name,
            price: draft.price,
            stock: draft.stock,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    /// Whether `qty` units can be taken from current stock.
    pub fn has_stock_for(&self, qty: u32) -> bool {
        self.stock >= qty
    }

    /// Overwrite name/price/stock from an admin draft, keeping the id.
    pub fn apply_draft(&mut self, draft: ProductDraft) {
        self.name = draft.name;
        self.price = draft.price;
        self.stock = draft.stock;
    }

    pub fn set_stock(&mut self, stock: u32) {
        self.stock = stock;
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> ProductId {
        self.id
    }
}
