use serde::Deserialize;
use serde_json::{json, Value};

use quickbasket_core::{DomainResult, Entity, ProductId};
use quickbasket_products::{Product, ProductDraft};
use quickbasket_sales::{CartLine, CartSummary, Sale, SaleLine};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    /// Defaults to one unit.
    pub quantity: Option<i64>,
}

/// Form-style numeric field: clients may send `49.99` or `"49.99"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(serde_json::Number),
    Text(String),
}

impl NumberOrText {
    fn as_text(&self) -> String {
        match self {
            NumberOrText::Number(n) => n.to_string(),
            NumberOrText::Text(s) => s.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub name: Option<String>,
    pub price: Option<NumberOrText>,
    pub stock: Option<NumberOrText>,
}

impl ProductRequest {
    /// Validate into a draft; missing price/stock default to zero.
    pub fn into_draft(self) -> DomainResult<ProductDraft> {
        let field = |v: Option<NumberOrText>| v.map(|v| v.as_text()).unwrap_or_default();
        ProductDraft::parse(
            self.name.as_deref().unwrap_or_default(),
            &field(self.price),
            &field(self.stock),
        )
    }
}

// -------------------------
// Response mapping
// -------------------------

pub fn product_to_json(p: &Product) -> Value {
    json!({
        "id": p.id(),
        "name": p.name(),
        "price": p.price().to_string(),
        "stock": p.stock(),
    })
}

pub fn cart_line_to_json(l: &CartLine) -> Value {
    json!({
        "product_id": l.product_id,
        "name": l.name,
        "unit_price": l.unit_price.to_string(),
        "quantity": l.quantity,
        "line_total": l.line_total.to_string(),
    })
}

pub fn cart_to_json(summary: &CartSummary) -> Value {
    json!({
        "lines": summary.lines.iter().map(cart_line_to_json).collect::<Vec<_>>(),
        "total": summary.total.to_string(),
    })
}

pub fn sale_line_to_json(l: &SaleLine) -> Value {
    json!({
        "product_id": l.product_id,
        "name": l.name,
        "quantity": l.quantity,
        "unit_price": l.unit_price.to_string(),
        "line_total": l.line_total.to_string(),
    })
}

pub fn sale_to_json(s: &Sale) -> Value {
    json!({
        "id": s.id().to_string(),
        "occurred_at": s.occurred_at().to_rfc3339(),
        "lines": s.lines().iter().map(sale_line_to_json).collect::<Vec<_>>(),
        "total": s.total().to_string(),
    })
}
