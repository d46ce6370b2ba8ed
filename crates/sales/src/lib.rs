//! Sales domain module: cart, checkout and the sale ledger.
//!
//! Checkout is a read-check-write sequence against an explicit store: every
//! cart entry is validated against live stock before any stock is touched,
//! then decrements and the sale record are committed together.

pub mod cart;
pub mod checkout;
pub mod sale;
pub mod store;

pub use cart::{Cart, CartEntry, CartLine, CartSummary};
pub use checkout::{checkout, plan_checkout, CheckoutPlan, CheckoutStore, StockDecrement};
pub use sale::{InMemoryLedger, Sale, SaleLedger, SaleLine};
pub use store::MemoryStore;
