//! Products domain module.
//!
//! This crate contains the catalog's business rules, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage engine), plus the
//! `Catalog` read/write boundary that stores implement.

pub mod catalog;
pub mod product;

pub use catalog::{Catalog, InMemoryCatalog};
pub use product::{Product, ProductDraft};
