//! Catalog and ledger composed into one in-process checkout store.

use quickbasket_core::{DomainResult, ProductId};
use quickbasket_products::{Catalog, InMemoryCatalog, Product, ProductDraft};

use crate::checkout::CheckoutStore;
use crate::sale::{InMemoryLedger, Sale, SaleLedger};

/// Catalog and ledger held together in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    catalog: InMemoryCatalog,
    ledger: InMemoryLedger,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(catalog: InMemoryCatalog, ledger: InMemoryLedger) -> Self {
        Self { catalog, ledger }
    }

    pub fn catalog(&self) -> &InMemoryCatalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &InMemoryLedger {
        &self.ledger
    }
}

impl Catalog for MemoryStore {
    fn get(&self, id: ProductId) -> Option<Product> {
        self.catalog.get(id)
    }

    fn list(&self) -> Vec<Product> {
        self.catalog.list()
    }

    fn create(&mut self, draft: ProductDraft) -> DomainResult<Product> {
        self.catalog.create(draft)
    }

    fn update(&mut self, id: ProductId, draft: ProductDraft) -> DomainResult<Product> {
        self.catalog.update(id, draft)
    }

    fn delete(&mut self, id: ProductId) -> DomainResult<Product> {
        self.catalog.delete(id)
    }

    fn set_stock(&mut self, id: ProductId, stock: u32) -> DomainResult<()> {
        self.catalog.set_stock(id, stock)
    }
}

impl SaleLedger for MemoryStore {
    fn append(&mut self, sale: Sale) -> DomainResult<()> {
        self.ledger.append(sale)
    }

    fn sales(&self) -> Vec<Sale> {
        self.ledger.sales()
    }
}

impl CheckoutStore for MemoryStore {}
