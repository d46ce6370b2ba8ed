//! JSON-file backed store.
//!
//! The whole catalog and ledger are held in memory and the file is rewritten
//! after every mutation. Writes go to a sibling temp file which is then
//! renamed over the original, so a crash never leaves a half-written file.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use quickbasket_core::{DomainError, DomainResult, ProductId};
use quickbasket_products::{Catalog, InMemoryCatalog, Product, ProductDraft};
use quickbasket_sales::{CheckoutStore, InMemoryLedger, MemoryStore, Sale, SaleLedger, StockDecrement};

use super::seed::seed_catalog;

/// On-disk layout.
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    next_product_id: ProductId,
    #[serde(default)]
    products: Vec<Product>,
    #[serde(default)]
    sales: Vec<Sale>,
}

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    state: MemoryStore,
}

impl JsonFileStore {
    /// Load the store at `path`. A missing file yields an empty store; the
    /// file is created on the first mutation.
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let state = match fs::read_to_string(&path) {
            Ok(text) => {
                let snapshot: Snapshot = serde_json::from_str(&text)
                    .with_context(|| format!("malformed store file {}", path.display()))?;
                let catalog = InMemoryCatalog::from_parts(snapshot.next_product_id, snapshot.products)
                    .with_context(|| format!("invalid catalog in {}", path.display()))?;
                MemoryStore::from_parts(catalog, InMemoryLedger::from_sales(snapshot.sales))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => MemoryStore::new(),
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", path.display()));
            }
        };

        tracing::info!(
            path = %path.display(),
            products = state.catalog().len(),
            sales = state.ledger().len(),
            "store loaded"
        );
        Ok(Self { path, state })
    }

    /// Like [`JsonFileStore::open`], seeding the sample catalog when the store
    /// has no products and has never assigned an id.
    pub fn open_or_seed(path: impl Into<PathBuf>, seed: bool) -> anyhow::Result<Self> {
        let mut store = Self::open(path)?;
        let fresh = store.state.catalog().is_empty() && store.state.catalog().next_id() == ProductId::new(1);
        if seed && fresh {
            store
                .mutate(|state| seed_catalog(state))
                .context("failed to seed catalog")?;
            tracing::info!(path = %store.path.display(), "seeded sample catalog");
        }
        Ok(store)
    }

    fn save(&self) -> DomainResult<()> {
        let snapshot = Snapshot {
            next_product_id: self.state.catalog().next_id(),
            products: self.state.list(),
            sales: self.state.sales(),
        };
        let text = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| DomainError::storage(format!("encode store: {e}")))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, text)
            .and_then(|()| {
                fs::rename(&tmp, &self.path).inspect_err(|_| {
                    let _ = fs::remove_file(&tmp);
                })
            })
            .map_err(|e| {
                tracing::error!(path = %self.path.display(), error = %e, "store write failed");
                DomainError::storage(format!("write {}: {e}", self.path.display()))
            })?;

        tracing::debug!(path = %self.path.display(), "store saved");
        Ok(())
    }

    /// Apply a mutation and persist it. If the mutation or the write fails,
    /// the in-memory state is restored and the error returned.
    fn mutate<T>(&mut self, f: impl FnOnce(&mut MemoryStore) -> DomainResult<T>) -> DomainResult<T> {
        let backup = self.state.clone();
        match f(&mut self.state).and_then(|out| self.save().map(|()| out)) {
            Ok(out) => Ok(out),
            Err(e) => {
                self.state = backup;
                Err(e)
            }
        }
    }
}

impl Catalog for JsonFileStore {
    fn get(&self, id: ProductId) -> Option<Product> {
        self.state.get(id)
    }

    fn list(&self) -> Vec<Product> {
        self.state.list()
    }

    fn create(&mut self, draft: ProductDraft) -> DomainResult<Product> {
        self.mutate(|s| s.create(draft))
    }

    fn update(&mut self, id: ProductId, draft: ProductDraft) -> DomainResult<Product> {
        self.mutate(|s| s.update(id, draft))
    }

    fn delete(&mut self, id: ProductId) -> DomainResult<Product> {
        self.mutate(|s| s.delete(id))
    }

    fn set_stock(&mut self, id: ProductId, stock: u32) -> DomainResult<()> {
        self.mutate(|s| s.set_stock(id, stock))
    }
}

impl SaleLedger for JsonFileStore {
    fn append(&mut self, sale: Sale) -> DomainResult<()> {
        self.mutate(|s| s.append(sale))
    }

    fn sales(&self) -> Vec<Sale> {
        self.state.sales()
    }
}

impl CheckoutStore for JsonFileStore {
    /// Decrements and the sale are applied in memory, then written once.
    fn commit_checkout(&mut self, decrements: &[StockDecrement], sale: Sale) -> DomainResult<()> {
        self.mutate(|s| s.commit_checkout(decrements, sale))
    }
}
