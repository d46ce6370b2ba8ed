//! Store implementations and wiring shared by the web and CLI front ends.

pub mod json_file;
pub mod seed;

use std::path::Path;

use anyhow::Context;

use quickbasket_sales::{CheckoutStore, MemoryStore};

pub use json_file::JsonFileStore;
pub use seed::{seed_catalog, SEED_PRODUCTS};

/// Object-safe store handle: catalog + ledger + checkout commit.
pub trait Store: CheckoutStore + Send {}

impl<S> Store for S where S: CheckoutStore + Send {}

/// Open the configured store.
///
/// With a path, the JSON file store is used (created on first save). Without
/// one, state lives in memory for the life of the process. Fresh stores are
/// seeded with the sample catalog when `seed` is set.
pub fn open_store(data_file: Option<&Path>, seed: bool) -> anyhow::Result<Box<dyn Store>> {
    match data_file {
        Some(path) => {
            let store = JsonFileStore::open_or_seed(path, seed)
                .with_context(|| format!("failed to open store at {}", path.display()))?;
            Ok(Box::new(store))
        }
        None => {
            let mut store = MemoryStore::new();
            if seed {
                seed_catalog(&mut store).context("failed to seed in-memory catalog")?;
            }
            tracing::info!(products = store.catalog().len(), "using in-memory store");
            Ok(Box::new(store))
        }
    }
}
