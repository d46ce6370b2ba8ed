//! Catalog read/write boundary and its in-memory implementation.

use std::collections::BTreeMap;

use quickbasket_core::{DomainError, DomainResult, Entity, ProductId};

use crate::product::{Product, ProductDraft};

/// Read/write access to the product catalog.
///
/// Implementations own the catalog state; callers pass the store explicitly to
/// each operation.
pub trait Catalog {
    fn get(&self, id: ProductId) -> Option<Product>;

    /// All products, ordered by id.
    fn list(&self) -> Vec<Product>;

    /// Insert a new product under a fresh id.
    fn create(&mut self, draft: ProductDraft) -> DomainResult<Product>;

    /// Overwrite name/price/stock of an existing product.
    fn update(&mut self, id: ProductId, draft: ProductDraft) -> DomainResult<Product>;

    /// Remove a product, returning what was removed.
    fn delete(&mut self, id: ProductId) -> DomainResult<Product>;

    fn set_stock(&mut self, id: ProductId, stock: u32) -> DomainResult<()>;
}

impl<C> Catalog for Box<C>
where
    C: Catalog + ?Sized,
{
    fn get(&self, id: ProductId) -> Option<Product> {
        (**self).get(id)
    }

    fn list(&self) -> Vec<Product> {
        (**self).list()
    }

    fn create(&mut self, draft: ProductDraft) -> DomainResult<Product> {
        (**self).create(draft)
    }

    fn update(&mut self, id: ProductId, draft: ProductDraft) -> DomainResult<Product> {
        (**self).update(id, draft)
    }

    fn delete(&mut self, id: ProductId) -> DomainResult<Product> {
        (**self).delete(id)
    }

    fn set_stock(&mut self, id: ProductId, stock: u32) -> DomainResult<()> {
        (**self).set_stock(id, stock)
    }
}

/// In-memory catalog for tests/dev, and the working state behind file stores.
#[derive(Debug, Clone)]
pub struct InMemoryCatalog {
    products: BTreeMap<ProductId, Product>,
    next_id: ProductId,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self {
            products: BTreeMap::new(),
            next_id: ProductId::new(1),
        }
    }

    /// Rebuild from persisted state.
    ///
    /// `next_id` is raised past the largest existing id so ids are never
    /// reused, even if the persisted counter is stale. Fails when the largest
    /// id has no successor.
    pub fn from_parts(
        next_id: ProductId,
        products: impl IntoIterator<Item = Product>,
    ) -> DomainResult<Self> {
        let products: BTreeMap<_, _> = products.into_iter().map(|p| (p.id(), p)).collect();
        let floor = match products.keys().next_back() {
            Some(last) => last
                .checked_next()
                .ok_or_else(|| DomainError::validation(format!("product id {last} is out of range")))?,
            None => ProductId::new(1),
        };
        Ok(Self {
            products,
            next_id: next_id.max(floor),
        })
    }

    pub fn next_id(&self) -> ProductId {
        self.next_id
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    fn require_mut(&mut self, id: ProductId) -> DomainResult<&mut Product> {
        self.products
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found(format!("product {id}")))
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog for InMemoryCatalog {
    fn get(&self, id: ProductId) -> Option<Product> {
        self.products.get(&id).cloned()
    }

    fn list(&self) -> Vec<Product> {
        self.products.values().cloned().collect()
    }

    fn create(&mut self, draft: ProductDraft) -> DomainResult<Product> {
        let id = self.next_id;
        let next_id = id
            .checked_next()
            .ok_or_else(|| DomainError::storage("product ids exhausted"))?;
        let product = Product::new(id, draft);
        self.products.insert(id, product.clone());
        self.next_id = next_id;
        Ok(product)
    }

    fn update(&mut self, id: ProductId, draft: ProductDraft) -> DomainResult<Product> {
        let product = self.require_mut(id)?;
        product.apply_draft(draft);
        Ok(product.clone())
    }

    fn delete(&mut self, id: ProductId) -> DomainResult<Product> {
        self.products
            .remove(&id)
            .ok_or_else(|| DomainError::not_found(format!("product {id}")))
    }

    fn set_stock(&mut self, id: ProductId, stock: u32) -> DomainResult<()> {
        self.require_mut(id)?.set_stock(stock);
        Ok(())
    }
}
