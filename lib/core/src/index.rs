use std::sync::Arc;

use ahash::AHashMap;

use crate::error::{Error, Result};
use crate::product::{Catalog, Product};

/// Minimum token length (in characters) for a token to be indexed.
///
/// Shorter tokens connect semantically unrelated products and would blow
/// up candidate sets, so they are excluded from the index and from
/// candidate generation alike.
pub const MIN_TOKEN_CHARS: usize = 3;

/// Returns true when `token` is long enough to participate in indexing
/// and candidate generation.
#[inline]
pub fn is_index_token(token: &str) -> bool {
    token.chars().count() >= MIN_TOKEN_CHARS
}

/// Substring inverted index over one catalog.
///
/// Maps every sufficiently long name token to the products whose
/// `name_tokens` contain it. Built once from a finalized record list and
/// read-only afterwards, so it can be shared across concurrent comparisons
/// without locking.
#[derive(Debug)]
pub struct CatalogIndex {
    catalog: Catalog,
    products: Vec<Arc<Product>>,
    // token -> slots into `products`; append order, one entry per product
    buckets: AHashMap<String, Vec<u32>>,
}

impl CatalogIndex {
    /// Build the index for `catalog`.
    ///
    /// Every record must actually carry the `catalog` tag claimed for the
    /// list; a mismatch is a fatal configuration error, not a recoverable
    /// condition.
    pub fn build(catalog: Catalog, products: Vec<Product>) -> Result<Self> {
        for product in &products {
            if product.catalog() != catalog {
                return Err(Error::CatalogMismatch {
                    name: product.name().to_string(),
                    expected: catalog,
                    actual: product.catalog(),
                });
            }
        }

        let products: Vec<Arc<Product>> = products.into_iter().map(Arc::new).collect();
        let mut buckets: AHashMap<String, Vec<u32>> = AHashMap::new();

        for (slot, product) in products.iter().enumerate() {
            for token in product.name_tokens() {
                if is_index_token(token) {
                    let bucket = buckets.entry(token.clone()).or_default();
                    // a token repeated within one name maps the product once
                    if bucket.last() != Some(&(slot as u32)) {
                        bucket.push(slot as u32);
                    }
                }
            }
        }

        Ok(Self {
            catalog,
            products,
            buckets,
        })
    }

    #[inline]
    pub fn catalog(&self) -> Catalog {
        self.catalog
    }

    /// Products in their original list order.
    #[inline]
    pub fn products(&self) -> &[Arc<Product>] {
        &self.products
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Number of distinct indexed tokens.
    #[inline]
    pub fn token_count(&self) -> usize {
        self.buckets.len()
    }

    /// Product slots whose names contain `token`; empty for unknown tokens.
    #[inline]
    pub fn lookup(&self, token: &str) -> &[u32] {
        self.buckets.get(token).map_or(&[], Vec::as_slice)
    }

    /// Product at a slot previously returned by [`Self::lookup`].
    #[inline]
    pub fn get(&self, slot: u32) -> &Arc<Product> {
        &self.products[slot as usize]
    }
}
