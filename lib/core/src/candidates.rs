use std::sync::Arc;

use ahash::AHashSet;

use crate::index::{is_index_token, CatalogIndex};
use crate::product::Product;

/// Collect the match candidates for `product` from another catalog.
///
/// Unions the index buckets of the product's own qualifying tokens, so the
/// result contains every record of the other catalog sharing at least one
/// indexed token with `product` - and nothing else. The index is always
/// built over the *other* catalog, so the product itself can never appear
/// in its own candidate set.
///
/// Candidates are returned deduplicated, in the other catalog's insertion
/// order, which keeps repeated runs byte-identical.
///
/// A product with no qualifying tokens yields an empty set; that is a
/// valid degenerate input, not an error.
pub fn candidates_for(product: &Product, other: &CatalogIndex) -> Vec<Arc<Product>> {
    let mut slots: AHashSet<u32> = AHashSet::new();
    for token in product.name_tokens() {
        if is_index_token(token) {
            slots.extend(other.lookup(token));
        }
    }

    let mut slots: Vec<u32> = slots.into_iter().collect();
    slots.sort_unstable();
    slots.into_iter().map(|s| Arc::clone(other.get(s))).collect()
}
