//! # shelfmatch Core
//!
//! Core library for the shelfmatch product matcher.
//!
//! This crate provides the fundamental data structures of the matching
//! pipeline:
//!
//! - [`Product`] - normalized product record with derived name tokens
//! - [`CatalogIndex`] - substring inverted index over one catalog
//! - [`candidates_for`] - candidate generation against another catalog
//!
//! ## Example
//!
//! ```rust
//! use shelfmatch_core::{candidates_for, Catalog, CatalogIndex, Product};
//!
//! let ours = Product::new("Jablka Gala 1kg", "http://a/1", 29.9, Catalog::A).unwrap();
//!
//! let theirs = vec![
//!     Product::new("Jablka Golden 1kg", "http://b/1", 27.9, Catalog::B).unwrap(),
//!     Product::new("Kuracie prsia", "http://b/2", 119.0, Catalog::B).unwrap(),
//! ];
//! let index = CatalogIndex::build(Catalog::B, theirs).unwrap();
//!
//! let candidates = candidates_for(&ours, &index);
//! assert_eq!(candidates.len(), 1);
//! ```

pub mod candidates;
pub mod error;
pub mod index;
pub mod product;

pub use candidates::candidates_for;
pub use error::{Error, Result};
pub use index::{is_index_token, CatalogIndex, MIN_TOKEN_CHARS};
pub use product::{tokenize, Catalog, Nutrition, Product, Quantity, FILE_KEY_MAX_LEN};
