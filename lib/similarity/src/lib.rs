//! # shelfmatch Similarity
//!
//! The four independent name-similarity metrics of the shelfmatch product
//! matcher, plus candidate ranking.
//!
//! Each metric is a pure function over a (product, candidate) pair and
//! yields a score in `[0.0, 1.0]`:
//!
//! - [`metrics::substring_overlap`] - shared whole-token ratio
//! - [`metrics::prefix_ratio`] - common-prefix ratio
//! - [`metrics::lcs_ratio`] - longest-common-subsequence ratio
//! - [`metrics::edit_distance_ratio`] - length-adjusted edit-distance ratio
//!
//! ## Example
//!
//! ```rust
//! use shelfmatch_core::{Catalog, Product};
//! use shelfmatch_similarity::{rank_candidates, Metric};
//! use std::sync::Arc;
//!
//! let ours = Product::new("Jablka Gala 1kg", "http://a/1", 29.9, Catalog::A).unwrap();
//! let pool = vec![
//!     Arc::new(Product::new("Jablka Gala 1 kg", "http://b/1", 27.9, Catalog::B).unwrap()),
//!     Arc::new(Product::new("Jablka Golden 1kg", "http://b/2", 24.9, Catalog::B).unwrap()),
//! ];
//!
//! let ranking = rank_candidates(&ours, &pool, Metric::Prefix);
//! assert_eq!(ranking[0].name(), "Jablka Gala 1 kg");
//! ```

pub mod metrics;
pub mod rank;

pub use metrics::{
    edit_distance, edit_distance_ratio, lcs_length, lcs_ratio, length_adjusted_edit_distance,
    prefix_ratio, substring_overlap, Metric,
};
pub use rank::{rank_candidates, RankedMatch};
