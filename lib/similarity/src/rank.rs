//! Candidate ranking under one metric.

use std::sync::Arc;

use shelfmatch_core::Product;

use crate::metrics::Metric;

/// One scored candidate in a ranking.
#[derive(Debug, Clone)]
pub struct RankedMatch {
    /// Similarity score in `[0.0, 1.0]`.
    pub score: f64,
    /// The candidate record from the other catalog.
    pub candidate: Arc<Product>,
}

impl RankedMatch {
    #[inline]
    pub fn name(&self) -> &str {
        self.candidate.name()
    }

    #[inline]
    pub fn url(&self) -> &str {
        self.candidate.url()
    }
}

/// Score every candidate against `product` under `metric` and sort the
/// result descending by score.
///
/// Equal scores are broken by ascending candidate name, then url - an
/// explicit deterministic secondary key, so repeated runs over the same
/// input produce identical sequences.
pub fn rank_candidates(
    product: &Product,
    candidates: &[Arc<Product>],
    metric: Metric,
) -> Vec<RankedMatch> {
    let mut ranking: Vec<RankedMatch> = candidates
        .iter()
        .map(|candidate| RankedMatch {
            score: metric.score(product, candidate),
            candidate: Arc::clone(candidate),
        })
        .collect();

    ranking.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name().cmp(b.name()))
            .then_with(|| a.url().cmp(b.url()))
    });

    ranking
}
