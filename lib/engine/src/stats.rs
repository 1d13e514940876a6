//! Candidate-set statistics for one catalog-pair comparison.

use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Frequency view of how many candidates the generator found per product
/// of the smaller catalog, plus how far that narrowed the full n*m
/// cross-product space.
#[derive(Debug, Clone, Default)]
pub struct CandidateStats {
    smaller_len: usize,
    larger_len: usize,
    // candidate-set size -> number of products with a set of that size
    frequencies: BTreeMap<usize, usize>,
    total_candidates: usize,
}

impl CandidateStats {
    pub fn new(smaller_len: usize, larger_len: usize) -> Self {
        Self {
            smaller_len,
            larger_len,
            frequencies: BTreeMap::new(),
            total_candidates: 0,
        }
    }

    /// Record one product's candidate-set size.
    pub fn record(&mut self, candidate_count: usize) {
        *self.frequencies.entry(candidate_count).or_insert(0) += 1;
        self.total_candidates += candidate_count;
    }

    #[inline]
    pub fn smaller_len(&self) -> usize {
        self.smaller_len
    }

    #[inline]
    pub fn larger_len(&self) -> usize {
        self.larger_len
    }

    #[inline]
    pub fn total_candidates(&self) -> usize {
        self.total_candidates
    }

    /// Number of products recorded so far.
    pub fn products_counted(&self) -> usize {
        self.frequencies.values().sum()
    }

    pub fn average_per_product(&self) -> f64 {
        let products = self.products_counted();
        if products == 0 {
            0.0
        } else {
            self.total_candidates as f64 / products as f64
        }
    }

    /// Fraction of the full cross-product space the generator retained.
    pub fn retained_share(&self) -> f64 {
        let all_pairs = self.smaller_len * self.larger_len;
        if all_pairs == 0 {
            0.0
        } else {
            self.total_candidates as f64 / all_pairs as f64
        }
    }

    /// Human-readable report, written by the file sink next to the
    /// rankings.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Candidate set size : frequency");
        for (size, count) in &self.frequencies {
            let _ = writeln!(out, "{size} : {count}");
        }
        let _ = writeln!(
            out,
            "Products in smaller catalog: {} (recorded {})",
            self.smaller_len,
            self.products_counted()
        );
        let _ = writeln!(out, "Sum of all candidates: {}", self.total_candidates);
        let _ = writeln!(
            out,
            "Average candidates per product: {:.2}",
            self.average_per_product()
        );
        let _ = writeln!(
            out,
            "Full cross-product space: {} pairs, narrowed to {} ({:.2} %)",
            self.smaller_len * self.larger_len,
            self.total_candidates,
            self.retained_share() * 100.0
        );
        out
    }
}
