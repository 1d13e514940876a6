//! Pairwise catalog comparison - the per-pair batch transform.

use std::sync::Arc;

use serde::Serialize;
use shelfmatch_core::{candidates_for, Catalog, CatalogIndex, Product};
use shelfmatch_similarity::{rank_candidates, Metric};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::scheduler::CancelFlag;
use crate::sink::ResultSink;
use crate::stats::CandidateStats;

/// Identifier of one ordered catalog pair, smaller catalog first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CatalogPair {
    pub smaller: Catalog,
    pub larger: Catalog,
}

impl CatalogPair {
    #[inline]
    #[must_use]
    pub fn new(smaller: Catalog, larger: Catalog) -> Self {
        Self { smaller, larger }
    }

    /// Pair identifier for two built indices, picking the smaller side by
    /// record count with ties broken by the fixed catalog ordering.
    pub fn from_indices(first: &CatalogIndex, second: &CatalogIndex) -> Self {
        let (smaller, larger) = order_by_size(first, second);
        Self::new(smaller.catalog(), larger.catalog())
    }
}

impl std::fmt::Display for CatalogPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_to_{}", self.smaller, self.larger)
    }
}

/// Order two indices as (smaller, larger) by record count; equal counts
/// fall back to the catalog tag ordering so the choice is deterministic.
pub fn order_by_size<'a>(
    first: &'a CatalogIndex,
    second: &'a CatalogIndex,
) -> (&'a CatalogIndex, &'a CatalogIndex) {
    let first_is_smaller = first.len() < second.len()
        || (first.len() == second.len() && first.catalog() < second.catalog());
    if first_is_smaller {
        (first, second)
    } else {
        (second, first)
    }
}

/// What one pair comparison did, reported back by the scheduler.
#[derive(Debug, Clone)]
pub struct PairSummary {
    pub pair: CatalogPair,
    pub smaller_len: usize,
    pub larger_len: usize,
    /// Products of the smaller catalog actually scored (capped by the
    /// configured limit).
    pub products_scored: usize,
    /// Candidates found across the whole smaller catalog.
    pub total_candidates: usize,
}

/// Compare one catalog pair.
///
/// Candidate sets are generated for every product of the smaller catalog
/// (feeding the candidate statistics), then up to `config.limit` products
/// are scored under all four metrics, each ranking handed to the sink.
///
/// Purely sequential within the pair; the fan-out across the three pairs
/// happens one level up in the scheduler.
pub fn compare_catalog_pair(
    first: &CatalogIndex,
    second: &CatalogIndex,
    config: &EngineConfig,
    sink: &dyn ResultSink,
    cancel: &CancelFlag,
) -> Result<PairSummary, EngineError> {
    let (smaller, larger) = order_by_size(first, second);
    let pair = CatalogPair::new(smaller.catalog(), larger.catalog());

    debug!(%pair, smaller = smaller.len(), larger = larger.len(), "comparing catalog pair");

    let mut stats = CandidateStats::new(smaller.len(), larger.len());
    let mut with_candidates: Vec<(&Arc<Product>, Vec<Arc<Product>>)> =
        Vec::with_capacity(smaller.len());

    for product in smaller.products() {
        let candidates = candidates_for(product, larger);
        stats.record(candidates.len());
        with_candidates.push((product, candidates));
    }

    sink.write_candidate_stats(pair, &stats)
        .map_err(|source| EngineError::Sink { pair, source })?;
    info!(
        %pair,
        products = stats.products_counted(),
        candidates = stats.total_candidates(),
        avg = format!("{:.2}", stats.average_per_product()),
        retained = format!("{:.2}%", stats.retained_share() * 100.0),
        "candidate generation finished"
    );

    let capped = config.limit.min(with_candidates.len());
    for (product, candidates) in &with_candidates[..capped] {
        if cancel.is_cancelled() {
            return Err(EngineError::Cancelled { pair });
        }
        for metric in Metric::ALL {
            let ranking = rank_candidates(product, candidates, metric);
            sink.write_ranking(pair, metric, product, &ranking)
                .map_err(|source| EngineError::Sink { pair, source })?;
        }
    }

    info!(%pair, scored = capped, "catalog pair comparison finished");

    Ok(PairSummary {
        pair,
        smaller_len: smaller.len(),
        larger_len: larger.len(),
        products_scored: capped,
        total_candidates: stats.total_candidates(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    fn catalog(names: &[&str], tag: Catalog) -> Vec<Product> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| Product::new(*n, format!("http://{tag}/{i}"), 10.0, tag).unwrap())
            .collect()
    }

    fn index(names: &[&str], tag: Catalog) -> CatalogIndex {
        CatalogIndex::build(tag, catalog(names, tag)).unwrap()
    }

    #[test]
    fn smaller_catalog_drives_the_comparison() {
        let small = index(&["Jablka Gala", "Mleko"], Catalog::B);
        let large = index(&["Jablka Golden", "Mleko plnotucne", "Chleb zitny"], Catalog::A);
        let sink = MemorySink::new();

        // argument order must not matter
        let summary = compare_catalog_pair(
            &large,
            &small,
            &EngineConfig::default(),
            &sink,
            &CancelFlag::default(),
        )
        .unwrap();

        assert_eq!(summary.pair, CatalogPair::new(Catalog::B, Catalog::A));
        assert_eq!(summary.smaller_len, 2);
        assert_eq!(summary.larger_len, 3);
        assert_eq!(summary.products_scored, 2);
        // 2 products x 4 metrics
        assert_eq!(sink.ranking_count(), 8);
    }

    #[test]
    fn equal_sizes_break_ties_by_catalog_order() {
        let a = index(&["Jablka"], Catalog::A);
        let c = index(&["Jablka Gala"], Catalog::C);
        let sink = MemorySink::new();

        let summary = compare_catalog_pair(
            &c,
            &a,
            &EngineConfig::default(),
            &sink,
            &CancelFlag::default(),
        )
        .unwrap();
        assert_eq!(summary.pair, CatalogPair::new(Catalog::A, Catalog::C));
    }

    #[test]
    fn limit_caps_scored_products_but_not_stats() {
        let small = index(&["Jablka a", "Jablka b", "Jablka c"], Catalog::A);
        let large = index(&["Jablka x", "Jablka y", "Jablka z", "Jablka w"], Catalog::B);
        let sink = MemorySink::new();

        let summary = compare_catalog_pair(
            &small,
            &large,
            &EngineConfig::default().with_limit(1),
            &sink,
            &CancelFlag::default(),
        )
        .unwrap();

        assert_eq!(summary.products_scored, 1);
        assert_eq!(sink.ranking_count(), 4);
        // stats still cover the whole smaller catalog
        let stats = sink.candidate_stats(summary.pair).unwrap();
        assert_eq!(stats.products_counted(), 3);
    }

    #[test]
    fn empty_catalog_becomes_the_driven_side_and_yields_nothing() {
        let small = index(&["Jablka Gala"], Catalog::A);
        let large = CatalogIndex::build(Catalog::B, Vec::new()).unwrap();
        let sink = MemorySink::new();

        let summary = compare_catalog_pair(
            &small,
            &large,
            &EngineConfig::default(),
            &sink,
            &CancelFlag::default(),
        )
        .unwrap();

        // smaller side is the empty catalog: nothing to score at all
        assert_eq!(summary.pair, CatalogPair::new(Catalog::B, Catalog::A));
        assert_eq!(summary.products_scored, 0);
        assert_eq!(sink.ranking_count(), 0);
    }

    #[test]
    fn product_without_candidates_still_gets_empty_rankings() {
        let small = index(&["Mleko"], Catalog::A);
        let large = index(&["Kuracie prsia", "Chleb zitny"], Catalog::B);
        let sink = MemorySink::new();

        let summary = compare_catalog_pair(
            &small,
            &large,
            &EngineConfig::default(),
            &sink,
            &CancelFlag::default(),
        )
        .unwrap();

        for metric in Metric::ALL {
            let rows = sink.ranking(summary.pair, metric, "Mleko").unwrap();
            assert!(rows.is_empty());
        }
    }

    #[test]
    fn cancelled_comparison_reports_its_pair() {
        let small = index(&["Jablka"], Catalog::A);
        let large = index(&["Jablka Gala"], Catalog::B);
        let cancel = CancelFlag::default();
        cancel.cancel();

        let result = compare_catalog_pair(
            &small,
            &large,
            &EngineConfig::default(),
            &MemorySink::new(),
            &cancel,
        );
        assert!(matches!(result, Err(EngineError::Cancelled { .. })));
    }

    #[test]
    fn repeated_runs_are_identical() {
        let small = index(&["Mleko polotucne 1l", "Jablka Gala 1kg"], Catalog::A);
        let large = index(
            &[
                "Mleko plnotucne 1l",
                "Mleko polotucne trvanlive",
                "Jablka Golden 1kg",
                "Gala jablko",
            ],
            Catalog::B,
        );

        let run = || {
            let sink = MemorySink::new();
            let summary = compare_catalog_pair(
                &small,
                &large,
                &EngineConfig::default(),
                &sink,
                &CancelFlag::default(),
            )
            .unwrap();
            let mut out = Vec::new();
            for metric in Metric::ALL {
                for name in ["Mleko polotucne 1l", "Jablka Gala 1kg"] {
                    out.push(sink.ranking(summary.pair, metric, name).unwrap());
                }
            }
            out
        };

        assert_eq!(run(), run());
    }
}
