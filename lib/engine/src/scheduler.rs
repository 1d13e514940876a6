//! Fork-join fan-out of the three catalog pair comparisons.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use shelfmatch_core::{Catalog, CatalogIndex, Product};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::comparator::{compare_catalog_pair, CatalogPair, PairSummary};
use crate::config::EngineConfig;
use crate::error::{ComparisonFailure, EngineError, Result};
use crate::sink::ResultSink;

/// Cooperative cancellation shared between the caller and the workers.
/// Workers poll it between products, so cancellation lands at a product
/// boundary rather than mid-ranking.
#[derive(Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Runs the full three-way catalog comparison: builds one index per
/// catalog, then compares the three pairs on blocking worker tasks and
/// waits for all of them before reporting.
pub struct Scheduler {
    config: EngineConfig,
    sink: Arc<dyn ResultSink>,
}

impl Scheduler {
    pub fn new(config: EngineConfig, sink: Arc<dyn ResultSink>) -> Self {
        Self { config, sink }
    }

    /// Compare all three catalog pairs, without external cancellation.
    pub async fn run(
        &self,
        catalog_a: Vec<Product>,
        catalog_b: Vec<Product>,
        catalog_c: Vec<Product>,
    ) -> Result<Vec<PairSummary>> {
        self.run_with_cancel(catalog_a, catalog_b, catalog_c, CancelFlag::new())
            .await
    }

    /// Compare all three catalog pairs, polling `cancel` between products.
    ///
    /// Index construction happens before the fan-out, so a record carrying
    /// the wrong catalog tag aborts the run before any worker starts. Each
    /// pair runs to completion even when a sibling fails; the failures are
    /// collected and returned together.
    pub async fn run_with_cancel(
        &self,
        catalog_a: Vec<Product>,
        catalog_b: Vec<Product>,
        catalog_c: Vec<Product>,
        cancel: CancelFlag,
    ) -> Result<Vec<PairSummary>> {
        let index_a = Arc::new(CatalogIndex::build(Catalog::A, catalog_a)?);
        let index_b = Arc::new(CatalogIndex::build(Catalog::B, catalog_b)?);
        let index_c = Arc::new(CatalogIndex::build(Catalog::C, catalog_c)?);
        info!(
            a = index_a.len(),
            b = index_b.len(),
            c = index_c.len(),
            "catalog indices built"
        );

        let pairs = [
            (Arc::clone(&index_a), Arc::clone(&index_b)),
            (Arc::clone(&index_a), Arc::clone(&index_c)),
            (index_b, index_c),
        ];

        let handles: Vec<(CatalogPair, JoinHandle<_>)> = pairs
            .into_iter()
            .map(|(first, second)| {
                let pair = CatalogPair::from_indices(&first, &second);
                let config = self.config.clone();
                let sink = Arc::clone(&self.sink);
                let cancel = cancel.clone();
                let handle = tokio::task::spawn_blocking(move || {
                    compare_catalog_pair(&first, &second, &config, sink.as_ref(), &cancel)
                });
                (pair, handle)
            })
            .collect();

        let mut summaries = Vec::with_capacity(handles.len());
        let mut failures = Vec::new();
        for (pair, handle) in handles {
            match handle.await {
                Ok(Ok(summary)) => summaries.push(summary),
                Ok(Err(err)) => {
                    error!(%pair, %err, "catalog comparison failed");
                    failures.push(ComparisonFailure {
                        pair,
                        error: Box::new(err),
                    });
                }
                Err(join_err) => {
                    error!(%pair, %join_err, "catalog comparison worker panicked");
                    failures.push(ComparisonFailure {
                        pair,
                        error: Box::new(EngineError::WorkerPanic {
                            pair,
                            message: join_err.to_string(),
                        }),
                    });
                }
            }
        }

        if failures.is_empty() {
            Ok(summaries)
        } else {
            Err(EngineError::Comparisons(failures))
        }
    }
}
