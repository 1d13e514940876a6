use thiserror::Error;

use crate::comparator::CatalogPair;

pub type Result<T> = std::result::Result<T, EngineError>;

/// One failed catalog-pair comparison, kept alongside the failures of the
/// other pairs instead of being discarded.
#[derive(Debug)]
pub struct ComparisonFailure {
    pub pair: CatalogPair,
    pub error: Box<EngineError>,
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Core(#[from] shelfmatch_core::Error),

    #[error("comparison {pair} was cancelled")]
    Cancelled { pair: CatalogPair },

    #[error("worker for comparison {pair} panicked: {message}")]
    WorkerPanic { pair: CatalogPair, message: String },

    #[error("result sink failed for comparison {pair}: {source}")]
    Sink {
        pair: CatalogPair,
        #[source]
        source: std::io::Error,
    },

    /// Aggregate of everything that went wrong across the three scheduled
    /// comparisons; raised only after all of them have been awaited.
    #[error("{}", describe_failures(.0))]
    Comparisons(Vec<ComparisonFailure>),
}

fn describe_failures(failures: &[ComparisonFailure]) -> String {
    let details: Vec<String> = failures
        .iter()
        .map(|f| format!("{}: {}", f.pair, f.error))
        .collect();
    format!(
        "{} catalog comparison(s) failed: {}",
        failures.len(),
        details.join("; ")
    )
}
