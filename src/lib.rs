//! shelfmatch - cross-store grocery product matcher.
//!
//! Three store catalogs are normalized into a common product shape,
//! indexed by name token, and compared pairwise: for each product of the
//! smaller catalog the engine finds candidate matches in the larger one
//! and ranks them under four name-similarity metrics. Rankings and
//! candidate statistics go to a pluggable result sink.
//!
//! The workspace is split by concern:
//! - [`shelfmatch_core`]: product model, tokenizer, catalog index and
//!   candidate generation
//! - [`shelfmatch_similarity`]: the four similarity metrics and ranking
//! - [`shelfmatch_engine`]: pair comparator, fork-join scheduler,
//!   result sinks
//!
//! This crate adds catalog ingestion from JSON dumps and the command
//! line binary.

pub mod ingest;

pub use shelfmatch_core::{
    candidates_for, tokenize, Catalog, CatalogIndex, Nutrition, Product, Quantity,
};
pub use shelfmatch_engine::{
    CancelFlag, CatalogPair, EngineConfig, EngineError, FsSink, MemorySink, PairSummary,
    ResultSink, Scheduler,
};
pub use shelfmatch_similarity::{rank_candidates, Metric, RankedMatch};

pub mod prelude {
    pub use crate::ingest::load_catalog;
    pub use shelfmatch_core::{Catalog, CatalogIndex, Product};
    pub use shelfmatch_engine::{EngineConfig, FsSink, MemorySink, ResultSink, Scheduler};
    pub use shelfmatch_similarity::Metric;
}
