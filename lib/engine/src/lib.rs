//! Matching engine: pairwise catalog comparison and its fork-join
//! scheduling.
//!
//! The engine takes three normalized product catalogs, builds one
//! substring index per catalog, and compares the three catalog pairs in
//! parallel. Each comparison iterates the smaller catalog, generates
//! candidates from the larger one's index, ranks them under every
//! similarity metric, and hands the rankings to a [`ResultSink`].
//!
//! ```no_run
//! use std::sync::Arc;
//! use shelfmatch_engine::{EngineConfig, MemorySink, Scheduler};
//!
//! # async fn run(a: Vec<shelfmatch_core::Product>, b: Vec<shelfmatch_core::Product>, c: Vec<shelfmatch_core::Product>) -> shelfmatch_engine::Result<()> {
//! let sink = Arc::new(MemorySink::new());
//! let scheduler = Scheduler::new(EngineConfig::default(), sink.clone());
//! let summaries = scheduler.run(a, b, c).await?;
//! # Ok(())
//! # }
//! ```

pub mod comparator;
pub mod config;
pub mod error;
pub mod scheduler;
pub mod sink;
pub mod stats;

pub use comparator::{compare_catalog_pair, CatalogPair, PairSummary};
pub use config::{EngineConfig, DEFAULT_LIMIT};
pub use error::{ComparisonFailure, EngineError, Result};
pub use scheduler::{CancelFlag, Scheduler};
pub use sink::{FsSink, MemorySink, ResultSink};
pub use stats::CandidateStats;
