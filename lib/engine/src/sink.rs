//! Result sinks - where rankings go once computed.
//!
//! The comparator never constructs file paths itself; it hands every
//! finished ranking to a [`ResultSink`] injected at construction. The two
//! implementations here cover the binary (files on disk) and the tests
//! (in-memory maps); anything else - a database, a channel - only has to
//! implement the trait.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ahash::AHashMap;
use parking_lot::Mutex;
use shelfmatch_core::Product;
use shelfmatch_similarity::{Metric, RankedMatch};

use crate::comparator::CatalogPair;
use crate::stats::CandidateStats;

/// Destination for per-product rankings and per-pair candidate statistics.
///
/// Implementations must be shareable across the three concurrent
/// comparison workers; each worker writes to disjoint (pair, metric,
/// product) keys.
pub trait ResultSink: Send + Sync {
    /// Accept one ranked sequence for `product` under `metric`.
    fn write_ranking(
        &self,
        pair: CatalogPair,
        metric: Metric,
        product: &Product,
        ranking: &[RankedMatch],
    ) -> io::Result<()>;

    /// Accept the candidate statistics of one pair comparison.
    fn write_candidate_stats(&self, pair: CatalogPair, stats: &CandidateStats) -> io::Result<()>;
}

type RankingKey = (CatalogPair, Metric, String);
type RankingRows = Vec<(f64, String, String)>;

/// Sink that keeps everything in memory; used by tests and by callers
/// that post-process rankings instead of persisting them.
#[derive(Default)]
pub struct MemorySink {
    rankings: Mutex<AHashMap<RankingKey, RankingRows>>,
    stats: Mutex<AHashMap<CatalogPair, CandidateStats>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ranking stored for (pair, metric, product name), if any.
    pub fn ranking(&self, pair: CatalogPair, metric: Metric, product: &str) -> Option<RankingRows> {
        self.rankings
            .lock()
            .get(&(pair, metric, product.to_string()))
            .cloned()
    }

    /// Total number of stored rankings.
    pub fn ranking_count(&self) -> usize {
        self.rankings.lock().len()
    }

    pub fn candidate_stats(&self, pair: CatalogPair) -> Option<CandidateStats> {
        self.stats.lock().get(&pair).cloned()
    }
}

impl ResultSink for MemorySink {
    fn write_ranking(
        &self,
        pair: CatalogPair,
        metric: Metric,
        product: &Product,
        ranking: &[RankedMatch],
    ) -> io::Result<()> {
        let rows = ranking
            .iter()
            .map(|r| (r.score, r.name().to_string(), r.url().to_string()))
            .collect();
        self.rankings
            .lock()
            .insert((pair, metric, product.name().to_string()), rows);
        Ok(())
    }

    fn write_candidate_stats(&self, pair: CatalogPair, stats: &CandidateStats) -> io::Result<()> {
        self.stats.lock().insert(pair, stats.clone());
        Ok(())
    }
}

/// Sink that writes one text file per (product, metric) under
/// `<root>/<pair>/<metric>/`, named by the product's file key.
pub struct FsSink {
    root: PathBuf,
}

impl FsSink {
    /// Create the sink, making sure the output root exists and removing
    /// any `.txt` artifacts a previous run left under it. Rankings use
    /// collision-suffixed file names, so stale files would otherwise shunt
    /// fresh output into `<key>_2.txt` and mix the two runs.
    pub fn new(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        remove_stale_outputs(&root)?;
        Ok(Self { root })
    }

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// First non-existing `<key>.txt`, `<key>_2.txt`, ... in `dir`.
    ///
    /// Distinct products can normalize to the same file key, so collisions
    /// get a deterministic counter suffix rather than a random one.
    fn unique_path(dir: &Path, key: &str) -> PathBuf {
        let first = dir.join(format!("{key}.txt"));
        if !first.exists() {
            return first;
        }
        let mut n = 2u32;
        loop {
            let path = dir.join(format!("{key}_{n}.txt"));
            if !path.exists() {
                return path;
            }
            n += 1;
        }
    }
}

/// Delete every `.txt` file under `dir`, recursively. Directory structure
/// is kept; only the artifacts themselves go.
fn remove_stale_outputs(dir: &Path) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            remove_stale_outputs(&path)?;
        } else if path.extension().is_some_and(|ext| ext == "txt") {
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}

impl ResultSink for FsSink {
    fn write_ranking(
        &self,
        pair: CatalogPair,
        metric: Metric,
        product: &Product,
        ranking: &[RankedMatch],
    ) -> io::Result<()> {
        let dir = self.root.join(pair.to_string()).join(metric.name());
        fs::create_dir_all(&dir)?;

        let mut out = String::new();
        out.push_str(&format!(
            "Ranked candidates of {}, to be found at url: {}\n",
            product.name(),
            product.url()
        ));
        for entry in ranking {
            out.push_str(&format!(
                "{:.4}\t{}\t{}\n",
                entry.score,
                entry.name(),
                entry.url()
            ));
        }

        fs::write(Self::unique_path(&dir, product.file_key()), out)
    }

    fn write_candidate_stats(&self, pair: CatalogPair, stats: &CandidateStats) -> io::Result<()> {
        let path = self.root.join(format!("candidate_stats_{pair}.txt"));
        fs::write(path, stats.summary())
    }
}
