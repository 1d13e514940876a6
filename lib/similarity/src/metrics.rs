//! The four name-similarity metrics.
//!
//! All scoring functions share one contract: pure, deterministic, no side
//! effects, inputs never mutated, and a score in `[0.0, 1.0]` for every
//! pair the candidate generator can produce. Contract violations fail
//! loudly instead of being clamped - they signal a defect in the pipeline,
//! not bad input data.

use serde::{Deserialize, Serialize};
use shelfmatch_core::Product;

/// One of the four independent similarity metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Shared-token ratio over the deduplicated token sets.
    SubstringOverlap,
    /// Common-prefix length over the shorter name.
    Prefix,
    /// Longest-common-subsequence length over the shorter stripped name.
    CommonSubsequence,
    /// Length-adjusted Levenshtein distance over the shorter stripped name.
    EditDistance,
}

impl Metric {
    /// All metrics, in the order they are reported.
    pub const ALL: [Metric; 4] = [
        Metric::SubstringOverlap,
        Metric::Prefix,
        Metric::CommonSubsequence,
        Metric::EditDistance,
    ];

    /// Stable identifier, used for sink keys and output directories.
    pub fn name(self) -> &'static str {
        match self {
            Metric::SubstringOverlap => "substring_overlap",
            Metric::Prefix => "prefix",
            Metric::CommonSubsequence => "common_subsequence",
            Metric::EditDistance => "edit_distance",
        }
    }

    /// Score a (product, candidate) pair under this metric.
    pub fn score(self, product: &Product, candidate: &Product) -> f64 {
        match self {
            Metric::SubstringOverlap => substring_overlap(product, candidate),
            Metric::Prefix => prefix_ratio(product, candidate),
            Metric::CommonSubsequence => lcs_ratio(product, candidate),
            Metric::EditDistance => edit_distance_ratio(product, candidate),
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Shared-token ratio: `|S ∩ C| / min(|S|, |C|)` over deduplicated token
/// sets.
///
/// Contract: the two products must share at least one token. The candidate
/// generator guarantees this for every pair it emits; this function is not
/// a general-purpose utility and does not re-validate the precondition
/// beyond the final assert.
pub fn substring_overlap(product: &Product, candidate: &Product) -> f64 {
    let ours: ahash::AHashSet<&str> = product.name_tokens().iter().map(String::as_str).collect();
    let theirs: ahash::AHashSet<&str> =
        candidate.name_tokens().iter().map(String::as_str).collect();

    let shared = ours.intersection(&theirs).count();
    assert!(
        shared > 0,
        "substring overlap invoked on a token-disjoint pair ({:?} / {:?}); \
         only candidate-generator output may be scored here",
        product.name(),
        candidate.name(),
    );

    shared as f64 / ours.len().min(theirs.len()) as f64
}

/// Common-prefix ratio over the lower-cased names (whitespace kept).
pub fn prefix_ratio(product: &Product, candidate: &Product) -> f64 {
    let ours: Vec<char> = product.name().to_lowercase().chars().collect();
    let theirs: Vec<char> = candidate.name().to_lowercase().chars().collect();
    assert!(
        !ours.is_empty() && !theirs.is_empty(),
        "empty product name reached the prefix metric"
    );

    let prefix = ours
        .iter()
        .zip(theirs.iter())
        .take_while(|(a, b)| a == b)
        .count();

    prefix as f64 / ours.len().min(theirs.len()) as f64
}

/// LCS ratio over the whitespace-stripped, lower-cased names.
pub fn lcs_ratio(product: &Product, candidate: &Product) -> f64 {
    let ours = squash(product.name());
    let theirs = squash(candidate.name());
    assert!(
        !ours.is_empty() && !theirs.is_empty(),
        "blank product name reached the common-subsequence metric"
    );

    let lcs = lcs_length(&ours, &theirs);
    lcs as f64 / ours.len().min(theirs.len()) as f64
}

/// Length-adjusted edit-distance ratio over the whitespace-stripped,
/// lower-cased names.
///
/// The raw Levenshtein distance is reduced by the absolute length
/// difference, since the length gap alone always costs at least that many
/// edits; without the adjustment pure length differences would be
/// penalized twice.
pub fn edit_distance_ratio(product: &Product, candidate: &Product) -> f64 {
    let ours = squash(product.name());
    let theirs = squash(candidate.name());
    assert!(
        !ours.is_empty() && !theirs.is_empty(),
        "blank product name reached the edit-distance metric"
    );

    let adjusted = length_adjusted_edit_distance(&ours, &theirs);
    // raw distance <= max length, so adjusted <= min length always holds
    let min_len = ours.len().min(theirs.len());

    (min_len - adjusted) as f64 / min_len as f64
}

/// Lower-case a name and drop all whitespace, as the LCS and edit-distance
/// metrics compare character sequences, not token boundaries.
fn squash(name: &str) -> Vec<char> {
    name.to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Longest-common-subsequence length via the standard O(n*m) dynamic
/// program, kept to two rolling rows.
pub fn lcs_length(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Levenshtein distance (unit insert/delete/substitute costs) via two
/// rolling rows.
pub fn edit_distance(a: &[char], b: &[char]) -> usize {
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (curr[j] + 1).min(prev[j + 1] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Edit distance minus the absolute length difference of the inputs.
///
/// The raw distance is always at least the length gap, so the result can
/// never be negative; if it ever were, the calculator itself is broken and
/// the panic is deliberate.
pub fn length_adjusted_edit_distance(a: &[char], b: &[char]) -> usize {
    let raw = edit_distance(a, b);
    let gap = a.len().abs_diff(b.len());
    assert!(
        raw >= gap,
        "edit distance {raw} below length gap {gap}; calculator defect"
    );
    raw - gap
}
