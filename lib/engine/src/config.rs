/// Tunables consumed by the matching engine.
///
/// An explicit value object handed to the scheduler at construction -
/// there is no global mutable configuration anywhere in the engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum number of products scored per catalog-pair comparison.
    ///
    /// Bounds total work on large catalogs; not correctness-relevant.
    pub limit: usize,
}

/// Default processing cap per catalog pair.
pub const DEFAULT_LIMIT: usize = 50;

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}
