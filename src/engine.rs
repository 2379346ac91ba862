use std::sync::Arc;

use crate::cache::{CacheSnapshot, CacheStats, RefreshReport, WindowCache};
use crate::config::SwitcherConfig;
use crate::core::{RankedWindow, WindowHandle, WindowRecord};
use crate::error::Result;
use crate::platform::WindowSource;
use crate::ranking::{self, RankOptions, Scorer, TokenSortScorer};

/// Window switcher orchestrator: owns the cache, talks to the source,
/// ranks with the scorer.
///
/// Built once by the presentation layer and kept for the lifetime of the
/// app. The usual frame is `refresh()` followed by `rank()`.
pub struct WindowSwitcher {
    cache: WindowCache,
    source: Arc<dyn WindowSource>,
    scorer: Arc<dyn Scorer>,
    options: RankOptions,
}

impl WindowSwitcher {
    /// Create a switcher with the token-sort scorer and default weights
    pub fn new(source: Arc<dyn WindowSource>) -> Self {
        Self {
            cache: WindowCache::new(),
            source,
            scorer: Arc::new(TokenSortScorer::new()),
            options: RankOptions::default(),
        }
    }

    pub fn from_config(source: Arc<dyn WindowSource>, config: &SwitcherConfig) -> Self {
        Self::new(source).with_options(config.ranking)
    }

    pub fn with_scorer(mut self, scorer: Arc<dyn Scorer>) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn with_options(mut self, options: RankOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &RankOptions {
        &self.options
    }

    pub fn source(&self) -> &Arc<dyn WindowSource> {
        &self.source
    }

    /// Reconcile the cache with the live window set
    pub fn refresh(&self) -> Result<RefreshReport> {
        self.cache.refresh(self.source.as_ref())
    }

    /// Best `limit` cached windows for `query`. Never refreshes.
    pub fn rank(&self, query: &str, limit: usize) -> Vec<RankedWindow> {
        let snapshot = self.cache.snapshot();
        ranking::rank(&snapshot, self.scorer.as_ref(), &self.options, query, limit)
    }

    /// Rank with the configured default limit
    pub fn rank_default(&self, query: &str) -> Vec<RankedWindow> {
        self.rank(query, self.options.default_limit)
    }

    /// One display cycle: refresh, then rank
    pub fn refresh_and_rank(&self, query: &str, limit: usize) -> Result<Vec<RankedWindow>> {
        self.refresh()?;
        Ok(self.rank(query, limit))
    }

    /// All cached windows, ordered by handle
    pub fn windows(&self) -> Vec<(WindowHandle, WindowRecord)> {
        self.cache.snapshot().records()
    }

    pub fn snapshot(&self) -> Arc<CacheSnapshot> {
        self.cache.snapshot()
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
