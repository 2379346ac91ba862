pub mod snapshot;
pub mod window_cache;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::WindowRecord;

pub use snapshot::CacheSnapshot;
pub use window_cache::WindowCache;

/// Cached record with its insertion index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedWindow {
    pub record: WindowRecord,
    /// Monotonic insertion index, used to break ranking ties
    pub seq: u64,
}

/// Outcome of one refresh cycle
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RefreshReport {
    /// Handles reused by a different process
    pub evicted_stale: usize,
    /// Handles that no longer resolve to a live window
    pub evicted_closed: usize,
    /// Handles still alive but no longer reported by the enumeration
    pub evicted_unlisted: usize,
    /// Entries kept without re-reading title or path
    pub retained: usize,
    /// Newly captured windows
    pub inserted: usize,
    /// Enumerated handles that could not be resolved this cycle
    pub skipped: usize,
    /// Cache size after publishing
    pub total: usize,
    /// Refresh duration in milliseconds
    pub elapsed_ms: f64,
}

impl RefreshReport {
    pub fn evicted(&self) -> usize {
        self.evicted_stale + self.evicted_closed + self.evicted_unlisted
    }

    /// True when the refresh did not change the cache contents
    pub fn is_unchanged(&self) -> bool {
        self.evicted() == 0 && self.inserted == 0
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub generation: u64,
    pub total_inserted: u64,
    pub total_evicted: u64,
    pub last_refresh: Option<DateTime<Utc>>,
}
