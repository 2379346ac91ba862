use parking_lot::{Mutex, RwLock};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use crate::cache::{CacheSnapshot, CacheStats, CachedWindow, RefreshReport};
use crate::core::{WindowHandle, WindowRecord};
use crate::error::Result;
use crate::platform::WindowSource;

/// In-memory cache of qualifying top-level windows.
///
/// Readers grab the current generation with [`WindowCache::snapshot`] and
/// never block a refresh for longer than an `Arc` clone. A refresh builds the
/// next generation on the side and publishes it in one swap, so readers
/// only ever see fully reconciled generations.
#[derive(Debug, Default)]
pub struct WindowCache {
    current: RwLock<Arc<CacheSnapshot>>,
    /// Serializes writers; holds the next insertion index
    writer: Mutex<u64>,
}

impl WindowCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current generation
    pub fn snapshot(&self) -> Arc<CacheSnapshot> {
        Arc::clone(&self.current.read())
    }

    pub fn len(&self) -> usize {
        self.current.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.read().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.current.read().stats()
    }

    /// Reconcile the cache with the live window set reported by `source`.
    ///
    /// `source.begin_refresh()` runs first, so a source that memoizes host
    /// state answers the whole cycle from one fresh view.
    ///
    /// Cached entries whose handle is gone, or now belongs to another
    /// process, are evicted; entries that still match are kept as is,
    /// without re-reading title or path. Newly enumerated handles are
    /// captured and inserted. Handles that fail to resolve are skipped for
    /// this cycle.
    ///
    /// Only a failing enumeration is returned as an error, in which case
    /// the published generation is left untouched.
    pub fn refresh(&self, source: &dyn WindowSource) -> Result<RefreshReport> {
        let mut next_seq = self.writer.lock();
        let started = Instant::now();

        let current = self.snapshot();
        let mut next = CacheSnapshot::clone(&current);
        let mut report = RefreshReport::default();

        tracing::debug!("Refreshing {} cached windows via {}", current.len(), source.name());
        source.begin_refresh();

        // Reconciliation pass
        for (handle, cached) in current.iter() {
            match source.owner_of(*handle) {
                Ok(owner) if owner == cached.record.owner_pid => {}
                Ok(owner) => {
                    tracing::debug!(
                        "Evicting stale window {}: owner {} is now {}",
                        handle,
                        cached.record.owner_pid,
                        owner
                    );
                    next.evict(*handle);
                    report.evicted_stale += 1;
                }
                Err(e) => {
                    tracing::debug!("Evicting closed window {}: {}", handle, e);
                    next.evict(*handle);
                    report.evicted_closed += 1;
                }
            }
        }

        // Enumeration pass
        let live = source.enumerate().map_err(|e| {
            tracing::warn!("Enumeration via {} failed: {}", source.name(), e);
            e
        })?;

        let live_set: HashSet<WindowHandle> = live.iter().copied().collect();
        report.evicted_unlisted = next.evict_where(|handle| !live_set.contains(handle));
        report.retained = next.len();

        let mut attempted: HashSet<WindowHandle> = HashSet::with_capacity(live.len());
        for handle in live {
            if next.contains(handle) {
                tracing::trace!("Window {} is cached", handle);
                continue;
            }
            if !attempted.insert(handle) {
                continue;
            }

            match capture(source, handle) {
                Ok(record) => {
                    tracing::debug!("Adding window {} pid={}", handle, record.owner_pid);
                    next.insert(handle, CachedWindow { record, seq: *next_seq });
                    *next_seq += 1;
                    report.inserted += 1;
                }
                Err(e) => {
                    tracing::debug!("Skipping window {} this cycle: {}", handle, e);
                    report.skipped += 1;
                }
            }
        }

        report.total = next.len();
        let next = next.seal(&current);
        *self.current.write() = Arc::new(next);

        report.elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        tracing::debug!(
            "Refresh done: {} windows (+{} / -{} / {} skipped) in {:.2}ms",
            report.total,
            report.inserted,
            report.evicted(),
            report.skipped,
            report.elapsed_ms
        );

        Ok(report)
    }
}

/// Read owner, title and executable path of a newly seen window
fn capture(source: &dyn WindowSource, handle: WindowHandle) -> Result<WindowRecord> {
    let owner = source.owner_of(handle)?;
    let title = source.title_of(handle)?;
    let executable_path = source.executable_path(owner)?;
    Ok(WindowRecord::new(title, executable_path, owner))
}
