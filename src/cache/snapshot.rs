use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::cache::{CacheStats, CachedWindow};
use crate::core::{WindowHandle, WindowRecord};

/// One published generation of the window cache.
///
/// Published snapshots are immutable. A refresh clones the current one,
/// edits the clone and publishes it as the next generation.
#[derive(Debug, Clone, Default)]
pub struct CacheSnapshot {
    entries: HashMap<WindowHandle, CachedWindow>,
    generation: u64,
    refreshed_at: Option<DateTime<Utc>>,
    total_inserted: u64,
    total_evicted: u64,
}

impl CacheSnapshot {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, handle: WindowHandle) -> bool {
        self.entries.contains_key(&handle)
    }

    pub fn get(&self, handle: WindowHandle) -> Option<&WindowRecord> {
        self.entries.get(&handle).map(|cached| &cached.record)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&WindowHandle, &CachedWindow)> {
        self.entries.iter()
    }

    /// Raw mapping, for comparing two generations
    pub fn entries(&self) -> &HashMap<WindowHandle, CachedWindow> {
        &self.entries
    }

    /// Records ordered by handle
    pub fn records(&self) -> Vec<(WindowHandle, WindowRecord)> {
        let mut records: Vec<(WindowHandle, WindowRecord)> = self
            .entries
            .iter()
            .map(|(handle, cached)| (*handle, cached.record.clone()))
            .collect();
        records.sort_by_key(|(handle, _)| *handle);
        records
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            generation: self.generation,
            total_inserted: self.total_inserted,
            total_evicted: self.total_evicted,
            last_refresh: self.refreshed_at,
        }
    }

    pub(crate) fn insert(&mut self, handle: WindowHandle, cached: CachedWindow) {
        if self.entries.insert(handle, cached).is_some() {
            self.total_evicted += 1;
        }
        self.total_inserted += 1;
    }

    pub(crate) fn evict(&mut self, handle: WindowHandle) -> Option<CachedWindow> {
        let removed = self.entries.remove(&handle);
        if removed.is_some() {
            self.total_evicted += 1;
        } else {
            tracing::debug!("Ignoring eviction of uncached window {}", handle);
        }
        removed
    }

    /// Drop every entry whose handle matches `evict`; returns how many went
    pub(crate) fn evict_where(&mut self, mut evict: impl FnMut(&WindowHandle) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|handle, _| !evict(handle));
        let removed = before - self.entries.len();
        self.total_evicted += removed as u64;
        removed
    }

    /// Stamp this snapshot as the generation following `previous`
    pub(crate) fn seal(mut self, previous: &CacheSnapshot) -> Self {
        self.generation = previous.generation + 1;
        self.refreshed_at = Some(Utc::now());
        self
    }
}
