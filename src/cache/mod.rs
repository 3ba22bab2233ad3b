// src/cache/mod.rs

pub mod clock;
pub mod session;

pub use clock::{Clock, ManualClock, SystemClock};
pub use session::{FileSession, MemorySession, SessionStore};

use chrono::{DateTime, Duration, Utc};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};
use tracing::debug;

use crate::schema::{Dataset, Record};

/// How long a fetched dataset is served without going back to the network.
pub const DEFAULT_TTL: std::time::Duration = std::time::Duration::from_secs(5 * 60);

/// A fetched dataset and when it was captured. Replaced wholesale on refetch.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub records: Vec<Record>,
    pub captured_at: DateTime<Utc>,
}

/// Time-boxed, in-memory store of datasets keyed by logical name.
///
/// The lock is only held for map access and never across an `.await`.
pub struct SheetCache {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    entries: Mutex<HashMap<Dataset, CacheEntry>>,
}

impl SheetCache {
    pub fn new(ttl: std::time::Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl: Duration::from_std(ttl).unwrap_or(Duration::MAX),
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<Dataset, CacheEntry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn is_fresh(&self, entry: &CacheEntry) -> bool {
        self.clock.now() - entry.captured_at < self.ttl
    }

    /// True iff an entry exists and is younger than the TTL.
    pub fn is_valid(&self, ds: Dataset) -> bool {
        self.entries()
            .get(&ds)
            .map(|e| self.is_fresh(e))
            .unwrap_or(false)
    }

    pub fn get_fresh(&self, ds: Dataset) -> Option<Vec<Record>> {
        self.entries()
            .get(&ds)
            .filter(|e| self.is_fresh(e))
            .map(|e| e.records.clone())
    }

    /// Any entry for `ds`, however old.
    pub fn get_any(&self, ds: Dataset) -> Option<Vec<Record>> {
        self.entries().get(&ds).map(|e| e.records.clone())
    }

    pub fn captured_at(&self, ds: Dataset) -> Option<DateTime<Utc>> {
        self.entries().get(&ds).map(|e| e.captured_at)
    }

    pub fn store(&self, ds: Dataset, records: Vec<Record>) {
        let entry = CacheEntry {
            records,
            captured_at: self.clock.now(),
        };
        debug!(dataset = %ds, rows = entry.records.len(), "cache store");
        self.entries().insert(ds, entry);
    }

    /// Drop every entry.
    pub fn clear(&self) {
        let mut entries = self.entries();
        debug!(entries = entries.len(), "cache cleared");
        entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn setup() -> (Arc<ManualClock>, SheetCache) {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap(),
        ));
        let cache = SheetCache::new(DEFAULT_TTL, clock.clone());
        (clock, cache)
    }

    fn rows(name: &str) -> Vec<Record> {
        vec![vec![("name", name)].into_iter().collect()]
    }

    #[test]
    fn entry_is_valid_until_the_ttl_elapses() {
        let (clock, cache) = setup();
        assert!(!cache.is_valid(Dataset::Team));

        cache.store(Dataset::Team, rows("Ada"));
        clock.advance(Duration::minutes(5) - Duration::milliseconds(1));
        assert!(cache.is_valid(Dataset::Team));
        assert!(cache.get_fresh(Dataset::Team).is_some());

        clock.advance(Duration::milliseconds(1));
        assert!(!cache.is_valid(Dataset::Team));
        assert!(cache.get_fresh(Dataset::Team).is_none());
        assert_eq!(cache.get_any(Dataset::Team), Some(rows("Ada")));
    }

    #[test]
    fn store_replaces_data_and_timestamp() {
        let (clock, cache) = setup();
        cache.store(Dataset::Jobs, rows("old"));
        let first = cache.captured_at(Dataset::Jobs).unwrap();

        clock.advance(Duration::minutes(10));
        cache.store(Dataset::Jobs, rows("new"));
        assert_eq!(cache.get_fresh(Dataset::Jobs), Some(rows("new")));
        assert_eq!(
            cache.captured_at(Dataset::Jobs).unwrap() - first,
            Duration::minutes(10)
        );
    }

    #[test]
    fn clear_drops_every_dataset() {
        let (_clock, cache) = setup();
        cache.store(Dataset::Team, rows("a"));
        cache.store(Dataset::Webinars, rows("b"));
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get_any(Dataset::Team).is_none());
    }

    #[test]
    fn datasets_are_cached_independently() {
        let (_clock, cache) = setup();
        cache.store(Dataset::Trainers, rows("t"));
        assert!(cache.is_valid(Dataset::Trainers));
        assert!(!cache.is_valid(Dataset::Training));
    }
}
