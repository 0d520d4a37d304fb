use crate::cache::clock::Clock;
use crate::model::{AggregateStats, FilterParams};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_TTL_MS: u64 = 300_000;

/// Canonical cache key for a filter.
///
/// Encoded as a JSON object with sorted keys and `null` for absent bounds, so
/// `{start_date}` and `{start_date, end_date: null}` share a slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheFingerprint(String);

impl CacheFingerprint {
    pub fn from_filter(filter: &FilterParams) -> Self {
        let end = filter.end_date.map(|d| d.format("%Y-%m-%d").to_string());
        let start = filter.start_date.map(|d| d.format("%Y-%m-%d").to_string());
        // Keys are written in sorted order.
        let canonical = serde_json::json!({
            "end_date": end,
            "start_date": start,
        });
        CacheFingerprint(canonical.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&FilterParams> for CacheFingerprint {
    fn from(filter: &FilterParams) -> Self {
        CacheFingerprint::from_filter(filter)
    }
}

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub fingerprint: CacheFingerprint,
    pub payload: Arc<AggregateStats>,
    pub fetched_at: u64,
    superseded: bool,
}

impl CacheEntry {
    /// Set once server-side data changed after this entry was fetched.
    pub fn is_superseded(&self) -> bool {
        self.superseded
    }
}

/// Session-scoped payload cache keyed by filter fingerprint.
///
/// Entries are never evicted: stale or superseded entries stay in the map and
/// are overwritten by the next successful fetch for the same fingerprint. The
/// key space is one slot per distinct filter a user picks in a session, so
/// the map is left unbounded.
pub struct FetchCache {
    entries: HashMap<CacheFingerprint, CacheEntry>,
    ttl_ms: u64,
    clock: Arc<dyn Clock>,
}

impl FetchCache {
    pub fn new(ttl_ms: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            ttl_ms,
            clock,
        }
    }

    pub fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    pub fn get(&self, fingerprint: &CacheFingerprint) -> Option<&CacheEntry> {
        self.entries.get(fingerprint)
    }

    pub fn put(&mut self, fingerprint: CacheFingerprint, payload: Arc<AggregateStats>, now_ms: u64) {
        debug!(fingerprint = %fingerprint, fetched_at = now_ms, "Caching stats payload");
        let entry = CacheEntry {
            fingerprint: fingerprint.clone(),
            payload,
            fetched_at: now_ms,
            superseded: false,
        };
        self.entries.insert(fingerprint, entry);
    }

    pub fn is_fresh(&self, entry: &CacheEntry, now_ms: u64) -> bool {
        !entry.superseded && now_ms.saturating_sub(entry.fetched_at) < self.ttl_ms
    }

    /// The cached payload for `fingerprint` if it may be served right now.
    pub fn lookup_fresh(&self, fingerprint: &CacheFingerprint) -> Option<Arc<AggregateStats>> {
        let now = self.clock.now_ms();
        self.entries
            .get(fingerprint)
            .filter(|entry| self.is_fresh(entry, now))
            .map(|entry| Arc::clone(&entry.payload))
    }

    /// Marks every entry superseded; none will be served again until refetched.
    pub fn invalidate_all(&mut self) -> usize {
        for entry in self.entries.values_mut() {
            entry.superseded = true;
        }
        debug!(entries = self.entries.len(), "Invalidated cached stats");
        self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
