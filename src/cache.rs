use crate::types::TrackDetail;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Memoized track details keyed by canonical track identifier.
///
/// Entries are write-once: the first detail stored for an identifier is kept
/// for the lifetime of the cache. The lock is only held for the duration of a
/// lookup or insert, never across a fetch.
#[derive(Debug, Default)]
pub struct DetailCache {
    entries: RwLock<HashMap<String, TrackDetail>>,
}

impl DetailCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cached detail by identifier.
    pub fn get(&self, track_id: &str) -> Option<TrackDetail> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(track_id)
            .cloned()
    }

    /// Store a detail under its identifier and return the cached entry.
    ///
    /// When a concurrent lookup already stored the same identifier, the
    /// existing entry wins and is returned instead.
    pub fn insert(&self, detail: TrackDetail) -> TrackDetail {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries
            .entry(detail.id().to_string())
            .or_insert(detail)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
