//! In-memory preview store.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::previews::record::PreviewRecord;

/// Pages the store is seeded with at startup.
const PREWARM: [(&str, &str); 3] = [
    (
        "https://www.nts.live/shows/the-breakfast-show-flo/episodes/the-breakfast-show-flo-29th-april-2024",
        "THE NTS BREAKFAST SHOW W/ FLO — 29.04",
    ),
    (
        "https://www.nts.live/shows/the-breakfast-show-flo/episodes/the-breakfast-show-flo-30th-september-2024",
        "THE NTS BREAKFAST SHOW W/ FLO — 30.09",
    ),
    (
        "https://www.nts.live/shows/andras/episodes/andras-10th-september-2025",
        "ANDRAS NTS — 10.09.25",
    ),
];

/// Preview records keyed by URL.
///
/// Built once by the startup routine and shared read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct PreviewStore {
    records: HashMap<String, PreviewRecord>,
}

impl PreviewStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the built-in records, stamped with `now`.
    pub fn prewarmed(now: DateTime<Utc>) -> Self {
        let mut store = Self::new();
        for (url, title) in PREWARM {
            store.insert(PreviewRecord::new(url, title, now));
        }
        store
    }

    /// Insert a record under its URL, returning the one it replaced.
    pub fn insert(&mut self, record: PreviewRecord) -> Option<PreviewRecord> {
        self.records.insert(record.url.clone(), record)
    }

    pub fn get(&self, url: &str) -> Option<&PreviewRecord> {
        self.records.get(url)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// URLs currently held, in no particular order.
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }
}
