//! Preview metadata records.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Metadata describing a page that could be rendered as a link preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewRecord {
    /// Canonical page URL; also the store key.
    pub url: String,
    pub title: String,
    /// May be empty.
    pub description: String,
    /// May be empty.
    pub image: String,
    /// ISO-8601 timestamp of when the record was built.
    pub fetched_at: String,
}

impl PreviewRecord {
    /// Build a record with no description or image, stamped with `fetched_at`.
    pub fn new(url: impl Into<String>, title: impl Into<String>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            description: String::new(),
            image: String::new(),
            fetched_at: format_timestamp(fetched_at),
        }
    }
}

/// Render a timestamp as `YYYY-MM-DDTHH:MM:SS.sssZ`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
