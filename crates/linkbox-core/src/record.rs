use crate::shortcode::ShortCode;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A stored link: the original URL plus its access metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRecord {
    /// The unique key of the record.
    pub short_code: ShortCode,
    /// The original URL that was shortened. Never changes after creation.
    pub original_url: String,
    /// When the record was created.
    pub created_at: Timestamp,
    /// When the record was last resolved, if ever.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_accessed: Option<Timestamp>,
    /// How many times the record has been resolved.
    pub clicks: u64,
}

impl LinkRecord {
    /// Creates a fresh record with no clicks.
    pub fn new(
        short_code: ShortCode,
        original_url: impl Into<String>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            short_code,
            original_url: original_url.into(),
            created_at,
            last_accessed: None,
            clicks: 0,
        }
    }

    /// Records one resolution at `now`.
    ///
    /// `last_accessed` never moves backwards even if the clock does.
    pub fn touch(&mut self, now: Timestamp) {
        self.clicks += 1;
        self.last_accessed = Some(match self.last_accessed {
            Some(previous) if previous > now => previous,
            _ => now,
        });
    }
}

/// The outcome of resolving a short code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub original_url: String,
    pub clicks: u64,
}

/// The outcome of shortening a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenedLink {
    /// The new record, or the existing one for the same URL.
    pub record: LinkRecord,
    /// The fully qualified short URL.
    pub short_url: String,
    /// `false` when an existing record was returned.
    pub created: bool,
}
