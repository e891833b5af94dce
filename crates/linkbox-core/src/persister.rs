use crate::error::Result;
use crate::record::LinkRecord;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// The complete mapping from short code to record.
pub type LinkMap = BTreeMap<ShortCode, LinkRecord>;

/// Durable storage for the complete link mapping.
///
/// A persister always loads and saves the whole mapping, never individual
/// records. Callers are responsible for serializing access: two concurrent
/// `save` calls race and the last one wins.
#[async_trait]
pub trait Persister: Send + Sync + 'static {
    /// Loads the whole mapping.
    ///
    /// Returns an empty mapping if nothing has been saved yet, and
    /// `Err(Corrupt)` if the stored data cannot be parsed.
    async fn load(&self) -> Result<LinkMap>;

    /// Replaces the stored mapping with `links`.
    async fn save(&self, links: &LinkMap) -> Result<()>;
}
