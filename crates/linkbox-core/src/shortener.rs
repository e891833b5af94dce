use crate::error::Result;
use crate::record::{LinkRecord, Resolution, ShortenedLink};
use async_trait::async_trait;

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Shortens `original_url`, or returns the existing record for the
    /// exact same URL string.
    async fn shorten(&self, original_url: &str) -> Result<ShortenedLink>;

    /// Resolves a short code, counting one click.
    /// Returns `Err(NotFound)` if the code does not exist.
    async fn resolve(&self, code: &str) -> Result<Resolution>;

    /// Returns the record for a short code without modifying it.
    async fn stats(&self, code: &str) -> Result<LinkRecord>;

    /// Deletes a short code and returns the removed record.
    async fn remove(&self, code: &str) -> Result<LinkRecord>;

    /// Writes the current mapping to durable storage.
    async fn flush(&self) -> Result<()>;

    /// Number of live records.
    async fn len(&self) -> usize;

    /// Whether the store has no live records.
    async fn is_empty(&self) -> bool;
}
