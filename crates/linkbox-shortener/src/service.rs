use crate::settings::StoreSettings;
use async_trait::async_trait;
use jiff::Timestamp;
use linkbox_core::{
    LinkMap, LinkRecord, Persister, Resolution, Result, ShortCode, ShortenedLink, Shortener,
    StoreError,
};
use linkbox_generator::Generator;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, trace, warn};
use url::Url;

/// The sole owner of the link mapping.
///
/// The whole mapping lives in memory and is written through the
/// [`Persister`] after every mutation. Each operation holds the mapping lock
/// from lookup until the save has finished, so concurrent requests never
/// observe or persist a half-applied change. If a save fails, the mutation
/// is rolled back before the error is returned.
///
/// The lock only covers one process. Two processes sharing a backing file
/// will overwrite each other's changes; running more than one worker needs a
/// cross-process lock or a transactional store.
pub struct ShortLinkStore<P, G> {
    persister: Arc<P>,
    generator: Arc<G>,
    settings: StoreSettings,
    links: Mutex<LinkMap>,
}

impl<P: Persister, G: Generator> ShortLinkStore<P, G> {
    /// Loads the mapping from `persister` and takes ownership of it.
    ///
    /// Corrupt backing data fails with `Err(Corrupt)` unless
    /// [`StoreSettings::recover_corrupt`] is set.
    pub async fn open(persister: P, generator: G, settings: StoreSettings) -> Result<Self> {
        let links = match persister.load().await {
            Ok(links) => links,
            Err(StoreError::Corrupt(reason)) if settings.recover_corrupt => {
                warn!(%reason, "backing data is corrupt, starting with an empty store");
                LinkMap::new()
            }
            Err(err) => return Err(err),
        };

        info!(
            links = links.len(),
            public_base_url = %settings.public_base_url,
            "opened link store"
        );

        Ok(Self {
            persister: Arc::new(persister),
            generator: Arc::new(generator),
            settings,
            links: Mutex::new(links),
        })
    }

    /// Validates that the URL is absolute and has a host.
    ///
    /// The parser ignores surrounding whitespace, but the caller's string is
    /// what gets stored and deduplicated, so `" https://example.com"` is a
    /// different link from `"https://example.com"`.
    fn validate_url(url: &str) -> Result<()> {
        if url.is_empty() {
            return Err(StoreError::InvalidInput("URL is required".to_string()));
        }

        let parsed = Url::parse(url)
            .map_err(|e| StoreError::InvalidInput(format!("Invalid URL format: {e}")))?;

        if !parsed.has_host() {
            return Err(StoreError::InvalidInput(format!(
                "URL must have a scheme and host: {url}"
            )));
        }

        Ok(())
    }

    /// Draws candidates until one is not a live key.
    fn next_code(&self, links: &LinkMap) -> ShortCode {
        loop {
            let candidate: ShortCode = self.generator.generate().into();
            if !links.contains_key(candidate.as_str()) {
                return candidate;
            }
            trace!(code = %candidate, "short code collision, drawing again");
        }
    }

    fn shortened(&self, record: LinkRecord, created: bool) -> ShortenedLink {
        let short_url = record.short_code.to_url(&self.settings.public_base_url);
        ShortenedLink {
            record,
            short_url,
            created,
        }
    }

    async fn persist(&self, links: &LinkMap) -> Result<()> {
        self.persister
            .save(links)
            .await
            .inspect_err(|e| error!(error = %e, "failed to persist link store"))
    }
}

#[async_trait]
impl<P: Persister, G: Generator> Shortener for ShortLinkStore<P, G> {
    async fn shorten(&self, original_url: &str) -> Result<ShortenedLink> {
        Self::validate_url(original_url)?;

        let mut links = self.links.lock().await;

        if let Some(existing) = links.values().find(|r| r.original_url == original_url) {
            debug!(code = %existing.short_code, url = %original_url, "url already shortened");
            let existing = existing.clone();
            return Ok(self.shortened(existing, false));
        }

        let code = self.next_code(&links);
        let record = LinkRecord::new(code.clone(), original_url, Timestamp::now());
        links.insert(code.clone(), record.clone());

        if let Err(err) = self.persist(&links).await {
            links.remove(code.as_str());
            return Err(err);
        }

        info!(code = %code, url = %original_url, "created short link");
        Ok(self.shortened(record, true))
    }

    async fn resolve(&self, code: &str) -> Result<Resolution> {
        let mut links = self.links.lock().await;

        let Some(record) = links.get_mut(code) else {
            debug!(code = %code, "short code not found");
            return Err(StoreError::NotFound(code.to_owned()));
        };

        let previous = record.clone();
        record.touch(Timestamp::now());
        let resolution = Resolution {
            original_url: record.original_url.clone(),
            clicks: record.clicks,
        };

        if let Err(err) = self.persist(&links).await {
            links.insert(previous.short_code.clone(), previous);
            return Err(err);
        }

        debug!(code = %code, clicks = resolution.clicks, "resolved short code");
        Ok(resolution)
    }

    async fn stats(&self, code: &str) -> Result<LinkRecord> {
        let links = self.links.lock().await;

        links.get(code).cloned().ok_or_else(|| {
            debug!(code = %code, "short code not found");
            StoreError::NotFound(code.to_owned())
        })
    }

    async fn remove(&self, code: &str) -> Result<LinkRecord> {
        let mut links = self.links.lock().await;

        let Some(removed) = links.remove(code) else {
            debug!(code = %code, "short code not found");
            return Err(StoreError::NotFound(code.to_owned()));
        };

        if let Err(err) = self.persist(&links).await {
            links.insert(removed.short_code.clone(), removed);
            return Err(err);
        }

        info!(code = %code, url = %removed.original_url, "removed short link");
        Ok(removed)
    }

    async fn flush(&self) -> Result<()> {
        let links = self.links.lock().await;
        self.persist(&links).await?;
        info!(links = links.len(), "flushed link store");
        Ok(())
    }

    async fn len(&self) -> usize {
        self.links.lock().await.len()
    }

    async fn is_empty(&self) -> bool {
        self.links.lock().await.is_empty()
    }
}
