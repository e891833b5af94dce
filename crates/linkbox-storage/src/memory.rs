use async_trait::async_trait;
use linkbox_core::{LinkMap, Persister, Result, StoreError};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
struct State {
    snapshot: Mutex<LinkMap>,
    saves: AtomicUsize,
    fail_saves: AtomicBool,
    corrupt: bool,
}

/// In-memory implementation of the Persister trait.
///
/// Keeps the last saved mapping as a snapshot. Clones share the same
/// snapshot, so a test can hand one clone to a store and inspect (or reopen
/// from) the other.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPersister {
    state: Arc<State>,
}

impl InMemoryPersister {
    /// Creates an empty persister.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a persister that already holds `links`.
    pub fn with_links(links: LinkMap) -> Self {
        Self {
            state: Arc::new(State {
                snapshot: Mutex::new(links),
                ..State::default()
            }),
        }
    }

    /// Creates a persister whose stored data cannot be parsed.
    pub fn corrupt() -> Self {
        Self {
            state: Arc::new(State {
                corrupt: true,
                ..State::default()
            }),
        }
    }

    /// Makes every following save fail with an I/O error (or succeed again).
    pub fn fail_saves(&self, fail: bool) {
        self.state.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Returns a copy of the last saved mapping.
    pub fn snapshot(&self) -> LinkMap {
        self.state.snapshot.lock().clone()
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.state.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Persister for InMemoryPersister {
    async fn load(&self) -> Result<LinkMap> {
        if self.state.corrupt {
            return Err(StoreError::Corrupt("in-memory snapshot marked corrupt".into()));
        }
        Ok(self.snapshot())
    }

    async fn save(&self, links: &LinkMap) -> Result<()> {
        if self.state.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Io("simulated save failure".into()));
        }
        *self.state.snapshot.lock() = links.clone();
        self.state.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::Timestamp;
    use linkbox_core::{LinkRecord, ShortCode};

    fn links(codes: &[&str]) -> LinkMap {
        codes
            .iter()
            .map(|c| {
                let code = ShortCode::new_unchecked(*c);
                let record = LinkRecord::new(
                    code.clone(),
                    format!("https://example.com/{c}"),
                    Timestamp::now(),
                );
                (code, record)
            })
            .collect()
    }

    #[tokio::test]
    async fn save_and_load() {
        let persister = InMemoryPersister::new();
        assert!(persister.load().await.unwrap().is_empty());

        persister.save(&links(&["abc123", "def456"])).await.unwrap();

        let loaded = persister.load().await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert!(loaded.contains_key("abc123"));
        assert_eq!(persister.save_count(), 1);
    }

    #[tokio::test]
    async fn save_replaces_whole_mapping() {
        let persister = InMemoryPersister::with_links(links(&["abc123"]));

        persister.save(&links(&["def456"])).await.unwrap();

        let loaded = persister.load().await.unwrap();
        assert!(!loaded.contains_key("abc123"));
        assert!(loaded.contains_key("def456"));
    }

    #[tokio::test]
    async fn clones_share_snapshot() {
        let persister = InMemoryPersister::new();
        let other = persister.clone();

        persister.save(&links(&["abc123"])).await.unwrap();

        assert!(other.snapshot().contains_key("abc123"));
    }

    #[tokio::test]
    async fn failing_saves_keep_previous_snapshot() {
        let persister = InMemoryPersister::with_links(links(&["abc123"]));
        persister.fail_saves(true);

        let err = persister.save(&LinkMap::new()).await.unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
        assert!(persister.snapshot().contains_key("abc123"));
        assert_eq!(persister.save_count(), 0);

        persister.fail_saves(false);
        persister.save(&LinkMap::new()).await.unwrap();
        assert!(persister.snapshot().is_empty());
    }

    #[tokio::test]
    async fn corrupt_load() {
        let err = InMemoryPersister::corrupt().load().await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }
}
