use async_trait::async_trait;
use jiff::Timestamp;
use linkbox_core::{LinkMap, LinkRecord, Persister, Result, ShortCode, StoreError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// One value in the backing file. The short code is the object key.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredLink {
    original_url: String,
    created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_accessed: Option<Timestamp>,
    clicks: u64,
}

impl StoredLink {
    fn into_record(self, short_code: ShortCode) -> LinkRecord {
        LinkRecord {
            short_code,
            original_url: self.original_url,
            created_at: self.created_at,
            last_accessed: self.last_accessed,
            clicks: self.clicks,
        }
    }
}

impl From<&LinkRecord> for StoredLink {
    fn from(record: &LinkRecord) -> Self {
        Self {
            original_url: record.original_url.clone(),
            created_at: record.created_at,
            last_accessed: record.last_accessed,
            clicks: record.clicks,
        }
    }
}

/// Persists the whole mapping as a single pretty-printed JSON object.
///
/// ```text
/// {
///   "abc123": {
///     "originalUrl": "https://example.com",
///     "createdAt": "2026-01-01T00:00:00Z",
///     "lastAccessed": "2026-01-02T00:00:00Z",
///     "clicks": 3
///   }
/// }
/// ```
///
/// Every save overwrites the whole file. The new content is written to a
/// sibling temp file, synced and renamed over the backing file, so a reader
/// never sees a half-written mapping. Only one process may write the file.
#[derive(Debug, Clone)]
pub struct JsonFilePersister {
    path: PathBuf,
    temp_path: PathBuf,
}

impl JsonFilePersister {
    /// Opens the backing file at `path`, creating its parent directory if
    /// it does not exist yet. The file itself is created on first save.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
        temp_name.push(".tmp");
        let temp_path = path.with_file_name(temp_name);

        Ok(Self { path, temp_path })
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn replace_with(&self, contents: &[u8]) -> std::io::Result<()> {
        let mut file = tokio::fs::File::create(&self.temp_path).await?;
        file.write_all(contents).await?;
        file.sync_all().await?;
        drop(file);

        tokio::fs::rename(&self.temp_path, &self.path).await
    }
}

#[async_trait]
impl Persister for JsonFilePersister {
    async fn load(&self) -> Result<LinkMap> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "backing file not found, starting empty");
                return Ok(LinkMap::new());
            }
            Err(err) => return Err(err.into()),
        };

        let layout: BTreeMap<ShortCode, StoredLink> = serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::Corrupt(format!("{}: {e}", self.path.display())))?;

        let links: LinkMap = layout
            .into_iter()
            .map(|(code, stored)| (code.clone(), stored.into_record(code)))
            .collect();

        info!(path = %self.path.display(), links = links.len(), "loaded backing file");
        Ok(links)
    }

    async fn save(&self, links: &LinkMap) -> Result<()> {
        let layout: BTreeMap<&ShortCode, StoredLink> = links
            .iter()
            .map(|(code, record)| (code, StoredLink::from(record)))
            .collect();
        let json = serde_json::to_vec_pretty(&layout)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        if let Err(err) = self.replace_with(&json).await {
            let _ = tokio::fs::remove_file(&self.temp_path).await;
            return Err(err.into());
        }

        debug!(path = %self.path.display(), links = links.len(), "saved backing file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn temp_file_sits_next_to_backing_file() {
        let dir = tempfile::tempdir().unwrap();
        let persister = JsonFilePersister::open(dir.path().join("urls.json"))
            .await
            .unwrap();

        assert_eq!(persister.temp_path, dir.path().join("urls.json.tmp"));
    }

    #[tokio::test]
    async fn relative_path_without_parent() {
        let persister = JsonFilePersister::open("urls.json").await.unwrap();
        assert_eq!(persister.path(), Path::new("urls.json"));
        assert_eq!(persister.temp_path, PathBuf::from("urls.json.tmp"));
    }

    #[tokio::test]
    async fn failed_save_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urls.json");
        // a non-empty directory in place of the backing file makes the rename fail
        std::fs::create_dir_all(path.join("occupied")).unwrap();
        let persister = JsonFilePersister::open(&path).await.unwrap();

        let err = persister.save(&LinkMap::new()).await.unwrap_err();

        assert!(matches!(err, StoreError::Io(_)));
        assert!(!persister.temp_path.exists());
        assert!(path.join("occupied").is_dir());
    }
}
