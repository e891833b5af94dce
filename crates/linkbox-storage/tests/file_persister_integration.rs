use jiff::Timestamp;
use linkbox_core::{LinkMap, LinkRecord, ShortCode};
use linkbox_storage::{JsonFilePersister, Persister, StoreError};
use tempfile::TempDir;

struct Fixture {
    dir: TempDir,
    persister: JsonFilePersister,
}

impl Fixture {
    async fn start() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let persister = JsonFilePersister::open(dir.path().join("data").join("urls.json"))
            .await
            .expect("open persister");
        Self { dir, persister }
    }

    fn file_path(&self) -> std::path::PathBuf {
        self.dir.path().join("data").join("urls.json")
    }
}

fn code(value: &str) -> ShortCode {
    ShortCode::new_unchecked(value)
}

fn record(code_value: &str, url: &str) -> LinkRecord {
    LinkRecord::new(
        code(code_value),
        url,
        Timestamp::from_second(1_767_225_600).unwrap(),
    )
}

fn links(records: Vec<LinkRecord>) -> LinkMap {
    records
        .into_iter()
        .map(|r| (r.short_code.clone(), r))
        .collect()
}

#[tokio::test]
async fn open_creates_data_directory() {
    let fixture = Fixture::start().await;

    assert!(fixture.dir.path().join("data").is_dir());
    assert!(!fixture.file_path().exists());
}

#[tokio::test]
async fn missing_file_loads_empty() {
    let fixture = Fixture::start().await;

    let loaded = fixture.persister.load().await.unwrap();
    assert!(loaded.is_empty());
}

#[tokio::test]
async fn save_then_load_round_trip() {
    let fixture = Fixture::start().await;

    let mut resolved = record("abc123", "https://example.com");
    resolved.touch(Timestamp::from_second(1_767_312_000).unwrap());
    let saved = links(vec![resolved, record("def-_9", "https://rust-lang.org")]);

    fixture.persister.save(&saved).await.unwrap();

    let loaded = fixture.persister.load().await.unwrap();
    assert_eq!(loaded, saved);

    let reopened = JsonFilePersister::open(fixture.file_path()).await.unwrap();
    assert_eq!(reopened.load().await.unwrap(), saved);
}

#[tokio::test]
async fn file_layout_is_keyed_by_short_code() {
    let fixture = Fixture::start().await;

    let mut resolved = record("abc123", "https://example.com");
    resolved.touch(Timestamp::from_second(1_767_312_000).unwrap());
    fixture
        .persister
        .save(&links(vec![resolved, record("def456", "https://rust-lang.org")]))
        .await
        .unwrap();

    let raw = std::fs::read_to_string(fixture.file_path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

    let entry = &json["abc123"];
    assert_eq!(entry["originalUrl"], "https://example.com");
    assert_eq!(entry["clicks"], 1);
    assert_eq!(entry["createdAt"], "2026-01-01T00:00:00Z");
    assert_eq!(entry["lastAccessed"], "2026-01-02T00:00:00Z");
    assert!(entry.get("shortCode").is_none());

    assert!(json["def456"].get("lastAccessed").is_none());
    assert!(!fixture.dir.path().join("data").join("urls.json.tmp").exists());
}

#[tokio::test]
async fn save_overwrites_previous_content() {
    let fixture = Fixture::start().await;

    fixture
        .persister
        .save(&links(vec![record("abc123", "https://example.com")]))
        .await
        .unwrap();
    fixture.persister.save(&LinkMap::new()).await.unwrap();

    assert!(fixture.persister.load().await.unwrap().is_empty());
    let raw = std::fs::read_to_string(fixture.file_path()).unwrap();
    assert_eq!(raw.trim(), "{}");
}

#[tokio::test]
async fn loads_file_written_by_hand() {
    let fixture = Fixture::start().await;
    std::fs::write(
        fixture.file_path(),
        r#"{
  "Ab3-_z": {
    "originalUrl": "https://example.com/page",
    "createdAt": "2025-03-01T10:20:30.123Z",
    "clicks": 7
  }
}"#,
    )
    .unwrap();

    let loaded = fixture.persister.load().await.unwrap();
    let record = loaded.get("Ab3-_z").expect("record should exist");
    assert_eq!(record.short_code.as_str(), "Ab3-_z");
    assert_eq!(record.original_url, "https://example.com/page");
    assert_eq!(record.clicks, 7);
    assert_eq!(record.last_accessed, None);
}

#[tokio::test]
async fn corrupt_file_is_reported() {
    let fixture = Fixture::start().await;
    std::fs::write(fixture.file_path(), "{\"abc123\": {\"originalUrl\": ").unwrap();

    let err = fixture.persister.load().await.unwrap_err();
    assert!(matches!(err, StoreError::Corrupt(_)));
}

#[tokio::test]
async fn invalid_short_code_key_is_corrupt() {
    let fixture = Fixture::start().await;
    std::fs::write(
        fixture.file_path(),
        r#"{"not a code": {"originalUrl": "https://example.com", "createdAt": "2025-03-01T10:20:30Z", "clicks": 0}}"#,
    )
    .unwrap();

    let err = fixture.persister.load().await.unwrap_err();
    assert!(matches!(err, StoreError::Corrupt(_)));
}
