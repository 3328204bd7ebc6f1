//! Integration tests for the `export` command against a snapshot file

use ferry::adapters::store::InMemoryStore;
use ferry::cli::commands::export::ExportArgs;
use ferry::domain::IntegrationId;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

// i1 has no highlights, so Readwise accepts it without a request
const SNAPSHOT: &str = r#"{
  "library_items": [
    {
      "id": "i1",
      "user_id": "u1",
      "title": "Zero-cost abstractions",
      "original_url": "https://example.com/zero-cost",
      "saved_at": "2024-04-01T10:00:00Z"
    }
  ],
  "integrations": [
    {
      "id": "g1",
      "user_id": "u1",
      "name": "READWISE",
      "token": "rw-token",
      "enabled": true,
      "type": "EXPORT"
    },
    {
      "id": "g2",
      "user_id": "u1",
      "name": "INSTAPAPER",
      "token": "ip-token",
      "enabled": true,
      "type": "EXPORT"
    }
  ]
}"#;

const CONFIG: &str = r#"
[application]
log_level = "info"
dry_run = false

[integrations.readwise]
enabled = true
base_url = "http://127.0.0.1:9"
highlight_base_url = "https://reader.example.com"
timeout_seconds = 1
"#;

fn write_config() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(CONFIG.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn export_args(store: &Path, save: bool) -> ExportArgs {
    ExportArgs {
        store: PathBuf::from(store),
        user: "u1".to_string(),
        items: vec!["i1".to_string()],
        integration: None,
        dry_run: false,
        save,
    }
}

#[tokio::test]
async fn test_save_keeps_synced_sibling_when_job_fails() {
    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("store.json");
    std::fs::write(&store_path, SNAPSHOT).unwrap();
    let config = write_config();

    let exit_code = export_args(&store_path, true)
        .execute(config.path().to_str().unwrap())
        .await
        .unwrap();

    // INSTAPAPER has no client, which fails the job
    assert_eq!(exit_code, 5);

    let reloaded = InMemoryStore::load_json(&store_path).await.unwrap();
    let g1 = reloaded
        .integration(&IntegrationId::new("g1").unwrap())
        .await
        .unwrap();
    let g2 = reloaded
        .integration(&IntegrationId::new("g2").unwrap())
        .await
        .unwrap();
    assert!(g1.synced_at.is_some());
    assert!(g2.synced_at.is_none());
}

#[tokio::test]
async fn test_without_save_leaves_snapshot_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("store.json");
    std::fs::write(&store_path, SNAPSHOT).unwrap();
    let config = write_config();

    let exit_code = export_args(&store_path, false)
        .execute(config.path().to_str().unwrap())
        .await
        .unwrap();

    assert_eq!(exit_code, 5);
    assert_eq!(std::fs::read_to_string(&store_path).unwrap(), SNAPSHOT);
}
