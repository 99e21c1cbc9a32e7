//! Storage backend tests
//!
//! Shared contract: get/set round trips and atomic insert-if-absent.

use std::sync::Arc;

use chrono::{Months, Utc};
use tempfile::TempDir;

use shortlink::errors::ShortlinkError;
use shortlink::storages::file::FileStorage;
use shortlink::storages::memory::MemoryStorage;
use shortlink::storages::{Mapping, MappingStore};

fn mapping(code: &str, target: &str) -> Mapping {
    let created_at = Utc::now();
    Mapping {
        code: code.to_string(),
        target: target.to_string(),
        created_at,
        expires_at: created_at + Months::new(10),
    }
}

// =============================================================================
// Memory backend
// =============================================================================

#[tokio::test]
async fn test_memory_get_set_round_trip() {
    let storage = MemoryStorage::new();

    assert!(storage.get("AAAAAAAA").await.unwrap().is_none());

    storage.set(mapping("AAAAAAAA", "http://example.com")).await.unwrap();
    let stored = storage.get("AAAAAAAA").await.unwrap().unwrap();
    assert_eq!(stored.target, "http://example.com");
    assert_eq!(storage.backend_name(), "memory");
}

#[tokio::test]
async fn test_memory_insert_if_absent_rejects_duplicate() {
    let storage = MemoryStorage::new();

    let inserted = storage
        .insert_if_absent(mapping("AAAAAAAA", "http://first.example"))
        .await
        .unwrap();
    assert!(inserted);

    let inserted = storage
        .insert_if_absent(mapping("AAAAAAAA", "http://second.example"))
        .await
        .unwrap();
    assert!(!inserted);

    // 第一个写入保持不变
    let stored = storage.get("AAAAAAAA").await.unwrap().unwrap();
    assert_eq!(stored.target, "http://first.example");
}

#[tokio::test]
async fn test_memory_set_overwrites() {
    let storage = MemoryStorage::new();

    storage.set(mapping("AAAAAAAA", "http://old.example")).await.unwrap();
    storage.set(mapping("AAAAAAAA", "http://new.example")).await.unwrap();

    let stored = storage.get("AAAAAAAA").await.unwrap().unwrap();
    assert_eq!(stored.target, "http://new.example");
}

#[tokio::test]
async fn test_memory_concurrent_insert_if_absent_single_winner() {
    let storage = Arc::new(MemoryStorage::new());

    let mut handles = Vec::new();
    for i in 0..32 {
        let storage = storage.clone();
        handles.push(tokio::spawn(async move {
            storage
                .insert_if_absent(mapping("AAAAAAAA", &format!("http://t{}.example", i)))
                .await
                .unwrap()
        }));
    }

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);
}

// =============================================================================
// File backend
// =============================================================================

#[tokio::test]
async fn test_file_creates_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("links.json");

    let storage = FileStorage::with_path(path.to_str().unwrap()).unwrap();
    assert_eq!(storage.backend_name(), "file");
    assert!(path.exists());
    assert!(storage.get("AAAAAAAA").await.unwrap().is_none());
}

#[tokio::test]
async fn test_file_persists_across_instances() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("links.json");
    let path = path.to_str().unwrap();

    let original = mapping("AAAAAAAA", "http://example.com");
    {
        let storage = FileStorage::with_path(path).unwrap();
        assert!(storage.insert_if_absent(original.clone()).await.unwrap());
    }

    let storage = FileStorage::with_path(path).unwrap();
    let stored = storage.get("AAAAAAAA").await.unwrap().unwrap();
    assert_eq!(stored.target, "http://example.com");
    // RFC 3339 往返保留时间戳
    assert_eq!(stored.created_at, original.created_at);
    assert_eq!(stored.expires_at, original.expires_at);
}

#[tokio::test]
async fn test_file_insert_if_absent_rejects_duplicate() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("links.json");
    let storage = FileStorage::with_path(path.to_str().unwrap()).unwrap();

    assert!(
        storage
            .insert_if_absent(mapping("AAAAAAAA", "http://first.example"))
            .await
            .unwrap()
    );
    assert!(
        !storage
            .insert_if_absent(mapping("AAAAAAAA", "http://second.example"))
            .await
            .unwrap()
    );

    let stored = storage.get("AAAAAAAA").await.unwrap().unwrap();
    assert_eq!(stored.target, "http://first.example");
}

#[tokio::test]
async fn test_file_set_overwrites_and_persists() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("links.json");
    let path = path.to_str().unwrap();

    {
        let storage = FileStorage::with_path(path).unwrap();
        storage.set(mapping("AAAAAAAA", "http://old.example")).await.unwrap();
        storage.set(mapping("AAAAAAAA", "http://new.example")).await.unwrap();
    }

    let storage = FileStorage::with_path(path).unwrap();
    let stored = storage.get("AAAAAAAA").await.unwrap().unwrap();
    assert_eq!(stored.target, "http://new.example");
}

#[tokio::test]
async fn test_file_rejects_corrupt_timestamps() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("links.json");
    std::fs::write(
        &path,
        r#"[{"short_code":"AAAAAAAA","target_url":"http://example.com","created_at":"not-a-date","expires_at":"2026-01-01T00:00:00Z"}]"#,
    )
    .unwrap();

    // created_at 不能悄悄被替换成当前时间
    let result = FileStorage::with_path(path.to_str().unwrap());
    assert!(matches!(result, Err(ShortlinkError::Serialization(_))));
}

#[tokio::test]
async fn test_file_rejects_corrupt_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("links.json");
    std::fs::write(&path, "not json at all").unwrap();

    let result = FileStorage::with_path(path.to_str().unwrap());
    assert!(matches!(result, Err(ShortlinkError::Serialization(_))));
}
