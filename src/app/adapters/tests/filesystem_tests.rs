//! Tests for the local filesystem adapters

use std::fs;

use tempfile::TempDir;

use crate::Error;
use crate::app::adapters::{
    ArchiveLister, DirectoryArchive, ItemSink, JsonItemSink, LocalMessageSource, MessageSource,
};
use crate::app::services::stac_builder::build_item;
use crate::app::services::stac_builder::tests::sample_report;

#[tokio::test]
async fn test_fetch_reads_file_and_derives_timestamp() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("REPNT3-KNHC.202401232347.txt");
    fs::write(&path, "974\nUZNT13 KNHC 232347\n").unwrap();

    let source = LocalMessageSource::new();
    let message = source.fetch(path.to_str().unwrap()).await.unwrap();

    assert!(message.text.starts_with("974"));
    assert_eq!(
        message.message_date.format("%Y%m%d%H%M").to_string(),
        "202401232347"
    );
}

#[tokio::test]
async fn test_fetch_missing_file() {
    let source = LocalMessageSource::new();
    let error = source.fetch("/no/such/message.txt").await.unwrap_err();
    assert!(matches!(error, Error::FileNotFound { .. }));
}

#[tokio::test]
async fn test_list_returns_sorted_txt_files_recursively() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("2024")).unwrap();
    fs::write(dir.path().join("b.202401020304.txt"), "").unwrap();
    fs::write(dir.path().join("2024/a.202401020304.txt"), "").unwrap();
    fs::write(dir.path().join("notes.md"), "").unwrap();

    let archive = DirectoryArchive::new(dir.path());
    let listed = archive.list().await.unwrap();

    assert_eq!(listed.len(), 2);
    assert!(listed[0].ends_with("a.202401020304.txt"));
    assert!(listed[1].ends_with("b.202401020304.txt"));
}

#[tokio::test]
async fn test_list_missing_directory() {
    let archive = DirectoryArchive::new("/no/such/archive");
    assert!(archive.list().await.is_err());
}

#[tokio::test]
async fn test_sink_writes_item_named_after_id() {
    let dir = TempDir::new().unwrap();
    let sink = JsonItemSink::new(dir.path());
    let item = build_item(&sample_report());

    sink.write(&item).await.unwrap();

    let path = sink.path_for(&item);
    assert!(path.exists());

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written["id"], serde_json::json!(item.id));
}

#[test]
fn test_path_sanitizes_hostile_characters() {
    let sink = JsonItemSink::new("/tmp/out");
    let mut item = build_item(&sample_report());
    item.id = "a/b:c d".to_string();

    let path = sink.path_for(&item);
    assert_eq!(path.file_name().unwrap().to_str().unwrap(), "a_b_c_d.json");
}
