//! Integration tests for devkit
//!
//! These tests drive the public library API end to end: converting
//! identifiers and timestamps, and persisting history and settings to a
//! scratch directory instead of the user's data directory.

use chrono::Utc;
use devkit::config::{AppConfig, load_config_from, save_config_to, try_load_config_from};
use devkit::core::batch::{
    QR_HISTORY_FILE_NAME, QrHistory, Separator, detect_separator, load_qr_history_from,
    save_qr_history_to, split_batch,
};
use devkit::core::history::{
    HISTORY_FILE_NAME, TimestampHistory, delete_history_file, load_history_from, save_history_to,
};
use devkit::core::timestamp::{DEFAULT_DATE_FORMAT, convert_timestamp};
use devkit::{NamingConvention, TimestampUnit, convert, convert_all, detect, tokenize};
use std::path::PathBuf;
use tempfile::TempDir;

fn history_file(dir: &TempDir) -> PathBuf {
    dir.path().join(HISTORY_FILE_NAME)
}

#[test]
fn test_detect_then_convert_all() {
    let input = "getHTTPResponseCode";
    assert_eq!(detect(input), NamingConvention::CamelCase);
    assert_eq!(tokenize(input), vec!["get", "HTTP", "Response", "Code"]);

    let all = convert_all(input);
    assert_eq!(all[&NamingConvention::SnakeCase], "get_http_response_code");
    assert_eq!(all[&NamingConvention::PascalCase], "GetHttpResponseCode");
    assert_eq!(all[&NamingConvention::SpacedCase], "get http response code");
}

#[test]
fn test_chain_of_conversions_keeps_words() {
    let mut value = "user_account_id".to_string();
    for target in [
        NamingConvention::KebabCase,
        NamingConvention::SpacedCase,
        NamingConvention::PascalCase,
        NamingConvention::UpperSnakeCase,
        NamingConvention::CamelCase,
    ] {
        value = convert(&value, target);
        assert_eq!(detect(&value), target, "{value}");
    }
    assert_eq!(value, "userAccountId");
}

#[tokio::test]
async fn test_history_survives_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = history_file(&dir);

    let mut history = TimestampHistory::new();
    let converted =
        convert_timestamp("1700000000000", TimestampUnit::Milliseconds, &Utc, DEFAULT_DATE_FORMAT)
            .unwrap();
    let id = history
        .record("1700000000000", TimestampUnit::Milliseconds, &converted)
        .unwrap()
        .id;
    history.record("0", TimestampUnit::Seconds, "1970-01-01 00:00:00");

    save_history_to(&path, &history).await.unwrap();
    let loaded = load_history_from(&path).await;

    assert_eq!(loaded.len(), 2);
    let entry = loaded.get(id).unwrap();
    assert_eq!(entry.converted_time, "2023-11-14 22:13:20");
    assert_eq!(entry.unit(), TimestampUnit::Milliseconds);
}

#[tokio::test]
async fn test_history_file_is_a_json_array() {
    let dir = tempfile::tempdir().unwrap();
    let path = history_file(&dir);

    let mut history = TimestampHistory::new();
    history.record("42", TimestampUnit::Seconds, "1970-01-01 00:00:42");
    save_history_to(&path, &history).await.unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert!(raw.is_array());
    assert_eq!(raw[0]["isMilliseconds"], false);
}

#[tokio::test]
async fn test_missing_history_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = load_history_from(&history_file(&dir)).await;
    assert!(loaded.is_empty());
}

#[tokio::test]
async fn test_corrupt_history_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = history_file(&dir);
    std::fs::write(&path, "[{\"timestamp\": ").unwrap();

    let loaded = load_history_from(&path).await;
    assert!(loaded.is_empty());
}

#[tokio::test]
async fn test_delete_history_file_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = history_file(&dir);

    save_history_to(&path, &TimestampHistory::new()).await.unwrap();
    assert!(path.exists());

    delete_history_file(&path).await.unwrap();
    assert!(!path.exists());
    delete_history_file(&path).await.unwrap();
}

#[tokio::test]
async fn test_history_limit_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.json");
    let history_path = history_file(&dir);

    let config = AppConfig {
        max_history_entries: 3,
        ..AppConfig::default()
    };
    save_config_to(&config_path, &config).await.unwrap();
    let config = load_config_from(&config_path).await;

    let mut history = TimestampHistory::new();
    for secs in 0..10 {
        let input = secs.to_string();
        let converted =
            convert_timestamp(&input, TimestampUnit::Seconds, &Utc, &config.date_format).unwrap();
        history.record(&input, TimestampUnit::Seconds, &converted);
    }
    history.enforce_limit(config.max_history_entries);
    save_history_to(&history_path, &history).await.unwrap();

    let loaded = load_history_from(&history_path).await;
    let stamps: Vec<_> = loaded.iter().map(|item| item.timestamp.clone()).collect();
    assert_eq!(stamps, vec!["7", "8", "9"]);
}

#[tokio::test]
async fn test_invalid_config_is_not_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    let config = AppConfig {
        date_format: String::new(),
        ..AppConfig::default()
    };
    assert!(save_config_to(&path, &config).await.is_err());
    assert!(!path.exists());
}

#[tokio::test]
async fn test_rejected_config_is_reported_then_replaced_by_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"max_history_entries": 0, "log_to_file": false}"#).unwrap();

    assert!(try_load_config_from(&path).await.is_err());
    assert_eq!(load_config_from(&path).await, AppConfig::default());
}

#[tokio::test]
async fn test_detected_batch_is_saved_as_one_group() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(QR_HISTORY_FILE_NAME);

    let input = "https://a.example\nhttps://b.example\n\nhttps://c.example\n";
    let separator = detect_separator(input);
    assert_eq!(separator, Separator::Newline);
    let parts = split_batch(input, &separator);
    assert_eq!(parts.len(), 3);

    let mut history = QrHistory::new();
    let record = history.record_batch(&parts);
    save_qr_history_to(&path, &history).await.unwrap();

    // A second run of the same input adds nothing
    let mut reloaded = load_qr_history_from(&path).await;
    let again = reloaded.record_batch(&parts);
    assert_eq!(again.added, 0);
    assert_eq!(again.skipped, 3);

    let group: Vec<_> = reloaded
        .batch_items(record.batch_timestamp)
        .iter()
        .map(|item| item.text.clone())
        .collect();
    assert_eq!(group, parts);
}
