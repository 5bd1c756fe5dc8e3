use std::fs;

use monitor_sources::{load_claude_snapshot, load_moltbot_snapshot};
use tempfile::tempdir;

#[test]
fn claude_snapshot_maps_cache_token_fields() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("stats-cache.json");
    fs::write(
        &path,
        r#"{
          "lastComputedDate": "2026-08-28",
          "totalSessions": 12,
          "totalMessages": 340,
          "modelUsage": {
            "claude-sonnet-4-5-20250514": {
              "inputTokens": 1000,
              "outputTokens": 2000,
              "cacheReadInputTokens": 300,
              "cacheCreationInputTokens": 40
            }
          }
        }"#,
    )
    .expect("write stats cache");

    let snapshot = load_claude_snapshot(&path).expect("snapshot");
    assert_eq!(snapshot.last_computed.as_deref(), Some("2026-08-28"));
    assert_eq!(snapshot.total_sessions, 12);
    assert_eq!(snapshot.total_messages, 340);
    let usage = &snapshot.models["claude-sonnet-4-5-20250514"];
    assert_eq!(usage.input, 1000);
    assert_eq!(usage.output, 2000);
    assert_eq!(usage.cache_read, 300);
    assert_eq!(usage.cache_write, 40);
    assert_eq!(snapshot.total_tokens(), 3340);
}

#[test]
fn claude_snapshot_tolerates_missing_fields() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("stats-cache.json");
    fs::write(&path, r#"{"modelUsage": {"m": {"inputTokens": 5}}}"#).expect("write");

    let snapshot = load_claude_snapshot(&path).expect("snapshot");
    assert_eq!(snapshot.total_sessions, 0);
    assert_eq!(snapshot.models["m"].input, 5);
    assert_eq!(snapshot.models["m"].cache_read, 0);
}

#[test]
fn claude_snapshot_missing_file_is_an_error_for_the_caller() {
    let dir = tempdir().expect("temp dir");
    let result = load_claude_snapshot(&dir.path().join("absent.json"));
    assert!(result.is_err());
}

#[test]
fn moltbot_snapshot_aggregates_by_provider_and_model() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("sessions.json");
    fs::write(
        &path,
        r#"{
          "s1": {"modelProvider": "anthropic", "model": "claude-sonnet-4-5", "inputTokens": 100, "outputTokens": 50},
          "s2": {"modelProvider": "anthropic", "model": "claude-sonnet-4-5", "inputTokens": 200, "outputTokens": 75},
          "s3": {"modelProvider": "openai", "model": "gpt-4o", "inputTokens": 10, "outputTokens": 5},
          "junk": "not a session"
        }"#,
    )
    .expect("write sessions");

    let snapshot = load_moltbot_snapshot(&path).expect("snapshot");
    assert_eq!(snapshot.session_count, 3);
    assert_eq!(snapshot.total_input, 310);
    assert_eq!(snapshot.total_output, 130);
    assert_eq!(snapshot.total_tokens(), 440);

    let sonnet = &snapshot.by_model["anthropic/claude-sonnet-4-5"];
    assert_eq!(sonnet.sessions, 2);
    assert_eq!(sonnet.input, 300);
    assert_eq!(sonnet.output, 125);

    let gpt = &snapshot.by_model["openai/gpt-4o"];
    assert_eq!(gpt.sessions, 1);
}

#[test]
fn moltbot_snapshot_defaults_missing_session_fields() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("sessions.json");
    fs::write(&path, r#"{"s1": {"inputTokens": 7}}"#).expect("write");

    let snapshot = load_moltbot_snapshot(&path).expect("snapshot");
    assert_eq!(snapshot.session_count, 1);
    assert_eq!(snapshot.total_input, 7);
    assert!(snapshot.by_model.contains_key("unknown/unknown"));
}
