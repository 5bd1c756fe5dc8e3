use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use monitor_core::TokenCounts;

use crate::types::{ClaudeSnapshot, Result};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStatsCache {
    last_computed_date: Option<String>,
    #[serde(default)]
    total_sessions: u64,
    #[serde(default)]
    total_messages: u64,
    #[serde(default)]
    model_usage: BTreeMap<String, RawModelUsage>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawModelUsage {
    #[serde(default)]
    input_tokens: u64,
    #[serde(default)]
    output_tokens: u64,
    #[serde(default)]
    cache_read_input_tokens: u64,
    #[serde(default)]
    cache_creation_input_tokens: u64,
}

/// Read the Claude stats cache at `path`. Missing or malformed files are
/// the caller's cue to omit the section, not to abort the run.
pub fn load_claude_snapshot(path: &Path) -> Result<ClaudeSnapshot> {
    let contents = fs::read_to_string(path)?;
    let raw: RawStatsCache = serde_json::from_str(&contents)?;
    let models = raw
        .model_usage
        .into_iter()
        .map(|(model, usage)| {
            (
                model,
                TokenCounts {
                    input: usage.input_tokens,
                    output: usage.output_tokens,
                    cache_read: usage.cache_read_input_tokens,
                    cache_write: usage.cache_creation_input_tokens,
                },
            )
        })
        .collect();
    Ok(ClaudeSnapshot {
        last_computed: raw.last_computed_date,
        total_sessions: raw.total_sessions,
        total_messages: raw.total_messages,
        models,
    })
}
