use std::collections::BTreeMap;
use std::io;

use serde::{Deserialize, Serialize};

use monitor_core::TokenCounts;

/// Point-in-time read of the Claude stats cache.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaudeSnapshot {
    pub last_computed: Option<String>,
    pub total_sessions: u64,
    pub total_messages: u64,
    pub models: BTreeMap<String, TokenCounts>,
}

impl ClaudeSnapshot {
    pub fn total_tokens(&self) -> u64 {
        self.models.values().map(TokenCounts::total).sum()
    }
}

/// Per-model aggregate from the Moltbot session store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSessions {
    pub input: u64,
    pub output: u64,
    pub sessions: u64,
}

/// Point-in-time aggregate of the Moltbot session store, keyed by
/// `provider/model`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoltbotSnapshot {
    pub session_count: u64,
    pub total_input: u64,
    pub total_output: u64,
    pub by_model: BTreeMap<String, ModelSessions>,
}

impl MoltbotSnapshot {
    pub fn total_tokens(&self) -> u64 {
        self.total_input.saturating_add(self.total_output)
    }
}

/// Account total reported by the remote billing endpoint, in hundredths of
/// the billing currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteUsage {
    #[serde(default)]
    pub total_usage: i64,
}

impl RemoteUsage {
    pub fn amount(&self) -> f64 {
        self.total_usage as f64 / 100.0
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("http error: {0}")]
    Http(#[from] Box<ureq::Error>),
    #[error("missing credential: {0}")]
    MissingCredential(String),
}

pub type Result<T> = std::result::Result<T, SourceError>;
