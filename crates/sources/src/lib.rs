mod claude;
mod moltbot;
mod paths;
mod remote;
mod types;

pub use claude::load_claude_snapshot;
pub use moltbot::load_moltbot_snapshot;
pub use paths::{default_claude_stats_path, default_moltbot_sessions_path};
pub use remote::{REMOTE_TIMEOUT, fetch_remote_usage};
pub use types::{
    ClaudeSnapshot, ModelSessions, MoltbotSnapshot, RemoteUsage, Result, SourceError,
};
