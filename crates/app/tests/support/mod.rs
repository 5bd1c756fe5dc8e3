#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;

use chrono::{DateTime, Local, TimeZone};
use tempfile::{TempDir, tempdir};

use monitor_app::transport::Transport;
use monitor_app::{AppConfig, AppError, AppState};

pub struct MockTransport {
    delivered: RefCell<Vec<(String, String)>>,
    fail: bool,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            delivered: RefCell::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            delivered: RefCell::new(Vec::new()),
            fail: true,
        }
    }

    pub fn count(&self) -> usize {
        self.delivered.borrow().len()
    }

    pub fn last_message(&self) -> String {
        self.delivered
            .borrow()
            .last()
            .map(|(_, message)| message.clone())
            .expect("at least one delivery")
    }
}

impl Transport for MockTransport {
    fn deliver(&self, target: &str, message: &str) -> monitor_app::Result<()> {
        if self.fail {
            return Err(AppError::DeliveryFailed("mock transport down".to_string()));
        }
        self.delivered
            .borrow_mut()
            .push((target.to_string(), message.to_string()));
        Ok(())
    }
}

pub const CLAUDE_STATS: &str = r#"{
  "totalSessions": 4,
  "totalMessages": 120,
  "modelUsage": {
    "claude-sonnet-4-5-20250514": {"inputTokens": 1000, "outputTokens": 2000}
  }
}"#;

pub const MOLTBOT_SESSIONS: &str = r#"{
  "s1": {
    "modelProvider": "anthropic",
    "model": "claude-sonnet-4-5",
    "inputTokens": 100,
    "outputTokens": 50
  }
}"#;

pub fn setup(notify_target: Option<&str>) -> (TempDir, AppState) {
    let dir = tempdir().expect("temp dir");
    let claude_path = dir.path().join("stats-cache.json");
    fs::write(&claude_path, CLAUDE_STATS).expect("write claude stats");
    let moltbot_path = dir.path().join("sessions.json");
    fs::write(&moltbot_path, MOLTBOT_SESSIONS).expect("write moltbot sessions");

    let config = AppConfig {
        db_path: dir.path().join("history.db"),
        state_path: dir.path().join("last-sent.json"),
        claude_stats_path: claude_path,
        moltbot_sessions_path: moltbot_path,
        remote: None,
        notify_target: notify_target.map(String::from),
        notes_folder: None,
    };
    let state = AppState::new(config);
    state.setup_db().expect("setup db");
    (dir, state)
}

pub fn at_nine() -> DateTime<Local> {
    Local.with_ymd_and_hms(2026, 8, 28, 9, 0, 0).unwrap()
}
