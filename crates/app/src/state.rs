use std::path::Path;

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Marker recording the last day a report was delivered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotificationState {
    pub last_sent: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StateFile {
    date: NaiveDate,
    timestamp: String,
}

/// Load the last-sent marker. A missing file means no report has gone out
/// yet; an unreadable file is treated the same way so a corrupt marker
/// never blocks the daily send.
pub fn load_state(path: &Path) -> NotificationState {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return NotificationState::default();
    };
    match serde_json::from_str::<StateFile>(&contents) {
        Ok(file) => NotificationState {
            last_sent: Some(file.date),
        },
        Err(err) => {
            eprintln!(
                "warning: ignoring unreadable state file {}: {}",
                path.display(),
                err
            );
            NotificationState::default()
        }
    }
}

/// Persist the marker after a confirmed delivery.
pub fn save_last_sent(path: &Path, date: NaiveDate, now: DateTime<Local>) -> Result<()> {
    let file = StateFile {
        date,
        timestamp: now.format("%Y-%m-%d %H:%M:%S").to_string(),
    };
    std::fs::write(path, serde_json::to_string_pretty(&file)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    #[test]
    fn missing_file_means_never_sent() {
        let dir = tempdir().expect("temp dir");
        let state = load_state(&dir.path().join("absent.json"));
        assert_eq!(state.last_sent, None);
    }

    #[test]
    fn marker_round_trips() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("last-sent.json");
        let date = NaiveDate::from_ymd_opt(2026, 8, 28).expect("date");
        let now = Local.with_ymd_and_hms(2026, 8, 28, 9, 0, 0).unwrap();

        save_last_sent(&path, date, now).expect("save");
        let state = load_state(&path);
        assert_eq!(state.last_sent, Some(date));
    }

    #[test]
    fn corrupt_marker_degrades_to_never_sent() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("last-sent.json");
        std::fs::write(&path, "{not json").expect("write");

        let state = load_state(&path);
        assert_eq!(state.last_sent, None);
    }
}
