use chrono::{Duration, NaiveDate};

use crate::state::NotificationState;

/// Maximum number of days a single report covers when sends were missed.
pub const CATCH_UP_CAP: usize = 3;

/// Outcome of checking the last-sent marker against today's date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendDecision {
    /// A report already went out today; nothing to record or deliver.
    AlreadySent,
    /// Days the next report covers, oldest first, ending today.
    Due(Vec<NaiveDate>),
}

/// Days the next report covers: the most recent run of consecutive days
/// ending today, capped at [`CATCH_UP_CAP`]. Empty when today's report has
/// already gone out.
pub fn missed_days(last_sent: Option<NaiveDate>, today: NaiveDate) -> Vec<NaiveDate> {
    let earliest = today - Duration::days(CATCH_UP_CAP as i64 - 1);
    let start = match last_sent {
        Some(sent) if sent >= today => return Vec::new(),
        Some(sent) => (sent + Duration::days(1)).max(earliest),
        None => today,
    };
    let mut days = Vec::new();
    let mut day = start;
    while day <= today {
        days.push(day);
        day += Duration::days(1);
    }
    days
}

pub fn evaluate(state: &NotificationState, today: NaiveDate) -> SendDecision {
    let days = missed_days(state.last_sent, today);
    if days.is_empty() {
        SendDecision::AlreadySent
    } else {
        SendDecision::Due(days)
    }
}

/// Advance the marker to `today`. The marker never moves backward, so a
/// stale pass cannot undo a newer send.
pub fn mark_sent(state: NotificationState, today: NaiveDate) -> NotificationState {
    NotificationState {
        last_sent: Some(state.last_sent.map_or(today, |sent| sent.max(today))),
    }
}
