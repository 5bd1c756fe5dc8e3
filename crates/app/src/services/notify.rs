use chrono::{DateTime, Local, NaiveDate};

use crate::error::{AppError, Result};
use crate::render::{AlertSeverity, compose_alert};
use crate::scheduler::{self, SendDecision};
use crate::services::{ReportService, SharedConfig, SnapshotService, load_sources};
use crate::state;
use crate::transport::{NotesArchive, Transport};
use monitor_core::{PricingTable, TokenCounts, format_cost, round_cost};
use monitor_sources::{ClaudeSnapshot, MoltbotSnapshot};

/// Dollar ceiling the `check` command compares against when none is given.
pub const DEFAULT_COST_THRESHOLD: f64 = 50.0;

/// What the send pass did, for frontend reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Today's report already went out; nothing was recorded or delivered.
    AlreadySent,
    /// The report was composed but not delivered.
    Skipped(String),
    /// Delivered, covering these days.
    Sent(Vec<NaiveDate>),
}

/// Result of comparing live snapshot cost against a dollar ceiling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdCheck {
    pub cost: f64,
    pub threshold: f64,
    pub alerted: bool,
}

#[derive(Clone)]
pub struct NotifyService {
    config: SharedConfig,
}

impl NotifyService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    /// Run the daily send pass: check the last-sent marker, record today's
    /// snapshot, deliver the report, then advance the marker.
    ///
    /// The marker only moves after the transport confirms delivery, so a
    /// failed send is retried by the next pass.
    pub fn run(&self, now: DateTime<Local>, transport: &dyn Transport) -> Result<SendOutcome> {
        let today = now.date_naive();
        let current = state::load_state(&self.config.state_path);
        let days = match scheduler::evaluate(&current, today) {
            SendDecision::AlreadySent => return Ok(SendOutcome::AlreadySent),
            SendDecision::Due(days) => days,
        };

        SnapshotService::new(self.config.clone()).run(today)?;
        let message = ReportService::new(self.config.clone()).build_for_days(now, &days)?;

        let Some(target) = self.config.notify_target.as_deref() else {
            return Ok(SendOutcome::Skipped(
                "notify target not configured".to_string(),
            ));
        };
        transport.deliver(target, &message)?;

        if let Some(folder) = &self.config.notes_folder {
            let archive = NotesArchive::new(folder.clone());
            let title = format!("Token Monitor {}", today);
            if let Err(err) = archive.save(&title, &message) {
                eprintln!("warning: notes archive failed: {}", err);
            }
        }

        let updated = scheduler::mark_sent(current, today);
        if let Some(date) = updated.last_sent {
            state::save_last_sent(&self.config.state_path, date, now)?;
        }
        Ok(SendOutcome::Sent(days))
    }

    /// Deliver an out-of-band alert over the same channels as the daily
    /// report. Alerts bypass the last-sent marker entirely: they neither
    /// consult it nor advance it. An explicit alert with no configured
    /// target is an error, unlike the scheduled send.
    pub fn send_alert(
        &self,
        now: DateTime<Local>,
        severity: AlertSeverity,
        message: &str,
        transport: &dyn Transport,
    ) -> Result<()> {
        let Some(target) = self.config.notify_target.as_deref() else {
            return Err(AppError::ConfigMissing("notify target".to_string()));
        };
        let body = compose_alert(now, severity, message);
        transport.deliver(target, &body)?;

        if let Some(folder) = &self.config.notes_folder {
            let archive = NotesArchive::new(folder.clone());
            let title = format!("Token Alert {}", now.format("%m-%d %H:%M"));
            if let Err(err) = archive.save(&title, &body) {
                eprintln!("warning: notes archive failed: {}", err);
            }
        }
        Ok(())
    }

    /// Estimate today's spend from the live snapshots and raise a critical
    /// alert when it reaches `threshold` dollars.
    pub fn check_cost_threshold(
        &self,
        now: DateTime<Local>,
        threshold: f64,
        transport: &dyn Transport,
    ) -> Result<ThresholdCheck> {
        let (claude, moltbot) = load_sources(&self.config);
        let cost = estimated_live_cost(claude.as_ref(), moltbot.as_ref());
        if cost < threshold {
            return Ok(ThresholdCheck {
                cost,
                threshold,
                alerted: false,
            });
        }

        let message = format!(
            "Estimated cost {} has reached the {} threshold",
            format_cost(cost),
            format_cost(threshold),
        );
        self.send_alert(now, AlertSeverity::Critical, &message, transport)?;
        Ok(ThresholdCheck {
            cost,
            threshold,
            alerted: true,
        })
    }
}

fn estimated_live_cost(
    claude: Option<&ClaudeSnapshot>,
    moltbot: Option<&MoltbotSnapshot>,
) -> f64 {
    let pricing = PricingTable::builtin();
    let mut cost = 0.0;
    if let Some(snapshot) = claude {
        for (model, counts) in &snapshot.models {
            cost += pricing.estimate(model, *counts);
        }
    }
    if let Some(snapshot) = moltbot {
        for (model, usage) in &snapshot.by_model {
            let counts = TokenCounts {
                input: usage.input,
                output: usage.output,
                ..TokenCounts::default()
            };
            cost += pricing.estimate(model, counts);
        }
    }
    round_cost(cost)
}
