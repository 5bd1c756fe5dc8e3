use chrono::{DateTime, Duration, Local, NaiveDate};

use crate::error::Result;
use crate::render::{ReportData, compose_report};
use crate::services::{SharedConfig, load_sources, open_db};
use monitor_sources::{RemoteUsage, fetch_remote_usage};

#[derive(Clone)]
pub struct ReportService {
    config: SharedConfig,
}

impl ReportService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    /// Compose today's report without recording anything.
    pub fn build(&self, now: DateTime<Local>) -> Result<String> {
        self.build_for_days(now, &[now.date_naive()])
    }

    /// Compose a report covering `days`, oldest first, ending today. More
    /// than one day adds a catch-up section.
    pub fn build_for_days(&self, now: DateTime<Local>, days: &[NaiveDate]) -> Result<String> {
        let (claude, moltbot) = load_sources(&self.config);
        let remote = self.fetch_remote();

        let db = open_db(&self.config)?;
        let today = now.date_naive();
        let today_rollup = db.rollup_for(today)?;
        let yesterday = db.rollup_for(today - Duration::days(1))?;
        let mut catch_up = Vec::new();
        if days.len() > 1 {
            for day in days {
                catch_up.push((*day, db.rollup_for(*day)?));
            }
        }

        let data = ReportData {
            claude,
            moltbot,
            remote,
            today: today_rollup,
            yesterday,
            catch_up,
        };
        Ok(compose_report(now, &data))
    }

    /// The billing total is optional twice over: the endpoint may not be
    /// configured, and a configured endpoint may be unreachable.
    fn fetch_remote(&self) -> Option<RemoteUsage> {
        let remote = self.config.remote.as_ref()?;
        match fetch_remote_usage(&remote.base_url, &remote.api_key) {
            Ok(usage) => Some(usage),
            Err(err) => {
                eprintln!("warning: remote usage unavailable: {}", err);
                None
            }
        }
    }
}
