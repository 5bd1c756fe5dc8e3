use chrono::{Duration, NaiveDate};

use crate::error::Result;
use crate::services::{SharedConfig, open_db};
use monitor_core::{DailyRollup, TrendReport};

#[derive(Clone)]
pub struct TrendService {
    config: SharedConfig,
}

impl TrendService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    pub fn trend(&self, reference: NaiveDate) -> Result<TrendReport> {
        let db = open_db(&self.config)?;
        Ok(db.compute_trend(reference)?)
    }

    /// Daily rollups for the `days` ending at `reference`, newest first.
    pub fn history(&self, reference: NaiveDate, days: u32) -> Result<Vec<DailyRollup>> {
        let db = open_db(&self.config)?;
        let start = reference - Duration::days(days.saturating_sub(1) as i64);
        Ok(db.rollup_range(start, reference)?)
    }
}
