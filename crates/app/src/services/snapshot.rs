use chrono::NaiveDate;

use crate::error::Result;
use crate::services::{SharedConfig, load_sources, open_db};
use monitor_core::{PricingTable, Source, TokenCounts};
use monitor_sources::{ClaudeSnapshot, MoltbotSnapshot};

/// Rows written by one snapshot pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub claude_models: usize,
    pub moltbot_models: usize,
}

impl IngestStats {
    pub fn rows(&self) -> usize {
        self.claude_models + self.moltbot_models
    }
}

#[derive(Clone)]
pub struct SnapshotService {
    config: SharedConfig,
}

impl SnapshotService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    /// Read both sources and record the figures under `date`.
    pub fn run(&self, date: NaiveDate) -> Result<IngestStats> {
        let (claude, moltbot) = load_sources(&self.config);
        self.record(date, claude.as_ref(), moltbot.as_ref())
    }

    /// Record already-loaded snapshots. The sources report cumulative daily
    /// figures, so re-recording the same day overwrites the previous row
    /// instead of accumulating.
    pub fn record(
        &self,
        date: NaiveDate,
        claude: Option<&ClaudeSnapshot>,
        moltbot: Option<&MoltbotSnapshot>,
    ) -> Result<IngestStats> {
        let pricing = PricingTable::builtin();
        let mut db = open_db(&self.config)?;
        let mut stats = IngestStats::default();
        if let Some(snapshot) = claude {
            for (model, counts) in &snapshot.models {
                db.upsert_daily_usage(
                    date,
                    Source::Claude,
                    model,
                    *counts,
                    snapshot.total_sessions,
                    &pricing,
                )?;
                stats.claude_models += 1;
            }
        }
        if let Some(snapshot) = moltbot {
            for (model, usage) in &snapshot.by_model {
                let counts = TokenCounts {
                    input: usage.input,
                    output: usage.output,
                    ..TokenCounts::default()
                };
                db.upsert_daily_usage(
                    date,
                    Source::Moltbot,
                    model,
                    counts,
                    usage.sessions,
                    &pricing,
                )?;
                stats.moltbot_models += 1;
            }
        }
        Ok(stats)
    }
}
