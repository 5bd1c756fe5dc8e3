mod notify;
mod report;
mod snapshot;
mod trend;

use std::sync::Arc;

use crate::app::AppConfig;
use crate::error::Result;
use monitor_db::Db;
use monitor_sources::{
    ClaudeSnapshot, MoltbotSnapshot, load_claude_snapshot, load_moltbot_snapshot,
};

pub use notify::{DEFAULT_COST_THRESHOLD, NotifyService, SendOutcome, ThresholdCheck};
pub use report::ReportService;
pub use snapshot::{IngestStats, SnapshotService};
pub use trend::TrendService;

type SharedConfig = Arc<AppConfig>;

/// Service registry for app-level operations.
#[derive(Clone)]
pub struct AppServices {
    pub snapshot: SnapshotService,
    pub report: ReportService,
    pub trend: TrendService,
    pub notify: NotifyService,
}

impl AppServices {
    pub fn new(config: &AppConfig) -> Self {
        let shared = Arc::new(config.clone());
        Self {
            snapshot: SnapshotService::new(shared.clone()),
            report: ReportService::new(shared.clone()),
            trend: TrendService::new(shared.clone()),
            notify: NotifyService::new(shared),
        }
    }
}

fn open_db(config: &SharedConfig) -> Result<Db> {
    Ok(Db::open(&config.db_path)?)
}

/// Read both local snapshots, degrading a missing or unreadable source to
/// `None` with a warning.
fn load_sources(config: &SharedConfig) -> (Option<ClaudeSnapshot>, Option<MoltbotSnapshot>) {
    let claude = match load_claude_snapshot(&config.claude_stats_path) {
        Ok(snapshot) => Some(snapshot),
        Err(err) => {
            eprintln!("warning: claude stats unavailable: {}", err);
            None
        }
    };
    let moltbot = match load_moltbot_snapshot(&config.moltbot_sessions_path) {
        Ok(snapshot) => Some(snapshot),
        Err(err) => {
            eprintln!("warning: moltbot sessions unavailable: {}", err);
            None
        }
    };
    (claude, moltbot)
}
