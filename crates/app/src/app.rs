use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::services::AppServices;
use monitor_db::Db;

/// Connection details for the remote billing endpoint.
#[derive(Clone, Debug)]
pub struct RemoteConfig {
    pub base_url: String,
    pub api_key: String,
}

/// Paths and delivery settings needed to run the monitor.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub state_path: PathBuf,
    pub claude_stats_path: PathBuf,
    pub moltbot_sessions_path: PathBuf,
    pub remote: Option<RemoteConfig>,
    pub notify_target: Option<String>,
    pub notes_folder: Option<String>,
}

/// Application state shared by frontends.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub services: AppServices,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let services = AppServices::new(&config);
        Self { config, services }
    }

    pub fn setup_db(&self) -> Result<()> {
        setup_db(&self.config.db_path)
    }

    pub fn open_db(&self) -> Result<Db> {
        Ok(Db::open(&self.config.db_path)?)
    }
}

pub fn setup_db(path: &Path) -> Result<()> {
    let mut db = Db::open(path)?;
    db.migrate()?;
    Ok(())
}
