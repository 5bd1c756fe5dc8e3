use std::path::PathBuf;

use crate::Result;

/// Files the monitor keeps under its data directory.
#[derive(Clone, Debug)]
pub struct AppPaths {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    pub state_path: PathBuf,
}

impl AppPaths {
    pub fn new(data_dir: PathBuf) -> Self {
        let db_path = data_dir.join("history.db");
        let state_path = data_dir.join("last-sent.json");
        Self {
            data_dir,
            db_path,
            state_path,
        }
    }
}

pub fn ensure_data_dir(paths: &AppPaths) -> Result<()> {
    std::fs::create_dir_all(&paths.data_dir)?;
    Ok(())
}
