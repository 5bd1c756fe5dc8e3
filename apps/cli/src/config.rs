use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "config.toml";

/// Keys in `~/.token-monitor/config.toml`. Empty strings mean the feature
/// is not configured.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub usage_api_url: String,
    pub usage_api_key: String,
    pub notify_target: String,
    pub notes_folder: String,
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: CliConfig,
    pub file: PathBuf,
    pub created: bool,
}

pub fn load_or_create() -> Result<ConfigLoad, String> {
    let dir = crate::dirs::resolve_data_dir()?;
    fs::create_dir_all(&dir)
        .map_err(|err| format!("create config dir {}: {}", dir.display(), err))?;
    let file = dir.join(CONFIG_FILE_NAME);

    if file.exists() {
        let contents = fs::read_to_string(&file)
            .map_err(|err| format!("read config {}: {}", file.display(), err))?;
        let mut config: CliConfig = toml::from_str(&contents)
            .map_err(|err| format!("parse config {}: {}", file.display(), err))?;
        apply_env_overrides(&mut config);
        return Ok(ConfigLoad {
            config,
            file,
            created: false,
        });
    }

    let mut config = CliConfig::default();
    let contents =
        toml::to_string_pretty(&config).map_err(|err| format!("serialize config: {}", err))?;
    fs::write(&file, contents)
        .map_err(|err| format!("write config {}: {}", file.display(), err))?;
    apply_env_overrides(&mut config);

    Ok(ConfigLoad {
        config,
        file,
        created: true,
    })
}

fn apply_env_overrides(config: &mut CliConfig) {
    if let Ok(key) = std::env::var("USAGE_API_KEY") {
        if !key.is_empty() {
            config.usage_api_key = key;
        }
    }
    if let Ok(target) = std::env::var("NOTIFY_TARGET") {
        if !target.is_empty() {
            config.notify_target = target;
        }
    }
}
