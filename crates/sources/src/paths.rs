use std::path::PathBuf;

fn home_dir() -> Result<PathBuf, String> {
    std::env::var("HOME")
        .map(PathBuf::from)
        .map_err(|err| format!("resolve HOME: {}", err))
}

pub fn default_claude_stats_path() -> Result<PathBuf, String> {
    Ok(home_dir()?.join(".claude").join("stats-cache.json"))
}

pub fn default_moltbot_sessions_path() -> Result<PathBuf, String> {
    Ok(home_dir()?
        .join(".clawdbot")
        .join("agents")
        .join("main")
        .join("sessions")
        .join("sessions.json"))
}
