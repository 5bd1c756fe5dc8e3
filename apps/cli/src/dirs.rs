use std::path::PathBuf;

const DATA_DIR_NAME: &str = ".token-monitor";

pub fn resolve_data_dir() -> Result<PathBuf, String> {
    let home = std::env::var("HOME").map_err(|err| format!("resolve HOME: {}", err))?;
    Ok(PathBuf::from(home).join(DATA_DIR_NAME))
}
