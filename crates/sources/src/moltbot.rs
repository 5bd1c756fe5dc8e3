use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::types::{ModelSessions, MoltbotSnapshot, Result};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSession {
    #[serde(default = "unknown")]
    model_provider: String,
    #[serde(default = "unknown")]
    model: String,
    #[serde(default)]
    input_tokens: u64,
    #[serde(default)]
    output_tokens: u64,
}

fn unknown() -> String {
    "unknown".to_string()
}

/// Read and aggregate the Moltbot session store at `path`.
///
/// The store maps session ids to session objects; entries that are not
/// objects are skipped rather than failing the whole snapshot.
pub fn load_moltbot_snapshot(path: &Path) -> Result<MoltbotSnapshot> {
    let contents = fs::read_to_string(path)?;
    let raw: BTreeMap<String, Value> = serde_json::from_str(&contents)?;

    let mut snapshot = MoltbotSnapshot::default();
    let mut by_model: BTreeMap<String, ModelSessions> = BTreeMap::new();
    for value in raw.into_values() {
        if !value.is_object() {
            continue;
        }
        let Ok(session) = serde_json::from_value::<RawSession>(value) else {
            continue;
        };
        snapshot.session_count += 1;
        snapshot.total_input = snapshot.total_input.saturating_add(session.input_tokens);
        snapshot.total_output = snapshot.total_output.saturating_add(session.output_tokens);

        let key = format!("{}/{}", session.model_provider, session.model);
        let entry = by_model.entry(key).or_default();
        entry.input = entry.input.saturating_add(session.input_tokens);
        entry.output = entry.output.saturating_add(session.output_tokens);
        entry.sessions += 1;
    }
    snapshot.by_model = by_model;
    Ok(snapshot)
}
