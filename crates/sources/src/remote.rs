use std::time::Duration;

use crate::types::{RemoteUsage, Result, SourceError};

pub const REMOTE_TIMEOUT: Duration = Duration::from_secs(10);

/// Query the account usage total from the billing endpoint.
///
/// A timeout or transport failure degrades the report section; the caller
/// decides whether to warn or omit.
pub fn fetch_remote_usage(base_url: &str, api_key: &str) -> Result<RemoteUsage> {
    if api_key.is_empty() {
        return Err(SourceError::MissingCredential("usage api key".to_string()));
    }
    let url = format!(
        "{}/v1/dashboard/billing/usage",
        base_url.trim_end_matches('/')
    );
    let response = ureq::get(&url)
        .timeout(REMOTE_TIMEOUT)
        .set("Authorization", &format!("Bearer {}", api_key))
        .call()
        .map_err(Box::new)?;
    let usage: RemoteUsage = response.into_json()?;
    Ok(usage)
}
