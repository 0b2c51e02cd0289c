//! Best-effort public IP discovery
//!
//! Purely informational: the probe outcome must never depend on this call,
//! so every failure path degrades to a placeholder string.

use std::time::Duration;

/// Shown when no echo service could be reached
pub const PLACEHOLDER: &str = "unavailable";

const PRIMARY_URL: &str = "https://api.ipify.org?format=json";
const FALLBACK_URL: &str = "https://httpbin.org/ip";
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(3);

/// Ask an external echo service which address this host egresses from.
///
/// Tries the primary service, then the fallback, each bounded by a short
/// timeout. Swallows every error.
pub async fn public_ip() -> String {
    let client = match reqwest::Client::builder().timeout(LOOKUP_TIMEOUT).build() {
        Ok(client) => client,
        Err(err) => {
            log::debug!("ip lookup client build failed: {}", err);
            return PLACEHOLDER.to_string();
        }
    };

    if let Some(ip) = fetch_field(&client, PRIMARY_URL, "ip").await {
        return ip;
    }
    if let Some(ip) = fetch_field(&client, FALLBACK_URL, "origin").await {
        return ip;
    }

    log::debug!("public ip lookup failed on both services");
    PLACEHOLDER.to_string()
}

async fn fetch_field(client: &reqwest::Client, url: &str, field: &str) -> Option<String> {
    let response = client.get(url).send().await.ok()?;
    let body: serde_json::Value = response.json().await.ok()?;
    body[field].as_str().map(str::to_string)
}
