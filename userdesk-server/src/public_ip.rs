//! Operator helper: discover the host's public IP through ipify.

use anyhow::{Context, anyhow};
use serde::Deserialize;

pub const IPIFY_URL: &str = "https://api.ipify.org?format=json";

#[derive(Debug, Deserialize)]
struct IpifyResponse {
    ip: String,
}

pub fn parse_ipify_response(body: &str) -> anyhow::Result<String> {
    let parsed: IpifyResponse =
        serde_json::from_str(body).context("failed to decode ipify response")?;
    let ip = parsed.ip.trim();
    if ip.is_empty() {
        return Err(anyhow!("ipify response did not include an IP"));
    }
    Ok(ip.to_string())
}

pub async fn fetch_public_ip(client: &reqwest::Client, url: &str) -> anyhow::Result<String> {
    let body = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("failed to reach {url}"))?
        .error_for_status()
        .context("ipify returned an error status")?
        .text()
        .await
        .context("failed to read ipify response")?;

    parse_ipify_response(&body)
}
