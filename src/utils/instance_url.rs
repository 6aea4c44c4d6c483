// SPDX-License-Identifier: GPL-3.0-only
use anyhow::{Context, Result};
use std::net::IpAddr;
use url::Url;

/// Maximum allowed URL length
const MAX_URL_LENGTH: usize = 2048;

/// Validate an org instance URL and reduce it to its origin
///
/// Checks:
/// - Only allows http/https schemes
/// - Plain http only for loopback hosts, since the access token rides on every request
/// - Rejects embedded credentials, query strings and fragments
/// - Validates URL length
pub fn normalize_instance_url(url_str: &str) -> Result<String> {
    if url_str.len() > MAX_URL_LENGTH {
        return Err(anyhow::anyhow!("URL exceeds maximum length of {} characters", MAX_URL_LENGTH));
    }

    let url = Url::parse(url_str.trim())
        .context("Invalid instance URL format")?;

    let host = url
        .host_str()
        .ok_or_else(|| anyhow::anyhow!("Instance URL must have a host"))?;

    match url.scheme() {
        "https" => {}
        "http" if is_loopback_host(host) => {}
        "http" => {
            return Err(anyhow::anyhow!(
                "Instance URL must use https (plain http is only accepted for localhost)"
            ));
        }
        scheme => {
            return Err(anyhow::anyhow!(
                "Invalid URL scheme: {} (only http and https are allowed)",
                scheme
            ));
        }
    }

    if !url.username().is_empty() || url.password().is_some() {
        return Err(anyhow::anyhow!("Instance URL must not embed credentials"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(anyhow::anyhow!("Instance URL must not carry a query or fragment"));
    }

    Ok(url.origin().ascii_serialization())
}

/// Check if a hostname is a loopback variant
fn is_loopback_host(host: &str) -> bool {
    let host = host.trim_start_matches('[').trim_end_matches(']');
    if host.eq_ignore_ascii_case("localhost") {
        return true;
    }
    host.parse::<IpAddr>().map(|ip| ip.is_loopback()).unwrap_or(false)
}
