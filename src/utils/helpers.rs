/// Helper utilities for the Sentinel CLI

use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;
use std::time::Duration;

use crate::utils::{AppConfig, DEFAULT_SERVER_URL, DEFAULT_TIMEOUT_SECS, SERVER_URL_ENV};

/// Resolve the monitoring server URL
///
/// Sources in priority order; the first hit wins.
pub fn resolve_server_url(flag: Option<&str>) -> String {
    // 1. --server flag
    if let Some(url) = flag {
        return url.trim_end_matches('/').to_string();
    }

    // 2. Environment variable (a local .env is loaded at startup)
    if let Ok(url) = std::env::var(SERVER_URL_ENV) {
        if !url.trim().is_empty() {
            return url.trim().trim_end_matches('/').to_string();
        }
    }

    // 3. Saved configuration
    if let Ok(config) = AppConfig::load() {
        if let Some(url) = config.server_url {
            return url.trim_end_matches('/').to_string();
        }
    }

    // 4. Default
    DEFAULT_SERVER_URL.to_string()
}

/// Resolve the per-request timeout, flag first, then config, then default
pub fn resolve_timeout_secs(flag: Option<u64>) -> u64 {
    if let Some(secs) = flag {
        return secs;
    }

    if let Ok(config) = AppConfig::load() {
        if let Some(secs) = config.timeout_secs {
            return secs;
        }
    }

    DEFAULT_TIMEOUT_SECS
}

/// Validate an endpoint URL (http or https, with a host)
pub fn is_valid_url(url: &str) -> bool {
    let re = Regex::new(r"^https?://[^\s/:?#]+(:\d+)?(/\S*)?$").unwrap();
    re.is_match(url)
}

/// Format a server-reported response time without inventing precision:
/// whole numbers print bare, fractions keep one decimal
pub fn format_response_time(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

/// Parse the server's last-check timestamp ("2024-05-01T12:30:00Z")
pub fn parse_last_check(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%SZ")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Render a last-check timestamp as a relative age, "3m 12s ago"
pub fn format_age(raw: &str) -> String {
    let Some(checked_at) = parse_last_check(raw) else {
        return raw.to_string();
    };

    let seconds = (Utc::now() - checked_at).num_seconds();
    if seconds < 0 {
        return "just now".to_string();
    }

    format!(
        "{} ago",
        humantime::format_duration(Duration::from_secs(seconds as u64))
    )
}

/// Truncate string with ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}
