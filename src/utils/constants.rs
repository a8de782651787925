/// Defaults and limits for the Sentinel client
///
/// The field limits mirror the server's own validation so a submission
/// the server would reject never leaves the client.

/// Monitoring server reached when nothing else is configured
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

/// Environment variable overriding the configured server URL
pub const SERVER_URL_ENV: &str = "SENTINEL_SERVER_URL";

/// Per-request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// How often the dashboard re-fetches the endpoint table
pub const REFRESH_INTERVAL_SECS: u64 = 5;

/// Endpoint name length bounds (server contract)
pub const ENDPOINT_NAME_MIN: usize = 10;
pub const ENDPOINT_NAME_MAX: usize = 100;

/// Probe methods the server accepts
pub const ALLOWED_METHODS: &[&str] = &["GET", "POST"];
