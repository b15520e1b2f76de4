//! Coordination service endpoints and defaults

/// Paths on the coordination service, relative to the configured API URL
pub mod api_path {
    pub const CHECK_STATUS: &str = "/api/check_status";
    pub const POST_STATUS: &str = "/api/post_status";
}

/// Header carrying the caller's login on every forwarded request
pub const USERNAME_HEADER: &str = "x-github-username";

/// Coordination service used when nothing else is configured
pub const DEFAULT_API_URL: &str = "https://relay_devfest.vercel.app";

/// Request timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Branch assumed when the caller does not name one
pub const DEFAULT_BRANCH: &str = "main";
