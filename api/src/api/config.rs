use std::time::Duration;

/// Endpoints and timeouts used by [`super::client::ApiClientBase`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub identity_base_url: String,
    pub stats_base_url: String,
    /// Applied while establishing a connection.
    pub request_timeout: Duration,
    /// Upper bound for a whole request, body included.
    pub resource_timeout: Duration,
}

impl ClientConfig {
    pub const DEFAULT_IDENTITY_BASE_URL: &'static str = "https://api.mojang.com";
    pub const DEFAULT_STATS_BASE_URL: &'static str = "https://api.hypixel.net/v2";
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
    pub const DEFAULT_RESOURCE_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn with_identity_base_url(mut self, url: impl Into<String>) -> Self {
        self.identity_base_url = trim_base(url.into());
        self
    }

    pub fn with_stats_base_url(mut self, url: impl Into<String>) -> Self {
        self.stats_base_url = trim_base(url.into());
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_resource_timeout(mut self, timeout: Duration) -> Self {
        self.resource_timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            identity_base_url: Self::DEFAULT_IDENTITY_BASE_URL.to_string(),
            stats_base_url: Self::DEFAULT_STATS_BASE_URL.to_string(),
            request_timeout: Self::DEFAULT_REQUEST_TIMEOUT,
            resource_timeout: Self::DEFAULT_RESOURCE_TIMEOUT,
        }
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
