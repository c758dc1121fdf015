use std::env;
use std::time::Duration;

use hystats_api::ClientConfig;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub client: ClientConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let api_key = env::var("HYPIXEL_API_KEY").ok();

        let mut client = ClientConfig::default();
        if let Ok(url) = env::var("HYPIXEL_API_BASE") {
            client = client.with_stats_base_url(url);
        }
        if let Ok(url) = env::var("MOJANG_API_BASE") {
            client = client.with_identity_base_url(url);
        }

        let request_timeout = timeout_from_env(
            "REQUEST_TIMEOUT_SECS",
            ClientConfig::DEFAULT_REQUEST_TIMEOUT,
        )?;
        let resource_timeout = timeout_from_env(
            "RESOURCE_TIMEOUT_SECS",
            ClientConfig::DEFAULT_RESOURCE_TIMEOUT,
        )?;

        Ok(Self {
            api_key,
            client: client
                .with_request_timeout(request_timeout)
                .with_resource_timeout(resource_timeout),
        })
    }
}

fn timeout_from_env(name: &str, default: Duration) -> Result<Duration, AppError> {
    parse_timeout(name, env::var(name).ok().as_deref(), default)
}

/// Unparseable values fall back to `default`, zero is rejected.
fn parse_timeout(name: &str, raw: Option<&str>, default: Duration) -> Result<Duration, AppError> {
    match raw.and_then(|v| v.trim().parse::<u64>().ok()) {
        Some(0) => Err(AppError::Config(format!("{name} must be greater than 0"))),
        Some(secs) => Ok(Duration::from_secs(secs)),
        None => Ok(default),
    }
}
